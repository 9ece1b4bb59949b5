use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::profile::Profile;

/// Per-person totals over a set of attendance records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub present: u32,
    pub late: u32,
    pub absent: u32,
    pub total_work: Duration,
}

impl Default for Summary {
    fn default() -> Self {
        Self {
            present: 0,
            late: 0,
            absent: 0,
            total_work: Duration::zero(),
        }
    }
}

/// Counts records by status and sums the worked span of every record that
/// carries both timestamps; records missing either timestamp contribute
/// zero to the total.
pub fn aggregate<'a, I>(records: I) -> Summary
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    let mut summary = Summary::default();

    for record in records {
        match record.status {
            AttendanceStatus::Present => summary.present += 1,
            AttendanceStatus::Late => summary.late += 1,
            AttendanceStatus::Absent => summary.absent += 1,
        }

        if let (Some(start), Some(end)) = (record.check_in_time, record.check_out_time) {
            summary.total_work = summary.total_work + (end - start);
        }
    }

    summary
}

/// `"H Hour M Minutes"`, floored to whole minutes.
pub fn format_work_duration(total: Duration) -> String {
    let minutes = total.num_minutes().max(0);
    format!("{} Hour {} Minutes", minutes / 60, minutes % 60)
}

/// One row of the summary report, the shape the report renderer consumes.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SummaryRow {
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = 18)]
    pub present: u32,
    #[schema(example = 2)]
    pub late: u32,
    #[schema(example = 1)]
    pub absent: u32,
    #[schema(example = "160 Hour 30 Minutes")]
    pub total_hours: String,
}

/// One row per profile, in profile order; a profile with no records gets
/// an all-zero row.
pub fn summarize_per_user(profiles: &[Profile], records: &[AttendanceRecord]) -> Vec<SummaryRow> {
    profiles
        .iter()
        .map(|profile| {
            let summary = aggregate(records.iter().filter(|r| r.user_id == profile.user_id));
            SummaryRow {
                name: profile.full_name.clone(),
                present: summary.present,
                late: summary.late,
                absent: summary.absent,
                total_hours: format_work_duration(summary.total_work),
            }
        })
        .collect()
}

/// One row of the raw export.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RawReportRow {
    #[schema(example = "2026-01-05", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "2026-01-05T08:55:00Z", value_type = Option<String>, format = "date-time")]
    pub check_in_time: Option<DateTime<Utc>>,
    #[schema(example = "2026-01-05T17:10:00Z", value_type = Option<String>, format = "date-time")]
    pub check_out_time: Option<DateTime<Utc>>,
    #[schema(example = "Present")]
    pub status: AttendanceStatus,
    #[schema(example = "8 Hour 15 Minutes")]
    pub work_duration: String,
}

/// Raw rows keep record order. Closed sessions render their span, Absent
/// rows render a zero span, anything else renders `-`.
pub fn raw_rows(records: &[AttendanceRecord]) -> Vec<RawReportRow> {
    records
        .iter()
        .map(|record| RawReportRow {
            date: record.date,
            check_in_time: record.check_in_time,
            check_out_time: record.check_out_time,
            status: record.status,
            work_duration: match (record.check_in_time, record.check_out_time) {
                (Some(start), Some(end)) => format_work_duration(end - start),
                _ if record.status == AttendanceStatus::Absent => {
                    format_work_duration(Duration::zero())
                }
                _ => "-".to_string(),
            },
        })
        .collect()
}
