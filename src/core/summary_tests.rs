#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    use crate::core::summary::{
        aggregate, format_work_duration, raw_rows, summarize_per_user,
    };
    use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
    use crate::model::profile::Profile;
    use crate::model::role::Role;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn worked(
        id: u64,
        user_id: u64,
        status: AttendanceStatus,
        minutes: i64,
    ) -> AttendanceRecord {
        let date = day(2026, 1, 5);
        let start = Utc.from_utc_datetime(&date.and_hms_opt(9, 0, 0).unwrap());
        AttendanceRecord {
            id,
            user_id,
            date,
            check_in_time: Some(start),
            check_out_time: Some(start + Duration::minutes(minutes)),
            status,
            created_at: None,
        }
    }

    fn absent(id: u64, user_id: u64) -> AttendanceRecord {
        AttendanceRecord {
            id,
            user_id,
            date: day(2026, 1, 6),
            check_in_time: None,
            check_out_time: None,
            status: AttendanceStatus::Absent,
            created_at: None,
        }
    }

    fn profile(user_id: u64, name: &str) -> Profile {
        Profile {
            user_id,
            full_name: name.to_string(),
            email: format!("{}@company.com", user_id),
            role: Role::Employee,
        }
    }

    #[test]
    fn empty_input_aggregates_to_all_zeroes() {
        let summary = aggregate(&[]);
        assert_eq!(summary.present, 0);
        assert_eq!(summary.late, 0);
        assert_eq!(summary.absent, 0);
        assert_eq!(format_work_duration(summary.total_work), "0 Hour 0 Minutes");
    }

    #[test]
    fn spans_sum_across_records() {
        // 2h15m Present + 45m Late = exactly 3 hours.
        let records = vec![
            worked(1, 1, AttendanceStatus::Present, 135),
            worked(2, 1, AttendanceStatus::Late, 45),
        ];

        let summary = aggregate(&records);
        assert_eq!(summary.present, 1);
        assert_eq!(summary.late, 1);
        assert_eq!(summary.absent, 0);
        assert_eq!(format_work_duration(summary.total_work), "3 Hour 0 Minutes");
    }

    #[test]
    fn records_without_both_timestamps_contribute_zero() {
        let mut open = worked(1, 1, AttendanceStatus::Present, 135);
        open.check_out_time = None;
        let records = vec![open, absent(2, 1)];

        let summary = aggregate(&records);
        assert_eq!(summary.present, 1);
        assert_eq!(summary.absent, 1);
        assert_eq!(format_work_duration(summary.total_work), "0 Hour 0 Minutes");
    }

    #[test]
    fn duration_is_floored_to_whole_minutes() {
        assert_eq!(
            format_work_duration(Duration::seconds(61)),
            "0 Hour 1 Minutes"
        );
        assert_eq!(
            format_work_duration(Duration::minutes(59)),
            "0 Hour 59 Minutes"
        );
        assert_eq!(
            format_work_duration(Duration::minutes(60)),
            "1 Hour 0 Minutes"
        );
    }

    #[test]
    fn per_user_rows_group_by_owner_and_keep_profile_order() {
        let profiles = vec![profile(1, "Jane Doe"), profile(2, "John Roe")];
        let records = vec![
            worked(1, 1, AttendanceStatus::Present, 480),
            worked(2, 2, AttendanceStatus::Late, 60),
            absent(3, 2),
        ];

        let rows = summarize_per_user(&profiles, &records);
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].name, "Jane Doe");
        assert_eq!((rows[0].present, rows[0].late, rows[0].absent), (1, 0, 0));
        assert_eq!(rows[0].total_hours, "8 Hour 0 Minutes");

        assert_eq!(rows[1].name, "John Roe");
        assert_eq!((rows[1].present, rows[1].late, rows[1].absent), (0, 1, 1));
        assert_eq!(rows[1].total_hours, "1 Hour 0 Minutes");
    }

    #[test]
    fn profile_without_records_gets_a_zero_row() {
        let profiles = vec![profile(9, "New Hire")];
        let rows = summarize_per_user(&profiles, &[]);
        assert_eq!(rows.len(), 1);
        assert_eq!((rows[0].present, rows[0].late, rows[0].absent), (0, 0, 0));
        assert_eq!(rows[0].total_hours, "0 Hour 0 Minutes");
    }

    #[test]
    fn raw_rows_render_span_zero_span_or_dash() {
        let mut open = worked(2, 1, AttendanceStatus::Present, 0);
        open.check_out_time = None;
        let records = vec![
            worked(1, 1, AttendanceStatus::Present, 495),
            absent(3, 1),
            open,
        ];

        let rows = raw_rows(&records);
        assert_eq!(rows[0].work_duration, "8 Hour 15 Minutes");
        assert_eq!(rows[1].work_duration, "0 Hour 0 Minutes");
        assert_eq!(rows[2].work_duration, "-");
        // Record order is preserved for the export.
        assert_eq!(rows[0].date, day(2026, 1, 5));
        assert_eq!(rows[1].status, AttendanceStatus::Absent);
    }
}
