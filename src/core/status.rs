use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::Serialize;
use strum_macros::Display;

use crate::model::absence_request::{AbsenceRequest, AbsenceStatus};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};

/// The four mutually exclusive display states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum UiState {
    NotCheckedIn,
    CheckedIn,
    CheckedOut,
    Absent,
}

impl UiState {
    /// A new session may start only when nothing is open and no approved
    /// absence covers today.
    pub fn allows_check_in(&self) -> bool {
        matches!(self, UiState::NotCheckedIn | UiState::CheckedOut)
    }

    pub fn allows_check_out(&self) -> bool {
        matches!(self, UiState::CheckedIn)
    }
}

#[derive(Debug, Clone)]
pub struct DerivedStatus<'a> {
    pub state: UiState,
    pub label: String,
    pub latest: Option<&'a AttendanceRecord>,
}

/// Derives the display state from a user's attendance history and absence
/// requests.
///
/// `history` must be ordered by `check_in_time` descending. Only its first
/// element is consulted, so a session left open on a previous day still
/// reads as checked in today.
pub fn derive_status<'a>(
    history: &'a [AttendanceRecord],
    requests: &[AbsenceRequest],
    today: NaiveDate,
) -> DerivedStatus<'a> {
    // First approved request covering today wins. Overlapping approvals
    // should not exist, but list order breaks the tie when they do.
    let active_absence = requests
        .iter()
        .find(|r| r.status == AbsenceStatus::Approved && r.covers(today));

    let latest = history.first();

    if let Some(absence) = active_absence {
        return DerivedStatus {
            state: UiState::Absent,
            label: format!("Absent (Reason: {})", absence.reason),
            latest,
        };
    }

    match latest {
        None => DerivedStatus {
            state: UiState::NotCheckedIn,
            label: "Not Checked In".to_string(),
            latest: None,
        },
        Some(record) if record.is_open() => DerivedStatus {
            state: UiState::CheckedIn,
            label: if record.status == AttendanceStatus::Late {
                "Checked In (Late)".to_string()
            } else {
                "Checked In".to_string()
            },
            latest,
        },
        Some(_) => DerivedStatus {
            state: UiState::CheckedOut,
            label: "Checked Out".to_string(),
            latest,
        },
    }
}

/// A check-in at or after the threshold hour (local time) counts as late;
/// 09:59 is Present, 10:00 sharp is Late under the default threshold.
pub fn classify_check_in(checked_in_at: NaiveTime, late_after_hour: u32) -> AttendanceStatus {
    if checked_in_at.hour() >= late_after_hour {
        AttendanceStatus::Late
    } else {
        AttendanceStatus::Present
    }
}
