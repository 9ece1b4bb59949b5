use chrono::NaiveDate;

use crate::core::error::WorkflowError;
use crate::model::absence_request::AbsenceStatus;

/// Every calendar day of the inclusive range, in order. A single-day
/// request (`start == end`) yields exactly one date.
pub fn expand_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|day| *day <= end).collect()
}

/// Lifecycle moves: a pending request may be resolved either way, and a
/// resolved request may be reverted back to pending. Everything else,
/// including a same-state update, is refused.
pub fn transition_allowed(from: AbsenceStatus, to: AbsenceStatus) -> bool {
    use AbsenceStatus::*;
    matches!(
        (from, to),
        (Pending, Approved) | (Pending, Rejected) | (Approved, Pending) | (Rejected, Pending)
    )
}

pub fn ensure_transition(from: AbsenceStatus, to: AbsenceStatus) -> Result<(), WorkflowError> {
    if transition_allowed(from, to) {
        Ok(())
    } else {
        Err(WorkflowError::InvalidState(format!(
            "Absence request is {from}; cannot move it to {to}"
        )))
    }
}
