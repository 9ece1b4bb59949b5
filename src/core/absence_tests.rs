#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::core::absence::{ensure_transition, expand_range, transition_allowed};
    use crate::core::error::WorkflowError;
    use crate::model::absence_request::AbsenceStatus::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn three_day_range_expands_to_three_dates() {
        let days = expand_range(day(2024, 1, 1), day(2024, 1, 3));
        assert_eq!(
            days,
            vec![day(2024, 1, 1), day(2024, 1, 2), day(2024, 1, 3)]
        );
    }

    #[test]
    fn single_day_range_expands_to_one_date() {
        let days = expand_range(day(2024, 1, 1), day(2024, 1, 1));
        assert_eq!(days, vec![day(2024, 1, 1)]);
    }

    #[test]
    fn expansion_crosses_month_and_leap_boundaries() {
        let days = expand_range(day(2024, 2, 28), day(2024, 3, 1));
        assert_eq!(
            days,
            vec![day(2024, 2, 28), day(2024, 2, 29), day(2024, 3, 1)]
        );
    }

    #[test]
    fn pending_requests_may_be_resolved_either_way() {
        assert!(transition_allowed(Pending, Approved));
        assert!(transition_allowed(Pending, Rejected));
    }

    #[test]
    fn resolved_requests_may_be_reverted() {
        assert!(transition_allowed(Approved, Pending));
        assert!(transition_allowed(Rejected, Pending));
    }

    #[test]
    fn cross_resolution_and_same_state_moves_are_refused() {
        assert!(!transition_allowed(Approved, Rejected));
        assert!(!transition_allowed(Rejected, Approved));
        assert!(!transition_allowed(Pending, Pending));
        assert!(!transition_allowed(Approved, Approved));
        assert!(!transition_allowed(Rejected, Rejected));
    }

    #[test]
    fn refused_transition_reports_invalid_state() {
        let err = ensure_transition(Approved, Rejected).unwrap_err();
        match err {
            WorkflowError::InvalidState(msg) => {
                assert!(msg.contains("Approved"));
                assert!(msg.contains("Rejected"));
            }
            other => panic!("expected InvalidState, got {other:?}"),
        }
    }

    // Deleting an approved request is a separate destructive operation with
    // no compensation: nothing in the transition table (or anywhere else in
    // the workflow) removes the attendance records it materialized.
    #[test]
    fn revert_after_approval_is_the_only_path_back() {
        assert!(ensure_transition(Approved, Pending).is_ok());
        assert!(ensure_transition(Approved, Rejected).is_err());
    }
}
