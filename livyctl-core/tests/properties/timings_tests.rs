//! Property tests for session timing validation

use livyctl_core::SessionTimings;
use proptest::prelude::*;
use std::time::Duration;

proptest! {
    /// Property: Non-negative seconds with a positive state interval are accepted
    #[test]
    fn valid_seconds_are_accepted(
        state in 0.001f64..60.0,
        statement in 0.0f64..60.0,
        timeout in 0.0f64..3_600.0,
    ) {
        let timings = SessionTimings::from_secs(state, statement, timeout).unwrap();
        prop_assert_eq!(timings.state_poll_interval, Duration::from_secs_f64(state));
        prop_assert_eq!(timings.statement_poll_interval, Duration::from_secs_f64(statement));
        prop_assert_eq!(timings.sql_context_timeout, Duration::from_secs_f64(timeout));
    }

    /// Property: Any negative value is rejected
    #[test]
    fn negative_seconds_are_rejected(value in -1_000.0f64..-0.001, slot in 0usize..3) {
        let mut args = [1.0, 1.0, 1.0];
        args[slot] = value;
        prop_assert!(SessionTimings::from_secs(args[0], args[1], args[2]).is_err());
    }
}

#[test]
fn zero_state_interval_is_rejected() {
    assert!(SessionTimings::from_secs(0.0, 1.0, 1.0).is_err());
    assert!(SessionTimings::from_secs(1.0, 0.0, 0.0).is_ok());
}

#[test]
fn non_finite_values_are_rejected() {
    assert!(SessionTimings::from_secs(f64::NAN, 1.0, 1.0).is_err());
    assert!(SessionTimings::from_secs(1.0, f64::INFINITY, 1.0).is_err());
}
