//! Property tests for the fixed-decrement poll budget

use livyctl_core::PollBudget;
use proptest::prelude::*;
use std::time::Duration;

proptest! {
    /// Property: A budget of T with interval i allows ceil(T / i) sleeps
    #[test]
    fn sleeps_are_ceiling_of_budget_over_interval(
        total_ms in 0u64..20_000,
        interval_ms in 1u64..5_000,
    ) {
        let total = Duration::from_millis(total_ms);
        let interval = Duration::from_millis(interval_ms);
        let mut budget = PollBudget::new(total, interval);
        while !budget.is_exhausted() {
            prop_assert_eq!(budget.consume(), interval);
        }

        prop_assert_eq!(u64::from(budget.sleeps()), total_ms.div_ceil(interval_ms));
        prop_assert_eq!(budget.sleeps(), PollBudget::max_sleeps(total, interval));
    }

    /// Property: An exact multiple k of the interval gives exactly k sleeps
    #[test]
    fn exact_multiples_give_k_sleeps(k in 0u32..50, interval_ms in 1u64..2_000) {
        let interval = Duration::from_millis(interval_ms);
        prop_assert_eq!(PollBudget::max_sleeps(interval * k, interval), k);
    }

    /// Property: Remaining budget never increases
    #[test]
    fn remaining_is_monotonic(total_ms in 0u64..10_000, interval_ms in 1u64..1_000) {
        let mut budget = PollBudget::new(
            Duration::from_millis(total_ms),
            Duration::from_millis(interval_ms),
        );
        let mut previous = budget.remaining();
        while !budget.is_exhausted() {
            budget.consume();
            prop_assert!(budget.remaining() < previous);
            previous = budget.remaining();
        }
    }
}
