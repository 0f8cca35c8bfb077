//! Property-based tests for the reward arithmetic.
//!
//! Invariants tested:
//! - Reward is non-decreasing in elapsed time and constant past the lockup
//! - The overflow-safe evaluation agrees with the direct formula
//! - Reward never exceeds `principal × rate / RATE_SCALE` over one year

use proptest::prelude::*;
use tiered_staking::position::Position;
use tiered_staking::rewards::{compute_reward, RATE_SCALE, SECONDS_PER_YEAR};

use crate::harness::expected_reward;

proptest! {
    #[test]
    fn prop_reward_monotonic_then_capped(
        principal in 1i128..=1_000_000_000_000_000_000_000_000i128,
        rate in 0i128..=2_000_000i128,
        lockup in 0u64..=2 * 31_536_000u64,
        t1 in 0u64..=4 * 31_536_000u64,
        t2 in 0u64..=4 * 31_536_000u64,
    ) {
        let position = Position::open(principal, 0);
        let (early, late) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };

        let r_early = position.reward(rate, lockup, early);
        let r_late = position.reward(rate, lockup, late);
        prop_assert!(r_early <= r_late);

        if early >= lockup {
            prop_assert_eq!(r_early, r_late);
            prop_assert_eq!(r_early, position.reward(rate, lockup, lockup));
        }
    }

    #[test]
    fn prop_split_form_matches_direct(
        principal in 0i128..=1_000_000_000_000_000_000_000_000i128,
        rate in 0i128..=1_000_000i128,
        elapsed in 0u64..=31_536_000u64,
    ) {
        // 10^24 × 10^6 × 3.2·10^7 < i128::MAX, so the direct form is exact here.
        prop_assert_eq!(
            compute_reward(principal, rate, elapsed),
            expected_reward(principal, rate, elapsed)
        );
    }

    #[test]
    fn prop_reward_bounded_by_annual_yield(
        principal in 1i128..=1_000_000_000_000_000_000_000_000_000_000i128,
        rate in 0i128..=10_000_000i128,
        elapsed in 0u64..=SECONDS_PER_YEAR,
    ) {
        let reward = compute_reward(principal, rate, elapsed);
        prop_assert!(reward >= 0);
        prop_assert!(reward <= principal / RATE_SCALE * rate + rate);
    }
}
