/// Fixed-point scale of a tier's reward rate.
///
/// A rate of `100_000` means 0.1, i.e. 10 % annualized yield.
pub const RATE_SCALE: i128 = 1_000_000;

pub const SECONDS_PER_DAY: u64 = 86_400;
pub const SECONDS_PER_YEAR: u64 = 365 * SECONDS_PER_DAY;

/// `RATE_SCALE × SECONDS_PER_YEAR`, the divisor of the reward formula.
const REWARD_DIVISOR: i128 = RATE_SCALE * SECONDS_PER_YEAR as i128;

// ── Lockup clock ────────────────────────────────────────────────────────────

/// Seconds of accrual credited to a position: time since `start_time`,
/// capped at the tier's lockup so reward stops growing at maturity.
pub fn accrual_seconds(start_time: u64, now: u64, lockup: u64) -> u64 {
    now.saturating_sub(start_time).min(lockup)
}

/// Seconds until the position matures, 0 once it has.
pub fn remaining_lockup(start_time: u64, now: u64, lockup: u64) -> u64 {
    lockup.saturating_sub(now.saturating_sub(start_time))
}

pub fn is_matured(start_time: u64, now: u64, lockup: u64) -> bool {
    now.saturating_sub(start_time) >= lockup
}

// ── Reward engine ───────────────────────────────────────────────────────────

/// Linear, non-compounding reward for `principal` held `elapsed` seconds at
/// an annual `rate` (scaled by [`RATE_SCALE`]):
///
/// ```text
/// reward = principal × rate × elapsed / (RATE_SCALE × SECONDS_PER_YEAR)
/// ```
///
/// The division floors and happens once. To keep the full product in range
/// the principal is split as `q × D + r` around the divisor `D`, so that
///
/// ```text
/// principal × k / D = q × k + r × k / D      (k = rate × elapsed)
/// ```
///
/// holds exactly with no intermediate rounding. A product that still does not
/// fit in `i128` saturates at `i128::MAX`; no reserve can cover that, so an
/// unstake of such a position is rejected rather than underpaid.
///
/// Non-positive principal or rate yields 0.
#[allow(clippy::arithmetic_side_effects)]
pub fn compute_reward(principal: i128, rate: i128, elapsed: u64) -> i128 {
    if principal <= 0 || rate <= 0 || elapsed == 0 {
        return 0;
    }

    let Some(factor) = rate.checked_mul(elapsed as i128) else {
        return i128::MAX;
    };

    let whole = principal / REWARD_DIVISOR;
    let rem = principal % REWARD_DIVISOR;

    let high = whole.checked_mul(factor);
    let low = rem.checked_mul(factor).map(|v| v / REWARD_DIVISOR);

    match (high, low) {
        (Some(h), Some(l)) => h.saturating_add(l),
        _ => i128::MAX,
    }
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// Pure-math tests with no Soroban environment dependency.
