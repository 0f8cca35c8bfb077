use soroban_sdk::{contracttype, symbol_short, Env, Symbol, Vec};

// ── Storage key constants ───────────────────────────────────────────────────

/// Tuple key `(TIER_RATE, lockup)` → reward rate.
const TIER_RATE: Symbol = symbol_short!("TIER_RATE");
/// Every lockup that has ever been configured, in first-seen order.
const TIERS: Symbol = symbol_short!("TIERS");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Types ───────────────────────────────────────────────────────────────────

/// A lockup tier and its current annual reward rate.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tier {
    /// Lockup duration in seconds; doubles as the tier key.
    pub lockup: u64,
    /// Annual yield scaled by `rewards::RATE_SCALE`. Zero means disabled.
    pub reward_rate: i128,
}

// ── Storage helpers ─────────────────────────────────────────────────────────

fn rate_key(lockup: u64) -> (Symbol, u64) {
    (TIER_RATE, lockup)
}

/// Overwrite the reward rate of `lockup`. Callers must check authorization
/// and reject negative rates beforehand.
pub fn set_rate(env: &Env, lockup: u64, rate: i128) {
    let key = rate_key(lockup);
    env.storage().persistent().set(&key, &rate);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

    let mut lockups = lockups(env);
    if !lockups.iter().any(|l| l == lockup) {
        lockups.push_back(lockup);
        env.storage().persistent().set(&TIERS, &lockups);
    }
    env.storage()
        .persistent()
        .extend_ttl(&TIERS, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Reward rate of `lockup`, 0 when the tier was never configured.
pub fn get_rate(env: &Env, lockup: u64) -> i128 {
    let key = rate_key(lockup);
    match env.storage().persistent().get::<_, i128>(&key) {
        Some(rate) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
            rate
        }
        None => 0,
    }
}

pub fn is_configured(env: &Env, lockup: u64) -> bool {
    get_rate(env, lockup) > 0
}

fn lockups(env: &Env) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&TIERS)
        .unwrap_or(Vec::new(env))
}

/// All tiers ever configured, including disabled ones.
pub fn list(env: &Env) -> Vec<Tier> {
    let mut out = Vec::new(env);
    for lockup in lockups(env).iter() {
        out.push_back(Tier {
            lockup,
            reward_rate: get_rate(env, lockup),
        });
    }
    out
}
