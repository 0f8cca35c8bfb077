use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::rewards;

// ── Storage key constants ───────────────────────────────────────────────────

const POSITION: Symbol = symbol_short!("POS");
/// Per-owner list of lockups with an open position.
const OWNER_TIERS: Symbol = symbol_short!("OWN_TIER");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Types ───────────────────────────────────────────────────────────────────

/// One owner's open stake within one lockup tier.
///
/// A position only exists in storage while `principal > 0`; closing it
/// removes the entry, so an absent key and a zero principal mean the same.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    /// Staked amount in the token's smallest unit.
    pub principal: i128,
    /// Ledger timestamp at which the current lockup began.
    pub start_time: u64,
}

/// A position together with the lockup tier it belongs to.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TierPosition {
    pub lockup: u64,
    pub position: Position,
}

impl Position {
    pub fn open(amount: i128, now: u64) -> Self {
        Position {
            principal: amount,
            start_time: now,
        }
    }

    /// Merges `amount` into the position and restarts its lockup at `now`.
    ///
    /// Returns `None` if the principal would overflow.
    pub fn top_up(&self, amount: i128, now: u64) -> Option<Self> {
        Some(Position {
            principal: self.principal.checked_add(amount)?,
            start_time: now,
        })
    }

    pub fn reward(&self, rate: i128, lockup: u64, now: u64) -> i128 {
        let elapsed = rewards::accrual_seconds(self.start_time, now, lockup);
        rewards::compute_reward(self.principal, rate, elapsed)
    }

    pub fn is_matured(&self, lockup: u64, now: u64) -> bool {
        rewards::is_matured(self.start_time, now, lockup)
    }

    pub fn left_lockup_time(&self, lockup: u64, now: u64) -> u64 {
        rewards::remaining_lockup(self.start_time, now, lockup)
    }
}

// ── Storage helpers ─────────────────────────────────────────────────────────

fn position_key(owner: &Address, lockup: u64) -> (Symbol, Address, u64) {
    (POSITION, owner.clone(), lockup)
}

fn owner_tiers_key(owner: &Address) -> (Symbol, Address) {
    (OWNER_TIERS, owner.clone())
}

/// Load the open position for `(owner, lockup)`, if any.
pub fn load(env: &Env, owner: &Address, lockup: u64) -> Option<Position> {
    let key = position_key(owner, lockup);
    let position: Position = env.storage().persistent().get(&key)?;
    if position.principal <= 0 {
        return None;
    }
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    Some(position)
}

/// Persist `position`, registering the lockup in the owner's index when the
/// position is new.
pub fn store(env: &Env, owner: &Address, lockup: u64, position: &Position) {
    let key = position_key(owner, lockup);
    env.storage().persistent().set(&key, position);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

    let mut tiers = owner_tiers(env, owner);
    if !tiers.iter().any(|t| t == lockup) {
        tiers.push_back(lockup);
        save_owner_tiers(env, owner, &tiers);
    }
}

/// Remove the position for `(owner, lockup)` and drop it from the owner's
/// index.
pub fn remove(env: &Env, owner: &Address, lockup: u64) {
    env.storage()
        .persistent()
        .remove(&position_key(owner, lockup));

    let tiers = owner_tiers(env, owner);
    let mut kept = Vec::new(env);
    for t in tiers.iter() {
        if t != lockup {
            kept.push_back(t);
        }
    }
    if kept.is_empty() {
        env.storage().persistent().remove(&owner_tiers_key(owner));
    } else {
        save_owner_tiers(env, owner, &kept);
    }
}

/// Lockups in which `owner` currently holds an open position.
pub fn owner_tiers(env: &Env, owner: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&owner_tiers_key(owner))
        .unwrap_or(Vec::new(env))
}

fn save_owner_tiers(env: &Env, owner: &Address, tiers: &Vec<u64>) {
    let key = owner_tiers_key(owner);
    env.storage().persistent().set(&key, tiers);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Every open position held by `owner`.
pub fn list(env: &Env, owner: &Address) -> Vec<TierPosition> {
    let mut out = Vec::new(env);
    for lockup in owner_tiers(env, owner).iter() {
        if let Some(position) = load(env, owner, lockup) {
            out.push_back(TierPosition { lockup, position });
        }
    }
    out
}
