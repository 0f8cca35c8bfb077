#![allow(deprecated)] // events().publish migration tracked separately

use common::AdminRole;
use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the ledger is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub token: Address,
    pub timestamp: u64,
}

/// Fired when an admin configures a tier's reward rate.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardRateSetEvent {
    pub admin: Address,
    pub lockup: u64,
    pub reward_rate: i128,
    pub timestamp: u64,
}

/// Fired when a position is opened or topped up.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub lockup: u64,
    pub amount: i128,
    pub principal: i128,
    pub start_time: u64,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when a matured position is withdrawn with its reward.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub staker: Address,
    pub lockup: u64,
    pub principal: i128,
    pub reward: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired on an early exit. `forfeited_reward` is what an unstake at the same
/// moment would have paid on top of the principal.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AbortedEvent {
    pub staker: Address,
    pub lockup: u64,
    pub principal: i128,
    pub forfeited_reward: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when tokens are added to the reward reserve.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReserveFundedEvent {
    pub funder: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleGrantedEvent {
    pub granted_by: Address,
    pub target: Address,
    pub role: AdminRole,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleRevokedEvent {
    pub revoked_by: Address,
    pub target: Address,
    pub timestamp: u64,
}

/// Fired when an admin transfer is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferProposedEvent {
    pub current_admin: Address,
    pub proposed_admin: Address,
    pub timestamp: u64,
}

/// Fired when an admin transfer is accepted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferAcceptedEvent {
    pub old_admin: Address,
    pub new_admin: Address,
    pub timestamp: u64,
}

/// Fired when a pending admin transfer is cancelled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferCancelledEvent {
    pub admin: Address,
    pub cancelled_proposed: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address, token: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            token,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_rate_set(env: &Env, admin: Address, lockup: u64, reward_rate: i128) {
    env.events().publish(
        (symbol_short!("RATE_SET"), lockup),
        RewardRateSetEvent {
            admin,
            lockup,
            reward_rate,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(
    env: &Env,
    staker: Address,
    lockup: u64,
    amount: i128,
    principal: i128,
    start_time: u64,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        StakedEvent {
            staker,
            lockup,
            amount,
            principal,
            start_time,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstaked(
    env: &Env,
    staker: Address,
    lockup: u64,
    principal: i128,
    reward: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), staker.clone()),
        UnstakedEvent {
            staker,
            lockup,
            principal,
            reward,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_aborted(
    env: &Env,
    staker: Address,
    lockup: u64,
    principal: i128,
    forfeited_reward: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("ABORTED"), staker.clone()),
        AbortedEvent {
            staker,
            lockup,
            principal,
            forfeited_reward,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reserve_funded(env: &Env, funder: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("FUNDED"), funder.clone()),
        ReserveFundedEvent {
            funder,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_role_granted(env: &Env, granted_by: Address, target: Address, role: AdminRole) {
    env.events().publish(
        (symbol_short!("ROLE_SET"), target.clone()),
        RoleGrantedEvent {
            granted_by,
            target,
            role,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_role_revoked(env: &Env, revoked_by: Address, target: Address) {
    env.events().publish(
        (symbol_short!("ROLE_DEL"), target.clone()),
        RoleRevokedEvent {
            revoked_by,
            target,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_proposed(env: &Env, current_admin: Address, proposed_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_PROP"), current_admin.clone()),
        AdminTransferProposedEvent {
            current_admin,
            proposed_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_accepted(env: &Env, old_admin: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_ACPT"), new_admin.clone()),
        AdminTransferAcceptedEvent {
            old_admin,
            new_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_cancelled(env: &Env, admin: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("ADM_CNCL"), admin.clone()),
        AdminTransferCancelledEvent {
            admin,
            cancelled_proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
}
