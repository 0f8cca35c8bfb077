#![no_std]

pub mod events;
pub mod position;
pub mod registry;
pub mod rewards;

use common::roles::{self, AdminRole};
use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, Env, Symbol, Vec};

pub use position::{Position, TierPosition};
pub use registry::Tier;
pub use rewards::{RATE_SCALE, SECONDS_PER_DAY, SECONDS_PER_YEAR};

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");
const INITIALIZED: Symbol = symbol_short!("INIT");
const STAKE_TOKEN: Symbol = symbol_short!("STK_TOK");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");

const INSTANCE_TTL_THRESHOLD: u32 = 5184000;
const INSTANCE_TTL_EXTEND_TO: u32 = 10368000;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    TierNotConfigured = 5,
    ZeroAmount = 6,
    NoPosition = 7,
    LockupNotElapsed = 8,
    InsufficientReserve = 9,
    ArithmeticOverflow = 10,
}

// ── Contract ─────────────────────────────────────────────────────────────────

/// Tiered lockup staking ledger.
///
/// Every deployed instance is an independent ledger over a single token.
/// Tiers are keyed by their lockup duration in **seconds**; callers working
/// in days multiply by [`SECONDS_PER_DAY`] before calling in.
#[contract]
pub struct TieredStakingContract;

#[contractimpl]
impl TieredStakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the ledger.
    ///
    /// * `admin` – receives the `SuperAdmin` role.
    /// * `token` – SAC (or any token-interface contract) users stake and are
    ///   rewarded in.
    pub fn initialize(env: Env, admin: Address, token: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&STAKE_TOKEN, &token);
        env.storage().instance().set(&TOTAL_STAKED, &0i128);
        env.storage().instance().set(&INITIALIZED, &true);
        Self::extend_instance_ttl(&env);

        roles::set_role(&env, &admin, AdminRole::SuperAdmin);

        events::publish_initialized(&env, admin, token);

        Ok(())
    }

    // ── Tier registry ───────────────────────────────────────────────────────

    /// Set the annual reward rate of the tier keyed by `lockup` seconds.
    ///
    /// `rate` carries six implied decimals (`100_000` = 10 %). Setting 0
    /// disables new stakes into the tier; open positions are unaffected
    /// except that their reward is computed with the new rate.
    ///
    /// Requires at least `RateAdmin`.
    pub fn set_reward_rate(
        env: Env,
        caller: Address,
        lockup: u64,
        rate: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, &caller, &AdminRole::RateAdmin)?;

        if rate < 0 {
            return Err(ContractError::InvalidInput);
        }

        registry::set_rate(&env, lockup, rate);
        Self::extend_instance_ttl(&env);

        events::publish_reward_rate_set(&env, caller, lockup, rate);

        Ok(())
    }

    /// Reward rate of a tier; 0 when unconfigured.
    pub fn get_reward_rate(env: Env, lockup: u64) -> i128 {
        registry::get_rate(&env, lockup)
    }

    /// Every tier ever configured with its current rate.
    pub fn get_tiers(env: Env) -> Vec<Tier> {
        registry::list(&env)
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Lock `amount` tokens in the tier keyed by `lockup`.
    ///
    /// Tokens are pulled from `staker`, whose authorization covers the
    /// transfer. Staking into a tier where `staker` already has an open
    /// position merges the amounts and restarts the lockup from now.
    pub fn stake(env: Env, staker: Address, lockup: u64, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if amount == 0 {
            return Err(ContractError::ZeroAmount);
        }
        if amount < 0 {
            return Err(ContractError::InvalidInput);
        }
        if !registry::is_configured(&env, lockup) {
            return Err(ContractError::TierNotConfigured);
        }

        let now = env.ledger().timestamp();

        let updated = match position::load(&env, &staker, lockup) {
            Some(existing) => existing
                .top_up(amount, now)
                .ok_or(ContractError::ArithmeticOverflow)?,
            None => Position::open(amount, now),
        };
        let new_total = Self::total_staked(&env)
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;

        // Pull tokens into custody; a failed transfer reverts the whole call.
        let token_client = token::Client::new(&env, &Self::load_token(&env)?);
        token_client.transfer(&staker, &env.current_contract_address(), &amount);

        position::store(&env, &staker, lockup, &updated);
        env.storage().instance().set(&TOTAL_STAKED, &new_total);
        Self::extend_instance_ttl(&env);

        events::publish_staked(
            &env,
            staker,
            lockup,
            amount,
            updated.principal,
            updated.start_time,
            new_total,
        );

        Ok(())
    }

    /// Withdraw a matured position: principal plus the reward accrued over
    /// the full lockup. Returns the amount paid out.
    ///
    /// The reward is drawn from the reserve (token balance beyond
    /// `total_staked`); if the reserve cannot cover it nothing happens and
    /// `InsufficientReserve` is returned.
    pub fn unstake(env: Env, staker: Address, lockup: u64) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let held = position::load(&env, &staker, lockup).ok_or(ContractError::NoPosition)?;
        let now = env.ledger().timestamp();
        if !held.is_matured(lockup, now) {
            return Err(ContractError::LockupNotElapsed);
        }

        let reward = held.reward(registry::get_rate(&env, lockup), lockup, now);

        let token_client = token::Client::new(&env, &Self::load_token(&env)?);
        let total = Self::total_staked(&env);
        let reserve = token_client
            .balance(&env.current_contract_address())
            .saturating_sub(total);
        if reward > reserve {
            return Err(ContractError::InsufficientReserve);
        }
        let payout = held
            .principal
            .checked_add(reward)
            .ok_or(ContractError::ArithmeticOverflow)?;

        // Close the position before paying out (checks-effects-interactions).
        let new_total = Self::close_position(&env, &staker, lockup, held.principal, total)?;

        token_client.transfer(&env.current_contract_address(), &staker, &payout);

        events::publish_unstaked(&env, staker, lockup, held.principal, reward, new_total);

        Ok(payout)
    }

    /// Exit a position at any time, forfeiting all reward. Returns the
    /// principal paid back.
    pub fn abort(env: Env, staker: Address, lockup: u64) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let held = position::load(&env, &staker, lockup).ok_or(ContractError::NoPosition)?;
        let now = env.ledger().timestamp();
        let forfeited = held.reward(registry::get_rate(&env, lockup), lockup, now);

        let token = Self::load_token(&env)?;
        let total = Self::total_staked(&env);
        let new_total = Self::close_position(&env, &staker, lockup, held.principal, total)?;

        token::Client::new(&env, &token).transfer(
            &env.current_contract_address(),
            &staker,
            &held.principal,
        );

        events::publish_aborted(&env, staker, lockup, held.principal, forfeited, new_total);

        Ok(held.principal)
    }

    /// Top up the reward reserve from `funder`'s balance.
    pub fn fund_reserve(env: Env, funder: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        funder.require_auth();

        if amount == 0 {
            return Err(ContractError::ZeroAmount);
        }
        if amount < 0 {
            return Err(ContractError::InvalidInput);
        }

        token::Client::new(&env, &Self::load_token(&env)?).transfer(
            &funder,
            &env.current_contract_address(),
            &amount,
        );
        Self::extend_instance_ttl(&env);

        events::publish_reserve_funded(&env, funder, amount);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Reward accrued so far by `(owner, lockup)`, capped at the full lockup.
    /// 0 when there is no open position.
    pub fn get_reward(env: Env, owner: Address, lockup: u64) -> i128 {
        match position::load(&env, &owner, lockup) {
            Some(held) => held.reward(
                registry::get_rate(&env, lockup),
                lockup,
                env.ledger().timestamp(),
            ),
            None => 0,
        }
    }

    /// Principal staked by `owner` across all tiers.
    pub fn get_balance(env: Env, owner: Address) -> i128 {
        position::list(&env, &owner)
            .iter()
            .fold(0i128, |acc, tp| acc.saturating_add(tp.position.principal))
    }

    /// Principal of a single position, 0 if none is open.
    pub fn get_tier_balance(env: Env, owner: Address, lockup: u64) -> i128 {
        position::load(&env, &owner, lockup)
            .map(|held| held.principal)
            .unwrap_or(0)
    }

    /// Seconds until `(owner, lockup)` may be unstaked; 0 if matured or absent.
    pub fn get_left_lockup_time(env: Env, owner: Address, lockup: u64) -> u64 {
        position::load(&env, &owner, lockup)
            .map(|held| held.left_lockup_time(lockup, env.ledger().timestamp()))
            .unwrap_or(0)
    }

    pub fn get_position(env: Env, owner: Address, lockup: u64) -> Option<Position> {
        position::load(&env, &owner, lockup)
    }

    /// All of `owner`'s open positions.
    pub fn get_positions(env: Env, owner: Address) -> Vec<TierPosition> {
        position::list(&env, &owner)
    }

    /// Return the sum of all open principals.
    pub fn get_total_staked(env: Env) -> i128 {
        Self::total_staked(&env)
    }

    /// Token balance available for reward payouts.
    pub fn get_available_reserve(env: Env) -> i128 {
        let Some(token) = env.storage().instance().get::<_, Address>(&STAKE_TOKEN) else {
            return 0;
        };
        token::Client::new(&env, &token)
            .balance(&env.current_contract_address())
            .saturating_sub(Self::total_staked(&env))
            .max(0)
    }

    pub fn get_token(env: Env) -> Result<Address, ContractError> {
        Self::load_token(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    // ── Admin transfer (two-step) ──────────────────────────────────────────

    /// Propose a new admin address. Only the current admin can call this.
    /// The new admin must call `accept_admin` to complete the transfer.
    pub fn propose_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        env.storage().instance().set(&PENDING_ADMIN, &new_admin);

        events::publish_admin_transfer_proposed(&env, current_admin, new_admin);

        Ok(())
    }

    /// Accept the pending admin transfer. The `SuperAdmin` role moves from
    /// the old admin to `new_admin`.
    pub fn accept_admin(env: Env, new_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_admin.require_auth();

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::InvalidInput)?;

        if new_admin != pending {
            return Err(ContractError::Unauthorized);
        }

        let old_admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;

        env.storage().instance().set(&ADMIN, &new_admin);
        env.storage().instance().remove(&PENDING_ADMIN);
        roles::remove_role(&env, &old_admin);
        roles::set_role(&env, &new_admin, AdminRole::SuperAdmin);

        events::publish_admin_transfer_accepted(&env, old_admin, new_admin);

        Ok(())
    }

    /// Cancel a pending admin transfer. Only the current admin can call this.
    pub fn cancel_admin_transfer(env: Env, current_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::InvalidInput)?;

        env.storage().instance().remove(&PENDING_ADMIN);

        events::publish_admin_transfer_cancelled(&env, current_admin, pending);

        Ok(())
    }

    pub fn get_pending_admin(env: Env) -> Option<Address> {
        env.storage().instance().get(&PENDING_ADMIN)
    }

    // ── Role management ──────────────────────────────────────────────────────

    /// Grant `role` to `target`. Only a `SuperAdmin` may call this.
    pub fn grant_role(
        env: Env,
        caller: Address,
        target: Address,
        role: AdminRole,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !roles::grant_role(&env, &caller, &target, role.clone()) {
            return Err(ContractError::Unauthorized);
        }
        events::publish_role_granted(&env, caller, target, role);
        Ok(())
    }

    /// Revoke any role held by `target`. Only a `SuperAdmin` may call this.
    pub fn revoke_role(env: Env, caller: Address, target: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !roles::revoke_role(&env, &caller, &target) {
            return Err(ContractError::Unauthorized);
        }
        events::publish_role_revoked(&env, caller, target);
        Ok(())
    }

    pub fn get_role(env: Env, admin: Address) -> Option<AdminRole> {
        roles::get_role(&env, &admin)
    }

    pub fn get_admins(env: Env) -> Vec<Address> {
        roles::list_admins(&env)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: revert if `caller` is not the stored admin.
    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;
        if *caller != admin {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Guard: revert if `caller` does not hold at least `min_role`.
    fn require_role(env: &Env, caller: &Address, min_role: &AdminRole) -> Result<(), ContractError> {
        if roles::has_role(env, caller, min_role) {
            return Ok(());
        }
        Err(ContractError::Unauthorized)
    }

    fn load_token(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&STAKE_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    fn total_staked(env: &Env) -> i128 {
        env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
    }

    /// Remove `(owner, lockup)` and subtract its principal from the total.
    /// Returns the new total.
    fn close_position(
        env: &Env,
        owner: &Address,
        lockup: u64,
        principal: i128,
        total: i128,
    ) -> Result<i128, ContractError> {
        let new_total = total
            .checked_sub(principal)
            .ok_or(ContractError::ArithmeticOverflow)?;
        position::remove(env, owner, lockup);
        env.storage().instance().set(&TOTAL_STAKED, &new_total);
        Self::extend_instance_ttl(env);
        Ok(new_total)
    }

    fn extend_instance_ttl(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND_TO);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_admin;
