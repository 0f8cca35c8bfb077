use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

// ── Storage Keys ─────────────────────────────────────────────────────────────

const ROLE_PREFIX: Symbol = symbol_short!("ADM_ROLE");
const ROLE_LIST: Symbol = symbol_short!("ADM_LIST");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Admin Role Enum ──────────────────────────────────────────────────────────

/// Two-level admin hierarchy for ledger configuration.
///
/// - `RateAdmin`  – May configure tier reward rates.
/// - `SuperAdmin` – May do everything a `RateAdmin` can, and additionally
///                  grant or revoke roles.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AdminRole {
    RateAdmin = 1,
    SuperAdmin = 2,
}

impl AdminRole {
    pub fn rank(&self) -> u32 {
        match self {
            AdminRole::RateAdmin => 1,
            AdminRole::SuperAdmin => 2,
        }
    }

    /// Returns true if this role is at least as privileged as `min_role`.
    pub fn has_at_least(&self, min_role: &AdminRole) -> bool {
        self.rank() >= min_role.rank()
    }
}

// ── Storage Helpers ──────────────────────────────────────────────────────────

fn role_key(admin: &Address) -> (Symbol, Address) {
    (ROLE_PREFIX, admin.clone())
}

fn extend_ttl(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Assigns `role` to `admin`, replacing any previous role.
/// Callers must verify authorization beforehand.
pub fn set_role(env: &Env, admin: &Address, role: AdminRole) {
    let key = role_key(admin);
    env.storage().persistent().set(&key, &role);
    extend_ttl(env, &key);
    track_admin(env, admin);
}

pub fn get_role(env: &Env, admin: &Address) -> Option<AdminRole> {
    let key = role_key(admin);
    let role: Option<AdminRole> = env.storage().persistent().get(&key);
    if role.is_some() {
        extend_ttl(env, &key);
    }
    role
}

pub fn remove_role(env: &Env, admin: &Address) {
    env.storage().persistent().remove(&role_key(admin));
    untrack_admin(env, admin);
}

/// Authorization predicate: does `caller` hold at least `min_role`?
pub fn has_role(env: &Env, caller: &Address, min_role: &AdminRole) -> bool {
    match get_role(env, caller) {
        Some(role) => role.has_at_least(min_role),
        None => false,
    }
}

// ── Grant / Revoke ───────────────────────────────────────────────────────────

/// Grants `role` to `target`. Only a `SuperAdmin` may do this; the caller
/// must already have been authenticated via `require_auth()`.
///
/// Returns `false` if the caller is not a SuperAdmin.
pub fn grant_role(env: &Env, caller: &Address, target: &Address, role: AdminRole) -> bool {
    if !has_role(env, caller, &AdminRole::SuperAdmin) {
        return false;
    }
    set_role(env, target, role);
    true
}

/// Revokes whatever role `target` holds. Only a `SuperAdmin` may do this.
pub fn revoke_role(env: &Env, caller: &Address, target: &Address) -> bool {
    if !has_role(env, caller, &AdminRole::SuperAdmin) {
        return false;
    }
    remove_role(env, target);
    true
}

// ── Admin list ───────────────────────────────────────────────────────────────

/// Every address currently holding a role, in grant order.
pub fn list_admins(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&ROLE_LIST)
        .unwrap_or(Vec::new(env))
}

fn track_admin(env: &Env, admin: &Address) {
    let mut admins = list_admins(env);
    if !admins.iter().any(|a| a == *admin) {
        admins.push_back(admin.clone());
        env.storage().persistent().set(&ROLE_LIST, &admins);
    }
}

fn untrack_admin(env: &Env, admin: &Address) {
    let admins = list_admins(env);
    let mut kept = Vec::new(env);
    for a in admins.iter() {
        if a != *admin {
            kept.push_back(a);
        }
    }
    env.storage().persistent().set(&ROLE_LIST, &kept);
}
