extern crate std;

use common::AdminRole;
use soroban_sdk::{testutils::Address as _, Address, Env};

use crate::{ContractError, TieredStakingContract, TieredStakingContractClient, SECONDS_PER_DAY};

const THIRTY_DAYS: u64 = 30 * SECONDS_PER_DAY;

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (Env, TieredStakingContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(TieredStakingContract, ());
    let client = TieredStakingContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin, &token);

    (env, client, admin)
}

// ── SuperAdmin bootstrapped on initialize ────────────────────────────────────

#[test]
fn test_admin_is_super_admin_after_init() {
    let (_env, client, admin) = setup();
    assert_eq!(client.get_role(&admin), Some(AdminRole::SuperAdmin));
    assert_eq!(client.get_admins().len(), 1);
}

// ── Role management ──────────────────────────────────────────────────────────

#[test]
fn test_rate_admin_can_set_rates() {
    let (env, client, admin) = setup();
    let rate_admin = Address::generate(&env);

    client.grant_role(&admin, &rate_admin, &AdminRole::RateAdmin);
    assert_eq!(client.get_role(&rate_admin), Some(AdminRole::RateAdmin));

    client.set_reward_rate(&rate_admin, &THIRTY_DAYS, &100_000);
    assert_eq!(client.get_reward_rate(&THIRTY_DAYS), 100_000);
}

#[test]
fn test_rate_admin_cannot_grant_roles() {
    let (env, client, admin) = setup();
    let rate_admin = Address::generate(&env);
    let target = Address::generate(&env);

    client.grant_role(&admin, &rate_admin, &AdminRole::RateAdmin);

    match client.try_grant_role(&rate_admin, &target, &AdminRole::RateAdmin) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    match client.try_revoke_role(&rate_admin, &admin) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert_eq!(client.get_role(&target), None);
}

#[test]
fn test_revoked_admin_loses_rate_access() {
    let (env, client, admin) = setup();
    let rate_admin = Address::generate(&env);

    client.grant_role(&admin, &rate_admin, &AdminRole::RateAdmin);
    assert_eq!(client.get_admins().len(), 2);

    client.revoke_role(&admin, &rate_admin);
    assert_eq!(client.get_role(&rate_admin), None);
    assert_eq!(client.get_admins().len(), 1);

    match client.try_set_reward_rate(&rate_admin, &THIRTY_DAYS, &100_000) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_second_super_admin_can_manage_roles() {
    let (env, client, admin) = setup();
    let second = Address::generate(&env);
    let target = Address::generate(&env);

    client.grant_role(&admin, &second, &AdminRole::SuperAdmin);
    client.grant_role(&second, &target, &AdminRole::RateAdmin);
    assert_eq!(client.get_role(&target), Some(AdminRole::RateAdmin));
}

#[test]
fn test_stranger_cannot_grant() {
    let (env, client, _admin) = setup();
    let stranger = Address::generate(&env);

    match client.try_grant_role(&stranger, &stranger, &AdminRole::SuperAdmin) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

// ── Admin transfer ───────────────────────────────────────────────────────────

#[test]
fn test_two_step_admin_transfer() {
    let (env, client, admin) = setup();
    let new_admin = Address::generate(&env);

    client.propose_admin(&admin, &new_admin);
    assert_eq!(client.get_pending_admin(), Some(new_admin.clone()));
    // Nothing changes until the proposal is accepted.
    assert_eq!(client.get_admin(), admin);

    client.accept_admin(&new_admin);
    assert_eq!(client.get_admin(), new_admin);
    assert_eq!(client.get_pending_admin(), None);
    assert_eq!(client.get_role(&new_admin), Some(AdminRole::SuperAdmin));
    assert_eq!(client.get_role(&admin), None);

    match client.try_set_reward_rate(&admin, &THIRTY_DAYS, &1) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    client.set_reward_rate(&new_admin, &THIRTY_DAYS, &1);
}

#[test]
fn test_accept_by_wrong_address_fails() {
    let (env, client, admin) = setup();
    let new_admin = Address::generate(&env);
    let impostor = Address::generate(&env);

    client.propose_admin(&admin, &new_admin);
    match client.try_accept_admin(&impostor) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_accept_without_proposal_fails() {
    let (env, client, _admin) = setup();
    let someone = Address::generate(&env);

    match client.try_accept_admin(&someone) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
}

#[test]
fn test_cancel_admin_transfer() {
    let (env, client, admin) = setup();
    let new_admin = Address::generate(&env);

    client.propose_admin(&admin, &new_admin);
    client.cancel_admin_transfer(&admin);
    assert_eq!(client.get_pending_admin(), None);

    match client.try_accept_admin(&new_admin) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
}

#[test]
fn test_only_admin_can_propose() {
    let (env, client, _admin) = setup();
    let stranger = Address::generate(&env);

    match client.try_propose_admin(&stranger, &stranger) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}
