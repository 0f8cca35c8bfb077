use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{Address, Env};
use tiered_staking::{TieredStakingContract, TieredStakingContractClient, SECONDS_PER_DAY};

pub const START: u64 = 1_700_000_000;

/// `(lockup seconds, reward rate)` for every tier the harness configures.
pub const TIERS: [(u64, i128); 3] = [
    (7 * SECONDS_PER_DAY, 50_000),
    (30 * SECONDS_PER_DAY, 100_000),
    (90 * SECONDS_PER_DAY, 250_000),
];

pub struct TestContext {
    pub env: Env,
    pub client: TieredStakingContractClient<'static>,
    pub admin: Address,
    pub token: Address,
    pub contract_id: Address,
}

/// Deploys an initialized ledger with [`TIERS`] configured and `reserve`
/// tokens already held by the contract.
pub fn setup(reserve: i128) -> TestContext {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(START);

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(TieredStakingContract, ());
    let client = TieredStakingContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin, &token);
    for (lockup, rate) in TIERS {
        client.set_reward_rate(&admin, &lockup, &rate);
    }
    if reserve > 0 {
        StellarAssetClient::new(&env, &token).mint(&contract_id, &reserve);
    }

    TestContext {
        env,
        client,
        admin,
        token,
        contract_id,
    }
}

/// Creates a user holding `amount` tokens.
pub fn funded_user(ctx: &TestContext, amount: i128) -> Address {
    let user = Address::generate(&ctx.env);
    StellarAssetClient::new(&ctx.env, &ctx.token).mint(&user, &amount);
    user
}

pub fn token_balance(ctx: &TestContext, who: &Address) -> i128 {
    TokenClient::new(&ctx.env, &ctx.token).balance(who)
}

pub fn advance(ctx: &TestContext, seconds: u64) {
    let now = ctx.env.ledger().timestamp();
    ctx.env.ledger().set_timestamp(now + seconds);
}

/// Reference reward formula evaluated directly; only valid for inputs whose
/// product fits in `i128`.
pub fn expected_reward(principal: i128, rate: i128, elapsed: u64) -> i128 {
    principal * rate * elapsed as i128 / (1_000_000 * 31_536_000)
}
