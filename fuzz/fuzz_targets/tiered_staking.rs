#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, Env,
};
use tiered_staking::{TieredStakingContract, TieredStakingContractClient, SECONDS_PER_DAY};

const LOCKUPS: [u64; 3] = [7 * SECONDS_PER_DAY, 30 * SECONDS_PER_DAY, 365 * SECONDS_PER_DAY];

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { user: u8, tier: u8, amount: i64 },
    Unstake { user: u8, tier: u8 },
    Abort { user: u8, tier: u8 },
    SetRate { tier: u8, rate: u32 },
    Advance { seconds: u32 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(TieredStakingContract, ());
    let client = TieredStakingContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin, &token);
    for lockup in LOCKUPS {
        client.set_reward_rate(&admin, &lockup, &100_000);
    }

    let sac = StellarAssetClient::new(&env, &token);
    sac.mint(&contract_id, &1_000_000_000_000_000);

    let mut users = vec![];
    for _ in 0..4 {
        let user = Address::generate(&env);
        sac.mint(&user, &(i64::MAX as i128));
        users.push(user);
    }

    // Failing calls are expected; the target looks for panics and for the
    // total-staked invariant breaking.
    for action in actions {
        match action {
            FuzzAction::Stake { user, tier, amount } => {
                let user = &users[user as usize % users.len()];
                let lockup = LOCKUPS[tier as usize % LOCKUPS.len()];
                let _ = client.try_stake(user, &lockup, &(amount as i128));
            }
            FuzzAction::Unstake { user, tier } => {
                let user = &users[user as usize % users.len()];
                let lockup = LOCKUPS[tier as usize % LOCKUPS.len()];
                let _ = client.try_unstake(user, &lockup);
            }
            FuzzAction::Abort { user, tier } => {
                let user = &users[user as usize % users.len()];
                let lockup = LOCKUPS[tier as usize % LOCKUPS.len()];
                let _ = client.try_abort(user, &lockup);
            }
            FuzzAction::SetRate { tier, rate } => {
                let lockup = LOCKUPS[tier as usize % LOCKUPS.len()];
                let _ = client.try_set_reward_rate(&admin, &lockup, &(rate as i128));
            }
            FuzzAction::Advance { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now.saturating_add(seconds as u64));
            }
        }

        let sum: i128 = users.iter().map(|u| client.get_balance(u)).sum();
        assert_eq!(client.get_total_staked(), sum);
    }
});
