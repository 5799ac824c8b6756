use cosmwasm_std::{coins, Addr, Coin, Empty, Uint128, Uint256};
use cw_multi_test::{App, BankSudo, Contract, ContractWrapper, Executor, SudoMsg};

use gear_game::error::ContractError;
use gear_game::msg::{
    BalanceResponse, BurnRequestResponse, ExecuteMsg, InstantiateMsg, PendingRequestResponse,
    QueryMsg,
};
use gear_game::state::{Gear, RequestStatus, Role};
use gear_randomness_mock::msg::{
    ExecuteMsg as MockExecuteMsg, InstantiateMsg as MockInstantiateMsg, JobResponse,
    QueryMsg as MockQueryMsg,
};

const MINT_DENOM: &str = "ustrv";
const FEE_DENOM: &str = "ulink";
const ORACLE_FEE: u128 = 100;
const RATE: u128 = 100_000;

fn game_contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        gear_game::contract::execute,
        gear_game::contract::instantiate,
        gear_game::contract::query,
    ))
}

fn mock_contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        gear_randomness_mock::contract::execute,
        gear_randomness_mock::contract::instantiate,
        gear_randomness_mock::contract::query,
    ))
}

struct TestEnv {
    app: App,
    admin: Addr,
    user: Addr,
    game: Addr,
    oracle: Addr,
}

/// Deploy the mock coordinator and the game, fund the game's oracle fee
/// balance, and bankroll the user for public mints — the same provisioning a
/// deployment script would run against a fresh chain.
fn setup() -> TestEnv {
    let mut app = App::default();
    let admin = app.api().addr_make("admin");
    let user = app.api().addr_make("user");

    for (account, amount, denom) in [
        (&admin, 1_000_000u128, FEE_DENOM),
        (&user, 1_000_000_000u128, MINT_DENOM),
    ] {
        app.sudo(SudoMsg::Bank(BankSudo::Mint {
            to_address: account.to_string(),
            amount: coins(amount, denom),
        }))
        .unwrap();
    }

    let mock_code = app.store_code(mock_contract());
    let oracle = app
        .instantiate_contract(
            mock_code,
            admin.clone(),
            &MockInstantiateMsg {},
            &[],
            "gear-randomness-mock",
            None,
        )
        .unwrap();

    let game_code = app.store_code(game_contract());
    let game = app
        .instantiate_contract(
            game_code,
            admin.clone(),
            &InstantiateMsg {
                admin: admin.to_string(),
                oracle: oracle.to_string(),
                oracle_fee: Coin::new(ORACLE_FEE, FEE_DENOM),
                mint_denom: MINT_DENOM.to_string(),
                mint_rates: vec![Uint128::new(RATE); 3],
                max_public_supply: Uint128::new(10_000),
                burn_threshold_percent: 80,
                gear_to_burn: Gear::Shield,
                gear_to_mint: Gear::Sword,
            },
            &[],
            "gear-game",
            None,
        )
        .unwrap();

    app.execute_contract(
        admin.clone(),
        game.clone(),
        &ExecuteMsg::FundOracleFees {},
        &coins(10_000, FEE_DENOM),
    )
    .unwrap();

    TestEnv {
        app,
        admin,
        user,
        game,
        oracle,
    }
}

fn gear_balance(env: &TestEnv, owner: &Addr, gear: Gear) -> u128 {
    let res: BalanceResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.game,
            &QueryMsg::Balance {
                owner: owner.to_string(),
                gear,
            },
        )
        .unwrap();
    res.amount.u128()
}

fn job_registered(env: &TestEnv, job_id: u64) -> bool {
    let res: JobResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.oracle,
            &MockQueryMsg::Job {
                consumer: env.game.to_string(),
                job_id,
            },
        )
        .unwrap();
    res.registered
}

fn fulfill(env: &mut TestEnv, job_id: u64, random_word: u128) -> anyhow::Result<()> {
    // The test driver plays the oracle network, replaying the callback
    // through the mock coordinator
    env.app
        .execute_contract(
            env.admin.clone(),
            env.oracle.clone(),
            &MockExecuteMsg::FulfillRandomness {
                consumer: env.game.to_string(),
                job_id,
                random_word: Uint256::from(random_word),
            },
            &[],
        )
        .map(|_| ())
}

#[test]
fn test_burn_round_trip_through_mock_oracle() {
    let mut env = setup();
    let user = env.user.clone();
    let game = env.game.clone();

    // Buy shields through the public sale
    env.app
        .execute_contract(
            user.clone(),
            game.clone(),
            &ExecuteMsg::PublicMint {
                gear: Gear::Shield,
                amount: Uint128::new(100),
            },
            &coins(100 * RATE, MINT_DENOM),
        )
        .unwrap();
    assert_eq!(gear_balance(&env, &user, Gear::Shield), 100);

    // Burn one shield; the request lands in the mock coordinator and the
    // shield is gone before any randomness exists
    env.app
        .execute_contract(
            user.clone(),
            game.clone(),
            &ExecuteMsg::BurnToGainGear {
                gear: Gear::Shield,
                amount: Uint128::new(1),
            },
            &[],
        )
        .unwrap();
    assert_eq!(gear_balance(&env, &user, Gear::Shield), 99);
    assert_eq!(gear_balance(&env, &user, Gear::Sword), 0);
    assert!(job_registered(&env, 1));

    let pending: PendingRequestResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &game,
            &QueryMsg::PendingRequest {
                owner: user.to_string(),
                gear: Gear::Shield,
            },
        )
        .unwrap();
    assert_eq!(pending.request_id, Some(1));

    // The request carried the oracle fee
    let oracle_funds = env
        .app
        .wrap()
        .query_balance(&env.oracle, FEE_DENOM)
        .unwrap();
    assert_eq!(oracle_funds.amount.u128(), ORACLE_FEE);

    // (77777 mod 100) + 1 = 78 < 80 -> the callback mints a sword
    fulfill(&mut env, 1, 77_777).unwrap();
    assert_eq!(gear_balance(&env, &user, Gear::Shield), 99);
    assert_eq!(gear_balance(&env, &user, Gear::Sword), 1);
    assert!(!job_registered(&env, 1));

    let request: BurnRequestResponse = env
        .app
        .wrap()
        .query_wasm_smart(&game, &QueryMsg::BurnRequest { request_id: 1 })
        .unwrap();
    let request = request.request.unwrap();
    assert_eq!(request.status, RequestStatus::Fulfilled);
    assert!(request.outcome.unwrap().won);

    // A replayed fulfillment bounces off the retired job
    fulfill(&mut env, 1, 77_777).unwrap_err();
    assert_eq!(gear_balance(&env, &user, Gear::Sword), 1);
}

#[test]
fn test_losing_roll_keeps_gear_burned() {
    let mut env = setup();
    let user = env.user.clone();
    let game = env.game.clone();

    env.app
        .execute_contract(
            user.clone(),
            game.clone(),
            &ExecuteMsg::PublicMint {
                gear: Gear::Shield,
                amount: Uint128::new(10),
            },
            &coins(10 * RATE, MINT_DENOM),
        )
        .unwrap();

    env.app
        .execute_contract(
            user.clone(),
            game,
            &ExecuteMsg::BurnToGainGear {
                gear: Gear::Shield,
                amount: Uint128::new(1),
            },
            &[],
        )
        .unwrap();

    // (7890 mod 100) + 1 = 91, not < 80 -> loss: the shield stays burned and
    // nothing is minted
    fulfill(&mut env, 1, 7_890).unwrap();
    assert_eq!(gear_balance(&env, &user, Gear::Shield), 9);
    assert_eq!(gear_balance(&env, &user, Gear::Sword), 0);

    // The slot is free again for the next attempt
    let pending: PendingRequestResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.game,
            &QueryMsg::PendingRequest {
                owner: user.to_string(),
                gear: Gear::Shield,
            },
        )
        .unwrap();
    assert_eq!(pending.request_id, None);
}

#[test]
fn test_spoofed_callback_is_rejected() {
    let mut env = setup();
    let user = env.user.clone();
    let game = env.game.clone();

    env.app
        .execute_contract(
            user.clone(),
            game.clone(),
            &ExecuteMsg::PublicMint {
                gear: Gear::Shield,
                amount: Uint128::new(10),
            },
            &coins(10 * RATE, MINT_DENOM),
        )
        .unwrap();
    env.app
        .execute_contract(
            user.clone(),
            game.clone(),
            &ExecuteMsg::BurnToGainGear {
                gear: Gear::Shield,
                amount: Uint128::new(1),
            },
            &[],
        )
        .unwrap();

    // Skipping the oracle and delivering "randomness" directly must fail
    let err = env
        .app
        .execute_contract(
            user.clone(),
            game,
            &ExecuteMsg::ReceiveRandomness {
                request_id: 1,
                random_word: Uint256::from(1u64),
            },
            &[],
        )
        .unwrap_err();
    assert_eq!(
        err.downcast::<ContractError>().unwrap(),
        ContractError::Unauthorized {
            role: "oracle".to_string()
        }
    );
    assert_eq!(gear_balance(&env, &user, Gear::Sword), 0);
}

#[test]
fn test_admin_reconfigures_and_new_requests_follow() {
    let mut env = setup();
    let admin = env.admin.clone();
    let user = env.user.clone();
    let game = env.game.clone();

    // Switch the mechanic to Armor -> Shield at threshold 50 and let the
    // minter role hand the user some armor
    env.app
        .execute_contract(
            admin.clone(),
            game.clone(),
            &ExecuteMsg::SetBurnGearParameters {
                threshold_percent: 50,
                gear_to_burn: Gear::Armor,
                gear_to_mint: Gear::Shield,
            },
            &[],
        )
        .unwrap();
    env.app
        .execute_contract(
            admin.clone(),
            game.clone(),
            &ExecuteMsg::GrantRole {
                role: Role::Minter,
                account: admin.to_string(),
            },
            &[],
        )
        .unwrap();
    env.app
        .execute_contract(
            admin.clone(),
            game.clone(),
            &ExecuteMsg::Mint {
                recipient: user.to_string(),
                gear: Gear::Armor,
                amount: Uint128::new(10),
            },
            &[],
        )
        .unwrap();

    // rolls: forced-loss, 11, 91, 1 -> wins only for 4610 and 15600
    let static_rngs: [(u128, bool); 4] =
        [(0, false), (4_610, true), (7_890, false), (15_600, true)];

    for (round, (random_word, expect_win)) in static_rngs.into_iter().enumerate() {
        let job_id = round as u64 + 1;
        let armor_before = gear_balance(&env, &user, Gear::Armor);
        let shield_before = gear_balance(&env, &user, Gear::Shield);

        env.app
            .execute_contract(
                user.clone(),
                game.clone(),
                &ExecuteMsg::BurnToGainGear {
                    gear: Gear::Armor,
                    amount: Uint128::new(1),
                },
                &[],
            )
            .unwrap();
        fulfill(&mut env, job_id, random_word).unwrap();

        let minted = if expect_win { 1 } else { 0 };
        assert_eq!(gear_balance(&env, &user, Gear::Armor), armor_before - 1);
        assert_eq!(
            gear_balance(&env, &user, Gear::Shield),
            shield_before + minted
        );
    }
}
