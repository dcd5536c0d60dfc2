extern crate std;

use pretty_assertions::assert_eq;
use soroban_sdk::Env;

use super::setup::{provide_collateral, provide_shares, setup_instant_pool, LOCAL_LOCK_PERIOD};

#[test]
fn owner_liquidity_round_trips_through_the_buffers() {
    let env = Env::default();
    env.mock_all_auths();

    let set = setup_instant_pool(&env, 0);
    provide_collateral(&set, 1_000);
    provide_shares(&set, 400);

    let state = set.pool.query_state();
    assert_eq!(state.buffered_collateral, 1_000);
    assert_eq!(state.buffered_shares, 400);

    set.pool.withdraw_collateral(&250);
    set.pool.withdraw_shares(&100);

    let state = set.pool.query_state();
    assert_eq!(state.buffered_collateral, 750);
    assert_eq!(state.buffered_shares, 300);
    assert_eq!(set.collateral.balance(&set.owner), 250);
    assert_eq!(set.shares.balance(&set.owner), 100);
}

#[test]
#[should_panic(expected = "Error(Contract, #21)")]
fn withdrawing_beyond_the_buffer_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let set = setup_instant_pool(&env, 0);
    provide_collateral(&set, 100);

    set.pool.withdraw_collateral(&101);
}

#[test]
#[should_panic(expected = "Error(Contract, #4)")]
fn providing_zero_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let set = setup_instant_pool(&env, 0);
    set.pool.provide_collateral(&0);
}

#[test]
fn fee_and_lock_period_can_be_tuned_within_bounds() {
    let env = Env::default();
    env.mock_all_auths();

    let set = setup_instant_pool(&env, 0);

    set.pool.set_fee_bps(&500);
    assert_eq!(set.pool.query_state().fee_bps, 500);

    assert!(set.pool.try_set_fee_bps(&501).is_err());
    assert_eq!(set.pool.query_state().fee_bps, 500);

    set.pool.set_lock_period(&(LOCAL_LOCK_PERIOD * 2));
    assert_eq!(set.pool.query_state().lock_period, LOCAL_LOCK_PERIOD * 2);
}

#[test]
#[should_panic(expected = "Error(Contract, #1)")]
fn initialize_twice_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let set = setup_instant_pool(&env, 0);
    set.pool.initialize(
        &set.owner,
        &set.relayer,
        &set.collateral.address,
        &set.shares.address,
        &0,
        &LOCAL_LOCK_PERIOD,
    );
}
