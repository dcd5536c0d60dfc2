extern crate std;

use pretty_assertions::assert_eq;
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    Address, Env,
};

use super::setup::{
    provide_collateral, setup_instant_pool, GENESIS_TIMESTAMP, LOCAL_LOCK_PERIOD,
};

#[test]
fn request_reserves_the_net_payout_under_a_local_lock() {
    let env = Env::default();
    env.mock_all_auths();

    // 1% instant-withdrawal fee.
    let set = setup_instant_pool(&env, 100);
    provide_collateral(&set, 1_000);
    set.pool.apply_rate_snapshot(&2_000, &1_000, &1);

    let user = Address::generate(&env);
    set.shares_admin.mint(&user, &50);

    // 50 shares are worth 100 gross; 1 goes to fees.
    let index = set.pool.request_share_swap(&user, &50);
    assert_eq!(index, 0);
    assert_eq!(set.shares.balance(&user), 0);

    let state = set.pool.query_state();
    assert_eq!(state.buffered_collateral, 901);
    assert_eq!(state.buffered_shares, 50);
    assert_eq!(state.collected_fees, 1);

    let requests = set.pool.query_swap_requests(&user);
    assert_eq!(requests.len(), 1);
    let request = requests.get(0).unwrap();
    assert_eq!(request.collateral_amount, 99);
    assert_eq!(request.request_time, GENESIS_TIMESTAMP);
    assert_eq!(request.withdrawal_time, GENESIS_TIMESTAMP + LOCAL_LOCK_PERIOD);
}

#[test]
#[should_panic(expected = "Error(Contract, #22)")]
fn claiming_under_the_lock_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let set = setup_instant_pool(&env, 100);
    provide_collateral(&set, 1_000);
    set.pool.apply_rate_snapshot(&2_000, &1_000, &1);

    let user = Address::generate(&env);
    set.shares_admin.mint(&user, &50);
    set.pool.request_share_swap(&user, &50);

    env.ledger().with_mut(|li| {
        li.timestamp = GENESIS_TIMESTAMP + LOCAL_LOCK_PERIOD - 1;
    });
    set.pool.claim_share_swap(&user, &0);
}

#[test]
fn claiming_after_the_lock_pays_the_frozen_amount() {
    let env = Env::default();
    env.mock_all_auths();

    let set = setup_instant_pool(&env, 100);
    provide_collateral(&set, 1_000);
    set.pool.apply_rate_snapshot(&2_000, &1_000, &1);

    let user = Address::generate(&env);
    set.shares_admin.mint(&user, &50);
    set.pool.request_share_swap(&user, &50);

    // The rate moving after the request does not change the payout.
    set.pool.apply_rate_snapshot(&4_000, &1_000, &2);

    env.ledger().with_mut(|li| {
        li.timestamp = GENESIS_TIMESTAMP + LOCAL_LOCK_PERIOD;
    });
    let paid = set.pool.claim_share_swap(&user, &0);

    assert_eq!(paid, 99);
    assert_eq!(set.collateral.balance(&user), 99);
    assert_eq!(set.pool.query_swap_requests(&user).len(), 0);

    // The request was destroyed with its claim.
    assert!(set.pool.try_claim_share_swap(&user, &0).is_err());
}

#[test]
#[should_panic(expected = "Error(Contract, #6)")]
fn an_index_of_another_owner_does_not_resolve() {
    let env = Env::default();
    env.mock_all_auths();

    let set = setup_instant_pool(&env, 100);
    provide_collateral(&set, 1_000);
    set.pool.apply_rate_snapshot(&2_000, &1_000, &1);

    let user = Address::generate(&env);
    let stranger = Address::generate(&env);
    set.shares_admin.mint(&user, &50);
    set.pool.request_share_swap(&user, &50);

    env.ledger().with_mut(|li| {
        li.timestamp = GENESIS_TIMESTAMP + LOCAL_LOCK_PERIOD;
    });
    set.pool.claim_share_swap(&stranger, &0);
}

#[test]
#[should_panic(expected = "Error(Contract, #21)")]
fn request_beyond_the_collateral_buffer_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let set = setup_instant_pool(&env, 100);
    provide_collateral(&set, 50);
    set.pool.apply_rate_snapshot(&2_000, &1_000, &1);

    let user = Address::generate(&env);
    set.shares_admin.mint(&user, &50);

    set.pool.request_share_swap(&user, &50);
}

#[test]
fn collected_fees_are_withdrawable_by_the_owner() {
    let env = Env::default();
    env.mock_all_auths();

    let set = setup_instant_pool(&env, 100);
    provide_collateral(&set, 1_000);
    set.pool.apply_rate_snapshot(&2_000, &1_000, &1);

    let user = Address::generate(&env);
    set.shares_admin.mint(&user, &50);
    set.pool.request_share_swap(&user, &50);

    let owner_balance_before = set.collateral.balance(&set.owner);
    assert_eq!(set.pool.withdraw_collected_fees(), 1);
    assert_eq!(set.collateral.balance(&set.owner), owner_balance_before + 1);
    assert_eq!(set.pool.query_state().collected_fees, 0);

    // Nothing left to withdraw.
    assert!(set.pool.try_withdraw_collected_fees().is_err());
}
