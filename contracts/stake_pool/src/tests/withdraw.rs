extern crate std;

use pretty_assertions::assert_eq;
use soroban_sdk::{testutils::Address as _, Address, Env};

use super::setup::{accrue_rewards, setup_pool, UNBONDING_DELAY_EPOCHS};

#[test]
fn request_burns_shares_and_freezes_owed_collateral() {
    let env = Env::default();
    env.mock_all_auths();

    let set = setup_pool(&env, 0);
    let user = Address::generate(&env);
    set.collateral_admin.mint(&user, &1_000);
    set.pool.deposit(&user, &1_000);

    let unlock_epoch = set.pool.request_withdrawal(&user, &50);

    assert_eq!(unlock_epoch, UNBONDING_DELAY_EPOCHS);
    assert_eq!(set.pool.balance(&user), 950);
    assert_eq!(set.pool.total_shares(), 950);
    assert_eq!(set.pool.total_pooled(), 950);

    let requests = set.pool.query_withdrawal_requests(&user);
    assert_eq!(requests.len(), 1);
    let request = requests.get(0).unwrap();
    assert_eq!(request.shares_burned, 50);
    assert_eq!(request.collateral_owed, 50);
    assert_eq!(request.request_epoch, 0);
    assert_eq!(request.unlock_epoch, UNBONDING_DELAY_EPOCHS);
    assert!(!request.claimed);
}

#[test]
#[should_panic(expected = "Error(Contract, #10)")]
fn claim_before_unlock_epoch_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let set = setup_pool(&env, 0);
    let user = Address::generate(&env);
    set.collateral_admin.mint(&user, &1_000);
    set.pool.deposit(&user, &1_000);
    set.pool.request_withdrawal(&user, &50);

    set.backend.set_epoch(&(UNBONDING_DELAY_EPOCHS - 1));
    set.pool.claim_withdrawal(&user, &0);
}

#[test]
fn claim_after_unlock_pays_exactly_once() {
    let env = Env::default();
    env.mock_all_auths();

    let set = setup_pool(&env, 0);
    let user = Address::generate(&env);
    set.collateral_admin.mint(&user, &1_000);
    set.pool.deposit(&user, &1_000);
    set.pool.request_withdrawal(&user, &50);

    set.backend.set_epoch(&UNBONDING_DELAY_EPOCHS);
    let paid = set.pool.claim_withdrawal(&user, &0);

    assert_eq!(paid, 50);
    assert_eq!(set.collateral.balance(&user), 50);
    assert_eq!(set.pool.query_withdrawal_requests(&user).len(), 0);

    // The request was destroyed; the stale index no longer resolves.
    let second = set.pool.try_claim_withdrawal(&user, &0);
    assert!(second.is_err());
    assert_eq!(set.collateral.balance(&user), 50);
}

#[test]
#[should_panic(expected = "Error(Contract, #11)")]
fn claim_of_absent_index_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let set = setup_pool(&env, 0);
    let user = Address::generate(&env);
    set.collateral_admin.mint(&user, &1_000);
    set.pool.deposit(&user, &1_000);
    set.pool.request_withdrawal(&user, &50);

    set.pool.claim_withdrawal(&user, &1);
}

#[test]
fn claim_pays_the_rate_recorded_at_request_time() {
    let env = Env::default();
    env.mock_all_auths();

    let set = setup_pool(&env, 0);
    let user = Address::generate(&env);
    set.collateral_admin.mint(&user, &1_000);
    set.pool.deposit(&user, &1_000);
    set.pool.request_withdrawal(&user, &50);

    // The rate keeps appreciating while the request is pending; the
    // payout stays frozen at the requested 1:1 value.
    accrue_rewards(&set.pool, &set.collateral_admin, &set.backend, 500);

    set.backend.set_epoch(&UNBONDING_DELAY_EPOCHS);
    assert_eq!(set.pool.claim_withdrawal(&user, &0), 50);
    assert_eq!(set.collateral.balance(&user), 50);
}

#[test]
fn indices_shift_down_after_a_claim() {
    let env = Env::default();
    env.mock_all_auths();

    let set = setup_pool(&env, 0);
    let user = Address::generate(&env);
    set.collateral_admin.mint(&user, &1_000);
    set.pool.deposit(&user, &1_000);

    set.pool.request_withdrawal(&user, &10);
    set.pool.request_withdrawal(&user, &20);
    set.pool.request_withdrawal(&user, &30);

    set.backend.set_epoch(&UNBONDING_DELAY_EPOCHS);
    set.pool.claim_withdrawal(&user, &1);

    let requests = set.pool.query_withdrawal_requests(&user);
    assert_eq!(requests.len(), 2);
    assert_eq!(requests.get(0).unwrap().shares_burned, 10);
    assert_eq!(requests.get(1).unwrap().shares_burned, 30);

    // The old tail index is gone.
    assert!(set.pool.try_claim_withdrawal(&user, &2).is_err());
}

#[test]
fn immediate_round_trip_never_profits() {
    let env = Env::default();
    env.mock_all_auths();

    let set = setup_pool(&env, 0);
    let whale = Address::generate(&env);
    set.collateral_admin.mint(&whale, &1_000);
    set.pool.deposit(&whale, &1_000);
    accrue_rewards(&set.pool, &set.collateral_admin, &set.backend, 100);

    for amount in [1i128, 7, 333, 999] {
        let user = Address::generate(&env);
        set.collateral_admin.mint(&user, &amount);
        let minted = set.pool.deposit(&user, &amount);
        if minted == 0 {
            continue;
        }

        set.pool.request_withdrawal(&user, &minted);
        let requests = set.pool.query_withdrawal_requests(&user);
        assert!(requests.get(0).unwrap().collateral_owed <= amount);
    }
}

#[test]
#[should_panic(expected = "Error(Contract, #7)")]
fn request_more_than_balance_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let set = setup_pool(&env, 0);
    let user = Address::generate(&env);
    set.collateral_admin.mint(&user, &100);
    set.pool.deposit(&user, &100);

    set.pool.request_withdrawal(&user, &101);
}

#[test]
#[should_panic(expected = "Error(Contract, #8)")]
fn request_while_withdrawals_paused_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let set = setup_pool(&env, 0);
    let user = Address::generate(&env);
    set.collateral_admin.mint(&user, &100);
    set.pool.deposit(&user, &100);

    set.pool.pause_operation(&crate::storage::Operation::Withdraw);
    set.pool.request_withdrawal(&user, &50);
}
