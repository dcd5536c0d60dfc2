extern crate std;

use pretty_assertions::assert_eq;
use soroban_sdk::{testutils::Address as _, Address, Env};

use super::setup::{accrue_rewards, setup_pool};

#[test]
fn accrual_mints_fee_shares_to_the_treasury() {
    let env = Env::default();
    env.mock_all_auths();

    // 10% protocol fee.
    let set = setup_pool(&env, 1_000);
    let user = Address::generate(&env);
    set.collateral_admin.mint(&user, &1_000);
    set.pool.deposit(&user, &1_000);

    accrue_rewards(&set.pool, &set.collateral_admin, &set.backend, 100);

    // fee = 10; fee shares = floor(10 * 1000 / 1100) = 9.
    assert_eq!(set.pool.total_pooled(), 1_100);
    assert_eq!(set.pool.total_shares(), 1_009);
    assert_eq!(set.pool.balance(&set.treasury), 9);

    // The net accrual still appreciates the rate for everyone else.
    assert!(set.pool.convert_to_collateral(&1_000) > 1_000);
}

#[test]
fn accrual_with_zero_fee_leaves_treasury_empty() {
    let env = Env::default();
    env.mock_all_auths();

    let set = setup_pool(&env, 0);
    let user = Address::generate(&env);
    set.collateral_admin.mint(&user, &1_000);
    set.pool.deposit(&user, &1_000);

    accrue_rewards(&set.pool, &set.collateral_admin, &set.backend, 100);

    assert_eq!(set.pool.total_pooled(), 1_100);
    assert_eq!(set.pool.total_shares(), 1_000);
    assert_eq!(set.pool.balance(&set.treasury), 0);
}

#[test]
fn tiny_accrual_rounds_fee_to_zero() {
    let env = Env::default();
    env.mock_all_auths();

    // 10 bps: a 100-unit accrual owes a fee of 0.1, floored away.
    let set = setup_pool(&env, 10);
    let user = Address::generate(&env);
    set.collateral_admin.mint(&user, &1_000);
    set.pool.deposit(&user, &1_000);

    accrue_rewards(&set.pool, &set.collateral_admin, &set.backend, 100);

    assert_eq!(set.pool.balance(&set.treasury), 0);
    assert_eq!(set.pool.total_shares(), 1_000);
    assert_eq!(set.pool.total_pooled(), 1_100);
}

#[test]
#[should_panic(expected = "Error(Contract, #4)")]
fn accrual_of_zero_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let set = setup_pool(&env, 0);
    let user = Address::generate(&env);
    set.collateral_admin.mint(&user, &1_000);
    set.pool.deposit(&user, &1_000);

    set.pool.accrue_rewards(&0);
}

#[test]
#[should_panic(expected = "Error(Contract, #4)")]
fn accrual_on_empty_pool_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let set = setup_pool(&env, 0);
    set.pool.accrue_rewards(&100);
}
