extern crate std;

use pretty_assertions::assert_eq;
use soroban_sdk::{vec, Env};

use super::setup::{
    accrue_rewards, register_partner, setup_engine, stake_for, EngineTestSet, GENESIS_TIMESTAMP,
    UNBONDING_DELAY_EPOCHS,
};
use crate::storage::BatchStatus;

fn harvested_engine(env: &Env) -> EngineTestSet {
    let set = setup_engine(env, 0, 0);
    let (first, first_wallet) = register_partner(env, &set, 12);
    let (second, second_wallet) = register_partner(env, &set, 12);
    stake_for(&set, first, &first_wallet, 101);
    stake_for(&set, second, &second_wallet, 200);
    accrue_rewards(&set, 301);
    set.engine
        .add_due_rewards_to_current_batch(&vec![env, first, second]);
    set
}

#[test]
#[should_panic(expected = "Error(Contract, #17)")]
fn undelegating_an_empty_batch_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let set = setup_engine(&env, 0, 0);
    set.engine.undelegate_current_batch();
}

#[test]
fn undelegation_freezes_the_batch_and_opens_the_next() {
    let env = Env::default();
    env.mock_all_auths();

    let set = harvested_engine(&env);
    let undelegated = set.engine.undelegate_current_batch();
    assert_eq!(undelegated, 1);

    let batch = set.engine.query_batch(&1);
    assert_eq!(batch.status, BatchStatus::Undelegated);
    assert_eq!(batch.shares_burned, 150);
    assert_eq!(batch.withdrawal_epoch, UNBONDING_DELAY_EPOCHS);
    assert_eq!(batch.undelegated_at, GENESIS_TIMESTAMP);
    assert_eq!(batch.collateral_received, 0);

    // A fresh Pending batch becomes current.
    assert_eq!(set.engine.query_current_batch_id(), 2);
    let next = set.engine.query_batch(&2);
    assert_eq!(next.status, BatchStatus::Pending);
    assert_eq!(next.shares_burned, 0);

    // One unstake request, mirrored by the pool-side queue entry.
    let requests = set.engine.query_unstake_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests.get(0).unwrap().batch_id, 1);
    assert_eq!(
        requests.get(0).unwrap().withdrawal_epoch,
        UNBONDING_DELAY_EPOCHS
    );

    let pool_requests = set.pool.query_withdrawal_requests(&set.engine.address);
    assert_eq!(pool_requests.len(), 1);
    assert_eq!(pool_requests.get(0).unwrap().shares_burned, 150);
    assert_eq!(pool_requests.get(0).unwrap().collateral_owed, 300);

    // The engine's remaining pooled position covers exactly the
    // partners' principal-equivalent shares.
    assert_eq!(set.pool.balance(&set.engine.address), 151);
}

#[test]
#[should_panic(expected = "Error(Contract, #10)")]
fn claiming_before_the_withdrawal_epoch_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let set = harvested_engine(&env);
    set.engine.undelegate_current_batch();

    set.backend.set_epoch(&(UNBONDING_DELAY_EPOCHS - 1));
    set.engine.claim_unstake_rewards(&0);
}

#[test]
fn claiming_records_the_realized_proceeds() {
    let env = Env::default();
    env.mock_all_auths();

    let set = harvested_engine(&env);
    set.engine.undelegate_current_batch();
    set.backend.set_epoch(&UNBONDING_DELAY_EPOCHS);

    let received = set.engine.claim_unstake_rewards(&0);
    assert_eq!(received, 300);

    let batch = set.engine.query_batch(&1);
    assert_eq!(batch.status, BatchStatus::Claimed);
    assert_eq!(batch.collateral_received, 300);
    assert_eq!(batch.claimed_at, GENESIS_TIMESTAMP);

    assert_eq!(set.engine.query_unstake_requests().len(), 0);
    assert_eq!(set.collateral.balance(&set.engine.address), 300);
}

#[test]
#[should_panic(expected = "Error(Contract, #11)")]
fn claiming_an_absent_request_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let set = harvested_engine(&env);
    set.engine.claim_unstake_rewards(&0);
}

#[test]
fn a_second_batch_cycle_reuses_index_zero() {
    let env = Env::default();
    env.mock_all_auths();

    let set = harvested_engine(&env);
    set.engine.undelegate_current_batch();
    set.backend.set_epoch(&UNBONDING_DELAY_EPOCHS);
    set.engine.claim_unstake_rewards(&0);

    // Another round of rewards lands in batch 2.
    accrue_rewards(&set, 151);
    set.engine.add_due_rewards_to_current_batch(&vec![&env, 1, 2]);
    let batch_two = set.engine.query_batch(&2);
    assert_eq!(batch_two.shares_burned, 50);

    assert_eq!(set.engine.undelegate_current_batch(), 2);
    assert_eq!(set.engine.query_current_batch_id(), 3);

    set.backend.set_epoch(&(UNBONDING_DELAY_EPOCHS * 2));
    let received = set.engine.claim_unstake_rewards(&0);
    assert_eq!(received, 150);
    assert_eq!(set.engine.query_batch(&2).status, BatchStatus::Claimed);
}
