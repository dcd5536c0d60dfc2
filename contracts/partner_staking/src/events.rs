use soroban_sdk::{Address, Env, Symbol};

use crate::storage::PartnerStatus;

pub struct PartnerStakingEvents {}

impl PartnerStakingEvents {
    /// - topics - `["initialization", admin: Address]`
    /// - data - `[stake_pool: Address, fee_reimbursal_bps: u32]`
    pub fn initialization(env: &Env, admin: Address, stake_pool: Address, fee_reimbursal_bps: u32) {
        let topics = (Symbol::new(env, "initialization"), admin);
        env.events().publish(topics, (stake_pool, fee_reimbursal_bps));
    }

    /// - topics - `["partner_registered", wallet: Address]`
    /// - data - `[partner_id: u64, fee_tier: u32, disbursal_count: u32]`
    pub fn partner_registered(
        env: &Env,
        wallet: Address,
        partner_id: u64,
        fee_tier: u32,
        disbursal_count: u32,
    ) {
        let topics = (Symbol::new(env, "partner_registered"), wallet);
        env.events()
            .publish(topics, (partner_id, fee_tier, disbursal_count));
    }

    /// - topics - `["partner_status_updated"]`
    /// - data - `[partner_id: u64, status: PartnerStatus]`
    pub fn partner_status_updated(env: &Env, partner_id: u64, status: PartnerStatus) {
        let topics = (Symbol::new(env, "partner_status_updated"),);
        env.events().publish(topics, (partner_id, status));
    }

    /// - topics - `["partner_wallet_changed"]`
    /// - data - `[partner_id: u64, old_wallet: Address, new_wallet: Address]`
    pub fn partner_wallet_changed(
        env: &Env,
        partner_id: u64,
        old_wallet: Address,
        new_wallet: Address,
    ) {
        let topics = (Symbol::new(env, "partner_wallet_changed"),);
        env.events()
            .publish(topics, (partner_id, old_wallet, new_wallet));
    }

    /// - topics - `["partner_staked", wallet: Address]`
    /// - data - `[partner_id: u64, amount: i128, shares_minted: i128]`
    pub fn partner_staked(
        env: &Env,
        wallet: Address,
        partner_id: u64,
        amount: i128,
        shares_minted: i128,
    ) {
        let topics = (Symbol::new(env, "partner_staked"), wallet);
        env.events().publish(topics, (partner_id, amount, shares_minted));
    }

    /// Emitted once per partner whose harvest moved a positive reward.
    ///
    /// - topics - `["reward_harvested"]`
    /// - data - `[batch_id: u64, partner_id: u64, reward_shares: i128]`
    pub fn reward_harvested(env: &Env, batch_id: u64, partner_id: u64, reward_shares: i128) {
        let topics = (Symbol::new(env, "reward_harvested"),);
        env.events()
            .publish(topics, (batch_id, partner_id, reward_shares));
    }

    /// - topics - `["batch_undelegated"]`
    /// - data - `[batch_id: u64, shares_burned: i128, withdrawal_epoch: u64]`
    pub fn batch_undelegated(env: &Env, batch_id: u64, shares_burned: i128, withdrawal_epoch: u64) {
        let topics = (Symbol::new(env, "batch_undelegated"),);
        env.events()
            .publish(topics, (batch_id, shares_burned, withdrawal_epoch));
    }

    /// - topics - `["batch_claimed"]`
    /// - data - `[batch_id: u64, collateral_received: i128]`
    pub fn batch_claimed(env: &Env, batch_id: u64, collateral_received: i128) {
        let topics = (Symbol::new(env, "batch_claimed"),);
        env.events().publish(topics, (batch_id, collateral_received));
    }

    /// - topics - `["reward_disbursed", wallet: Address]`
    /// - data - `[batch_id: u64, partner_id: u64, collateral: i128, bonus: i128]`
    pub fn reward_disbursed(
        env: &Env,
        wallet: Address,
        batch_id: u64,
        partner_id: u64,
        collateral: i128,
        bonus: i128,
    ) {
        let topics = (Symbol::new(env, "reward_disbursed"), wallet);
        env.events()
            .publish(topics, (batch_id, partner_id, collateral, bonus));
    }

    /// - topics - `["reimbursement_funded", from: Address]`
    /// - data - `[amount: i128, balance: i128]`
    pub fn reimbursement_funded(env: &Env, from: Address, amount: i128, balance: i128) {
        let topics = (Symbol::new(env, "reimbursement_funded"), from);
        env.events().publish(topics, (amount, balance));
    }

    /// - topics - `["reimbursal_fee_updated"]`
    /// - data - `[fee_reimbursal_bps: u32]`
    pub fn reimbursal_fee_updated(env: &Env, fee_reimbursal_bps: u32) {
        let topics = (Symbol::new(env, "reimbursal_fee_updated"),);
        env.events().publish(topics, fee_reimbursal_bps);
    }

    /// - topics - `["manager_updated"]`
    /// - data - `[manager: Address]`
    pub fn manager_updated(env: &Env, manager: Address) {
        let topics = (Symbol::new(env, "manager_updated"),);
        env.events().publish(topics, manager);
    }
}
