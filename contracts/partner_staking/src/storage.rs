use soroban_sdk::{contracttype, Address, Env, String, Vec};

use tidal::constants::{
    INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT,
    PERSISTENT_LIFETIME_THRESHOLD,
};

#[contracttype]
#[derive(Clone, Debug)]
pub enum DataKey {
    Initialized,
    Config,
    PartnerCount,
    CurrentBatchId,
    ReimbursementPool,
    UnstakeRequests,
    Partner(u64),
    PartnerWallet(Address),
    Batch(u64),
    PartnerShare(PartnerShareKey),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PartnerShareKey {
    pub batch_id: u64,
    pub partner_id: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub admin: Address,
    pub manager: Address,
    pub stake_pool: Address,
    pub collateral_token: Address,
    pub fee_reimbursal_bps: u32,
}

#[contracttype]
#[derive(Clone, Copy, PartialEq, Debug, Eq)]
pub enum PartnerStatus {
    Active,
    Inactive,
}

/// One registered partner. Never deleted; deactivation is the only
/// exit. `total_staked` is cumulative principal and never decreases,
/// `total_shares` shrinks on every harvest.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PartnerAccount {
    pub id: u64,
    pub wallet: Address,
    pub name: String,
    pub website: String,
    pub metadata: String,
    pub status: PartnerStatus,
    pub fee_tier: u32,
    pub total_staked: i128,
    pub total_shares: i128,
    pub disbursal_count: u32,
    pub disbursal_remaining: u32,
    pub registered_at: u64,
}

#[contracttype]
#[derive(Clone, Copy, PartialEq, Debug, Eq)]
pub enum BatchStatus {
    Pending,
    Undelegated,
    Claimed,
}

/// A group of harvested partner rewards undelegated and settled
/// together. Exactly one batch is Pending at any time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakeBatch {
    pub id: u64,
    pub shares_burned: i128,
    pub status: BatchStatus,
    pub withdrawal_epoch: u64,
    pub collateral_received: i128,
    pub undelegated_at: u64,
    pub claimed_at: u64,
}

/// A partner's contribution to one batch. `disbursed_at` stays zero
/// until the payout happens.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PartnerShare {
    pub shares_unstaked: i128,
    pub disbursed_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakeRequest {
    pub batch_id: u64,
    pub withdrawal_epoch: u64,
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Initialized)
}

pub fn set_initialized(env: &Env) {
    env.storage().instance().set(&DataKey::Initialized, &true);
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn get_config(env: &Env) -> Config {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .expect("Partner Staking: Config not set")
}

pub fn get_partner_count(env: &Env) -> u64 {
    env.storage()
        .persistent()
        .get(&DataKey::PartnerCount)
        .unwrap_or(0)
}

pub fn set_partner_count(env: &Env, count: u64) {
    env.storage().persistent().set(&DataKey::PartnerCount, &count);
    env.storage().persistent().extend_ttl(
        &DataKey::PartnerCount,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn get_partner(env: &Env, partner_id: u64) -> Option<PartnerAccount> {
    let key = DataKey::Partner(partner_id);
    let partner: Option<PartnerAccount> = env.storage().persistent().get(&key);
    if partner.is_some() {
        env.storage().persistent().extend_ttl(
            &key,
            PERSISTENT_LIFETIME_THRESHOLD,
            PERSISTENT_BUMP_AMOUNT,
        );
    }
    partner
}

pub fn save_partner(env: &Env, partner: &PartnerAccount) {
    let key = DataKey::Partner(partner.id);
    env.storage().persistent().set(&key, partner);
    env.storage().persistent().extend_ttl(
        &key,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn get_partner_id_by_wallet(env: &Env, wallet: &Address) -> Option<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::PartnerWallet(wallet.clone()))
}

pub fn save_partner_wallet(env: &Env, wallet: &Address, partner_id: u64) {
    let key = DataKey::PartnerWallet(wallet.clone());
    env.storage().persistent().set(&key, &partner_id);
    env.storage().persistent().extend_ttl(
        &key,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn remove_partner_wallet(env: &Env, wallet: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::PartnerWallet(wallet.clone()));
}

pub fn get_current_batch_id(env: &Env) -> u64 {
    env.storage()
        .persistent()
        .get(&DataKey::CurrentBatchId)
        .expect("Partner Staking: Current batch not set")
}

pub fn set_current_batch_id(env: &Env, batch_id: u64) {
    env.storage()
        .persistent()
        .set(&DataKey::CurrentBatchId, &batch_id);
    env.storage().persistent().extend_ttl(
        &DataKey::CurrentBatchId,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn get_batch(env: &Env, batch_id: u64) -> Option<UnstakeBatch> {
    let key = DataKey::Batch(batch_id);
    let batch: Option<UnstakeBatch> = env.storage().persistent().get(&key);
    if batch.is_some() {
        env.storage().persistent().extend_ttl(
            &key,
            PERSISTENT_LIFETIME_THRESHOLD,
            PERSISTENT_BUMP_AMOUNT,
        );
    }
    batch
}

pub fn save_batch(env: &Env, batch: &UnstakeBatch) {
    let key = DataKey::Batch(batch.id);
    env.storage().persistent().set(&key, batch);
    env.storage().persistent().extend_ttl(
        &key,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn get_partner_share(env: &Env, batch_id: u64, partner_id: u64) -> Option<PartnerShare> {
    let key = DataKey::PartnerShare(PartnerShareKey {
        batch_id,
        partner_id,
    });
    env.storage().persistent().get(&key)
}

pub fn save_partner_share(env: &Env, batch_id: u64, partner_id: u64, share: &PartnerShare) {
    let key = DataKey::PartnerShare(PartnerShareKey {
        batch_id,
        partner_id,
    });
    env.storage().persistent().set(&key, share);
    env.storage().persistent().extend_ttl(
        &key,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn get_unstake_requests(env: &Env) -> Vec<UnstakeRequest> {
    match env.storage().persistent().get(&DataKey::UnstakeRequests) {
        Some(requests) => {
            env.storage().persistent().extend_ttl(
                &DataKey::UnstakeRequests,
                PERSISTENT_LIFETIME_THRESHOLD,
                PERSISTENT_BUMP_AMOUNT,
            );
            requests
        }
        None => Vec::new(env),
    }
}

pub fn save_unstake_requests(env: &Env, requests: &Vec<UnstakeRequest>) {
    env.storage()
        .persistent()
        .set(&DataKey::UnstakeRequests, requests);
    env.storage().persistent().extend_ttl(
        &DataKey::UnstakeRequests,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn get_reimbursement_pool(env: &Env) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::ReimbursementPool)
        .unwrap_or(0)
}

pub fn set_reimbursement_pool(env: &Env, balance: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::ReimbursementPool, &balance);
    env.storage().persistent().extend_ttl(
        &DataKey::ReimbursementPool,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}
