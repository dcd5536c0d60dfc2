use soroban_sdk::{contracttype, Address, Env, Vec};

use tidal::constants::{
    INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT,
    PERSISTENT_LIFETIME_THRESHOLD,
};

#[contracttype]
#[derive(Clone, Debug)]
pub enum DataKey {
    Initialized,
    Config,
    State,
    Snapshot,
    SwapRequests(Address),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub owner: Address,
    pub relayer: Address,
    pub collateral_token: Address,
    pub share_token: Address,
}

/// Pre-funded buffers. `collected_fees` is income accounted separately
/// from the swap buffers; it is backed by the swapped-in shares.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolState {
    pub buffered_collateral: i128,
    pub buffered_shares: i128,
    pub collected_fees: i128,
    pub fee_bps: u32,
    pub lock_period: u64,
}

/// A copy of the primary ledger's rate, relayed across the network
/// boundary. The nonce only ever moves forward.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RateSnapshot {
    pub total_pooled: i128,
    pub total_shares: i128,
    pub nonce: u64,
}

/// A share-for-collateral swap held under the local lock. The payout
/// amount is frozen at request time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapRequest {
    pub collateral_amount: i128,
    pub request_time: u64,
    pub withdrawal_time: u64,
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
        .expect("Instant Pool: Config not set")
}

pub fn save_state(env: &Env, state: &PoolState) {
    env.storage().persistent().set(&DataKey::State, state);
    env.storage().persistent().extend_ttl(
        &DataKey::State,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn get_state(env: &Env) -> PoolState {
    let state = env
        .storage()
        .persistent()
        .get(&DataKey::State)
        .expect("Instant Pool: State not set");

    env.storage().persistent().extend_ttl(
        &DataKey::State,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );

    state
}

pub fn save_snapshot(env: &Env, snapshot: &RateSnapshot) {
    env.storage().persistent().set(&DataKey::Snapshot, snapshot);
    env.storage().persistent().extend_ttl(
        &DataKey::Snapshot,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn get_snapshot(env: &Env) -> Option<RateSnapshot> {
    env.storage().persistent().get(&DataKey::Snapshot)
}

pub fn get_swap_requests(env: &Env, owner: &Address) -> Vec<SwapRequest> {
    let key = DataKey::SwapRequests(owner.clone());
    match env.storage().persistent().get(&key) {
        Some(requests) => {
            env.storage().persistent().extend_ttl(
                &key,
                PERSISTENT_LIFETIME_THRESHOLD,
                PERSISTENT_BUMP_AMOUNT,
            );
            requests
        }
        None => Vec::new(env),
    }
}

pub fn save_swap_requests(env: &Env, owner: &Address, requests: &Vec<SwapRequest>) {
    let key = DataKey::SwapRequests(owner.clone());
    env.storage().persistent().set(&key, requests);
    env.storage().persistent().extend_ttl(
        &key,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}
