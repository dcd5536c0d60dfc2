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
    Ledger,
    Balance(Address),
    WithdrawalRequests(Address),
}

#[contracttype]
#[derive(Clone, Copy, PartialEq, Debug, Eq)]
pub enum Operation {
    Deposit,
    Withdraw,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub admin: Address,
    pub bot: Address,
    pub treasury: Address,
    pub collateral_token: Address,
    pub delegation_backend: Address,
    pub validator_registry: Address,
    pub share_name: String,
    pub share_symbol: String,
}

/// The exchange-rate ledger. `total_pooled / total_shares` is the
/// collateral owed per share; it only moves through deposits,
/// withdrawal requests and reward accrual, never through pending
/// claims.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerState {
    pub total_shares: i128,
    pub total_pooled: i128,
    pub fee_bps: u32,
    pub paused_operations: Vec<Operation>,
}

impl LedgerState {
    pub fn is_operation_paused(&self, operation: &Operation) -> bool {
        self.paused_operations.contains(operation)
    }
}

/// Frozen at creation; the amounts never change between request and
/// claim. The index of a request is positional within its owner's live
/// list, not a stable id.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawalRequest {
    pub shares_burned: i128,
    pub collateral_owed: i128,
    pub validator: Address,
    pub request_epoch: u64,
    pub unlock_epoch: u64,
    pub claimed: bool,
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
        .expect("Stake Pool: Config not set")
}

pub fn save_ledger(env: &Env, ledger: &LedgerState) {
    env.storage().persistent().set(&DataKey::Ledger, ledger);
    env.storage().persistent().extend_ttl(
        &DataKey::Ledger,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn get_ledger(env: &Env) -> LedgerState {
    let ledger = env
        .storage()
        .persistent()
        .get(&DataKey::Ledger)
        .expect("Stake Pool: Ledger not set");

    env.storage().persistent().extend_ttl(
        &DataKey::Ledger,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );

    ledger
}

pub fn get_balance(env: &Env, address: &Address) -> i128 {
    let key = DataKey::Balance(address.clone());
    match env.storage().persistent().get(&key) {
        Some(balance) => {
            env.storage().persistent().extend_ttl(
                &key,
                PERSISTENT_LIFETIME_THRESHOLD,
                PERSISTENT_BUMP_AMOUNT,
            );
            balance
        }
        None => 0,
    }
}

pub fn set_balance(env: &Env, address: &Address, balance: i128) {
    let key = DataKey::Balance(address.clone());
    env.storage().persistent().set(&key, &balance);
    env.storage().persistent().extend_ttl(
        &key,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn get_withdrawal_requests(env: &Env, owner: &Address) -> Vec<WithdrawalRequest> {
    let key = DataKey::WithdrawalRequests(owner.clone());
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

pub fn save_withdrawal_requests(env: &Env, owner: &Address, requests: &Vec<WithdrawalRequest>) {
    let key = DataKey::WithdrawalRequests(owner.clone());
    env.storage().persistent().set(&key, requests);
    env.storage().persistent().extend_ttl(
        &key,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}
