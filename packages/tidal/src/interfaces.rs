//! Client interfaces for the external collaborators the contracts call
//! into. The implementations live outside this workspace (or in mock
//! contracts under test); only the call surface is fixed here.

use soroban_sdk::{contractclient, Address, Env};

/// The validator-delegation backend. Calls look synchronous from the
/// contract's point of view; settlement is gated on the epoch counter
/// this interface reports.
#[contractclient(name = "DelegationBackendClient")]
pub trait DelegationBackend {
    /// Delegates `amount` of collateral, previously transferred to the
    /// backend, to `validator`.
    fn delegate(env: Env, validator: Address, amount: i128);

    /// Starts unbonding `amount` of collateral from `validator`.
    /// Returns the epoch at which the collateral becomes withdrawable.
    fn undelegate(env: Env, validator: Address, amount: i128) -> u64;

    /// Monotonic epoch counter; every claim is a pure comparison
    /// against this value.
    fn current_epoch(env: Env) -> u64;

    /// Transfers matured undelegated collateral back to the pool and
    /// returns the amount moved.
    fn withdraw_matured(env: Env, validator: Address) -> i128;
}

/// Preferred-validator selection policy. Read once at the moment a
/// deposit or withdrawal request is created; the request stays bound to
/// whatever was preferred then.
#[contractclient(name = "ValidatorRegistryClient")]
pub trait ValidatorRegistry {
    fn preferred_deposit_validator(env: Env) -> Address;

    fn preferred_withdrawal_validator(env: Env) -> Address;
}

/// The slice of the stake-pool interface consumed cross-contract by the
/// partner-staking engine.
#[contractclient(name = "StakePoolClient")]
pub trait StakePoolInterface {
    fn deposit(env: Env, sender: Address, amount: i128) -> i128;

    fn request_withdrawal(env: Env, sender: Address, share_amount: i128) -> u64;

    fn claim_withdrawal(env: Env, sender: Address, index: u32) -> i128;

    fn balance(env: Env, address: Address) -> i128;

    fn total_shares(env: Env) -> i128;

    fn total_pooled(env: Env) -> i128;

    fn fee_bps(env: Env) -> u32;
}
