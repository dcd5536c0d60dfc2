use soroban_sdk::{Address, Env, Symbol};

use crate::storage::Operation;

pub struct StakePoolEvents {}

impl StakePoolEvents {
    /// Emitted once when the pool is initialized
    ///
    /// - topics - `["initialization", admin: Address]`
    /// - data - `[collateral_token: Address, fee_bps: u32]`
    pub fn initialization(env: &Env, admin: Address, collateral_token: Address, fee_bps: u32) {
        let topics = (Symbol::new(env, "initialization"), admin);
        env.events().publish(topics, (collateral_token, fee_bps));
    }

    /// Emitted when collateral is deposited and shares are minted
    ///
    /// - topics - `["deposit", sender: Address]`
    /// - data - `[amount: i128, shares_minted: i128, validator: Address]`
    pub fn deposit(env: &Env, sender: Address, amount: i128, shares_minted: i128, validator: Address) {
        let topics = (Symbol::new(env, "deposit"), sender);
        env.events().publish(topics, (amount, shares_minted, validator));
    }

    /// Emitted when shares are burned into a pending withdrawal request
    ///
    /// - topics - `["withdrawal_requested", sender: Address]`
    /// - data - `[shares_burned: i128, collateral_owed: i128, validator: Address, unlock_epoch: u64]`
    pub fn withdrawal_requested(
        env: &Env,
        sender: Address,
        shares_burned: i128,
        collateral_owed: i128,
        validator: Address,
        unlock_epoch: u64,
    ) {
        let topics = (Symbol::new(env, "withdrawal_requested"), sender);
        env.events()
            .publish(topics, (shares_burned, collateral_owed, validator, unlock_epoch));
    }

    /// Emitted when a matured withdrawal request is paid out
    ///
    /// - topics - `["withdrawal_claimed", sender: Address]`
    /// - data - `[index: u32, collateral_paid: i128]`
    pub fn withdrawal_claimed(env: &Env, sender: Address, index: u32, collateral_paid: i128) {
        let topics = (Symbol::new(env, "withdrawal_claimed"), sender);
        env.events().publish(topics, (index, collateral_paid));
    }

    /// Emitted when realized rewards are added to the pooled collateral
    ///
    /// - topics - `["rewards_accrued"]`
    /// - data - `[amount: i128, fee_amount: i128]`
    pub fn rewards_accrued(env: &Env, amount: i128, fee_amount: i128) {
        let topics = (Symbol::new(env, "rewards_accrued"),);
        env.events().publish(topics, (amount, fee_amount));
    }

    /// Emitted when the protocol fee is skimmed to the treasury.
    /// Not emitted when the fee amount rounds to zero.
    ///
    /// - topics - `["fee_collected", treasury: Address]`
    /// - data - `[fee_amount: i128, fee_shares: i128]`
    pub fn fee_collected(env: &Env, treasury: Address, fee_amount: i128, fee_shares: i128) {
        let topics = (Symbol::new(env, "fee_collected"), treasury);
        env.events().publish(topics, (fee_amount, fee_shares));
    }

    /// - topics - `["transfer", from: Address, to: Address]`
    /// - data - `[amount: i128]`
    pub fn transfer(env: &Env, from: Address, to: Address, amount: i128) {
        let topics = (Symbol::new(env, "transfer"), from, to);
        env.events().publish(topics, amount);
    }

    /// - topics - `["fee_updated"]`
    /// - data - `[fee_bps: u32]`
    pub fn fee_updated(env: &Env, fee_bps: u32) {
        let topics = (Symbol::new(env, "fee_updated"),);
        env.events().publish(topics, fee_bps);
    }

    /// - topics - `["treasury_updated"]`
    /// - data - `[treasury: Address]`
    pub fn treasury_updated(env: &Env, treasury: Address) {
        let topics = (Symbol::new(env, "treasury_updated"),);
        env.events().publish(topics, treasury);
    }

    /// - topics - `["bot_updated"]`
    /// - data - `[bot: Address]`
    pub fn bot_updated(env: &Env, bot: Address) {
        let topics = (Symbol::new(env, "bot_updated"),);
        env.events().publish(topics, bot);
    }

    /// - topics - `["operation_paused"]`
    /// - data - `[operation: Operation]`
    pub fn operation_paused(env: &Env, operation: Operation) {
        let topics = (Symbol::new(env, "operation_paused"),);
        env.events().publish(topics, operation);
    }

    /// - topics - `["operation_resumed"]`
    /// - data - `[operation: Operation]`
    pub fn operation_resumed(env: &Env, operation: Operation) {
        let topics = (Symbol::new(env, "operation_resumed"),);
        env.events().publish(topics, operation);
    }
}
