use soroban_sdk::{Address, Env, Symbol};

pub struct InstantPoolEvents {}

impl InstantPoolEvents {
    /// - topics - `["initialization", owner: Address]`
    /// - data - `[fee_bps: u32, lock_period: u64]`
    pub fn initialization(env: &Env, owner: Address, fee_bps: u32, lock_period: u64) {
        let topics = (Symbol::new(env, "initialization"), owner);
        env.events().publish(topics, (fee_bps, lock_period));
    }

    /// Emitted when a fresher rate snapshot is applied. Stale
    /// snapshots are dropped without a trace.
    ///
    /// - topics - `["rate_synced"]`
    /// - data - `[total_pooled: i128, total_shares: i128, nonce: u64]`
    pub fn rate_synced(env: &Env, total_pooled: i128, total_shares: i128, nonce: u64) {
        let topics = (Symbol::new(env, "rate_synced"),);
        env.events()
            .publish(topics, (total_pooled, total_shares, nonce));
    }

    /// - topics - `["collateral_provided"]`
    /// - data - `[amount: i128]`
    pub fn collateral_provided(env: &Env, amount: i128) {
        let topics = (Symbol::new(env, "collateral_provided"),);
        env.events().publish(topics, amount);
    }

    /// - topics - `["shares_provided"]`
    /// - data - `[amount: i128]`
    pub fn shares_provided(env: &Env, amount: i128) {
        let topics = (Symbol::new(env, "shares_provided"),);
        env.events().publish(topics, amount);
    }

    /// - topics - `["collateral_withdrawn"]`
    /// - data - `[amount: i128]`
    pub fn collateral_withdrawn(env: &Env, amount: i128) {
        let topics = (Symbol::new(env, "collateral_withdrawn"),);
        env.events().publish(topics, amount);
    }

    /// - topics - `["shares_withdrawn"]`
    /// - data - `[amount: i128]`
    pub fn shares_withdrawn(env: &Env, amount: i128) {
        let topics = (Symbol::new(env, "shares_withdrawn"),);
        env.events().publish(topics, amount);
    }

    /// - topics - `["swap", sender: Address]`
    /// - data - `[collateral_in: i128, shares_out: i128]`
    pub fn swap(env: &Env, sender: Address, collateral_in: i128, shares_out: i128) {
        let topics = (Symbol::new(env, "swap"), sender);
        env.events().publish(topics, (collateral_in, shares_out));
    }

    /// - topics - `["swap_requested", sender: Address]`
    /// - data - `[shares_in: i128, collateral_out: i128, fee: i128, withdrawal_time: u64]`
    pub fn swap_requested(
        env: &Env,
        sender: Address,
        shares_in: i128,
        collateral_out: i128,
        fee: i128,
        withdrawal_time: u64,
    ) {
        let topics = (Symbol::new(env, "swap_requested"), sender);
        env.events()
            .publish(topics, (shares_in, collateral_out, fee, withdrawal_time));
    }

    /// - topics - `["swap_claimed", owner: Address]`
    /// - data - `[index: u32, collateral_paid: i128]`
    pub fn swap_claimed(env: &Env, owner: Address, index: u32, collateral_paid: i128) {
        let topics = (Symbol::new(env, "swap_claimed"), owner);
        env.events().publish(topics, (index, collateral_paid));
    }

    /// - topics - `["fees_withdrawn", owner: Address]`
    /// - data - `[amount: i128]`
    pub fn fees_withdrawn(env: &Env, owner: Address, amount: i128) {
        let topics = (Symbol::new(env, "fees_withdrawn"), owner);
        env.events().publish(topics, amount);
    }

    /// - topics - `["fee_updated"]`
    /// - data - `[fee_bps: u32]`
    pub fn fee_updated(env: &Env, fee_bps: u32) {
        let topics = (Symbol::new(env, "fee_updated"),);
        env.events().publish(topics, fee_bps);
    }

    /// - topics - `["lock_period_updated"]`
    /// - data - `[lock_period: u64]`
    pub fn lock_period_updated(env: &Env, lock_period: u64) {
        let topics = (Symbol::new(env, "lock_period_updated"),);
        env.events().publish(topics, lock_period);
    }

    /// - topics - `["relayer_updated"]`
    /// - data - `[relayer: Address]`
    pub fn relayer_updated(env: &Env, relayer: Address) {
        let topics = (Symbol::new(env, "relayer_updated"),);
        env.events().publish(topics, relayer);
    }
}
