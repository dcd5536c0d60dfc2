use soroban_fixed_point_math::FixedPoint;
use soroban_sdk::{
    contract, contractimpl, contractmeta, log, panic_with_error, token, Address, Env, Vec,
};

use tidal::{
    constants::{
        BPS_DENOMINATOR, INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, MAX_INSTANT_FEE_BPS,
    },
    error::ErrorCode,
    math::safe_math::SafeMath,
};

use crate::{
    events::InstantPoolEvents,
    storage::{
        get_config, get_snapshot, get_state, get_swap_requests, is_initialized, save_config,
        save_snapshot, save_state, save_swap_requests, set_initialized, Config, PoolState,
        RateSnapshot, SwapRequest,
    },
};

contractmeta!(
    key = "Description",
    val = "Pre-funded instant liquidity pool priced off a relayed exchange-rate snapshot"
);

#[contract]
pub struct InstantPool;

pub trait InstantPoolTrait {
    // ################################################################
    //                             ADMIN
    // ################################################################

    fn initialize(
        env: Env,
        owner: Address,
        relayer: Address,
        collateral_token: Address,
        share_token: Address,
        fee_bps: u32,
        lock_period: u64,
    );

    fn provide_collateral(env: Env, amount: i128);

    fn provide_shares(env: Env, amount: i128);

    fn withdraw_collateral(env: Env, amount: i128);

    fn withdraw_shares(env: Env, amount: i128);

    fn withdraw_collected_fees(env: Env) -> i128;

    fn set_fee_bps(env: Env, fee_bps: u32);

    fn set_lock_period(env: Env, lock_period: u64);

    fn set_relayer(env: Env, relayer: Address);

    // ################################################################
    //                             RELAY
    // ################################################################

    fn apply_rate_snapshot(env: Env, total_pooled: i128, total_shares: i128, nonce: u64);

    // ################################################################
    //                             USER
    // ################################################################

    fn swap_collateral_for_shares(env: Env, sender: Address, amount: i128) -> i128;

    fn request_share_swap(env: Env, sender: Address, share_amount: i128) -> u32;

    fn claim_share_swap(env: Env, owner: Address, index: u32) -> i128;

    // ################################################################
    //                             QUERIES
    // ################################################################

    fn amount_after_fee(env: Env, amount: i128) -> (i128, i128);

    fn query_config(env: Env) -> Config;

    fn query_state(env: Env) -> PoolState;

    fn query_snapshot(env: Env) -> RateSnapshot;

    fn convert_collateral_to_shares(env: Env, amount: i128) -> i128;

    fn convert_shares_to_collateral(env: Env, share_amount: i128) -> i128;

    fn query_swap_requests(env: Env, owner: Address) -> Vec<SwapRequest>;
}

#[contractimpl]
impl InstantPoolTrait for InstantPool {
    fn initialize(
        env: Env,
        owner: Address,
        relayer: Address,
        collateral_token: Address,
        share_token: Address,
        fee_bps: u32,
        lock_period: u64,
    ) {
        if is_initialized(&env) {
            log!(
                &env,
                "Instant Pool: Initialize: initializing contract twice is not allowed"
            );
            panic_with_error!(&env, ErrorCode::AlreadyInitialized);
        }

        if fee_bps > MAX_INSTANT_FEE_BPS {
            log!(&env, "Instant Pool: Initialize: fee above maximum");
            panic_with_error!(&env, ErrorCode::InvalidFee);
        }

        set_initialized(&env);

        save_config(
            &env,
            &Config {
                owner: owner.clone(),
                relayer,
                collateral_token,
                share_token,
            },
        );

        save_state(
            &env,
            &PoolState {
                buffered_collateral: 0,
                buffered_shares: 0,
                collected_fees: 0,
                fee_bps,
                lock_period,
            },
        );

        InstantPoolEvents::initialization(&env, owner, fee_bps, lock_period);
    }

    fn provide_collateral(env: Env, amount: i128) {
        let config = get_config(&env);
        config.owner.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        if amount <= 0 {
            log!(&env, "Instant Pool: Provide collateral: amount must be positive");
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }

        token::Client::new(&env, &config.collateral_token).transfer(
            &config.owner,
            &env.current_contract_address(),
            &amount,
        );

        let mut state = get_state(&env);
        state.buffered_collateral = state
            .buffered_collateral
            .safe_add(amount)
            .unwrap_or_else(|err| panic_with_error!(&env, err));
        save_state(&env, &state);

        InstantPoolEvents::collateral_provided(&env, amount);
    }

    fn provide_shares(env: Env, amount: i128) {
        let config = get_config(&env);
        config.owner.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        if amount <= 0 {
            log!(&env, "Instant Pool: Provide shares: amount must be positive");
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }

        token::Client::new(&env, &config.share_token).transfer(
            &config.owner,
            &env.current_contract_address(),
            &amount,
        );

        let mut state = get_state(&env);
        state.buffered_shares = state
            .buffered_shares
            .safe_add(amount)
            .unwrap_or_else(|err| panic_with_error!(&env, err));
        save_state(&env, &state);

        InstantPoolEvents::shares_provided(&env, amount);
    }

    fn withdraw_collateral(env: Env, amount: i128) {
        let config = get_config(&env);
        config.owner.require_auth();

        if amount <= 0 {
            log!(&env, "Instant Pool: Withdraw collateral: amount must be positive");
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }

        let mut state = get_state(&env);
        if state.buffered_collateral < amount {
            log!(&env, "Instant Pool: Withdraw collateral: not enough buffered collateral");
            panic_with_error!(&env, ErrorCode::InsufficientInstantLiquidity);
        }

        state.buffered_collateral -= amount;
        save_state(&env, &state);

        token::Client::new(&env, &config.collateral_token).transfer(
            &env.current_contract_address(),
            &config.owner,
            &amount,
        );

        InstantPoolEvents::collateral_withdrawn(&env, amount);
    }

    fn withdraw_shares(env: Env, amount: i128) {
        let config = get_config(&env);
        config.owner.require_auth();

        if amount <= 0 {
            log!(&env, "Instant Pool: Withdraw shares: amount must be positive");
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }

        let mut state = get_state(&env);
        if state.buffered_shares < amount {
            log!(&env, "Instant Pool: Withdraw shares: not enough buffered shares");
            panic_with_error!(&env, ErrorCode::InsufficientInstantLiquidity);
        }

        state.buffered_shares -= amount;
        save_state(&env, &state);

        token::Client::new(&env, &config.share_token).transfer(
            &env.current_contract_address(),
            &config.owner,
            &amount,
        );

        InstantPoolEvents::shares_withdrawn(&env, amount);
    }

    fn withdraw_collected_fees(env: Env) -> i128 {
        let config = get_config(&env);
        config.owner.require_auth();

        let mut state = get_state(&env);
        let amount = state.collected_fees;
        if amount <= 0 {
            log!(&env, "Instant Pool: Withdraw fees: nothing collected");
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }

        state.collected_fees = 0;
        save_state(&env, &state);

        token::Client::new(&env, &config.collateral_token).transfer(
            &env.current_contract_address(),
            &config.owner,
            &amount,
        );

        InstantPoolEvents::fees_withdrawn(&env, config.owner, amount);

        amount
    }

    fn set_fee_bps(env: Env, fee_bps: u32) {
        let config = get_config(&env);
        config.owner.require_auth();

        if fee_bps > MAX_INSTANT_FEE_BPS {
            log!(&env, "Instant Pool: Set fee: fee above maximum");
            panic_with_error!(&env, ErrorCode::InvalidFee);
        }

        let mut state = get_state(&env);
        state.fee_bps = fee_bps;
        save_state(&env, &state);

        InstantPoolEvents::fee_updated(&env, fee_bps);
    }

    fn set_lock_period(env: Env, lock_period: u64) {
        let config = get_config(&env);
        config.owner.require_auth();

        let mut state = get_state(&env);
        state.lock_period = lock_period;
        save_state(&env, &state);

        InstantPoolEvents::lock_period_updated(&env, lock_period);
    }

    fn set_relayer(env: Env, relayer: Address) {
        let mut config = get_config(&env);
        config.owner.require_auth();

        config.relayer = relayer.clone();
        save_config(&env, &config);

        InstantPoolEvents::relayer_updated(&env, relayer);
    }

    fn apply_rate_snapshot(env: Env, total_pooled: i128, total_shares: i128, nonce: u64) {
        let config = get_config(&env);
        config.relayer.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        if total_pooled <= 0 || total_shares <= 0 {
            log!(&env, "Instant Pool: Apply snapshot: totals must be positive");
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }

        // Delivery is at-least-once and unordered: anything not newer
        // than the applied snapshot is dropped without effect.
        if let Some(applied) = get_snapshot(&env) {
            if nonce <= applied.nonce {
                return;
            }
        }

        save_snapshot(
            &env,
            &RateSnapshot {
                total_pooled,
                total_shares,
                nonce,
            },
        );

        InstantPoolEvents::rate_synced(&env, total_pooled, total_shares, nonce);
    }

    fn swap_collateral_for_shares(env: Env, sender: Address, amount: i128) -> i128 {
        sender.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        if amount <= 0 {
            log!(&env, "Instant Pool: Swap: amount must be positive");
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }

        let snapshot = require_snapshot(&env);
        let shares_out = amount
            .fixed_mul_floor(snapshot.total_shares, snapshot.total_pooled)
            .unwrap_or_else(|| panic_with_error!(&env, ErrorCode::MathError));
        if shares_out == 0 {
            log!(&env, "Instant Pool: Swap: amount too small");
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }

        let mut state = get_state(&env);
        if state.buffered_shares < shares_out {
            log!(&env, "Instant Pool: Swap: not enough shares in the instant pool");
            panic_with_error!(&env, ErrorCode::InsufficientInstantLiquidity);
        }

        let config = get_config(&env);
        token::Client::new(&env, &config.collateral_token).transfer(
            &sender,
            &env.current_contract_address(),
            &amount,
        );

        state.buffered_collateral = state
            .buffered_collateral
            .safe_add(amount)
            .unwrap_or_else(|err| panic_with_error!(&env, err));
        state.buffered_shares -= shares_out;
        save_state(&env, &state);

        token::Client::new(&env, &config.share_token).transfer(
            &env.current_contract_address(),
            &sender,
            &shares_out,
        );

        InstantPoolEvents::swap(&env, sender, amount, shares_out);

        shares_out
    }

    fn request_share_swap(env: Env, sender: Address, share_amount: i128) -> u32 {
        sender.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        if share_amount <= 0 {
            log!(&env, "Instant Pool: Request swap: amount must be positive");
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }

        let snapshot = require_snapshot(&env);
        let gross = share_amount
            .fixed_mul_floor(snapshot.total_pooled, snapshot.total_shares)
            .unwrap_or_else(|| panic_with_error!(&env, ErrorCode::MathError));

        let mut state = get_state(&env);
        let (net, fee) = split_fee(&env, gross, state.fee_bps);
        if net <= 0 {
            log!(&env, "Instant Pool: Request swap: amount too small");
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }

        if state.buffered_collateral < net {
            log!(&env, "Instant Pool: Request swap: not enough collateral in the instant pool");
            panic_with_error!(&env, ErrorCode::InsufficientInstantLiquidity);
        }

        let config = get_config(&env);
        token::Client::new(&env, &config.share_token).transfer(
            &sender,
            &env.current_contract_address(),
            &share_amount,
        );

        state.buffered_shares = state
            .buffered_shares
            .safe_add(share_amount)
            .unwrap_or_else(|err| panic_with_error!(&env, err));
        state.buffered_collateral -= net;
        state.collected_fees = state
            .collected_fees
            .safe_add(fee)
            .unwrap_or_else(|err| panic_with_error!(&env, err));
        save_state(&env, &state);

        let now = env.ledger().timestamp();
        let withdrawal_time = now + state.lock_period;

        let mut requests = get_swap_requests(&env, &sender);
        requests.push_back(SwapRequest {
            collateral_amount: net,
            request_time: now,
            withdrawal_time,
        });
        save_swap_requests(&env, &sender, &requests);

        InstantPoolEvents::swap_requested(&env, sender, share_amount, net, fee, withdrawal_time);

        requests.len() - 1
    }

    fn claim_share_swap(env: Env, owner: Address, index: u32) -> i128 {
        owner.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        let mut requests = get_swap_requests(&env, &owner);
        let request = match requests.get(index) {
            Some(request) => request,
            None => {
                log!(&env, "Instant Pool: Claim swap: no request at index");
                panic_with_error!(&env, ErrorCode::InvalidIndex);
            }
        };

        if env.ledger().timestamp() < request.withdrawal_time {
            log!(&env, "Instant Pool: Claim swap: still under the local lock");
            panic_with_error!(&env, ErrorCode::TooEarly);
        }

        requests.remove_unchecked(index);
        save_swap_requests(&env, &owner, &requests);

        let config = get_config(&env);
        token::Client::new(&env, &config.collateral_token).transfer(
            &env.current_contract_address(),
            &owner,
            &request.collateral_amount,
        );

        InstantPoolEvents::swap_claimed(&env, owner, index, request.collateral_amount);

        request.collateral_amount
    }

    fn amount_after_fee(env: Env, amount: i128) -> (i128, i128) {
        if amount < 0 {
            log!(&env, "Instant Pool: Amount after fee: amount must not be negative");
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }

        let state = get_state(&env);
        split_fee(&env, amount, state.fee_bps)
    }

    fn query_config(env: Env) -> Config {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
        get_config(&env)
    }

    fn query_state(env: Env) -> PoolState {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
        get_state(&env)
    }

    fn query_snapshot(env: Env) -> RateSnapshot {
        require_snapshot(&env)
    }

    fn convert_collateral_to_shares(env: Env, amount: i128) -> i128 {
        let snapshot = require_snapshot(&env);
        amount
            .fixed_mul_floor(snapshot.total_shares, snapshot.total_pooled)
            .unwrap_or_else(|| panic_with_error!(&env, ErrorCode::MathError))
    }

    fn convert_shares_to_collateral(env: Env, share_amount: i128) -> i128 {
        let snapshot = require_snapshot(&env);
        share_amount
            .fixed_mul_floor(snapshot.total_pooled, snapshot.total_shares)
            .unwrap_or_else(|| panic_with_error!(&env, ErrorCode::MathError))
    }

    fn query_swap_requests(env: Env, owner: Address) -> Vec<SwapRequest> {
        get_swap_requests(&env, &owner)
    }
}

fn require_snapshot(env: &Env) -> RateSnapshot {
    match get_snapshot(env) {
        Some(snapshot) => snapshot,
        None => {
            log!(env, "Instant Pool: no rate snapshot relayed yet");
            panic_with_error!(env, ErrorCode::RateNotSynced);
        }
    }
}

fn split_fee(env: &Env, amount: i128, fee_bps: u32) -> (i128, i128) {
    let fee = amount
        .fixed_mul_floor(fee_bps as i128, BPS_DENOMINATOR)
        .unwrap_or_else(|| panic_with_error!(env, ErrorCode::MathError));
    (amount - fee, fee)
}
