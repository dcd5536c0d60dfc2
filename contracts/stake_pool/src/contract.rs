use soroban_fixed_point_math::FixedPoint;
use soroban_sdk::{
    contract, contractimpl, contractmeta, log, panic_with_error, token, Address, Env, String, Vec,
};

use tidal::{
    constants::{BPS_DENOMINATOR, INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, MAX_FEE_BPS},
    error::ErrorCode,
    interfaces::{DelegationBackendClient, ValidatorRegistryClient},
    math::safe_math::SafeMath,
};

use crate::{
    events::StakePoolEvents,
    math::rate,
    storage::{
        get_balance, get_config, get_ledger, get_withdrawal_requests, is_initialized, save_config,
        save_ledger, save_withdrawal_requests, set_balance, set_initialized, Config, LedgerState,
        Operation, WithdrawalRequest,
    },
};

contractmeta!(
    key = "Description",
    val = "Liquid staking pool issuing fungible shares against delegated collateral"
);

#[contract]
pub struct StakePool;

#[allow(clippy::too_many_arguments)]
pub trait StakePoolTrait {
    // ################################################################
    //                             ADMIN
    // ################################################################

    fn initialize(
        env: Env,
        admin: Address,
        bot: Address,
        treasury: Address,
        collateral_token: Address,
        delegation_backend: Address,
        validator_registry: Address,
        fee_bps: u32,
        share_name: String,
        share_symbol: String,
    );

    fn set_fee_bps(env: Env, fee_bps: u32);

    fn set_treasury(env: Env, treasury: Address);

    fn set_bot(env: Env, bot: Address);

    fn pause_operation(env: Env, operation: Operation);

    fn resume_operation(env: Env, operation: Operation);

    // ################################################################
    //                             USER
    // ################################################################

    fn deposit(env: Env, sender: Address, amount: i128) -> i128;

    fn request_withdrawal(env: Env, sender: Address, share_amount: i128) -> u64;

    fn claim_withdrawal(env: Env, sender: Address, index: u32) -> i128;

    fn accrue_rewards(env: Env, amount: i128);

    fn transfer(env: Env, sender: Address, to: Address, amount: i128);

    // ################################################################
    //                             QUERIES
    // ################################################################

    fn query_config(env: Env) -> Config;

    fn query_ledger(env: Env) -> LedgerState;

    fn balance(env: Env, address: Address) -> i128;

    fn total_shares(env: Env) -> i128;

    fn total_pooled(env: Env) -> i128;

    fn fee_bps(env: Env) -> u32;

    fn convert_to_shares(env: Env, amount: i128) -> i128;

    fn convert_to_collateral(env: Env, share_amount: i128) -> i128;

    fn query_withdrawal_requests(env: Env, owner: Address) -> Vec<WithdrawalRequest>;
}

#[contractimpl]
impl StakePoolTrait for StakePool {
    #[allow(clippy::too_many_arguments)]
    fn initialize(
        env: Env,
        admin: Address,
        bot: Address,
        treasury: Address,
        collateral_token: Address,
        delegation_backend: Address,
        validator_registry: Address,
        fee_bps: u32,
        share_name: String,
        share_symbol: String,
    ) {
        if is_initialized(&env) {
            log!(
                &env,
                "Stake Pool: Initialize: initializing contract twice is not allowed"
            );
            panic_with_error!(&env, ErrorCode::AlreadyInitialized);
        }

        if fee_bps > MAX_FEE_BPS {
            log!(&env, "Stake Pool: Initialize: fee above maximum");
            panic_with_error!(&env, ErrorCode::InvalidFee);
        }

        set_initialized(&env);

        save_config(
            &env,
            &Config {
                admin: admin.clone(),
                bot,
                treasury,
                collateral_token: collateral_token.clone(),
                delegation_backend,
                validator_registry,
                share_name,
                share_symbol,
            },
        );

        save_ledger(
            &env,
            &LedgerState {
                total_shares: 0,
                total_pooled: 0,
                fee_bps,
                paused_operations: Vec::new(&env),
            },
        );

        StakePoolEvents::initialization(&env, admin, collateral_token, fee_bps);
    }

    fn set_fee_bps(env: Env, fee_bps: u32) {
        let config = get_config(&env);
        config.admin.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        if fee_bps > MAX_FEE_BPS {
            log!(&env, "Stake Pool: Set fee: fee above maximum");
            panic_with_error!(&env, ErrorCode::InvalidFee);
        }

        let mut ledger = get_ledger(&env);
        ledger.fee_bps = fee_bps;
        save_ledger(&env, &ledger);

        StakePoolEvents::fee_updated(&env, fee_bps);
    }

    fn set_treasury(env: Env, treasury: Address) {
        let mut config = get_config(&env);
        config.admin.require_auth();

        config.treasury = treasury.clone();
        save_config(&env, &config);

        StakePoolEvents::treasury_updated(&env, treasury);
    }

    fn set_bot(env: Env, bot: Address) {
        let mut config = get_config(&env);
        config.admin.require_auth();

        config.bot = bot.clone();
        save_config(&env, &config);

        StakePoolEvents::bot_updated(&env, bot);
    }

    fn pause_operation(env: Env, operation: Operation) {
        let config = get_config(&env);
        config.admin.require_auth();

        let mut ledger = get_ledger(&env);
        if !ledger.paused_operations.contains(&operation) {
            ledger.paused_operations.push_back(operation);
            save_ledger(&env, &ledger);
            StakePoolEvents::operation_paused(&env, operation);
        }
    }

    fn resume_operation(env: Env, operation: Operation) {
        let config = get_config(&env);
        config.admin.require_auth();

        let mut ledger = get_ledger(&env);
        if let Some(index) = ledger.paused_operations.first_index_of(&operation) {
            ledger.paused_operations.remove_unchecked(index);
            save_ledger(&env, &ledger);
            StakePoolEvents::operation_resumed(&env, operation);
        }
    }

    fn deposit(env: Env, sender: Address, amount: i128) -> i128 {
        sender.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        if amount <= 0 {
            log!(&env, "Stake Pool: Deposit: amount must be positive");
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }

        let mut ledger = get_ledger(&env);
        if ledger.is_operation_paused(&Operation::Deposit) {
            log!(&env, "Stake Pool: Deposit: deposits are paused");
            panic_with_error!(&env, ErrorCode::Paused);
        }

        let shares_minted =
            rate::collateral_to_shares(amount, ledger.total_shares, ledger.total_pooled)
                .unwrap_or_else(|err| panic_with_error!(&env, err));

        let config = get_config(&env);
        let collateral_client = token::Client::new(&env, &config.collateral_token);
        collateral_client.transfer(&sender, &env.current_contract_address(), &amount);

        ledger.total_pooled = ledger
            .total_pooled
            .safe_add(amount)
            .unwrap_or_else(|err| panic_with_error!(&env, err));
        ledger.total_shares = ledger
            .total_shares
            .safe_add(shares_minted)
            .unwrap_or_else(|err| panic_with_error!(&env, err));
        save_ledger(&env, &ledger);

        let sender_balance = get_balance(&env, &sender);
        set_balance(
            &env,
            &sender,
            sender_balance
                .safe_add(shares_minted)
                .unwrap_or_else(|err| panic_with_error!(&env, err)),
        );

        // Bookkeeping is complete; hand the collateral to the backend.
        let validator =
            ValidatorRegistryClient::new(&env, &config.validator_registry).preferred_deposit_validator();
        collateral_client.transfer(&env.current_contract_address(), &config.delegation_backend, &amount);
        DelegationBackendClient::new(&env, &config.delegation_backend).delegate(&validator, &amount);

        StakePoolEvents::deposit(&env, sender, amount, shares_minted, validator);

        shares_minted
    }

    fn request_withdrawal(env: Env, sender: Address, share_amount: i128) -> u64 {
        sender.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        if share_amount <= 0 {
            log!(&env, "Stake Pool: Request withdrawal: amount must be positive");
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }

        let mut ledger = get_ledger(&env);
        if ledger.is_operation_paused(&Operation::Withdraw) {
            log!(&env, "Stake Pool: Request withdrawal: withdrawals are paused");
            panic_with_error!(&env, ErrorCode::Paused);
        }

        let sender_balance = get_balance(&env, &sender);
        if sender_balance < share_amount {
            log!(&env, "Stake Pool: Request withdrawal: insufficient share balance");
            panic_with_error!(&env, ErrorCode::InsufficientBalance);
        }

        let collateral_owed =
            rate::shares_to_collateral(share_amount, ledger.total_shares, ledger.total_pooled)
                .unwrap_or_else(|err| panic_with_error!(&env, err));

        // Burn immediately; the pending request no longer participates
        // in the exchange rate.
        set_balance(&env, &sender, sender_balance - share_amount);
        ledger.total_shares = ledger
            .total_shares
            .safe_sub(share_amount)
            .unwrap_or_else(|err| panic_with_error!(&env, err));
        ledger.total_pooled = ledger
            .total_pooled
            .safe_sub(collateral_owed)
            .unwrap_or_else(|err| panic_with_error!(&env, err));
        save_ledger(&env, &ledger);

        let config = get_config(&env);
        let backend = DelegationBackendClient::new(&env, &config.delegation_backend);
        let validator = ValidatorRegistryClient::new(&env, &config.validator_registry)
            .preferred_withdrawal_validator();

        let request_epoch = backend.current_epoch();
        let unlock_epoch = backend.undelegate(&validator, &collateral_owed);

        let mut requests = get_withdrawal_requests(&env, &sender);
        requests.push_back(WithdrawalRequest {
            shares_burned: share_amount,
            collateral_owed,
            validator: validator.clone(),
            request_epoch,
            unlock_epoch,
            claimed: false,
        });
        save_withdrawal_requests(&env, &sender, &requests);

        StakePoolEvents::withdrawal_requested(
            &env,
            sender,
            share_amount,
            collateral_owed,
            validator,
            unlock_epoch,
        );

        unlock_epoch
    }

    fn claim_withdrawal(env: Env, sender: Address, index: u32) -> i128 {
        sender.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        let mut requests = get_withdrawal_requests(&env, &sender);
        let mut request = match requests.get(index) {
            Some(request) => request,
            None => {
                log!(&env, "Stake Pool: Claim withdrawal: no request at index");
                panic_with_error!(&env, ErrorCode::RequestNotFound);
            }
        };

        let config = get_config(&env);
        let backend = DelegationBackendClient::new(&env, &config.delegation_backend);
        if backend.current_epoch() < request.unlock_epoch {
            log!(&env, "Stake Pool: Claim withdrawal: unlock epoch not reached");
            panic_with_error!(&env, ErrorCode::NotYetClaimable);
        }

        // A claimed request is destroyed; the indices of the remaining
        // requests shift down by one.
        request.claimed = true;
        requests.remove_unchecked(index);
        save_withdrawal_requests(&env, &sender, &requests);

        backend.withdraw_matured(&request.validator);
        token::Client::new(&env, &config.collateral_token).transfer(
            &env.current_contract_address(),
            &sender,
            &request.collateral_owed,
        );

        StakePoolEvents::withdrawal_claimed(&env, sender, index, request.collateral_owed);

        request.collateral_owed
    }

    fn accrue_rewards(env: Env, amount: i128) {
        let config = get_config(&env);
        config.bot.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        if amount <= 0 {
            log!(&env, "Stake Pool: Accrue rewards: amount must be positive");
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }

        let mut ledger = get_ledger(&env);
        if ledger.total_shares == 0 {
            log!(&env, "Stake Pool: Accrue rewards: no shares outstanding");
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }

        let fee_amount = amount
            .fixed_mul_floor(ledger.fee_bps as i128, BPS_DENOMINATOR)
            .unwrap_or_else(|| panic_with_error!(&env, ErrorCode::MathError));

        ledger.total_pooled = ledger
            .total_pooled
            .safe_add(amount)
            .unwrap_or_else(|err| panic_with_error!(&env, err));

        if fee_amount > 0 {
            // The fee is skimmed as freshly minted shares so the
            // treasury participates in the pool like any other account.
            let fee_shares =
                rate::collateral_to_shares(fee_amount, ledger.total_shares, ledger.total_pooled)
                    .unwrap_or_else(|err| panic_with_error!(&env, err));
            ledger.total_shares = ledger
                .total_shares
                .safe_add(fee_shares)
                .unwrap_or_else(|err| panic_with_error!(&env, err));

            let treasury_balance = get_balance(&env, &config.treasury);
            set_balance(
                &env,
                &config.treasury,
                treasury_balance
                    .safe_add(fee_shares)
                    .unwrap_or_else(|err| panic_with_error!(&env, err)),
            );

            StakePoolEvents::fee_collected(&env, config.treasury, fee_amount, fee_shares);
        }

        save_ledger(&env, &ledger);

        StakePoolEvents::rewards_accrued(&env, amount, fee_amount);
    }

    fn transfer(env: Env, sender: Address, to: Address, amount: i128) {
        sender.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        if amount <= 0 {
            log!(&env, "Stake Pool: Transfer: amount must be positive");
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }

        let sender_balance = get_balance(&env, &sender);
        if sender_balance < amount {
            log!(&env, "Stake Pool: Transfer: insufficient share balance");
            panic_with_error!(&env, ErrorCode::InsufficientBalance);
        }

        set_balance(&env, &sender, sender_balance - amount);
        let to_balance = get_balance(&env, &to);
        set_balance(
            &env,
            &to,
            to_balance
                .safe_add(amount)
                .unwrap_or_else(|err| panic_with_error!(&env, err)),
        );

        StakePoolEvents::transfer(&env, sender, to, amount);
    }

    fn query_config(env: Env) -> Config {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
        get_config(&env)
    }

    fn query_ledger(env: Env) -> LedgerState {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
        get_ledger(&env)
    }

    fn balance(env: Env, address: Address) -> i128 {
        get_balance(&env, &address)
    }

    fn total_shares(env: Env) -> i128 {
        get_ledger(&env).total_shares
    }

    fn total_pooled(env: Env) -> i128 {
        get_ledger(&env).total_pooled
    }

    fn fee_bps(env: Env) -> u32 {
        get_ledger(&env).fee_bps
    }

    fn convert_to_shares(env: Env, amount: i128) -> i128 {
        let ledger = get_ledger(&env);
        rate::collateral_to_shares(amount, ledger.total_shares, ledger.total_pooled)
            .unwrap_or_else(|err| panic_with_error!(&env, err))
    }

    fn convert_to_collateral(env: Env, share_amount: i128) -> i128 {
        let ledger = get_ledger(&env);
        rate::shares_to_collateral(share_amount, ledger.total_shares, ledger.total_pooled)
            .unwrap_or_else(|err| panic_with_error!(&env, err))
    }

    fn query_withdrawal_requests(env: Env, owner: Address) -> Vec<WithdrawalRequest> {
        get_withdrawal_requests(&env, &owner)
    }
}
