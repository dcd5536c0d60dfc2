use soroban_sdk::{
    auth::{ContractContext, InvokerContractAuthEntry, SubContractInvocation},
    contract, contractimpl, contractmeta, log, panic_with_error, token, vec, Address, Env, IntoVal,
    String, Symbol, Vec,
};

use tidal::{
    constants::{INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, MAX_FEE_BPS},
    error::ErrorCode,
    interfaces::StakePoolClient,
    math::safe_math::SafeMath,
};

use crate::{
    controller,
    events::PartnerStakingEvents,
    storage::{
        get_batch, get_config, get_current_batch_id, get_partner, get_partner_count,
        get_partner_id_by_wallet, get_partner_share, get_reimbursement_pool, get_unstake_requests,
        is_initialized, remove_partner_wallet, save_batch, save_config, save_partner,
        save_partner_share, save_partner_wallet, save_unstake_requests, set_current_batch_id,
        set_initialized, set_partner_count, set_reimbursement_pool, BatchStatus, Config,
        PartnerAccount, PartnerShare, PartnerStatus, UnstakeBatch, UnstakeRequest,
    },
};

contractmeta!(
    key = "Description",
    val = "Pooled partner staking with batched reward harvesting and pro-rata disbursal"
);

#[contract]
pub struct PartnerStaking;

pub trait PartnerStakingTrait {
    // ################################################################
    //                             ADMIN
    // ################################################################

    fn initialize(
        env: Env,
        admin: Address,
        manager: Address,
        stake_pool: Address,
        collateral_token: Address,
        fee_reimbursal_bps: u32,
    );

    fn register_partner(
        env: Env,
        wallet: Address,
        name: String,
        website: String,
        metadata: String,
        fee_tier: u32,
        disbursal_count: u32,
    ) -> u64;

    fn set_partner_status(env: Env, partner_id: u64, status: PartnerStatus);

    fn change_partner_wallet(env: Env, partner_id: u64, new_wallet: Address);

    fn set_fee_reimbursal_bps(env: Env, fee_reimbursal_bps: u32);

    fn set_manager(env: Env, manager: Address);

    // ################################################################
    //                           OPERATIONS
    // ################################################################

    fn stake(env: Env, partner_id: u64, amount: i128);

    fn add_due_rewards_to_current_batch(env: Env, partner_ids: Vec<u64>);

    fn undelegate_current_batch(env: Env) -> u64;

    fn claim_unstake_rewards(env: Env, request_index: u32) -> i128;

    fn disburse_partners_reward(env: Env, batch_id: u64, partner_ids: Vec<u64>);

    fn fund_reimbursement_pool(env: Env, from: Address, amount: i128);

    // ################################################################
    //                             QUERIES
    // ################################################################

    fn query_config(env: Env) -> Config;

    fn query_partner(env: Env, partner_id: u64) -> PartnerAccount;

    fn query_partner_count(env: Env) -> u64;

    fn query_batch(env: Env, batch_id: u64) -> UnstakeBatch;

    fn query_current_batch_id(env: Env) -> u64;

    fn query_partner_share(env: Env, batch_id: u64, partner_id: u64) -> PartnerShare;

    fn query_unstake_requests(env: Env) -> Vec<UnstakeRequest>;

    fn query_reimbursement_pool(env: Env) -> i128;
}

#[contractimpl]
impl PartnerStakingTrait for PartnerStaking {
    fn initialize(
        env: Env,
        admin: Address,
        manager: Address,
        stake_pool: Address,
        collateral_token: Address,
        fee_reimbursal_bps: u32,
    ) {
        if is_initialized(&env) {
            log!(
                &env,
                "Partner Staking: Initialize: initializing contract twice is not allowed"
            );
            panic_with_error!(&env, ErrorCode::AlreadyInitialized);
        }

        if fee_reimbursal_bps > MAX_FEE_BPS {
            log!(&env, "Partner Staking: Initialize: reimbursal fee above maximum");
            panic_with_error!(&env, ErrorCode::InvalidFee);
        }

        set_initialized(&env);

        save_config(
            &env,
            &Config {
                admin: admin.clone(),
                manager,
                stake_pool: stake_pool.clone(),
                collateral_token,
                fee_reimbursal_bps,
            },
        );

        // Batch ids are sequential from 1; the current batch is always
        // the single Pending one.
        save_batch(&env, &empty_batch(1));
        set_current_batch_id(&env, 1);

        PartnerStakingEvents::initialization(&env, admin, stake_pool, fee_reimbursal_bps);
    }

    fn register_partner(
        env: Env,
        wallet: Address,
        name: String,
        website: String,
        metadata: String,
        fee_tier: u32,
        disbursal_count: u32,
    ) -> u64 {
        let config = get_config(&env);
        config.admin.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        if disbursal_count == 0 {
            log!(&env, "Partner Staking: Register: disbursal count must be positive");
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }

        if get_partner_id_by_wallet(&env, &wallet).is_some() {
            log!(&env, "Partner Staking: Register: wallet already registered");
            panic_with_error!(&env, ErrorCode::DuplicatePartnerWallet);
        }

        let partner_id = get_partner_count(&env) + 1;
        set_partner_count(&env, partner_id);

        save_partner(
            &env,
            &PartnerAccount {
                id: partner_id,
                wallet: wallet.clone(),
                name,
                website,
                metadata,
                status: PartnerStatus::Active,
                fee_tier,
                total_staked: 0,
                total_shares: 0,
                disbursal_count,
                disbursal_remaining: disbursal_count,
                registered_at: env.ledger().timestamp(),
            },
        );
        save_partner_wallet(&env, &wallet, partner_id);

        PartnerStakingEvents::partner_registered(&env, wallet, partner_id, fee_tier, disbursal_count);

        partner_id
    }

    fn set_partner_status(env: Env, partner_id: u64, status: PartnerStatus) {
        let config = get_config(&env);
        config.admin.require_auth();

        let mut partner = load_partner(&env, partner_id);
        partner.status = status;
        save_partner(&env, &partner);

        PartnerStakingEvents::partner_status_updated(&env, partner_id, status);
    }

    fn change_partner_wallet(env: Env, partner_id: u64, new_wallet: Address) {
        let config = get_config(&env);
        config.admin.require_auth();

        if get_partner_id_by_wallet(&env, &new_wallet).is_some() {
            log!(&env, "Partner Staking: Change wallet: wallet already registered");
            panic_with_error!(&env, ErrorCode::DuplicatePartnerWallet);
        }

        let mut partner = load_partner(&env, partner_id);
        let old_wallet = partner.wallet.clone();
        partner.wallet = new_wallet.clone();
        save_partner(&env, &partner);

        remove_partner_wallet(&env, &old_wallet);
        save_partner_wallet(&env, &new_wallet, partner_id);

        PartnerStakingEvents::partner_wallet_changed(&env, partner_id, old_wallet, new_wallet);
    }

    fn set_fee_reimbursal_bps(env: Env, fee_reimbursal_bps: u32) {
        let mut config = get_config(&env);
        config.admin.require_auth();

        if fee_reimbursal_bps > MAX_FEE_BPS {
            log!(&env, "Partner Staking: Set reimbursal fee: fee above maximum");
            panic_with_error!(&env, ErrorCode::InvalidFee);
        }

        config.fee_reimbursal_bps = fee_reimbursal_bps;
        save_config(&env, &config);

        PartnerStakingEvents::reimbursal_fee_updated(&env, fee_reimbursal_bps);
    }

    fn set_manager(env: Env, manager: Address) {
        let mut config = get_config(&env);
        config.admin.require_auth();

        config.manager = manager.clone();
        save_config(&env, &config);

        PartnerStakingEvents::manager_updated(&env, manager);
    }

    fn stake(env: Env, partner_id: u64, amount: i128) {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        if amount <= 0 {
            log!(&env, "Partner Staking: Stake: amount must be positive");
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }

        let mut partner = load_partner(&env, partner_id);
        if partner.status != PartnerStatus::Active {
            log!(&env, "Partner Staking: Stake: partner is inactive");
            panic_with_error!(&env, ErrorCode::InactivePartner);
        }

        partner.wallet.require_auth();

        let config = get_config(&env);
        token::Client::new(&env, &config.collateral_token).transfer(
            &partner.wallet,
            &env.current_contract_address(),
            &amount,
        );

        // The pool pulls the collateral out of this contract while
        // minting, one call below the direct invocation.
        env.authorize_as_current_contract(vec![
            &env,
            InvokerContractAuthEntry::Contract(SubContractInvocation {
                context: ContractContext {
                    contract: config.collateral_token.clone(),
                    fn_name: Symbol::new(&env, "transfer"),
                    args: (
                        env.current_contract_address(),
                        config.stake_pool.clone(),
                        amount,
                    )
                        .into_val(&env),
                },
                sub_invocations: vec![&env],
            }),
        ]);

        let shares_minted = StakePoolClient::new(&env, &config.stake_pool)
            .deposit(&env.current_contract_address(), &amount);

        partner.total_staked = partner
            .total_staked
            .safe_add(amount)
            .unwrap_or_else(|err| panic_with_error!(&env, err));
        partner.total_shares = partner
            .total_shares
            .safe_add(shares_minted)
            .unwrap_or_else(|err| panic_with_error!(&env, err));
        save_partner(&env, &partner);

        PartnerStakingEvents::partner_staked(&env, partner.wallet, partner_id, amount, shares_minted);
    }

    fn add_due_rewards_to_current_batch(env: Env, partner_ids: Vec<u64>) {
        let config = get_config(&env);
        config.manager.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        let pool = StakePoolClient::new(&env, &config.stake_pool);
        let ledger_total_shares = pool.total_shares();
        let ledger_total_pooled = pool.total_pooled();

        let batch_id = get_current_batch_id(&env);
        let mut batch = get_batch(&env, batch_id)
            .unwrap_or_else(|| panic_with_error!(&env, ErrorCode::BatchNotFound));

        for partner_id in partner_ids.iter() {
            let mut partner = load_partner(&env, partner_id);

            let reward = controller::batch::harvest_due_rewards(
                &env,
                &mut partner,
                &mut batch,
                ledger_total_shares,
                ledger_total_pooled,
            )
            .unwrap_or_else(|err| panic_with_error!(&env, err));

            if reward == 0 {
                continue;
            }

            save_partner(&env, &partner);

            let mut share = get_partner_share(&env, batch_id, partner_id).unwrap_or(PartnerShare {
                shares_unstaked: 0,
                disbursed_at: 0,
            });
            share.shares_unstaked = share
                .shares_unstaked
                .safe_add(reward)
                .unwrap_or_else(|err| panic_with_error!(&env, err));
            save_partner_share(&env, batch_id, partner_id, &share);

            PartnerStakingEvents::reward_harvested(&env, batch_id, partner_id, reward);
        }

        save_batch(&env, &batch);
    }

    fn undelegate_current_batch(env: Env) -> u64 {
        let config = get_config(&env);
        config.manager.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        let batch_id = get_current_batch_id(&env);
        let mut batch = get_batch(&env, batch_id)
            .unwrap_or_else(|| panic_with_error!(&env, ErrorCode::BatchNotFound));

        if batch.shares_burned == 0 {
            log!(&env, "Partner Staking: Undelegate: current batch is empty");
            panic_with_error!(&env, ErrorCode::NothingToUndelegate);
        }

        let withdrawal_epoch = StakePoolClient::new(&env, &config.stake_pool)
            .request_withdrawal(&env.current_contract_address(), &batch.shares_burned);

        batch.status = BatchStatus::Undelegated;
        batch.withdrawal_epoch = withdrawal_epoch;
        batch.undelegated_at = env.ledger().timestamp();
        save_batch(&env, &batch);

        let mut requests = get_unstake_requests(&env);
        requests.push_back(UnstakeRequest {
            batch_id,
            withdrawal_epoch,
        });
        save_unstake_requests(&env, &requests);

        // Open the next batch only once its predecessor is frozen.
        save_batch(&env, &empty_batch(batch_id + 1));
        set_current_batch_id(&env, batch_id + 1);

        PartnerStakingEvents::batch_undelegated(&env, batch_id, batch.shares_burned, withdrawal_epoch);

        batch_id
    }

    fn claim_unstake_rewards(env: Env, request_index: u32) -> i128 {
        let config = get_config(&env);
        config.manager.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        let mut requests = get_unstake_requests(&env);
        let request = match requests.get(request_index) {
            Some(request) => request,
            None => {
                log!(&env, "Partner Staking: Claim unstake: no request at index");
                panic_with_error!(&env, ErrorCode::RequestNotFound);
            }
        };

        // The engine's request list and its withdrawal queue in the
        // stake pool grow and shrink in lockstep, so the same index
        // addresses both.
        let collateral_received = StakePoolClient::new(&env, &config.stake_pool)
            .claim_withdrawal(&env.current_contract_address(), &request_index);

        let mut batch = get_batch(&env, request.batch_id)
            .unwrap_or_else(|| panic_with_error!(&env, ErrorCode::BatchNotFound));
        batch.collateral_received = collateral_received;
        batch.claimed_at = env.ledger().timestamp();
        batch.status = BatchStatus::Claimed;
        save_batch(&env, &batch);

        requests.remove_unchecked(request_index);
        save_unstake_requests(&env, &requests);

        PartnerStakingEvents::batch_claimed(&env, request.batch_id, collateral_received);

        collateral_received
    }

    fn disburse_partners_reward(env: Env, batch_id: u64, partner_ids: Vec<u64>) {
        let config = get_config(&env);
        config.manager.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        let batch = get_batch(&env, batch_id)
            .unwrap_or_else(|| panic_with_error!(&env, ErrorCode::BatchNotFound));
        if batch.status != BatchStatus::Claimed {
            log!(&env, "Partner Staking: Disburse: batch proceeds not claimed yet");
            panic_with_error!(&env, ErrorCode::InvalidBatchStatus);
        }

        let pool_fee_bps = StakePoolClient::new(&env, &config.stake_pool).fee_bps();
        let collateral_client = token::Client::new(&env, &config.collateral_token);
        let mut reimbursement_pool = get_reimbursement_pool(&env);

        for partner_id in partner_ids.iter() {
            let mut share = match get_partner_share(&env, batch_id, partner_id) {
                Some(share) => share,
                None => {
                    log!(&env, "Partner Staking: Disburse: no share for partner");
                    panic_with_error!(&env, ErrorCode::NoPartnerShareForId);
                }
            };

            let partner = load_partner(&env, partner_id);
            if partner.status != PartnerStatus::Active {
                log!(&env, "Partner Staking: Disburse: partner is inactive");
                panic_with_error!(&env, ErrorCode::InactivePartner);
            }

            let disbursal = controller::disburse::compute_disbursal(
                &env,
                &share,
                &batch,
                config.fee_reimbursal_bps,
                pool_fee_bps,
                reimbursement_pool,
            )
            .unwrap_or_else(|err| panic_with_error!(&env, err));

            reimbursement_pool -= disbursal.bonus;
            set_reimbursement_pool(&env, reimbursement_pool);

            share.disbursed_at = env.ledger().timestamp();
            save_partner_share(&env, batch_id, partner_id, &share);

            let payout = disbursal
                .collateral
                .safe_add(disbursal.bonus)
                .unwrap_or_else(|err| panic_with_error!(&env, err));
            collateral_client.transfer(&env.current_contract_address(), &partner.wallet, &payout);

            PartnerStakingEvents::reward_disbursed(
                &env,
                partner.wallet,
                batch_id,
                partner_id,
                disbursal.collateral,
                disbursal.bonus,
            );
        }
    }

    fn fund_reimbursement_pool(env: Env, from: Address, amount: i128) {
        from.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        if amount <= 0 {
            log!(&env, "Partner Staking: Fund reimbursement: amount must be positive");
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }

        let config = get_config(&env);
        token::Client::new(&env, &config.collateral_token).transfer(
            &from,
            &env.current_contract_address(),
            &amount,
        );

        let balance = get_reimbursement_pool(&env)
            .safe_add(amount)
            .unwrap_or_else(|err| panic_with_error!(&env, err));
        set_reimbursement_pool(&env, balance);

        PartnerStakingEvents::reimbursement_funded(&env, from, amount, balance);
    }

    fn query_config(env: Env) -> Config {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
        get_config(&env)
    }

    fn query_partner(env: Env, partner_id: u64) -> PartnerAccount {
        load_partner(&env, partner_id)
    }

    fn query_partner_count(env: Env) -> u64 {
        get_partner_count(&env)
    }

    fn query_batch(env: Env, batch_id: u64) -> UnstakeBatch {
        get_batch(&env, batch_id)
            .unwrap_or_else(|| panic_with_error!(&env, ErrorCode::BatchNotFound))
    }

    fn query_current_batch_id(env: Env) -> u64 {
        get_current_batch_id(&env)
    }

    fn query_partner_share(env: Env, batch_id: u64, partner_id: u64) -> PartnerShare {
        get_partner_share(&env, batch_id, partner_id)
            .unwrap_or_else(|| panic_with_error!(&env, ErrorCode::NoPartnerShareForId))
    }

    fn query_unstake_requests(env: Env) -> Vec<UnstakeRequest> {
        get_unstake_requests(&env)
    }

    fn query_reimbursement_pool(env: Env) -> i128 {
        get_reimbursement_pool(&env)
    }
}

fn empty_batch(batch_id: u64) -> UnstakeBatch {
    UnstakeBatch {
        id: batch_id,
        shares_burned: 0,
        status: BatchStatus::Pending,
        withdrawal_epoch: 0,
        collateral_received: 0,
        undelegated_at: 0,
        claimed_at: 0,
    }
}

fn load_partner(env: &Env, partner_id: u64) -> PartnerAccount {
    match get_partner(env, partner_id) {
        Some(partner) => partner,
        None => {
            log!(env, "Partner Staking: unknown partner id {}", partner_id);
            panic_with_error!(env, ErrorCode::InvalidPartnerId);
        }
    }
}
