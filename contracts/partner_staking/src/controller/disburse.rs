use soroban_sdk::Env;

use tidal::{
    error::{ErrorCode, TidalResult},
    validate,
};

use crate::math;
use crate::storage::{PartnerShare, UnstakeBatch};

pub struct Disbursal {
    pub collateral: i128,
    pub bonus: i128,
}

/// Values one partner's payout for a claimed batch. The bonus is capped
/// by whatever is left in the reimbursement pool.
pub fn compute_disbursal(
    env: &Env,
    share: &PartnerShare,
    batch: &UnstakeBatch,
    fee_reimbursal_bps: u32,
    pool_fee_bps: u32,
    reimbursement_pool: i128,
) -> TidalResult<Disbursal> {
    validate!(
        env,
        share.disbursed_at == 0,
        ErrorCode::AlreadyDisbursed,
        "share already disbursed for batch {}",
        batch.id
    )?;

    let collateral = math::batch_share_to_collateral(
        share.shares_unstaked,
        batch.collateral_received,
        batch.shares_burned,
    )?;

    let mut bonus = math::reimbursal_bonus(collateral, fee_reimbursal_bps, pool_fee_bps)?;
    if bonus > reimbursement_pool {
        bonus = reimbursement_pool;
    }

    Ok(Disbursal { collateral, bonus })
}
