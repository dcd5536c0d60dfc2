use soroban_sdk::Env;

use tidal::{
    error::{ErrorCode, TidalResult},
    math::safe_math::SafeMath,
    validate,
};

use crate::math;
use crate::storage::{PartnerAccount, PartnerStatus, UnstakeBatch};

/// Harvests the share surplus above the partner's principal-equivalent
/// value into `batch`. Returns the number of shares moved; zero means
/// nothing was due and the partner was left untouched.
pub fn harvest_due_rewards(
    env: &Env,
    partner: &mut PartnerAccount,
    batch: &mut UnstakeBatch,
    ledger_total_shares: i128,
    ledger_total_pooled: i128,
) -> TidalResult<i128> {
    validate!(
        env,
        partner.status == PartnerStatus::Active,
        ErrorCode::InactivePartner,
        "partner {} is inactive",
        partner.id
    )?;

    if ledger_total_pooled == 0 {
        return Ok(0);
    }

    let principal_shares =
        math::principal_shares(partner.total_staked, ledger_total_shares, ledger_total_pooled)?;
    if partner.total_shares <= principal_shares {
        return Ok(0);
    }

    let reward = partner.total_shares.safe_sub(principal_shares)?;

    validate!(
        env,
        partner.disbursal_remaining > 0,
        ErrorCode::DisbursalsExhausted,
        "partner {} has no disbursals remaining",
        partner.id
    )?;

    partner.total_shares = principal_shares;
    partner.disbursal_remaining -= 1;
    batch.shares_burned = batch.shares_burned.safe_add(reward)?;

    Ok(reward)
}
