use soroban_fixed_point_math::FixedPoint;

use tidal::{
    constants::BPS_DENOMINATOR,
    error::{ErrorCode, TidalResult},
    math::safe_math::SafeMath,
};

/// Shares needed today to cover `total_staked` of principal at the
/// current ledger rate. Rounds up so principal is never eaten into by
/// a harvest.
pub fn principal_shares(
    total_staked: i128,
    ledger_total_shares: i128,
    ledger_total_pooled: i128,
) -> TidalResult<i128> {
    total_staked
        .safe_mul(ledger_total_shares)?
        .safe_div_ceil(ledger_total_pooled)
}

/// A partner's slice of the batch proceeds at the realized rate,
/// rounded down.
pub fn batch_share_to_collateral(
    shares_unstaked: i128,
    collateral_received: i128,
    shares_burned: i128,
) -> TidalResult<i128> {
    shares_unstaked
        .fixed_mul_floor(collateral_received, shares_burned)
        .ok_or(ErrorCode::MathError)
}

/// Reimbursement of the protocol fee baked into `collateral`. The
/// payout was computed after the pool's fee, so the reimbursal rate is
/// applied over the fee-adjusted denominator.
pub fn reimbursal_bonus(
    collateral: i128,
    fee_reimbursal_bps: u32,
    pool_fee_bps: u32,
) -> TidalResult<i128> {
    let denominator = BPS_DENOMINATOR.safe_sub(pool_fee_bps as i128)?;
    collateral
        .fixed_mul_floor(fee_reimbursal_bps as i128, denominator)
        .ok_or(ErrorCode::MathError)
}
