use soroban_fixed_point_math::FixedPoint;

use tidal::error::{ErrorCode, TidalResult};

/// Shares minted for `amount` of collateral at the current rate.
/// Rounds down in the pool's favor; a fresh ledger mints 1:1.
pub fn collateral_to_shares(
    amount: i128,
    total_shares: i128,
    total_pooled: i128,
) -> TidalResult<i128> {
    if total_shares == 0 {
        return Ok(amount);
    }

    amount
        .fixed_mul_floor(total_shares, total_pooled)
        .ok_or(ErrorCode::MathError)
}

/// Collateral owed for `share_amount` at the current rate, rounded
/// down. A mint followed by an immediate redemption can never return
/// more collateral than was deposited.
pub fn shares_to_collateral(
    share_amount: i128,
    total_shares: i128,
    total_pooled: i128,
) -> TidalResult<i128> {
    if total_shares == 0 {
        return Ok(0);
    }

    share_amount
        .fixed_mul_floor(total_pooled, total_shares)
        .ok_or(ErrorCode::MathError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(100, 0, 0, 100; "genesis mints one to one")]
    #[test_case(100, 1000, 1000, 100; "flat rate")]
    #[test_case(100, 1000, 1100, 90; "appreciated rate rounds down")]
    #[test_case(1, 1000, 3000, 0; "dust mints nothing")]
    fn mint_rounding(amount: i128, shares: i128, pooled: i128, expected: i128) {
        assert_eq!(collateral_to_shares(amount, shares, pooled), Ok(expected));
    }

    #[test_case(100, 1000, 1100, 110; "redeem at appreciated rate")]
    #[test_case(33, 1000, 1000, 33; "redeem at flat rate")]
    #[test_case(50, 0, 0, 0; "empty ledger owes nothing")]
    fn redeem_rounding(shares: i128, total_shares: i128, pooled: i128, expected: i128) {
        assert_eq!(shares_to_collateral(shares, total_shares, pooled), Ok(expected));
    }

    #[test]
    fn mint_then_redeem_never_profits() {
        for amount in [1i128, 7, 99, 1_000, 123_456] {
            let (total_shares, total_pooled) = (10_000i128, 13_337i128);
            let minted = collateral_to_shares(amount, total_shares, total_pooled).unwrap();
            let redeemed = shares_to_collateral(
                minted,
                total_shares + minted,
                total_pooled + amount,
            )
            .unwrap();
            assert!(redeemed <= amount);
        }
    }
}
