pub const DAY_IN_LEDGERS: u32 = 17280;

pub const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;

/// Denominator for all fee rates expressed in basis points.
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Upper bound for the protocol fee skimmed on reward accrual (10%).
pub const MAX_FEE_BPS: u32 = 1_000;

/// Upper bound for the instant-withdrawal fee (5%).
pub const MAX_INSTANT_FEE_BPS: u32 = 500;
