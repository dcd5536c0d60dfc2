use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ErrorCode {
    AlreadyInitialized = 1,
    Unauthorized = 2,
    MathError = 3,
    InvalidAmount = 4,
    InvalidFee = 5,
    InvalidIndex = 6,
    InsufficientBalance = 7,
    Paused = 8,
    TransferFailed = 9,
    NotYetClaimable = 10,
    RequestNotFound = 11,
    InvalidPartnerId = 12,
    InactivePartner = 13,
    DuplicatePartnerWallet = 14,
    NoPartnerShareForId = 15,
    AlreadyDisbursed = 16,
    NothingToUndelegate = 17,
    BatchNotFound = 18,
    InvalidBatchStatus = 19,
    DisbursalsExhausted = 20,
    InsufficientInstantLiquidity = 21,
    TooEarly = 22,
    RateNotSynced = 23,
}

pub type TidalResult<T = ()> = Result<T, ErrorCode>;
