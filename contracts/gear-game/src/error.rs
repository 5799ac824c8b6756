use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: only {role} can perform this action")]
    Unauthorized { role: String },

    #[error("contract is paused")]
    Paused,

    #[error("contract is not paused")]
    NotPaused,

    #[error("zero amount not allowed")]
    ZeroAmount,

    #[error("threshold {threshold} exceeds 100 percent")]
    InvalidThreshold { threshold: u8 },

    #[error("expected {expected} mint rates, got {got}")]
    InvalidRateCount { expected: usize, got: usize },

    #[error("insufficient {gear} balance: have {balance}, need {required}")]
    InsufficientBalance {
        gear: String,
        balance: String,
        required: String,
    },

    #[error("a burn of {gear} is already pending under request {request_id}")]
    DuplicatePendingRequest { gear: String, request_id: u64 },

    #[error("request {request_id} is unknown or already resolved")]
    UnknownOrAlreadyResolvedRequest { request_id: u64 },

    #[error("burning is configured for {expected}, not {got}")]
    WrongGearToBurn { expected: String, got: String },

    #[error("insufficient payment: mint costs {required}, got {sent}")]
    InsufficientPayment { required: String, sent: String },

    #[error("not enough supply left in public mint: {available} units available")]
    PublicSupplyExhausted { available: String },

    #[error("no funds sent")]
    NoFundsSent,

    #[error("must send exactly one coin denomination")]
    MultipleDenomsSent,

    #[error("wrong denomination: expected {expected}, got {got}")]
    WrongDenom { expected: String, got: String },

    #[error("unexpected funds sent with this message")]
    UnexpectedFunds,

    #[error("oracle fee balance too low: need {needed}, have {available}")]
    InsufficientOracleFunds { needed: String, available: String },

    #[error("nothing to withdraw")]
    NothingToWithdraw,

    #[error("overflow in arithmetic operation")]
    Overflow,
}
