use thiserror::Error;

/// Rejection of caller-supplied data before it reaches the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Type must be income or expense")]
    InvalidType(String),

    #[error("Amount must be a number: {0}")]
    InvalidAmount(String),

    #[error("Amount must not be negative")]
    NegativeAmount,

    #[error("Amount is too large: {0}")]
    AmountTooLarge(String),

    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),

    #[error("Year out of range: {0}")]
    InvalidYear(i32),

    #[error("Invalid request body: {0}")]
    MalformedBody(String),
}
