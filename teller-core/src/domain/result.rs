//! Result and error types for the core library

use rust_decimal::Decimal;
use thiserror::Error;

/// Core library error type
///
/// Every failure in the core is returned as one of these variants; the core
/// never aborts the process. Wrong PIN and unknown account both surface as
/// `AuthFailure` so a caller cannot probe for account existence.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown account: {0}")]
    UnknownAccount(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(Decimal),

    #[error("Insufficient funds in {account}")]
    InsufficientFunds { account: String },

    #[error("Invalid credentials")]
    AuthFailure,

    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    #[error("Corrupt snapshot: {0}")]
    CorruptState(String),

    #[error("Credential error: {0}")]
    Credential(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an unknown-account error
    pub fn unknown_account(id: impl Into<String>) -> Self {
        Self::UnknownAccount(id.into())
    }

    /// Create a corrupt-state error
    pub fn corrupt_state(msg: impl Into<String>) -> Self {
        Self::CorruptState(msg.into())
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
