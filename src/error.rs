//! Error types for the ATM ledger.

use crate::decimal::Decimal2;
use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, AtmError>;

/// Errors that can occur while operating on the ledger or its store.
#[derive(Error, Debug)]
pub enum AtmError {
    /// Failed to read or write the store file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store header could not be parsed
    #[error("Malformed store: {message}")]
    MalformedStore { message: String },

    /// Deposit or withdrawal amount was zero or negative
    #[error("Invalid amount: {0}")]
    InvalidAmount(Decimal2),

    /// Withdrawal exceeded the current balance
    #[error("Insufficient funds: requested {requested}, balance {balance}")]
    InsufficientFunds {
        requested: Decimal2,
        balance: Decimal2,
    },

    /// Supplied PIN did not match the stored PIN
    #[error("PIN does not match")]
    PinMismatch,

    /// New PIN and its confirmation differed
    #[error("New PIN and confirmation do not match")]
    ConfirmationMismatch,
}
