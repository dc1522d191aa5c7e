//! Error types for wallet ledger operations.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors from ledger mutations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// The requested amount is zero or negative.
    #[error("amount must be greater than zero, got {0}")]
    NonPositiveAmount(Decimal),

    /// The wallet cannot cover the requested deduction.
    #[error("insufficient wallet balance: available {available}, requested {requested}")]
    InsufficientBalance {
        /// Balance at the time of the check.
        available: Decimal,
        /// Amount that was requested.
        requested: Decimal,
    },

    /// The balance adjustment itself failed. Fatal: nothing was recorded.
    #[error("wallet balance write failed: {0}")]
    BalanceWrite(String),
}
