//! Error types for the customer deposit workflow.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::ledger::LedgerError;

/// Errors from customer deposit operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowError {
    /// Customer name is empty or whitespace.
    #[error("customer name is required")]
    EmptyName,

    /// Deposit amount is negative.
    #[error("deposit amount cannot be negative, got {0}")]
    NegativeAmount(Decimal),

    /// No customer row with this id.
    #[error("customer {0} not found")]
    NotFound(Uuid),

    /// A ledger operation failed (and any compensation succeeded).
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A customer row read/write failed before any ledger call.
    #[error("customer store error: {0}")]
    Store(String),

    /// A compensating action itself failed after a primary step had already
    /// failed. The wallet and the customer rows may now disagree; this must
    /// reach the operator, not be retried silently.
    #[error(
        "{operation} failed ({cause}) and the compensating {compensation} also failed \
         ({detail}); manual reconciliation required"
    )]
    ReconciliationRequired {
        /// The workflow operation that failed.
        operation: &'static str,
        /// Why the primary step failed.
        cause: String,
        /// The compensating action that was attempted.
        compensation: &'static str,
        /// Why the compensation failed.
        detail: String,
    },
}
