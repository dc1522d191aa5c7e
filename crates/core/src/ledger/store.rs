//! Storage ports for the wallet ledger.
//!
//! The ledger service reaches persistence only through these traits. The db
//! crate implements them against Postgres; tests use in-memory fakes.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use super::types::{NewActivity, NewTransaction};

/// Errors surfaced by storage ports.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The row already exists (e.g. a concurrent `ensure_exists` won the
    /// insert race). Callers treat this as success.
    #[error("row already exists")]
    AlreadyExists,

    /// The write was rejected because it would make the balance negative.
    /// Emitted by implementations that re-validate at write time.
    #[error("write would make the balance negative")]
    NegativeBalance,

    /// Any other storage failure.
    #[error("storage error: {0}")]
    Backend(String),
}

/// The singleton wallet balance row.
#[async_trait]
pub trait BalanceRegister: Send + Sync {
    /// Creates the balance row at zero if it does not exist. Idempotent;
    /// a duplicate insert from a concurrent caller is not an error.
    async fn ensure_exists(&self) -> Result<(), StoreError>;

    /// Returns the current balance. Fails soft: implementations log read
    /// errors and return zero rather than propagating them.
    async fn read(&self) -> Decimal;

    /// Applies `balance += delta` and returns the new balance.
    ///
    /// Implementations prefer an atomic server-side increment that
    /// re-validates non-negativity at write time, returning
    /// [`StoreError::NegativeBalance`] when the delta would overdraw the
    /// wallet.
    async fn apply_delta(&self, delta: Decimal) -> Result<Decimal, StoreError>;
}

/// Append-only sink for transactions and activity-log entries.
#[async_trait]
pub trait ActivityRecorder: Send + Sync {
    /// Appends a transaction record, returning its id. Errors surface to
    /// the ledger service, which decides whether they are fatal.
    async fn record_transaction(&self, tx: NewTransaction) -> Result<Uuid, StoreError>;

    /// Appends an activity-log entry. Callers swallow errors: the log is
    /// observability, not a correctness dependency.
    async fn log_activity(&self, entry: NewActivity) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: BalanceRegister + ?Sized> BalanceRegister for Arc<T> {
    async fn ensure_exists(&self) -> Result<(), StoreError> {
        (**self).ensure_exists().await
    }

    async fn read(&self) -> Decimal {
        (**self).read().await
    }

    async fn apply_delta(&self, delta: Decimal) -> Result<Decimal, StoreError> {
        (**self).apply_delta(delta).await
    }
}

#[async_trait]
impl<T: ActivityRecorder + ?Sized> ActivityRecorder for Arc<T> {
    async fn record_transaction(&self, tx: NewTransaction) -> Result<Uuid, StoreError> {
        (**self).record_transaction(tx).await
    }

    async fn log_activity(&self, entry: NewActivity) -> Result<(), StoreError> {
        (**self).log_activity(entry).await
    }
}
