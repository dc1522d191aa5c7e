//! Database-backed recorder port.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use tillbook_core::ledger::store::{ActivityRecorder, StoreError};
use tillbook_core::ledger::{NewActivity, NewTransaction};

use super::activity::ActivityLogRepository;
use super::transaction::TransactionRepository;

/// Implements the recorder port over the transaction and activity-log
/// repositories.
#[derive(Debug, Clone)]
pub struct DbRecorder {
    transactions: TransactionRepository,
    activities: ActivityLogRepository,
}

impl DbRecorder {
    /// Creates a recorder over the given connection.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            transactions: TransactionRepository::new(db.clone()),
            activities: ActivityLogRepository::new(db),
        }
    }
}

#[async_trait]
impl ActivityRecorder for DbRecorder {
    async fn record_transaction(&self, tx: NewTransaction) -> Result<Uuid, StoreError> {
        self.transactions
            .insert(tx)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn log_activity(&self, entry: NewActivity) -> Result<(), StoreError> {
        self.activities
            .insert(entry)
            .await
            .map(|_| ())
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}
