//! Transaction repository.

use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::warn;
use uuid::Uuid;

use tillbook_core::ledger::{NewTransaction, TransactionKind};
use tillbook_core::reports::TransactionSummary;

use crate::entities::transactions;

/// Repository for the append-only transaction history.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends a transaction record and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn insert(&self, tx: NewTransaction) -> Result<Uuid, DbErr> {
        let id = Uuid::new_v4();
        let row = transactions::ActiveModel {
            id: Set(id),
            kind: Set(tx.kind.as_str().to_owned()),
            amount: Set(tx.amount),
            customer_id: Set(tx.customer_id),
            status: Set(tx.status.as_str().to_owned()),
            created_at: Set(Utc::now().into()),
        };
        row.insert(&self.db).await?;
        Ok(id)
    }

    /// Lists the most recent transactions, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn recent(&self, limit: u64) -> Result<Vec<transactions::Model>, DbErr> {
        transactions::Entity::find()
            .order_by_desc(transactions::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
    }

    /// Lists all transactions created on the given UTC day, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn on_date(&self, date: NaiveDate) -> Result<Vec<transactions::Model>, DbErr> {
        let start = date.and_time(NaiveTime::MIN).and_utc();
        let end = start + Duration::days(1);

        transactions::Entity::find()
            .filter(transactions::Column::CreatedAt.gte(start.fixed_offset()))
            .filter(transactions::Column::CreatedAt.lt(end.fixed_offset()))
            .order_by_asc(transactions::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Kind/amount summaries for the given UTC day, for the daily statement.
    ///
    /// Rows with an unknown kind tag are skipped with a warning; the CHECK
    /// constraint makes them unreachable through this application.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn summaries_on(&self, date: NaiveDate) -> Result<Vec<TransactionSummary>, DbErr> {
        let rows = self.on_date(date).await?;
        Ok(rows
            .iter()
            .filter_map(|row| match row.kind.parse::<TransactionKind>() {
                Ok(kind) => Some(TransactionSummary {
                    kind,
                    amount: row.amount,
                }),
                Err(e) => {
                    warn!(transaction = %row.id, error = %e, "skipping transaction row");
                    None
                }
            })
            .collect())
    }
}
