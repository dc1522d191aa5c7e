//! Activity log repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use tillbook_core::ledger::NewActivity;

use crate::entities::activity_log;

/// Repository for the append-only activity log.
#[derive(Debug, Clone)]
pub struct ActivityLogRepository {
    db: DatabaseConnection,
}

impl ActivityLogRepository {
    /// Creates a new activity log repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends an activity entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn insert(&self, entry: NewActivity) -> Result<Uuid, DbErr> {
        let id = Uuid::new_v4();
        let row = activity_log::ActiveModel {
            id: Set(id),
            kind: Set(entry.kind.as_str().to_owned()),
            description: Set(entry.description),
            amount: Set(entry.amount),
            reference_id: Set(entry.reference_id),
            created_at: Set(Utc::now().into()),
        };
        row.insert(&self.db).await?;
        Ok(id)
    }

    /// Lists the most recent entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn recent(&self, limit: u64) -> Result<Vec<activity_log::Model>, DbErr> {
        activity_log::Entity::find()
            .order_by_desc(activity_log::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
    }
}
