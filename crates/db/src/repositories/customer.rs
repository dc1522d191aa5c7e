//! Customer repository.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use tillbook_core::customer::store::CustomerStore;
use tillbook_core::customer::types::CustomerRecord;
use tillbook_core::ledger::store::StoreError;

use crate::entities::customers;

/// Repository for customer rows.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    db: DatabaseConnection,
}

impl CustomerRepository {
    /// Creates a new customer repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists customers, newest first, optionally only those created on the
    /// given UTC day.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        created_on: Option<NaiveDate>,
    ) -> Result<Vec<CustomerRecord>, DbErr> {
        let mut query = customers::Entity::find();

        if let Some(date) = created_on {
            let start = date.and_time(NaiveTime::MIN).and_utc();
            let end = start + Duration::days(1);
            query = query
                .filter(customers::Column::CreatedAt.gte(start.fixed_offset()))
                .filter(customers::Column::CreatedAt.lt(end.fixed_offset()));
        }

        let rows = query
            .order_by_desc(customers::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(to_record).collect())
    }

    /// Sum and count of on-file deposits for customers created on the given
    /// UTC day.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn deposits_on(&self, date: NaiveDate) -> Result<(Decimal, usize), DbErr> {
        let rows = self.list(Some(date)).await?;
        let total = rows.iter().map(|c| c.amount).sum();
        Ok((total, rows.len()))
    }
}

fn to_record(model: customers::Model) -> CustomerRecord {
    CustomerRecord {
        id: model.id,
        name: model.name,
        amount: model.amount,
        created_at: model.created_at.to_utc(),
        updated_at: model.updated_at.to_utc(),
    }
}

fn backend(e: DbErr) -> StoreError {
    StoreError::Backend(e.to_string())
}

#[async_trait]
impl CustomerStore for CustomerRepository {
    async fn insert(&self, name: &str, amount: Decimal) -> Result<CustomerRecord, StoreError> {
        let now = Utc::now().into();
        let row = customers::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_owned()),
            amount: Set(amount),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let inserted = row.insert(&self.db).await.map_err(backend)?;
        Ok(to_record(inserted))
    }

    async fn update(
        &self,
        id: Uuid,
        name: &str,
        amount: Decimal,
    ) -> Result<CustomerRecord, StoreError> {
        let existing = customers::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(backend)?
            .ok_or_else(|| StoreError::Backend(format!("no customer row {id}")))?;

        let mut active: customers::ActiveModel = existing.into();
        active.name = Set(name.to_owned());
        active.amount = Set(amount);
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await.map_err(backend)?;
        Ok(to_record(updated))
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let existing = customers::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(backend)?
            .ok_or_else(|| StoreError::Backend(format!("no customer row {id}")))?;

        existing.delete(&self.db).await.map_err(backend)?;
        Ok(())
    }

    async fn restore(&self, record: &CustomerRecord) -> Result<(), StoreError> {
        let row = customers::ActiveModel {
            id: Set(record.id),
            name: Set(record.name.clone()),
            amount: Set(record.amount),
            created_at: Set(record.created_at.fixed_offset()),
            updated_at: Set(record.updated_at.fixed_offset()),
        };
        row.insert(&self.db).await.map_err(backend)?;
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<CustomerRecord>, StoreError> {
        let row = customers::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(backend)?;
        Ok(row.map(to_record))
    }
}
