//! Storage port for customer rows.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use super::types::CustomerRecord;
use crate::ledger::store::StoreError;

/// CRUD access to customer rows.
///
/// The workflow owns these rows; the ledger service only observes the
/// customer ids and amounts it is handed.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Inserts a new customer row and returns it.
    async fn insert(&self, name: &str, amount: Decimal) -> Result<CustomerRecord, StoreError>;

    /// Updates name and amount of an existing row and returns it.
    async fn update(
        &self,
        id: Uuid,
        name: &str,
        amount: Decimal,
    ) -> Result<CustomerRecord, StoreError>;

    /// Deletes a customer row.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;

    /// Re-inserts a previously deleted row with its original id and
    /// timestamps. Used only to compensate a failed ledger call after a
    /// delete.
    async fn restore(&self, record: &CustomerRecord) -> Result<(), StoreError>;

    /// Looks a customer up by id.
    async fn find(&self, id: Uuid) -> Result<Option<CustomerRecord>, StoreError>;
}

#[async_trait]
impl<T: CustomerStore + ?Sized> CustomerStore for Arc<T> {
    async fn insert(&self, name: &str, amount: Decimal) -> Result<CustomerRecord, StoreError> {
        (**self).insert(name, amount).await
    }

    async fn update(
        &self,
        id: Uuid,
        name: &str,
        amount: Decimal,
    ) -> Result<CustomerRecord, StoreError> {
        (**self).update(id, name, amount).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        (**self).delete(id).await
    }

    async fn restore(&self, record: &CustomerRecord) -> Result<(), StoreError> {
        (**self).restore(record).await
    }

    async fn find(&self, id: Uuid) -> Result<Option<CustomerRecord>, StoreError> {
        (**self).find(id).await
    }
}
