//! In-memory fakes for the storage ports, with failure injection.
//!
//! Test-only. Each fake holds its rows behind a `Mutex` and exposes flags
//! that make specific operations fail, so the services' abort and
//! compensation paths can be exercised without a database.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::customer::store::CustomerStore;
use crate::customer::types::CustomerRecord;
use crate::ledger::store::{ActivityRecorder, BalanceRegister, StoreError};
use crate::ledger::types::{NewActivity, NewTransaction};

/// Fake balance register: a single optional row plus failure flags.
#[derive(Debug, Default)]
pub struct MemoryBalance {
    row: Mutex<Option<Decimal>>,
    fail_adjust: AtomicBool,
    reject_next_as_negative: AtomicBool,
    report_already_exists: AtomicBool,
}

impl MemoryBalance {
    /// No balance row yet; `ensure_exists` will create it at zero.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A balance row seeded with the given amount.
    pub fn with_balance(balance: Decimal) -> Self {
        let fake = Self::default();
        *fake.row.lock().unwrap() = Some(balance);
        fake
    }

    /// The stored balance, or `None` if the row was never created.
    pub fn current(&self) -> Option<Decimal> {
        *self.row.lock().unwrap()
    }

    /// Makes every `apply_delta` fail with a backend error.
    pub fn set_fail_adjust(&self, fail: bool) {
        self.fail_adjust.store(fail, Ordering::SeqCst);
    }

    /// Makes the next `apply_delta` report `NegativeBalance`, simulating a
    /// concurrent drain between a caller's read and write. One-shot.
    pub fn set_reject_next_adjust_as_negative(&self) {
        self.reject_next_as_negative.store(true, Ordering::SeqCst);
    }

    /// Makes `ensure_exists` report `AlreadyExists`, simulating losing the
    /// insert race to a concurrent caller.
    pub fn set_report_already_exists(&self, report: bool) {
        self.report_already_exists.store(report, Ordering::SeqCst);
    }
}

#[async_trait]
impl BalanceRegister for MemoryBalance {
    async fn ensure_exists(&self) -> Result<(), StoreError> {
        if self.report_already_exists.load(Ordering::SeqCst) {
            return Err(StoreError::AlreadyExists);
        }
        let mut row = self.row.lock().unwrap();
        if row.is_none() {
            *row = Some(Decimal::ZERO);
        }
        Ok(())
    }

    async fn read(&self) -> Decimal {
        self.row.lock().unwrap().unwrap_or(Decimal::ZERO)
    }

    async fn apply_delta(&self, delta: Decimal) -> Result<Decimal, StoreError> {
        if self.fail_adjust.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected adjust failure".into()));
        }
        if self.reject_next_as_negative.swap(false, Ordering::SeqCst) {
            return Err(StoreError::NegativeBalance);
        }
        let mut row = self.row.lock().unwrap();
        let current = row.ok_or_else(|| StoreError::Backend("balance row missing".into()))?;
        let updated = current + delta;
        if updated < Decimal::ZERO {
            return Err(StoreError::NegativeBalance);
        }
        *row = Some(updated);
        Ok(updated)
    }
}

/// Fake recorder: appends into vectors, with per-sink failure flags.
#[derive(Debug, Default)]
pub struct MemoryRecorder {
    transactions: Mutex<Vec<NewTransaction>>,
    activities: Mutex<Vec<NewActivity>>,
    fail_transactions: AtomicBool,
    fail_activities: AtomicBool,
}

impl MemoryRecorder {
    /// Everything recorded so far, in order.
    pub fn transactions(&self) -> Vec<NewTransaction> {
        self.transactions.lock().unwrap().clone()
    }

    /// Every activity entry logged so far, in order.
    pub fn activities(&self) -> Vec<NewActivity> {
        self.activities.lock().unwrap().clone()
    }

    /// Makes `record_transaction` fail.
    pub fn set_fail_transactions(&self, fail: bool) {
        self.fail_transactions.store(fail, Ordering::SeqCst);
    }

    /// Makes `log_activity` fail.
    pub fn set_fail_activities(&self, fail: bool) {
        self.fail_activities.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ActivityRecorder for MemoryRecorder {
    async fn record_transaction(&self, tx: NewTransaction) -> Result<Uuid, StoreError> {
        if self.fail_transactions.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected transaction failure".into()));
        }
        self.transactions.lock().unwrap().push(tx);
        Ok(Uuid::new_v4())
    }

    async fn log_activity(&self, entry: NewActivity) -> Result<(), StoreError> {
        if self.fail_activities.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected activity failure".into()));
        }
        self.activities.lock().unwrap().push(entry);
        Ok(())
    }
}

/// Fake customer store over a `BTreeMap`, with failure flags per operation.
#[derive(Debug, Default)]
pub struct MemoryCustomers {
    rows: Mutex<BTreeMap<Uuid, CustomerRecord>>,
    fail_inserts: AtomicBool,
    fail_deletes: AtomicBool,
    fail_restores: AtomicBool,
    // `None` means updates never fail; `Some(n)` allows n more successful
    // updates before failing.
    updates_until_fail: Mutex<Option<u32>>,
}

impl MemoryCustomers {
    /// Number of rows currently stored.
    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// A copy of the row with this id, if present.
    pub fn get(&self, id: Uuid) -> Option<CustomerRecord> {
        self.rows.lock().unwrap().get(&id).cloned()
    }

    /// Makes `insert` fail.
    pub fn set_fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    /// Makes `delete` fail.
    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Makes `restore` fail.
    pub fn set_fail_restores(&self, fail: bool) {
        self.fail_restores.store(fail, Ordering::SeqCst);
    }

    /// Allows `n` more successful updates, then fails the rest. Used to let
    /// a primary update land while its compensating revert fails.
    pub fn set_fail_updates_after(&self, n: u32) {
        *self.updates_until_fail.lock().unwrap() = Some(n);
    }
}

#[async_trait]
impl CustomerStore for MemoryCustomers {
    async fn insert(&self, name: &str, amount: Decimal) -> Result<CustomerRecord, StoreError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected insert failure".into()));
        }
        let now = Utc::now();
        let record = CustomerRecord {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            amount,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: Uuid,
        name: &str,
        amount: Decimal,
    ) -> Result<CustomerRecord, StoreError> {
        {
            let mut budget = self.updates_until_fail.lock().unwrap();
            match budget.as_mut() {
                Some(0) => return Err(StoreError::Backend("injected update failure".into())),
                Some(n) => *n -= 1,
                None => {}
            }
        }
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .get_mut(&id)
            .ok_or_else(|| StoreError::Backend(format!("no row {id}")))?;
        row.name = name.to_owned();
        row.amount = amount;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected delete failure".into()));
        }
        self.rows
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::Backend(format!("no row {id}")))
    }

    async fn restore(&self, record: &CustomerRecord) -> Result<(), StoreError> {
        if self.fail_restores.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected restore failure".into()));
        }
        self.rows
            .lock()
            .unwrap()
            .insert(record.id, record.clone());
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<CustomerRecord>, StoreError> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }
}
