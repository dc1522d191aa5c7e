//! Types for the customer deposit workflow.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A depositor record.
///
/// `amount` is the customer's current on-file deposit: the authoritative
/// record of how much of the shared wallet balance is earmarked for this
/// customer. Always non-negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// Customer id.
    pub id: Uuid,
    /// Customer name (non-empty).
    pub name: String,
    /// Current on-file deposit.
    pub amount: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Result of a successful deposit workflow operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepositOutcome {
    /// The customer row after the operation.
    pub customer: CustomerRecord,
    /// The wallet balance after the operation.
    pub new_balance: Decimal,
}
