//! Types for daily statements.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::ledger::TransactionKind;

/// The slice of a transaction the aggregator needs: kind and magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionSummary {
    /// Transaction kind.
    pub kind: TransactionKind,
    /// Non-negative magnitude.
    pub amount: Decimal,
}

/// One day's statement.
///
/// `opening_balance` is back-calculated from the closing balance and the
/// day's movements. Because the closing figure is the live balance at the
/// time the report is built, a statement for a past day reflects movements
/// made since then; true historical snapshots would need balance history,
/// which is not kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyStats {
    /// The statement day (UTC).
    pub date: NaiveDate,
    /// Balance at the start of the day (derived).
    pub opening_balance: Decimal,
    /// Balance at the end of the day.
    pub closing_balance: Decimal,
    /// Sum of `topup` magnitudes.
    pub total_topups: Decimal,
    /// Sum of `customer_deposit` magnitudes.
    pub total_customer_deposits: Decimal,
    /// Sum of `withdrawal` magnitudes.
    pub total_withdrawals: Decimal,
    /// Sum of `refund` magnitudes.
    pub total_refunds: Decimal,
    /// Number of transactions on the day.
    pub transaction_count: usize,
}

impl DailyStats {
    /// Net signed movement across the day; equals
    /// `closing_balance - opening_balance`.
    #[must_use]
    pub fn net_movement(&self) -> Decimal {
        self.total_topups + self.total_refunds
            - self.total_customer_deposits
            - self.total_withdrawals
    }
}
