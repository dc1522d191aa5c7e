//! Types for wallet ledger operations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of a balance-affecting transaction.
///
/// Amounts are stored as non-negative magnitudes; the direction of the
/// balance movement is implied by the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Funds added to the wallet by the operator.
    Topup,
    /// Funds earmarked for a customer, drawn from the wallet.
    CustomerDeposit,
    /// Funds returned to the wallet when an earmark decreases.
    Refund,
    /// Funds taken out of the wallet by the operator.
    Withdrawal,
}

impl TransactionKind {
    /// The stored string tag for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Topup => "topup",
            Self::CustomerDeposit => "customer_deposit",
            Self::Refund => "refund",
            Self::Withdrawal => "withdrawal",
        }
    }

    /// Whether this kind increases the wallet balance.
    #[must_use]
    pub const fn is_credit(self) -> bool {
        matches!(self, Self::Topup | Self::Refund)
    }

    /// The signed balance change implied by a transaction of this kind.
    #[must_use]
    pub fn signed_delta(self, amount: Decimal) -> Decimal {
        if self.is_credit() { amount } else { -amount }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "topup" => Ok(Self::Topup),
            "customer_deposit" => Ok(Self::CustomerDeposit),
            "refund" => Ok(Self::Refund),
            "withdrawal" => Ok(Self::Withdrawal),
            _ => Err(format!("unknown transaction kind: {s}")),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settlement status of a transaction.
///
/// No asynchronous settlement is modeled today: every transaction is
/// written as `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Settled.
    Completed,
    /// Awaiting settlement (reserved).
    Pending,
    /// Settlement failed (reserved).
    Failed,
}

impl TransactionStatus {
    /// The stored string tag for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Pending => "pending",
            Self::Failed => "failed",
        }
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(Self::Completed),
            "pending" => Ok(Self::Pending),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("unknown transaction status: {s}")),
        }
    }
}

/// Tags for activity-log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// Wallet topped up.
    WalletTopup,
    /// Funds refunded to the wallet.
    WalletRefund,
    /// Funds withdrawn from the wallet.
    WalletWithdrawal,
    /// A customer deposit drawn from the wallet.
    CustomerDeposit,
    /// A customer record was created.
    CustomerAdded,
    /// A customer record was updated.
    CustomerUpdated,
    /// A customer record was deleted.
    CustomerRemoved,
}

impl ActivityKind {
    /// The stored string tag for this activity.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WalletTopup => "wallet_topup",
            Self::WalletRefund => "wallet_refund",
            Self::WalletWithdrawal => "wallet_withdrawal",
            Self::CustomerDeposit => "customer_deposit",
            Self::CustomerAdded => "customer_added",
            Self::CustomerUpdated => "customer_updated",
            Self::CustomerRemoved => "customer_removed",
        }
    }
}

/// Input for appending a transaction record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    /// Transaction kind.
    pub kind: TransactionKind,
    /// Non-negative magnitude.
    pub amount: Decimal,
    /// Weak reference to the customer this movement concerns, if any.
    pub customer_id: Option<Uuid>,
    /// Settlement status.
    pub status: TransactionStatus,
}

/// Input for appending an activity-log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivity {
    /// Activity tag.
    pub kind: ActivityKind,
    /// Human-readable description.
    pub description: String,
    /// Amount involved, if any.
    pub amount: Option<Decimal>,
    /// Related entity, if any.
    pub reference_id: Option<Uuid>,
}

/// Result of a successful ledger mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerReceipt {
    /// The wallet balance after the mutation.
    pub new_balance: Decimal,
    /// Id of the appended transaction record. `None` when the best-effort
    /// record write failed after the balance change had already landed.
    pub transaction_id: Option<Uuid>,
}
