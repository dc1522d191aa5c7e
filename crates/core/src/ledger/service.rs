//! Ledger service: serialized access to the shared wallet balance.
//!
//! Every mutation follows the same sequence:
//!
//! `START -> BALANCE_READ -> {INSUFFICIENT -> ABORT} | {OK ->
//! BALANCE_ADJUSTED -> TRANSACTION_RECORDED (best-effort) ->
//! ACTIVITY_LOGGED (best-effort) -> DONE}`
//!
//! `BALANCE_ADJUSTED` is the commit point: once the balance write lands the
//! operation has taken effect, and the remaining steps never block or
//! reverse it. A failed transaction record after that point is logged and
//! reported through [`LedgerReceipt::transaction_id`] being `None`; it is a
//! reconciliation concern for reporting, not a rollback trigger.
//!
//! The underlying storage offers no cross-table transactions, so no step
//! here takes a lock. Sufficiency is checked at read time and re-validated
//! at write time by the balance register's atomic increment.

use rust_decimal::Decimal;
use tracing::warn;
use uuid::Uuid;

use super::error::LedgerError;
use super::store::{ActivityRecorder, BalanceRegister, StoreError};
use super::types::{
    ActivityKind, LedgerReceipt, NewActivity, NewTransaction, TransactionKind, TransactionStatus,
};

/// Orchestrates wallet mutations against the balance register and the
/// activity recorder. The only component allowed to move the balance.
#[derive(Debug, Clone)]
pub struct LedgerService<B, R> {
    balance: B,
    recorder: R,
}

impl<B: BalanceRegister, R: ActivityRecorder> LedgerService<B, R> {
    /// Creates a ledger service over the given ports.
    pub const fn new(balance: B, recorder: R) -> Self {
        Self { balance, recorder }
    }

    /// Returns the current wallet balance (fail-soft; see
    /// [`BalanceRegister::read`]).
    pub async fn balance(&self) -> Decimal {
        self.balance.read().await
    }

    /// Adds funds to the wallet and records a `topup` transaction.
    pub async fn top_up(&self, amount: Decimal) -> Result<LedgerReceipt, LedgerError> {
        self.credit(TransactionKind::Topup, amount, ActivityKind::WalletTopup)
            .await
    }

    /// Returns funds to the wallet and records a `refund` transaction.
    /// Used when a customer's on-file deposit decreases.
    pub async fn refund(&self, amount: Decimal) -> Result<LedgerReceipt, LedgerError> {
        self.credit(TransactionKind::Refund, amount, ActivityKind::WalletRefund)
            .await
    }

    /// Draws funds from the wallet for a customer deposit.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientBalance`] when the wallet cannot
    /// cover `amount`; the balance is left unchanged.
    pub async fn deduct(
        &self,
        amount: Decimal,
        description: &str,
        customer_id: Option<Uuid>,
    ) -> Result<LedgerReceipt, LedgerError> {
        self.debit(
            TransactionKind::CustomerDeposit,
            amount,
            customer_id,
            ActivityKind::CustomerDeposit,
            format!("Customer deposit: {description}"),
        )
        .await
    }

    /// Takes funds out of the wallet (owner cash-out), recorded as a
    /// `withdrawal`. Same sufficiency rules as [`Self::deduct`].
    pub async fn withdraw(
        &self,
        amount: Decimal,
        description: &str,
    ) -> Result<LedgerReceipt, LedgerError> {
        self.debit(
            TransactionKind::Withdrawal,
            amount,
            None,
            ActivityKind::WalletWithdrawal,
            format!("Withdrawal: {description}"),
        )
        .await
    }

    /// Logs an activity entry on behalf of a higher-level workflow.
    /// Failures are swallowed: the log is best-effort observability.
    pub async fn note_activity(
        &self,
        kind: ActivityKind,
        description: String,
        amount: Option<Decimal>,
        reference_id: Option<Uuid>,
    ) {
        let entry = NewActivity {
            kind,
            description,
            amount,
            reference_id,
        };
        if let Err(e) = self.recorder.log_activity(entry).await {
            warn!(error = %e, activity = kind.as_str(), "activity log write failed");
        }
    }

    async fn credit(
        &self,
        kind: TransactionKind,
        amount: Decimal,
        activity: ActivityKind,
    ) -> Result<LedgerReceipt, LedgerError> {
        Self::validate_amount(amount)?;
        self.ensure_wallet().await?;

        let new_balance = self
            .balance
            .apply_delta(amount)
            .await
            .map_err(|e| LedgerError::BalanceWrite(e.to_string()))?;

        // Commit point reached; everything below is best-effort.
        let transaction_id = self
            .record(NewTransaction {
                kind,
                amount,
                customer_id: None,
                status: TransactionStatus::Completed,
            })
            .await;
        self.note_activity(
            activity,
            format!("{kind} of {amount}"),
            Some(amount),
            None,
        )
        .await;

        Ok(LedgerReceipt {
            new_balance,
            transaction_id,
        })
    }

    async fn debit(
        &self,
        kind: TransactionKind,
        amount: Decimal,
        customer_id: Option<Uuid>,
        activity: ActivityKind,
        description: String,
    ) -> Result<LedgerReceipt, LedgerError> {
        Self::validate_amount(amount)?;
        self.ensure_wallet().await?;

        let available = self.balance.read().await;
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                available,
                requested: amount,
            });
        }

        let new_balance = match self.balance.apply_delta(-amount).await {
            Ok(balance) => balance,
            // A concurrent debit can drain the wallet between our read and
            // our write; the register re-validates at write time.
            Err(StoreError::NegativeBalance) => {
                let available = self.balance.read().await;
                return Err(LedgerError::InsufficientBalance {
                    available,
                    requested: amount,
                });
            }
            Err(e) => return Err(LedgerError::BalanceWrite(e.to_string())),
        };

        let transaction_id = self
            .record(NewTransaction {
                kind,
                amount,
                customer_id,
                status: TransactionStatus::Completed,
            })
            .await;
        self.note_activity(activity, description, Some(amount), customer_id)
            .await;

        Ok(LedgerReceipt {
            new_balance,
            transaction_id,
        })
    }

    async fn ensure_wallet(&self) -> Result<(), LedgerError> {
        match self.balance.ensure_exists().await {
            Ok(()) | Err(StoreError::AlreadyExists) => Ok(()),
            Err(e) => Err(LedgerError::BalanceWrite(e.to_string())),
        }
    }

    /// Appends the transaction record. Non-fatal once the balance write has
    /// landed: failures are logged and reported as `None`.
    async fn record(&self, tx: NewTransaction) -> Option<Uuid> {
        match self.recorder.record_transaction(tx).await {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(error = %e, "transaction record failed after balance adjustment");
                None
            }
        }
    }

    fn validate_amount(amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount(amount));
        }
        Ok(())
    }
}
