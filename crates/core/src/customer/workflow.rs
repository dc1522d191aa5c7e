//! Customer deposit workflow.
//!
//! Ordering rule: the row mutation (insert/update/delete) always happens
//! FIRST, then the ledger call, and the row is compensated (deleted,
//! reverted, or restored) when the ledger call fails. Reverting a row is
//! cheaper and more reliable than reversing a ledger mutation, so the row
//! is the side we are willing to undo.

use rust_decimal::Decimal;
use uuid::Uuid;

use tillbook_shared::DeleteRefundPolicy;

use super::error::WorkflowError;
use super::store::CustomerStore;
use super::types::DepositOutcome;
use crate::ledger::store::{ActivityRecorder, BalanceRegister};
use crate::ledger::{ActivityKind, LedgerError, LedgerService};

/// Keeps `Customer.amount` and the wallet balance synchronized.
#[derive(Debug, Clone)]
pub struct CustomerWorkflow<B, R, C> {
    ledger: LedgerService<B, R>,
    customers: C,
    delete_policy: DeleteRefundPolicy,
}

impl<B, R, C> CustomerWorkflow<B, R, C>
where
    B: BalanceRegister,
    R: ActivityRecorder,
    C: CustomerStore,
{
    /// Creates a workflow over the given ledger service and customer store.
    pub const fn new(
        ledger: LedgerService<B, R>,
        customers: C,
        delete_policy: DeleteRefundPolicy,
    ) -> Self {
        Self {
            ledger,
            customers,
            delete_policy,
        }
    }

    /// Creates a customer and draws their deposit from the wallet.
    ///
    /// Sufficiency is pre-checked before anything is written. If the
    /// deduction fails after the row insert, the row is deleted and the
    /// deduction error is surfaced.
    pub async fn create_with_deposit(
        &self,
        name: &str,
        amount: Decimal,
    ) -> Result<DepositOutcome, WorkflowError> {
        let name = Self::validate_name(name)?;
        Self::validate_amount(amount)?;

        if amount > Decimal::ZERO {
            let available = self.ledger.balance().await;
            if available < amount {
                return Err(LedgerError::InsufficientBalance {
                    available,
                    requested: amount,
                }
                .into());
            }
        }

        let customer = self
            .customers
            .insert(name, amount)
            .await
            .map_err(|e| WorkflowError::Store(e.to_string()))?;

        let new_balance = if amount > Decimal::ZERO {
            match self.ledger.deduct(amount, name, Some(customer.id)).await {
                Ok(receipt) => receipt.new_balance,
                Err(cause) => {
                    // The row landed but the wallet did not move.
                    if let Err(detail) = self.customers.delete(customer.id).await {
                        return Err(WorkflowError::ReconciliationRequired {
                            operation: "customer create",
                            cause: cause.to_string(),
                            compensation: "row delete",
                            detail: detail.to_string(),
                        });
                    }
                    return Err(cause.into());
                }
            }
        } else {
            self.ledger.balance().await
        };

        self.ledger
            .note_activity(
                ActivityKind::CustomerAdded,
                format!("Added customer {name} with deposit of {amount}"),
                Some(amount),
                Some(customer.id),
            )
            .await;

        Ok(DepositOutcome {
            customer,
            new_balance,
        })
    }

    /// Renames a customer and/or moves their on-file deposit.
    ///
    /// The deposit delta is settled against the wallet: an increase is
    /// deducted, a decrease is refunded. On ledger failure the row is
    /// reverted to its exact prior `{name, amount}`.
    pub async fn edit_deposit(
        &self,
        id: Uuid,
        new_name: &str,
        new_amount: Decimal,
    ) -> Result<DepositOutcome, WorkflowError> {
        let new_name = Self::validate_name(new_name)?;
        Self::validate_amount(new_amount)?;

        let prior = self
            .customers
            .find(id)
            .await
            .map_err(|e| WorkflowError::Store(e.to_string()))?
            .ok_or(WorkflowError::NotFound(id))?;

        let delta = new_amount - prior.amount;
        if delta > Decimal::ZERO {
            let available = self.ledger.balance().await;
            if available < delta {
                return Err(LedgerError::InsufficientBalance {
                    available,
                    requested: delta,
                }
                .into());
            }
        }

        let updated = self
            .customers
            .update(id, new_name, new_amount)
            .await
            .map_err(|e| WorkflowError::Store(e.to_string()))?;

        let new_balance = if delta == Decimal::ZERO {
            // Name-only edit: no ledger call.
            self.ledger.balance().await
        } else {
            let ledger_result = if delta > Decimal::ZERO {
                self.ledger.deduct(delta, new_name, Some(id)).await
            } else {
                self.ledger.refund(-delta).await
            };
            match ledger_result {
                Ok(receipt) => receipt.new_balance,
                Err(cause) => {
                    if let Err(detail) =
                        self.customers.update(id, &prior.name, prior.amount).await
                    {
                        return Err(WorkflowError::ReconciliationRequired {
                            operation: "customer edit",
                            cause: cause.to_string(),
                            compensation: "row revert",
                            detail: detail.to_string(),
                        });
                    }
                    return Err(cause.into());
                }
            }
        };

        self.ledger
            .note_activity(
                ActivityKind::CustomerUpdated,
                format!("Updated customer {new_name}, deposit now {new_amount}"),
                Some(new_amount),
                Some(id),
            )
            .await;

        Ok(DepositOutcome {
            customer: updated,
            new_balance,
        })
    }

    /// Deletes a customer row.
    ///
    /// What happens to the on-file deposit is governed by the configured
    /// [`DeleteRefundPolicy`]: funds are either kept (treated as already
    /// disbursed) or refunded to the wallet, with the row restored if the
    /// refund fails. Returns the wallet balance after the operation.
    pub async fn delete_customer(&self, id: Uuid) -> Result<Decimal, WorkflowError> {
        let prior = self
            .customers
            .find(id)
            .await
            .map_err(|e| WorkflowError::Store(e.to_string()))?
            .ok_or(WorkflowError::NotFound(id))?;

        self.customers
            .delete(id)
            .await
            .map_err(|e| WorkflowError::Store(e.to_string()))?;

        let new_balance = match self.delete_policy {
            DeleteRefundPolicy::KeepFunds => self.ledger.balance().await,
            DeleteRefundPolicy::RefundToWallet if prior.amount > Decimal::ZERO => {
                match self.ledger.refund(prior.amount).await {
                    Ok(receipt) => receipt.new_balance,
                    Err(cause) => {
                        if let Err(detail) = self.customers.restore(&prior).await {
                            return Err(WorkflowError::ReconciliationRequired {
                                operation: "customer delete",
                                cause: cause.to_string(),
                                compensation: "row restore",
                                detail: detail.to_string(),
                            });
                        }
                        return Err(cause.into());
                    }
                }
            }
            DeleteRefundPolicy::RefundToWallet => self.ledger.balance().await,
        };

        self.ledger
            .note_activity(
                ActivityKind::CustomerRemoved,
                format!("Removed customer {}", prior.name),
                Some(prior.amount),
                Some(id),
            )
            .await;

        Ok(new_balance)
    }

    fn validate_name(name: &str) -> Result<&str, WorkflowError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(WorkflowError::EmptyName);
        }
        Ok(trimmed)
    }

    fn validate_amount(amount: Decimal) -> Result<(), WorkflowError> {
        if amount < Decimal::ZERO {
            return Err(WorkflowError::NegativeAmount(amount));
        }
        Ok(())
    }
}
