//! API route definitions.

use axum::Router;
use tillbook_core::customer::CustomerWorkflow;
use tillbook_core::ledger::LedgerService;
use tillbook_db::{CustomerRepository, DbRecorder, WalletBalanceRepository};

use crate::AppState;

pub mod activity;
pub mod customers;
pub mod health;
pub mod reports;
pub mod transactions;
pub mod wallet;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(wallet::routes())
        .merge(customers::routes())
        .merge(transactions::routes())
        .merge(activity::routes())
        .merge(reports::routes())
}

/// Builds a ledger service over the request's database connection.
pub(crate) fn ledger_service(
    state: &AppState,
) -> LedgerService<WalletBalanceRepository, DbRecorder> {
    let db = (*state.db).clone();
    LedgerService::new(WalletBalanceRepository::new(db.clone()), DbRecorder::new(db))
}

/// Builds the customer deposit workflow over the request's database
/// connection.
pub(crate) fn customer_workflow(
    state: &AppState,
) -> CustomerWorkflow<WalletBalanceRepository, DbRecorder, CustomerRepository> {
    let db = (*state.db).clone();
    CustomerWorkflow::new(
        ledger_service(state),
        CustomerRepository::new(db),
        state.config.wallet.delete_refund_policy,
    )
}
