//! Wallet routes: balance, top-up, withdrawal, refund.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{error_response, from_ledger};
use crate::routes::ledger_service;
use crate::AppState;
use tillbook_core::ledger::LedgerReceipt;
use tillbook_shared::AppError;
use tillbook_shared::types::money::{round_money, validate_positive_amount};

/// Creates the wallet routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/wallet/balance", get(get_balance))
        .route("/wallet/topup", post(top_up))
        .route("/wallet/withdraw", post(withdraw))
        .route("/wallet/refund", post(refund))
}

/// Request body for a top-up or refund.
#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    /// Amount to move.
    pub amount: Decimal,
}

/// Request body for a withdrawal.
#[derive(Debug, Deserialize)]
pub struct WithdrawRequest {
    /// Amount to withdraw.
    pub amount: Decimal,
    /// Optional reason, kept in the activity log.
    #[serde(default)]
    pub description: Option<String>,
}

/// Response for the balance endpoint.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    /// Current wallet balance.
    pub balance: Decimal,
}

/// Response for a successful wallet mutation.
#[derive(Debug, Serialize)]
pub struct ReceiptResponse {
    /// Wallet balance after the mutation.
    pub balance: Decimal,
    /// Id of the appended transaction record; `null` when the record write
    /// failed after the balance change landed.
    pub transaction_id: Option<Uuid>,
}

impl From<LedgerReceipt> for ReceiptResponse {
    fn from(receipt: LedgerReceipt) -> Self {
        Self {
            balance: receipt.new_balance,
            transaction_id: receipt.transaction_id,
        }
    }
}

/// Rejects non-positive amounts at the boundary and normalizes the rest to
/// two decimal places.
fn normalized_amount(amount: Decimal) -> Result<Decimal, Response> {
    validate_positive_amount(amount)
        .map_err(|msg| error_response(&AppError::Validation(msg)))?;
    Ok(round_money(amount))
}

/// GET /wallet/balance
#[axum::debug_handler]
async fn get_balance(State(state): State<AppState>) -> impl IntoResponse {
    let balance = ledger_service(&state).balance().await;
    (StatusCode::OK, Json(BalanceResponse { balance }))
}

/// POST /wallet/topup
#[axum::debug_handler]
async fn top_up(
    State(state): State<AppState>,
    Json(body): Json<AmountRequest>,
) -> impl IntoResponse {
    let amount = match normalized_amount(body.amount) {
        Ok(a) => a,
        Err(response) => return response,
    };
    match ledger_service(&state).top_up(amount).await {
        Ok(receipt) => {
            (StatusCode::OK, Json(ReceiptResponse::from(receipt))).into_response()
        }
        Err(e) => error_response(&from_ledger(e)),
    }
}

/// POST /wallet/withdraw
#[axum::debug_handler]
async fn withdraw(
    State(state): State<AppState>,
    Json(body): Json<WithdrawRequest>,
) -> impl IntoResponse {
    let amount = match normalized_amount(body.amount) {
        Ok(a) => a,
        Err(response) => return response,
    };
    let description = body.description.as_deref().unwrap_or("owner cash-out");
    match ledger_service(&state).withdraw(amount, description).await {
        Ok(receipt) => {
            (StatusCode::OK, Json(ReceiptResponse::from(receipt))).into_response()
        }
        Err(e) => error_response(&from_ledger(e)),
    }
}

/// POST /wallet/refund
#[axum::debug_handler]
async fn refund(
    State(state): State<AppState>,
    Json(body): Json<AmountRequest>,
) -> impl IntoResponse {
    let amount = match normalized_amount(body.amount) {
        Ok(a) => a,
        Err(response) => return response,
    };
    match ledger_service(&state).refund(amount).await {
        Ok(receipt) => {
            (StatusCode::OK, Json(ReceiptResponse::from(receipt))).into_response()
        }
        Err(e) => error_response(&from_ledger(e)),
    }
}
