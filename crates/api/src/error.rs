//! Maps domain errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use tillbook_core::customer::WorkflowError;
use tillbook_core::ledger::LedgerError;
use tillbook_shared::AppError;

/// Converts a ledger error into the application error taxonomy.
#[must_use]
pub fn from_ledger(e: LedgerError) -> AppError {
    match e {
        LedgerError::NonPositiveAmount(_) => AppError::Validation(e.to_string()),
        LedgerError::InsufficientBalance { .. } => AppError::InsufficientBalance(e.to_string()),
        LedgerError::BalanceWrite(msg) => AppError::Database(msg),
    }
}

/// Converts a workflow error into the application error taxonomy.
#[must_use]
pub fn from_workflow(e: WorkflowError) -> AppError {
    match e {
        WorkflowError::EmptyName | WorkflowError::NegativeAmount(_) => {
            AppError::Validation(e.to_string())
        }
        WorkflowError::NotFound(id) => AppError::NotFound(format!("customer {id}")),
        WorkflowError::Ledger(inner) => from_ledger(inner),
        WorkflowError::Store(msg) => AppError::Database(msg),
        WorkflowError::ReconciliationRequired { .. } => AppError::Unreconciled(e.to_string()),
    }
}

/// Renders an application error as the standard JSON envelope.
pub fn error_response(e: &AppError) -> Response {
    let status = StatusCode::from_u16(e.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(error = %e, "request failed");
    }
    (
        status,
        Json(json!({
            "error": e.error_code(),
            "message": e.to_string(),
        })),
    )
        .into_response()
}
