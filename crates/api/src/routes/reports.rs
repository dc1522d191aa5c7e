//! Daily statement routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::error_response;
use crate::routes::ledger_service;
use crate::AppState;
use tillbook_core::reports::{DailyStats, daily_stats};
use tillbook_db::{CustomerRepository, TransactionRepository};
use tillbook_shared::AppError;

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/reports/daily", get(get_daily_report))
}

/// Query parameters for the daily statement.
#[derive(Debug, Deserialize)]
pub struct DailyReportQuery {
    /// Statement day (UTC); defaults to today.
    pub date: Option<NaiveDate>,
}

/// Daily statement response.
#[derive(Debug, Serialize)]
pub struct DailyReportResponse {
    /// The statement figures.
    #[serde(flatten)]
    pub stats: DailyStats,
    /// Number of customers added on the day.
    pub new_customers: usize,
    /// Total on-file deposits of customers added on the day.
    pub new_customer_deposits: Decimal,
    /// Average on-file deposit of customers added on the day.
    pub average_customer_deposit: Decimal,
}

/// GET /reports/daily
#[axum::debug_handler]
async fn get_daily_report(
    State(state): State<AppState>,
    Query(query): Query<DailyReportQuery>,
) -> impl IntoResponse {
    let date = query.date.unwrap_or_else(|| chrono::Utc::now().date_naive());
    let db = (*state.db).clone();

    let summaries = match TransactionRepository::new(db.clone()).summaries_on(date).await {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "failed to load transactions for report");
            return error_response(&AppError::Database(e.to_string()));
        }
    };

    let (new_customer_deposits, new_customers) =
        match CustomerRepository::new(db).deposits_on(date).await {
            Ok(totals) => totals,
            Err(e) => {
                error!(error = %e, "failed to load customers for report");
                return error_response(&AppError::Database(e.to_string()));
            }
        };

    let closing_balance = ledger_service(&state).balance().await;
    let stats = daily_stats(date, closing_balance, &summaries);
    let average_customer_deposit = if new_customers == 0 {
        Decimal::ZERO
    } else {
        new_customer_deposits / Decimal::from(new_customers as u64)
    };

    (
        StatusCode::OK,
        Json(DailyReportResponse {
            stats,
            new_customers,
            new_customer_deposits,
            average_customer_deposit,
        }),
    )
        .into_response()
}
