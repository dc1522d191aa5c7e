//! Customer routes: create/edit/delete with wallet settlement, and listing.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::error::{error_response, from_workflow};
use crate::routes::customer_workflow;
use crate::AppState;
use tillbook_core::customer::{CustomerRecord, DepositOutcome};
use tillbook_db::CustomerRepository;
use tillbook_shared::AppError;
use tillbook_shared::types::money::{round_money, validate_non_negative_amount};

/// Creates the customer routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers))
        .route("/customers", post(create_customer))
        .route("/customers/{id}", put(update_customer))
        .route("/customers/{id}", delete(delete_customer))
}

/// Request body for creating or updating a customer.
#[derive(Debug, Deserialize)]
pub struct CustomerRequest {
    /// Customer name.
    pub name: String,
    /// On-file deposit amount.
    pub amount: Decimal,
}

/// Query parameters for listing customers.
#[derive(Debug, Deserialize)]
pub struct ListCustomersQuery {
    /// When true, only customers created today (UTC).
    #[serde(default)]
    pub today: bool,
}

/// Response for a customer mutation.
#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    /// The customer row after the operation.
    pub customer: CustomerRecord,
    /// Wallet balance after the operation.
    pub balance: Decimal,
}

impl From<DepositOutcome> for CustomerResponse {
    fn from(outcome: DepositOutcome) -> Self {
        Self {
            customer: outcome.customer,
            balance: outcome.new_balance,
        }
    }
}

/// Response for a customer deletion.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Wallet balance after the deletion.
    pub balance: Decimal,
}

/// Rejects negative deposits at the boundary and normalizes the rest to two
/// decimal places.
fn normalized_deposit(amount: Decimal) -> Result<Decimal, Response> {
    validate_non_negative_amount(amount)
        .map_err(|msg| error_response(&AppError::Validation(msg)))?;
    Ok(round_money(amount))
}

/// GET /customers
#[axum::debug_handler]
async fn list_customers(
    State(state): State<AppState>,
    Query(query): Query<ListCustomersQuery>,
) -> impl IntoResponse {
    let repo = CustomerRepository::new((*state.db).clone());
    let created_on = query.today.then(|| chrono::Utc::now().date_naive());

    match repo.list(created_on).await {
        Ok(customers) => (StatusCode::OK, Json(customers)).into_response(),
        Err(e) => {
            error!(error = %e, "failed to list customers");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// POST /customers
#[axum::debug_handler]
async fn create_customer(
    State(state): State<AppState>,
    Json(body): Json<CustomerRequest>,
) -> impl IntoResponse {
    let amount = match normalized_deposit(body.amount) {
        Ok(a) => a,
        Err(response) => return response,
    };
    match customer_workflow(&state)
        .create_with_deposit(&body.name, amount)
        .await
    {
        Ok(outcome) => {
            (StatusCode::CREATED, Json(CustomerResponse::from(outcome))).into_response()
        }
        Err(e) => error_response(&from_workflow(e)),
    }
}

/// PUT /customers/{id}
#[axum::debug_handler]
async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<CustomerRequest>,
) -> impl IntoResponse {
    let amount = match normalized_deposit(body.amount) {
        Ok(a) => a,
        Err(response) => return response,
    };
    match customer_workflow(&state)
        .edit_deposit(id, &body.name, amount)
        .await
    {
        Ok(outcome) => {
            (StatusCode::OK, Json(CustomerResponse::from(outcome))).into_response()
        }
        Err(e) => error_response(&from_workflow(e)),
    }
}

/// DELETE /customers/{id}
#[axum::debug_handler]
async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match customer_workflow(&state).delete_customer(id).await {
        Ok(balance) => (StatusCode::OK, Json(DeleteResponse { balance })).into_response(),
        Err(e) => error_response(&from_workflow(e)),
    }
}
