//! Activity feed routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use tracing::error;

use crate::error::error_response;
use crate::AppState;
use tillbook_db::ActivityLogRepository;
use tillbook_shared::AppError;

const DEFAULT_LIMIT: u64 = 20;
const MAX_LIMIT: u64 = 100;

/// Creates the activity feed routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/activity", get(list_activity))
}

/// Query parameters for the activity feed.
#[derive(Debug, Deserialize)]
pub struct ListActivityQuery {
    /// Maximum number of entries to return.
    pub limit: Option<u64>,
}

/// GET /activity
#[axum::debug_handler]
async fn list_activity(
    State(state): State<AppState>,
    Query(query): Query<ListActivityQuery>,
) -> impl IntoResponse {
    let repo = ActivityLogRepository::new((*state.db).clone());
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);

    match repo.recent(limit).await {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(e) => {
            error!(error = %e, "failed to list activity");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}
