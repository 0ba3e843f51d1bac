use axum::Json;
use axum::extract::{Query, State};
use serde_json::{Value, json};

use crate::core::error::AppError;
use crate::features::candidates::dto::LookupRequest;
use crate::server::AppState;

pub async fn handle_get_candidate_data(
    State(state): State<AppState>,
    Query(request): Query<LookupRequest>,
) -> Result<Json<Value>, AppError> {
    state
        .candidates
        .get_candidate_data(request)
        .await
        .map(Json)
}

pub async fn handle_healthcheck() -> Result<Json<Value>, AppError> {
    Ok(Json(json!({ "status": "ok" })))
}
