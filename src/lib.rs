pub mod config;
pub mod core;
pub mod features;
pub mod server;

use axum::Router;
use axum::middleware;
use axum::routing::get;

use crate::features::candidates::{handle_get_candidate_data, handle_healthcheck};
use crate::server::{AppState, apply_cors_headers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handle_healthcheck))
        .route("/getCandidateData", get(handle_get_candidate_data))
        .layer(middleware::map_response(apply_cors_headers))
        .with_state(state)
}
