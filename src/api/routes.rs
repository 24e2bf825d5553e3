//! API route definitions
//!
//! - /health - liveness
//! - /api/v1/parameters - configured default parameter record
//! - /api/v1/parameters/validate - rule check without running
//! - /api/v1/simulate - run the engine

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{self, ApiState};

/// Versioned API routes, nested under `/api/v1`.
pub fn api_routes(state: ApiState) -> Router {
    Router::new()
        .route("/parameters", get(handlers::get_parameters))
        .route("/parameters/validate", post(handlers::validate_parameters))
        .route("/simulate", post(handlers::simulate))
        .with_state(state)
}

/// Health endpoint at root level
pub fn health_routes(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .with_state(state)
}
