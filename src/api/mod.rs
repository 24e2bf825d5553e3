//! REST API module using Axum
//!
//! Thin HTTP layer over the simulation engine. Each request carries a full
//! parameter record and gets back a complete result; the server keeps no
//! state between requests beyond its configuration.

pub mod envelope;
pub mod handlers;
mod routes;

pub use handlers::ApiState;

use axum::http::{header, Method};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Build a CORS layer that is restrictive by default (same-origin only).
///
/// Set `GASFIELD_CORS_ORIGINS` to a comma-separated list of allowed origins
/// when a dashboard is served from elsewhere.
fn build_cors_layer() -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    match std::env::var("GASFIELD_CORS_ORIGINS") {
        Ok(origins) => {
            let allowed: Vec<_> = origins
                .split(',')
                .filter_map(|o| o.trim().parse().ok())
                .collect();
            tracing::info!(origins = %origins, "CORS: allowing configured origins");
            layer.allow_origin(allowed)
        }
        Err(_) => layer,
    }
}

/// Create the complete application router.
pub fn create_app(state: ApiState) -> Router {
    let body_limit = state.config.server.max_body_bytes;

    Router::new()
        .nest("/api/v1", routes::api_routes(state.clone()))
        .merge(routes::health_routes(state))
        .fallback(handlers::not_found)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer())
}
