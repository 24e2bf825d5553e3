//! API handlers - parameter defaults, validation and simulation runs.
//!
//! All `/api/v1` handlers answer through [`ApiResponse::ok`] or
//! [`ApiErrorResponse`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::envelope::{ApiErrorResponse, ApiResponse};
use crate::config::validation::validate_physical_ranges;
use crate::config::FieldConfig;
use crate::engine;
use crate::types::{
    SimulationError, SimulationParameters, SimulationResult, SimulationSeries, SimulationSummary,
};

// ============================================================================
// API State
// ============================================================================

/// Shared state for API handlers
#[derive(Clone)]
pub struct ApiState {
    /// Loaded configuration (read-only for the life of the server)
    pub config: Arc<FieldConfig>,
}

impl ApiState {
    pub fn new(config: FieldConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

// ============================================================================
// Request / Response Types
// ============================================================================

/// Shape of the result in a simulate response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultLayout {
    /// One record per day
    #[default]
    Samples,
    /// Seven aligned columns
    Series,
}

#[derive(Debug, Default, Deserialize)]
pub struct SimulateQuery {
    #[serde(default)]
    pub layout: ResultLayout,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ResultBody {
    Samples(SimulationResult),
    Series(SimulationSeries),
}

#[derive(Debug, Serialize)]
pub struct SimulationResponse {
    pub field: String,
    pub parameters: SimulationParameters,
    pub summary: SimulationSummary,
    pub result: ResultBody,
}

#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health
pub async fn health(State(state): State<ApiState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "field": state.config.field.name,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /api/v1/parameters
pub async fn get_parameters(State(state): State<ApiState>) -> Response {
    ApiResponse::ok(&state.config.parameters)
}

/// POST /api/v1/parameters/validate
pub async fn validate_parameters(
    body: Result<Json<SimulationParameters>, JsonRejection>,
) -> Response {
    let Json(params) = match body {
        Ok(body) => body,
        Err(rejection) => return ApiErrorResponse::bad_request(rejection.body_text()),
    };

    let errors = params.violations();
    let warnings = validate_physical_ranges(&params)
        .iter()
        .map(ToString::to_string)
        .collect();

    ApiResponse::ok(ValidationResponse {
        valid: errors.is_empty(),
        errors,
        warnings,
    })
}

/// POST /api/v1/simulate?layout=samples|series
///
/// Runs on the blocking pool under the configured timeout.
pub async fn simulate(
    State(state): State<ApiState>,
    Query(query): Query<SimulateQuery>,
    body: Result<Json<SimulationParameters>, JsonRejection>,
) -> Response {
    let Json(params) = match body {
        Ok(body) => body,
        Err(rejection) => return ApiErrorResponse::bad_request(rejection.body_text()),
    };

    let field = state.config.field.name.clone();
    let options = state.config.engine;
    let limit = Duration::from_secs(state.config.server.run_timeout_secs);
    let started = Instant::now();

    let run = {
        let field = field.clone();
        let params = params.clone();
        tokio::task::spawn_blocking(move || engine::simulate_field(&field, &params, options))
    };

    // A run cannot be interrupted; on timeout it finishes in the
    // background and its result is dropped.
    let result = match tokio::time::timeout(limit, run).await {
        Err(_) => {
            warn!(field = %field, limit_secs = limit.as_secs(), "Simulation run timed out");
            return ApiErrorResponse::timeout(format!(
                "simulation exceeded {}s limit",
                limit.as_secs()
            ));
        }
        Ok(Err(join_error)) => {
            warn!(error = %join_error, "Simulation worker failed");
            return ApiErrorResponse::internal("simulation worker failed");
        }
        Ok(Ok(Err(SimulationError::InvalidParameter(errors)))) => {
            return ApiErrorResponse::invalid_parameters(&errors);
        }
        Ok(Ok(Err(e))) => {
            warn!(error = %e, "Simulation failed");
            return ApiErrorResponse::computation(e.to_string());
        }
        Ok(Ok(Ok(result))) => result,
    };

    info!(
        field = %field,
        days = result.len(),
        elapsed_ms = started.elapsed().as_millis(),
        "Simulation served"
    );

    let summary = result.summary();
    let result = match query.layout {
        ResultLayout::Samples => ResultBody::Samples(result),
        ResultLayout::Series => ResultBody::Series(result.series()),
    };

    ApiResponse::ok(SimulationResponse {
        field,
        parameters: params,
        summary,
        result,
    })
}

/// Fallback for unmatched paths.
pub async fn not_found() -> Response {
    ApiErrorResponse::not_found("no such endpoint")
}
