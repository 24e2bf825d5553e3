//! JSON envelope for `/api/v1` replies.
//!
//! A simulation reply carries the run under `data`; a rejected run carries a
//! stable machine code (`INVALID_PARAMETER`, `COMPUTATION_ERROR`, `TIMEOUT`,
//! ...) under `error`. Both carry `meta` with the service version and the
//! time the reply was produced, so a dashboard can label cached charts.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Serialize;

/// Service version and reply timestamp (RFC 3339, UTC).
#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub timestamp: String,
    pub version: &'static str,
}

impl ResponseMeta {
    fn now() -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// `{ "data": T, "meta": .. }`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 with `data` as the payload.
    pub fn ok(data: T) -> Response {
        let body = Self {
            data,
            meta: ResponseMeta::now(),
        };
        (StatusCode::OK, axum::Json(body)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// `{ "error": { "code", "message" }, "meta": .. }`
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ErrorDetail,
    pub meta: ResponseMeta,
}

impl ApiErrorResponse {
    fn reply(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
        let body = Self {
            error: ErrorDetail {
                code,
                message: message.into(),
            },
            meta: ResponseMeta::now(),
        };
        (status, axum::Json(body)).into_response()
    }

    /// Unknown route.
    pub fn not_found(msg: impl Into<String>) -> Response {
        Self::reply(StatusCode::NOT_FOUND, "NOT_FOUND", msg)
    }

    /// Body is not a complete parameter record.
    pub fn bad_request(msg: impl Into<String>) -> Response {
        Self::reply(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg)
    }

    /// Record parsed but broke one or more simulation rules.
    pub fn invalid_parameters(errors: &[String]) -> Response {
        Self::reply(StatusCode::BAD_REQUEST, "INVALID_PARAMETER", errors.join("; "))
    }

    /// A quantity left the finite range mid-run.
    pub fn computation(msg: impl Into<String>) -> Response {
        Self::reply(StatusCode::UNPROCESSABLE_ENTITY, "COMPUTATION_ERROR", msg)
    }

    /// Run exceeded `server.run_timeout_secs`.
    pub fn timeout(msg: impl Into<String>) -> Response {
        Self::reply(StatusCode::GATEWAY_TIMEOUT, "TIMEOUT", msg)
    }

    /// Worker task failed to join.
    pub fn internal(msg: impl Into<String>) -> Response {
        Self::reply(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ok_response_shape() {
        let resp = ApiResponse::ok(serde_json::json!({"hello": "world"}));
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(v.get("data").is_some());
        assert!(v.get("meta").is_some());
        assert_eq!(v["meta"]["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_error_response_shape() {
        let resp = ApiErrorResponse::not_found("gone");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v["error"]["code"], "NOT_FOUND");
        assert_eq!(v["error"]["message"], "gone");
    }

    #[tokio::test]
    async fn test_invalid_parameters_joins_messages() {
        let resp = ApiErrorResponse::invalid_parameters(&[
            "drillTime = 0 must be > 0 days".to_string(),
            "numRigs = -1 cannot be negative".to_string(),
        ]);
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v["error"]["code"], "INVALID_PARAMETER");
        let message = v["error"]["message"].as_str().unwrap();
        assert!(message.contains("drillTime") && message.contains("numRigs"));
    }
}
