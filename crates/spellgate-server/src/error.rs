// ABOUTME: Closed set of handler errors and their mapping onto HTTP status codes.
// ABOUTME: Every error leaves as `{"error": <message>}` and is reported to the logging middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use spellgate_gateway::GatewayError;
use thiserror::Error;

/// Errors a handler can raise.
#[derive(Debug, Error)]
pub enum AppError {
    /// Intentionally raised with an explicit client-facing status.
    #[error("{message}")]
    Route { status: StatusCode, message: String },

    #[error(transparent)]
    Upstream(#[from] GatewayError),

    #[error("upstream did not respond within {}ms", .after.as_millis())]
    UpstreamTimeout { after: Duration },

    #[error("request body field `{field}` is missing or invalid")]
    Validation { field: &'static str },
}

impl AppError {
    pub fn route(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Route {
            status,
            message: message.into(),
        }
    }

    /// Status code table: a route error keeps its own status, everything
    /// except a timeout falls back to 400.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Route { status, .. } => *status,
            AppError::Upstream(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Attached to error responses so the logging layer can report the failure
/// with its full source chain.
#[derive(Debug, Clone)]
pub struct ErrorReport(pub Arc<String>);

impl ErrorReport {
    fn from_error(err: &AppError) -> Self {
        let mut chain = format!("{}", err);
        let mut source = std::error::Error::source(err);
        while let Some(cause) = source {
            chain.push_str(": ");
            chain.push_str(&cause.to_string());
            source = std::error::Error::source(cause);
        }
        Self(Arc::new(chain))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let report = ErrorReport::from_error(&self);
        let body = ErrorBody {
            error: self.to_string(),
        };

        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(report);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(resp: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn route_error_keeps_its_status() {
        let resp = AppError::route(StatusCode::NOT_FOUND, "no such page").into_response();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await, serde_json::json!({ "error": "no such page" }));
    }

    #[tokio::test]
    async fn upstream_error_defaults_to_bad_request() {
        let err = AppError::from(GatewayError::Rejected("Invalid key".to_string()));
        let resp = err.into_response();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert!(json["error"].as_str().unwrap().contains("Invalid key"));
    }

    #[tokio::test]
    async fn validation_error_names_field() {
        let resp = AppError::Validation { field: "text" }.into_response();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert!(json["error"].as_str().unwrap().contains("`text`"));
    }

    #[tokio::test]
    async fn timeout_maps_to_gateway_timeout() {
        let resp = AppError::UpstreamTimeout {
            after: Duration::from_millis(50),
        }
        .into_response();

        assert_eq!(resp.status(), StatusCode::GATEWAY_TIMEOUT);
        let json = body_json(resp).await;
        assert_eq!(json["error"], "upstream did not respond within 50ms");
    }

    #[test]
    fn response_carries_error_report() {
        let resp = AppError::route(StatusCode::IM_A_TEAPOT, "short and stout").into_response();
        let report = resp.extensions().get::<ErrorReport>().unwrap();
        assert_eq!(report.0.as_str(), "short and stout");
    }

    #[test]
    fn error_report_includes_source_chain() {
        let err = AppError::from(GatewayError::InvalidResponse("missing errors".to_string()));
        let report = ErrorReport::from_error(&err);
        assert!(report.0.contains("missing errors"));
    }
}
