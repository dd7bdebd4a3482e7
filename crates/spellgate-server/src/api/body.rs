// ABOUTME: Request body shared by both checking endpoints: `{ "text": string }`.
// ABOUTME: Accepts JSON or urlencoded form bodies; anything malformed becomes a validation error on `text`.

use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde::Deserialize;

use crate::error::AppError;

/// Text submitted for checking. May be empty.
#[derive(Debug, Clone, Deserialize)]
pub struct CorrectionRequest {
    pub text: String,
}

impl<S> FromRequest<S> for CorrectionRequest
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        let parsed = if is_form {
            Form::<Self>::from_request(req, state)
                .await
                .map(|Form(body)| body)
                .map_err(|rejection| rejection.body_text())
        } else {
            Json::<Self>::from_request(req, state)
                .await
                .map(|Json(body)| body)
                .map_err(|rejection| rejection.body_text())
        };

        parsed.map_err(|reason| {
            tracing::debug!(%reason, "rejected request body");
            AppError::Validation { field: "text" }
        })
    }
}
