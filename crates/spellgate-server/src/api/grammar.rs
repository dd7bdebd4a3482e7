// ABOUTME: POST /textgears/spellcheck, forwarding text to the grammar gateway.
// ABOUTME: Empty text answers 204 without an outbound call; otherwise the error list is returned verbatim.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::api::body::CorrectionRequest;
use crate::api::call_upstream;
use crate::app_state::SharedState;
use crate::error::AppError;

/// POST /textgears/spellcheck - Grammar-check `text`.
pub async fn check_grammar(
    State(state): State<SharedState>,
    body: CorrectionRequest,
) -> Result<Response, AppError> {
    if body.text.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let grammar = &state.gateways.grammar;
    let errors = call_upstream(state.config.upstream_timeout, grammar.check(&body.text)).await?;
    tracing::debug!(
        provider = grammar.provider_name(),
        errors = errors.len(),
        "grammar check answered"
    );

    Ok(Json(errors).into_response())
}
