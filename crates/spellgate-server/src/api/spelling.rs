// ABOUTME: POST /symspell/spellcheck, forwarding text to the fuzzy spelling gateway.
// ABOUTME: Answers 201 with the corrected text as a JSON string.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::api::body::CorrectionRequest;
use crate::api::call_upstream;
use crate::app_state::{SPELLING_LANGUAGE, SharedState};
use crate::error::AppError;

/// POST /symspell/spellcheck - Correct the spelling of `text`.
///
/// Empty text answers 201 `""` without consulting the corrector.
pub async fn correct_spelling(
    State(state): State<SharedState>,
    body: CorrectionRequest,
) -> Result<(StatusCode, Json<String>), AppError> {
    if body.text.is_empty() {
        return Ok((StatusCode::CREATED, Json(String::new())));
    }

    let spelling = &state.gateways.spelling;
    let correction = call_upstream(
        state.config.upstream_timeout,
        spelling.correct(&body.text, SPELLING_LANGUAGE),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(correction.output)))
}
