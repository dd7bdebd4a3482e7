// ABOUTME: Static HTML views served verbatim from the views directory.
// ABOUTME: The users view is gated by the signed session cookie and redirects to `/` without one.

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::http::header::LOCATION;
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::app_state::{AppState, SharedState};
use crate::error::AppError;
use crate::session::SessionStatus;

pub const LOGIN_VIEW: &str = "login.html";
pub const SPELLCHECK_VIEW: &str = "spellcheck.html";
pub const USERS_VIEW: &str = "users.html";

/// Stream `file` from the views directory, honouring conditional and range headers.
async fn send_view(state: &AppState, file: &str, req: Request) -> Result<Response, AppError> {
    let path = state.config.views_dir.join(file);
    let response = match ServeFile::new(&path).oneshot(req).await {
        Ok(response) => response,
        Err(never) => match never {},
    };

    if response.status() == StatusCode::NOT_FOUND {
        return Err(AppError::route(
            StatusCode::NOT_FOUND,
            format!("view {} not found", file),
        ));
    }

    Ok(response.map(Body::new))
}

/// GET / - Login page.
pub async fn login_view(
    State(state): State<SharedState>,
    req: Request,
) -> Result<Response, AppError> {
    send_view(&state, LOGIN_VIEW, req).await
}

/// GET /symspell/load/spellcheck - Spell-check page.
pub async fn spellcheck_view(
    State(state): State<SharedState>,
    req: Request,
) -> Result<Response, AppError> {
    send_view(&state, SPELLCHECK_VIEW, req).await
}

/// GET /users - Users page, only with a valid session cookie.
pub async fn users_view(
    State(state): State<SharedState>,
    req: Request,
) -> Result<Response, AppError> {
    match state.session.verify(req.headers()) {
        SessionStatus::Valid(_) => send_view(&state, USERS_VIEW, req).await,
        status => {
            tracing::debug!(?status, "no usable session cookie, redirecting to login");
            Ok(redirect_to_login())
        }
    }
}

fn redirect_to_login() -> Response {
    (StatusCode::FOUND, [(LOCATION, "/")]).into_response()
}
