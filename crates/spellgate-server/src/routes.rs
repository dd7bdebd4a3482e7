// ABOUTME: Route definitions and middleware stack for the spellgate HTTP server.
// ABOUTME: Binds each path to one handler, mounts static assets at `/`, and layers CORS, logging and security headers.

use axum::Router;
use axum::extract::Request;
use axum::http::header::{
    REFERRER_POLICY, STRICT_TRANSPORT_SECURITY, X_CONTENT_TYPE_OPTIONS, X_DNS_PREFETCH_CONTROL,
    X_FRAME_OPTIONS,
};
use axum::http::{HeaderName, HeaderValue, Method};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use tower_http::cors::{AllowHeaders, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::SharedState;
use crate::config::NodeEnv;
use crate::error::ErrorReport;
use crate::views;

/// Path under which an externally supplied API router is nested.
pub const API_BASE: &str = "/api";

/// Build the complete Axum router with all routes and shared state.
///
/// `api` is an optional router owned by another component; it is nested
/// under [`API_BASE`] and shares the middleware stack.
pub fn create_router(state: SharedState, api: Option<Router>) -> Router {
    let config = &state.config;

    let mut router = Router::new()
        .route("/", get(views::login_view))
        .route("/users", get(views::users_view))
        .route("/symspell/load/spellcheck", get(views::spellcheck_view))
        .route("/symspell/spellcheck", post(api::spelling::correct_spelling))
        .route("/textgears/spellcheck", post(api::grammar::check_grammar))
        .with_state(state.clone());

    if let Some(api) = api {
        router = router.nest(API_BASE, api);
    }

    // Scripts and styles; anything not matched above falls through to disk.
    router = router.fallback_service(ServeDir::new(&config.static_dir));

    if config.node_env != NodeEnv::Test {
        router = router.layer(middleware::from_fn(log_errors));
    }

    match config.node_env {
        NodeEnv::Development => router = router.layer(TraceLayer::new_for_http()),
        NodeEnv::Production => {
            for (name, value) in security_headers() {
                router = router.layer(SetResponseHeaderLayer::if_not_present(
                    name,
                    HeaderValue::from_static(value),
                ));
            }
        }
        NodeEnv::Test => {}
    }

    router.layer(build_cors_layer(&config.cors_origins))
}

/// Build the CORS layer for the browser origins allowed to call us.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(AllowHeaders::mirror_request())
}

/// Conservative response headers applied in production.
fn security_headers() -> [(HeaderName, &'static str); 7] {
    [
        (X_CONTENT_TYPE_OPTIONS, "nosniff"),
        (X_FRAME_OPTIONS, "SAMEORIGIN"),
        (REFERRER_POLICY, "no-referrer"),
        (STRICT_TRANSPORT_SECURITY, "max-age=15552000; includeSubDomains"),
        (X_DNS_PREFETCH_CONTROL, "off"),
        (HeaderName::from_static("x-download-options"), "noopen"),
        (HeaderName::from_static("x-permitted-cross-domain-policies"), "none"),
    ]
}

/// Log every error response produced by a handler, with its source chain.
async fn log_errors(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    if let Some(report) = response.extensions().get::<ErrorReport>() {
        tracing::error!(
            %method,
            %path,
            status = response.status().as_u16(),
            error = %report.0,
            "request failed"
        );
    }

    response
}
