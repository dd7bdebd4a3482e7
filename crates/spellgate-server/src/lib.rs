// ABOUTME: HTTP server for spellgate: grammar and spelling proxies plus cookie-gated static views.
// ABOUTME: Uses Axum with injected gateway clients held in shared, read-only state.

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod session;
pub mod views;

#[cfg(test)]
pub(crate) mod test_support;

pub use app_state::{AppState, Gateways, SharedState};
pub use config::{ConfigError, NodeEnv, ServerConfig};
pub use error::AppError;
pub use routes::create_router;
pub use server::serve;
pub use session::{SessionGuard, SessionStatus};
