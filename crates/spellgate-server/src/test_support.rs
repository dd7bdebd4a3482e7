// ABOUTME: Shared fixtures for router-level tests: a test config, view files on disk, stubbed state.
// ABOUTME: Compiled only under cfg(test).

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use spellgate_gateway::{GrammarChecker, SpellCorrector};

use crate::app_state::{AppState, Gateways, SharedState};
use crate::config::ServerConfig;

pub(crate) const COOKIE_SECRET: &str = "test-cookie-secret";

pub(crate) const LOGIN_HTML: &str = "<html><body>login</body></html>";
pub(crate) const SPELLCHECK_HTML: &str = "<html><body>spellcheck</body></html>";
pub(crate) const USERS_HTML: &str = "<html><body>users</body></html>";

/// Write the three views into `dir`.
pub(crate) fn write_views(dir: &Path) {
    std::fs::write(dir.join("login.html"), LOGIN_HTML).unwrap();
    std::fs::write(dir.join("spellcheck.html"), SPELLCHECK_HTML).unwrap();
    std::fs::write(dir.join("users.html"), USERS_HTML).unwrap();
}

/// A test-environment config rooted at `root`, with `root/views` and `root/public`.
pub(crate) fn test_config(root: &Path) -> ServerConfig {
    let mut config = ServerConfig::from_lookup(|key| match key {
        "NODE_ENV" => Some("test".to_string()),
        "COOKIE_SECRET" => Some(COOKIE_SECRET.to_string()),
        _ => None,
    })
    .unwrap();
    config.views_dir = root.join("views");
    config.static_dir = root.join("public");
    config.upstream_timeout = Duration::from_millis(100);
    config
}

/// State with stub gateways and freshly written views in a kept temp dir.
pub(crate) fn test_state(
    grammar: Arc<dyn GrammarChecker>,
    spelling: Arc<dyn SpellCorrector>,
) -> SharedState {
    let root = tempfile::TempDir::new().unwrap().keep();
    std::fs::create_dir_all(root.join("views")).unwrap();
    std::fs::create_dir_all(root.join("public")).unwrap();
    write_views(&root.join("views"));

    Arc::new(AppState::new(test_config(&root), Gateways::new(grammar, spelling)))
}

/// Helper to extract JSON body from a response.
pub(crate) async fn json_body(resp: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
