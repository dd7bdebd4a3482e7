// ABOUTME: Shared application state for the spellgate HTTP server.
// ABOUTME: Bundles the immutable config, the injected gateways, and the session guard.

use std::sync::Arc;

use spellgate_gateway::{
    GatewayError, GrammarChecker, SpellCorrector, SymSpellCorrector, TextGearsClient,
};

use crate::config::ServerConfig;
use crate::session::SessionGuard;

/// Language tag the spelling dictionary is trained under and looked up with.
pub const SPELLING_LANGUAGE: &str = "en";

/// The outbound capabilities handlers call. Constructed once at startup and
/// injected, so tests can substitute stubs.
#[derive(Clone)]
pub struct Gateways {
    pub grammar: Arc<dyn GrammarChecker>,
    pub spelling: Arc<dyn SpellCorrector>,
}

impl Gateways {
    pub fn new(grammar: Arc<dyn GrammarChecker>, spelling: Arc<dyn SpellCorrector>) -> Self {
        Self { grammar, spelling }
    }

    /// Build the production gateways: TextGears for grammar and an in-memory
    /// SymSpell corrector, trained from `config.dictionary` when one is set.
    pub fn from_config(config: &ServerConfig) -> Result<Self, GatewayError> {
        let grammar = TextGearsClient::with_base_url(
            config.textgears_api_key.clone(),
            config.textgears_base_url.clone(),
        );

        let mut spelling = SymSpellCorrector::new();
        match &config.dictionary {
            Some(path) => {
                spelling.train_from_json_file(path, SPELLING_LANGUAGE)?;
            }
            None => {
                tracing::warn!(
                    "SPELLCHECK_DICTIONARY not set; spelling corrections will echo their input"
                );
            }
        }

        Ok(Self::new(Arc::new(grammar), Arc::new(spelling)))
    }
}

/// Shared application state accessible by all Axum handlers.
pub struct AppState {
    pub config: ServerConfig,
    pub gateways: Gateways,
    pub session: SessionGuard,
}

/// Type alias for the Arc-wrapped state used with Axum's State extractor.
pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: ServerConfig, gateways: Gateways) -> Self {
        let session = SessionGuard::from_props(&config.cookie);
        Self {
            config,
            gateways,
            session,
        }
    }
}
