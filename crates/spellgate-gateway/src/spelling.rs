// ABOUTME: Fuzzy spell-check gateway backed by the symspell crate's symmetric-delete index.
// ABOUTME: Holds one dictionary per language tag; untrained languages pass text through unchanged.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use symspell::{SymSpell, UnicodeStringStrategy};

use crate::error::GatewayError;

const MAX_EDIT_DISTANCE: i64 = 2;

/// Result of one correction pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    pub input: String,
    pub output: String,
}

/// Anything that can correct the spelling of free-form text in a given language.
#[async_trait]
pub trait SpellCorrector: Send + Sync {
    async fn correct(&self, text: &str, language: &str) -> Result<Correction, GatewayError>;

    fn provider_name(&self) -> &str;
}

/// In-memory SymSpell corrector. Dictionaries are loaded once at startup via
/// [`SymSpellCorrector::train`] and are read-only afterwards.
#[derive(Default)]
pub struct SymSpellCorrector {
    dictionaries: HashMap<String, SymSpell<UnicodeStringStrategy>>,
}

impl SymSpellCorrector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `terms` to the dictionary for `language`, each with frequency 1.
    /// Returns how many terms were accepted.
    pub fn train<I, S>(&mut self, terms: I, language: &str) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let dictionary = self.dictionaries.entry(language.to_string()).or_default();

        let mut loaded = 0;
        for term in terms {
            let term = term.as_ref().trim();
            // The line format is "<term> <count>"; a term with inner whitespace would split.
            if term.is_empty() || term.contains(char::is_whitespace) {
                continue;
            }
            if dictionary.load_dictionary_line(&format!("{} 1", term), 0, 1, " ") {
                loaded += 1;
            }
        }

        tracing::info!(language, loaded, "spelling dictionary trained");
        loaded
    }

    /// Train from a JSON object whose keys are the dictionary terms
    /// (e.g. `{"apple": 1, "banana": 1}`).
    pub fn train_from_json_file(
        &mut self,
        path: &Path,
        language: &str,
    ) -> Result<usize, GatewayError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            GatewayError::Dictionary(format!("failed to read {}: {}", path.display(), e))
        })?;
        let words: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&raw)
            .map_err(|e| {
                GatewayError::Dictionary(format!(
                    "{} is not a JSON object of words: {}",
                    path.display(),
                    e
                ))
            })?;

        Ok(self.train(words.keys(), language))
    }

    pub fn is_trained(&self, language: &str) -> bool {
        self.dictionaries.contains_key(language)
    }
}

#[async_trait]
impl SpellCorrector for SymSpellCorrector {
    async fn correct(&self, text: &str, language: &str) -> Result<Correction, GatewayError> {
        let output = match self.dictionaries.get(language) {
            Some(dictionary) if !text.trim().is_empty() => lookup(dictionary, text)?,
            _ => text.to_string(),
        };

        Ok(Correction {
            input: text.to_string(),
            output,
        })
    }

    fn provider_name(&self) -> &str {
        "symspell"
    }
}

/// Best compound suggestion for `text`, or `text` itself when nothing matches.
///
/// The index is read-only here, so a panic inside the lookup cannot leave it
/// half-updated; it is reported as [`GatewayError::Lookup`].
fn lookup(
    dictionary: &SymSpell<UnicodeStringStrategy>,
    text: &str,
) -> Result<String, GatewayError> {
    panic::catch_unwind(AssertUnwindSafe(|| {
        dictionary
            .lookup_compound(text, MAX_EDIT_DISTANCE)
            .into_iter()
            .next()
            .map(|suggestion| suggestion.term)
    }))
    .map(|best| best.unwrap_or_else(|| text.to_string()))
    .map_err(|payload| {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        tracing::warn!(%reason, "spelling lookup panicked");
        GatewayError::Lookup(reason)
    })
}
