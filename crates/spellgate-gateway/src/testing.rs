// ABOUTME: Test utilities for spellgate-gateway, including stub grammar and spelling capabilities.
// ABOUTME: Stubs count their calls so callers can assert whether an outbound call happened.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::GatewayError;
use crate::grammar::{GrammarChecker, GrammarError};
use crate::spelling::{Correction, SpellCorrector};

/// What a stub answers with.
#[derive(Debug, Clone)]
enum Reply<T> {
    Ok(T),
    Fail(String),
}

/// A stub grammar checker that returns a pre-configured error list.
#[derive(Debug, Clone)]
pub struct StubGrammarChecker {
    reply: Reply<Vec<GrammarError>>,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl StubGrammarChecker {
    /// Always answer with `errors`.
    pub fn new(errors: Vec<Value>) -> Self {
        Self {
            reply: Reply::Ok(errors),
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Always fail with [`GatewayError::InvalidResponse`] carrying `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            reply: Reply::Fail(message.to_owned()),
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Sleep for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of times `check` has been invoked, shared across clones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GrammarChecker for StubGrammarChecker {
    async fn check(&self, _text: &str) -> Result<Vec<GrammarError>, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.reply {
            Reply::Ok(errors) => Ok(errors.clone()),
            Reply::Fail(message) => Err(GatewayError::InvalidResponse(message.clone())),
        }
    }

    fn provider_name(&self) -> &str {
        "stub"
    }
}

/// A stub corrector whose output is a pure function of its input.
#[derive(Clone)]
pub struct StubSpellCorrector {
    reply: Reply<fn(&str) -> String>,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl StubSpellCorrector {
    /// Correct by applying `f` to the input text.
    pub fn new(f: fn(&str) -> String) -> Self {
        Self {
            reply: Reply::Ok(f),
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Correct by returning the input unchanged.
    pub fn echo() -> Self {
        Self::new(|text| text.to_owned())
    }

    /// Always fail with [`GatewayError::InvalidResponse`] carrying `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            reply: Reply::Fail(message.to_owned()),
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpellCorrector for StubSpellCorrector {
    async fn correct(&self, text: &str, _language: &str) -> Result<Correction, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.reply {
            Reply::Ok(f) => Ok(Correction {
                input: text.to_owned(),
                output: f(text),
            }),
            Reply::Fail(message) => Err(GatewayError::InvalidResponse(message.clone())),
        }
    }

    fn provider_name(&self) -> &str {
        "stub"
    }
}
