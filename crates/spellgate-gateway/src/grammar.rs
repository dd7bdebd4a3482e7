// ABOUTME: Grammar-check gateway backed by the TextGears HTTP API.
// ABOUTME: Sends raw text with a fixed language tag and returns the error descriptors from the envelope.

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::error::GatewayError;

const DEFAULT_BASE_URL: &str = "https://api.textgears.com";
const DEFAULT_LANGUAGE: &str = "en-US";

/// One grammar error descriptor, passed through exactly as the upstream produced it.
pub type GrammarError = Value;

/// Anything that can grammar-check free-form text.
#[async_trait]
pub trait GrammarChecker: Send + Sync {
    /// Check `text` and return the upstream's list of error descriptors.
    async fn check(&self, text: &str) -> Result<Vec<GrammarError>, GatewayError>;

    /// Name for logging (e.g. "textgears").
    fn provider_name(&self) -> &str;
}

/// TextGears grammar API client.
pub struct TextGearsClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    language: String,
}

impl TextGearsClient {
    /// Create a client against the public TextGears endpoint with the `en-US` language tag.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Create a client against an explicit base URL (self-hosted endpoint or test server).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Build the JSON request body for the `/grammar` endpoint.
    pub fn build_request_body(&self, text: &str) -> Value {
        json!({
            "text": text,
            "language": self.language,
            "key": self.api_key,
        })
    }

    /// Pull `response.errors` out of a TextGears envelope.
    ///
    /// A `status: false` envelope carries an API-level failure (bad key,
    /// quota exhausted) even though the HTTP status was 200.
    pub fn parse_response(body: &Value) -> Result<Vec<GrammarError>, GatewayError> {
        if body.get("status").and_then(|s| s.as_bool()) == Some(false) {
            let description = body
                .get("description")
                .and_then(|d| d.as_str())
                .unwrap_or("unknown error");
            let code = body.get("error_code").and_then(|c| c.as_i64());
            return Err(GatewayError::Rejected(match code {
                Some(code) => format!("{} (code {})", description, code),
                None => description.to_string(),
            }));
        }

        let errors = body
            .get("response")
            .and_then(|r| r.get("errors"))
            .and_then(|e| e.as_array())
            .ok_or_else(|| {
                GatewayError::InvalidResponse("missing response.errors array".to_string())
            })?;

        Ok(errors.clone())
    }
}

#[async_trait]
impl GrammarChecker for TextGearsClient {
    async fn check(&self, text: &str) -> Result<Vec<GrammarError>, GatewayError> {
        let url = format!("{}/grammar", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&self.build_request_body(text))
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GatewayError::RateLimited);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(GatewayError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(format!("failed to parse JSON: {}", e)))?;

        let errors = Self::parse_response(&body)?;
        tracing::debug!(count = errors.len(), "grammar check complete");
        Ok(errors)
    }

    fn provider_name(&self) -> &str {
        "textgears"
    }
}
