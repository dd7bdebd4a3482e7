// ABOUTME: Error type shared by every outbound gateway call.
// ABOUTME: Distinguishes transport failures, HTTP status failures, and malformed envelopes.

/// Errors that can occur while talking to an external checking capability.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Unauthorized: check TEXTGEARS_API_KEY")]
    Unauthorized,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("upstream rejected request: {0}")]
    Rejected(String),

    #[error("Dictionary load failed: {0}")]
    Dictionary(String),

    #[error("spelling lookup failed: {0}")]
    Lookup(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_error_display() {
        let errors = vec![
            GatewayError::Status {
                status: 503,
                body: "maintenance".to_string(),
            },
            GatewayError::RateLimited,
            GatewayError::Unauthorized,
            GatewayError::InvalidResponse("missing errors".to_string()),
            GatewayError::Rejected("text too long".to_string()),
            GatewayError::Lookup("attempt to multiply with overflow".to_string()),
        ];

        for err in &errors {
            assert!(!err.to_string().is_empty());
        }

        assert!(
            GatewayError::Rejected("text too long".to_string())
                .to_string()
                .contains("text too long")
        );
        assert!(
            GatewayError::Status {
                status: 503,
                body: "maintenance".to_string()
            }
            .to_string()
            .contains("503")
        );
    }
}
