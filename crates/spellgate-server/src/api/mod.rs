// ABOUTME: API module containing the HTTP handlers that proxy text to the checking gateways.
// ABOUTME: Organized into the shared request body, grammar checking, and spelling correction.

pub mod body;
pub mod grammar;
pub mod spelling;

use std::future::Future;
use std::time::Duration;

use spellgate_gateway::GatewayError;

use crate::error::AppError;

/// Await an outbound gateway call, giving up after `limit`.
pub(crate) async fn call_upstream<T, F>(limit: Duration, call: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, GatewayError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => Ok(result?),
        Err(_) => {
            tracing::warn!(limit_ms = limit.as_millis() as u64, "upstream call timed out");
            Err(AppError::UpstreamTimeout { after: limit })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn passes_through_success() {
        let value = call_upstream(Duration::from_secs(1), async { Ok::<_, GatewayError>(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn wraps_gateway_error() {
        let err = call_upstream(Duration::from_secs(1), async {
            Err::<(), _>(GatewayError::RateLimited)
        })
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Upstream(GatewayError::RateLimited)));
    }

    #[tokio::test]
    async fn times_out_slow_call() {
        let err = call_upstream(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, GatewayError>(())
        })
        .await
        .unwrap_err();
        assert!(
            matches!(err, AppError::UpstreamTimeout { after } if after == Duration::from_millis(10))
        );
    }
}
