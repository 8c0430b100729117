//! Shared HTTP client construction and the bounded-retry policy every
//! adapter uses for transient transport failures. Retries and backoff stay
//! internal to the provider, and only cover transport errors.

use std::time::Duration;

use rand::Rng;

use crate::error::ProviderError;

const MAX_TRANSPORT_RETRIES: u32 = 2;
const BASE_BACKOFF: Duration = Duration::from_millis(250);

/// A `reqwest::Client` tuned the same way across every adapter: short
/// connect timeout, keep-alive pool, no per-request client construction.
pub(crate) fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .tcp_nodelay(true)
        .pool_idle_timeout(Some(Duration::from_secs(30)))
        .build()
        .expect("reqwest client configuration is static and known-valid")
}

/// Run `attempt` up to `MAX_TRANSPORT_RETRIES` additional times when it
/// fails with [`ProviderError::TransportError`]. Any other error kind is
/// returned immediately without retrying, matching the kernel's
/// expectation that only transport failures are ever retried.
pub(crate) async fn with_transport_retries<F, Fut, T>(mut attempt: F) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, ProviderError>>,
{
    let mut tries = 0;

    loop {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(ProviderError::TransportError(message)) if tries < MAX_TRANSPORT_RETRIES => {
                let backoff = BASE_BACKOFF * 2u32.pow(tries) + jitter();
                log::warn!("transport error, retrying in {backoff:?}: {message}");
                tokio::time::sleep(backoff).await;
                tries += 1;
            }
            Err(other) => return Err(other),
        }
    }
}

fn jitter() -> Duration {
    Duration::from_millis(rand::rng().random_range(0..100))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    #[tokio::test]
    async fn retries_transport_errors_then_succeeds() {
        let calls = AtomicU32::new(0);

        let result = with_transport_retries(|| async {
            let call = calls.fetch_add(1, Ordering::SeqCst);
            if call < 2 {
                Err(ProviderError::TransportError("connection reset".to_string()))
            } else {
                Ok(42)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn does_not_retry_non_transport_errors() {
        let calls = AtomicU32::new(0);

        let result: Result<(), ProviderError> = with_transport_retries(|| async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(ProviderError::AuthError("bad key".to_string()))
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let calls = AtomicU32::new(0);

        let result: Result<(), ProviderError> = with_transport_retries(|| async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(ProviderError::TransportError("still down".to_string()))
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), MAX_TRANSPORT_RETRIES + 1);
    }
}
