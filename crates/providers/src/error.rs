use std::time::Duration;

use thiserror::Error;

/// Failure modes a [`crate::Provider::generate`] call can return. These are
/// the provider-layer failures; resolution-time failures like
/// `modelNotFound`/`visionUnsupported` live one layer up, in `kernel`.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("authentication failed for provider {0}")]
    AuthError(String),

    #[error("rate limited")]
    RateLimited { retry_after: Option<Duration> },

    #[error("model not found: {0}")]
    ModelNotFound(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("transport error: {0}")]
    TransportError(String),

    /// `Some` carries a message a provider sent back that is safe to show
    /// verbatim; `None` means an internal failure whose detail must not
    /// reach the client.
    #[error("provider internal error")]
    ProviderInternal(Option<String>),
}

impl ProviderError {
    /// Map an upstream HTTP status code and response body to the taxonomy
    /// above. Shared by every HTTP-backed provider adapter so status-code
    /// handling doesn't drift between them.
    pub fn from_status(status: reqwest::StatusCode, body: impl Into<String>) -> Self {
        let body = body.into();

        match status.as_u16() {
            401 | 403 => Self::AuthError(body),
            404 => Self::ModelNotFound(body),
            400 | 422 => Self::InvalidRequest(body),
            429 => Self::RateLimited { retry_after: None },
            500..=599 => Self::ProviderInternal(Some(body)),
            _ => Self::ProviderInternal(Some(body)),
        }
    }

    /// Message safe to forward to an MCP client: never leaks a `None`
    /// internal-error payload.
    pub fn client_message(&self) -> String {
        match self {
            Self::ProviderInternal(Some(msg)) => msg.clone(),
            Self::ProviderInternal(None) => "the provider failed internally".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_common_status_codes() {
        assert!(matches!(ProviderError::from_status(reqwest::StatusCode::UNAUTHORIZED, "x"), ProviderError::AuthError(_)));
        assert!(matches!(ProviderError::from_status(reqwest::StatusCode::NOT_FOUND, "x"), ProviderError::ModelNotFound(_)));
        assert!(matches!(
            ProviderError::from_status(reqwest::StatusCode::TOO_MANY_REQUESTS, "x"),
            ProviderError::RateLimited { .. }
        ));
        assert!(matches!(
            ProviderError::from_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "x"),
            ProviderError::ProviderInternal(Some(_))
        ));
    }

    #[test]
    fn internal_error_without_message_does_not_leak_none() {
        let err = ProviderError::ProviderInternal(None);
        assert_eq!(err.client_message(), "the provider failed internally");
    }
}
