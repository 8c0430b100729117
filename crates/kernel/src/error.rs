//! The tool-kernel error taxonomy: resolution-time failures that never
//! reach a provider, plus the provider-layer failures passed through from
//! [`providers::ProviderError`].

use std::time::Duration;

use thiserror::Error;

use conversation::StoreError;
use providers::{AutoSelectError, ProviderError, ResolveError};

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("conversation thread not found")]
    ThreadNotFound,

    #[error("model not found: {requested}")]
    ModelNotFound { requested: String, available: Vec<String> },

    #[error("model does not support image input")]
    VisionUnsupported,

    #[error("attached images exceed the model's size limit")]
    ImagesTooLarge,

    #[error("file/image content exceeds the available context budget")]
    ContextOverflow { files_bytes: u64, file_budget_tokens: u32 },

    #[error("authentication failed for provider {0}")]
    AuthError(String),

    #[error("rate limited")]
    RateLimited { retry_after: Option<Duration> },

    #[error("transport error: {0}")]
    TransportError(String),

    #[error("provider internal error")]
    ProviderInternal,

    #[error("internal error")]
    InternalError,
}

impl ToolError {
    /// A short actionable hint appended to the client-visible message
    /// ("choose one of: ..." for `modelNotFound`). `None` when a failure
    /// kind has no useful next step to suggest.
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::ModelNotFound { available, .. } if !available.is_empty() => {
                Some(format!("choose one of: {}", available.join(", ")))
            }
            Self::VisionUnsupported => Some("choose a vision-capable model, or attach no images".to_string()),
            Self::ImagesTooLarge => Some("reduce image count or size to fit the model's limit".to_string()),
            Self::ContextOverflow { .. } => Some("pass fewer or smaller files".to_string()),
            _ => None,
        }
    }

    /// Message safe to send to an MCP client: never a key, a stack trace, or
    /// a raw upstream error body.
    pub fn client_message(&self) -> String {
        match self.hint() {
            Some(hint) => format!("{self}; {hint}"),
            None => self.to_string(),
        }
    }

    /// The taxonomy kind, surfaced in `ToolResponse` metadata for
    /// machine-readable dispatch by the client.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalidRequest",
            Self::ThreadNotFound => "threadNotFound",
            Self::ModelNotFound { .. } => "modelNotFound",
            Self::VisionUnsupported => "visionUnsupported",
            Self::ImagesTooLarge => "imagesTooLarge",
            Self::ContextOverflow { .. } => "contextOverflow",
            Self::AuthError(_) => "authError",
            Self::RateLimited { .. } => "rateLimited",
            Self::TransportError(_) => "transportError",
            Self::ProviderInternal => "providerInternal",
            Self::InternalError => "internalError",
        }
    }
}

impl From<ProviderError> for ToolError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::AuthError(provider) => Self::AuthError(provider),
            ProviderError::RateLimited { retry_after } => Self::RateLimited { retry_after },
            ProviderError::ModelNotFound(name) => Self::ModelNotFound { requested: name, available: Vec::new() },
            ProviderError::InvalidRequest(msg) => Self::InvalidRequest(msg),
            ProviderError::TransportError(msg) => Self::TransportError(msg),
            ProviderError::ProviderInternal(_) => Self::ProviderInternal,
        }
    }
}

impl From<StoreError> for ToolError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::ThreadNotFound,
            StoreError::Backend(_) => Self::InternalError,
        }
    }
}

impl From<ResolveError> for ToolError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::AutoUnresolved => Self::InternalError,
            ResolveError::ModelNotFound(name) => Self::ModelNotFound { requested: name, available: Vec::new() },
        }
    }
}

impl From<AutoSelectError> for ToolError {
    fn from(err: AutoSelectError) -> Self {
        match err {
            AutoSelectError::NoVisionModelAvailable => Self::VisionUnsupported,
            AutoSelectError::NoCandidates(_) => Self::ModelNotFound { requested: "auto".to_string(), available: Vec::new() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_not_found_hint_lists_available_models() {
        let err = ToolError::ModelNotFound { requested: "o3".to_string(), available: vec!["o3-mini".to_string()] };
        assert_eq!(err.hint(), Some("choose one of: o3-mini".to_string()));
    }

    #[test]
    fn provider_internal_has_no_leaking_detail() {
        let err = ToolError::ProviderInternal;
        assert_eq!(err.client_message(), "provider internal error");
    }

    #[test]
    fn kind_matches_the_wire_taxonomy_name() {
        assert_eq!(ToolError::ThreadNotFound.kind(), "threadNotFound");
        assert_eq!(ToolError::VisionUnsupported.kind(), "visionUnsupported");
    }
}
