//! The wire shape of a completed tool call.

use serde::Serialize;

use crate::error::ToolError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Text,
    Code,
    Json,
}

/// `success`/`error` plus the distinguished non-error statuses
/// (`clarificationRequested`, and sentinel statuses a provider's output can
/// carry, e.g. `more-files-needed`). Represented as a string rather than a
/// closed enum since sentinel statuses are tool/output-defined, not a fixed
/// set the kernel enumerates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Status(String);

impl Status {
    pub fn success() -> Self {
        Self("success".to_string())
    }

    pub fn error() -> Self {
        Self("error".to_string())
    }

    pub fn clarification_requested() -> Self {
        Self("clarificationRequested".to_string())
    }

    pub fn sentinel(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_used: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinuationOffer {
    pub thread_id: String,
    pub remaining_turns: usize,
    pub total_tokens: u64,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponse {
    pub content: String,
    pub content_type: ContentType,
    pub status: Status,
    pub metadata: ResponseMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation_offer: Option<ContinuationOffer>,
}

impl ToolResponse {
    pub fn error(err: &ToolError) -> Self {
        Self {
            content: err.client_message(),
            content_type: ContentType::Text,
            status: Status::error(),
            metadata: ResponseMetadata { error_kind: Some(err.kind()), ..Default::default() },
            continuation_offer: None,
        }
    }

    pub fn clarification_requested(limit: usize) -> Self {
        Self {
            content: format!(
                "the prompt exceeds the {limit}-character inline limit; resubmit the content as one or more files instead"
            ),
            content_type: ContentType::Text,
            status: Status::clarification_requested(),
            metadata: ResponseMetadata::default(),
            continuation_offer: None,
        }
    }
}
