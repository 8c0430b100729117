//! Shared OpenAI-compatible "chat completions" wire format used by the
//! native OpenAI provider, the OpenRouter aggregator, and arbitrary custom
//! endpoints — all three speak the same request/response shape.

use config::ThinkingMode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    error::ProviderError,
    http_support::with_transport_retries,
    request::{ChatMessage, GenerateRequest, GenerateResponse, Role},
};

#[derive(Debug, Serialize)]
struct WireImageUrl {
    url: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireContentPart {
    Text { text: String },
    ImageUrl { image_url: WireImageUrl },
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: Vec<WireContentPart>,
}

#[derive(Debug, Serialize)]
struct WireRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    /// Not every OpenAI-compatible endpoint understands this; only sent when
    /// the model's capability flag says it supports extended thinking.
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning_effort: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct WireUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

fn reasoning_effort(mode: ThinkingMode) -> &'static str {
    match mode {
        ThinkingMode::Minimal => "minimal",
        ThinkingMode::Low => "low",
        ThinkingMode::Medium => "medium",
        ThinkingMode::High => "high",
        ThinkingMode::Max => "max",
    }
}

fn to_wire_messages(system_prompt: Option<&str>, messages: &[ChatMessage]) -> Vec<WireMessage> {
    let mut wire = Vec::with_capacity(messages.len() + 1);

    if let Some(system) = system_prompt {
        wire.push(WireMessage { role: "system", content: vec![WireContentPart::Text { text: system.to_string() }] });
    }

    for message in messages {
        let mut parts = vec![WireContentPart::Text { text: message.content.clone() }];

        for image in &message.images {
            parts.push(WireContentPart::ImageUrl {
                image_url: WireImageUrl { url: format!("data:{};base64,{}", image.mime_type, image.data_base64) },
            });
        }

        wire.push(WireMessage {
            role: match message.role {
                Role::User => "user",
                Role::Assistant => "assistant",
            },
            content: parts,
        });
    }

    wire
}

/// POST `request` to `{base_url}/chat/completions` using OpenAI's wire shape.
/// `omit_temperature` follows a `Fixed` [`catalog::TemperaturePolicy`]: the
/// parameter must not appear on the wire at all for those models.
/// `supports_extended_thinking` gates whether `reasoning_effort` is sent.
pub(crate) async fn send(
    client: &reqwest::Client,
    base_url: &str,
    api_key: Option<&SecretString>,
    request: GenerateRequest,
    omit_temperature: bool,
    supports_extended_thinking: bool,
) -> Result<GenerateResponse, ProviderError> {
    let wire = WireRequest {
        model: request.canonical_name.clone(),
        messages: to_wire_messages(request.system_prompt.as_deref(), &request.messages),
        temperature: if omit_temperature { None } else { request.temperature },
        max_tokens: request.max_output_tokens,
        reasoning_effort: if supports_extended_thinking { request.thinking_mode.map(reasoning_effort) } else { None },
    };

    let url = format!("{base_url}/chat/completions");

    with_transport_retries(|| async {
        let mut builder = client.post(&url).json(&wire);

        if let Some(key) = api_key {
            builder = builder.bearer_auth(key.expose_secret());
        }

        let response = builder.send().await.map_err(|err| ProviderError::TransportError(err.to_string()))?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ProviderError::from_status(status, body));
        }

        let body: WireResponse = response
            .json()
            .await
            .map_err(|err| ProviderError::ProviderInternal(Some(format!("malformed response body: {err}"))))?;

        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::ProviderInternal(Some("provider returned no choices".to_string())))?;

        let usage = body.usage.unwrap_or_default();

        Ok(GenerateResponse {
            content: choice.message.content.unwrap_or_default(),
            model_name: request.canonical_name.clone(),
            input_tokens: usage.prompt_tokens,
            output_tokens: usage.completion_tokens,
            finish_reason: choice.finish_reason,
        })
    })
    .await
}
