//! Native Google Gemini provider.

use async_trait::async_trait;
use catalog::{ModelCapabilities, ProviderKind};
use config::{Restriction, ThinkingMode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::{Provider, catalog_capabilities_for, catalog_models_for, catalog_resolve_alias_for};
use crate::{
    error::ProviderError,
    http_support::{build_client, with_transport_retries},
    request::{ChatMessage, GenerateRequest, GenerateResponse, Role},
};

const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(600);
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct GoogleProvider {
    client: reqwest::Client,
    api_key: SecretString,
    restriction: Restriction,
}

impl GoogleProvider {
    pub fn new(api_key: SecretString, restriction: Restriction) -> Self {
        Self { client: build_client(DEFAULT_TIMEOUT), api_key, restriction }
    }
}

#[async_trait]
impl Provider for GoogleProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Google
    }

    fn name(&self) -> &str {
        "google"
    }

    fn list_models(&self) -> Vec<&'static str> {
        catalog_models_for(ProviderKind::Google, &self.restriction)
    }

    fn capabilities(&self, canonical_name: &str) -> Option<ModelCapabilities> {
        catalog_capabilities_for(ProviderKind::Google, &self.restriction, canonical_name)
    }

    fn resolve_alias(&self, name: &str) -> Option<&'static str> {
        catalog_resolve_alias_for(ProviderKind::Google, &self.restriction, name)
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, ProviderError> {
        let extended_thinking = catalog::by_canonical_name(&request.canonical_name)
            .map(|m| m.supports_extended_thinking)
            .unwrap_or(false);

        let wire = GeminiRequest {
            contents: to_gemini_contents(&request.messages),
            system_instruction: request.system_prompt.as_deref().map(|text| GeminiSystemInstruction {
                parts: vec![GeminiPart::Text { text: text.to_string() }],
            }),
            generation_config: GeminiGenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
                thinking_config: if extended_thinking {
                    request.thinking_mode.map(|mode| GeminiThinkingConfig { thinking_budget: thinking_budget(mode) })
                } else {
                    None
                },
            },
        };

        let url = format!("{BASE_URL}/{}:generateContent", request.canonical_name);
        let api_key = self.api_key.clone();
        let canonical_name = request.canonical_name.clone();

        with_transport_retries(|| {
            let wire = &wire;
            let api_key = api_key.clone();
            let canonical_name = canonical_name.clone();

            async move {
                let response = self
                    .client
                    .post(&url)
                    .header("x-goog-api-key", api_key.expose_secret())
                    .json(wire)
                    .send()
                    .await
                    .map_err(|err| ProviderError::TransportError(err.to_string()))?;

                let status = response.status();

                if !status.is_success() {
                    let body = response.text().await.unwrap_or_else(|_| "<unreadable body>".to_string());
                    return Err(ProviderError::from_status(status, body));
                }

                let body: GeminiResponse = response.json().await.map_err(|err| {
                    ProviderError::ProviderInternal(Some(format!("malformed response body: {err}")))
                })?;

                let candidate = body.candidates.into_iter().next().ok_or_else(|| {
                    ProviderError::ProviderInternal(Some("Gemini returned no candidates".to_string()))
                })?;

                let content = candidate
                    .content
                    .parts
                    .into_iter()
                    .filter_map(|part| match part {
                        GeminiPart::Text { text } => Some(text),
                        GeminiPart::InlineData { .. } => None,
                    })
                    .collect::<Vec<_>>()
                    .join("");

                let usage = body.usage_metadata.unwrap_or_default();

                Ok(GenerateResponse {
                    content,
                    model_name: canonical_name.clone(),
                    input_tokens: usage.prompt_token_count,
                    output_tokens: usage.candidates_token_count,
                    finish_reason: candidate.finish_reason,
                })
            }
        })
        .await
    }
}

fn thinking_budget(mode: ThinkingMode) -> i32 {
    match mode {
        ThinkingMode::Minimal => 0,
        ThinkingMode::Low => 2_000,
        ThinkingMode::Medium => 8_000,
        ThinkingMode::High => 16_000,
        ThinkingMode::Max => 32_000,
    }
}

fn to_gemini_contents(messages: &[ChatMessage]) -> Vec<GeminiContent> {
    messages
        .iter()
        .map(|message| {
            let mut parts = vec![GeminiPart::Text { text: message.content.clone() }];

            parts.extend(message.images.iter().map(|image| GeminiPart::InlineData {
                inline_data: GeminiInlineData { mime_type: image.mime_type.clone(), data: image.data_base64.clone() },
            }));

            GeminiContent {
                role: match message.role {
                    Role::User => "user",
                    Role::Assistant => "model",
                },
                parts,
            }
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: &'static str,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiInlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum GeminiPart {
    Text { text: String },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: GeminiInlineData,
    },
}

#[derive(Debug, Serialize)]
struct GeminiSystemInstruction {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiThinkingConfig {
    #[serde(rename = "thinkingBudget")]
    thinking_budget: i32,
}

#[derive(Debug, Serialize, Default)]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "maxOutputTokens")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "thinkingConfig")]
    thinking_config: Option<GeminiThinkingConfig>,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "systemInstruction")]
    system_instruction: Option<GeminiSystemInstruction>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiResponseContent,
    #[serde(default, rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct GeminiUsageMetadata {
    #[serde(default, rename = "promptTokenCount")]
    prompt_token_count: u32,
    #[serde(default, rename = "candidatesTokenCount")]
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default, rename = "usageMetadata")]
    usage_metadata: Option<GeminiUsageMetadata>,
}

#[cfg(test)]
mod tests {
    use crate::request::ImageAttachment;

    use super::*;

    #[test]
    fn images_are_carried_as_inline_data_not_a_text_placeholder() {
        let messages = vec![ChatMessage {
            role: Role::User,
            content: "what is this?".to_string(),
            images: vec![ImageAttachment { mime_type: "image/png".to_string(), data_base64: "Zm9v".to_string() }],
        }];

        let contents = to_gemini_contents(&messages);
        let parts = &contents[0].parts;

        assert!(matches!(&parts[0], GeminiPart::Text { text } if text == "what is this?"));
        match &parts[1] {
            GeminiPart::InlineData { inline_data } => {
                assert_eq!(inline_data.mime_type, "image/png");
                assert_eq!(inline_data.data, "Zm9v");
            }
            other => panic!("expected an inline-data part, got {other:?}"),
        }
    }

    #[test]
    fn request_wire_shape_uses_camel_case_matching_the_gemini_rest_api() {
        let wire = GeminiRequest {
            contents: vec![],
            system_instruction: Some(GeminiSystemInstruction { parts: vec![GeminiPart::Text { text: "be terse".to_string() }] }),
            generation_config: GeminiGenerationConfig {
                temperature: Some(0.5),
                max_output_tokens: Some(100),
                thinking_config: Some(GeminiThinkingConfig { thinking_budget: 2_000 }),
            },
        };

        let json = serde_json::to_value(&wire).unwrap();
        assert!(json.get("systemInstruction").is_some());
        assert!(json.get("system_instruction").is_none());
        assert!(json.get("generationConfig").is_some());
        assert!(json.get("generation_config").is_none());

        let generation_config = &json["generationConfig"];
        assert!(generation_config.get("maxOutputTokens").is_some());
        assert!(generation_config.get("thinkingConfig").is_some());

        let inline = &json["systemInstruction"]["parts"][0];
        assert_eq!(inline["text"], "be terse");
    }

    #[test]
    fn inline_data_part_serializes_with_camel_case_keys() {
        let part = GeminiPart::InlineData { inline_data: GeminiInlineData { mime_type: "image/jpeg".to_string(), data: "YWJj".to_string() } };
        let json = serde_json::to_value(&part).unwrap();

        assert_eq!(json["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(json["inlineData"]["data"], "YWJj");
    }
}
