//! Native OpenAI provider.

use async_trait::async_trait;
use catalog::{ModelCapabilities, ProviderKind, TemperaturePolicy};
use config::Restriction;
use secrecy::SecretString;

use super::{Provider, catalog_capabilities_for, catalog_models_for, catalog_resolve_alias_for, chat_wire};
use crate::{
    error::ProviderError,
    http_support::build_client,
    request::{GenerateRequest, GenerateResponse},
};

const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(600);
const BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAIProvider {
    client: reqwest::Client,
    api_key: SecretString,
    restriction: Restriction,
}

impl OpenAIProvider {
    pub fn new(api_key: SecretString, restriction: Restriction) -> Self {
        Self { client: build_client(DEFAULT_TIMEOUT), api_key, restriction }
    }
}

#[async_trait]
impl Provider for OpenAIProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAI
    }

    fn name(&self) -> &str {
        "openai"
    }

    fn list_models(&self) -> Vec<&'static str> {
        catalog_models_for(ProviderKind::OpenAI, &self.restriction)
    }

    fn capabilities(&self, canonical_name: &str) -> Option<ModelCapabilities> {
        catalog_capabilities_for(ProviderKind::OpenAI, &self.restriction, canonical_name)
    }

    fn resolve_alias(&self, name: &str) -> Option<&'static str> {
        catalog_resolve_alias_for(ProviderKind::OpenAI, &self.restriction, name)
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, ProviderError> {
        let model = catalog::by_canonical_name(&request.canonical_name)
            .ok_or_else(|| ProviderError::ModelNotFound(request.canonical_name.clone()))?;

        if request.messages.iter().any(|m| !m.images.is_empty()) && !model.supports_images {
            return Err(ProviderError::InvalidRequest(format!(
                "{} does not accept image input",
                request.canonical_name
            )));
        }

        let omit_temperature = matches!(model.temperature_policy, TemperaturePolicy::Fixed(_));

        chat_wire::send(
            &self.client,
            BASE_URL,
            Some(&self.api_key),
            request,
            omit_temperature,
            model.supports_extended_thinking,
        )
        .await
    }
}
