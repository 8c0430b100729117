//! OpenRouter aggregator provider — the catch-all for everything not served
//! natively by Google or OpenAI. Canonical names are `owner/model` strings;
//! capabilities are declared in the catalog, not discovered from OpenRouter's
//! `/models` endpoint.

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
const BASE_URL: &str = "https://openrouter.ai/api/v1";

pub struct OpenRouterProvider {
    client: reqwest::Client,
    api_key: SecretString,
    restriction: Restriction,
}

impl OpenRouterProvider {
    pub fn new(api_key: SecretString, restriction: Restriction) -> Self {
        Self { client: build_client(DEFAULT_TIMEOUT), api_key, restriction }
    }
}

#[async_trait]
impl Provider for OpenRouterProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenRouter
    }

    fn name(&self) -> &str {
        "openrouter"
    }

    fn list_models(&self) -> Vec<&'static str> {
        catalog_models_for(ProviderKind::OpenRouter, &self.restriction)
    }

    fn capabilities(&self, canonical_name: &str) -> Option<ModelCapabilities> {
        catalog_capabilities_for(ProviderKind::OpenRouter, &self.restriction, canonical_name)
    }

    fn resolve_alias(&self, name: &str) -> Option<&'static str> {
        catalog_resolve_alias_for(ProviderKind::OpenRouter, &self.restriction, name)
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, ProviderError> {
        let omit_temperature = catalog::by_canonical_name(&request.canonical_name)
            .map(|m| matches!(m.temperature_policy, TemperaturePolicy::Fixed(_)))
            .unwrap_or(false);

        let extended_thinking = catalog::by_canonical_name(&request.canonical_name)
            .map(|m| m.supports_extended_thinking)
            .unwrap_or(false);

        chat_wire::send(&self.client, BASE_URL, Some(&self.api_key), request, omit_temperature, extended_thinking)
            .await
    }
}
