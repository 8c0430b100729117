//! Generic OpenAI-compatible provider for arbitrary endpoints (local
//! inference servers, self-hosted gateways). Exposes exactly one
//! operator-declared model; capabilities are declared via configuration,
//! never discovered.

use async_trait::async_trait;
use catalog::{ModelCapabilities, ProviderKind, TemperaturePolicy};
use secrecy::SecretString;

use super::{Provider, chat_wire};
use crate::{
    error::ProviderError,
    http_support::build_client,
    request::{GenerateRequest, GenerateResponse},
};

const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(600);

pub struct CustomProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<SecretString>,
    capabilities: ModelCapabilities,
}

impl CustomProvider {
    /// `model_name` names the single model this endpoint serves. Leaked to
    /// `'static` once at startup so it can live in a [`ModelCapabilities`]
    /// alongside the static catalog entries — there is exactly one per
    /// process, never created in a loop.
    pub fn new(base_url: String, api_key: Option<SecretString>, model_name: String) -> Self {
        let canonical_name: &'static str = Box::leak(model_name.into_boxed_str());

        Self {
            client: build_client(DEFAULT_TIMEOUT),
            base_url,
            api_key,
            capabilities: catalog::custom_model_capabilities(canonical_name),
        }
    }
}

#[async_trait]
impl Provider for CustomProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Custom
    }

    fn name(&self) -> &str {
        "custom"
    }

    fn list_models(&self) -> Vec<&'static str> {
        vec![self.capabilities.canonical_name]
    }

    fn capabilities(&self, canonical_name: &str) -> Option<ModelCapabilities> {
        (canonical_name.eq_ignore_ascii_case(self.capabilities.canonical_name)).then(|| self.capabilities.clone())
    }

    fn resolve_alias(&self, name: &str) -> Option<&'static str> {
        name.eq_ignore_ascii_case(self.capabilities.canonical_name).then_some(self.capabilities.canonical_name)
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, ProviderError> {
        let omit_temperature = matches!(self.capabilities.temperature_policy, TemperaturePolicy::Fixed(_));

        chat_wire::send(&self.client, &self.base_url, self.api_key.as_ref(), request, omit_temperature, false).await
    }
}
