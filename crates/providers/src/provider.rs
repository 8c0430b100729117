mod chat_wire;
mod custom;
mod google;
mod openai;
mod openrouter;

pub use custom::CustomProvider;
pub use google::GoogleProvider;
pub use openai::OpenAIProvider;
pub use openrouter::OpenRouterProvider;

use async_trait::async_trait;
use catalog::{ModelCapabilities, ProviderKind};
use config::Restriction;

use crate::{
    error::ProviderError,
    request::{GenerateRequest, GenerateResponse},
};

/// Canonical names of every catalog entry for `kind`, in declaration order,
/// with `restriction` applied. Shared by every native-catalog-backed
/// provider (`google`, `openai`, `openrouter`) since their `list_models` /
/// `capabilities` / `resolve_alias` all reduce to the same lookup.
fn catalog_models_for(kind: ProviderKind, restriction: &Restriction) -> Vec<&'static str> {
    restriction.filter(catalog::all().iter().filter(|m| m.provider == kind).map(|m| m.canonical_name))
}

fn catalog_capabilities_for(
    kind: ProviderKind,
    restriction: &Restriction,
    canonical_name: &str,
) -> Option<ModelCapabilities> {
    let model = catalog::by_canonical_name(canonical_name)?;

    if model.provider != kind || !restriction.is_allowed(canonical_name) {
        return None;
    }

    Some(model.clone())
}

fn catalog_resolve_alias_for(kind: ProviderKind, restriction: &Restriction, name: &str) -> Option<&'static str> {
    let canonical = catalog::resolve_alias(name)?;
    let model = catalog::by_canonical_name(canonical)?;

    if model.provider != kind || !restriction.is_allowed(canonical) {
        return None;
    }

    Some(canonical)
}

/// Common capability set every provider adapter implements.
///
/// Implementations are expected to be cheap to clone behind an `Arc` (or to
/// be stored directly as `Box<dyn Provider>` in the registry) and safe to
/// share across concurrent tool calls: a provider holds a single reused
/// `reqwest::Client` and no per-request mutable state.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Which of the four provider families this is.
    fn kind(&self) -> ProviderKind;

    /// Stable lowercase identifier: `"google"`, `"openai"`, `"openrouter"`,
    /// or the operator-chosen name for a custom endpoint. Used for dedup in
    /// the registry and as the `provider/model` override prefix.
    fn name(&self) -> &str;

    /// Initialization/resolution priority; lower wins ties. Delegates to
    /// [`ProviderKind::priority`] by default.
    fn priority(&self) -> u8 {
        self.kind().priority()
    }

    /// Canonical names this provider exposes, restrictions already applied.
    fn list_models(&self) -> Vec<&'static str>;

    /// Capabilities for a canonical name, or `None` if this provider doesn't
    /// serve it (either never did, or it was filtered out by a restriction).
    fn capabilities(&self, canonical_name: &str) -> Option<ModelCapabilities>;

    /// Whether `canonical_name` is currently servable by this provider.
    fn validate_model(&self, canonical_name: &str) -> bool {
        self.capabilities(canonical_name).is_some()
    }

    /// Resolve an alias or canonical name to a canonical name this provider
    /// serves. Case-insensitive; `None` if unclaimed.
    fn resolve_alias(&self, name: &str) -> Option<&'static str>;

    /// Dispatch a request. Retries for transient transport failures are
    /// internal to the adapter; every other failure surfaces immediately
    /// and is never retried by a caller.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, ProviderError>;
}
