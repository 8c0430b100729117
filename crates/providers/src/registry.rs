//! Priority-ordered provider registry: initialization, model resolution, and
//! auto-mode category-based selection.

use std::collections::HashSet;

use catalog::{Category, ModelCapabilities};
use config::Config;
use thiserror::Error;

use crate::provider::{CustomProvider, GoogleProvider, OpenAIProvider, OpenRouterProvider, Provider};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The literal `"auto"` was passed directly to `resolve`; callers must
    /// go through `select_auto` first.
    #[error("\"auto\" must be resolved via select_auto, not resolve")]
    AutoUnresolved,
    #[error("model not found: {0}")]
    ModelNotFound(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AutoSelectError {
    #[error("images were attached but no configured model supports vision")]
    NoVisionModelAvailable,
    #[error("no model is available for category {0:?}")]
    NoCandidates(Category),
}

/// Priority-ordered, deduplicated view over every configured [`Provider`].
/// Built once at startup and read-only afterward.
pub struct ProviderRegistry {
    providers: Vec<Box<dyn Provider>>,
}

impl ProviderRegistry {
    /// Sorts by [`Provider::priority`] (lower first); ties keep relative
    /// input order, which callers should already supply in priority order.
    pub fn new(mut providers: Vec<Box<dyn Provider>>) -> Self {
        providers.sort_by_key(|p| p.priority());
        Self { providers }
    }

    /// Build every provider for which `cfg` supplies credentials, in the
    /// fixed priority order: native Google, native OpenAI, Custom,
    /// OpenRouter (catch-all).
    pub fn from_config(cfg: &Config) -> Self {
        let mut providers: Vec<Box<dyn Provider>> = Vec::new();

        if let Some(key) = &cfg.google_api_key {
            providers.push(Box::new(GoogleProvider::new(key.clone(), cfg.restrictions.for_provider(catalog::ProviderKind::Google).clone())));
        }

        if let Some(key) = &cfg.openai_api_key {
            providers.push(Box::new(OpenAIProvider::new(key.clone(), cfg.restrictions.for_provider(catalog::ProviderKind::OpenAI).clone())));
        }

        if let Some(custom) = &cfg.custom {
            providers.push(Box::new(CustomProvider::new(
                custom.api_url.clone(),
                custom.api_key.clone(),
                custom.model_name.clone().unwrap_or_else(|| "custom-model".to_string()),
            )));
        }

        if let Some(key) = &cfg.openrouter_api_key {
            providers
                .push(Box::new(OpenRouterProvider::new(key.clone(), cfg.restrictions.for_provider(catalog::ProviderKind::OpenRouter).clone())));
        }

        Self::new(providers)
    }

    pub fn providers(&self) -> &[Box<dyn Provider>] {
        &self.providers
    }

    /// Every canonical name currently claimed by some provider, restriction
    /// filtering already applied. Used to build the "choose one of: ..."
    /// hint on `modelNotFound`.
    pub fn available_models(&self) -> Vec<&'static str> {
        self.claimed().into_iter().map(|(_, caps)| caps.canonical_name).collect()
    }

    /// Every (provider, canonical name) pair this registry claims, first
    /// provider by priority order winning a given canonical name.
    fn claimed(&self) -> Vec<(&dyn Provider, ModelCapabilities)> {
        let mut seen = HashSet::new();
        let mut claimed = Vec::new();

        for provider in &self.providers {
            for name in provider.list_models() {
                if !seen.insert(name) {
                    continue;
                }

                if let Some(caps) = provider.capabilities(name) {
                    claimed.push((provider.as_ref(), caps));
                }
            }
        }

        claimed
    }

    /// Resolve an alias or canonical name to the provider authoritative for
    /// it. `"auto"` always fails here; see [`Self::select_auto`].
    pub fn resolve(&self, name: &str) -> Result<(&dyn Provider, &'static str), ResolveError> {
        if name.trim().eq_ignore_ascii_case("auto") {
            return Err(ResolveError::AutoUnresolved);
        }

        // `provider/model` override, e.g. "openai/gpt-4o". Falls through to
        // whole-name resolution when no provider matches the prefix, since
        // OpenRouter's own canonical names are themselves `owner/model`.
        if let Some((provider_name, model_name)) = name.split_once('/')
            && let Some(provider) = self.providers.iter().find(|p| p.name().eq_ignore_ascii_case(provider_name))
            && let Some(canonical) = provider.resolve_alias(model_name)
        {
            return Ok((provider.as_ref(), canonical));
        }

        for provider in &self.providers {
            if let Some(canonical) = provider.resolve_alias(name) {
                return Ok((provider.as_ref(), canonical));
            }
        }

        Err(ResolveError::ModelNotFound(name.to_string()))
    }

    /// Category candidate ranking for auto-mode.
    fn candidate_categories(category: Category) -> &'static [Category] {
        match category {
            Category::Fast => &[Category::Fast, Category::Balanced],
            Category::Balanced => &[Category::Balanced, Category::Fast, Category::Reasoning],
            Category::Reasoning => &[Category::Reasoning, Category::ExtendedReasoning, Category::Balanced],
            Category::ExtendedReasoning => &[Category::ExtendedReasoning, Category::Reasoning],
            Category::Vision => &[Category::Vision],
        }
    }

    /// Resolve `auto` for a tool's declared category. When `has_images` is
    /// set, the candidate pool is narrowed to vision-capable models first;
    /// an empty result there is `NoVisionModelAvailable` regardless of
    /// `category`, since an image-bearing request can never be served by a
    /// text-only model.
    pub fn select_auto(
        &self,
        category: Category,
        has_images: bool,
        default_vision_model: Option<&str>,
    ) -> Result<&'static str, AutoSelectError> {
        let mut pool = self.claimed();

        if has_images {
            pool.retain(|(_, caps)| caps.supports_images);

            if pool.is_empty() {
                return Err(AutoSelectError::NoVisionModelAvailable);
            }

            if let Some(preferred) = default_vision_model
                && let Some((_, caps)) = pool.iter().find(|(_, c)| c.canonical_name.eq_ignore_ascii_case(preferred))
            {
                return Ok(caps.canonical_name);
            }
        }

        for &candidate_category in Self::candidate_categories(category) {
            // No catalog entry ever carries `Category::Vision` itself (it
            // describes a capability, not a model's primary category), so
            // the vision rung of the ranking is every image-capable model
            // instead of an exact category match.
            let in_category: Vec<_> = pool
                .iter()
                .filter(|(_, c)| if candidate_category == Category::Vision { c.supports_images } else { c.category == candidate_category })
                .collect();

            if in_category.is_empty() {
                continue;
            }

            let family_preferred = in_category
                .iter()
                .filter(|(p, c)| catalog::family_default(p.kind(), candidate_category) == Some(c.canonical_name))
                .min_by(|a, b| Self::tie_break(a, b));

            let chosen = family_preferred.or_else(|| in_category.iter().min_by(|a, b| Self::tie_break(a, b)));

            if let Some((_, caps)) = chosen {
                return Ok(caps.canonical_name);
            }
        }

        Err(AutoSelectError::NoCandidates(category))
    }

    /// Deterministic tie-break: provider priority, then canonical-name
    /// lexical order.
    fn tie_break(
        a: &&(&dyn Provider, ModelCapabilities),
        b: &&(&dyn Provider, ModelCapabilities),
    ) -> std::cmp::Ordering {
        a.0.priority().cmp(&b.0.priority()).then_with(|| a.1.canonical_name.cmp(b.1.canonical_name))
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use catalog::{Category, ModelCapabilities, ProviderKind};
    use config::Restriction;

    use super::*;
    use crate::{error::ProviderError, request::GenerateRequest};

    /// A fixture provider exercised directly, matching the rest of this
    /// workspace's "real trait impl, not a mock" test style.
    struct FixtureProvider {
        kind: ProviderKind,
        name: &'static str,
        models: Vec<ModelCapabilities>,
        restriction: Restriction,
    }

    impl FixtureProvider {
        fn new(kind: ProviderKind, name: &'static str, models: Vec<ModelCapabilities>) -> Self {
            Self { kind, name, models, restriction: Restriction::Unrestricted }
        }

        fn restricted(mut self, restriction: Restriction) -> Self {
            self.restriction = restriction;
            self
        }
    }

    #[async_trait]
    impl Provider for FixtureProvider {
        fn kind(&self) -> ProviderKind {
            self.kind
        }

        fn name(&self) -> &str {
            self.name
        }

        fn list_models(&self) -> Vec<&'static str> {
            self.restriction.filter(self.models.iter().map(|m| m.canonical_name))
        }

        fn capabilities(&self, canonical_name: &str) -> Option<ModelCapabilities> {
            if !self.restriction.is_allowed(canonical_name) {
                return None;
            }

            self.models.iter().find(|m| m.canonical_name.eq_ignore_ascii_case(canonical_name)).cloned()
        }

        fn resolve_alias(&self, name: &str) -> Option<&'static str> {
            let model = self
                .models
                .iter()
                .find(|m| m.canonical_name.eq_ignore_ascii_case(name) || m.aliases.iter().any(|a| a.eq_ignore_ascii_case(name)))?;

            self.restriction.is_allowed(model.canonical_name).then_some(model.canonical_name)
        }

        async fn generate(&self, _request: GenerateRequest) -> Result<crate::request::GenerateResponse, ProviderError> {
            unimplemented!("fixture provider is resolution-only")
        }
    }

    fn model(canonical_name: &'static str, category: Category, supports_images: bool) -> ModelCapabilities {
        ModelCapabilities {
            provider: ProviderKind::OpenAI,
            canonical_name,
            aliases: &[],
            context_tokens: 128_000,
            category,
            supports_images,
            max_image_bytes: if supports_images { 20 * 1024 * 1024 } else { 0 },
            supported_image_formats: if supports_images { &[catalog::ImageFormat::Png] } else { &[] },
            supports_extended_thinking: false,
            supports_system_prompt: true,
            supports_temperature: true,
            temperature_policy: catalog::TemperaturePolicy::Range { lo: 0.0, hi: 2.0 },
        }
    }

    #[test]
    fn earlier_provider_wins_a_shared_canonical_name() {
        let shared = model("shared-model", Category::Balanced, false);
        let openai = FixtureProvider::new(ProviderKind::OpenAI, "openai", vec![shared.clone()]);
        let openrouter = FixtureProvider::new(ProviderKind::OpenRouter, "openrouter", vec![shared]);

        let registry = ProviderRegistry::new(vec![Box::new(openai), Box::new(openrouter)]);

        let (provider, canonical) = registry.resolve("shared-model").unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(canonical, "shared-model");
    }

    #[test]
    fn auto_is_never_resolved_directly() {
        let registry = ProviderRegistry::new(vec![]);
        assert_eq!(registry.resolve("auto"), Err(ResolveError::AutoUnresolved));
    }

    #[test]
    fn unknown_model_is_not_found() {
        let registry = ProviderRegistry::new(vec![]);
        assert!(matches!(registry.resolve("nonexistent"), Err(ResolveError::ModelNotFound(_))));
    }

    #[test]
    fn auto_selection_without_images_prefers_openai_over_openrouter() {
        let gpt4o = model("gpt-4o", Category::Balanced, true);
        let sonnet = model("anthropic/claude-3-5-sonnet", Category::Balanced, true);

        let openai = FixtureProvider::new(ProviderKind::OpenAI, "openai", vec![gpt4o]);
        let openrouter = FixtureProvider::new(ProviderKind::OpenRouter, "openrouter", vec![sonnet]);

        let registry = ProviderRegistry::new(vec![Box::new(openai), Box::new(openrouter)]);

        let chosen = registry.select_auto(Category::Balanced, false, None).unwrap();
        assert_eq!(chosen, "gpt-4o");
    }

    #[test]
    fn auto_selection_with_images_prefers_the_default_vision_model() {
        let gpt4o = model("gpt-4o", Category::Balanced, true);
        let openai = FixtureProvider::new(ProviderKind::OpenAI, "openai", vec![gpt4o]);
        let registry = ProviderRegistry::new(vec![Box::new(openai)]);

        let chosen = registry.select_auto(Category::Balanced, true, Some("gpt-4o")).unwrap();
        assert_eq!(chosen, "gpt-4o");
    }

    #[test]
    fn auto_selection_with_images_fails_when_nothing_supports_vision() {
        let text_only = model("text-only", Category::Balanced, false);
        let openai = FixtureProvider::new(ProviderKind::OpenAI, "openai", vec![text_only]);
        let registry = ProviderRegistry::new(vec![Box::new(openai)]);

        assert_eq!(registry.select_auto(Category::Balanced, true, None), Err(AutoSelectError::NoVisionModelAvailable));
    }

    #[test]
    fn restriction_removes_a_model_from_auto_selection() {
        let fast = model("fast-model", Category::Fast, false);
        let balanced = model("balanced-model", Category::Balanced, false);

        let (restriction, _) = Restriction::parse("balanced-model");
        let openai =
            FixtureProvider::new(ProviderKind::OpenAI, "openai", vec![fast, balanced]).restricted(restriction);

        let registry = ProviderRegistry::new(vec![Box::new(openai)]);

        let chosen = registry.select_auto(Category::Fast, false, None).unwrap();
        assert_eq!(chosen, "balanced-model", "fast-model is restricted away, balanced is next in the fast ranking");
    }

    #[test]
    fn no_candidates_when_registry_is_empty() {
        let registry = ProviderRegistry::new(vec![]);
        assert_eq!(registry.select_auto(Category::Fast, false, None), Err(AutoSelectError::NoCandidates(Category::Fast)));
    }

    #[test]
    fn vision_category_auto_selection_succeeds_without_a_configured_default_vision_model() {
        // No catalog entry carries `Category::Vision` itself; the vision
        // tool's category ranking must fall back to "every image-capable
        // model", not an exact (and unsatisfiable) category match.
        let vision_model = model("vision-model", Category::Balanced, true);
        let openai = FixtureProvider::new(ProviderKind::OpenAI, "openai", vec![vision_model]);
        let registry = ProviderRegistry::new(vec![Box::new(openai)]);

        let chosen = registry.select_auto(Category::Vision, true, None).unwrap();
        assert_eq!(chosen, "vision-model");
    }

    #[test]
    fn vision_category_auto_selection_excludes_text_only_models() {
        let vision_model = model("vision-model", Category::Balanced, true);
        let text_only = model("text-only-model", Category::Balanced, false);
        let openai = FixtureProvider::new(ProviderKind::OpenAI, "openai", vec![vision_model, text_only]);
        let registry = ProviderRegistry::new(vec![Box::new(openai)]);

        let chosen = registry.select_auto(Category::Vision, false, None).unwrap();
        assert_eq!(chosen, "vision-model", "auto-mode for a vision-category tool must never pick a text-only model");
    }
}
