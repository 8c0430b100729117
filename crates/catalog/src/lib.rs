//! The static model catalog.
//!
//! A read-only, in-process table describing every model this server knows
//! how to route to, keyed by canonical (wire) name. Built once behind a
//! [`std::sync::LazyLock`] and never mutated afterward — there is no dynamic
//! reload, matching the process-wide-singleton pattern the rest of this
//! codebase uses for its registries.

mod models;

use std::sync::LazyLock;

pub use models::{CUSTOM_DEFAULT_CONTEXT_TOKENS, family_default};

/// The four model providers this server can route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProviderKind {
    /// Native Google Gemini API.
    Google,
    /// Native OpenAI API.
    OpenAI,
    /// OpenRouter aggregator, `owner/model`-style canonical names.
    OpenRouter,
    /// An arbitrary OpenAI-compatible endpoint (local inference servers, etc).
    Custom,
}

impl ProviderKind {
    /// Lowercase identifier used in logs, `provider/model` overrides, and
    /// environment variable prefixes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::OpenAI => "openai",
            Self::OpenRouter => "openrouter",
            Self::Custom => "custom",
        }
    }

    /// Fixed initialization/resolution priority, lower wins. An earlier
    /// provider is authoritative for a canonical name over a later one.
    pub fn priority(self) -> u8 {
        match self {
            Self::Google => 0,
            Self::OpenAI => 1,
            Self::Custom => 2,
            Self::OpenRouter => 3,
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The tool-facing model category used for auto-mode candidate ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Cheap, low-latency models for mechanical tasks.
    Fast,
    /// General-purpose default for everyday tool calls.
    Balanced,
    /// Models tuned for multi-step reasoning.
    Reasoning,
    /// Models with long or unbounded "thinking" budgets.
    ExtendedReasoning,
    /// Vision-capable models, selected when images are attached.
    Vision,
}

/// An image format a model may accept as input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
}

/// How a model's sampling temperature may be set.
#[derive(Debug, Clone, PartialEq)]
pub enum TemperaturePolicy {
    /// Any value in `[lo, hi]` is accepted.
    Range { lo: f32, hi: f32 },
    /// The model only ever runs at one fixed temperature; requests must omit
    /// it on the wire (reasoning models typically fall here).
    Fixed(f32),
    /// Only these exact values are accepted.
    Discrete(Vec<f32>),
}

impl TemperaturePolicy {
    /// Validate `requested` against this policy, returning the value to
    /// actually send on the wire (`None` means: omit the parameter) and
    /// whether a correction was applied.
    pub fn resolve(&self, requested: Option<f32>) -> (Option<f32>, bool) {
        match self {
            Self::Fixed(_) => (None, requested.is_some()),
            Self::Range { lo, hi } => match requested {
                None => (None, false),
                Some(v) if v >= *lo && v <= *hi => (Some(v), false),
                Some(v) => (Some(v.clamp(*lo, *hi)), true),
            },
            Self::Discrete(allowed) => match requested {
                None => (None, false),
                Some(v) if allowed.iter().any(|a| (a - v).abs() < f32::EPSILON) => (Some(v), false),
                Some(v) => {
                    let nearest = allowed
                        .iter()
                        .copied()
                        .min_by(|a, b| (a - v).abs().partial_cmp(&(b - v).abs()).unwrap())
                        .unwrap_or(v);

                    (Some(nearest), true)
                }
            },
        }
    }
}

/// Everything the broker needs to know about a single model in order to
/// route to it, budget for it, and validate requests against it.
///
/// Invariant: if `supports_images` is false, `max_image_bytes == 0` and
/// `supported_image_formats` is empty.
#[derive(Debug, Clone)]
pub struct ModelCapabilities {
    pub provider: ProviderKind,
    pub canonical_name: &'static str,
    pub aliases: &'static [&'static str],
    pub context_tokens: u32,
    pub category: Category,
    pub supports_images: bool,
    pub max_image_bytes: u64,
    pub supported_image_formats: &'static [ImageFormat],
    pub supports_extended_thinking: bool,
    pub supports_system_prompt: bool,
    pub supports_temperature: bool,
    pub temperature_policy: TemperaturePolicy,
}

impl ModelCapabilities {
    /// A context window of at least one million tokens switches the token
    /// allocation policy (see `conversation::ModelContext::allocate`).
    pub fn is_large_context(&self) -> bool {
        self.context_tokens >= 1_000_000
    }
}

static CATALOG: LazyLock<Vec<ModelCapabilities>> = LazyLock::new(models::build);

/// The full static catalog, in declaration order.
pub fn all() -> &'static [ModelCapabilities] {
    &CATALOG
}

/// Look up a model by its exact canonical name.
pub fn by_canonical_name(name: &str) -> Option<&'static ModelCapabilities> {
    CATALOG.iter().find(|m| m.canonical_name.eq_ignore_ascii_case(name))
}

/// Resolve an alias or canonical name to its canonical form. Case-insensitive.
/// Idempotent: resolving an already-canonical name returns it unchanged.
pub fn resolve_alias(name: &str) -> Option<&'static str> {
    CATALOG.iter().find_map(|m| {
        if m.canonical_name.eq_ignore_ascii_case(name) {
            return Some(m.canonical_name);
        }

        m.aliases
            .iter()
            .any(|a| a.eq_ignore_ascii_case(name))
            .then_some(m.canonical_name)
    })
}

/// All models of a given category, declaration order (stable, used for
/// deterministic tie-breaking in auto-mode).
pub fn by_category(category: Category) -> impl Iterator<Item = &'static ModelCapabilities> {
    CATALOG.iter().filter(move |m| m.category == category)
}

/// Build a capability record for a user-configured custom (OpenAI-compatible)
/// model. Custom capabilities are declared by configuration, never
/// discovered, per the provider's contract.
pub fn custom_model_capabilities(canonical_name: &'static str) -> ModelCapabilities {
    ModelCapabilities {
        provider: ProviderKind::Custom,
        canonical_name,
        aliases: &[],
        context_tokens: CUSTOM_DEFAULT_CONTEXT_TOKENS,
        category: Category::Balanced,
        supports_images: false,
        max_image_bytes: 0,
        supported_image_formats: &[],
        supports_extended_thinking: false,
        supports_system_prompt: true,
        supports_temperature: true,
        temperature_policy: TemperaturePolicy::Range { lo: 0.0, hi: 2.0 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_resolution_is_idempotent() {
        let canonical = resolve_alias("flash").expect("alias should resolve");
        assert_eq!(resolve_alias(canonical), Some(canonical));
    }

    #[test]
    fn alias_resolution_is_case_insensitive() {
        assert_eq!(resolve_alias("FLASH"), resolve_alias("flash"));
    }

    #[test]
    fn unknown_name_does_not_resolve() {
        assert_eq!(resolve_alias("definitely-not-a-model"), None);
    }

    #[test]
    fn every_catalog_entry_respects_the_image_invariant() {
        for model in all() {
            if !model.supports_images {
                assert_eq!(model.max_image_bytes, 0, "{}", model.canonical_name);
                assert!(model.supported_image_formats.is_empty(), "{}", model.canonical_name);
            }
        }
    }

    #[test]
    fn canonical_names_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for model in all() {
            assert!(seen.insert(model.canonical_name), "duplicate: {}", model.canonical_name);
        }
    }

    #[test]
    fn temperature_policy_corrects_out_of_range() {
        let policy = TemperaturePolicy::Range { lo: 0.0, hi: 1.0 };
        let (value, corrected) = policy.resolve(Some(1.5));
        assert_eq!(value, Some(1.0));
        assert!(corrected);
    }

    #[test]
    fn fixed_temperature_policy_drops_the_value() {
        let policy = TemperaturePolicy::Fixed(1.0);
        let (value, _) = policy.resolve(Some(0.2));
        assert_eq!(value, None);
    }
}
