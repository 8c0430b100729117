//! Per-provider allow-lists, parsed once at startup from comma-separated
//! environment strings and never mutated afterward.

use std::collections::HashSet;

use catalog::ProviderKind;

/// A single provider's restriction: either everything the provider exposes
/// is usable, or only an explicit set of canonical names is.
#[derive(Debug, Clone)]
pub enum Restriction {
    Unrestricted,
    Allowed(HashSet<String>),
}

impl Restriction {
    /// Parse a comma-separated list of tokens (aliases or canonical names)
    /// against the catalog. Tokens that don't resolve to any known model are
    /// returned separately so the caller can log them; they never abort
    /// parsing and are simply absent from the resulting allow-set.
    ///
    /// An empty or blank `raw` string means unrestricted.
    pub fn parse(raw: &str) -> (Self, Vec<String>) {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return (Self::Unrestricted, Vec::new());
        }

        let mut allowed = HashSet::new();
        let mut unresolved = Vec::new();

        for token in trimmed.split(',') {
            let token = token.trim();

            if token.is_empty() {
                continue;
            }

            match catalog::resolve_alias(token) {
                Some(canonical) => {
                    allowed.insert(canonical.to_string());
                }
                None => unresolved.push(token.to_string()),
            }
        }

        (Self::Allowed(allowed), unresolved)
    }

    /// True when the provider is unrestricted, or `canonical_name` is in the
    /// explicit allow-set. `canonical_name` must already be alias-resolved;
    /// restrictions are defined over canonical names only, so a caller
    /// cannot bypass a restriction through an alias.
    pub fn is_allowed(&self, canonical_name: &str) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Allowed(set) => set.contains(canonical_name),
        }
    }

    /// Retain only allowed entries from `names`, preserving order.
    pub fn filter<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
        names.into_iter().filter(|name| self.is_allowed(name)).collect()
    }
}

/// The four providers' restrictions, built once from the environment.
#[derive(Debug, Clone)]
pub struct RestrictionService {
    google: Restriction,
    openai: Restriction,
    openrouter: Restriction,
    custom: Restriction,
}

impl RestrictionService {
    /// Construct from the three allow-list environment variables. `custom`
    /// has no corresponding allow-list variable — the operator declares
    /// exactly one custom model, so it is always unrestricted.
    pub fn from_env() -> Self {
        Self::from_raw(
            &std::env::var("GOOGLE_ALLOWED_MODELS").unwrap_or_default(),
            &std::env::var("OPENAI_ALLOWED_MODELS").unwrap_or_default(),
            &std::env::var("OPENROUTER_ALLOWED_MODELS").unwrap_or_default(),
        )
    }

    fn from_raw(google: &str, openai: &str, openrouter: &str) -> Self {
        let (google, google_unresolved) = Restriction::parse(google);
        let (openai, openai_unresolved) = Restriction::parse(openai);
        let (openrouter, openrouter_unresolved) = Restriction::parse(openrouter);

        for (var, unresolved) in [
            ("GOOGLE_ALLOWED_MODELS", &google_unresolved),
            ("OPENAI_ALLOWED_MODELS", &openai_unresolved),
            ("OPENROUTER_ALLOWED_MODELS", &openrouter_unresolved),
        ] {
            for token in unresolved {
                log::warn!("{var} lists {token:?}, which does not resolve to any known model; ignoring it");
            }
        }

        Self { google, openai, openrouter, custom: Restriction::Unrestricted }
    }

    pub fn for_provider(&self, provider: ProviderKind) -> &Restriction {
        match provider {
            ProviderKind::Google => &self.google,
            ProviderKind::OpenAI => &self.openai,
            ProviderKind::OpenRouter => &self.openrouter,
            ProviderKind::Custom => &self.custom,
        }
    }

    pub fn is_allowed(&self, provider: ProviderKind, canonical_name: &str) -> bool {
        self.for_provider(provider).is_allowed(canonical_name)
    }

    pub fn filter<'a>(&self, provider: ProviderKind, names: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
        self.for_provider(provider).filter(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_string_is_unrestricted() {
        let (restriction, unresolved) = Restriction::parse("");
        assert!(matches!(restriction, Restriction::Unrestricted));
        assert!(unresolved.is_empty());
    }

    #[test]
    fn resolves_alias_to_canonical_before_restricting() {
        let (restriction, unresolved) = Restriction::parse("mini");
        assert!(unresolved.is_empty());
        assert!(restriction.is_allowed("o3-mini"));
        assert!(!restriction.is_allowed("mini"));
    }

    #[test]
    fn unknown_token_is_reported_but_does_not_abort() {
        let (_restriction, unresolved) = Restriction::parse("o3-mini, not-a-real-model");
        assert_eq!(unresolved, vec!["not-a-real-model".to_string()]);
    }

    #[test]
    fn restriction_blocks_alias_of_a_disallowed_name() {
        let (restriction, _) = Restriction::parse("o3");
        assert!(!restriction.is_allowed("o3-mini"));
        assert!(restriction.is_allowed("o3"));
    }

    #[test]
    fn parsing_is_idempotent() {
        let (first, _) = Restriction::parse("o3-mini,gpt-4o");
        let (second, _) = Restriction::parse("o3-mini,gpt-4o");
        assert_eq!(first.is_allowed("o3-mini"), second.is_allowed("o3-mini"));
        assert_eq!(first.is_allowed("gpt-4o"), second.is_allowed("gpt-4o"));
    }

    #[test]
    fn custom_provider_is_always_unrestricted() {
        let service = RestrictionService::from_raw("o3-mini", "", "");
        assert!(matches!(service.for_provider(ProviderKind::Custom), Restriction::Unrestricted));
    }
}
