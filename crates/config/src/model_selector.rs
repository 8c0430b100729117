/// The requested model for a tool call, before alias resolution or
/// auto-mode selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSelector {
    /// Resolve via category-based ranking (see `providers::registry::select_auto`).
    Auto,
    /// An alias or canonical name, resolved through the provider registry.
    Named(String),
}

impl ModelSelector {
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("auto") {
            Self::Auto
        } else {
            Self::Named(raw.trim().to_string())
        }
    }
}

impl Default for ModelSelector {
    fn default() -> Self {
        Self::Auto
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_is_case_insensitive() {
        assert_eq!(ModelSelector::parse("Auto"), ModelSelector::Auto);
        assert_eq!(ModelSelector::parse("AUTO"), ModelSelector::Auto);
    }

    #[test]
    fn anything_else_is_a_named_selector() {
        assert_eq!(ModelSelector::parse("gpt-4o"), ModelSelector::Named("gpt-4o".to_string()));
    }
}
