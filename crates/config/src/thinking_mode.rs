/// How much reasoning budget a tool should request from a model that
/// supports extended thinking. Unsupported on models whose capability flag
/// is false; the provider adapter is responsible for ignoring it there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThinkingMode {
    Minimal,
    Low,
    Medium,
    High,
    Max,
}

impl Default for ThinkingMode {
    fn default() -> Self {
        Self::High
    }
}

impl ThinkingMode {
    /// Case-insensitive parse. Returns `None` on anything unrecognized;
    /// callers fall back to [`ThinkingMode::default`] and log a warning, per
    /// the same pattern used for an unrecognized log filter string.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "minimal" => Some(Self::Minimal),
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "max" => Some(Self::Max),
            _ => None,
        }
    }

    /// Parse `raw`, falling back to the default and logging a warning on an
    /// unrecognized value.
    pub fn parse_or_default_with_warning(raw: &str, env_var: &str) -> Self {
        Self::parse(raw).unwrap_or_else(|| {
            log::warn!("{env_var}={raw:?} is not a recognized thinking mode, falling back to {:?}", Self::default());
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_level_case_insensitively() {
        assert_eq!(ThinkingMode::parse("High"), Some(ThinkingMode::High));
        assert_eq!(ThinkingMode::parse("MAX"), Some(ThinkingMode::Max));
        assert_eq!(ThinkingMode::parse("minimal"), Some(ThinkingMode::Minimal));
    }

    #[test]
    fn unknown_value_falls_back_to_default() {
        assert_eq!(ThinkingMode::parse_or_default_with_warning("extreme", "DEFAULT_THINKING_MODE_THINKDEEP"), ThinkingMode::High);
    }
}
