//! Environment-driven process configuration.
//!
//! Unlike the layered TOML configuration this workspace's ancestor used,
//! this server has exactly one configuration source: the process
//! environment, read once at startup. There is no hot reload.

mod model_selector;
mod restriction;
mod thinking_mode;

use anyhow::{Context, bail};
use secrecy::SecretString;

pub use model_selector::ModelSelector;
pub use restriction::{Restriction, RestrictionService};
pub use thinking_mode::ThinkingMode;

const DEFAULT_CONVERSATION_TTL_HOURS: u64 = 3;
const DEFAULT_MAX_CONVERSATION_TURNS: usize = 20;
const DEFAULT_MCP_PROMPT_SIZE_LIMIT: usize = 50_000;

/// Settings for the custom, OpenAI-compatible provider. Present only when
/// `CUSTOM_API_URL` is configured.
#[derive(Debug, Clone)]
pub struct CustomProviderConfig {
    pub api_url: String,
    pub api_key: Option<SecretString>,
    pub model_name: Option<String>,
}

/// Fully resolved process configuration, built once via [`Config::from_env`].
#[derive(Debug, Clone)]
pub struct Config {
    pub default_model: ModelSelector,
    pub default_thinking_mode: ThinkingMode,

    pub google_api_key: Option<SecretString>,
    pub openai_api_key: Option<SecretString>,
    pub openrouter_api_key: Option<SecretString>,
    pub custom: Option<CustomProviderConfig>,

    pub restrictions: RestrictionService,

    pub conversation_ttl_hours: u64,
    pub max_conversation_turns: usize,
    pub mcp_prompt_size_limit: usize,

    pub default_vision_model: Option<String>,

    pub redis_url: Option<String>,
    pub log_level: String,
}

impl Config {
    /// Read and validate the environment. Fails only when no provider at
    /// all is usable — at that point the server has no purpose.
    pub fn from_env() -> anyhow::Result<Self> {
        let google_api_key = secret_env("GEMINI_API_KEY");
        let openai_api_key = secret_env("OPENAI_API_KEY");
        let openrouter_api_key = secret_env("OPENROUTER_API_KEY");

        let custom = present_env("CUSTOM_API_URL").map(|api_url| CustomProviderConfig {
            api_url,
            api_key: secret_env("CUSTOM_API_KEY"),
            model_name: present_env("CUSTOM_MODEL_NAME"),
        });

        if google_api_key.is_none() && openai_api_key.is_none() && openrouter_api_key.is_none() && custom.is_none() {
            bail!("no provider is configured: set at least one of GEMINI_API_KEY, OPENAI_API_KEY, OPENROUTER_API_KEY, or CUSTOM_API_URL");
        }

        let default_model = present_env("DEFAULT_MODEL").map(|raw| ModelSelector::parse(&raw)).unwrap_or_default();

        let default_thinking_mode = match present_env("DEFAULT_THINKING_MODE_THINKDEEP") {
            Some(raw) => ThinkingMode::parse_or_default_with_warning(&raw, "DEFAULT_THINKING_MODE_THINKDEEP"),
            None => ThinkingMode::default(),
        };

        let conversation_ttl_hours = parse_env_or("CONVERSATION_TIMEOUT_HOURS", DEFAULT_CONVERSATION_TTL_HOURS)?;
        let max_conversation_turns = parse_env_or("MAX_CONVERSATION_TURNS", DEFAULT_MAX_CONVERSATION_TURNS)?;
        let mcp_prompt_size_limit = parse_env_or("MCP_PROMPT_SIZE_LIMIT", DEFAULT_MCP_PROMPT_SIZE_LIMIT)?;

        Ok(Self {
            default_model,
            default_thinking_mode,
            google_api_key,
            openai_api_key,
            openrouter_api_key,
            custom,
            restrictions: RestrictionService::from_env(),
            conversation_ttl_hours,
            max_conversation_turns,
            mcp_prompt_size_limit,
            default_vision_model: present_env("DEFAULT_VISION_MODEL"),
            redis_url: present_env("REDIS_URL"),
            log_level: present_env("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// An API key is absent if the variable is unset, blank, or one of the
/// `your_*_api_key_here`-style placeholder values shipped in example env
/// files.
fn is_present(raw: &str) -> bool {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return false;
    }

    let lower = trimmed.to_ascii_lowercase();
    !(lower.starts_with("your_") && lower.ends_with("_here"))
}

fn present_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| is_present(v))
}

fn secret_env(key: &str) -> Option<SecretString> {
    present_env(key).map(SecretString::from)
}

fn parse_env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match present_env(key) {
        Some(raw) => raw.parse().with_context(|| format!("{key}={raw:?} is not a valid value")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_values_are_treated_as_absent() {
        assert!(!is_present("your_gemini_api_key_here"));
        assert!(!is_present("YOUR_OPENAI_API_KEY_HERE"));
        assert!(!is_present(""));
        assert!(!is_present("   "));
    }

    #[test]
    fn a_real_looking_key_is_present() {
        assert!(is_present("sk-abc123"));
    }
}
