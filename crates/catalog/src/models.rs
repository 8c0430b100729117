//! The actual catalog data. Kept apart from `lib.rs` so the data entries read
//! as a table rather than being interleaved with the type definitions.

use crate::{Category, ImageFormat, ModelCapabilities, ProviderKind, TemperaturePolicy};

/// Context window assumed for a custom (OpenAI-compatible) model whose real
/// window isn't declared by the operator. Conservative default for local
/// inference servers.
pub const CUSTOM_DEFAULT_CONTEXT_TOKENS: u32 = 32_000;

const STANDARD_IMAGE_FORMATS: &[ImageFormat] = &[
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::Gif,
    ImageFormat::Webp,
];

pub(crate) fn build() -> Vec<ModelCapabilities> {
    vec![
        // --- Google (native) ---------------------------------------------------
        ModelCapabilities {
            provider: ProviderKind::Google,
            canonical_name: "gemini-2.5-pro",
            aliases: &["pro", "gemini-pro", "geminipro"],
            context_tokens: 1_048_576,
            category: Category::ExtendedReasoning,
            supports_images: true,
            max_image_bytes: 20 * 1024 * 1024,
            supported_image_formats: STANDARD_IMAGE_FORMATS,
            supports_extended_thinking: true,
            supports_system_prompt: true,
            supports_temperature: true,
            temperature_policy: TemperaturePolicy::Range { lo: 0.0, hi: 2.0 },
        },
        ModelCapabilities {
            provider: ProviderKind::Google,
            canonical_name: "gemini-2.5-flash",
            aliases: &["flash", "gemini-flash"],
            context_tokens: 1_048_576,
            category: Category::Balanced,
            supports_images: true,
            max_image_bytes: 20 * 1024 * 1024,
            supported_image_formats: STANDARD_IMAGE_FORMATS,
            supports_extended_thinking: true,
            supports_system_prompt: true,
            supports_temperature: true,
            temperature_policy: TemperaturePolicy::Range { lo: 0.0, hi: 2.0 },
        },
        ModelCapabilities {
            provider: ProviderKind::Google,
            canonical_name: "gemini-2.0-flash",
            aliases: &["flash2", "gemini-flash-2"],
            context_tokens: 1_048_576,
            category: Category::Fast,
            supports_images: true,
            max_image_bytes: 20 * 1024 * 1024,
            supported_image_formats: STANDARD_IMAGE_FORMATS,
            supports_extended_thinking: false,
            supports_system_prompt: true,
            supports_temperature: true,
            temperature_policy: TemperaturePolicy::Range { lo: 0.0, hi: 2.0 },
        },
        // --- OpenAI (native) -----------------------------------------------------
        ModelCapabilities {
            provider: ProviderKind::OpenAI,
            canonical_name: "o3",
            aliases: &["o3-reasoning"],
            context_tokens: 200_000,
            category: Category::ExtendedReasoning,
            supports_images: false,
            max_image_bytes: 0,
            supported_image_formats: &[],
            supports_extended_thinking: true,
            supports_system_prompt: false,
            supports_temperature: false,
            temperature_policy: TemperaturePolicy::Fixed(1.0),
        },
        ModelCapabilities {
            provider: ProviderKind::OpenAI,
            canonical_name: "o3-mini",
            aliases: &["mini", "o3mini"],
            context_tokens: 200_000,
            category: Category::Reasoning,
            supports_images: false,
            max_image_bytes: 0,
            supported_image_formats: &[],
            supports_extended_thinking: true,
            supports_system_prompt: false,
            supports_temperature: false,
            temperature_policy: TemperaturePolicy::Fixed(1.0),
        },
        ModelCapabilities {
            provider: ProviderKind::OpenAI,
            canonical_name: "gpt-4.1",
            aliases: &["gpt4.1", "41"],
            context_tokens: 1_047_576,
            category: Category::Balanced,
            supports_images: true,
            max_image_bytes: 20 * 1024 * 1024,
            supported_image_formats: &[ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::Webp],
            supports_extended_thinking: false,
            supports_system_prompt: true,
            supports_temperature: true,
            temperature_policy: TemperaturePolicy::Range { lo: 0.0, hi: 2.0 },
        },
        ModelCapabilities {
            provider: ProviderKind::OpenAI,
            canonical_name: "gpt-4o",
            aliases: &["4o", "gpt4o"],
            context_tokens: 128_000,
            category: Category::Balanced,
            supports_images: true,
            max_image_bytes: 20 * 1024 * 1024,
            supported_image_formats: &[ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::Webp],
            supports_extended_thinking: false,
            supports_system_prompt: true,
            supports_temperature: true,
            temperature_policy: TemperaturePolicy::Range { lo: 0.0, hi: 2.0 },
        },
        ModelCapabilities {
            provider: ProviderKind::OpenAI,
            canonical_name: "gpt-4o-mini",
            aliases: &["4o-mini", "gpt4o-mini"],
            context_tokens: 128_000,
            category: Category::Fast,
            supports_images: true,
            max_image_bytes: 20 * 1024 * 1024,
            supported_image_formats: &[ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::Webp],
            supports_extended_thinking: false,
            supports_system_prompt: true,
            supports_temperature: true,
            temperature_policy: TemperaturePolicy::Range { lo: 0.0, hi: 2.0 },
        },
        // --- OpenRouter (aggregator, catch-all) -----------------------------------
        ModelCapabilities {
            provider: ProviderKind::OpenRouter,
            canonical_name: "anthropic/claude-3-5-sonnet",
            aliases: &["sonnet", "claude-sonnet"],
            context_tokens: 200_000,
            category: Category::Balanced,
            supports_images: true,
            max_image_bytes: 5 * 1024 * 1024,
            supported_image_formats: &[ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::Webp],
            supports_extended_thinking: false,
            supports_system_prompt: true,
            supports_temperature: true,
            temperature_policy: TemperaturePolicy::Range { lo: 0.0, hi: 1.0 },
        },
        ModelCapabilities {
            provider: ProviderKind::OpenRouter,
            canonical_name: "anthropic/claude-3-opus",
            aliases: &["opus", "claude-opus"],
            context_tokens: 200_000,
            category: Category::Reasoning,
            supports_images: true,
            max_image_bytes: 5 * 1024 * 1024,
            supported_image_formats: &[ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::Webp],
            supports_extended_thinking: false,
            supports_system_prompt: true,
            supports_temperature: true,
            temperature_policy: TemperaturePolicy::Range { lo: 0.0, hi: 1.0 },
        },
        ModelCapabilities {
            provider: ProviderKind::OpenRouter,
            canonical_name: "deepseek/deepseek-r1",
            aliases: &["r1", "deepseek-r1"],
            context_tokens: 64_000,
            category: Category::ExtendedReasoning,
            supports_images: false,
            max_image_bytes: 0,
            supported_image_formats: &[],
            supports_extended_thinking: true,
            supports_system_prompt: true,
            supports_temperature: true,
            temperature_policy: TemperaturePolicy::Range { lo: 0.0, hi: 2.0 },
        },
        ModelCapabilities {
            provider: ProviderKind::OpenRouter,
            canonical_name: "meta-llama/llama-3.1-405b-instruct",
            aliases: &["llama", "llama405b"],
            context_tokens: 128_000,
            category: Category::Balanced,
            supports_images: false,
            max_image_bytes: 0,
            supported_image_formats: &[],
            supports_extended_thinking: false,
            supports_system_prompt: true,
            supports_temperature: true,
            temperature_policy: TemperaturePolicy::Range { lo: 0.0, hi: 2.0 },
        },
        ModelCapabilities {
            provider: ProviderKind::OpenRouter,
            canonical_name: "mistralai/mistral-large",
            aliases: &["mistral", "mistral-large"],
            context_tokens: 128_000,
            category: Category::Fast,
            supports_images: false,
            max_image_bytes: 0,
            supported_image_formats: &[],
            supports_extended_thinking: false,
            supports_system_prompt: true,
            supports_temperature: true,
            temperature_policy: TemperaturePolicy::Range { lo: 0.0, hi: 1.0 },
        },
    ]
}

/// Hard-coded per-provider-family default for a category, consulted by
/// auto-mode before falling back to the first candidate in declaration
/// order. `None` means the provider family has no opinion for that category.
pub fn family_default(provider: ProviderKind, category: Category) -> Option<&'static str> {
    match (provider, category) {
        (ProviderKind::Google, Category::Fast) => Some("gemini-2.0-flash"),
        (ProviderKind::Google, Category::Balanced) => Some("gemini-2.5-flash"),
        (ProviderKind::Google, Category::Reasoning | Category::ExtendedReasoning) => Some("gemini-2.5-pro"),
        (ProviderKind::Google, Category::Vision) => Some("gemini-2.5-flash"),

        (ProviderKind::OpenAI, Category::Fast) => Some("gpt-4o-mini"),
        (ProviderKind::OpenAI, Category::Balanced) => Some("gpt-4o"),
        (ProviderKind::OpenAI, Category::Reasoning) => Some("o3-mini"),
        (ProviderKind::OpenAI, Category::ExtendedReasoning) => Some("o3"),
        (ProviderKind::OpenAI, Category::Vision) => Some("gpt-4o"),

        (ProviderKind::OpenRouter, Category::Fast) => Some("mistralai/mistral-large"),
        (ProviderKind::OpenRouter, Category::Balanced) => Some("anthropic/claude-3-5-sonnet"),
        (ProviderKind::OpenRouter, Category::Reasoning) => Some("anthropic/claude-3-opus"),
        (ProviderKind::OpenRouter, Category::ExtendedReasoning) => Some("deepseek/deepseek-r1"),
        (ProviderKind::OpenRouter, Category::Vision) => Some("anthropic/claude-3-5-sonnet"),

        (ProviderKind::Custom, _) => None,
    }
}
