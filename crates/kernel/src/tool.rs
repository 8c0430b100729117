//! The `Tool` capability set: a single interface with tagged variants
//! standing in for dynamic dispatch on tool classes. Each of the ~14 tools
//! is a thin specialization: a system prompt, an input-schema declaration,
//! and a model category, dispatched uniformly by [`crate::kernel::Kernel`].

use catalog::Category;
use config::ThinkingMode;
use serde_json::Value;

pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// The candidate category auto-mode ranks against. Ignored for tools
    /// where [`Self::requires_model`] is `false`.
    fn category(&self) -> Category;

    /// Tools that never call a provider (`listmodels`, `version`) skip the
    /// whole kernel pipeline and emit a deterministic response instead.
    fn requires_model(&self) -> bool {
        true
    }

    /// The instructions sent as the provider request's system prompt.
    fn system_prompt(&self) -> &'static str;

    /// Name of the top-level free-text field the prompt-size gate applies to.
    /// Most tools call it `prompt`; step-based tools use `step`.
    fn primary_field(&self) -> &'static str {
        "prompt"
    }

    fn primary_field_description(&self) -> &'static str;

    /// Extra JSON Schema properties beyond the common envelope (model,
    /// temperature, thinking_mode, use_web_search, continuation_id, files,
    /// images) and the primary field.
    fn extra_schema_properties(&self) -> Vec<(&'static str, Value)> {
        Vec::new()
    }

    fn extra_required(&self) -> Vec<&'static str> {
        Vec::new()
    }

    /// A tool-specific default thinking mode, used when the request omits
    /// one. `None` defers to `DEFAULT_THINKING_MODE_THINKDEEP` / the model's
    /// own default behavior.
    fn default_thinking_mode(&self) -> Option<ThinkingMode> {
        None
    }
}
