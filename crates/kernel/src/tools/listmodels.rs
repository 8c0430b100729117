use std::fmt::Write as _;

use catalog::Category;
use providers::ProviderRegistry;

use crate::{
    response::{ContentType, ResponseMetadata, Status, ToolResponse},
    tool::Tool,
};

pub struct ListModels;

impl Tool for ListModels {
    fn name(&self) -> &'static str {
        "listmodels"
    }

    fn description(&self) -> &'static str {
        "List every model currently available through this server"
    }

    fn category(&self) -> Category {
        Category::Balanced
    }

    fn requires_model(&self) -> bool {
        false
    }

    fn system_prompt(&self) -> &'static str {
        ""
    }

    fn primary_field_description(&self) -> &'static str {
        "unused"
    }
}

/// Markdown table grouped by provider: name, aliases, context window,
/// capabilities. Shape isn't specified by the tool's contract beyond
/// "deterministic"; this is this server's chosen rendering.
pub fn render(registry: &ProviderRegistry) -> ToolResponse {
    let mut content = String::new();

    for provider in registry.providers() {
        let _ = writeln!(content, "## {} (priority {})\n", provider.name(), provider.priority());
        let _ = writeln!(content, "| Model | Aliases | Context | Category | Images |");
        let _ = writeln!(content, "|---|---|---|---|---|");

        for canonical in provider.list_models() {
            let Some(caps) = provider.capabilities(canonical) else { continue };
            let aliases = catalog::all()
                .iter()
                .find(|m| m.canonical_name == canonical)
                .map(|m| m.aliases.join(", "))
                .unwrap_or_default();

            let _ = writeln!(
                content,
                "| {} | {} | {} | {:?} | {} |",
                canonical,
                aliases,
                caps.context_tokens,
                caps.category,
                if caps.supports_images { "yes" } else { "no" },
            );
        }

        content.push('\n');
    }

    if registry.providers().is_empty() {
        content.push_str("no providers are configured\n");
    }

    ToolResponse {
        content,
        content_type: ContentType::Text,
        status: Status::success(),
        metadata: ResponseMetadata::default(),
        continuation_offer: None,
    }
}
