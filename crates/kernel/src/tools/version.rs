use std::fmt::Write as _;

use catalog::Category;
use providers::ProviderRegistry;

use crate::{
    response::{ContentType, ResponseMetadata, Status, ToolResponse},
    tool::Tool,
};

pub struct Version;

impl Tool for Version {
    fn name(&self) -> &'static str {
        "version"
    }

    fn description(&self) -> &'static str {
        "Report this server's version and active providers"
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

/// `CARGO_PKG_VERSION` plus the active providers in priority order;
/// provider-call-free per the `requiresModel=false` contract.
pub fn render(registry: &ProviderRegistry) -> ToolResponse {
    let mut content = String::new();
    let _ = writeln!(content, "version: {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(content, "providers:");

    for provider in registry.providers() {
        let _ = writeln!(content, "  - {} (priority {})", provider.name(), provider.priority());
    }

    if registry.providers().is_empty() {
        content.push_str("  (none configured)\n");
    }

    ToolResponse {
        content,
        content_type: ContentType::Text,
        status: Status::success(),
        metadata: ResponseMetadata::default(),
        continuation_offer: None,
    }
}
