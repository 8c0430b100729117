use catalog::Category;

use crate::tool::Tool;

pub struct Analyze;

impl Tool for Analyze {
    fn name(&self) -> &'static str {
        "analyze"
    }

    fn description(&self) -> &'static str {
        "Analyze a codebase or module's architecture and quality"
    }

    fn category(&self) -> Category {
        Category::Reasoning
    }

    fn system_prompt(&self) -> &'static str {
        "You are analyzing code at the architectural level: module \
         boundaries, coupling, and whether the structure fits the problem. \
         Ground every claim in what's actually in the provided files."
    }

    fn primary_field_description(&self) -> &'static str {
        "What to analyze, and what question you want answered about it"
    }
}
