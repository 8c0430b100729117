use catalog::Category;
use config::ThinkingMode;

use crate::tool::Tool;

/// Extended multi-step reasoning over a hard problem.
pub struct ThinkDeep;

impl Tool for ThinkDeep {
    fn name(&self) -> &'static str {
        "thinkdeep"
    }

    fn description(&self) -> &'static str {
        "Extended reasoning and analysis for complex problems"
    }

    fn category(&self) -> Category {
        Category::ExtendedReasoning
    }

    fn system_prompt(&self) -> &'static str {
        "You are performing deep, extended reasoning. Decompose the problem, \
         consider multiple angles and failure modes, and reach a conclusion \
         you can defend. Favor correctness over speed."
    }

    fn primary_field_description(&self) -> &'static str {
        "The problem or question to reason deeply about"
    }

    fn default_thinking_mode(&self) -> Option<ThinkingMode> {
        Some(ThinkingMode::High)
    }
}
