use catalog::Category;
use serde_json::json;

use crate::tool::Tool;

/// Weighs multiple stances on a proposal within a single model call; a
/// natural next step after a `thinkdeep` conversation (see
/// `Kernel::maintain_thread`'s continuation suggestions).
pub struct Consensus;

impl Tool for Consensus {
    fn name(&self) -> &'static str {
        "consensus"
    }

    fn description(&self) -> &'static str {
        "Gather and weigh multiple perspectives on a proposal"
    }

    fn category(&self) -> Category {
        Category::ExtendedReasoning
    }

    fn system_prompt(&self) -> &'static str {
        "You are weighing a proposal from multiple stances (e.g. pragmatic, \
         risk-averse, and user-focused). Present each stance's verdict, then \
         synthesize a final recommendation that accounts for the \
         disagreement between them."
    }

    fn primary_field_description(&self) -> &'static str {
        "The proposal or decision to evaluate"
    }

    fn extra_schema_properties(&self) -> Vec<(&'static str, serde_json::Value)> {
        vec![("stances", json!({ "type": "array", "items": { "type": "string" }, "description": "Named stances to evaluate from" }))]
    }
}
