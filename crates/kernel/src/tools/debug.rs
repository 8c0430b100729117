use catalog::Category;
use serde_json::json;

use crate::tool::Tool;

pub struct Debug;

impl Tool for Debug {
    fn name(&self) -> &'static str {
        "debug"
    }

    fn description(&self) -> &'static str {
        "Root-cause a bug from a failure description and supporting evidence"
    }

    fn category(&self) -> Category {
        Category::Reasoning
    }

    fn system_prompt(&self) -> &'static str {
        "You are debugging a failure. Work from symptom to root cause; state \
         your hypothesis, what evidence supports or rules it out, and what \
         to try next. If the evidence given is insufficient, say what \
         additional file or output you need rather than guessing."
    }

    fn primary_field(&self) -> &'static str {
        "step"
    }

    fn primary_field_description(&self) -> &'static str {
        "The failure symptom, error message, or current investigation step"
    }

    fn extra_schema_properties(&self) -> Vec<(&'static str, serde_json::Value)> {
        vec![("hypothesis", json!({ "type": "string", "description": "Current working theory, if any" }))]
    }
}
