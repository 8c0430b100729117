//! Builds a tool's JSON Schema from its [`crate::tool::Tool`] declaration.
//! Tool schemas are declarative; the kernel validates uniformly.

use serde_json::{Map, Value, json};

use crate::tool::Tool;

/// The common envelope every model-requiring tool shares, plus the tool's
/// primary field and any tool-specific extras.
pub fn input_schema(tool: &dyn Tool) -> Value {
    let mut properties = Map::new();

    properties.insert(
        tool.primary_field().to_string(),
        json!({ "type": "string", "description": tool.primary_field_description() }),
    );

    if tool.requires_model() {
        properties.insert(
            "model".to_string(),
            json!({ "type": "string", "description": "Model alias, canonical name, or \"auto\"" }),
        );
        properties.insert("temperature".to_string(), json!({ "type": "number" }));
        properties.insert(
            "thinking_mode".to_string(),
            json!({ "type": "string", "enum": ["minimal", "low", "medium", "high", "max"] }),
        );
        properties.insert("use_web_search".to_string(), json!({ "type": "boolean" }));
        properties.insert("continuation_id".to_string(), json!({ "type": "string" }));
        properties.insert("files".to_string(), json!({ "type": "array", "items": { "type": "string" } }));
        properties.insert("images".to_string(), json!({ "type": "array", "items": { "type": "string" } }));
    }

    for (key, schema) in tool.extra_schema_properties() {
        properties.insert(key.to_string(), schema);
    }

    let mut required = vec![Value::String(tool.primary_field().to_string())];
    required.extend(tool.extra_required().into_iter().map(|field| Value::String(field.to_string())));

    json!({
        "type": "object",
        "properties": Value::Object(properties),
        "required": required,
    })
}

#[cfg(test)]
mod tests {
    use catalog::Category;

    use super::*;

    struct Probe;

    impl Tool for Probe {
        fn name(&self) -> &'static str {
            "probe"
        }

        fn description(&self) -> &'static str {
            "a probe tool"
        }

        fn category(&self) -> Category {
            Category::Balanced
        }

        fn system_prompt(&self) -> &'static str {
            "you are a probe"
        }

        fn primary_field_description(&self) -> &'static str {
            "what to probe"
        }
    }

    #[test]
    fn common_envelope_is_present_for_model_requiring_tools() {
        let schema = input_schema(&Probe);
        let properties = schema["properties"].as_object().unwrap();
        for field in ["prompt", "model", "temperature", "thinking_mode", "use_web_search", "continuation_id", "files", "images"] {
            assert!(properties.contains_key(field), "missing {field}");
        }
        assert_eq!(schema["required"], json!(["prompt"]));
    }
}
