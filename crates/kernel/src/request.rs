//! Extracts and validates the common request envelope from a `tools/call`
//! argument object.

use config::ThinkingMode;
use serde_json::Value;

use crate::{error::ToolError, tool::Tool};

#[derive(Debug, Clone, Default)]
pub struct CommonFields {
    pub primary_text: String,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub thinking_mode: Option<ThinkingMode>,
    pub use_web_search: bool,
    pub continuation_id: Option<String>,
    pub files: Vec<String>,
    pub images: Vec<String>,
}

fn string_field(arguments: &Value, field: &str) -> Result<Option<String>, ToolError> {
    match arguments.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ToolError::InvalidRequest(format!("{field} must be a string"))),
    }
}

fn string_array_field(arguments: &Value, field: &str) -> Result<Vec<String>, ToolError> {
    match arguments.get(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                _ => Err(ToolError::InvalidRequest(format!("{field} must be an array of strings"))),
            })
            .collect(),
        Some(_) => Err(ToolError::InvalidRequest(format!("{field} must be an array of strings"))),
    }
}

/// Validate `arguments` against `tool`'s schema shape and extract the common
/// envelope. The primary field is required and non-empty after trimming
/// (empty `prompt` after trim is rejected as `invalidRequest`).
pub fn extract_common(tool: &dyn Tool, arguments: &Value) -> Result<CommonFields, ToolError> {
    if !arguments.is_object() {
        return Err(ToolError::InvalidRequest("arguments must be a JSON object".to_string()));
    }

    let primary_text = string_field(arguments, tool.primary_field())?
        .ok_or_else(|| ToolError::InvalidRequest(format!("{} is required", tool.primary_field())))?;

    if primary_text.trim().is_empty() {
        return Err(ToolError::InvalidRequest(format!("{} must not be empty", tool.primary_field())));
    }

    let temperature = match arguments.get("temperature") {
        None | Some(Value::Null) => None,
        Some(v) => Some(v.as_f64().ok_or_else(|| ToolError::InvalidRequest("temperature must be a number".to_string()))? as f32),
    };

    let thinking_mode = match string_field(arguments, "thinking_mode")? {
        None => None,
        Some(raw) => Some(
            ThinkingMode::parse(&raw).ok_or_else(|| ToolError::InvalidRequest(format!("thinking_mode {raw:?} is not recognized")))?,
        ),
    };

    let use_web_search = match arguments.get("use_web_search") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(_) => return Err(ToolError::InvalidRequest("use_web_search must be a boolean".to_string())),
    };

    Ok(CommonFields {
        primary_text,
        model: string_field(arguments, "model")?,
        temperature,
        thinking_mode,
        use_web_search,
        continuation_id: string_field(arguments, "continuation_id")?,
        files: string_array_field(arguments, "files")?,
        images: string_array_field(arguments, "images")?,
    })
}
