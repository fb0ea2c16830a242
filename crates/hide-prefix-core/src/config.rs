use crate::error::{ConfigError, Result};
use crate::settings::Settings;

const FENCE_OPEN: &str = "```json";
const FENCE_CLOSE: &str = "```";

/// Serialize settings as pretty JSON inside a ```json fenced code block.
pub fn to_fenced_json(settings: &Settings) -> Result<String> {
    let json = serde_json::to_string_pretty(settings)?;
    Ok(format!("{}\n{}\n{}", FENCE_OPEN, json, FENCE_CLOSE))
}

/// Parse settings out of a block's content.
///
/// The fence is optional; keys missing from the stored object keep their
/// defaults.
pub fn from_fenced_json(content: &str) -> Result<Settings> {
    let body = content.trim();
    let body = body.strip_prefix(FENCE_OPEN).unwrap_or(body);
    let body = body.trim();
    let body = body.strip_suffix(FENCE_CLOSE).unwrap_or(body);

    let value: serde_json::Value = serde_json::from_str(body)?;
    if !value.is_object() {
        return Err(ConfigError::NotAnObject(json_kind(&value)));
    }
    Ok(serde_json::from_value(value)?)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
