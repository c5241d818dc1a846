use serde_json::{Map as JsonMap, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArgumentParseError {
    #[error("arguments for tool '{tool}' are not valid JSON: {source}")]
    Syntax {
        tool: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("arguments for tool '{tool}' must be a JSON object, got {found}")]
    NotAnObject { tool: String, found: &'static str },
}

impl ArgumentParseError {
    pub fn user_message(&self) -> String {
        match self {
            ArgumentParseError::Syntax { tool, .. } => {
                format!("The model sent malformed arguments for \"{tool}\"; the call was skipped.")
            }
            ArgumentParseError::NotAnObject { tool, found } => format!(
                "The model sent {found} instead of named arguments for \"{tool}\"; the call was skipped."
            ),
        }
    }
}

/// Parses the model's serialized arguments into a name→value mapping.
/// Blank input and `null` mean "no arguments".
pub fn parse_arguments(tool: &str, raw: &str) -> Result<JsonMap<String, Value>, ArgumentParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(JsonMap::new());
    }

    let value: Value =
        serde_json::from_str(trimmed).map_err(|source| ArgumentParseError::Syntax {
            tool: tool.to_string(),
            source,
        })?;

    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(JsonMap::new()),
        other => Err(ArgumentParseError::NotAnObject {
            tool: tool.to_string(),
            found: json_kind(&other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
