//! Translation of provider tool descriptors into model function descriptors.

use serde_json::Value;
use thiserror::Error;

use crate::domain::capability::ToolDescriptor;
use crate::domain::function::{
    FUNCTION_KIND, FunctionDescriptor, FunctionParameters, FunctionSpec, OBJECT_KIND,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("tool '{tool}' has no input schema")]
    MissingSchema { tool: String },
    #[error("input schema of tool '{tool}' is not a JSON object")]
    NotAnObject { tool: String },
    #[error("input schema of tool '{tool}' has no 'properties' field")]
    MissingProperties { tool: String },
    #[error("'properties' of tool '{tool}' is not a JSON object")]
    PropertiesNotObject { tool: String },
}

impl SchemaError {
    pub fn tool(&self) -> &str {
        match self {
            SchemaError::MissingSchema { tool }
            | SchemaError::NotAnObject { tool }
            | SchemaError::MissingProperties { tool }
            | SchemaError::PropertiesNotObject { tool } => tool,
        }
    }

    pub fn user_message(&self) -> String {
        format!(
            "Tool \"{}\" was not offered to the model because its parameter schema is unusable.",
            self.tool()
        )
    }
}

/// Restates one tool as a function descriptor. Pure: no I/O, same input gives
/// the same output, and the function name is always the tool name.
pub fn to_function_descriptor(tool: &ToolDescriptor) -> Result<FunctionDescriptor, SchemaError> {
    let schema = tool
        .input_schema
        .as_ref()
        .ok_or_else(|| SchemaError::MissingSchema {
            tool: tool.name.clone(),
        })?;
    let schema = schema.as_object().ok_or_else(|| SchemaError::NotAnObject {
        tool: tool.name.clone(),
    })?;
    let properties = schema
        .get("properties")
        .ok_or_else(|| SchemaError::MissingProperties {
            tool: tool.name.clone(),
        })?
        .as_object()
        .ok_or_else(|| SchemaError::PropertiesNotObject {
            tool: tool.name.clone(),
        })?;

    let required = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| {
            names
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(FunctionDescriptor {
        kind: FUNCTION_KIND.to_string(),
        function: FunctionSpec {
            name: tool.name.clone(),
            description: tool.description_or_empty().to_string(),
            parameters: FunctionParameters {
                kind: OBJECT_KIND.to_string(),
                properties: properties.clone(),
                required,
            },
        },
    })
}

/// Translates every tool, keeping provider order. Tools with unusable schemas
/// are returned separately instead of aborting the batch.
pub fn translate_all(tools: &[ToolDescriptor]) -> (Vec<FunctionDescriptor>, Vec<SchemaError>) {
    let mut functions = Vec::with_capacity(tools.len());
    let mut rejected = Vec::new();
    for tool in tools {
        match to_function_descriptor(tool) {
            Ok(function) => functions.push(function),
            Err(err) => rejected.push(err),
        }
    }
    (functions, rejected)
}
