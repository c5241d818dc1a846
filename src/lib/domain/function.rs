//! Model-facing function descriptors and the model's two possible answers.

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value};

pub const FUNCTION_KIND: &str = "function";
pub const OBJECT_KIND: &str = "object";

/// A tool restated in the function-calling shape a chat completion accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    pub function: FunctionSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSpec {
    pub name: String,
    pub description: String,
    pub parameters: FunctionParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionParameters {
    #[serde(rename = "type")]
    pub kind: String,
    pub properties: JsonMap<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl FunctionDescriptor {
    pub fn name(&self) -> &str {
        &self.function.name
    }
}

/// A single tool invocation requested by the model.
///
/// `arguments` is the serialized payload exactly as the backend produced it;
/// parsing happens at dispatch time so one bad payload only fails its own call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCallRequest {
    pub id: Option<String>,
    pub name: String,
    pub arguments: String,
}

impl ToolCallRequest {
    pub fn new(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Classified model output: either final text or a non-empty list of tool calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelResponse {
    Content(String),
    ToolCalls(Vec<ToolCallRequest>),
}

impl ModelResponse {
    pub fn is_tool_calls(&self) -> bool {
        matches!(self, ModelResponse::ToolCalls(_))
    }
}
