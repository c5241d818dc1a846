//! Capabilities advertised by a tool provider and the payloads it returns.
//!
//! Field names follow the provider protocol's JSON (`inputSchema`, `mimeType`,
//! `isError`) so sessions can deserialize responses straight into these types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A callable tool as listed by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parameter schema, kept opaque apart from the `properties` lookup done
    /// during translation.
    #[serde(
        rename = "inputSchema",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub input_schema: Option<Value>,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>, input_schema: Value) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            input_schema: Some(input_schema),
        }
    }

    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

/// A URI-addressed piece of content the provider can serve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    pub uri: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "mimeType", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl ResourceDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        uri: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
            description: Some(description.into()),
            mime_type: None,
        }
    }
}

/// Result of reading one resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceContents {
    #[serde(default)]
    pub contents: Vec<ResourceContent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceContent {
    pub uri: String,
    #[serde(rename = "mimeType", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Base64 payload for binary resources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob: Option<String>,
}

impl ResourceContents {
    pub fn text(uri: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            contents: vec![ResourceContent {
                uri: uri.into(),
                mime_type: Some("text/plain".to_string()),
                text: Some(text.into()),
                blob: None,
            }],
        }
    }

    /// Renders the contents for a transcript: text entries verbatim, blobs by size.
    pub fn summary(&self) -> String {
        if self.contents.is_empty() {
            return "(empty)".to_string();
        }
        self.contents
            .iter()
            .map(|entry| match (&entry.text, &entry.blob) {
                (Some(text), _) => text.clone(),
                (None, Some(blob)) => format!("<binary {} bytes base64>", blob.len()),
                (None, None) => "(no content)".to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One part of a tool result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentPart {
    Text {
        text: String,
    },
    Image {
        data: String,
        #[serde(rename = "mimeType")]
        mime_type: String,
    },
    Resource {
        resource: Value,
    },
    #[serde(other)]
    Unsupported,
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentPart::Text { text } => Some(text.as_str()),
            _ => None,
        }
    }
}

/// What the provider returned for a single tool call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolCallResult {
    #[serde(default)]
    pub content: Vec<ContentPart>,
    #[serde(rename = "isError", default)]
    pub is_error: bool,
}

impl ToolCallResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentPart::text(text)],
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ContentPart::text(message)],
            is_error: true,
        }
    }

    /// Text of the first content part. `None` when that part is not text.
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().and_then(ContentPart::as_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tool_descriptor_reads_protocol_field_names() {
        let raw = json!({
            "name": "add_numbers",
            "description": "Add two numbers from given arguments",
            "inputSchema": {
                "type": "object",
                "properties": { "a": { "type": "integer" }, "b": { "type": "integer" } },
                "required": ["a", "b"]
            }
        });

        let tool: ToolDescriptor = serde_json::from_value(raw).expect("tool parses");

        assert_eq!(tool.name, "add_numbers");
        assert_eq!(
            tool.description_or_empty(),
            "Add two numbers from given arguments"
        );
        assert!(tool.input_schema.is_some());
    }

    #[test]
    fn tool_result_keeps_unknown_parts_in_place() {
        let raw = json!({
            "content": [
                { "type": "text", "text": "25" },
                { "type": "audio", "data": "..." }
            ],
            "isError": false
        });

        let result: ToolCallResult = serde_json::from_value(raw).expect("result parses");

        assert_eq!(result.content[1], ContentPart::Unsupported);
        assert_eq!(result.first_text(), Some("25"));
        assert!(!result.is_error);
    }

    #[test]
    fn first_text_only_looks_at_the_first_part() {
        let raw = json!({
            "content": [
                { "type": "image", "data": "iVBORw0KGgo=", "mimeType": "image/png" },
                { "type": "text", "text": "a chart" }
            ]
        });

        let result: ToolCallResult = serde_json::from_value(raw).expect("result parses");

        assert_eq!(result.first_text(), None);
        assert!(!result.is_error);
    }

    #[test]
    fn resource_summary_describes_blobs_by_size() {
        let contents = ResourceContents {
            contents: vec![ResourceContent {
                uri: "file:///logo.png".into(),
                mime_type: Some("image/png".into()),
                text: None,
                blob: Some("AAAA".into()),
            }],
        };

        assert_eq!(contents.summary(), "<binary 4 bytes base64>");
        assert_eq!(ResourceContents::default().summary(), "(empty)");
    }
}
