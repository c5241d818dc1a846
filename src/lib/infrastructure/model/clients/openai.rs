//! OpenAI-compatible client implementation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::base::HttpClientBase;
use crate::config::ModelSettings;
use crate::domain::function::FunctionDescriptor;
use crate::infrastructure::model::adapter::MessageAdapter;
use crate::infrastructure::model::traits::ModelBackend;
use crate::infrastructure::model::types::{
    Completion, CompletionRequest, ModelError, RawToolCall,
};

/// OpenAI-compatible client (works with OpenAI, Groq, Mistral, vLLM, Ollama's /v1, etc.)
#[derive(Clone)]
pub struct OpenAIClient {
    base: HttpClientBase,
}

impl OpenAIClient {
    pub fn from_settings(settings: &ModelSettings) -> Self {
        Self {
            base: HttpClientBase::from_settings(settings),
        }
    }
}

#[async_trait]
impl ModelBackend for OpenAIClient {
    fn id(&self) -> &str {
        &self.base.provider
    }

    async fn complete(&self, request: CompletionRequest) -> Result<Completion, ModelError> {
        let payload = OpenAIRequest {
            model: &request.model,
            messages: MessageAdapter::to_chat_format(&request.messages),
            tools: &request.tools,
            temperature: request.temperature,
            top_p: request.top_p,
            max_tokens: request.max_tokens,
            stream: false,
        };

        info!(
            provider = %self.base.provider,
            url = %self.base.url,
            model = request.model.as_str(),
            messages = request.messages.len(),
            tools = request.tools.len(),
            "Sending request to OpenAI-compatible provider"
        );

        let response: OpenAIResponse = self.base.post_json(&payload).await?;
        debug!("Received response from OpenAI-compatible provider");

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::invalid_response(&self.base.provider, "no choices"))?;
        let finish_reason = choice.finish_reason;
        let message = choice
            .message
            .ok_or_else(|| ModelError::invalid_response(&self.base.provider, "missing message"))?;

        let tool_calls = message.tool_calls.map(|calls| {
            calls
                .into_iter()
                .map(|call| RawToolCall {
                    id: call.id,
                    name: call.function.name,
                    arguments: call.function.arguments,
                })
                .collect::<Vec<_>>()
        });

        Ok(Completion {
            tool_calls: drop_empty_tool_calls(
                tool_calls,
                finish_reason.as_deref(),
                message.content.is_some(),
            ),
            content: message.content,
        })
    }
}

/// Some OpenAI-compatible servers send `"tool_calls": []` alongside a plain
/// answer. The empty list only counts when the reply signals tool-call intent:
/// `finish_reason == "tool_calls"` or no content at all.
fn drop_empty_tool_calls(
    tool_calls: Option<Vec<RawToolCall>>,
    finish_reason: Option<&str>,
    has_content: bool,
) -> Option<Vec<RawToolCall>> {
    match tool_calls {
        Some(calls) if calls.is_empty() && has_content && finish_reason != Some(TOOL_CALLS_FINISH) => {
            debug!(?finish_reason, "Ignoring empty tool_calls on a content reply");
            None
        }
        other => other,
    }
}

const TOOL_CALLS_FINISH: &str = "tool_calls";

#[derive(Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "no_tools")]
    tools: &'a [FunctionDescriptor],
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
    stream: bool,
}

fn no_tools(tools: &&[FunctionDescriptor]) -> bool {
    tools.is_empty()
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: Option<OpenAIMessage>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct OpenAIMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<OpenAIToolCall>>,
}

#[derive(Deserialize)]
struct OpenAIToolCall {
    #[serde(default)]
    id: Option<String>,
    function: OpenAIFunctionCall,
}

#[derive(Deserialize)]
struct OpenAIFunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}
