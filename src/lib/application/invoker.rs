//! Model invoker: one fixed two-message turn with the translated functions attached.

use thiserror::Error;
use tracing::{debug, info};

use crate::config::{ModelSettings, PromptSettings};
use crate::domain::function::{FunctionDescriptor, ModelResponse, ToolCallRequest};
use crate::infrastructure::model::{Completion, CompletionRequest, ModelBackend, ModelError};
use crate::types::ChatMessage;

#[derive(Debug, Error)]
pub enum ModelInvocationError {
    #[error(transparent)]
    Backend(#[from] ModelError),
    #[error("provider '{provider}' signalled tool calls but sent none")]
    EmptyToolCalls { provider: String },
    #[error("provider '{provider}' returned neither content nor tool calls")]
    Unclassifiable { provider: String },
}

impl ModelInvocationError {
    pub fn user_message(&self) -> String {
        match self {
            ModelInvocationError::Backend(err) => err.user_message(),
            ModelInvocationError::EmptyToolCalls { provider }
            | ModelInvocationError::Unclassifiable { provider } => {
                format!("The model at '{provider}' returned a malformed response.")
            }
        }
    }
}

pub struct ModelInvoker<B> {
    backend: B,
    settings: ModelSettings,
    system_prompt: String,
}

impl<B: ModelBackend> ModelInvoker<B> {
    pub fn new(backend: B, settings: ModelSettings, prompts: &PromptSettings) -> Self {
        Self {
            backend,
            settings,
            system_prompt: prompts.system.clone(),
        }
    }

    /// Sends `[system, user]` plus `functions` and classifies the reply.
    /// An empty function list is still sent; discovery and invocation are
    /// independent stages.
    pub async fn invoke(
        &self,
        prompt: &str,
        functions: &[FunctionDescriptor],
    ) -> Result<ModelResponse, ModelInvocationError> {
        let request = CompletionRequest {
            model: self.settings.model.clone(),
            messages: vec![
                ChatMessage::system(self.system_prompt.clone()),
                ChatMessage::user(prompt),
            ],
            tools: functions.to_vec(),
            temperature: self.settings.temperature,
            top_p: self.settings.top_p,
            max_tokens: self.settings.max_tokens,
        };
        debug!(
            provider = self.backend.id(),
            functions = functions.len(),
            "Invoking model"
        );

        let completion = self.backend.complete(request).await?;
        let response = classify(self.backend.id(), completion)?;
        match &response {
            ModelResponse::Content(_) => info!("Model answered with content"),
            ModelResponse::ToolCalls(calls) => {
                info!(count = calls.len(), "Model requested tool calls")
            }
        }
        Ok(response)
    }
}

/// Turns a raw completion into exactly one `ModelResponse` variant.
pub fn classify(
    provider: &str,
    completion: Completion,
) -> Result<ModelResponse, ModelInvocationError> {
    match (completion.tool_calls, completion.content) {
        (Some(calls), _) if calls.is_empty() => Err(ModelInvocationError::EmptyToolCalls {
            provider: provider.to_string(),
        }),
        (Some(calls), _) => Ok(ModelResponse::ToolCalls(
            calls
                .into_iter()
                .map(|call| ToolCallRequest {
                    id: call.id,
                    name: call.name,
                    arguments: call.arguments,
                })
                .collect(),
        )),
        (None, Some(content)) => Ok(ModelResponse::Content(content)),
        (None, None) => Err(ModelInvocationError::Unclassifiable {
            provider: provider.to_string(),
        }),
    }
}
