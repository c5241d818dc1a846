use serde_json::{Map as JsonMap, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::application::session::{ProviderSession, SessionError};
use crate::domain::capability::ToolCallResult;

#[derive(Debug, Error)]
pub enum ToolExecutionError {
    #[error("failed to execute tool '{tool}': {source}")]
    Session {
        tool: String,
        #[source]
        source: SessionError,
    },
    #[error("tool '{tool}' reported an error: {message}")]
    Rejected { tool: String, message: String },
}

impl ToolExecutionError {
    pub fn tool(&self) -> &str {
        match self {
            ToolExecutionError::Session { tool, .. } | ToolExecutionError::Rejected { tool, .. } => {
                tool
            }
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            ToolExecutionError::Session { tool, source } => {
                format!("Running tool \"{tool}\" failed: {}", source.user_message())
            }
            ToolExecutionError::Rejected { tool, message } => {
                format!("Tool \"{tool}\" reported an error: {message}")
            }
        }
    }
}

/// Calls one tool on the provider. A result flagged `isError` is a failure.
pub async fn execute<S>(
    session: &S,
    tool_name: &str,
    arguments: JsonMap<String, Value>,
) -> Result<ToolCallResult, ToolExecutionError>
where
    S: ProviderSession + ?Sized,
{
    debug!(tool = %tool_name, arguments = ?arguments, "Dispatching tool via provider session");
    let result = match session.call_tool(tool_name, arguments).await {
        Ok(result) => result,
        Err(source) => {
            warn!(tool = %tool_name, %source, "Tool execution failed");
            return Err(ToolExecutionError::Session {
                tool: tool_name.to_string(),
                source,
            });
        }
    };

    if result.is_error {
        let message = result
            .first_text()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or("no error message provided")
            .to_string();
        warn!(tool = %tool_name, message = %message, "Tool reported an error");
        return Err(ToolExecutionError::Rejected {
            tool: tool_name.to_string(),
            message,
        });
    }

    info!(tool = %tool_name, parts = result.content.len(), "Tool executed");
    Ok(result)
}
