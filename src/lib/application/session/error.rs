use thiserror::Error;

/// Failures reported by a [`ProviderSession`](super::ProviderSession) implementation.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("provider transport error: {message}")]
    Transport { message: String },
    #[error("provider returned JSON-RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("provider returned invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },
    #[error("provider session terminated unexpectedly")]
    Terminated,
    #[error("provider request timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

impl SessionError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn rpc(code: i64, message: impl Into<String>) -> Self {
        Self::Rpc {
            code,
            message: message.into(),
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            SessionError::Transport { message } => {
                format!("Could not reach the tool provider: {message}.")
            }
            SessionError::Rpc { code, message } => {
                format!("The tool provider rejected the request ({code}): {message}.")
            }
            SessionError::InvalidJson { .. } => {
                "The tool provider sent a response that could not be decoded.".to_string()
            }
            SessionError::Terminated => "The tool provider closed the session.".to_string(),
            SessionError::Timeout { seconds } => {
                format!("The tool provider did not answer within {seconds}s.")
            }
        }
    }
}
