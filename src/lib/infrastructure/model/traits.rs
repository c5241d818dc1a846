//! Model traits

use super::types::{Completion, CompletionRequest, ModelError};
use async_trait::async_trait;

/// A chat-completion service that understands function calling.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Get the backend ID used in logs and errors
    fn id(&self) -> &str;

    /// Send one completion request and return the unclassified reply
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, ModelError>;
}
