use async_trait::async_trait;
use serde_json::{Map as JsonMap, Value};

use super::error::SessionError;
use crate::domain::capability::{
    ResourceContents, ResourceDescriptor, ToolCallResult, ToolDescriptor,
};

/// Capability set of a connected tool provider.
#[async_trait]
pub trait ProviderSession: Send + Sync {
    /// Completes the protocol handshake. Called once, before any discovery.
    async fn initialize(&self) -> Result<(), SessionError>;

    /// Tools in the order the provider lists them.
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, SessionError>;

    async fn list_resources(&self) -> Result<Vec<ResourceDescriptor>, SessionError>;

    async fn read_resource(&self, uri: &str) -> Result<ResourceContents, SessionError>;

    async fn call_tool(
        &self,
        name: &str,
        arguments: JsonMap<String, Value>,
    ) -> Result<ToolCallResult, SessionError>;

    /// Releases the session. The orchestrator calls this exactly once per run,
    /// whether the run succeeded or not.
    async fn close(&self) -> Result<(), SessionError> {
        Ok(())
    }
}
