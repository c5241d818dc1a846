//! Capability catalog: the request-scoped set of tools a provider advertises.

use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

use super::session::{ProviderSession, SessionError};
use crate::domain::capability::ToolDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityKind {
    Tools,
    Resources,
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapabilityKind::Tools => f.write_str("tools"),
            CapabilityKind::Resources => f.write_str("resources"),
        }
    }
}

/// Listing tools or resources from the provider failed.
#[derive(Debug, Error)]
#[error("failed to list {kind}: {source}")]
pub struct DiscoveryError {
    pub kind: CapabilityKind,
    #[source]
    pub source: SessionError,
}

impl DiscoveryError {
    pub fn new(kind: CapabilityKind, source: SessionError) -> Self {
        Self { kind, source }
    }

    pub fn user_message(&self) -> String {
        format!(
            "Listing {} failed; continuing without them. {}",
            self.kind,
            self.source.user_message()
        )
    }
}

/// Tools discovered for one run, in provider order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CapabilityCatalog {
    tools: Vec<ToolDescriptor>,
}

impl CapabilityCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Asks the provider for its tools.
    pub async fn discover<S>(session: &S) -> Result<Self, DiscoveryError>
    where
        S: ProviderSession + ?Sized,
    {
        debug!("Listing available tools on the provider");
        let tools = session
            .list_tools()
            .await
            .map_err(|source| DiscoveryError::new(CapabilityKind::Tools, source))?;
        info!(count = tools.len(), "Discovered provider tools");
        for tool in &tools {
            debug!(tool = %tool.name, description = tool.description_or_empty(), "Tool available");
        }
        Ok(Self { tools })
    }

    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }
}
