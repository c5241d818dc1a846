//! Resource inspector: lists provider resources and smoke-reads the first one.

use thiserror::Error;
use tracing::{debug, info, warn};

use super::catalog::{CapabilityKind, DiscoveryError};
use super::session::{ProviderSession, SessionError};
use crate::domain::capability::{ResourceContents, ResourceDescriptor};

/// Fetching a resource's content failed.
#[derive(Debug, Error)]
#[error("failed to read resource '{uri}': {source}")]
pub struct ReadError {
    pub uri: String,
    #[source]
    pub source: SessionError,
}

impl ReadError {
    pub fn user_message(&self) -> String {
        format!(
            "Reading resource \"{}\" failed. {}",
            self.uri,
            self.source.user_message()
        )
    }
}

/// What the inspection found. Both halves are best-effort.
#[derive(Debug, Default)]
pub struct ResourceInspection {
    pub resources: Vec<ResourceDescriptor>,
    /// `None` when there was nothing to read.
    pub first_read: Option<Result<ResourceContents, ReadError>>,
}

pub struct ResourceInspector;

impl ResourceInspector {
    pub async fn list<S>(session: &S) -> Result<Vec<ResourceDescriptor>, DiscoveryError>
    where
        S: ProviderSession + ?Sized,
    {
        debug!("Listing available resources on the provider");
        let resources = session
            .list_resources()
            .await
            .map_err(|source| DiscoveryError::new(CapabilityKind::Resources, source))?;
        info!(count = resources.len(), "Discovered provider resources");
        Ok(resources)
    }

    pub async fn read<S>(session: &S, uri: &str) -> Result<ResourceContents, ReadError>
    where
        S: ProviderSession + ?Sized,
    {
        session
            .read_resource(uri)
            .await
            .map_err(|source| ReadError {
                uri: uri.to_string(),
                source,
            })
    }

    /// Lists resources and reads exactly the first one, if any.
    pub async fn inspect<S>(session: &S) -> Result<ResourceInspection, DiscoveryError>
    where
        S: ProviderSession + ?Sized,
    {
        let resources = Self::list(session).await?;
        let Some(first) = resources.first() else {
            info!("No resources available");
            return Ok(ResourceInspection {
                resources,
                first_read: None,
            });
        };

        let uri = first.uri.clone();
        let read = Self::read(session, &uri).await;
        match &read {
            Ok(contents) => {
                debug!(uri = %uri, entries = contents.contents.len(), "Read resource")
            }
            Err(err) => warn!(uri = %uri, %err, "Resource read failed"),
        }

        Ok(ResourceInspection {
            resources,
            first_read: Some(read),
        })
    }
}
