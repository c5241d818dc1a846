use std::fmt;
use thiserror::Error;

use super::catalog::{CapabilityKind, DiscoveryError};
use super::dispatch::{ArgumentParseError, ToolExecutionError};
use super::invoker::ModelInvocationError;
use super::resources::ReadError;
use super::schema::SchemaError;
use super::session::SessionError;

/// Where in a run an error happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Connect,
    ToolDiscovery,
    ResourceDiscovery,
    ResourceRead,
    SchemaTranslation,
    ModelInvocation,
    ArgumentParse,
    ToolExecution,
    Release,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Connect => "connect",
            Stage::ToolDiscovery => "tool discovery",
            Stage::ResourceDiscovery => "resource discovery",
            Stage::ResourceRead => "resource read",
            Stage::SchemaTranslation => "schema translation",
            Stage::ModelInvocation => "model invocation",
            Stage::ArgumentParse => "argument parsing",
            Stage::ToolExecution => "tool execution",
            Stage::Release => "session release",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum StageError {
    #[error("connection failed: {0}")]
    Connection(#[source] SessionError),
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    ModelInvocation(#[from] ModelInvocationError),
    #[error(transparent)]
    ArgumentParse(#[from] ArgumentParseError),
    #[error(transparent)]
    ToolExecution(#[from] ToolExecutionError),
    #[error("failed to release session: {0}")]
    Release(#[source] SessionError),
}

impl StageError {
    pub fn stage(&self) -> Stage {
        match self {
            StageError::Connection(_) => Stage::Connect,
            StageError::Discovery(err) => match err.kind {
                CapabilityKind::Tools => Stage::ToolDiscovery,
                CapabilityKind::Resources => Stage::ResourceDiscovery,
            },
            StageError::Read(_) => Stage::ResourceRead,
            StageError::Schema(_) => Stage::SchemaTranslation,
            StageError::ModelInvocation(_) => Stage::ModelInvocation,
            StageError::ArgumentParse(_) => Stage::ArgumentParse,
            StageError::ToolExecution(_) => Stage::ToolExecution,
            StageError::Release(_) => Stage::Release,
        }
    }

    /// Fatal errors end the run and flip its success indicator.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            StageError::Connection(_) | StageError::ModelInvocation(_)
        )
    }

    pub fn user_message(&self) -> String {
        match self {
            StageError::Connection(err) => err.user_message(),
            StageError::Discovery(err) => err.user_message(),
            StageError::Read(err) => err.user_message(),
            StageError::Schema(err) => err.user_message(),
            StageError::ModelInvocation(err) => err.user_message(),
            StageError::ArgumentParse(err) => err.user_message(),
            StageError::ToolExecution(err) => err.user_message(),
            StageError::Release(err) => err.user_message(),
        }
    }
}
