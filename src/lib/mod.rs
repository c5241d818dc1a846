//! Bridges a language model to an MCP-style tool provider.
//!
//! A run discovers the provider's tools, offers them to the model as callable
//! functions, executes whatever calls the model asks for and reports the
//! outcome. The provider transport and the model service are supplied from
//! outside through [`ProviderSession`] and [`ModelBackend`].

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::orchestrator::{ModelAction, Orchestrator, RunPhase, RunReport};
pub use application::session::{ProviderSession, SessionError};
pub use application::{catalog, dispatch, errors, invoker, resources, schema, session};
pub use config::{BridgeConfig, ModelSettings, PromptSettings};
pub use domain::types;
pub use infrastructure::model;
pub use infrastructure::model::{ModelBackend, OpenAIClient};

use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global fmt subscriber once. `RUST_LOG` wins over the
/// default `info` level; `quiet` silences everything.
pub fn init_tracing(quiet: bool) {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = if quiet {
            EnvFilter::new("off")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        };
        let _ = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(true)
            .try_init();
    });
}
