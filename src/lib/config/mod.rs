pub mod defaults;
pub mod error;
pub mod loader;
pub mod settings;

/// Default config file path - can be overridden by the embedder
pub const CONFIG_PATH: &str = "config/bridge.toml";

/// Environment file loaded once before any configuration is read
pub const ENV_PATH: &str = "config/.env";

pub use error::ConfigError;
pub use settings::{BridgeConfig, ModelSettings, PromptSettings};
