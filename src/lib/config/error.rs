use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("missing required field 'model' in configuration")]
    MissingModel,

    #[error("missing required field 'endpoint' in configuration")]
    MissingEndpoint,

    #[error("field '{field}' references an undefined environment variable: {reason}")]
    UnresolvedVariable { field: &'static str, reason: String },

    #[error("temperature {value} is outside the range 0.0..=2.0")]
    InvalidTemperature { value: f32 },

    #[error("top_p {value} is outside the range (0.0, 1.0]")]
    InvalidTopP { value: f32 },

    #[error("max_tokens must be greater than zero")]
    InvalidMaxTokens,
}
