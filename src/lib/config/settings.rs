//! # Bridge Configuration
//!
//! Everything a run needs besides the provider session: which model backend
//! to call, how to sample from it, and which prompts to send.
//!
//! # Example
//!
//! ```toml
//! system_prompt = "You are a helpful assistant."
//! prompt = "Calculate the sum of 20 and 5."
//!
//! [model]
//! provider = "openai"
//! model = "gpt-4o-mini"
//! endpoint = "https://api.openai.com"
//! api_key = "OPENAI_API_KEY"
//! temperature = 0.7
//! top_p = 1.0
//! max_tokens = 1000
//! ```

use std::fmt;
use std::path::Path;

use super::defaults::{
    DEFAULT_API_PATH, DEFAULT_MAX_TOKENS, DEFAULT_PROVIDER_ID, DEFAULT_SYSTEM_PROMPT,
    DEFAULT_TEMPERATURE, DEFAULT_TOP_P, DEFAULT_USER_PROMPT,
};
use super::error::ConfigError;

/// Model backend options. Sampling values are fixed per run.
#[derive(Clone, PartialEq)]
pub struct ModelSettings {
    /// Label for the backend, used in logs and error messages
    pub provider: String,
    /// Backend model identifier
    pub model: String,
    /// Base address of the backend
    pub endpoint: String,
    /// Chat-completions path appended to `endpoint`
    pub api_path: String,
    /// Bearer secret authorizing the call
    pub credential: Option<String>,
    /// Response randomness
    pub temperature: f32,
    /// Nucleus sampling mass
    pub top_p: f32,
    /// Output length cap
    pub max_tokens: u32,
}

impl ModelSettings {
    pub fn new(model: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            provider: DEFAULT_PROVIDER_ID.to_string(),
            model: model.into(),
            endpoint: endpoint.into(),
            api_path: DEFAULT_API_PATH.to_string(),
            credential: None,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }

    pub fn with_sampling(mut self, temperature: f32, top_p: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.top_p = top_p;
        self.max_tokens = max_tokens;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::MissingModel);
        }
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::MissingEndpoint);
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::InvalidTemperature {
                value: self.temperature,
            });
        }
        if !(self.top_p > 0.0 && self.top_p <= 1.0) {
            return Err(ConfigError::InvalidTopP { value: self.top_p });
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::InvalidMaxTokens);
        }
        Ok(())
    }
}

impl fmt::Debug for ModelSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSettings")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("api_path", &self.api_path)
            .field("credential", &self.credential.as_ref().map(|_| "<redacted>"))
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

/// The fixed conversation sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSettings {
    pub system: String,
    pub user: String,
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            system: DEFAULT_SYSTEM_PROMPT.to_string(),
            user: DEFAULT_USER_PROMPT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BridgeConfig {
    pub model: ModelSettings,
    pub prompts: PromptSettings,
}

impl BridgeConfig {
    pub fn new(model: ModelSettings) -> Self {
        Self {
            model,
            prompts: PromptSettings::default(),
        }
    }

    /// Load configuration from a file path (or default path if None)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }

    /// Build configuration from `BRIDGE_*` environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        super::loader::load_from_env()
    }
}
