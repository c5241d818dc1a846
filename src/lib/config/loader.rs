use super::defaults::{
    DEFAULT_API_PATH, DEFAULT_MAX_TOKENS, DEFAULT_PROVIDER_ID, DEFAULT_SYSTEM_PROMPT,
    DEFAULT_TEMPERATURE, DEFAULT_TOP_P, DEFAULT_USER_PROMPT, ENV_API_KEY, ENV_ENDPOINT, ENV_MODEL,
};
use super::error::ConfigError;
use super::settings::{BridgeConfig, ModelSettings, PromptSettings};
use super::{CONFIG_PATH, ENV_PATH};
use dotenvy::from_filename;
use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Once;
use tracing::{debug, info, warn};

static ENV_LOADER: Once = Once::new();

/// Raw configuration structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
struct RawConfig {
    system_prompt: Option<String>,
    prompt: Option<String>,
    #[serde(default)]
    model: RawModel,
}

#[derive(Debug, Deserialize, Default)]
struct RawModel {
    provider: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
    api_path: Option<String>,
    api_key: Option<String>,
    temperature: Option<f32>,
    top_p: Option<f32>,
    max_tokens: Option<u32>,
}

/// Ensures environment variables are loaded from config/.env
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        let _ = from_filename(ENV_PATH);
    });
}

/// Load and validate configuration from a file path
pub fn load_config(path: Option<&Path>) -> Result<BridgeConfig, ConfigError> {
    ensure_env_loaded();
    let config_path = path.unwrap_or_else(|| Path::new(CONFIG_PATH));
    read_config(config_path)
}

/// Build configuration from environment variables alone
pub fn load_from_env() -> Result<BridgeConfig, ConfigError> {
    ensure_env_loaded();
    let model = env_value(ENV_MODEL).ok_or(ConfigError::MissingModel)?;
    let endpoint = env_value(ENV_ENDPOINT).ok_or(ConfigError::MissingEndpoint)?;
    let mut settings = ModelSettings::new(model, endpoint);
    settings.credential = env_value(ENV_API_KEY);
    settings.validate()?;
    Ok(BridgeConfig::new(settings))
}

fn read_config(path: &Path) -> Result<BridgeConfig, ConfigError> {
    debug!(path = %path.display(), "Reading bridge configuration file");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let parsed: RawConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_and_build(parsed)
}

fn validate_and_build(parsed: RawConfig) -> Result<BridgeConfig, ConfigError> {
    let raw = parsed.model;
    let provider = raw
        .provider
        .unwrap_or_else(|| DEFAULT_PROVIDER_ID.to_string());
    let endpoint = match raw.endpoint {
        Some(endpoint) => expand("endpoint", &endpoint)?,
        None => String::new(),
    };
    let credential = resolve_credential(&provider, raw.api_key.as_deref())?;

    let mut settings = ModelSettings {
        provider,
        model: raw.model.unwrap_or_default(),
        endpoint,
        api_path: raw.api_path.unwrap_or_else(|| DEFAULT_API_PATH.to_string()),
        credential,
        temperature: raw.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        top_p: raw.top_p.unwrap_or(DEFAULT_TOP_P),
        max_tokens: raw.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
    };
    apply_env_overrides(&mut settings);
    settings.validate()?;

    let prompts = PromptSettings {
        system: parsed
            .system_prompt
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
        user: parsed
            .prompt
            .unwrap_or_else(|| DEFAULT_USER_PROMPT.to_string()),
    };

    Ok(BridgeConfig {
        model: settings,
        prompts,
    })
}

/// `BRIDGE_*` variables win over file values.
fn apply_env_overrides(settings: &mut ModelSettings) {
    if let Some(model) = env_value(ENV_MODEL) {
        info!(
            provider = settings.provider.as_str(),
            model = model.as_str(),
            "Overriding model based on environment"
        );
        settings.model = model;
    }
    if let Some(endpoint) = env_value(ENV_ENDPOINT) {
        info!(
            provider = settings.provider.as_str(),
            endpoint = endpoint.as_str(),
            "Overriding endpoint based on environment"
        );
        settings.endpoint = endpoint;
    }
    if let Some(credential) = env_value(ENV_API_KEY) {
        debug!(
            provider = settings.provider.as_str(),
            "Using credential from environment"
        );
        settings.credential = Some(credential);
    }
}

/// Resolve the credential: `${VAR}` references are expanded, a bare value
/// names the environment variable holding the secret.
fn resolve_credential(provider: &str, spec: Option<&str>) -> Result<Option<String>, ConfigError> {
    let Some(raw) = spec.map(str::trim) else {
        return Ok(None);
    };
    if raw.is_empty() {
        return Ok(None);
    }
    if raw.contains('$') {
        return expand("api_key", raw).map(Some);
    }
    match env::var(raw) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            warn!(
                provider,
                env_var = raw,
                %err,
                "API key environment variable is not set"
            );
            Ok(None)
        }
    }
}

fn expand(field: &'static str, raw: &str) -> Result<String, ConfigError> {
    shellexpand::env(raw)
        .map(|value| value.into_owned())
        .map_err(|err| ConfigError::UnresolvedVariable {
            field,
            reason: err.to_string(),
        })
}

fn env_value(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
