pub const DEFAULT_PROVIDER_ID: &str = "openai";
pub const DEFAULT_API_PATH: &str = "/v1/chat/completions";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TOP_P: f32 = 1.0;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant with access to external tools. \
When a tool can answer the request, call it with well-formed arguments instead of guessing.";
pub const DEFAULT_USER_PROMPT: &str = "Calculate the sum of 20 and 5 using the available tools.";

pub const ENV_MODEL: &str = "BRIDGE_MODEL";
pub const ENV_ENDPOINT: &str = "BRIDGE_ENDPOINT";
pub const ENV_API_KEY: &str = "BRIDGE_API_KEY";
