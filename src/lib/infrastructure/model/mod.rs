//! Model backend
//!
//! - `types` - completion request, raw completion and `ModelError`
//! - `traits` - the `ModelBackend` seam the invoker calls through
//! - `adapter` - conversation wire shape
//! - `clients` - the OpenAI-compatible HTTP client

pub mod adapter;
pub mod clients;
pub mod traits;
pub mod types;

pub use clients::OpenAIClient;
pub use traits::ModelBackend;
pub use types::{Completion, CompletionRequest, ModelError, RawToolCall};
