//! The provider session seam.
//!
//! The orchestrator talks to a tool provider only through [`ProviderSession`];
//! the transport behind it (stdio child process, socket, in-memory fake) is
//! supplied by the embedder already connected.

mod error;
mod interface;

pub use error::SessionError;
pub use interface::ProviderSession;
