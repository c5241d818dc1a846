//! # Application Module
//!
//! The discovery-and-dispatch pipeline, leaves first.
//!
//! ## Submodules
//!
//! - [`session`] - The provider session seam the whole pipeline talks through
//! - [`catalog`] - Tool discovery
//! - [`resources`] - Resource listing and a smoke read of the first resource
//! - [`schema`] - Tool descriptor to function descriptor translation
//! - [`invoker`] - The single model turn
//! - [`dispatch`] - Sequential execution of requested tool calls
//! - [`orchestrator`] - Sequencing of all of the above into one run

pub mod catalog;
pub mod dispatch;
pub mod errors;
pub mod invoker;
pub mod orchestrator;
pub mod resources;
pub mod schema;
pub mod session;
