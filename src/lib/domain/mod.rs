//! Domain types shared by every stage of a run.
//!
//! - [`types`] - chat messages sent to the model backend
//! - [`capability`] - tools, resources and tool results as the provider reports them
//! - [`function`] - the model-facing function descriptor

pub mod capability;
pub mod function;
pub mod types;
