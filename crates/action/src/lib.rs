//! `firewrite-action` library crate.
//!
//! Re-exports internal modules for integration testing. The binary
//! entrypoint lives in `main.rs`.

pub mod config;
pub mod error;
pub mod runner;
pub mod workflow;

pub use config::ActionConfig;
pub use error::ActionError;
