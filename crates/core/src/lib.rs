//! Core building blocks for the `firewrite` action.
//!
//! - [`inputs`] — named action inputs and their resolution.
//! - [`credentials`] — service-account key decoding (JSON or base64 JSON).
//! - [`value`] — coercion of the raw `value` input into a JSON payload.
//! - [`types`] — database kinds and write targets.
//!
//! Nothing in this crate touches the network.

pub mod credentials;
pub mod error;
pub mod inputs;
pub mod types;
pub mod value;

pub use credentials::{parse_credentials, ServiceAccount};
pub use error::{ConfigError, CredentialError};
pub use inputs::{ActionInputs, InputSource};
pub use types::{DatabaseKind, Target};
pub use value::coerce_value;
