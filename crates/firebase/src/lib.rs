//! Firebase REST clients for the `firewrite` action.
//!
//! - [`auth`] — service-account token exchange and the [`Session`] handle.
//! - [`endpoints`] — production and emulator base URLs.
//! - [`realtime`] — Realtime Database `PUT` writes.
//! - [`firestore`] — Firestore document replaces and value encoding.
//! - [`writer`] — the [`DatabaseWriter`] seam dispatching on the target.

pub mod auth;
pub mod endpoints;
pub mod error;
pub mod firestore;
pub mod realtime;
pub mod writer;

pub use auth::{AuthError, Session};
pub use endpoints::{EmulatorHosts, Endpoints};
pub use error::WriteError;
pub use writer::{validate_write, DatabaseWriter, FirebaseWriter, WriteReceipt};
