//! Named action inputs and their resolution into an [`ActionInputs`].
//!
//! | Input          | Required              | Default      |
//! |----------------|-----------------------|--------------|
//! | `credentials`  | **yes**               | --           |
//! | `databaseType` | no                    | `realtime`   |
//! | `path`         | **yes**               | --           |
//! | `doc`          | only for `firestore`  | --           |
//! | `value`        | no                    | current time |
//! | `databaseUrl`  | no                    | project URL  |

use std::collections::HashMap;

use crate::error::ConfigError;
use crate::types::{DatabaseKind, Target};

pub const INPUT_CREDENTIALS: &str = "credentials";
pub const INPUT_DATABASE_TYPE: &str = "databaseType";
pub const INPUT_PATH: &str = "path";
pub const INPUT_DOC: &str = "doc";
pub const INPUT_VALUE: &str = "value";
pub const INPUT_DATABASE_URL: &str = "databaseUrl";

/// Somewhere named inputs can be looked up.
pub trait InputSource {
    /// Raw value of the named input, if the host supplied one.
    fn raw(&self, name: &str) -> Option<String>;

    /// Trimmed value of the named input; empty values count as absent.
    fn get(&self, name: &str) -> Option<String> {
        self.raw(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Like [`InputSource::get`] but fails when the input is absent.
    fn require(&self, name: &'static str) -> Result<String, ConfigError> {
        self.get(name).ok_or(ConfigError::MissingInput(name))
    }
}

impl InputSource for HashMap<String, String> {
    fn raw(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

/// The resolved, immutable inputs for one invocation.
#[derive(Clone)]
pub struct ActionInputs {
    /// Raw credential blob (JSON or base64 JSON).
    pub credentials: String,
    pub target: Target,
    /// Raw `value` input; `None` means "write the current timestamp".
    pub value: Option<String>,
    /// Override for the Realtime Database URL.
    pub database_url: Option<String>,
}

impl ActionInputs {
    /// Read and validate every input from `source`.
    pub fn read(source: &impl InputSource) -> Result<Self, ConfigError> {
        tracing::info!("Preparing to load credentials");
        let credentials = source.require(INPUT_CREDENTIALS)?;
        tracing::info!("Loaded credentials input");

        let kind = DatabaseKind::from_input(source.get(INPUT_DATABASE_TYPE).as_deref())?;
        tracing::info!(database_type = %kind, "Resolved database type");

        let path = source.require(INPUT_PATH)?;
        tracing::info!(path = %path, "Loaded target path");

        let target = match kind {
            DatabaseKind::Realtime => Target::Realtime { path },
            DatabaseKind::Firestore => {
                let document = source.require(INPUT_DOC)?;
                tracing::info!(doc = %document, "Loaded document id");
                Target::Firestore {
                    collection: path,
                    document,
                }
            }
        };

        let value = source.get(INPUT_VALUE);
        tracing::info!(value = value.as_deref().unwrap_or(""), "Retrieved value");

        let database_url = source.get(INPUT_DATABASE_URL);
        if let Some(url) = &database_url {
            tracing::info!(database_url = %url, "Using database URL override");
        }

        Ok(Self {
            credentials,
            target,
            value,
            database_url,
        })
    }
}

impl std::fmt::Debug for ActionInputs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionInputs")
            .field("credentials", &"<redacted>")
            .field("target", &self.target)
            .field("value", &self.value)
            .field("database_url", &self.database_url)
            .finish()
    }
}
