//! Base URLs for the Realtime Database and Firestore REST APIs.
//!
//! Both services can be redirected to a local emulator with the same
//! environment variables the Firebase tooling uses.
//!
//! | Env Var                           | Effect                               |
//! |-----------------------------------|--------------------------------------|
//! | `FIREBASE_DATABASE_EMULATOR_HOST` | Realtime Database → `http://<host>`  |
//! | `FIRESTORE_EMULATOR_HOST`         | Firestore → `http://<host>/v1`       |

use firewrite_core::inputs::INPUT_DATABASE_URL;
use firewrite_core::{ConfigError, DatabaseKind};
use reqwest::Url;

pub const ENV_DATABASE_EMULATOR_HOST: &str = "FIREBASE_DATABASE_EMULATOR_HOST";
pub const ENV_FIRESTORE_EMULATOR_HOST: &str = "FIRESTORE_EMULATOR_HOST";

/// Production Firestore REST root.
pub const FIRESTORE_API_URL: &str = "https://firestore.googleapis.com/v1";

/// Emulator `host:port` pairs, if any are configured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmulatorHosts {
    pub database: Option<String>,
    pub firestore: Option<String>,
}

impl EmulatorHosts {
    /// Read the emulator variables; empty values are ignored.
    pub fn from_env() -> Self {
        let read = |name: &str| {
            std::env::var(name)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            database: read(ENV_DATABASE_EMULATOR_HOST),
            firestore: read(ENV_FIRESTORE_EMULATOR_HOST),
        }
    }
}

/// Where Realtime Database writes go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealtimeEndpoint {
    pub base_url: Url,
    /// Database name, sent as `ns` when talking to the emulator.
    pub namespace: String,
    pub emulated: bool,
}

/// Where Firestore writes go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirestoreEndpoint {
    pub base_url: Url,
    pub emulated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub realtime: RealtimeEndpoint,
    pub firestore: FirestoreEndpoint,
}

impl Endpoints {
    /// Resolve both endpoints for `project_id`.
    ///
    /// `database_url` overrides the default
    /// `https://<project>-default-rtdb.firebaseio.com`.
    pub fn resolve(
        project_id: &str,
        database_url: Option<&str>,
        emulators: &EmulatorHosts,
    ) -> Result<Self, ConfigError> {
        let database_url = match database_url {
            Some(url) => parse_http_url(INPUT_DATABASE_URL, url)?,
            None => parse_http_url(
                INPUT_DATABASE_URL,
                &format!("https://{project_id}-default-rtdb.firebaseio.com"),
            )?,
        };
        let namespace = database_url
            .host_str()
            .and_then(|host| host.split('.').next())
            .unwrap_or(project_id)
            .to_string();

        let realtime = match &emulators.database {
            Some(host) => RealtimeEndpoint {
                base_url: parse_http_url(ENV_DATABASE_EMULATOR_HOST, &format!("http://{host}"))?,
                namespace,
                emulated: true,
            },
            None => RealtimeEndpoint {
                base_url: database_url,
                namespace,
                emulated: false,
            },
        };

        let firestore = match &emulators.firestore {
            Some(host) => FirestoreEndpoint {
                base_url: parse_http_url(ENV_FIRESTORE_EMULATOR_HOST, &format!("http://{host}/v1"))?,
                emulated: true,
            },
            None => FirestoreEndpoint {
                base_url: parse_http_url("firestore", FIRESTORE_API_URL)?,
                emulated: false,
            },
        };

        Ok(Self {
            realtime,
            firestore,
        })
    }

    /// Whether the backend for `kind` is a local emulator.
    pub fn is_emulated(&self, kind: DatabaseKind) -> bool {
        match kind {
            DatabaseKind::Realtime => self.realtime.emulated,
            DatabaseKind::Firestore => self.firestore.emulated,
        }
    }
}

fn parse_http_url(name: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidInput {
        name,
        reason: format!("'{raw}' is not a valid URL: {e}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigError::InvalidInput {
            name,
            reason: format!("'{raw}' must be an http(s) URL with a host"),
        });
    }
    Ok(url)
}
