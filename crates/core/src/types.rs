//! Shared domain types: database kinds and write targets.

use std::fmt;

use crate::error::ConfigError;

/// Input value selecting the Realtime Database.
pub const KIND_REALTIME: &str = "realtime";

/// Input value selecting Cloud Firestore.
pub const KIND_FIRESTORE: &str = "firestore";

/// The two database kinds the action can write to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    Realtime,
    Firestore,
}

impl DatabaseKind {
    /// Parse the `databaseType` input.
    ///
    /// An absent or empty value resolves to [`DatabaseKind::Realtime`].
    pub fn from_input(value: Option<&str>) -> Result<Self, ConfigError> {
        match value.map(str::trim) {
            None | Some("") | Some(KIND_REALTIME) => Ok(Self::Realtime),
            Some(KIND_FIRESTORE) => Ok(Self::Firestore),
            Some(other) => Err(ConfigError::InvalidDatabaseType(other.to_string())),
        }
    }

    /// The input spelling of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Realtime => KIND_REALTIME,
            Self::Firestore => KIND_FIRESTORE,
        }
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the single write lands.
///
/// The document id only exists on the Firestore variant, so a Firestore
/// target without one cannot be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A slash-delimited location in the Realtime Database tree.
    Realtime { path: String },
    /// A document inside a Firestore collection.
    Firestore {
        collection: String,
        document: String,
    },
}

impl Target {
    pub fn kind(&self) -> DatabaseKind {
        match self {
            Self::Realtime { .. } => DatabaseKind::Realtime,
            Self::Firestore { .. } => DatabaseKind::Firestore,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Realtime { path } => write!(f, "realtime location '{path}'"),
            Self::Firestore {
                collection,
                document,
            } => write!(f, "firestore collection '{collection}' document '{document}'"),
        }
    }
}
