//! The single dispatch point between a [`Target`] and a backend.

use async_trait::async_trait;
use firewrite_core::{DatabaseKind, ServiceAccount, Target};
use serde_json::Value;

use crate::auth::{AuthError, Session};
use crate::endpoints::Endpoints;
use crate::error::WriteError;
use crate::firestore::{document_fields, document_path, Firestore};
use crate::realtime::{split_path, RealtimeDatabase};

/// What a successful write touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReceipt {
    pub kind: DatabaseKind,
    /// Normalized location, e.g. `a/b` or `users/u1`.
    pub location: String,
}

/// Something that can perform the action's one write.
#[async_trait]
pub trait DatabaseWriter: Send + Sync {
    async fn write(&self, target: &Target, payload: &Value) -> Result<WriteReceipt, WriteError>;
}

/// Check that `payload` can be written to `target` without contacting
/// either backend. Returns the normalized location.
pub fn validate_write(target: &Target, payload: &Value) -> Result<String, WriteError> {
    match target {
        Target::Realtime { path } => Ok(split_path(path)?.join("/")),
        Target::Firestore {
            collection,
            document,
        } => {
            document_fields(payload)?;
            Ok(document_path(collection, document)?.join("/"))
        }
    }
}

/// [`DatabaseWriter`] backed by the Firebase REST APIs.
#[derive(Debug)]
pub struct FirebaseWriter {
    session: Session,
    realtime: RealtimeDatabase,
    firestore: Firestore,
}

impl FirebaseWriter {
    pub fn new(session: Session, endpoints: Endpoints) -> Self {
        Self {
            session,
            realtime: RealtimeDatabase::new(endpoints.realtime),
            firestore: Firestore::new(endpoints.firestore),
        }
    }

    /// Establish the session for `kind` and build the writer.
    ///
    /// Emulated backends get the emulator session; everything else goes
    /// through the service-account token exchange.
    pub async fn connect(
        client: reqwest::Client,
        account: &ServiceAccount,
        endpoints: Endpoints,
        kind: DatabaseKind,
    ) -> Result<Self, AuthError> {
        let session = if endpoints.is_emulated(kind) {
            Session::emulator(client, &account.project_id)
        } else {
            Session::authenticate(client, account).await?
        };
        Ok(Self::new(session, endpoints))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

#[async_trait]
impl DatabaseWriter for FirebaseWriter {
    async fn write(&self, target: &Target, payload: &Value) -> Result<WriteReceipt, WriteError> {
        let location = match target {
            Target::Realtime { path } => self.realtime.set(&self.session, path, payload).await?,
            Target::Firestore {
                collection,
                document,
            } => {
                self.firestore
                    .set_document(&self.session, collection, document, payload)
                    .await?
            }
        };

        Ok(WriteReceipt {
            kind: target.kind(),
            location,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn realtime_targets_validate_keys() {
        let ok = Target::Realtime { path: "/a//b".into() };
        assert_eq!(validate_write(&ok, &json!(1)).unwrap(), "a/b");

        let bad = Target::Realtime { path: "a.b".into() };
        assert_matches!(
            validate_write(&bad, &json!(1)),
            Err(WriteError::InvalidLocation(_))
        );
    }

    #[test]
    fn firestore_targets_need_object_data_and_a_document_path() {
        let target = Target::Firestore {
            collection: "users".into(),
            document: "u1".into(),
        };
        assert_eq!(
            validate_write(&target, &json!({"name": "x"})).unwrap(),
            "users/u1"
        );
        assert_matches!(
            validate_write(&target, &json!(1)),
            Err(WriteError::InvalidDocument(_))
        );

        let odd = Target::Firestore {
            collection: "users/u1".into(),
            document: "x".into(),
        };
        assert_matches!(
            validate_write(&odd, &json!({})),
            Err(WriteError::InvalidLocation(_))
        );
    }
}
