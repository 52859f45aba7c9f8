//! The one-shot pipeline: credentials → payload → session → write.
//!
//! Everything that can be checked locally is checked before the token
//! exchange, so a bad target never costs a network call.

use firewrite_core::{coerce_value, parse_credentials, Target};
use firewrite_firebase::{
    validate_write, DatabaseWriter, Endpoints, FirebaseWriter, WriteReceipt,
};
use serde_json::Value;

use crate::config::ActionConfig;
use crate::error::ActionError;

/// Run the action once against the real backends.
pub async fn run(config: &ActionConfig) -> Result<WriteReceipt, ActionError> {
    let inputs = &config.inputs;

    let account = parse_credentials(&inputs.credentials)?;
    tracing::info!(
        project_id = %account.project_id,
        client_email = %account.client_email,
        "Parsed service account credentials",
    );

    let endpoints = Endpoints::resolve(
        &account.project_id,
        inputs.database_url.as_deref(),
        &config.emulators,
    )?;

    let payload = coerce_value(inputs.value.as_deref());
    validate_write(&inputs.target, &payload)?;

    let writer = FirebaseWriter::connect(
        reqwest::Client::new(),
        &account,
        endpoints,
        inputs.target.kind(),
    )
    .await?;

    write_once(&writer, &inputs.target, &payload).await
}

/// Issue exactly one write through `writer`.
pub async fn write_once(
    writer: &dyn DatabaseWriter,
    target: &Target,
    payload: &Value,
) -> Result<WriteReceipt, ActionError> {
    tracing::info!(destination = %target, "Writing value");
    let receipt = writer.write(target, payload).await?;
    tracing::info!(
        kind = %receipt.kind,
        location = %receipt.location,
        "Write completed",
    );
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use firewrite_core::{ActionInputs, ConfigError, CredentialError, DatabaseKind};
    use firewrite_firebase::{EmulatorHosts, WriteError};
    use serde_json::json;

    use super::*;

    /// Records every write and optionally fails them.
    #[derive(Default)]
    struct RecordingWriter {
        calls: Mutex<Vec<(Target, Value)>>,
        reject: bool,
    }

    #[async_trait]
    impl DatabaseWriter for RecordingWriter {
        async fn write(&self, target: &Target, payload: &Value) -> Result<WriteReceipt, WriteError> {
            self.calls
                .lock()
                .unwrap()
                .push((target.clone(), payload.clone()));
            if self.reject {
                return Err(WriteError::Rejected {
                    status: 403,
                    body: "Permission denied".into(),
                });
            }
            Ok(WriteReceipt {
                kind: target.kind(),
                location: "recorded".into(),
            })
        }
    }

    fn config(pairs: &[(&str, &str)]) -> ActionConfig {
        let source: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ActionConfig {
            inputs: ActionInputs::read(&source).unwrap(),
            emulators: EmulatorHosts::default(),
        }
    }

    #[tokio::test]
    async fn write_once_issues_a_single_write() {
        let writer = RecordingWriter::default();
        let target = Target::Realtime { path: "a/b".into() };

        let receipt = write_once(&writer, &target, &json!(5)).await.unwrap();

        assert_eq!(receipt.kind, DatabaseKind::Realtime);
        let calls = writer.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], (target, json!(5)));
    }

    #[tokio::test]
    async fn rejected_write_surfaces_as_write_error() {
        let writer = RecordingWriter {
            reject: true,
            ..Default::default()
        };
        let target = Target::Firestore {
            collection: "users".into(),
            document: "u1".into(),
        };

        let err = write_once(&writer, &target, &json!({"name": "x"}))
            .await
            .unwrap_err();

        assert_matches!(err, ActionError::Write(WriteError::Rejected { status: 403, .. }));
        assert!(err.to_string().contains("Permission denied"));
        assert_eq!(writer.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn malformed_credentials_fail_before_any_request() {
        let config = config(&[("credentials", "%%% nope %%%"), ("path", "a")]);
        let err = run(&config).await.unwrap_err();
        assert_matches!(err, ActionError::Credential(CredentialError::Format(_)));
    }

    #[tokio::test]
    async fn invalid_database_url_is_a_config_error() {
        let credentials = json!({
            "project_id": "demo",
            "client_email": "writer@demo.iam.gserviceaccount.com",
            "private_key": "unused",
        })
        .to_string();
        let config = config(&[
            ("credentials", credentials.as_str()),
            ("path", "a"),
            ("databaseUrl", "not a url"),
        ]);

        let err = run(&config).await.unwrap_err();
        assert_matches!(err, ActionError::Config(ConfigError::InvalidInput { .. }));
    }
}
