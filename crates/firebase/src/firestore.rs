//! Firestore document writes over the REST API.
//!
//! A write is a single `PATCH` of the document resource without an
//! update mask, which replaces the whole document (creating it if
//! needed). Plain JSON is translated into Firestore's typed value
//! encoding first.

use reqwest::Url;
use serde_json::{json, Map, Value};

use firewrite_core::value::MAX_SAFE_INTEGER;

use crate::auth::Session;
use crate::endpoints::FirestoreEndpoint;
use crate::error::{ensure_success, WriteError};

/// Only the default database is addressed.
pub const DEFAULT_DATABASE: &str = "(default)";

#[derive(Debug)]
pub struct Firestore {
    endpoint: FirestoreEndpoint,
}

impl Firestore {
    pub fn new(endpoint: FirestoreEndpoint) -> Self {
        Self { endpoint }
    }

    /// REST URL of `<collection>/<document>` in `project_id`.
    pub fn document_url(
        &self,
        project_id: &str,
        collection: &str,
        document: &str,
    ) -> Result<Url, WriteError> {
        let segments = document_path(collection, document)?;

        let mut url = self.endpoint.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                WriteError::InvalidLocation(format!(
                    "Firestore URL '{}' cannot carry a path",
                    self.endpoint.base_url
                ))
            })?
            .pop_if_empty()
            .extend(["projects", project_id, "databases", DEFAULT_DATABASE, "documents"])
            .extend(&segments);
        Ok(url)
    }

    /// Replace `<collection>/<document>` with `value`.
    ///
    /// `value` must be a JSON object. Returns the document path written.
    pub async fn set_document(
        &self,
        session: &Session,
        collection: &str,
        document: &str,
        value: &Value,
    ) -> Result<String, WriteError> {
        let fields = document_fields(value)?;

        let url = self.document_url(session.project_id(), collection, document)?;
        let location = document_path(collection, document)?.join("/");
        tracing::info!(
            collection,
            document,
            "Updating Firestore document",
        );

        let response = session
            .client()
            .patch(url)
            .bearer_auth(session.access_token())
            .json(&json!({ "fields": fields }))
            .send()
            .await?;
        ensure_success(response).await?;

        Ok(location)
    }
}

/// Split `collection` and `document` into the full document path.
///
/// Collections sit at odd depths, documents at even ones, so the
/// combined path must have an even number of segments.
pub fn document_path<'a>(collection: &'a str, document: &'a str) -> Result<Vec<&'a str>, WriteError> {
    let segments: Vec<&str> = collection
        .split('/')
        .chain(document.split('/'))
        .filter(|s| !s.is_empty())
        .collect();

    if let Some(bad) = segments.iter().find(|s| matches!(**s, "." | "..")) {
        return Err(WriteError::InvalidLocation(format!(
            "'{bad}' is not a valid Firestore id"
        )));
    }
    if segments.is_empty() || segments.len() % 2 != 0 {
        return Err(WriteError::InvalidLocation(format!(
            "'{collection}' / '{document}' does not name a document (collection/document pairs expected)"
        )));
    }
    Ok(segments)
}

/// Encode document data, which must be a JSON object.
pub fn document_fields(value: &Value) -> Result<Value, WriteError> {
    match value {
        Value::Object(map) => Ok(encode_fields(map)),
        other => Err(WriteError::InvalidDocument(format!(
            "document data must be a JSON object, got {}",
            json_type_name(other)
        ))),
    }
}

/// Encode a JSON object as a Firestore `fields` map.
pub fn encode_fields(map: &Map<String, Value>) -> Value {
    Value::Object(
        map.iter()
            .map(|(key, value)| (key.clone(), encode_value(value)))
            .collect(),
    )
}

/// Encode one JSON value in Firestore's typed representation.
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                if i.unsigned_abs() <= MAX_SAFE_INTEGER as u64 {
                    return json!({ "integerValue": i.to_string() });
                }
                return json!({ "doubleValue": i as f64 });
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => {
                    json!({ "integerValue": (f as i64).to_string() })
                }
                Some(f) => json!({ "doubleValue": f }),
                None => json!({ "stringValue": n.to_string() }),
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => json!({
            "arrayValue": { "values": items.iter().map(encode_value).collect::<Vec<_>>() }
        }),
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
