//! Realtime Database writes over the REST API.
//!
//! A write is a single `PUT <db>/<path>.json`, which replaces whatever
//! was stored at that location.

use reqwest::Url;
use serde_json::Value;

use crate::auth::Session;
use crate::endpoints::RealtimeEndpoint;
use crate::error::{ensure_success, WriteError};

/// Characters the Realtime Database does not allow in keys.
const FORBIDDEN_KEY_CHARS: &[char] = &['.', '#', '$', '[', ']'];

#[derive(Debug)]
pub struct RealtimeDatabase {
    endpoint: RealtimeEndpoint,
}

impl RealtimeDatabase {
    pub fn new(endpoint: RealtimeEndpoint) -> Self {
        Self { endpoint }
    }

    /// REST URL for `path`, e.g. `a/b` → `<db>/a/b.json?print=silent`.
    pub fn location_url(&self, path: &str) -> Result<Url, WriteError> {
        let segments = split_path(path)?;

        let mut url = self.endpoint.base_url.clone();
        {
            let mut parts = url.path_segments_mut().map_err(|_| {
                WriteError::InvalidLocation(format!(
                    "database URL '{}' cannot carry a path",
                    self.endpoint.base_url
                ))
            })?;
            parts.pop_if_empty();
            match segments.split_last() {
                Some((last, parents)) => {
                    parts.extend(parents);
                    parts.push(&format!("{last}.json"));
                }
                None => {
                    parts.push(".json");
                }
            }
        }

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("print", "silent");
            if self.endpoint.emulated {
                query.append_pair("ns", &self.endpoint.namespace);
            }
        }

        Ok(url)
    }

    /// Replace the value stored at `path` with `value`.
    ///
    /// Returns the normalized location that was written.
    pub async fn set(
        &self,
        session: &Session,
        path: &str,
        value: &Value,
    ) -> Result<String, WriteError> {
        let url = self.location_url(path)?;
        let location = split_path(path)?.join("/");
        tracing::info!(location = %location, "Updating Realtime Database");

        let response = session
            .client()
            .put(url)
            .bearer_auth(session.access_token())
            .json(value)
            .send()
            .await?;
        ensure_success(response).await?;

        Ok(location)
    }
}

/// Split a slash-delimited path into keys, dropping empty segments.
pub fn split_path(path: &str) -> Result<Vec<&str>, WriteError> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let bad = segment
                .chars()
                .any(|c| FORBIDDEN_KEY_CHARS.contains(&c) || c.is_ascii_control());
            if bad {
                Err(WriteError::InvalidLocation(format!(
                    "'{path}' contains a key with one of \".\", \"#\", \"$\", \"[\", \"]\" or a control character"
                )))
            } else {
                Ok(segment)
            }
        })
        .collect()
}
