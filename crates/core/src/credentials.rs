//! Service-account credential decoding.
//!
//! The `credentials` input holds a Google service-account key, either as
//! raw JSON or as base64-encoded JSON (the form most people paste into a
//! repository secret).

use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::{alphabet, Engine};
use serde::Deserialize;

use crate::error::CredentialError;

/// Token endpoint used when the key file does not name one.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Standard alphabet, padding optional.
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A parsed service-account key.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceAccount {
    #[serde(rename = "type", default)]
    pub account_type: Option<String>,
    #[serde(alias = "projectId", default)]
    pub project_id: String,
    #[serde(alias = "privateKeyId", default)]
    pub private_key_id: Option<String>,
    #[serde(alias = "privateKey", default)]
    pub private_key: String,
    #[serde(alias = "clientEmail", default)]
    pub client_email: String,
    #[serde(alias = "clientId", default)]
    pub client_id: Option<String>,
    #[serde(alias = "tokenUri", default)]
    pub token_uri: Option<String>,
}

impl ServiceAccount {
    /// The OAuth2 token endpoint for this account.
    pub fn token_uri(&self) -> &str {
        self.token_uri
            .as_deref()
            .filter(|uri| !uri.is_empty())
            .unwrap_or(DEFAULT_TOKEN_URI)
    }

    fn validate(self) -> Result<Self, CredentialError> {
        if self.project_id.trim().is_empty() {
            return Err(CredentialError::MissingField("project_id"));
        }
        if self.client_email.trim().is_empty() {
            return Err(CredentialError::MissingField("client_email"));
        }
        if self.private_key.trim().is_empty() {
            return Err(CredentialError::MissingField("private_key"));
        }
        Ok(self)
    }
}

impl std::fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("account_type", &self.account_type)
            .field("project_id", &self.project_id)
            .field("private_key_id", &self.private_key_id)
            .field("private_key", &"<redacted>")
            .field("client_email", &self.client_email)
            .field("client_id", &self.client_id)
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

/// Decode the credential blob into JSON.
///
/// Tries raw JSON first, then base64-encoded JSON.
pub fn decode_credentials(raw: &str) -> Result<serde_json::Value, CredentialError> {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => {
            tracing::info!("Loaded raw JSON credentials");
            Ok(value)
        }
        Err(json_err) => {
            let compact: String = raw.chars().filter(|c| !c.is_ascii_whitespace()).collect();
            let bytes = BASE64.decode(compact).map_err(|b64_err| {
                CredentialError::Format(format!("JSON: {json_err}; base64: {b64_err}"))
            })?;
            let value = serde_json::from_slice(&bytes).map_err(|e| {
                CredentialError::Format(format!("JSON: {json_err}; decoded base64: {e}"))
            })?;
            tracing::info!("Loaded base64 credentials");
            Ok(value)
        }
    }
}

/// Decode and validate a service-account key.
pub fn parse_credentials(raw: &str) -> Result<ServiceAccount, CredentialError> {
    let value = decode_credentials(raw)?;
    if !value.is_object() {
        return Err(CredentialError::NotAnObject);
    }
    let account: ServiceAccount = serde_json::from_value(value)
        .map_err(|e| CredentialError::InvalidField(e.to_string()))?;
    account.validate()
}
