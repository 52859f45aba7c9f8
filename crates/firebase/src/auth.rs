//! Service-account authentication.
//!
//! Exchanges a self-signed RS256 JWT assertion for an OAuth2 access token
//! (the JWT-bearer grant) and wraps the result in a [`Session`], the one
//! authenticated handle the writers use.

use firewrite_core::ServiceAccount;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::error::check_status;

/// Lifetime requested for the signed assertion.
pub const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// OAuth2 scopes covering both database APIs.
pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/cloud-platform",
    "https://www.googleapis.com/auth/firebase.database",
    "https://www.googleapis.com/auth/datastore",
    "https://www.googleapis.com/auth/userinfo.email",
];

/// Bearer token the Firebase emulators accept as an admin.
pub const EMULATOR_TOKEN: &str = "owner";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The private key is not a usable RSA PEM.
    #[error("Invalid service account private key: {0}")]
    InvalidKey(jsonwebtoken::errors::Error),

    #[error("Failed to sign token assertion: {0}")]
    Signing(jsonwebtoken::errors::Error),

    #[error("Token request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The token endpoint answered with a non-2xx status.
    #[error("Token endpoint rejected the credentials ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Claims of the self-signed assertion sent to the token endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssertionClaims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub scope: String,
    pub iat: i64,
    pub exp: i64,
}

impl AssertionClaims {
    pub fn new(account: &ServiceAccount, now: i64) -> Self {
        Self {
            iss: account.client_email.clone(),
            sub: account.client_email.clone(),
            aud: account.token_uri().to_string(),
            scope: SCOPES.join(" "),
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// Sign the JWT assertion for `account` at time `now` (Unix seconds).
pub fn sign_assertion(account: &ServiceAccount, now: i64) -> Result<String, AuthError> {
    let key = EncodingKey::from_rsa_pem(account.private_key.as_bytes())
        .map_err(AuthError::InvalidKey)?;

    let mut header = Header::new(Algorithm::RS256);
    header.kid = account.private_key_id.clone();

    encode(&header, &AssertionClaims::new(account, now), &key).map_err(AuthError::Signing)
}

/// An authenticated connection to the Firebase project.
pub struct Session {
    client: reqwest::Client,
    project_id: String,
    access_token: String,
}

impl Session {
    /// Exchange the service-account key for an access token.
    ///
    /// No retry: any failure is returned to the caller as-is.
    pub async fn authenticate(
        client: reqwest::Client,
        account: &ServiceAccount,
    ) -> Result<Self, AuthError> {
        let assertion = sign_assertion(account, chrono::Utc::now().timestamp())?;

        tracing::info!(
            client_email = %account.client_email,
            token_uri = %account.token_uri(),
            "Requesting access token",
        );

        let response = client
            .post(account.token_uri())
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let response = check_status(response)
            .await
            .map_err(|(status, body)| AuthError::Rejected { status, body })?;

        let token: TokenResponse = response.json().await?;
        tracing::info!(expires_in = ?token.expires_in, "Initialized Firebase session");

        Ok(Self {
            client,
            project_id: account.project_id.clone(),
            access_token: token.access_token,
        })
    }

    /// A session for a local emulator, which needs no token exchange.
    pub fn emulator(client: reqwest::Client, project_id: &str) -> Self {
        tracing::info!(project_id, "Using emulator session");
        Self {
            client,
            project_id: project_id.to_string(),
            access_token: EMULATOR_TOKEN.to_string(),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub(crate) fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub(crate) fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("project_id", &self.project_id)
            .field("access_token", &"<redacted>")
            .finish()
    }
}
