use firewrite_core::{ConfigError, CredentialError};
use firewrite_firebase::{AuthError, WriteError};

/// Every way the action can fail. All of them are terminal.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// The backing service refused or could not issue a session.
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

impl ActionError {
    /// Coarse category used in the failure log line.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "configuration",
            Self::Credential(_) | Self::Auth(_) => "credential",
            Self::Write(_) => "write",
        }
    }
}
