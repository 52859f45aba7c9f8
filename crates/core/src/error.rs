/// Errors raised while resolving the action's inputs.
///
/// All of these are reported before any network activity happens.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Input required and not supplied: {0}")]
    MissingInput(&'static str),

    #[error("Database type invalid, please set to either realtime or firestore (got '{0}')")]
    InvalidDatabaseType(String),

    #[error("Invalid value for input '{name}': {reason}")]
    InvalidInput { name: &'static str, reason: String },
}

/// Errors raised while decoding the service-account credential blob.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Credentials are neither valid JSON nor base64-encoded JSON: {0}")]
    Format(String),

    #[error("Credentials must be a JSON object")]
    NotAnObject,

    #[error("Service account is missing a non-empty string field '{0}'")]
    MissingField(&'static str),

    /// The JSON decoded but a field has the wrong type.
    #[error("Service account has an invalid field: {0}")]
    InvalidField(String),
}
