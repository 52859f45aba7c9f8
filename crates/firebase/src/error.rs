/// Errors from the single database write.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// The path or document id cannot address a location.
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    /// The payload cannot be stored as a Firestore document.
    #[error("Invalid document data: {0}")]
    InvalidDocument(String),

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The database answered with a non-2xx status.
    #[error("Database rejected the write ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Pass a 2xx response through; otherwise return its status and body.
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, (u16, String)> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<unreadable body>".to_string());
    Err((status.as_u16(), body))
}

/// Map a non-2xx response to [`WriteError::Rejected`], keeping the body
/// for the failure report.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, WriteError> {
    check_status(response)
        .await
        .map_err(|(status, body)| WriteError::Rejected { status, body })
}
