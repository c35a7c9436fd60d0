//! Error types for backend API operations

use thiserror::Error;

/// Result type for backend API operations
pub type SupabaseResult<T> = Result<T, SupabaseError>;

/// Errors that can occur when talking to the hosted backend
#[derive(Error, Debug)]
pub enum SupabaseError {
    /// The backend rejected the operation; carries the backend's own message
    #[error("{0}")]
    Api(String),

    /// Transport-level failure reaching the backend
    #[error("backend request failed: {0}")]
    Network(#[from] reqwest::Error),
}

impl SupabaseError {
    /// Builds an `Api` error from a non-success backend response.
    ///
    /// The backend reports failures as JSON bodies with a `message` field;
    /// that message is preserved verbatim. Bodies without one fall back to
    /// the raw text, then to the HTTP status line.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|value| {
                value
                    .get("message")
                    .and_then(|message| message.as_str())
                    .map(ToString::to_string)
            })
            .unwrap_or_else(|| if body.is_empty() { status.to_string() } else { body });

        Self::Api(message)
    }
}
