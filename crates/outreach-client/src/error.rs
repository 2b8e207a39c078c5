//! Error types for API operations.

use thiserror::Error;

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while talking to the backend.
#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a usable response (connection refused,
    /// DNS failure, timeout, malformed body).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server error ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body, or a generic fallback.
        message: String,
    },

    /// The base URL or a joined endpoint path is invalid.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Builds a [`Error::Server`] from a status code and raw response body.
    ///
    /// The backend reports failures as `{"message": "..."}`. When the body
    /// carries such a message it becomes the error text; anything else falls
    /// back to a generic message so callers always have something readable.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message")?.as_str().map(ToString::to_string))
            .unwrap_or_else(|| "the server rejected the request".to_string());

        Self::Server { status, message }
    }

    /// Returns true if this error came from a non-success HTTP status.
    #[must_use]
    pub const fn is_server(&self) -> bool {
        matches!(self, Self::Server { .. })
    }
}
