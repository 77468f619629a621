//! Transport error types.

use std::time::Duration;

use thiserror::Error;

/// Errors from a single chat-completion network call.
///
/// The transcript collapses all of these into one fixed failure turn; the
/// variants exist so callers and tests can still tell the kinds apart.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed or the body was not decodable as JSON.
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// No response within the configured deadline.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The in-flight request was cancelled by the user.
    #[error("request cancelled")]
    Cancelled,
}
