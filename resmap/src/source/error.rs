//! Source error types.

use thiserror::Error;

/// Errors from talking to a remote feature, tile or query endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The request could not be built or sent.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Endpoint or parameters produced an invalid URL.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The response body was not what the endpoint promised.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
