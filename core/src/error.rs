//! Error types for the event service client.
//!
//! # Design
//! Failures fall into two families. `Network` covers everything that kept a
//! response from arriving at all. `NotFound` and `Server` are both non-2xx
//! answers from the backend; 404 keeps a dedicated variant because deleting
//! or editing a vanished event is the common case. The remaining variants
//! describe payloads that could not be encoded or decoded locally.

use thiserror::Error;

/// Errors returned by the client, transport, and store layers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, refused connection, I/O).
    #[error("network error: {0}")]
    Network(String),

    /// The server returned 404; the requested event does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Server { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A date string was not a `YYYY-MM-DD` calendar date.
    #[error("invalid date {0:?}: expected YYYY-MM-DD")]
    InvalidDate(String),
}

impl ApiError {
    /// True for transport-level failures.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    /// True when the backend answered with a non-2xx status.
    pub fn is_server(&self) -> bool {
        matches!(self, ApiError::NotFound | ApiError::Server { .. })
    }

    /// Status code carried by the failure, when there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound => Some(404),
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_and_server_are_server_errors() {
        assert!(ApiError::NotFound.is_server());
        assert!(ApiError::Server { status: 500, body: String::new() }.is_server());
        assert!(!ApiError::Network("refused".into()).is_server());
    }

    #[test]
    fn status_is_exposed_for_server_errors() {
        assert_eq!(ApiError::NotFound.status(), Some(404));
        assert_eq!(ApiError::Server { status: 503, body: String::new() }.status(), Some(503));
        assert_eq!(ApiError::Network("dns".into()).status(), None);
    }

    #[test]
    fn display_includes_status_and_body() {
        let err = ApiError::Server { status: 500, body: "Failed to save item".into() };
        assert_eq!(err.to_string(), "HTTP 500: Failed to save item");
    }
}
