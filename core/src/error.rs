//! Error types for the movies client.
//!
//! # Design
//! Every failed call surfaces as a single `MovieClientError`, tagged by where
//! the failure came from. A response outside 2xx lands in `Status` with the
//! status code, its reason phrase and the raw body. Everything else that can
//! go wrong during the exchange (connecting, timing out, decoding) carries
//! only its underlying cause.

use thiserror::Error;

/// Lower-level failure reported by a [`Transport`](crate::transport::Transport).
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by the movies client.
#[derive(Debug, Error)]
pub enum MovieClientError {
    /// The server answered with a status outside the 2xx range.
    #[error("{status_text} ({status}): {body}")]
    Status {
        status: u16,
        status_text: String,
        body: String,
    },

    /// The exchange never produced a response.
    #[error("transport error: {0}")]
    Transport(#[source] TransportError),

    /// The response body could not be deserialized into the expected type.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request payload could not be serialized to JSON.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl MovieClientError {
    pub(crate) fn from_status(status: u16, body: String) -> Self {
        MovieClientError::Status {
            status,
            status_text: status_text(status),
            body,
        }
    }

    /// HTTP status code, when the failure was a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            MovieClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Reason phrase of the failing response, e.g. `Not Found`.
    pub fn status_text(&self) -> Option<&str> {
        match self {
            MovieClientError::Status { status_text, .. } => Some(status_text),
            _ => None,
        }
    }

    /// Raw body of the failing response.
    pub fn body(&self) -> Option<&str> {
        match self {
            MovieClientError::Status { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_bad_request(&self) -> bool {
        self.status() == Some(400)
    }
}

fn status_text(status: u16) -> String {
    ureq::http::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown Status")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_carries_reason_phrase() {
        let err = MovieClientError::from_status(404, r#"{"message":"gone"}"#.to_string());
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.status_text(), Some("Not Found"));
        assert_eq!(err.body(), Some(r#"{"message":"gone"}"#));
        assert!(err.is_not_found());
        assert!(!err.is_bad_request());
        assert_eq!(err.to_string(), r#"Not Found (404): {"message":"gone"}"#);
    }

    #[test]
    fn unknown_status_code_still_maps() {
        let err = MovieClientError::from_status(599, String::new());
        assert_eq!(err.status_text(), Some("Unknown Status"));
    }

    #[test]
    fn transport_error_has_no_status() {
        let cause: TransportError = "connection refused".into();
        let err = MovieClientError::Transport(cause);
        assert_eq!(err.status(), None);
        assert!(!err.is_not_found());
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), "transport error: connection refused");
    }
}
