//! Error types for the artifact store client.
//!
//! Two failure tiers are kept apart: network-level failures surface as
//! [`Error::Transport`] and are never derived from an HTTP status, while
//! application-level failures are mapped from the response status code.
//! Malformed response bodies are a third, separate kind ([`Error::Decode`]).

use serde::Deserialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// 400 Bad Request.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// 401 Unauthorized.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// 403 Forbidden.
    #[error("forbidden: {0}")]
    Forbidden(String),
    /// 404 Not Found.
    #[error("not found: {0}")]
    NotFound(String),
    /// 409 Conflict.
    #[error("conflict: {0}")]
    Conflict(String),
    /// 500 Internal Server Error.
    #[error("internal server error: {0}")]
    InternalServer(String),
    /// 503 Service Unavailable.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    /// Any other HTTP status >= 400.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    /// Connection, timeout, or TLS failure before a response was completed.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server returned a success response whose body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    /// Reading the caller's source or writing to the caller's sink failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Invalid client configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Error body shape used by the artifact store service.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl Error {
    /// Map a completed response with status >= 400 to an error kind.
    ///
    /// The message is resolved from the body's JSON `error` field, falling
    /// back to the raw body text, falling back to `HTTP <code>`.
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_else(|| {
                if body.is_empty() {
                    format!("HTTP {status}")
                } else {
                    body.to_string()
                }
            });

        match status {
            400 => Error::BadRequest(message),
            401 => Error::Unauthorized(message),
            403 => Error::Forbidden(message),
            404 => Error::NotFound(message),
            409 => Error::Conflict(message),
            500 => Error::InternalServer(message),
            503 => Error::ServiceUnavailable(message),
            _ => Error::Http { status, message },
        }
    }

    /// The HTTP status code this error was mapped from, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::BadRequest(_) => Some(400),
            Error::Unauthorized(_) => Some(401),
            Error::Forbidden(_) => Some(403),
            Error::NotFound(_) => Some(404),
            Error::Conflict(_) => Some(409),
            Error::InternalServer(_) => Some(500),
            Error::ServiceUnavailable(_) => Some(503),
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The server-provided message, for status-mapped errors.
    pub fn message(&self) -> Option<&str> {
        match self {
            Error::BadRequest(m)
            | Error::Unauthorized(m)
            | Error::Forbidden(m)
            | Error::NotFound(m)
            | Error::Conflict(m)
            | Error::InternalServer(m)
            | Error::ServiceUnavailable(m)
            | Error::Http { message: m, .. } => Some(m),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_status_codes_to_distinct_kinds() {
        let body = r#"{"error": "boom"}"#;
        assert!(matches!(Error::from_response(400, body), Error::BadRequest(m) if m == "boom"));
        assert!(matches!(Error::from_response(401, body), Error::Unauthorized(m) if m == "boom"));
        assert!(matches!(Error::from_response(403, body), Error::Forbidden(m) if m == "boom"));
        assert!(matches!(Error::from_response(404, body), Error::NotFound(m) if m == "boom"));
        assert!(matches!(Error::from_response(409, body), Error::Conflict(m) if m == "boom"));
        assert!(matches!(Error::from_response(500, body), Error::InternalServer(m) if m == "boom"));
        assert!(
            matches!(Error::from_response(503, body), Error::ServiceUnavailable(m) if m == "boom")
        );
    }

    #[test]
    fn unmapped_status_uses_generic_kind() {
        let err = Error::from_response(418, "short and stout");
        assert!(matches!(
            &err,
            Error::Http { status: 418, message } if message == "short and stout"
        ));
        assert_eq!(err.status(), Some(418));
    }

    #[test]
    fn message_falls_back_to_raw_body_then_status_line() {
        // JSON body without an `error` field falls back to the raw text.
        let err = Error::from_response(500, r#"{"detail": "nope"}"#);
        assert_eq!(err.message(), Some(r#"{"detail": "nope"}"#));

        // Non-JSON body is used verbatim.
        let err = Error::from_response(404, "no such key");
        assert_eq!(err.message(), Some("no such key"));

        // Empty body falls back to the synthesized status line.
        let err = Error::from_response(418, "");
        assert_eq!(err.message(), Some("HTTP 418"));
    }

    #[test]
    fn status_is_reported_for_mapped_kinds_only() {
        assert_eq!(Error::from_response(409, "").status(), Some(409));
        assert_eq!(Error::Config("bad".into()).status(), None);
        let io_err = Error::Io(std::io::Error::new(std::io::ErrorKind::Other, "io"));
        assert_eq!(io_err.status(), None);
    }
}
