//! Error taxonomy shared by the resource client and the store.

use thiserror::Error;

/// Failures surfaced by the core crate.
///
/// Values are `Clone` so the store can remember the last failure in its
/// `error` slot while still handing the same failure back to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// Local, pre-request rejection. Never reaches the network.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Non-2xx response or transport-level failure (no response at all).
    #[error("request failed{}: {message}", status_suffix(.status))]
    RequestFailed {
        /// HTTP status, when a response was received.
        status: Option<u16>,
        /// Human readable description.
        message: String,
    },

    /// A 2xx body that did not match the expected record shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build a [`Error::Validation`] from anything printable.
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// Build a [`Error::RequestFailed`].
    pub fn request_failed(status: Option<u16>, message: impl Into<String>) -> Self {
        Error::RequestFailed {
            status,
            message: message.into(),
        }
    }

    /// Status code carried by a request failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RequestFailed { status, .. } => *status,
            _ => None,
        }
    }

    /// Whether this error was raised locally before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Error::Decode(err.to_string());
        }
        Error::RequestFailed {
            status: err.status().map(|status| status.as_u16()),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status
        .map(|code| format!(" with status {code}"))
        .unwrap_or_default()
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_message_includes_status_when_known() {
        let err = Error::request_failed(Some(404), "Trainer not found");
        assert_eq!(
            err.to_string(),
            "request failed with status 404: Trainer not found"
        );
        assert_eq!(err.status(), Some(404));

        let err = Error::request_failed(None, "connection refused");
        assert_eq!(err.to_string(), "request failed: connection refused");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn json_errors_become_decode_errors() {
        let err: Error = serde_json::from_str::<u32>("\"nope\"").unwrap_err().into();
        assert!(matches!(err, Error::Decode(_)));
        assert!(!err.is_validation());
    }
}
