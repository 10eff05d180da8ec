//! Error types for lastaccess.
//!
//! Failures fall into three groups: the transport never produced a usable
//! response, the upstream API answered with a non-success status, or the
//! caller supplied something that fails local validation.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// The unified error type for lastaccess operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, malformed body).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The upstream API rejected the request.
    #[error("upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// Input validation errors.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the upstream rejection, if this is one.
    pub fn as_upstream(&self) -> Option<&UpstreamError> {
        match self {
            Error::Upstream(err) => Some(err),
            _ => None,
        }
    }

    /// Short message suitable for showing in place of a list.
    pub fn summary(&self) -> String {
        match self {
            Error::Upstream(err) => err.summary(),
            other => other.to_string(),
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Response body could not be decoded.
    #[error("malformed response: {message}")]
    Decode { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let message = err.to_string();
        if err.is_timeout() {
            TransportError::Timeout { message }
        } else if err.is_connect() {
            TransportError::Connection { message }
        } else if err.is_decode() {
            TransportError::Decode { message }
        } else {
            TransportError::Http { message }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Transport(TransportError::Decode {
            message: err.to_string(),
        })
    }
}

/// A non-success response from the upstream API.
///
/// `details` holds the response body, parsed as JSON when possible and
/// wrapped as `{"error": "<text>"}` otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamError {
    /// HTTP status code.
    pub status: u16,
    /// Error body from the server.
    pub details: Value,
}

impl UpstreamError {
    /// Create a new upstream error.
    pub fn new(status: u16, details: Value) -> Self {
        Self { status, details }
    }

    /// Build an upstream error from a raw body.
    pub fn from_body(status: u16, body: &str) -> Self {
        let details = serde_json::from_str(body)
            .unwrap_or_else(|_| serde_json::json!({ "error": body }));
        Self { status, details }
    }

    /// Best-effort human readable message taken from the body.
    pub fn summary(&self) -> String {
        let details = &self.details;
        details["error"]
            .as_str()
            .or_else(|| details["error"]["message"].as_str())
            .or_else(|| details["message"].as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", self.status))
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401 || self.status == 403
    }
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.summary())
    }
}

impl std::error::Error for UpstreamError {}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid report identifier.
    #[error("invalid report id '{value}': {reason}")]
    ReportId { value: String, reason: String },

    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Too many excluded folders in a report request.
    #[error("at most {max} excluded folders are allowed, got {count}")]
    TooManyFolders { max: usize, count: usize },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
