//! Relay error envelopes.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

use lastaccess_core::Error;
use lastaccess_core::Report;
use lastaccess_core::error::UpstreamError;

/// Message used for failures not caused by the upstream API's answer.
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Message used when a report falls outside the retention window.
pub const REPORT_TOO_OLD: &str = "Report too old";

/// Message used when the request itself is malformed.
pub const INVALID_REQUEST: &str = "Invalid request";

/// A failed relay call.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The upstream API answered with a non-success status.
    #[error("{context}: HTTP {status}")]
    Upstream {
        context: &'static str,
        status: u16,
        details: Value,
        metadata: Option<Box<Report>>,
    },

    /// The report is past the retention window; assets were not fetched.
    #[error("Report too old: {message}")]
    ReportTooOld {
        message: String,
        metadata: Box<Report>,
    },

    /// The request failed local validation.
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Transport or parsing failure.
    #[error("Internal server error: {message}")]
    Internal { message: String },
}

/// JSON body of every relay error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Report>,
}

impl RelayError {
    /// Classify an API failure, labelling upstream rejections with `context`.
    pub fn from_api(err: Error, context: &'static str, metadata: Option<Report>) -> Self {
        match err {
            Error::Upstream(UpstreamError { status, details }) => RelayError::Upstream {
                context,
                status,
                details,
                metadata: metadata.map(Box::new),
            },
            Error::InvalidInput(err) => RelayError::InvalidRequest {
                message: err.to_string(),
            },
            Error::Transport(err) => RelayError::Internal {
                message: err.to_string(),
            },
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        RelayError::Internal {
            message: message.into(),
        }
    }

    /// HTTP status of the response.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            RelayError::ReportTooOld { .. } | RelayError::InvalidRequest { .. } => {
                StatusCode::BAD_REQUEST
            }
            RelayError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body of the response.
    pub fn envelope(self) -> ErrorEnvelope {
        match self {
            RelayError::Upstream {
                context,
                details,
                metadata,
                ..
            } => ErrorEnvelope {
                error: context.to_string(),
                details: Some(details),
                message: None,
                metadata: metadata.map(|m| *m),
            },
            RelayError::ReportTooOld { message, metadata } => ErrorEnvelope {
                error: REPORT_TOO_OLD.to_string(),
                details: None,
                message: Some(message),
                metadata: Some(*metadata),
            },
            RelayError::InvalidRequest { message } => ErrorEnvelope {
                error: INVALID_REQUEST.to_string(),
                details: None,
                message: Some(message),
                metadata: None,
            },
            RelayError::Internal { message } => ErrorEnvelope {
                error: INTERNAL_ERROR.to_string(),
                details: None,
                message: Some(message),
                metadata: None,
            },
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            RelayError::Upstream { .. } => {
                warn!(status = status.as_u16(), error = %self, "relaying upstream error")
            }
            RelayError::Internal { .. } => error!(error = %self, "relay call failed"),
            RelayError::ReportTooOld { .. } | RelayError::InvalidRequest { .. } => {
                info!(error = %self, "request refused")
            }
        }

        (status, Json(self.envelope())).into_response()
    }
}
