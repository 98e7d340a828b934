//! Error Types
//!
//! Every failed backend call is funnelled through [`ClientError::from_failure`],
//! which classifies it into the buckets users see in the alert banner.

use thiserror::Error;

/// Result type alias for front-end operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client-side error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Backend unreachable (no HTTP status)
    #[error("Network unreachable")]
    Network,

    /// 404 from the backend
    #[error("Not found")]
    NotFound,

    /// 500 from the backend
    #[error("Internal server error")]
    Server,

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Request did not complete in time
    #[error("Request timed out")]
    Timeout,

    /// Request was cancelled before it completed
    #[error("Request aborted")]
    Aborted,

    /// Anything else; the raw body is shown to the user
    #[error("Unexpected response ({status}): {body}")]
    Uncaught { status: u16, body: String },

    /// Page markup did not have what a component needs
    #[error("Markup error: {0}")]
    Markup(String),

    /// Session storage read/write failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Transport-level reason a request failed, when there is one
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    ParseError,
    Timeout,
    Abort,
}

/// Raw description of a failed request, before classification
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Failure {
    /// HTTP status, `0` when the request never got a response
    pub status: u16,

    /// Transport-level reason, if the client reported one
    pub kind: Option<FailureKind>,

    /// Raw response body
    pub body: String,
}

impl Failure {
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            kind: None,
            body: body.into(),
        }
    }

    pub fn kind(kind: FailureKind) -> Self {
        Self {
            status: 0,
            kind: Some(kind),
            body: String::new(),
        }
    }

    /// Attach a transport-level reason
    #[must_use]
    pub const fn with_kind(mut self, kind: FailureKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

impl ClientError {
    /// Classify a failed request.
    ///
    /// Status codes win over the transport reason, except that a zero status
    /// with a known reason (timeout, abort, parse) reports that reason.
    pub fn from_failure(failure: Failure) -> Self {
        match (failure.status, failure.kind) {
            (0, None) => Self::Network,
            (404, _) => Self::NotFound,
            (500, _) => Self::Server,
            (_, Some(FailureKind::ParseError)) => {
                Self::Parse(format!("invalid JSON body ({} bytes)", failure.body.len()))
            }
            (_, Some(FailureKind::Timeout)) => Self::Timeout,
            (_, Some(FailureKind::Abort)) => Self::Aborted,
            (status, None) => Self::Uncaught {
                status,
                body: failure.body,
            },
        }
    }

    /// Convert to the message shown in the alert banner
    pub fn user_message(&self) -> String {
        match self {
            Self::Network => "Not connect.\n Verify Network.".into(),
            Self::NotFound => "Requested page not found. [404]".into(),
            Self::Server => "Internal Server Error [500].".into(),
            Self::Parse(_) => "Requested JSON parse failed.".into(),
            Self::Timeout => "Time out error.".into(),
            Self::Aborted => "Ajax request aborted.".into(),
            Self::Uncaught { body, .. } => format!("Uncaught Error.\n{body}"),
            Self::Markup(msg) | Self::Storage(msg) | Self::Config(msg) => {
                format!("Uncaught Error.\n{msg}")
            }
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
