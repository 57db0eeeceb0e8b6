//! Error types surfaced by the transport pipeline.

use serde_json::Value;
use thiserror::Error;

/// Coarse failure classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// No response was received.
    Network,
    /// 2xx response whose envelope carried a non-zero code.
    Domain,
    /// HTTP 401; the session has been invalidated.
    Unauthorized,
    /// Any other non-2xx status.
    Status,
    /// Payload did not match the caller's expected type.
    Decode,
    /// Input rejected before any request was sent.
    Validation,
}

/// Failure returned by every pipeline call. Each variant carries a display-ready message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("{message}")]
    Network {
        /// Display message.
        message: String,
        /// Backend detail for logs.
        detail: String,
    },
    /// The server answered 2xx with a non-zero envelope code.
    #[error("{message}")]
    Domain {
        /// HTTP status of the response.
        status: u16,
        /// Envelope code.
        code: i64,
        /// Original body.
        body: Value,
        /// Display message.
        message: String,
    },
    /// The server answered 401.
    #[error("{message}")]
    Unauthorized {
        /// Original body.
        body: Value,
        /// Display message.
        message: String,
    },
    /// The server answered with another non-2xx status.
    #[error("{message}")]
    Status {
        /// HTTP status of the response.
        status: u16,
        /// Original body.
        body: Value,
        /// Display message.
        message: String,
    },
    /// The payload could not be decoded into the requested type.
    #[error("{message}")]
    Decode {
        /// Display message.
        message: String,
        /// Decoder detail for logs.
        detail: String,
    },
    /// The request was rejected client-side.
    #[error("{message}")]
    Validation {
        /// Display message.
        message: String,
    },
}

impl ApiError {
    /// Failure class of this error.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Network { .. } => FailureKind::Network,
            Self::Domain { .. } => FailureKind::Domain,
            Self::Unauthorized { .. } => FailureKind::Unauthorized,
            Self::Status { .. } => FailureKind::Status,
            Self::Decode { .. } => FailureKind::Decode,
            Self::Validation { .. } => FailureKind::Validation,
        }
    }

    /// Message ready to show to the user.
    #[must_use]
    pub fn display_message(&self) -> &str {
        match self {
            Self::Network { message, .. }
            | Self::Domain { message, .. }
            | Self::Unauthorized { message, .. }
            | Self::Status { message, .. }
            | Self::Decode { message, .. }
            | Self::Validation { message } => message,
        }
    }

    /// HTTP status when a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Domain { status, .. } | Self::Status { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(401),
            Self::Network { .. } | Self::Decode { .. } | Self::Validation { .. } => None,
        }
    }

    /// Response body when one was received.
    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        match self {
            Self::Domain { body, .. } | Self::Unauthorized { body, .. } | Self::Status { body, .. } => {
                Some(body)
            }
            Self::Network { .. } | Self::Decode { .. } | Self::Validation { .. } => None,
        }
    }

    /// Whether the failure invalidated the session.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Result alias for pipeline calls.
pub type ApiResult<T> = Result<T, ApiError>;
