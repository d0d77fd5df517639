//! Error types for the user workflow.
//!
//! # Design
//! `RemoteCallFailed` carries the status the remote service answered with.
//! The other two variants never saw a usable status and report the
//! internal-error status instead, so every error can be turned into a
//! message/status pair for the caller.

use thiserror::Error;

/// Status reported when no remote status is available.
pub const INTERNAL_ERROR_STATUS: u16 = 500;

/// Errors returned by the client wrapper and the workflow steps.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// The remote service answered with a status outside the accepted range.
    #[error("{message}")]
    RemoteCallFailed { message: String, status: u16 },

    /// The transport produced no response at all.
    #[error("{message}")]
    ResponseMissing { message: String },

    /// A payload could not be encoded or decoded.
    #[error("{message}")]
    ParsePayloadFailed { message: String },
}

impl OperationError {
    pub fn remote(message: impl Into<String>, status: u16) -> Self {
        OperationError::RemoteCallFailed {
            message: message.into(),
            status,
        }
    }

    pub fn missing(message: impl Into<String>) -> Self {
        OperationError::ResponseMissing {
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        OperationError::ParsePayloadFailed {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            OperationError::RemoteCallFailed { message, .. }
            | OperationError::ResponseMissing { message }
            | OperationError::ParsePayloadFailed { message } => message,
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            OperationError::RemoteCallFailed { status, .. } => *status,
            OperationError::ResponseMissing { .. } | OperationError::ParsePayloadFailed { .. } => {
                INTERNAL_ERROR_STATUS
            }
        }
    }

    /// Replace the message while keeping the variant and status.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        let message = message.into();
        match self {
            OperationError::RemoteCallFailed { status, .. } => {
                OperationError::RemoteCallFailed { message, status }
            }
            OperationError::ResponseMissing { .. } => OperationError::ResponseMissing { message },
            OperationError::ParsePayloadFailed { .. } => {
                OperationError::ParsePayloadFailed { message }
            }
        }
    }
}
