use thiserror::Error;

use crate::storage::StorageError;

/// Failure surfaced by the gateway and the session store.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request did not succeed: a non-2xx status or a transport failure.
    ///
    /// Displays as the bare message so it can be shown to users unchanged.
    #[error("{message}")]
    RequestFailed {
        /// HTTP status, absent when no response was received.
        status: Option<u16>,
        /// Backend-supplied or synthesized message.
        message: String,
    },

    /// A successful response did not have the expected shape.
    #[error("malformed response from {path}: {reason}")]
    MalformedResponse {
        /// Request path the response belongs to.
        path: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Session storage could not be read or written.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Storage held a partial or unreadable session; both keys were cleared.
    #[error("stored session was corrupt and has been cleared: {0}")]
    CorruptSession(String),

    /// Another login or registration is still in flight.
    #[error("another authentication request is already in progress")]
    Busy,
}

impl ApiError {
    pub(crate) fn request_failed(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::RequestFailed {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn malformed(path: &str, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    /// HTTP status of a rejected request, if one was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => *status,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_displays_message_only() {
        let err = ApiError::request_failed(Some(401), "Invalid credentials");
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_malformed_response_display() {
        let err = ApiError::malformed("/owners", "expected JSON");
        assert_eq!(err.to_string(), "malformed response from /owners: expected JSON");
        assert_eq!(err.status(), None);
    }
}
