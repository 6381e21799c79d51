//! Unified error handling for irclogd.
//!
//! Almost every anomaly a session meets is absorbed into the session log.
//! What remains here is what ends a session.

use irclog_proto::{ProtocolError, RegistrationError};
use thiserror::Error;

/// Errors that end a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Registration ran out of candidate nicknames.
    #[error("could not log in: all nicknames rejected")]
    NicknamesExhausted,

    /// The transport delivered something the codec could not frame or
    /// decode.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Connecting to or talking with the server failed.
    #[error("connection error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RegistrationError> for SessionError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::NicknamesExhausted => Self::NicknamesExhausted,
        }
    }
}

impl SessionError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NicknamesExhausted => "nicknames_exhausted",
            Self::Protocol(_) => "protocol_error",
            Self::Io(_) => "io_error",
        }
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
