//! Error types for the protocol crate.
//!
//! Transport-level failures (I/O, undecodable bytes, overlong lines) are
//! [`ProtocolError`]s and are fatal to the connection. A line that decodes
//! but does not fit the message grammar is a [`MessageParseError`]; callers
//! are expected to log it and carry on.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Top-level protocol errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The configured encoding label is not known.
    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),

    /// Bytes on the wire could not be decoded in the session encoding.
    #[error("undecodable {encoding} line ({} bytes)", raw_line.len())]
    Undecodable {
        /// The raw line as received, terminator included.
        raw_line: Vec<u8>,
        /// Name of the encoding that rejected it.
        encoding: &'static str,
    },

    /// Message exceeded maximum allowed length.
    #[error("message too long: {actual} bytes (limit: {limit})")]
    MessageTooLong {
        /// Actual message length.
        actual: usize,
        /// Maximum allowed length.
        limit: usize,
    },

    /// Failed to parse an IRC message.
    #[error("invalid message: {string}")]
    InvalidMessage {
        /// The invalid message string.
        string: String,
        /// The underlying parse error.
        #[source]
        cause: MessageParseError,
    },
}

/// Reasons a decoded line does not fit the message grammar.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MessageParseError {
    /// Line was empty or only spaces.
    #[error("empty message")]
    EmptyMessage,

    /// A `:` sender marker was not followed by a sender and a command.
    #[error("sender prefix without command")]
    DanglingPrefix,

    /// The command token itself began with `:`.
    #[error("invalid command token")]
    InvalidCommand,
}
