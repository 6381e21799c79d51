//! Sans-IO registration state machine.
//!
//! The machine does not touch the network. It is started once the
//! transport connects, fed every parsed message until it reports
//! completion, and hands back the messages to send.
//!
//! # Example
//!
//! ```
//! use irclog_proto::state::{RegistrationAction, RegistrationConfig, RegistrationMachine};
//! use irclog_proto::Message;
//!
//! let mut machine = RegistrationMachine::new(RegistrationConfig {
//!     nicknames: vec!["a".to_string(), "b".to_string()],
//!     username: "lurker".to_string(),
//!     realname: "Joey Lurkenstein".to_string(),
//!     password: Some("testing".to_string()),
//! });
//!
//! // PASS, USER, NICK a
//! let actions = machine.start().unwrap();
//! assert_eq!(actions.len(), 3);
//!
//! // `a` is taken: only NICK b goes out.
//! let reject: Message = ":srv 433 * a :Nickname is already in use".parse().unwrap();
//! let actions = machine.feed(&reject).unwrap();
//! assert!(matches!(&actions[1], RegistrationAction::Send(m) if m.to_string() == "NICK b"));
//! ```

mod transitions;
mod tracker;

pub use tracker::RegistrationMachine;

use thiserror::Error;

use crate::Message;

/// Where the handshake stands.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum RegistrationState {
    /// Transport not yet connected.
    #[default]
    Connecting,
    /// PASS/USER/NICK sent; waiting for a numeric verdict on `nickname`.
    AwaitingReply {
        /// The candidate nickname last sent.
        nickname: String,
    },
    /// The server accepted us.
    LoggedIn {
        /// Our current nickname.
        nickname: String,
    },
}

/// Configuration for the registration state machine.
#[derive(Clone, Debug)]
pub struct RegistrationConfig {
    /// Candidate nicknames, tried in order and never reused.
    pub nicknames: Vec<String>,
    /// Username (ident).
    pub username: String,
    /// Real name / GECOS.
    pub realname: String,
    /// Server password, if any.
    pub password: Option<String>,
}

/// Actions produced by the state machine.
#[derive(Clone, Debug)]
pub enum RegistrationAction {
    /// Send this message to the server.
    ///
    /// Boxed to keep the enum small.
    Send(Box<Message>),
    /// The server refused the candidate nickname with the given numeric.
    NicknameRejected {
        /// The refused nickname.
        nickname: String,
        /// The numeric reply code.
        code: u16,
    },
    /// Registration succeeded.
    Complete {
        /// The nickname we are logged in with.
        nickname: String,
    },
}

/// Unrecoverable registration failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Every candidate nickname was rejected.
    #[error("all nicknames rejected")]
    NicknamesExhausted,
}
