//! # irclog-proto
//!
//! The client side of the IRC protocol as needed by a silent logging
//! participant: line framing, the message grammar, CTCP framing and the
//! registration handshake.
//!
//! Nothing in this crate performs I/O on its own. The [`line`] codec plugs
//! into a `tokio_util` framed transport; everything else consumes parsed
//! messages and produces messages to send.
//!
//! ## Quick Start
//!
//! ```rust
//! use irclog_proto::{Command, Message};
//!
//! let msg: Message = ":nick!user@host PRIVMSG #chan :hello world".parse().unwrap();
//! assert_eq!(msg.prefix.as_deref(), Some("nick!user@host"));
//! assert_eq!(msg.command, Command::PRIVMSG);
//! assert_eq!(msg.params, vec!["#chan", "hello world"]);
//!
//! let reply = Message::privmsg("nick", "Ok.");
//! assert_eq!(reply.to_string(), "PRIVMSG nick :Ok.");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod casemap;
pub mod command;
pub mod ctcp;
pub mod error;
#[cfg(feature = "tokio")]
pub mod line;
pub mod message;
pub mod mode;
pub mod numeric;
pub mod sanitize;
pub mod state;

pub use self::casemap::{irc_eq, irc_to_lower};
pub use self::command::Command;
pub use self::ctcp::{Ctcp, CtcpKind};
pub use self::error::{MessageParseError, ProtocolError};
#[cfg(feature = "tokio")]
pub use self::line::LineCodec;
pub use self::message::{join_params, split_params, Message};
pub use self::mode::split_mode_tokens;
pub use self::numeric::NumericClass;
pub use self::sanitize::sanitize;
pub use self::state::{
    RegistrationAction, RegistrationConfig, RegistrationError, RegistrationMachine,
    RegistrationState,
};
