//! CTCP (Client-to-Client Protocol) framing.
//!
//! CTCP queries and replies travel inside PRIVMSG and NOTICE bodies,
//! wrapped in the `\x01` delimiter.
//!
//! # Example
//!
//! ```
//! use irclog_proto::ctcp::{Ctcp, CtcpKind};
//!
//! let ctcp = Ctcp::parse("\x01ACTION waves hello\x01").unwrap();
//! assert_eq!(ctcp.kind, CtcpKind::Action);
//! assert_eq!(ctcp.params, Some("waves hello"));
//! assert!(ctcp.terminated);
//!
//! let reply = Ctcp::reply(CtcpKind::Userinfo, ":Shh!");
//! assert_eq!(reply, "\x01USERINFO :Shh!\x01");
//! ```

use std::fmt;

/// The CTCP delimiter character (`\x01`).
pub const CTCP_DELIM: char = '\x01';

/// Known CTCP command types.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CtcpKind {
    /// ACTION - `/me` text.
    Action,
    /// VERSION - client version.
    Version,
    /// PING - latency probe, echoed back.
    Ping,
    /// TIME - local time.
    Time,
    /// USERINFO - user-defined information.
    Userinfo,
    /// CLIENTINFO - supported CTCP commands.
    Clientinfo,
    /// FINGER - user information (legacy).
    Finger,
    /// ERRMSG - error query/reply.
    Errmsg,
    /// Unknown or custom CTCP command.
    Unknown(String),
}

impl CtcpKind {
    /// Parse a CTCP command name. Only the uppercase forms are recognized.
    pub fn parse(name: &str) -> Self {
        match name {
            "ACTION" => Self::Action,
            "VERSION" => Self::Version,
            "PING" => Self::Ping,
            "TIME" => Self::Time,
            "USERINFO" => Self::Userinfo,
            "CLIENTINFO" => Self::Clientinfo,
            "FINGER" => Self::Finger,
            "ERRMSG" => Self::Errmsg,
            _ => Self::Unknown(name.to_owned()),
        }
    }

    /// Returns the canonical uppercase name of this CTCP command.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Action => "ACTION",
            Self::Version => "VERSION",
            Self::Ping => "PING",
            Self::Time => "TIME",
            Self::Userinfo => "USERINFO",
            Self::Clientinfo => "CLIENTINFO",
            Self::Finger => "FINGER",
            Self::Errmsg => "ERRMSG",
            Self::Unknown(s) => s,
        }
    }
}

impl fmt::Display for CtcpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed CTCP message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ctcp<'a> {
    /// The CTCP command type.
    pub kind: CtcpKind,
    /// Text after the command name, if any.
    pub params: Option<&'a str>,
    /// Whether the closing delimiter was present.
    pub terminated: bool,
    /// Everything between the delimiters.
    pub payload: &'a str,
}

impl<'a> Ctcp<'a> {
    /// Parse a CTCP message from a PRIVMSG/NOTICE body.
    ///
    /// Returns `None` if the body does not start with the delimiter or
    /// carries nothing after it. A missing closing delimiter is tolerated
    /// and reported through [`Ctcp::terminated`].
    pub fn parse(text: &'a str) -> Option<Self> {
        let text = text.strip_prefix(CTCP_DELIM)?;
        let (payload, terminated) = match text.strip_suffix(CTCP_DELIM) {
            Some(inner) => (inner, true),
            None => (text, false),
        };

        if payload.is_empty() {
            return None;
        }

        let (command, params) = match payload.split_once(' ') {
            Some((command, params)) => (command, Some(params).filter(|p| !p.is_empty())),
            None => (payload, None),
        };

        Some(Self {
            kind: CtcpKind::parse(command),
            params,
            terminated,
            payload,
        })
    }

    /// Frame a reply: `\x01KIND text\x01`.
    pub fn reply(kind: CtcpKind, text: &str) -> String {
        format!("{CTCP_DELIM}{kind} {text}{CTCP_DELIM}")
    }
}
