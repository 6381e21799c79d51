//! The closed set of commands the logger distinguishes.
//!
//! Everything the logger does not recognise by name is kept as
//! [`Command::Raw`] so dispatch can still report it.

use std::fmt;

/// An IRC command token, normalised to uppercase.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum Command {
    /// `PASS <password>`
    PASS,
    /// `USER <user> <mode> <unused> :<realname>`
    USER,
    /// `NICK <nickname>`
    NICK,
    /// `JOIN <channels>`
    JOIN,
    /// `PART <channels> [:reason]`
    PART,
    /// `QUIT [:reason]`
    QUIT,
    /// `PRIVMSG <targets> :<text>`
    PRIVMSG,
    /// `NOTICE <targets> :<text>`
    NOTICE,
    /// `MODE <target> <modes...>`
    MODE,
    /// `PING <payload>`
    PING,
    /// `PONG <payload>`
    PONG,
    /// `ERROR :<reason>`
    ERROR,
    /// `TOPIC <channel> :<topic>`
    TOPIC,
    /// `KICK <channel> <nick> [:reason]`
    KICK,
    /// `WALLOPS :<text>`
    WALLOPS,
    /// A three-digit numeric reply.
    Response(u16),
    /// Any other command, uppercased.
    Raw(String),
}

impl Command {
    /// Classify a command token. Case-insensitive; exactly three ASCII
    /// digits make a numeric reply.
    pub fn from_token(token: &str) -> Self {
        if token.len() == 3 && token.bytes().all(|b| b.is_ascii_digit()) {
            // Three ASCII digits always fit in a u16.
            if let Ok(code) = token.parse() {
                return Self::Response(code);
            }
        }
        match token.to_ascii_uppercase().as_str() {
            "PASS" => Self::PASS,
            "USER" => Self::USER,
            "NICK" => Self::NICK,
            "JOIN" => Self::JOIN,
            "PART" => Self::PART,
            "QUIT" => Self::QUIT,
            "PRIVMSG" => Self::PRIVMSG,
            "NOTICE" => Self::NOTICE,
            "MODE" => Self::MODE,
            "PING" => Self::PING,
            "PONG" => Self::PONG,
            "ERROR" => Self::ERROR,
            "TOPIC" => Self::TOPIC,
            "KICK" => Self::KICK,
            "WALLOPS" => Self::WALLOPS,
            other => Self::Raw(other.to_owned()),
        }
    }

    /// The numeric code, if this is a numeric reply.
    pub fn numeric(&self) -> Option<u16> {
        match self {
            Self::Response(code) => Some(*code),
            _ => None,
        }
    }

    /// Whether the final parameter of this command is free text and is
    /// always written in trailing (`:`) form.
    pub(crate) fn has_text_param(&self) -> bool {
        matches!(
            self,
            Self::PASS
                | Self::USER
                | Self::PRIVMSG
                | Self::NOTICE
                | Self::QUIT
                | Self::PONG
                | Self::ERROR
                | Self::TOPIC
                | Self::WALLOPS
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PASS => "PASS",
            Self::USER => "USER",
            Self::NICK => "NICK",
            Self::JOIN => "JOIN",
            Self::PART => "PART",
            Self::QUIT => "QUIT",
            Self::PRIVMSG => "PRIVMSG",
            Self::NOTICE => "NOTICE",
            Self::MODE => "MODE",
            Self::PING => "PING",
            Self::PONG => "PONG",
            Self::ERROR => "ERROR",
            Self::TOPIC => "TOPIC",
            Self::KICK => "KICK",
            Self::WALLOPS => "WALLOPS",
            Self::Response(code) => return write!(f, "{:03}", code),
            Self::Raw(name) => name,
        };
        f.write_str(name)
    }
}
