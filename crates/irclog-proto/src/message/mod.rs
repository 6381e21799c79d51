//! IRC message types, parsing and serialization.

mod parse;
mod serialize;

pub use self::parse::split_params;
pub use self::serialize::join_params;

use crate::command::Command;

/// An owned IRC message.
///
/// # Example
///
/// ```
/// use irclog_proto::Message;
///
/// let msg: Message = ":nick!user@host PRIVMSG #channel :Hello!".parse().unwrap();
/// assert_eq!(msg.source_nickname(), Some("nick"));
///
/// let msg = Message::join("#channel");
/// assert_eq!(msg.to_string(), "JOIN #channel");
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Message {
    /// Message prefix/source, without the leading `:` (e.g. `nick!user@host`).
    pub prefix: Option<String>,
    /// The command or numeric reply.
    pub command: Command,
    /// Parameters in order; a trailing parameter is stored without its `:`.
    pub params: Vec<String>,
}

impl Message {
    /// Create a message with no prefix.
    pub fn new<I, S>(command: Command, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefix: None,
            command,
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Get a parameter by index.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    /// The nickname part of the prefix (`nick` in `nick!user@host`), or the
    /// whole prefix when it carries no `!`.
    pub fn source_nickname(&self) -> Option<&str> {
        self.prefix
            .as_deref()
            .map(|p| p.split_once('!').map_or(p, |(nick, _)| nick))
    }

    /// `PASS :<password>`
    pub fn pass(password: impl Into<String>) -> Self {
        Self::new(Command::PASS, [password.into()])
    }

    /// `USER <username> * * :<realname>`
    pub fn user(username: impl Into<String>, realname: impl Into<String>) -> Self {
        Self::new(
            Command::USER,
            [username.into(), "*".into(), "*".into(), realname.into()],
        )
    }

    /// `NICK <nickname>`
    pub fn nick(nickname: impl Into<String>) -> Self {
        Self::new(Command::NICK, [nickname.into()])
    }

    /// `JOIN <channel>`
    pub fn join(channel: impl Into<String>) -> Self {
        Self::new(Command::JOIN, [channel.into()])
    }

    /// `PART <channel>`
    pub fn part(channel: impl Into<String>) -> Self {
        Self::new(Command::PART, [channel.into()])
    }

    /// `QUIT :<reason>`
    pub fn quit(reason: impl Into<String>) -> Self {
        Self::new(Command::QUIT, [reason.into()])
    }

    /// `PRIVMSG <target> :<text>`
    pub fn privmsg(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(Command::PRIVMSG, [target.into(), text.into()])
    }

    /// `NOTICE <target> :<text>`
    pub fn notice(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(Command::NOTICE, [target.into(), text.into()])
    }

    /// `MODE <target> <tokens...>`
    pub fn mode<I, S>(target: impl Into<String>, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut params = vec![target.into()];
        params.extend(tokens.into_iter().map(Into::into));
        Self::new(Command::MODE, params)
    }

    /// `PONG` echoing the parameters of a `PING`.
    pub fn pong(payload: Vec<String>) -> Self {
        Self::new(Command::PONG, payload)
    }
}
