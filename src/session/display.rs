//! Sender display in channel logs.

use irclog_proto::Command;

/// Per-command choice between `nick` and `nick (user@host)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LongMode(pub u32);

impl LongMode {
    const JOIN: u32 = 1;
    const PART: u32 = 1 << 1;
    const QUIT: u32 = 1 << 2;
    const NICK: u32 = 1 << 3;
    const PRIVMSG: u32 = 1 << 4;
    const TOPIC: u32 = 1 << 5;
    const KICK: u32 = 1 << 6;
    const MODE: u32 = 1 << 7;

    fn mask(command: &Command) -> Option<u32> {
        match command {
            Command::JOIN => Some(Self::JOIN),
            Command::PART => Some(Self::PART),
            Command::QUIT => Some(Self::QUIT),
            Command::NICK => Some(Self::NICK),
            Command::PRIVMSG => Some(Self::PRIVMSG),
            Command::TOPIC => Some(Self::TOPIC),
            Command::KICK => Some(Self::KICK),
            Command::MODE => Some(Self::MODE),
            _ => None,
        }
    }

    /// How to show `prefix` in a log line about `command`. Commands with no
    /// bit of their own show the prefix as received.
    pub fn display(self, command: &Command, prefix: Option<&str>) -> String {
        let prefix = prefix.unwrap_or_default();
        let Some((nick, userhost)) = prefix.split_once('!') else {
            return prefix.to_string();
        };
        match Self::mask(command) {
            Some(mask) if self.0 & mask != 0 => format!("{nick} ({userhost})"),
            Some(_) => nick.to_string(),
            None => prefix.to_string(),
        }
    }
}
