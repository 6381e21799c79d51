//! Password-gated remote control.
//!
//! A private message whose first token is the control password is a
//! command. The password alone means QUIT. Control messages are never
//! logged as chat; their effects are.

use irclog_proto::{Message, join_params, sanitize, split_mode_tokens};
use tracing::{info, warn};

use super::{Session, format_time};

const DEFAULT_QUIT_REASON: &str = "My work here is done.";

/// A parsed control command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum ControlCommand {
    Quit(Option<String>),
    Join(Vec<String>),
    Part(Vec<String>),
    /// New password; empty turns control off.
    Pass(String),
    Stats,
    Mode(Vec<String>),
    /// `None` when the argument is not a plain non-negative integer.
    Long(Option<u32>),
    Unknown(Vec<String>),
}

impl ControlCommand {
    /// Parse the tokens following the password.
    pub(super) fn parse(mut tokens: Vec<String>) -> Self {
        let Some(first) = tokens.first_mut() else {
            return Self::Quit(None);
        };
        *first = first.to_ascii_uppercase();
        let args = &tokens[1..];
        match tokens[0].as_str() {
            "QUIT" => Self::Quit(args.first().cloned()),
            "JOIN" => Self::Join(channel_list(args)),
            "PART" => Self::Part(channel_list(args)),
            "PASS" if args.len() == 1 => Self::Pass(sanitize(&args[0], false)),
            "STATS" => Self::Stats,
            "MODE" => Self::Mode(split_mode_tokens(args)),
            "LONG" => Self::Long(long_mask(args)),
            _ => Self::Unknown(tokens),
        }
    }
}

/// Channel names separated by whitespace or commas.
fn channel_list(args: &[String]) -> Vec<String> {
    args.iter()
        .flat_map(|arg| arg.split(|c: char| c.is_whitespace() || c == ','))
        .map(|name| sanitize(name, false))
        .filter(|name| !name.is_empty())
        .collect()
}

fn long_mask(args: &[String]) -> Option<u32> {
    match args {
        [arg] if !arg.is_empty() && arg.bytes().all(|b| b.is_ascii_digit()) => arg.parse().ok(),
        _ => None,
    }
}

impl Session {
    /// Carry out an authenticated command from `sender`, replying to `nick`.
    pub(super) fn run_control(
        &mut self,
        command: ControlCommand,
        nick: &str,
        sender: &str,
        out: &mut Vec<Message>,
    ) {
        info!(sender = %sender, command = ?command, "Control command");
        match command {
            ControlCommand::Quit(reason) => {
                self.meta
                    .log(format!("# Quitting, as commanded by {sender}"));
                let channels: Vec<String> = self.logs.channels().map(str::to_string).collect();
                for channel in channels {
                    self.logs
                        .write(&channel, format!("QUITTING (as commanded by {sender})"));
                }
                out.push(Message::privmsg(nick, "Thy will be done."));
                out.push(Message::quit(
                    reason.unwrap_or_else(|| DEFAULT_QUIT_REASON.to_string()),
                ));
            }
            ControlCommand::Join(channels) => {
                self.meta.log(format!(
                    "# Joining: {} (as commanded by {sender})",
                    channels.join(" ")
                ));
                for channel in &channels {
                    self.join_channel(channel, out);
                }
                out.push(Message::privmsg(nick, "Ok."));
            }
            ControlCommand::Part(channels) => {
                let joined: Vec<String> = channels
                    .into_iter()
                    .filter(|c| self.logs.is_open(c))
                    .collect();
                self.meta.log(format!(
                    "# Parting: {} (as commanded by {sender})",
                    joined.join(" ")
                ));
                for channel in joined {
                    self.logs
                        .write(&channel, format!("PARTING {channel} (as commanded by {sender})"));
                    out.push(Message::part(channel));
                }
                out.push(Message::privmsg(nick, "Ok."));
            }
            ControlCommand::Pass(password) => {
                let verb = if password.is_empty() { "deactivated" } else { "changed" };
                self.control_password = Some(password).filter(|p| !p.is_empty());
                self.meta
                    .log(format!("# Control password {verb} by {sender}"));
                out.push(Message::privmsg(nick, "Ok."));
            }
            ControlCommand::Stats => {
                let text = format!(
                    "Running since {}, last message {}, currently logging: {}",
                    self.started_at.map_or_else(|| "never".to_string(), format_time),
                    self.previous_line_at
                        .map_or_else(|| "never".to_string(), format_time),
                    self.logging().join(" ")
                );
                out.push(Message::privmsg(nick, text));
            }
            ControlCommand::Mode(tokens) => {
                if self.set_user_mode(&tokens, Some(sender), out) {
                    out.push(Message::privmsg(nick, "Ok."));
                }
            }
            ControlCommand::Long(Some(mask)) => {
                self.long_mode.0 = mask;
                self.meta.log(format!("# longmode set to {mask} by {sender}"));
                out.push(Message::privmsg(nick, "Ok."));
            }
            ControlCommand::Long(None) => {
                warn!(sender = %sender, "Malformed LONG command");
                self.meta
                    .log(format!("# Ignoring malformed LONG command from {sender}"));
            }
            ControlCommand::Unknown(tokens) => {
                self.meta.log(format!(
                    "# Unknown authenticated command from {sender}: {}",
                    join_params(&tokens)
                ));
                out.push(Message::privmsg(nick, "...What?"));
            }
        }
    }
}
