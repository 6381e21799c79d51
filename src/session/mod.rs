//! The logging session.
//!
//! A [`Session`] is everything the bot knows about one server connection:
//! registration progress, open channel logs, who shares which channel with
//! us, and the control password. It performs no network I/O. The network
//! layer feeds it received lines and sends whatever messages it returns.

mod chanlog;
mod control;
mod ctcp;
mod dispatch;
mod display;
mod membership;
pub mod sink;
#[cfg(test)]
mod testing;

use chrono::{DateTime, Utc};
use irclog_proto::{
    Command, Message, RegistrationAction, RegistrationConfig, RegistrationMachine, split_mode_tokens,
};
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::SessionResult;

use self::chanlog::{ChannelLogs, DIVIDER};
use self::display::LongMode;
use self::membership::{MembershipIndex, PendingNames};
use self::sink::{LogSink, SessionLog, SinkOpener};

/// Timestamp format used on every log line.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

fn format_time(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// The current UTC time, formatted for logs.
pub(crate) fn timestamp() -> String {
    format_time(Utc::now())
}

/// Everything a session needs from configuration.
#[derive(Clone, Debug)]
pub struct SessionParams {
    /// `host:port`, for the startup banner.
    pub server: String,
    pub nicknames: Vec<String>,
    pub username: String,
    pub realname: String,
    pub server_password: Option<String>,
    pub modestring: Option<String>,
    pub channels: Vec<String>,
    pub control_password: Option<String>,
    pub long_mode: u32,
    pub directory: PathBuf,
}

impl SessionParams {
    pub fn from_config(config: &Config, host: &str, port: u16) -> Self {
        Self {
            server: format!("{host}:{port}"),
            nicknames: config.identity.nicknames.clone(),
            username: config.identity.username.clone(),
            realname: config.identity.realname.clone(),
            server_password: config.server.password.clone(),
            modestring: config.identity.modestring.clone(),
            channels: config.channels.clone(),
            control_password: config.control.password.clone(),
            long_mode: config.logging.long_mode,
            directory: config.logging.directory.clone(),
        }
    }
}

pub struct Session {
    registration: RegistrationMachine,
    realname: String,
    modestring: Option<String>,
    channels: Vec<String>,
    control_password: Option<String>,
    long_mode: LongMode,
    meta: SessionLog,
    logs: ChannelLogs,
    members: MembershipIndex,
    pending_names: PendingNames,
    started_at: Option<DateTime<Utc>>,
    previous_line_at: Option<DateTime<Utc>>,
    current_line_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Create a session and write the startup banner to the session log.
    pub fn new(params: SessionParams, meta: Box<dyn LogSink>, opener: Box<dyn SinkOpener>) -> Self {
        let mut meta = SessionLog::new(meta);
        meta.log(DIVIDER);
        meta.log("# Starting up.");
        meta.log(format!("# Version: {}", env!("CARGO_PKG_VERSION")));
        meta.log(format!("# Server: {}", params.server));
        meta.log(format!(
            "# Server password: {}",
            params.server_password.as_deref().unwrap_or_default()
        ));
        meta.log(format!("# Nicknames: {}", params.nicknames.join(" ")));
        meta.log(format!("# Username: {}", params.username));
        meta.log(format!("# Realname: {}", params.realname));
        meta.log(format!("# Channels: {}", params.channels.join(" ")));
        meta.log(format!("# longmode: {}", params.long_mode));
        meta.log(format!(
            "# Control password: {}",
            if params.control_password.is_some() { "yes" } else { "no" }
        ));
        meta.log(format!("# Log name prefix: {}", params.directory.display()));

        let registration = RegistrationMachine::new(RegistrationConfig {
            nicknames: params.nicknames,
            username: params.username,
            realname: params.realname.clone(),
            password: params.server_password,
        });

        Self {
            registration,
            realname: params.realname,
            modestring: params.modestring,
            channels: params.channels,
            control_password: params.control_password,
            long_mode: LongMode(params.long_mode),
            meta,
            logs: ChannelLogs::new(opener),
            members: MembershipIndex::default(),
            pending_names: PendingNames::default(),
            started_at: None,
            previous_line_at: None,
            current_line_at: None,
        }
    }

    /// The transport is up: begin registration.
    pub fn on_connect(&mut self) -> SessionResult<Vec<Message>> {
        self.meta.log("# Connected to server");
        let actions = self.registration.start().inspect_err(|_| self.log_exhausted())?;
        let mut out = Vec::new();
        self.apply(actions, "", &mut out);
        Ok(out)
    }

    /// The transport is gone: close every log.
    pub fn on_disconnect(&mut self) {
        self.close_all("DISCONNECTED");
        self.meta.log("# Connection closed");
    }

    /// Handle one received line (without its CRLF) and return the messages
    /// to send in response.
    ///
    /// Only a registration dead end is an error; everything else the server
    /// says is logged somewhere.
    pub fn handle_line(&mut self, line: &str) -> SessionResult<Vec<Message>> {
        self.previous_line_at = self.current_line_at.replace(Utc::now());
        let mut out = Vec::new();

        let msg = match line.parse::<Message>() {
            Ok(msg) => msg,
            Err(e) => {
                debug!(error = %e, "Unparseable line");
                self.unknown(line);
                return Ok(out);
            }
        };

        if msg.command == Command::PING {
            out.push(Message::pong(msg.params));
            return Ok(out);
        }

        let _span = crate::telemetry::spans::line(&msg.command.to_string()).entered();
        if self.registration.is_logged_in() {
            self.dispatch(&msg, line, &mut out);
        } else {
            self.register(&msg, line, &mut out)?;
        }
        Ok(out)
    }

    /// Our nickname, once logged in.
    pub fn nickname(&self) -> Option<&str> {
        self.registration.nickname()
    }

    /// Channels with an open log, sorted.
    pub fn logging(&self) -> Vec<&str> {
        self.logs.channels().collect()
    }

    fn register(&mut self, msg: &Message, line: &str, out: &mut Vec<Message>) -> SessionResult<()> {
        if msg.command == Command::NOTICE {
            self.meta.log(line);
            return Ok(());
        }
        let actions = self
            .registration
            .feed(msg)
            .inspect_err(|_| self.log_exhausted())?;
        if actions.is_empty() {
            self.unknown(line);
        }
        self.apply(actions, line, out);
        Ok(())
    }

    fn apply(&mut self, actions: Vec<RegistrationAction>, line: &str, out: &mut Vec<Message>) {
        for action in actions {
            match action {
                RegistrationAction::Send(msg) => out.push(*msg),
                RegistrationAction::NicknameRejected { nickname, code } => {
                    warn!(nickname = %nickname, code, "Nickname rejected");
                    self.meta.log(line);
                }
                RegistrationAction::Complete { nickname } => {
                    self.complete_login(&nickname, line, out);
                }
            }
        }
    }

    fn log_exhausted(&mut self) {
        error!("Every candidate nickname was rejected");
        self.meta.log("# Could not log in: all nicknames rejected");
    }

    fn complete_login(&mut self, nickname: &str, line: &str, out: &mut Vec<Message>) {
        info!(nickname = %nickname, "Logged in");
        self.meta.log(format!("# Logged in with nickname {nickname}"));
        self.meta.log(line);
        self.started_at = self.current_line_at;

        if let Some(modestring) = self.modestring.clone() {
            self.set_user_mode(&[modestring], None, out);
        }
        for channel in self.channels.clone() {
            self.join_channel(&channel, out);
        }
    }

    /// Send MODE for our own nickname. Returns false when nothing was left
    /// after normalizing.
    fn set_user_mode<S: AsRef<str>>(
        &mut self,
        inputs: &[S],
        commanded_by: Option<&str>,
        out: &mut Vec<Message>,
    ) -> bool {
        let tokens = split_mode_tokens(inputs);
        if tokens.is_empty() {
            return false;
        }
        let text = format!("# Setting user MODE to: {}", tokens.join(" "));
        match commanded_by {
            Some(sender) => self.meta.log(format!("{text} (as commanded by {sender})")),
            None => self.meta.log(text),
        }
        out.push(Message::mode(self.own_nick(), tokens));
        true
    }

    /// Open a log for `channel` and ask to join it. Channels already open
    /// are left alone; a log that cannot be opened means no JOIN.
    fn join_channel(&mut self, channel: &str, out: &mut Vec<Message>) {
        if self.logs.is_open(channel) {
            return;
        }
        if let Err(e) = self.logs.open(channel) {
            warn!(channel = %channel, error = %e, "Could not open channel log");
            self.meta.log(format!("# {e}"));
            return;
        }
        self.logs.write(channel, DIVIDER);
        self.logs.write(channel, format!("JOINING {channel}"));
        out.push(Message::join(channel));
    }

    /// Open a log for a channel the server put us in without asking.
    /// Returns false (and leaves the channel) when the log cannot be opened.
    fn adopt_channel(&mut self, channel: &str, out: &mut Vec<Message>) -> bool {
        if let Err(e) = self.logs.open(channel) {
            warn!(channel = %channel, error = %e, "Could not open channel log");
            self.meta.log(format!("# {e}"));
            out.push(Message::part(channel));
            return false;
        }
        info!(channel = %channel, "Joined without asking");
        self.logs.write(channel, DIVIDER);
        true
    }

    /// Close `channel`'s log with `status` and forget who was in it.
    fn close_channel(&mut self, channel: &str, status: &str) {
        if self.logs.close(channel, status) {
            debug!(channel = %channel, status = %status, "Closed channel log");
        }
        self.members.purge_channel(channel);
        self.pending_names.discard(channel);
    }

    fn close_all(&mut self, status: &str) {
        let channels: Vec<String> = self.logs.channels().map(str::to_string).collect();
        for channel in channels {
            self.logs.close(&channel, status);
        }
        if !self.members.is_empty() {
            debug!(nicknames = self.members.len(), "Forgetting channel membership");
        }
        self.members.clear();
        self.pending_names.clear();
    }

    fn own_nick(&self) -> String {
        self.registration.nickname().unwrap_or_default().to_string()
    }

    fn unknown(&mut self, line: &str) {
        self.meta.log(format!("UNKNOWN\t{line}"));
    }
}
