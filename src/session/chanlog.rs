//! Channel log manager.
//!
//! Owns one open sink per channel the session believes it is in. A sink
//! exists for a channel exactly while the channel is joined (or a join for
//! it is in flight).

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use irclog_proto::irc_to_lower;
use thiserror::Error;
use tracing::warn;

use super::sink::{LogSink, SinkOpener};
use super::timestamp;

/// Written before `JOINING` and after every closing status line.
pub const DIVIDER: &str = "----------------------------------------";

/// A channel log could not be opened.
#[derive(Debug, Error)]
#[error("Could not open {} to log {channel}: {source}", .path.display())]
pub struct OpenFailure {
    pub channel: String,
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// An open log and the channel name it was opened under.
struct ChannelLog {
    name: String,
    sink: Box<dyn LogSink>,
}

/// Open logs keyed by the case-folded channel name, so `#NetHack` and
/// `#nethack` share one log.
pub struct ChannelLogs {
    opener: Box<dyn SinkOpener>,
    open: BTreeMap<String, ChannelLog>,
}

impl ChannelLogs {
    pub fn new(opener: Box<dyn SinkOpener>) -> Self {
        Self {
            opener,
            open: BTreeMap::new(),
        }
    }

    pub fn is_open(&self, channel: &str) -> bool {
        self.open.contains_key(&irc_to_lower(channel))
    }

    /// Open the log for `channel`. Already open under any casing is not an
    /// error; the existing log keeps its name.
    pub fn open(&mut self, channel: &str) -> Result<(), OpenFailure> {
        let key = irc_to_lower(channel);
        if self.open.contains_key(&key) {
            return Ok(());
        }
        let path = self.opener.path_for(channel);
        let sink = self.opener.open(&path).map_err(|source| OpenFailure {
            channel: channel.to_string(),
            path,
            source,
        })?;
        self.open.insert(
            key,
            ChannelLog {
                name: channel.to_string(),
                sink,
            },
        );
        Ok(())
    }

    /// Append a timestamped line to `channel`'s log. Lines for channels
    /// without an open log are dropped.
    pub fn write(&mut self, channel: &str, text: impl AsRef<str>) {
        let Some(log) = self.open.get_mut(&irc_to_lower(channel)) else {
            return;
        };
        let line = format!("{}\t{}", timestamp(), text.as_ref());
        if let Err(e) = log.sink.write_line(&line) {
            warn!(channel = %log.name, error = %e, "Failed to write channel log");
        }
    }

    /// Write `status` and a divider, then release the sink. Returns whether
    /// a log was open.
    pub fn close(&mut self, channel: &str, status: impl AsRef<str>) -> bool {
        if !self.is_open(channel) {
            return false;
        }
        self.write(channel, status);
        self.write(channel, DIVIDER);
        self.open.remove(&irc_to_lower(channel));
        true
    }

    /// Open channels, by the name each log was opened under, in folded
    /// order.
    pub fn channels(&self) -> impl Iterator<Item = &str> {
        self.open.values().map(|log| log.name.as_str())
    }
}
