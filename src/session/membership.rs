//! Who is where.
//!
//! Tracks, for each nickname seen in a logged channel, the channels they
//! share with us. Used to fan QUIT and NICK lines out to the right logs.
//! A nickname whose last channel goes away is dropped entirely. Channel
//! names compare case-insensitively.

use std::collections::HashMap;

use irclog_proto::{irc_eq, irc_to_lower};

#[derive(Debug, Default)]
pub struct MembershipIndex {
    channels_by_nick: HashMap<String, Vec<String>>,
}

impl MembershipIndex {
    /// Record `nick` in `channel`. Repeat inserts are no-ops.
    pub fn insert(&mut self, nick: &str, channel: &str) {
        let channels = self.channels_by_nick.entry(nick.to_string()).or_default();
        if !channels.iter().any(|c| irc_eq(c, channel)) {
            channels.push(channel.to_string());
        }
    }

    /// Forget `nick` in `channel`.
    pub fn remove(&mut self, nick: &str, channel: &str) {
        if let Some(channels) = self.channels_by_nick.get_mut(nick) {
            channels.retain(|c| !irc_eq(c, channel));
            if channels.is_empty() {
                self.channels_by_nick.remove(nick);
            }
        }
    }

    /// Forget `nick` everywhere.
    pub fn remove_nick(&mut self, nick: &str) {
        self.channels_by_nick.remove(nick);
    }

    /// Move everything known about `old` to `new`, merging with whatever
    /// `new` already had.
    pub fn rename(&mut self, old: &str, new: &str) {
        if old == new {
            return;
        }
        let Some(channels) = self.channels_by_nick.remove(old) else {
            return;
        };
        for channel in channels {
            self.insert(new, &channel);
        }
    }

    /// Forget `channel` for everyone, e.g. after we leave it.
    pub fn purge_channel(&mut self, channel: &str) {
        self.channels_by_nick.retain(|_, channels| {
            channels.retain(|c| !irc_eq(c, channel));
            !channels.is_empty()
        });
    }

    /// Channels we share with `nick`.
    pub fn whereis(&self, nick: &str) -> &[String] {
        self.channels_by_nick
            .get(nick)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of nicknames tracked.
    pub fn len(&self) -> usize {
        self.channels_by_nick.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels_by_nick.is_empty()
    }

    pub fn clear(&mut self) {
        self.channels_by_nick.clear();
    }
}

/// NAMES chunks accumulated per channel until the end-of-names reply.
#[derive(Debug, Default)]
pub struct PendingNames {
    by_channel: HashMap<String, Vec<String>>,
}

impl PendingNames {
    /// Append the space-separated names of one NAMES chunk.
    pub fn extend(&mut self, channel: &str, names: &str) {
        self.by_channel
            .entry(irc_to_lower(channel))
            .or_default()
            .extend(names.split_whitespace().map(str::to_string));
    }

    /// Take everything accumulated for `channel`.
    pub fn take(&mut self, channel: &str) -> Vec<String> {
        self.by_channel
            .remove(&irc_to_lower(channel))
            .unwrap_or_default()
    }

    pub fn discard(&mut self, channel: &str) {
        self.by_channel.remove(&irc_to_lower(channel));
    }

    pub fn clear(&mut self) {
        self.by_channel.clear();
    }
}
