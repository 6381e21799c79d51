//! Post-login message dispatch.
//!
//! Every received line lands in exactly one place: a channel log, the
//! session log, or the session log as `UNKNOWN`. Lines whose parameter
//! count does not fit their command fall through to `UNKNOWN`.

use irclog_proto::{Command, Ctcp, CtcpKind, Message, NumericClass, split_params};
use tracing::{info, warn};

use super::Session;
use super::control::ControlCommand;
use super::ctcp;

fn split_channels(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').filter(|c| !c.is_empty())
}

fn is_channel_name(target: &str) -> bool {
    target.starts_with(['#', '&', '+', '!'])
}

impl Session {
    pub(super) fn dispatch(&mut self, msg: &Message, line: &str, out: &mut Vec<Message>) {
        let nick = msg.source_nickname().unwrap_or_default();
        let sender = msg.prefix.as_deref().unwrap_or_default();
        let disp = self.long_mode.display(&msg.command, msg.prefix.as_deref());
        let is_self = !nick.is_empty() && self.nickname() == Some(nick);
        let params = &msg.params;

        match (&msg.command, params.len()) {
            (Command::Response(code), _) => self.on_numeric(*code, msg, line),
            (Command::NOTICE | Command::ERROR, _) => self.meta.log(line),
            (Command::JOIN, 1) => self.on_join(nick, &disp, &params[0], is_self, out),
            (Command::PART, n) if n >= 1 => {
                self.on_part(nick, &disp, &params[0], msg.arg(1), is_self)
            }
            (Command::QUIT, _) => self.on_quit(nick, &disp, msg.arg(0), is_self),
            (Command::NICK, 1) => self.on_nick(nick, &disp, &params[0], is_self),
            (Command::PRIVMSG, 2) => {
                self.on_privmsg(nick, sender, &disp, &params[0], &params[1], line, out)
            }
            (Command::TOPIC, 2) => self.logs.write(
                &params[0],
                format!("# {disp} sets the channel topic to: {}", params[1]),
            ),
            (Command::KICK, n) if n >= 2 => {
                self.on_kick(&disp, &params[0], &params[1], msg.arg(2))
            }
            (Command::MODE, n) if n >= 2 => self.on_mode(&disp, &params[0], &params[1..]),
            (Command::WALLOPS, 1) => self
                .meta
                .log(format!("# WALLOPS message from {sender}: {}", params[0])),
            _ => self.unknown(line),
        }
    }

    fn on_numeric(&mut self, code: u16, msg: &Message, line: &str) {
        let params = &msg.params;
        match (NumericClass::of(code), params.len()) {
            (NumericClass::JoinRejected, n) if n >= 2 => {
                self.on_join_rejected(&params[1], &params[2..], line)
            }
            (
                NumericClass::Welcome
                | NumericClass::Informational
                | NumericClass::JoinRejected
                | NumericClass::Connection
                | NumericClass::Error,
                _,
            ) => self.meta.log(line),
            (NumericClass::NoTopic, n) if n >= 2 => self.logs.write(&params[1], "NO TOPIC"),
            (NumericClass::Topic, 3) => {
                self.logs.write(&params[1], format!("TOPIC: {}", params[2]))
            }
            (NumericClass::NamesList, 4) => self.pending_names.extend(&params[2], &params[3]),
            (NumericClass::EndOfNames, n) if n >= 2 => self.on_end_of_names(&params[1]),
            _ => self.unknown(line),
        }
    }

    fn on_join_rejected(&mut self, channel: &str, reason: &[String], line: &str) {
        if !self.logs.is_open(channel) {
            self.meta.log(line);
            return;
        }
        warn!(channel = %channel, "Join rejected");
        let reason = reason.join(" ");
        let status = if reason.is_empty() {
            "ERROR: COULD NOT JOIN".to_string()
        } else {
            format!("ERROR: COULD NOT JOIN: {reason}")
        };
        self.close_channel(channel, &status);
    }

    fn on_end_of_names(&mut self, channel: &str) {
        let names = self.pending_names.take(channel);
        if !self.logs.is_open(channel) {
            return;
        }
        self.logs.write(
            channel,
            format!("MEMBERS ({}): {}", names.len(), names.join(" ")),
        );
        for name in &names {
            let nick = name.strip_prefix(['@', '+']).unwrap_or(name);
            self.members.insert(nick, channel);
        }
    }

    fn on_join(&mut self, nick: &str, disp: &str, list: &str, is_self: bool, out: &mut Vec<Message>) {
        for channel in split_channels(list) {
            if is_self {
                if !self.logs.is_open(channel) && !self.adopt_channel(channel, out) {
                    continue;
                }
                info!(channel = %channel, "Joined");
                self.logs.write(channel, "JOINED");
            } else if self.logs.is_open(channel) {
                self.logs.write(channel, format!("# {disp} joins {channel}."));
                self.members.insert(nick, channel);
            }
        }
    }

    fn on_part(&mut self, nick: &str, disp: &str, list: &str, reason: Option<&str>, is_self: bool) {
        for channel in split_channels(list) {
            if is_self {
                info!(channel = %channel, "Parted");
                self.close_channel(channel, "PARTED");
            } else if self.logs.is_open(channel) {
                let text = match reason {
                    Some(reason) => format!("# {disp} leaves {channel}: {reason}"),
                    None => format!("# {disp} leaves {channel}."),
                };
                self.logs.write(channel, text);
                self.members.remove(nick, channel);
            }
        }
    }

    fn on_quit(&mut self, nick: &str, disp: &str, reason: Option<&str>, is_self: bool) {
        if is_self {
            self.close_all("QUIT");
            return;
        }
        let text = match reason {
            Some(reason) => format!("# {disp} quits: {reason}"),
            None => format!("# {disp} quits."),
        };
        for channel in self.members.whereis(nick).to_vec() {
            self.logs.write(&channel, &text);
        }
        self.members.remove_nick(nick);
    }

    fn on_nick(&mut self, nick: &str, disp: &str, new_nick: &str, is_self: bool) {
        let text = format!("# {disp} is now known as \"{new_nick}\".");
        for channel in self.members.whereis(nick).to_vec() {
            self.logs.write(&channel, &text);
        }
        self.members.rename(nick, new_nick);
        if is_self {
            info!(nickname = %new_nick, "Nickname changed");
            self.registration.rename(new_nick);
            self.meta.log(format!("# Now known as {new_nick}"));
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn on_privmsg(
        &mut self,
        nick: &str,
        sender: &str,
        disp: &str,
        target: &str,
        text: &str,
        line: &str,
        out: &mut Vec<Message>,
    ) {
        if self.nickname() == Some(target) {
            self.on_private(nick, sender, text, line, out);
            return;
        }
        let entry = match Ctcp::parse(text) {
            Some(Ctcp {
                kind: CtcpKind::Action,
                params,
                terminated: true,
                ..
            }) => format!("* {disp} {}", params.unwrap_or_default()),
            _ => format!("<{disp}> {text}"),
        };
        for channel in split_channels(target) {
            self.logs.write(channel, &entry);
        }
    }

    /// A message addressed to us: a control command, or something for the
    /// session log and maybe a CTCP reply.
    fn on_private(&mut self, nick: &str, sender: &str, text: &str, line: &str, out: &mut Vec<Message>) {
        if let Some(tokens) = self.authenticate(text) {
            self.run_control(ControlCommand::parse(tokens), nick, sender, out);
            return;
        }
        self.meta.log(line);
        if let Some(reply) = ctcp::respond(text, &self.realname, &super::timestamp()) {
            out.push(Message::notice(nick, reply));
        }
    }

    /// The tokens after the control password, if `text` starts with it.
    fn authenticate(&self, text: &str) -> Option<Vec<String>> {
        let password = self.control_password.as_deref()?;
        let mut tokens = split_params(text);
        if tokens.first().map(String::as_str) != Some(password) {
            return None;
        }
        tokens.remove(0);
        Some(tokens)
    }

    fn on_kick(&mut self, disp: &str, channel: &str, victim: &str, reason: Option<&str>) {
        let text = match reason {
            Some(reason) => format!("# {victim} is kicked from the channel by {disp}: {reason}"),
            None => format!("# {victim} is kicked from the channel by {disp}."),
        };
        self.logs.write(channel, text);
        self.members.remove(victim, channel);
        if self.nickname() == Some(victim) {
            warn!(channel = %channel, "Kicked");
            self.close_channel(channel, "KICKED");
        }
    }

    fn on_mode(&mut self, disp: &str, target: &str, args: &[String]) {
        let args = args.join(" ");
        if is_channel_name(target) {
            self.logs
                .write(target, format!("# {disp} sets channel mode: {args}"));
        } else if self.nickname() == Some(target) {
            self.meta.log(format!("Mode set: {args}"));
        } else {
            let text = format!("# {disp} sets user mode: {args}");
            for channel in self.members.whereis(target).to_vec() {
                self.logs.write(&channel, &text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::chanlog::DIVIDER;
    use super::super::tests::logged_in;

    #[test]
    fn test_join_logged() {
        let h = logged_in(&["#a"], None);
        assert_eq!(h.log("#a"), vec![DIVIDER, "JOINING #a", "JOINED"]);
    }

    #[test]
    fn test_names_scenario() {
        let mut h = logged_in(&["#a"], None);
        h.feed(":srv 353 logbot = #a :@alice +bob");
        h.feed(":srv 353 logbot = #a :carol");
        h.feed(":srv 366 logbot #a :End of /NAMES list.");

        assert_eq!(h.log("#a").last().unwrap(), "MEMBERS (3): @alice +bob carol");
        assert_eq!(h.session.members.whereis("alice"), ["#a"]);
        assert_eq!(h.session.members.whereis("bob"), ["#a"]);
        assert_eq!(h.session.members.whereis("carol"), ["#a"]);

        h.feed(":bob!b@h QUIT :bye");
        let log = h.log("#a");
        assert_eq!(log.last().unwrap(), "# bob (b@h) quits: bye");
        assert_eq!(h.session.members.whereis("alice"), ["#a"]);
        assert_eq!(h.session.members.whereis("carol"), ["#a"]);
        assert!(h.session.members.whereis("bob").is_empty());
    }

    #[test]
    fn test_names_for_unlogged_channel_dropped() {
        let mut h = logged_in(&["#a"], None);
        h.feed(":srv 353 logbot = #z :alice");
        h.feed(":srv 366 logbot #z :End of /NAMES list.");
        assert!(h.session.members.whereis("alice").is_empty());
    }

    #[test]
    fn test_topic_replies() {
        let mut h = logged_in(&["#a", "#b"], None);
        h.feed(":srv 332 logbot #a :the topic");
        h.feed(":srv 331 logbot #b :No topic is set");
        h.feed(":alice!a@h TOPIC #a :new topic");
        assert!(h.log("#a").contains(&"TOPIC: the topic".to_string()));
        assert!(h.log("#b").contains(&"NO TOPIC".to_string()));
        assert_eq!(h.log("#a").last().unwrap(), "# alice sets the channel topic to: new topic");
    }

    #[test]
    fn test_chat_and_action() {
        let mut h = logged_in(&["#a", "#b"], None);
        h.feed(":alice!a@h PRIVMSG #a :hello there");
        h.feed(":alice!a@h PRIVMSG #a,#b :\x01ACTION waves\x01");
        assert_eq!(
            &h.log("#a")[3..],
            ["<alice> hello there", "* alice waves"]
        );
        assert_eq!(h.log("#b").last().unwrap(), "* alice waves");
    }

    #[test]
    fn test_others_join_part_quit() {
        let mut h = logged_in(&["#a"], None);
        h.feed(":alice!a@h JOIN #a");
        h.feed(":alice!a@h PART #a :later");
        h.feed(":bob!b@h JOIN #a");
        h.feed(":bob!b@h PART #a");
        h.feed(":carol!c@h JOIN #elsewhere");

        assert_eq!(
            &h.log("#a")[3..],
            [
                "# alice (a@h) joins #a.",
                "# alice (a@h) leaves #a: later",
                "# bob (b@h) joins #a.",
                "# bob (b@h) leaves #a.",
            ]
        );
        assert!(h.session.members.is_empty());
    }

    #[test]
    fn test_self_part_closes_log() {
        let mut h = logged_in(&["#a", "#b"], None);
        h.feed(":alice!a@h JOIN #a");
        h.feed(":logbot!lurker@host PART #a");

        let log = h.log("#a");
        assert_eq!(&log[log.len() - 2..], ["PARTED", DIVIDER]);
        assert_eq!(h.session.logging(), vec!["#b"]);
        assert!(h.session.members.whereis("alice").is_empty());
    }

    #[test]
    fn test_self_kick_closes_log() {
        let mut h = logged_in(&["#a"], None);
        h.feed(":op!o@h KICK #a logbot :begone");

        let log = h.log("#a");
        assert_eq!(
            &log[log.len() - 3..],
            ["# logbot is kicked from the channel by op: begone", "KICKED", DIVIDER]
        );
        assert!(h.session.logging().is_empty());
    }

    #[test]
    fn test_kick_other() {
        let mut h = logged_in(&["#a"], None);
        h.feed(":alice!a@h JOIN #a");
        h.feed(":op!o@h KICK #a alice");
        assert_eq!(h.log("#a").last().unwrap(), "# alice is kicked from the channel by op.");
        assert!(h.session.members.is_empty());
        assert_eq!(h.session.logging(), vec!["#a"]);
    }

    #[test]
    fn test_self_quit_closes_everything() {
        let mut h = logged_in(&["#a", "#b"], None);
        h.feed(":logbot!lurker@host QUIT :gone");
        assert!(h.session.logging().is_empty());
        assert_eq!(h.log("#b")[h.log("#b").len() - 2], "QUIT");
    }

    #[test]
    fn test_nick_change_fans_out() {
        let mut h = logged_in(&["#a", "#b", "#c"], None);
        h.feed(":alice!a@h JOIN #a");
        h.feed(":alice!a@h JOIN #b");
        h.feed(":alice!a@h NICK alicia");

        let expected = "# alice is now known as \"alicia\".";
        assert_eq!(h.log("#a").last().unwrap(), expected);
        assert_eq!(h.log("#b").last().unwrap(), expected);
        assert_ne!(h.log("#c").last().unwrap(), expected);
        assert_eq!(h.session.members.whereis("alicia"), ["#a", "#b"]);
        assert!(h.session.members.whereis("alice").is_empty());
    }

    #[test]
    fn test_own_nick_change() {
        let mut h = logged_in(&["#a"], None);
        h.feed(":logbot!lurker@host NICK logger");
        assert_eq!(h.session.nickname(), Some("logger"));

        h.feed(":op!o@h KICK #a logger :bye");
        assert!(h.session.logging().is_empty());
    }

    #[test]
    fn test_forced_join_adopted() {
        let mut h = logged_in(&["#a"], None);
        let sent = h.feed(":logbot!lurker@host JOIN #forced");
        assert!(sent.is_empty());
        assert_eq!(h.log("#forced"), vec![DIVIDER, "JOINED"]);
        assert_eq!(h.session.logging(), vec!["#a", "#forced"]);
    }

    #[test]
    fn test_join_echo_in_server_casing() {
        let mut h = logged_in(&[], Some("pw"));
        h.feed(":alice!a@h PRIVMSG logbot :pw JOIN #nethack");
        assert!(h.feed(":logbot!lurker@host JOIN #NetHack").is_empty());
        h.feed(":alice!a@h PRIVMSG #NetHack :hi");
        h.feed(":srv 353 logbot = #NETHACK :@alice");
        h.feed(":srv 366 logbot #NetHack :End of /NAMES list.");

        assert_eq!(h.session.logging(), vec!["#nethack"]);
        assert_eq!(
            h.log("#nethack"),
            vec![DIVIDER, "JOINING #nethack", "JOINED", "<alice> hi", "MEMBERS (1): @alice"]
        );
        assert!(h.log("#NetHack").is_empty());

        h.feed(":logbot!lurker@host PART #NETHACK");
        assert!(h.session.logging().is_empty());
        assert!(h.session.members.is_empty());
    }

    #[test]
    fn test_join_rejected() {
        let mut h = logged_in(&["#a"], None);
        h.feed(":srv 474 logbot #a :Cannot join channel (+b)");
        let log = h.log("#a");
        assert_eq!(
            &log[log.len() - 2..],
            ["ERROR: COULD NOT JOIN: Cannot join channel (+b)", DIVIDER]
        );
        assert!(h.session.logging().is_empty());

        h.feed(":srv 403 logbot #never :No such channel");
        assert!(h.meta().contains(&":srv 403 logbot #never :No such channel".to_string()));
    }

    #[test]
    fn test_modes() {
        let mut h = logged_in(&["#a"], None);
        h.feed(":alice!a@h JOIN #a");
        h.feed(":op!o@h MODE #a +o alice");
        h.feed(":alice!a@h MODE alice +i");
        h.feed(":logbot MODE logbot :+iw");

        let log = h.log("#a");
        assert_eq!(log[log.len() - 2], "# op (o@h) sets channel mode: +o alice");
        assert_eq!(log[log.len() - 1], "# alice (a@h) sets user mode: +i");
        assert!(h.meta().contains(&"Mode set: +iw".to_string()));
    }

    #[test]
    fn test_session_level_lines() {
        let mut h = logged_in(&["#a"], None);
        h.feed(":srv 372 logbot :- message of the day");
        h.feed(":srv NOTICE logbot :server notice");
        h.feed(":oper!o@h WALLOPS :maintenance soon");
        h.feed("ERROR :Closing Link");
        h.feed(":srv 999 what");
        h.feed(":alice!a@h PRIVMSG #a");

        let meta = h.meta();
        assert!(meta.contains(&":srv 372 logbot :- message of the day".to_string()));
        assert!(meta.contains(&":srv NOTICE logbot :server notice".to_string()));
        assert!(meta.contains(&"# WALLOPS message from oper!o@h: maintenance soon".to_string()));
        assert!(meta.contains(&"ERROR :Closing Link".to_string()));
        assert!(meta.contains(&"UNKNOWN\t:srv 999 what".to_string()));
        assert!(meta.contains(&"UNKNOWN\t:alice!a@h PRIVMSG #a".to_string()));
    }

    #[test]
    fn test_ctcp_query_answered() {
        let mut h = logged_in(&["#a"], None);
        let sent = h.feed(":alice!a@h PRIVMSG logbot :\x01VERSION\x01");
        assert_eq!(sent.len(), 1);
        assert!(sent[0].starts_with("NOTICE alice :\x01VERSION irclogd:"));
        assert!(h.meta().contains(&":alice!a@h PRIVMSG logbot :\x01VERSION\x01".to_string()));

        assert!(h.feed(":alice!a@h PRIVMSG logbot :just saying hi").is_empty());
    }

    #[test]
    fn test_membership_churn_does_not_grow() {
        let mut h = logged_in(&["#a"], None);
        for i in 0..500 {
            h.feed(&format!(":user{i}!u@h JOIN #a"));
            if i % 2 == 0 {
                h.feed(&format!(":user{i}!u@h PART #a"));
            } else {
                h.feed(&format!(":user{i}!u@h QUIT :bye"));
            }
        }
        assert!(h.session.members.is_empty());
    }
}
