//! Replies to CTCP queries sent to us in private.

use irclog_proto::{Ctcp, CtcpKind};

const CLIENTINFO: &str =
    ":I know CLIENTINFO, USERINFO, FINGER, PING, TIME, VERSION and ERRMSG. Ask nicely.";

/// The NOTICE body answering `text`, if it is a CTCP query we answer.
pub(super) fn respond(text: &str, realname: &str, now: &str) -> Option<String> {
    let ctcp = Ctcp::parse(text)?;
    let reply = match (&ctcp.kind, ctcp.params, ctcp.terminated) {
        (CtcpKind::Action, _, _) => return None,
        (CtcpKind::Ping, _, _) => text.to_string(),
        (CtcpKind::Clientinfo, Some(_), _) => {
            Ctcp::reply(CtcpKind::Clientinfo, ":Go look it up yourself.")
        }
        (CtcpKind::Clientinfo, None, _) => Ctcp::reply(CtcpKind::Clientinfo, CLIENTINFO),
        (CtcpKind::Userinfo, None, true) => {
            Ctcp::reply(CtcpKind::Userinfo, ":Shh!  I'm lurking!")
        }
        (CtcpKind::Finger, None, true) => {
            Ctcp::reply(CtcpKind::Finger, &format!(":I am {realname}, I swear!"))
        }
        (CtcpKind::Time, None, true) => Ctcp::reply(CtcpKind::Time, &format!(":{now}")),
        (CtcpKind::Version, None, true) => Ctcp::reply(
            CtcpKind::Version,
            concat!(env!("CARGO_PKG_NAME"), ":", env!("CARGO_PKG_VERSION"), ":Rust"),
        ),
        (CtcpKind::Errmsg, Some(query), true) => Ctcp::reply(
            CtcpKind::Errmsg,
            &format!("{query} :What are you trying to do?"),
        ),
        (_, _, true) => Ctcp::reply(
            CtcpKind::Errmsg,
            &format!("{} :I don't know what that means.", ctcp.payload),
        ),
        (_, _, false) => return None,
    };
    Some(reply)
}
