//! Message parsing implementation.
//!
//! Grammar: an optional `:sender` token, a command token, then parameters
//! separated by spaces. A parameter starting with `:` swallows the rest of
//! the line, spaces included.

use std::str::FromStr;

use crate::command::Command;
use crate::error::{MessageParseError, ProtocolError};

use super::Message;

/// Split a parameter string using the trailing-parameter rule.
///
/// Also used to tokenize the control sub-protocol carried inside private
/// messages, which follows the same rule.
///
/// ```
/// use irclog_proto::split_params;
///
/// assert_eq!(split_params("#chan :hello world"), vec!["#chan", "hello world"]);
/// assert_eq!(split_params("a  b"), vec!["a", "b"]);
/// assert!(split_params("").is_empty());
/// ```
pub fn split_params(mut rest: &str) -> Vec<String> {
    let mut params = Vec::new();
    rest = rest.trim_start_matches(' ');
    while !rest.is_empty() {
        if let Some(trailing) = rest.strip_prefix(':') {
            params.push(trailing.to_owned());
            break;
        }
        let (token, tail) = rest.split_once(' ').unwrap_or((rest, ""));
        params.push(token.to_owned());
        rest = tail.trim_start_matches(' ');
    }
    params
}

fn parse_line(s: &str) -> Result<Message, MessageParseError> {
    let s = s.trim_end_matches(['\r', '\n']);
    if s.trim_matches(' ').is_empty() {
        return Err(MessageParseError::EmptyMessage);
    }

    let (prefix, rest) = match s.strip_prefix(':') {
        Some(after) => {
            let (sender, rest) = after
                .split_once(' ')
                .ok_or(MessageParseError::DanglingPrefix)?;
            if sender.is_empty() {
                return Err(MessageParseError::DanglingPrefix);
            }
            (Some(sender.to_owned()), rest.trim_start_matches(' '))
        }
        None => (None, s),
    };

    let (token, params) = rest.split_once(' ').unwrap_or((rest, ""));
    if token.is_empty() {
        return Err(MessageParseError::DanglingPrefix);
    }
    if token.starts_with(':') {
        return Err(MessageParseError::InvalidCommand);
    }

    Ok(Message {
        prefix,
        command: Command::from_token(token),
        params: split_params(params),
    })
}

impl FromStr for Message {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Message, Self::Err> {
        parse_line(s).map_err(|cause| ProtocolError::InvalidMessage {
            string: s.to_owned(),
            cause,
        })
    }
}
