//! User mode string tokenizing.

use crate::sanitize::sanitize;

/// Split user-supplied mode strings into the tokens sent after
/// `MODE <nick>`.
///
/// Each input is sanitized, split on whitespace and again in front of every
/// `+` or `-`. A leading `:` is removed from each token and empty tokens are
/// dropped.
///
/// ```
/// use irclog_proto::split_mode_tokens;
///
/// assert_eq!(split_mode_tokens(&["+i-w"]), vec!["+i", "-w"]);
/// assert_eq!(split_mode_tokens(&[":+x", "-R +B"]), vec!["+x", "-R", "+B"]);
/// ```
pub fn split_mode_tokens<S: AsRef<str>>(inputs: &[S]) -> Vec<String> {
    let mut tokens = Vec::new();
    for input in inputs {
        let cleaned = sanitize(input.as_ref(), true);
        for word in cleaned.split_whitespace() {
            let mut start = 0;
            for (i, c) in word.char_indices() {
                if (c == '+' || c == '-') && i > start {
                    push_token(&mut tokens, &word[start..i]);
                    start = i;
                }
            }
            push_token(&mut tokens, &word[start..]);
        }
    }
    tokens
}

fn push_token(tokens: &mut Vec<String>, token: &str) {
    let token = token.strip_prefix(':').unwrap_or(token);
    if !token.is_empty() {
        tokens.push(token.to_owned());
    }
}
