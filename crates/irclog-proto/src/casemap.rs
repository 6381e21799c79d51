//! RFC 1459 case mapping.
//!
//! Channel names are case-insensitive on the wire, and `[]\~` are the
//! uppercase forms of `{}|^`. Servers echo a channel in its own casing, so
//! anything keyed by channel name compares folded names.

/// Fold one character to its RFC 1459 lowercase form.
#[inline]
const fn irc_lower_char(c: char) -> char {
    match c {
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        '~' => '^',
        'A'..='Z' => (c as u8 + 32) as char,
        _ => c,
    }
}

/// Fold a whole name.
pub fn irc_to_lower(s: &str) -> String {
    s.chars().map(irc_lower_char).collect()
}

/// Case-insensitive equality under RFC 1459 folding.
pub fn irc_eq(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a.chars()
            .zip(b.chars())
            .all(|(ca, cb)| irc_lower_char(ca) == irc_lower_char(cb))
}
