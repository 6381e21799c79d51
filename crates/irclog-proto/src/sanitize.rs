//! Scrubbing of externally supplied strings.
//!
//! Nicknames, passwords, usernames, realnames, channel names and mode
//! strings all pass through [`sanitize`] before they reach the wire or a
//! filename.

/// Replace NUL, LF and CR with a space.
///
/// When `trailing` is false the value is meant to be a single protocol
/// token or path component: spaces additionally become underscores and
/// leading `:` markers are removed. Applying the function twice gives the
/// same result as applying it once.
///
/// ```
/// use irclog_proto::sanitize;
///
/// assert_eq!(sanitize("a\r\nb", true), "a  b");
/// assert_eq!(sanitize(":#my chan", false), "#my_chan");
/// ```
pub fn sanitize(s: &str, trailing: bool) -> String {
    let cleaned: String = s
        .chars()
        .map(|c| match c {
            '\0' | '\n' | '\r' => ' ',
            c => c,
        })
        .collect();
    if trailing {
        return cleaned;
    }
    cleaned.replace(' ', "_").trim_start_matches(':').to_owned()
}
