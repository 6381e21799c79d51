//! Message serialization.

use std::fmt::{self, Write};

use super::Message;

fn needs_colon(param: &str) -> bool {
    param.is_empty() || param.contains(' ') || param.starts_with(':')
}

/// Join tokens back into wire form: plain tokens separated by spaces, with
/// the first token that cannot stand alone (empty, containing a space, or
/// starting with `:`) turned into a trailing parameter together with
/// everything after it.
///
/// ```
/// use irclog_proto::join_params;
///
/// assert_eq!(join_params(&["FOO", "bar"]), "FOO bar");
/// assert_eq!(join_params(&["FOO", "two words", "x"]), "FOO :two words x");
/// ```
pub fn join_params<S: AsRef<str>>(params: &[S]) -> String {
    let mut out = String::new();
    for (i, param) in params.iter().enumerate() {
        let param = param.as_ref();
        if i > 0 {
            out.push(' ');
        }
        if needs_colon(param) {
            out.push(':');
            let rest: Vec<&str> = params[i..].iter().map(AsRef::as_ref).collect();
            out.push_str(&rest.join(" "));
            break;
        }
        out.push_str(param);
    }
    out
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            write!(f, ":{} ", prefix)?;
        }
        write!(f, "{}", self.command)?;

        let last = self.params.len().saturating_sub(1);
        for (i, param) in self.params.iter().enumerate() {
            f.write_char(' ')?;
            if i == last && (self.command.has_text_param() || needs_colon(param)) {
                f.write_char(':')?;
            }
            f.write_str(param)?;
        }
        Ok(())
    }
}
