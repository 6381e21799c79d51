//! Numeric reply codes the logger cares about, and their classification.

/// RPL_NOTOPIC
pub const RPL_NOTOPIC: u16 = 331;
/// RPL_TOPIC
pub const RPL_TOPIC: u16 = 332;
/// RPL_NAMREPLY
pub const RPL_NAMREPLY: u16 = 353;
/// RPL_ENDOFNAMES
pub const RPL_ENDOFNAMES: u16 = 366;
/// ERR_NICKNAMEINUSE
pub const ERR_NICKNAMEINUSE: u16 = 433;

/// Login banner statistics and MOTD lines.
const INFORMATIONAL: &[u16] = &[250, 251, 252, 253, 254, 255, 265, 266, 372, 375, 376];

/// Replies meaning a JOIN was refused. 437 doubles as a NICK failure, and a
/// few others are overloaded, but none of the other meanings arise for a
/// client that only joins and parts.
const JOIN_REJECTED: &[u16] = &[403, 405, 407, 437, 471, 473, 474, 475, 476];

/// How a numeric reply is treated by dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumericClass {
    /// `00x`: registration succeeded.
    Welcome,
    /// Banner noise; session log only.
    Informational,
    /// The server refused to let us join a channel.
    JoinRejected,
    /// The channel has no topic.
    NoTopic,
    /// The channel topic.
    Topic,
    /// One chunk of a NAMES listing.
    NamesList,
    /// End of a NAMES listing.
    EndOfNames,
    /// Any other `0xx` reply.
    Connection,
    /// Any other `4xx`/`5xx` reply.
    Error,
    /// Anything else.
    Other,
}

impl NumericClass {
    /// Classify a numeric code.
    pub fn of(code: u16) -> Self {
        match code {
            0..=9 => Self::Welcome,
            c if INFORMATIONAL.contains(&c) => Self::Informational,
            c if JOIN_REJECTED.contains(&c) => Self::JoinRejected,
            RPL_NOTOPIC => Self::NoTopic,
            RPL_TOPIC => Self::Topic,
            RPL_NAMREPLY => Self::NamesList,
            RPL_ENDOFNAMES => Self::EndOfNames,
            10..=99 => Self::Connection,
            400..=599 => Self::Error,
            _ => Self::Other,
        }
    }

    /// Whether the code is in the `4xx`/`5xx` error range.
    pub fn is_error_code(code: u16) -> bool {
        (400..=599).contains(&code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes() {
        assert_eq!(NumericClass::of(1), NumericClass::Welcome);
        assert_eq!(NumericClass::of(5), NumericClass::Welcome);
        assert_eq!(NumericClass::of(42), NumericClass::Connection);
        assert_eq!(NumericClass::of(372), NumericClass::Informational);
        assert_eq!(NumericClass::of(474), NumericClass::JoinRejected);
        assert_eq!(NumericClass::of(353), NumericClass::NamesList);
        assert_eq!(NumericClass::of(366), NumericClass::EndOfNames);
        assert_eq!(NumericClass::of(433), NumericClass::Error);
        assert_eq!(NumericClass::of(333), NumericClass::Other);
    }

    #[test]
    fn test_error_range() {
        assert!(NumericClass::is_error_code(ERR_NICKNAMEINUSE));
        assert!(NumericClass::is_error_code(599));
        assert!(!NumericClass::is_error_code(366));
    }
}
