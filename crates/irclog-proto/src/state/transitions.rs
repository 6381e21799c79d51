//! Reply handling while waiting for the server's verdict.

use crate::message::Message;
use crate::numeric::NumericClass;

use super::tracker::RegistrationMachine;
use super::{RegistrationAction, RegistrationError, RegistrationState};

impl RegistrationMachine {
    pub(super) fn handle_reply(
        &mut self,
        msg: &Message,
    ) -> Result<Vec<RegistrationAction>, RegistrationError> {
        let RegistrationState::AwaitingReply { nickname } = &self.state else {
            return Ok(vec![]);
        };
        let Some(code) = msg.command.numeric() else {
            return Ok(vec![]);
        };

        if NumericClass::of(code) == NumericClass::Welcome {
            let nickname = nickname.clone();
            self.state = RegistrationState::LoggedIn {
                nickname: nickname.clone(),
            };
            return Ok(vec![RegistrationAction::Complete { nickname }]);
        }

        if NumericClass::is_error_code(code) {
            let rejected = RegistrationAction::NicknameRejected {
                nickname: nickname.clone(),
                code,
            };
            let retry = self.try_next_nickname()?;
            return Ok(vec![rejected, retry]);
        }

        Ok(vec![])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RegistrationConfig;

    fn started(nicks: &[&str]) -> RegistrationMachine {
        let mut machine = RegistrationMachine::new(RegistrationConfig {
            nicknames: nicks.iter().map(|n| n.to_string()).collect(),
            username: "u".to_string(),
            realname: "r".to_string(),
            password: None,
        });
        let _ = machine.start().unwrap();
        machine
    }

    fn parse(line: &str) -> Message {
        line.parse().unwrap()
    }

    #[test]
    fn test_rejection_advances_without_resending_pass_user() {
        let mut machine = started(&["a", "b"]);
        let actions = machine
            .feed(&parse(":srv 433 * a :Nickname is already in use"))
            .unwrap();

        assert_eq!(actions.len(), 2);
        assert!(matches!(
            &actions[0],
            RegistrationAction::NicknameRejected { nickname, code: 433 } if nickname == "a"
        ));
        match &actions[1] {
            RegistrationAction::Send(msg) => assert_eq!(msg.to_string(), "NICK b"),
            other => panic!("expected NICK, got {:?}", other),
        }
    }

    #[test]
    fn test_welcome_completes_with_current_candidate() {
        let mut machine = started(&["a", "b"]);
        let _ = machine.feed(&parse(":srv 433 * a :in use")).unwrap();
        let actions = machine.feed(&parse(":srv 001 b :Welcome")).unwrap();

        assert!(matches!(
            &actions[0],
            RegistrationAction::Complete { nickname } if nickname == "b"
        ));
        assert_eq!(machine.nickname(), Some("b"));
        assert!(machine.feed(&parse(":srv 433 * b :in use")).unwrap().is_empty());
    }

    #[test]
    fn test_any_00x_is_welcome() {
        let mut machine = started(&["a"]);
        let actions = machine.feed(&parse(":srv 004 a srv v1 i o")).unwrap();
        assert!(matches!(&actions[0], RegistrationAction::Complete { .. }));
    }

    #[test]
    fn test_exhaustion_is_fatal() {
        let mut machine = started(&["a"]);
        let err = machine.feed(&parse(":srv 432 * a :Erroneous")).unwrap_err();
        assert_eq!(err, RegistrationError::NicknamesExhausted);
    }

    #[test]
    fn test_non_numeric_ignored() {
        let mut machine = started(&["a"]);
        assert!(machine
            .feed(&parse(":srv NOTICE * :*** Looking up your hostname"))
            .unwrap()
            .is_empty());
        assert!(machine.feed(&parse(":srv 020 * :Please wait")).unwrap().is_empty());
    }
}
