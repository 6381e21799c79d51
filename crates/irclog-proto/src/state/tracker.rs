//! Registration state machine core implementation.

use std::collections::VecDeque;

use crate::message::Message;

use super::{RegistrationAction, RegistrationConfig, RegistrationError, RegistrationState};

/// Sans-IO state machine for the PASS -> USER -> NICK -> 00x flow.
#[derive(Clone, Debug)]
pub struct RegistrationMachine {
    pub(super) config: RegistrationConfig,
    pub(super) state: RegistrationState,
    /// Candidates not yet tried.
    pub(super) remaining: VecDeque<String>,
}

impl RegistrationMachine {
    /// Create a new state machine with the given configuration.
    #[must_use]
    pub fn new(config: RegistrationConfig) -> Self {
        let remaining = config.nicknames.iter().cloned().collect();
        Self {
            config,
            state: RegistrationState::Connecting,
            remaining,
        }
    }

    /// Get the current state.
    #[must_use]
    pub fn state(&self) -> &RegistrationState {
        &self.state
    }

    /// Whether registration has completed.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        matches!(self.state, RegistrationState::LoggedIn { .. })
    }

    /// Our nickname once logged in.
    #[must_use]
    pub fn nickname(&self) -> Option<&str> {
        match &self.state {
            RegistrationState::LoggedIn { nickname } => Some(nickname),
            _ => None,
        }
    }

    /// Record a server-confirmed change of our own nickname.
    pub fn rename(&mut self, new_nickname: &str) {
        if let RegistrationState::LoggedIn { nickname } = &mut self.state {
            *nickname = new_nickname.to_owned();
        }
    }

    /// Start registration. Returns PASS (when configured), USER and the
    /// first NICK.
    pub fn start(&mut self) -> Result<Vec<RegistrationAction>, RegistrationError> {
        let mut actions = Vec::new();

        if let Some(pass) = self.config.password.as_ref().filter(|p| !p.is_empty()) {
            actions.push(RegistrationAction::Send(Box::new(Message::pass(pass.clone()))));
        }
        actions.push(RegistrationAction::Send(Box::new(Message::user(
            self.config.username.clone(),
            self.config.realname.clone(),
        ))));
        actions.push(self.try_next_nickname()?);

        Ok(actions)
    }

    /// Feed a parsed message to the state machine.
    ///
    /// Returns no actions for messages that play no part in registration,
    /// and always once logged in.
    pub fn feed(&mut self, msg: &Message) -> Result<Vec<RegistrationAction>, RegistrationError> {
        match self.state {
            RegistrationState::AwaitingReply { .. } => self.handle_reply(msg),
            RegistrationState::Connecting | RegistrationState::LoggedIn { .. } => Ok(vec![]),
        }
    }

    pub(super) fn try_next_nickname(&mut self) -> Result<RegistrationAction, RegistrationError> {
        let nickname = self
            .remaining
            .pop_front()
            .ok_or(RegistrationError::NicknamesExhausted)?;
        self.state = RegistrationState::AwaitingReply {
            nickname: nickname.clone(),
        };
        Ok(RegistrationAction::Send(Box::new(Message::nick(nickname))))
    }
}
