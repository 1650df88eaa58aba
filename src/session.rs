use std::collections::HashMap;

use log::info;
use thiserror::Error;

use crate::pipeline::PipelineOutcome;
use crate::summarize::DEFAULT_WORD_BOUND;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Username already exists. Please choose another.")]
    UsernameTaken,

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("Invalid username or password")]
    InvalidCredentials,
}

/// Username → plain-text password, kept for the life of the process. A placeholder, not a credential store.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: HashMap<String, String>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_up(&mut self, username: &str, password: &str, confirm: &str) -> Result<(), SessionError> {
        if self.accounts.contains_key(username) {
            return Err(SessionError::UsernameTaken);
        }
        if password != confirm {
            return Err(SessionError::PasswordMismatch);
        }
        self.accounts.insert(username.to_string(), password.to_string());
        info!("Account created: {username}");
        Ok(())
    }

    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.accounts.get(username).is_some_and(|stored| stored == password)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GateState {
    #[default]
    LoggedOut,
    LoggedIn { username: String },
}

/// Per-browser state: gate status, chosen word bound and the last outcome
#[derive(Debug, Clone)]
pub struct Session {
    pub state: GateState,
    pub word_bound: u32,
    pub last_outcome: Option<PipelineOutcome>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            state: GateState::LoggedOut,
            word_bound: DEFAULT_WORD_BOUND,
            last_outcome: None,
        }
    }
}

impl Session {
    pub fn with_word_bound(word_bound: u32) -> Self {
        Self {
            word_bound,
            ..Self::default()
        }
    }

    pub fn username(&self) -> Option<&str> {
        match &self.state {
            GateState::LoggedIn { username } => Some(username),
            GateState::LoggedOut => None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.state, GateState::LoggedIn { .. })
    }

    pub fn log_in(&mut self, accounts: &AccountStore, username: &str, password: &str) -> Result<(), SessionError> {
        if !accounts.verify(username, password) {
            return Err(SessionError::InvalidCredentials);
        }
        info!("User logged in: {username}");
        self.state = GateState::LoggedIn {
            username: username.to_string(),
        };
        Ok(())
    }

    /// Drop the login and the retained outcome. The word bound is a preference and stays.
    pub fn log_out(&mut self) {
        if let Some(username) = self.username() {
            info!("User logged out: {username}");
        }
        *self = Session::with_word_bound(self.word_bound);
    }

    pub fn retain(&mut self, outcome: PipelineOutcome) {
        self.last_outcome = Some(outcome);
    }
}
