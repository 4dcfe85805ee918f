//! Rounds of Pomodoro sessions.
//!
//! A round always follows [`ROUND_TEMPLATE`]. The round owns its sessions and
//! keeps a cursor on the one being tracked.

use std::collections::BTreeMap;

use super::session::{Session, SessionStatus, SessionType};
use crate::error::{ConfigError, Result, ValidationError};

/// Session lengths in minutes, keyed by session type.
pub type SessionLengths = BTreeMap<SessionType, u32>;

/// Canonical order of the sessions in every round.
pub const ROUND_TEMPLATE: [SessionType; 8] = [
    SessionType::FocusTime,
    SessionType::ShortBreak,
    SessionType::FocusTime,
    SessionType::ShortBreak,
    SessionType::FocusTime,
    SessionType::ShortBreak,
    SessionType::FocusTime,
    SessionType::LongBreak,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    sessions: Vec<Session>,
    current_session_idx: usize,
    completed: bool,
}

impl Round {
    /// Build a round from the template.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] if `lengths` lacks a session type of
    /// the template, and [`ValidationError::InvalidValue`] for a zero length.
    pub fn new(lengths: &SessionLengths) -> Result<Self> {
        let sessions = ROUND_TEMPLATE
            .iter()
            .map(|&session_type| -> Result<Session> {
                let length = *lengths
                    .get(&session_type)
                    .ok_or_else(|| ConfigError::MissingKey(session_type.label().to_string()))?;
                if length == 0 {
                    return Err(ValidationError::InvalidValue {
                        field: session_type.label().to_string(),
                        message: "session length must be at least one minute".into(),
                    }
                    .into());
                }
                Ok(Session::new(session_type, length))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            sessions,
            current_session_idx: 0,
            completed: false,
        })
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn current_session_idx(&self) -> usize {
        self.current_session_idx
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    fn last_idx(&self) -> usize {
        self.sessions.len() - 1
    }

    /// Set the status of the session under the cursor.
    ///
    /// The round counts as completed as soon as the last session receives any
    /// status, `Skipped` included. `Done` moves the cursor forward unless it
    /// already sits on the last session.
    pub fn update_session(&mut self, status: SessionStatus) {
        let idx = self.current_session_idx;
        self.sessions[idx].status = status;
        self.completed = idx == self.last_idx();

        if status == SessionStatus::Done && idx < self.last_idx() {
            self.current_session_idx += 1;
        }
    }

    /// Session under the cursor.
    ///
    /// A session already marked `Skipped` was abandoned mid-countdown, so the
    /// cursor first moves past it (never beyond the last session).
    pub fn current_session(&mut self) -> &Session {
        if self.sessions[self.current_session_idx].status == SessionStatus::Skipped
            && self.current_session_idx < self.last_idx()
        {
            self.current_session_idx += 1;
        }
        &self.sessions[self.current_session_idx]
    }
}

/// Build `num_rounds` fresh rounds. Zero rounds is an empty list.
///
/// # Errors
///
/// Fails like [`Round::new`].
pub fn create_rounds(lengths: &SessionLengths, num_rounds: usize) -> Result<Vec<Round>> {
    (0..num_rounds).map(|_| Round::new(lengths)).collect()
}
