use std::fmt;
use std::time::Duration;

const SECONDS_PER_MIN: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SessionType {
    FocusTime,
    ShortBreak,
    LongBreak,
}

impl SessionType {
    /// Configuration key of this session type (`focus_time`, ...).
    pub fn label(self) -> &'static str {
        match self {
            SessionType::FocusTime => "focus_time",
            SessionType::ShortBreak => "short_break",
            SessionType::LongBreak => "long_break",
        }
    }

    pub fn is_focus(self) -> bool {
        self == SessionType::FocusTime
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Progress of a single session.
///
/// Moves `NotStarted -> Skipped -> Done` or `NotStarted -> Done`. `Skipped` is
/// set while the countdown runs and stays only if the countdown never finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    NotStarted,
    Skipped,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub session_type: SessionType,
    /// Length in minutes, always positive.
    pub length: u32,
    pub status: SessionStatus,
}

impl Session {
    pub(crate) fn new(session_type: SessionType, length: u32) -> Self {
        Self {
            session_type,
            length,
            status: SessionStatus::NotStarted,
        }
    }

    /// Countdown length of the session.
    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.length).saturating_mul(SECONDS_PER_MIN))
    }
}
