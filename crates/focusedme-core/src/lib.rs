//! # focusedMe Core Library
//!
//! This library provides the core logic for the focusedMe terminal Pomodoro
//! timer. The CLI binary is a thin layer of argument parsing, terminal output
//! and signal handling over the same library.
//!
//! ## Architecture
//!
//! - **Rounds and Sessions**: A round is a fixed sequence of eight sessions
//!   (four focus periods, three short breaks and one long break). Each session
//!   carries a status that only moves forward.
//! - **Tracker**: A wall-clock-based loop that counts down the current session
//!   once per second, saves snapshots into the [`Log`] and rings the
//!   [`Notifier`] when a session ends. It is cancelled by dropping its future
//!   and resumed by calling it again.
//! - **Storage**: TOML-based configuration of durations and sound.
//!
//! ## Key Components
//!
//! - [`Round`]: Session sequence with a cursor and completion flag
//! - [`Tracker`]: Countdown loop over a list of rounds
//! - [`Log`]: Latest snapshot of all rounds and the results summary
//! - [`Config`]: Application configuration management

pub mod error;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, Result, ValidationError};
pub use storage::{Config, DurationConfig, SoundConfig};
pub use timer::{
    create_rounds, Log, Notifier, Round, RoundSummary, Session, SessionLengths, SessionStatus,
    SessionType, SilentNotifier, Tick, Tracker, ROUND_TEMPLATE,
};
