//! Countdown loop over a list of rounds.
//!
//! The tracker is a wall-clock-based state machine:
//!
//! ```text
//! SelectingRound -> CountingDown -> SelectingRound -> ... -> Finished
//! ```
//!
//! [`Tracker::start`] has no cancellation token of its own. The caller races
//! it against whatever interrupt it listens for and drops the future; every
//! bit of progress lives in the rounds, so calling `start` again picks up
//! where the previous call stopped.
//!
//! ## Usage
//!
//! ```ignore
//! let mut tracker = Tracker::new(rounds, Log::new());
//! tokio::select! {
//!     () = tracker.start(|tick| view.show_time(tick), &sound) => {}
//!     _ = tokio::signal::ctrl_c() => {}
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use tokio::time::{self, Instant};

use super::log::Log;
use super::notifier::{Notifier, SilentNotifier};
use super::round::Round;
use super::session::{SessionStatus, SessionType};
use crate::storage::SoundConfig;

const TICK: Duration = Duration::from_secs(1);

/// Progress report handed to the display callback once per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Whole seconds left, rounded up.
    pub remaining_secs: u64,
    /// 1-based round number.
    pub round: usize,
    /// 1-based session number within the round.
    pub session: usize,
    pub session_type: SessionType,
}

pub struct Tracker {
    rounds: Vec<Round>,
    log: Log,
    current_round_idx: usize,
    notifier: Box<dyn Notifier>,
}

impl Tracker {
    pub fn new(rounds: Vec<Round>, log: Log) -> Self {
        Self {
            rounds,
            log,
            current_round_idx: 0,
            notifier: Box::new(SilentNotifier),
        }
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn log(&self) -> &Log {
        &self.log
    }

    pub fn current_round_idx(&self) -> usize {
        self.current_round_idx
    }

    /// True once every round is completed. An empty tracker is finished.
    pub fn is_finished(&self) -> bool {
        self.rounds.iter().all(Round::completed)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Track sessions until every round is completed.
    ///
    /// Each session is marked `Skipped` before its countdown and `Done` after
    /// it, with a snapshot saved to the log on both transitions. Dropping the
    /// returned future mid-countdown therefore leaves the session recorded as
    /// skipped, and the next call moves past it.
    pub async fn start(&mut self, mut show_time: impl FnMut(&Tick), sound: &SoundConfig) {
        while let Some(round_idx) = self.select_round() {
            let round = &mut self.rounds[round_idx];
            let session = round.current_session().clone();
            round.update_session(SessionStatus::Skipped);
            let session_no = round.current_session_idx() + 1;
            self.log.save_rounds(&self.rounds);

            tracing::info!(
                round = round_idx + 1,
                session = session_no,
                session_type = %session.session_type,
                length_min = session.length,
                "session started"
            );

            let mut remaining = session.duration();
            let mut last = Instant::now();
            while !remaining.is_zero() {
                let tick = Tick {
                    remaining_secs: ceil_secs(remaining),
                    round: round_idx + 1,
                    session: session_no,
                    session_type: session.session_type,
                };
                tracing::trace!(remaining_secs = tick.remaining_secs, "tick");
                show_time(&tick);

                time::sleep(TICK).await;
                let now = Instant::now();
                remaining = remaining.saturating_sub(now.duration_since(last));
                last = now;
            }

            self.rounds[round_idx].update_session(SessionStatus::Done);
            self.log.save_rounds(&self.rounds);
            tracing::info!(round = round_idx + 1, session = session_no, "session done");

            if sound.sound {
                self.notifier.notify(Path::new(&sound.path));
            }
        }
        tracing::debug!("all rounds completed");
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Round to track next, or `None` when the last one is completed.
    ///
    /// Moves past at most one completed round per call and never goes back.
    fn select_round(&mut self) -> Option<usize> {
        let last_idx = self.rounds.len().checked_sub(1)?;
        if self.rounds[self.current_round_idx].completed() && self.current_round_idx < last_idx {
            self.current_round_idx += 1;
            tracing::debug!(round = self.current_round_idx + 1, "moving to next round");
        }

        if self.rounds[self.current_round_idx].completed() {
            None
        } else {
            Some(self.current_round_idx)
        }
    }
}

fn ceil_secs(d: Duration) -> u64 {
    d.as_secs() + u64::from(d.subsec_nanos() > 0)
}
