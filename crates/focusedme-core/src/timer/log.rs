//! Snapshot of tracked rounds and the results summary built from it.

use super::round::Round;
use super::session::SessionStatus;

const COMPLETED_MARK: char = 'X';
const SKIPPED_MARK: char = 'O';

/// Per-round line of the results summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    /// `Round #N: ` label, 1-based.
    pub header: String,
    /// One mark per focus session in round order: `X` done, `O` otherwise.
    pub marks: String,
}

impl RoundSummary {
    pub fn completed(&self) -> usize {
        self.marks.chars().filter(|&c| c == COMPLETED_MARK).count()
    }

    pub fn skipped(&self) -> usize {
        self.marks.chars().filter(|&c| c == SKIPPED_MARK).count()
    }

    /// Minutes spent focused, given the configured focus length.
    pub fn focused_minutes(&self, focus_time: u32) -> u64 {
        self.completed() as u64 * u64::from(focus_time)
    }
}

/// Holds the latest snapshot of every round.
#[derive(Debug, Clone, Default)]
pub struct Log {
    tracked_rounds: Vec<Round>,
}

impl Log {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored snapshot with a copy of `rounds`.
    pub fn save_rounds(&mut self, rounds: &[Round]) {
        self.tracked_rounds = rounds.to_vec();
    }

    pub fn tracked_rounds(&self) -> &[Round] {
        &self.tracked_rounds
    }

    pub fn summarize(&self) -> Vec<RoundSummary> {
        self.tracked_rounds
            .iter()
            .enumerate()
            .map(|(i, round)| RoundSummary {
                header: format!("Round #{}: ", i + 1),
                marks: round
                    .sessions()
                    .iter()
                    .filter(|s| s.session_type.is_focus())
                    .map(|s| {
                        if s.status == SessionStatus::Done {
                            COMPLETED_MARK
                        } else {
                            SKIPPED_MARK
                        }
                    })
                    .collect(),
            })
            .collect()
    }

    /// Hand the summary to `render` and return whatever it produces.
    pub fn plot_results<R>(&self, render: impl FnOnce(&[RoundSummary]) -> R) -> R {
        render(&self.summarize())
    }
}
