//! Terminal output: banner, live countdown line and the results plot.

use std::io::{self, Write};

use focusedme_core::{RoundSummary, Tick};

const BANNER: &str = r"  __                              _ __  __
 / _|                            | |  \/  |
| |_ ___   ___ _   _ ___  ___  __| | \  / | ___
|  _/ _ \ / __| | | / __|/ _ \/ _` | |\/| |/ _ \
| || (_) | (__| |_| \__ \  __/ (_| | |  | |  __/
|_| \___/ \___|\__,_|___/\___|\__,_|_|  |_|\___|";

const RESULTS: &str = r"  _   _   _   _     _   _   _   _   _   _   _
 / \ / \ / \ / \   / \ / \ / \ / \ / \ / \ / \
( Y | o | u | r ) ( r | e | s | u | l | t | s )
 \_/ \_/ \_/ \_/   \_/ \_/ \_/ \_/ \_/ \_/ \_/ ";

const LEGEND: &str = "[legend: (X) completed sessions, (O) skipped sessions]";
const GOODBYE: &str = "\n\nThanks for using focusedMe. Goodbye!\n\n";

pub struct View {
    focus_time: u32,
}

impl View {
    pub fn new(focus_time: u32) -> Self {
        Self { focus_time }
    }

    pub fn banner(&self) {
        println!("{BANNER} \n");
        println!(" __ A Pomodoro Timer ___\n\n");
    }

    /// Redraw the countdown line in place.
    pub fn show_time(&self, tick: &Tick) {
        let mut stdout = io::stdout();
        let _ = write!(stdout, "{}\r", countdown_line(tick));
        let _ = stdout.flush();
    }

    pub fn plot(&self, summary: &[RoundSummary]) {
        print!("{}", render_results(summary, self.focus_time));
    }

    pub fn skipping(&self) {
        println!("\n\nSkipping to next session..\n\n");
    }

    pub fn goodbye(&self) {
        print!("{GOODBYE}");
        let _ = io::stdout().flush();
    }
}

fn format_time(remaining_secs: u64) -> String {
    let (minutes, seconds) = (remaining_secs / 60, remaining_secs % 60);
    format!("{minutes:02}min {seconds:02}s remaining   ")
}

fn countdown_line(tick: &Tick) -> String {
    format!(
        "Round {} / Session {} - {} :  {}",
        tick.round,
        tick.session,
        tick.session_type.label().replace('_', " ").to_uppercase(),
        format_time(tick.remaining_secs)
    )
}

fn render_results(summary: &[RoundSummary], focus_time: u32) -> String {
    let mut out = format!("\n\n{RESULTS}\n\n");
    for round in summary {
        out.push_str(&format!("{}\n", round.header));
        out.push_str(&format!(
            "{} - {} minutes\n\n",
            round.marks,
            round.focused_minutes(focus_time)
        ));
    }
    out.push_str(LEGEND);
    out.push('\n');
    out.push_str(&"_".repeat(LEGEND.len()));
    out.push_str("\n\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use focusedme_core::SessionType;

    #[test]
    fn format_time_pads_minutes_and_seconds() {
        assert_eq!(format_time(1500), "25min 00s remaining   ");
        assert_eq!(format_time(61), "01min 01s remaining   ");
        assert_eq!(format_time(0), "00min 00s remaining   ");
    }

    #[test]
    fn countdown_line_names_session_type() {
        let tick = Tick {
            remaining_secs: 299,
            round: 2,
            session: 4,
            session_type: SessionType::ShortBreak,
        };
        assert_eq!(
            countdown_line(&tick),
            "Round 2 / Session 4 - SHORT BREAK :  04min 59s remaining   "
        );
    }

    #[test]
    fn results_show_marks_and_focused_minutes() {
        let summary = vec![
            RoundSummary {
                header: "Round #1: ".into(),
                marks: "XXOX".into(),
            },
            RoundSummary {
                header: "Round #2: ".into(),
                marks: "OOOO".into(),
            },
        ];
        let out = render_results(&summary, 25);

        assert!(out.contains("Round #1: \nXXOX - 75 minutes\n"));
        assert!(out.contains("Round #2: \nOOOO - 0 minutes\n"));
        assert!(out.contains(LEGEND));
    }
}
