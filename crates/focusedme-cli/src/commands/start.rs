//! Default command: run the Pomodoro rounds in the terminal.
//!
//! The tracker future is raced against Ctrl-C. On interrupt the future is
//! dropped and the user picks what happens next; skipping just starts the
//! tracker again over the same rounds.

use std::error::Error;
use std::future::Future;
use std::io::{self, BufRead, Write};
use std::path::Path;

use clap::Args;
use focusedme_core::storage::data_dir;
use focusedme_core::storage::DEFAULT_SOUND_FILE;
use focusedme_core::{create_rounds, Config, Log, SoundConfig, Tracker};

use crate::notifier::SystemNotifier;
use crate::view::View;

#[derive(Args, Debug, Default)]
pub struct TimerArgs {
    /// Duration in minutes of the focus session
    #[arg(short = 'f', long, value_name = "MIN")]
    pub focus_time: Option<u32>,
    /// Duration in minutes of the short break
    #[arg(short = 's', long, value_name = "MIN")]
    pub short_break: Option<u32>,
    /// Duration in minutes of the long break
    #[arg(short = 'l', long, value_name = "MIN")]
    pub long_break: Option<u32>,
    /// Number of rounds
    #[arg(short = 'r', long, value_name = "N")]
    pub num_rounds: Option<u32>,
    /// Do not ring at the end of a session
    #[arg(long)]
    pub no_sound: bool,
    /// Save the given values as the new defaults
    #[arg(long)]
    pub save: bool,
}

impl TimerArgs {
    /// Overlay the flags that were given on top of `config`.
    fn apply(&self, config: &mut Config) {
        let durations = &mut config.durations;
        if let Some(v) = self.focus_time {
            durations.focus_time = v;
        }
        if let Some(v) = self.short_break {
            durations.short_break = v;
        }
        if let Some(v) = self.long_break {
            durations.long_break = v;
        }
        if let Some(v) = self.num_rounds {
            durations.num_rounds = v;
        }
        if self.no_sound {
            config.sound.sound = false;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UserCommand {
    Skip,
    Plot,
    Quit,
}

impl UserCommand {
    fn parse(input: &str) -> Self {
        match input.trim().to_uppercase().as_str() {
            "S" => UserCommand::Skip,
            "P" => UserCommand::Plot,
            _ => UserCommand::Quit,
        }
    }
}

enum Outcome {
    Finished,
    Interrupted,
}

pub fn run(args: TimerArgs) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load()?;
    args.apply(&mut config);
    config.durations.validate()?;

    if args.save {
        config.save()?;
        tracing::info!(path = %Config::path()?.display(), "saved defaults");
    }

    let view = View::new(config.durations.focus_time);
    view.banner();

    let rounds = create_rounds(
        &config.durations.session_lengths(),
        config.durations.num_rounds as usize,
    )?;
    let sound = SoundConfig {
        path: resolve_sound_path(&config.sound.path)?,
        ..config.sound.clone()
    };
    if let Some(missing) = missing_custom_sound(&config.sound, &sound.path) {
        tracing::warn!(path = %missing, "sound file not found, falling back to the terminal bell");
    }
    let mut tracker = Tracker::new(rounds, Log::new()).with_notifier(SystemNotifier);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(drive(&mut tracker, &view, &sound));
    // a prompt abandoned by Ctrl-C leaves a blocking stdin read behind
    runtime.shutdown_background();
    result
}

async fn drive(
    tracker: &mut Tracker,
    view: &View,
    sound: &SoundConfig,
) -> Result<(), Box<dyn Error>> {
    loop {
        let outcome = tokio::select! {
            () = tracker.start(|tick| view.show_time(tick), sound) => Outcome::Finished,
            res = tokio::signal::ctrl_c() => {
                res?;
                Outcome::Interrupted
            }
        };

        match outcome {
            Outcome::Finished => {
                tracker.log().plot_results(|summary| view.plot(summary));
                view.goodbye();
                return Ok(());
            }
            Outcome::Interrupted => match prompt().await? {
                UserCommand::Skip => view.skipping(),
                UserCommand::Plot => {
                    tracker.log().plot_results(|summary| view.plot(summary));
                    view.goodbye();
                    return Ok(());
                }
                UserCommand::Quit => {
                    view.goodbye();
                    return Ok(());
                }
            },
        }
    }
}

/// Ask what to do after an interrupt. A second Ctrl-C at the prompt quits.
async fn prompt() -> io::Result<UserCommand> {
    let mut stdout = io::stdout();
    write!(
        stdout,
        "\n\nWhat would you like to do?\n\n[S]kip current session, [P]lot summary, [ANY] other key to Quit : "
    )?;
    stdout.flush()?;

    let line = async {
        match tokio::task::spawn_blocking(read_stdin_line).await {
            Ok(read) => read,
            Err(err) => Err(io::Error::other(err)),
        }
    };
    choose_command(line, tokio::signal::ctrl_c()).await
}

/// `None` at end of input.
fn read_stdin_line() -> io::Result<Option<String>> {
    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;
    Ok((read > 0).then_some(line))
}

/// Whichever comes first: a line of input or an interrupt. End of input and
/// interrupts both mean quit.
async fn choose_command(
    line: impl Future<Output = io::Result<Option<String>>>,
    interrupt: impl Future<Output = io::Result<()>>,
) -> io::Result<UserCommand> {
    tokio::select! {
        line = line => Ok(line?.map_or(UserCommand::Quit, |l| UserCommand::parse(&l))),
        res = interrupt => {
            res?;
            Ok(UserCommand::Quit)
        }
    }
}

/// Relative sound paths live in the config directory.
fn resolve_sound_path(path: &str) -> Result<String, Box<dyn Error>> {
    if Path::new(path).is_absolute() {
        return Ok(path.to_string());
    }
    Ok(data_dir()?.join(path).to_string_lossy().into_owned())
}

/// A configured sound file that does not exist. The stock file is optional,
/// so its absence is not reported.
fn missing_custom_sound(configured: &SoundConfig, resolved: &str) -> Option<String> {
    let custom = configured.sound && configured.path != DEFAULT_SOUND_FILE;
    (custom && !Path::new(resolved).is_file()).then(|| resolved.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_command_parses_case_insensitively() {
        assert_eq!(UserCommand::parse("s\n"), UserCommand::Skip);
        assert_eq!(UserCommand::parse(" S "), UserCommand::Skip);
        assert_eq!(UserCommand::parse("p"), UserCommand::Plot);
        assert_eq!(UserCommand::parse("q"), UserCommand::Quit);
        assert_eq!(UserCommand::parse(""), UserCommand::Quit);
        assert_eq!(UserCommand::parse("skip"), UserCommand::Quit);
    }

    #[tokio::test]
    async fn input_line_picks_command() {
        let cmd = choose_command(
            async { Ok(Some("p\n".to_string())) },
            std::future::pending(),
        )
        .await
        .unwrap();
        assert_eq!(cmd, UserCommand::Plot);
    }

    #[tokio::test]
    async fn interrupt_at_prompt_quits() {
        let cmd = choose_command(std::future::pending(), async { Ok(()) })
            .await
            .unwrap();
        assert_eq!(cmd, UserCommand::Quit);
    }

    #[tokio::test]
    async fn end_of_input_quits() {
        let cmd = choose_command(async { Ok(None) }, std::future::pending())
            .await
            .unwrap();
        assert_eq!(cmd, UserCommand::Quit);
    }

    #[test]
    fn apply_overrides_only_given_flags() {
        let mut config = Config::default();
        let args = TimerArgs {
            focus_time: Some(50),
            num_rounds: Some(1),
            no_sound: true,
            ..TimerArgs::default()
        };
        args.apply(&mut config);

        assert_eq!(config.durations.focus_time, 50);
        assert_eq!(config.durations.short_break, 5);
        assert_eq!(config.durations.long_break, 25);
        assert_eq!(config.durations.num_rounds, 1);
        assert!(!config.sound.sound);
    }

    #[test]
    fn only_missing_custom_sound_is_reported() {
        let stock = SoundConfig::default();
        assert_eq!(missing_custom_sound(&stock, "/nowhere/Ring01.wav"), None);

        let custom = SoundConfig {
            path: "/nowhere/chime.wav".into(),
            ..SoundConfig::default()
        };
        assert_eq!(
            missing_custom_sound(&custom, "/nowhere/chime.wav").as_deref(),
            Some("/nowhere/chime.wav")
        );

        let muted = SoundConfig {
            sound: false,
            ..custom
        };
        assert_eq!(missing_custom_sound(&muted, "/nowhere/chime.wav"), None);

        let present = tempfile::NamedTempFile::new().unwrap();
        let present = present.path().to_string_lossy().into_owned();
        let existing = SoundConfig {
            path: present.clone(),
            ..SoundConfig::default()
        };
        assert_eq!(missing_custom_sound(&existing, &present), None);
    }

    #[test]
    fn absolute_sound_path_is_kept() {
        let path = std::env::temp_dir().join("bell.wav");
        let path = path.to_string_lossy().into_owned();
        assert_eq!(resolve_sound_path(&path).unwrap(), path);
    }
}
