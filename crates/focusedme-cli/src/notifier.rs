//! End-of-session sound through the platform's command-line audio player.

use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use focusedme_core::Notifier;

/// Plays the sound file with whatever player the OS ships, falling back to the
/// terminal bell. Never waits for playback and never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemNotifier;

impl Notifier for SystemNotifier {
    fn notify(&self, path: &Path) {
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "sound file not found, ringing terminal bell");
            ring_terminal_bell();
            return;
        }

        for mut cmd in player_commands(path) {
            cmd.stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null());
            match cmd.spawn() {
                Ok(mut child) => {
                    // reap in the background so the countdown is not held up
                    std::thread::spawn(move || {
                        let _ = child.wait();
                    });
                    return;
                }
                Err(err) => {
                    tracing::debug!(player = ?cmd.get_program(), error = %err, "audio player unavailable");
                }
            }
        }

        tracing::warn!("no audio player could be started, ringing terminal bell");
        ring_terminal_bell();
    }
}

/// Candidate players in order of preference.
fn player_commands(path: &Path) -> Vec<Command> {
    if cfg!(target_os = "macos") {
        let mut afplay = Command::new("afplay");
        afplay.arg(path);
        vec![afplay]
    } else if cfg!(windows) {
        let script = format!(
            "(New-Object Media.SoundPlayer '{}').PlaySync()",
            path.display().to_string().replace('\'', "''")
        );
        let mut powershell = Command::new("powershell");
        powershell.args(["-NoProfile", "-NonInteractive", "-Command", &script]);
        vec![powershell]
    } else {
        let mut paplay = Command::new("paplay");
        paplay.arg(path);
        let mut aplay = Command::new("aplay");
        aplay.arg("-q").arg(path);
        vec![paplay, aplay]
    }
}

fn ring_terminal_bell() {
    let mut stdout = io::stdout();
    let _ = write!(stdout, "\x07");
    let _ = stdout.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn every_platform_has_a_player() {
        let commands = player_commands(Path::new("/tmp/Ring01.wav"));
        assert!(!commands.is_empty());
        for cmd in &commands {
            assert!(cmd.get_args().any(|a| a.to_string_lossy().contains("Ring01.wav")));
        }
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn missing_sound_file_stays_below_warn() {
        let captured = CapturedLog::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            SystemNotifier.notify(Path::new("/definitely/not/here/Ring01.wav"));
        });

        let logged = String::from_utf8_lossy(&captured.0.lock().unwrap()).into_owned();
        assert!(logged.is_empty(), "unexpected log output: {logged}");
    }
}
