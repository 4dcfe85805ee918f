mod config;

pub use config::{Config, DurationConfig, SoundConfig, DEFAULT_SOUND_FILE};

use std::path::PathBuf;

use crate::error::Result;

/// Returns the configuration directory, creating it if needed.
///
/// `FOCUSEDME_CONFIG_DIR` wins when set. Otherwise the directory is
/// `~/.config/focusedme[-dev]/`, with `FOCUSEDME_ENV=dev` selecting the
/// development one.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("FOCUSEDME_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env =
                std::env::var("FOCUSEDME_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("focusedme-dev")
            } else {
                base_dir.join("focusedme")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
