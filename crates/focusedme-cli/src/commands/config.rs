//! `focusedme config`: inspect and edit the saved durations and sound settings.
//!
//! Keys are dot paths into the TOML file, e.g. `durations.num_rounds` or
//! `sound.path`. Every change is validated before it is written back.

use clap::Subcommand;
use focusedme_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one saved setting
    Get {
        /// Dot path of the setting, e.g. "durations.focus_time"
        key: String,
    },
    /// Change one saved setting
    Set {
        /// Dot path of the setting, e.g. "sound.sound"
        key: String,
        /// Minutes, round count, true/false or a file path
        value: String,
    },
    /// Print every saved setting as JSON
    List,
    /// Overwrite the settings with the built-in defaults
    Reset,
    /// Print where the settings file lives
    Path,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let value = Config::load()?
                .get(&key)
                .ok_or_else(|| format!("no setting named '{key}'"))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("{key} = {value}");
        }
        ConfigAction::List => {
            println!("{}", serde_json::to_string_pretty(&Config::load()?)?);
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("restored default settings in {}", Config::path()?.display());
        }
        ConfigAction::Path => {
            println!("{}", Config::path()?.display());
        }
    }
    Ok(())
}
