//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Session durations and the number of rounds
//! - Whether to ring at the end of a session, and which sound file to play
//!
//! Configuration is stored at `~/.config/focusedme/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, Result, ValidationError};
use crate::timer::{SessionLengths, SessionType};

/// Sound file rung when a session ends, relative to the config directory.
pub const DEFAULT_SOUND_FILE: &str = "Ring01.wav";

/// Session durations (minutes) and round count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationConfig {
    #[serde(default = "default_focus_time")]
    pub focus_time: u32,
    #[serde(default = "default_short_break")]
    pub short_break: u32,
    #[serde(default = "default_long_break")]
    pub long_break: u32,
    #[serde(default = "default_num_rounds")]
    pub num_rounds: u32,
}

/// Notification sound configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundConfig {
    #[serde(default = "default_true")]
    pub sound: bool,
    /// Sound file to play. Relative paths live in the config directory.
    #[serde(default = "default_sound_path")]
    pub path: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/focusedme/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub durations: DurationConfig,
    #[serde(default)]
    pub sound: SoundConfig,
}

// Default functions
fn default_focus_time() -> u32 {
    25
}
fn default_short_break() -> u32 {
    5
}
fn default_long_break() -> u32 {
    25
}
fn default_num_rounds() -> u32 {
    3
}
fn default_true() -> bool {
    true
}
fn default_sound_path() -> String {
    DEFAULT_SOUND_FILE.into()
}

impl Default for DurationConfig {
    fn default() -> Self {
        Self {
            focus_time: default_focus_time(),
            short_break: default_short_break(),
            long_break: default_long_break(),
            num_rounds: default_num_rounds(),
        }
    }
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            sound: true,
            path: default_sound_path(),
        }
    }
}

impl DurationConfig {
    /// Reject zero durations and a zero round count.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("focus_time", self.focus_time),
            ("short_break", self.short_break),
            ("long_break", self.long_break),
            ("num_rounds", self.num_rounds),
        ];
        for (field, value) in fields {
            if value == 0 {
                return Err(ValidationError::InvalidValue {
                    field: field.into(),
                    message: "must be a positive integer".into(),
                });
            }
        }
        Ok(())
    }

    pub fn session_lengths(&self) -> SessionLengths {
        SessionLengths::from([
            (SessionType::FocusTime, self.focus_time),
            (SessionType::ShortBreak, self.short_break),
            (SessionType::LongBreak, self.long_break),
        ])
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => value
                    .parse::<bool>()
                    .map(serde_json::Value::Bool)
                    .map_err(|_| invalid(format!("cannot parse '{value}' as boolean")))?,
                serde_json::Value::Number(_) => value
                    .parse::<u32>()
                    .map(|n| serde_json::Value::Number(n.into()))
                    .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?,
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    return Err(invalid("not a leaf key".into()));
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Location of the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be created.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file does not exist.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(ConfigError::from)?;
                Ok(cfg)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, writing defaults");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(err) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: err.to_string(),
            }
            .into()),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Same as [`Config::save`].
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. The change is validated but
    /// not saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the resulting durations are invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json)?;
        updated.durations.validate()?;
        *self = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.durations.focus_time, 25);
        assert_eq!(cfg.durations.short_break, 5);
        assert_eq!(cfg.durations.long_break, 25);
        assert_eq!(cfg.durations.num_rounds, 3);
        assert!(cfg.sound.sound);
        assert_eq!(cfg.sound.path, DEFAULT_SOUND_FILE);
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let cfg: Config = toml::from_str("[durations]\nfocus_time = 50\n").unwrap();
        assert_eq!(cfg.durations.focus_time, 50);
        assert_eq!(cfg.durations.short_break, 5);
        assert!(cfg.sound.sound);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("durations.focus_time").as_deref(), Some("25"));
        assert_eq!(cfg.get("sound.sound").as_deref(), Some("true"));
        assert_eq!(cfg.get("sound.path").as_deref(), Some(DEFAULT_SOUND_FILE));
        assert!(cfg.get("durations.missing_key").is_none());
        assert!(cfg.get("durations").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_number_bool_and_string() {
        let mut cfg = Config::default();
        cfg.set("durations.num_rounds", "5").unwrap();
        cfg.set("sound.sound", "false").unwrap();
        cfg.set("sound.path", "/tmp/bell.wav").unwrap();
        assert_eq!(cfg.durations.num_rounds, 5);
        assert!(!cfg.sound.sound);
        assert_eq!(cfg.sound.path, "/tmp/bell.wav");
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("durations.nonexistent", "1"),
            Err(CoreError::Config(ConfigError::UnknownKey(_)))
        ));
        assert!(matches!(
            cfg.set("durations", "1"),
            Err(CoreError::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.set("sound.sound", "loud").is_err());
        assert!(cfg.set("durations.focus_time", "-3").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn set_rejects_zero_duration() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("durations.long_break", "0"),
            Err(CoreError::Validation(_))
        ));
        assert_eq!(cfg.durations.long_break, 25);
    }

    #[test]
    fn validate_names_offending_field() {
        let durations = DurationConfig {
            num_rounds: 0,
            ..DurationConfig::default()
        };
        match durations.validate() {
            Err(ValidationError::InvalidValue { field, .. }) => assert_eq!(field, "num_rounds"),
            other => panic!("expected InvalidValue, got {other:?}"),
        }
        assert!(DurationConfig::default().validate().is_ok());
    }

    #[test]
    fn session_lengths_cover_every_session_type() {
        let lengths = DurationConfig::default().session_lengths();
        assert_eq!(lengths.get(&SessionType::FocusTime), Some(&25));
        assert_eq!(lengths.get(&SessionType::ShortBreak), Some(&5));
        assert_eq!(lengths.get(&SessionType::LongBreak), Some(&25));
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.set("durations.focus_time", "40").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.durations.focus_time, 40);
    }

    #[test]
    fn load_from_malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[durations]\nfocus_time = \"soon\"\n").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(CoreError::Config(ConfigError::ParseFailed(_)))
        ));
    }
}
