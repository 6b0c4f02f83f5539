//! TOML-based CLI configuration.
//!
//! Stores the engine's tuned match distance and the default board file
//! location. Serialized to `~/.config/inkdown/config.toml`; the directory
//! can be overridden with `INKDOWN_CONFIG_DIR` (used by tests).

use std::path::PathBuf;

use inkdown_core::reconcile::DEFAULT_MATCH_DISTANCE;
use inkdown_core::{ConfigError, CoreError};
use serde::{Deserialize, Serialize};

fn default_match_distance() -> f64 {
    DEFAULT_MATCH_DISTANCE
}

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Spatial match threshold in content units.
    #[serde(default = "default_match_distance")]
    pub match_distance: f64,
    /// Board file location; defaults to `board.json` next to the config.
    #[serde(default)]
    pub board_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            match_distance: DEFAULT_MATCH_DISTANCE,
            board_path: None,
        }
    }
}

impl Settings {
    /// Directory holding config and default board file.
    pub fn dir() -> PathBuf {
        if let Ok(dir) = std::env::var("INKDOWN_CONFIG_DIR") {
            return PathBuf::from(dir);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("inkdown")
    }

    pub fn path() -> PathBuf {
        Self::dir().join("config.toml")
    }

    /// Load from disk, falling back to defaults when no file exists.
    pub fn load() -> Result<Self, CoreError> {
        let path = Self::path();
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let settings = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
                Ok(settings)
            }
            Err(_) => Ok(Self::default()),
        }
    }

    /// Persist to disk, creating the config directory if needed.
    pub fn save(&self) -> Result<(), CoreError> {
        let path = Self::path();
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::create_dir_all(Self::dir())?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Set a config value by key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        match key {
            "match_distance" => {
                self.match_distance =
                    value.parse().map_err(|_| ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: format!("cannot parse '{value}' as a number"),
                    })?;
            }
            "board_path" => {
                self.board_path = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            _ => {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "unknown config key".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Resolve the board file location, honoring an explicit override.
    pub fn board_path(&self, explicit: Option<PathBuf>) -> PathBuf {
        explicit
            .or_else(|| self.board_path.clone())
            .unwrap_or_else(|| Self::dir().join("board.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_roundtrip() {
        let settings = Settings::default();
        let toml_str = toml::to_string_pretty(&settings).unwrap();
        let back: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(back.match_distance, DEFAULT_MATCH_DISTANCE);
        assert_eq!(back.board_path, None);
    }

    #[test]
    fn set_known_keys() {
        let mut settings = Settings::default();
        settings.set("match_distance", "75.5").unwrap();
        assert_eq!(settings.match_distance, 75.5);
        settings.set("board_path", "/tmp/board.json").unwrap();
        assert_eq!(settings.board_path, Some(PathBuf::from("/tmp/board.json")));
        settings.set("board_path", "").unwrap();
        assert_eq!(settings.board_path, None);
    }

    #[test]
    fn set_unknown_key_fails() {
        let mut settings = Settings::default();
        assert!(settings.set("nope", "1").is_err());
        assert!(settings.set("match_distance", "abc").is_err());
    }

    #[test]
    fn explicit_board_path_wins() {
        let settings = Settings {
            match_distance: 50.0,
            board_path: Some(PathBuf::from("/configured.json")),
        };
        assert_eq!(
            settings.board_path(Some(PathBuf::from("/explicit.json"))),
            PathBuf::from("/explicit.json")
        );
        assert_eq!(
            settings.board_path(None),
            PathBuf::from("/configured.json")
        );
    }
}
