//! Startup settings, read from `settings.json` next to the executable's working directory.
//!
//! Every field has a default, so a partial file (or no file at all) is fine.

use crate::error::LoadError;
use crate::state::PhysicsConstants;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{fs, io};

pub const SETTINGS_FILE: &str = "settings.json";

/// What touching a kill block does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HazardPolicy {
    /// Restart the round: coins back, timer zeroed, player at the start.
    #[default]
    ResetRound,
    /// Detect the contact but keep playing.
    Ignore,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub window_width: i32,
    pub window_height: i32,
    /// Simulation ticks per second
    pub tick_rate_hz: u32,
    pub hazard_policy: HazardPolicy,
    pub asset_dir: PathBuf,
    /// JSON level template; the built-in level is used when unset
    pub level_path: Option<PathBuf>,
    pub physics: PhysicsConstants,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: 600,
            window_height: 480,
            tick_rate_hz: 24,
            hazard_policy: HazardPolicy::default(),
            asset_dir: PathBuf::from("assets"),
            level_path: None,
            physics: PhysicsConstants::default(),
        }
    }
}

impl Settings {
    /// Missing file means defaults. A file that exists but does not parse is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let s = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("no {} found, using default settings", path.display());
                return Ok(Settings::default());
            }
            Err(source) => {
                return Err(LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let settings: Settings = serde_json::from_str(&s).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loaded settings from {}", path.display());
        Ok(settings.sanitized())
    }

    fn sanitized(mut self) -> Self {
        if self.tick_rate_hz == 0 {
            log::warn!("tick_rate_hz of 0 is not usable, falling back to 24");
            self.tick_rate_hz = 24;
        }
        self
    }

    pub fn tick_seconds(&self) -> f64 {
        1.0 / self.tick_rate_hz as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path().join(SETTINGS_FILE)).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.tick_rate_hz, 24);
        assert_eq!(settings.physics.jump_power, 11.0);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(
            &path,
            r#"{ "hazard_policy": "ignore", "physics": { "gravity": 0.25 } }"#,
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.hazard_policy, HazardPolicy::Ignore);
        assert_eq!(settings.physics.gravity, 0.25);
        assert_eq!(settings.physics.run_speed, 5.0);
        assert_eq!(settings.window_width, 600);
    }

    #[test]
    fn test_zero_tick_rate_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, r#"{ "tick_rate_hz": 0 }"#).unwrap();
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.tick_rate_hz, 24);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Settings::load(&path),
            Err(LoadError::Json { .. })
        ));
    }
}
