//! Movement tuning and runtime settings
//!
//! Loaded from a JSON file next to the executable; every field falls back to
//! its default when missing.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Player movement constants (units per tick, rates per second)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    /// Top speed from directional input
    pub run_speed: f32,
    pub run_acceleration: f32,
    /// Acceleration multiplier when input opposes current velocity
    pub reversal_multiplier: f32,
    /// Friction while grounded
    pub run_reduce: f32,
    /// Friction while airborne
    pub fly_reduce: f32,
    pub gravity: f32,
    /// Terminal fall speed
    pub fall_speed: f32,
    /// Vertical impulse applied on jump (negative is up)
    pub jump_speed: f32,
    /// Seconds per loop of the run animation
    pub run_anim_duration: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            run_speed: 1.5,
            run_acceleration: 10.0,
            reversal_multiplier: 3.0,
            run_reduce: 22.0,
            fly_reduce: 12.0,
            gravity: 13.0,
            fall_speed: 3.6,
            jump_speed: -3.0,
            run_anim_duration: 0.6,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Runtime settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tuning: MovementTuning,
    /// Cap on real time fed to the scheduler per host frame (seconds).
    /// `None` lets the accumulator catch up on any backlog.
    pub max_frame_time: Option<f32>,
}

impl Settings {
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Load settings, using defaults if the file is missing or invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::debug!("Using default settings: {}", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            Settings::from_json_str(r#"{ "tuning": { "run_speed": 2.0 } }"#).unwrap();
        assert_eq!(settings.tuning.run_speed, 2.0);
        assert_eq!(settings.tuning.gravity, 13.0);
        assert_eq!(settings.max_frame_time, None);
    }

    #[test]
    fn test_round_trip_json() {
        let settings = Settings {
            max_frame_time: Some(0.25),
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json_str(&json).unwrap(), settings);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(matches!(
            Settings::from_json_str("{ nope"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_or_default("/definitely/not/here/settings.json");
        assert_eq!(settings, Settings::default());
    }
}
