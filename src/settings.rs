//! Game settings
//!
//! Loaded from an optional JSON file. Every field has a default, so a file
//! only needs the keys it changes.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::consts::{POWERUP_SPAWN_CHANCE, TICK_HZ};
use crate::sim::{ControlMode, GameState};

/// Environment variable naming a settings file
pub const SETTINGS_ENV: &str = "BRICK_BREAKER_SETTINGS";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; derived from the clock when absent
    pub seed: Option<u64>,
    /// Start with the paddle on autopilot
    pub autopilot: bool,
    /// Simulation ticks per second
    pub tick_hz: u32,
    /// Chance that a destroyed brick drops a power-up
    pub power_up_chance: f64,
    /// Treat a key as released after this long without a repeat
    /// (terminals that never report releases)
    pub key_release_timeout_ms: u64,
    /// Capture mouse motion as pointer input
    pub mouse: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            autopilot: true,
            tick_hz: TICK_HZ,
            power_up_chance: POWERUP_SPAWN_CHANCE,
            key_release_timeout_ms: 250,
            mouse: true,
        }
    }
}

impl Settings {
    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json).context("invalid settings JSON")?;
        Ok(settings.sanitized())
    }

    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let settings = Self::from_json(&json)
                    .with_context(|| format!("reading settings from {}", path.display()))?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("{} not found, using default settings", path.display());
                Ok(Self::default())
            }
            Err(err) => {
                Err(err).with_context(|| format!("reading settings from {}", path.display()))
            }
        }
    }

    /// Load from `path` if given, else from `$BRICK_BREAKER_SETTINGS`, else defaults
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match std::env::var_os(SETTINGS_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Pretty JSON, suitable as a settings file
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Clamp out-of-range values instead of rejecting them
    fn sanitized(mut self) -> Self {
        self.tick_hz = self.tick_hz.clamp(1, 1000);
        if !self.power_up_chance.is_finite() {
            self.power_up_chance = POWERUP_SPAWN_CHANCE;
        }
        self.power_up_chance = self.power_up_chance.clamp(0.0, 1.0);
        self
    }

    /// Wall-clock length of one tick
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.tick_hz.max(1)))
    }

    /// The configured seed, or one derived from the system clock
    pub fn seed_or_clock(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }

    /// Build a fresh round in the Ready phase
    pub fn new_game(&self) -> GameState {
        let mut state = GameState::new(self.seed_or_clock());
        state.power_up_chance = self.power_up_chance;
        if !self.autopilot {
            state.control = ControlMode::Keyboard;
        }
        state
    }

    /// Like [`Settings::new_game`], but the paddle is always on autopilot
    pub fn new_headless_game(&self) -> GameState {
        let mut state = self.new_game();
        state.control = ControlMode::Autopilot;
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.tick_hz, 60);
        assert!(settings.autopilot);
        assert_eq!(settings.power_up_chance, 0.3);
        assert_eq!(settings.tick_duration(), Duration::from_secs_f64(1.0 / 60.0));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 42, "autopilot": false }"#).unwrap();
        assert_eq!(settings.seed, Some(42));
        assert!(!settings.autopilot);
        assert_eq!(settings.tick_hz, 60);
        assert!(settings.mouse);
    }

    #[test]
    fn test_out_of_range_values_clamped() {
        let settings =
            Settings::from_json(r#"{ "tick_hz": 0, "power_up_chance": 3.5 }"#).unwrap();
        assert_eq!(settings.tick_hz, 1);
        assert_eq!(settings.power_up_chance, 1.0);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Settings::from_json("{ seed: ").is_err());
        assert!(Settings::from_json(r#"{ "seed": "abc" }"#).is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = std::env::temp_dir().join("brick-breaker-no-such-settings.json");
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_written_file_loads_back() {
        let path = std::env::temp_dir().join(format!(
            "brick-breaker-settings-{}.json",
            std::process::id()
        ));
        let settings = Settings {
            seed: Some(7),
            autopilot: false,
            ..Default::default()
        };
        std::fs::write(&path, settings.to_json().unwrap()).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_new_game_applies_settings() {
        let settings = Settings {
            seed: Some(11),
            autopilot: false,
            power_up_chance: 0.0,
            ..Default::default()
        };
        let state = settings.new_game();
        assert_eq!(state.seed, 11);
        assert_eq!(state.control, ControlMode::Keyboard);
        assert_eq!(state.power_up_chance, 0.0);
    }

    #[test]
    fn test_headless_game_always_autopilot() {
        let settings = Settings {
            seed: Some(5),
            autopilot: false,
            power_up_chance: 0.5,
            ..Default::default()
        };
        assert_eq!(settings.new_game().control, ControlMode::Keyboard);

        let state = settings.new_headless_game();
        assert_eq!(state.control, ControlMode::Autopilot);
        assert_eq!(state.seed, 5);
        assert_eq!(state.power_up_chance, 0.5);
    }
}
