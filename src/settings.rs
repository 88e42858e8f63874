//! Game settings
//!
//! Read from an optional JSON file; every field falls back to its default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};
use crate::sim::Physics;

/// Tunable game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Simulation ticks per second
    pub fps: u32,
    /// Upward speed given by an impulse (units/s)
    pub initial_velocity: f64,
    /// Downward acceleration (units/s²)
    pub gravity: f64,
    /// Seconds after an impulse during which input is not read
    pub impulse_cooldown: f64,
    /// Show the debug overlay when a run starts
    pub show_debug: bool,
    /// Gate generator seed. Random when absent.
    pub seed: Option<u64>,
    /// Play sound cues (only with the `sound` feature)
    pub sound: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            initial_velocity: DEFAULT_INITIAL_VELOCITY,
            gravity: DEFAULT_GRAVITY,
            impulse_cooldown: DEFAULT_IMPULSE_COOLDOWN,
            show_debug: true,
            seed: None,
            sound: true,
        }
    }
}

impl Settings {
    /// Load and validate settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| Error::SettingsRead {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings = serde_json::from_str(&json).map_err(|source| Error::Settings {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fps == 0 {
            return Err(Error::InvalidSettings("fps must be at least 1".into()));
        }
        if !(self.initial_velocity.is_finite() && self.initial_velocity > 0.0) {
            return Err(Error::InvalidSettings(
                "initial_velocity must be a positive number".into(),
            ));
        }
        if !(self.gravity.is_finite() && self.gravity > 0.0) {
            return Err(Error::InvalidSettings(
                "gravity must be a positive number".into(),
            ));
        }
        if !(self.impulse_cooldown.is_finite() && self.impulse_cooldown >= 0.0) {
            return Err(Error::InvalidSettings(
                "impulse_cooldown must be zero or more seconds".into(),
            ));
        }
        Ok(())
    }

    /// Simulation parameters for a run
    pub fn physics(&self) -> Physics {
        Physics {
            fps: self.fps,
            initial_velocity: self.initial_velocity,
            gravity: self.gravity,
            impulse_cooldown: self.impulse_cooldown,
        }
    }
}
