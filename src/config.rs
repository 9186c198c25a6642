//! Arena and loop configuration
//!
//! Loaded from JSON by the host. Every field has a default, so a partial
//! file only overrides what it names.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::ToroidalSpace;

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Value out of range
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Session and clock settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Arena width in world units
    pub width: f32,
    /// Arena height in world units
    pub height: f32,
    /// RNG seed for asteroid placement and velocities
    pub seed: u64,
    /// Fixed tick rate
    pub tick_rate_hz: u32,
    /// Asteroids spawned on level 1
    pub initial_asteroids: u32,
    /// Delay between a ship hit and its replacement (ms)
    pub respawn_delay_ms: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            seed: 0x5eed,
            tick_rate_hz: TICK_RATE_HZ,
            initial_asteroids: INITIAL_ASTEROIDS,
            respawn_delay_ms: RESPAWN_DELAY_MS,
        }
    }
}

impl SimConfig {
    /// Default config with a specific seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Length of one simulation tick in milliseconds
    pub fn tick_ms(&self) -> f32 {
        1000.0 / self.tick_rate_hz.max(1) as f32
    }

    /// The toroidal arena described by this config
    pub fn space(&self) -> ToroidalSpace {
        ToroidalSpace::new(self.width, self.height)
    }

    /// Reject values the sim cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > 0.0 && self.width.is_finite()) {
            return Err(ConfigError::Invalid(format!("width must be positive, got {}", self.width)));
        }
        if !(self.height > 0.0 && self.height.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "height must be positive, got {}",
                self.height
            )));
        }
        if self.tick_rate_hz == 0 {
            return Err(ConfigError::Invalid("tick_rate_hz must be non-zero".into()));
        }
        if self.initial_asteroids == 0 {
            return Err(ConfigError::Invalid("initial_asteroids must be non-zero".into()));
        }
        if !(self.respawn_delay_ms >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "respawn_delay_ms must be non-negative, got {}",
                self.respawn_delay_ms
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json(&contents).inspect_err(|e| {
            log::warn!("Rejected config {}: {}", path.display(), e);
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
