//! Run configuration

use std::path::Path;

use serde::{Deserialize, Serialize};
use sv_core::{ConfigError, Speed};

use crate::catalog::Algorithm;
use crate::input::SIZE_RANGE;

/// Caller-supplied settings for one visualization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    pub algorithm: Algorithm,

    /// Number of generated elements
    pub size: usize,

    /// Playback speed; the delay between operations is `301 - speed` ms
    pub speed: u32,

    /// Advance one operation per request instead of auto-playing
    pub step_mode: bool,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Bubble,
            size: 30,
            speed: 100,
            step_mode: false,
        }
    }
}

impl VisualizerConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !SIZE_RANGE.contains(&self.size) {
            return Err(ConfigError::Size(self.size));
        }
        Speed::new(self.speed)?;
        Ok(())
    }

    pub fn speed(&self) -> Result<Speed, ConfigError> {
        Speed::new(self.speed)
    }
}
