//! Configuration types for island generation and growth.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest accepted grid size; tile counts must stay within `i32`
pub const MAX_ISLAND_SIZE: i32 = 4096;

/// Island grid parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IslandConfig {
    /// Linear size of the square grid
    pub size: i32,
    /// The base island rectangle is inset by `size / border_divisor` on each side
    pub border_divisor: i32,
}

impl Default for IslandConfig {
    fn default() -> Self {
        Self {
            size: 100,
            border_divisor: 10,
        }
    }
}

impl IslandConfig {
    pub fn validate(&self) -> Result<()> {
        if self.size <= 0 {
            return Err(Error::InvalidConfig(format!(
                "grid size must be positive, got {}",
                self.size
            )));
        }
        if self.size > MAX_ISLAND_SIZE {
            return Err(Error::InvalidConfig(format!(
                "grid size must be at most {}, got {}",
                MAX_ISLAND_SIZE, self.size
            )));
        }
        if self.border_divisor < 1 {
            return Err(Error::InvalidConfig(format!(
                "border divisor must be at least 1, got {}",
                self.border_divisor
            )));
        }
        if 2 * self.border() >= self.size {
            return Err(Error::InvalidConfig(format!(
                "border of {} leaves no island on a grid of size {}",
                self.border(),
                self.size
            )));
        }
        Ok(())
    }

    /// Inset of the base island rectangle from each grid edge
    pub fn border(&self) -> i32 {
        self.size / self.border_divisor
    }
}

/// Vegetation growth parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthConfig {
    /// Each tick runs a random number of iterations in `[0, size / iterations_divisor)`
    pub iterations_divisor: i32,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            iterations_divisor: 20,
        }
    }
}

impl GrowthConfig {
    pub fn validate(&self) -> Result<()> {
        if self.iterations_divisor < 1 {
            return Err(Error::InvalidConfig(format!(
                "growth iterations divisor must be at least 1, got {}",
                self.iterations_divisor
            )));
        }
        Ok(())
    }
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Random seed for reproducibility
    pub seed: u64,
    /// Number of growth ticks `run` performs
    pub num_ticks: u64,
    /// Ticks between progress log lines
    pub log_interval: u64,
    pub island: IslandConfig,
    pub growth: GrowthConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            num_ticks: 1_000,
            log_interval: 100,
            island: IslandConfig::default(),
            growth: GrowthConfig::default(),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.log_interval == 0 {
            return Err(Error::InvalidConfig(
                "log interval must be at least 1".to_string(),
            ));
        }
        self.island.validate()?;
        self.growth.validate()
    }

    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: SessionConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }
}
