use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BLOCK_SIZE, DEFAULT_ITEMS_PER_SLOT, DEFAULT_WINDOW_SIZE, DEFAULT_ZOOM_LEVELS,
};
use crate::errors::{MergeError, Result};

/// Settings for one merge session.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MergeConfig {
    /// Zoom levels to build in the output.
    pub zoom_levels: u32,
    pub compress: bool,
    pub block_size: u32,
    pub items_per_slot: u32,
    /// Positions requested from an input at a time.
    pub window_size: u32,
    /// Collapse contiguous positions holding the same value into one interval.
    pub coalesce_runs: bool,
    /// Treat inputs disagreeing on a chromosome length as an error instead of a warning.
    pub strict_lengths: bool,
    pub threads: usize,
    pub progress: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        MergeConfig {
            zoom_levels: DEFAULT_ZOOM_LEVELS,
            compress: true,
            block_size: DEFAULT_BLOCK_SIZE,
            items_per_slot: DEFAULT_ITEMS_PER_SLOT,
            window_size: DEFAULT_WINDOW_SIZE,
            coalesce_runs: false,
            strict_lengths: false,
            threads: 1,
            progress: false,
        }
    }
}

impl MergeConfig {
    ///
    /// Load a merge config from a toml file. Missing keys keep their defaults.
    ///
    /// # Arguments
    /// - path: Path to the config file (a .toml) file.
    pub fn try_from(path: &Path) -> Result<MergeConfig> {
        let toml_str = read_to_string(path).map_err(|e| {
            MergeError::Configuration(format!("can't read {}: {}", path.display(), e))
        })?;
        let config: MergeConfig = toml::from_str(&toml_str).map_err(|e| {
            MergeError::Configuration(format!("can't parse {}: {}", path.display(), e))
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(MergeError::Configuration(
                "window_size must be greater than zero".to_string(),
            ));
        }
        if self.threads == 0 {
            return Err(MergeError::Configuration(
                "threads must be greater than zero".to_string(),
            ));
        }
        if self.block_size == 0 || self.items_per_slot == 0 {
            return Err(MergeError::Configuration(
                "block_size and items_per_slot must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
