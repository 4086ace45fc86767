//! Configuration loading and validation

use anyhow::Result;
use gridmark_server::GridSettings;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub broadcast: BroadcastConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_rows")]
    pub rows: u32,
    #[serde(default = "default_cols")]
    pub cols: u32,
    /// Distance between neighboring markers, in meters
    #[serde(default = "default_spacing")]
    pub spacing: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            spacing: default_spacing(),
        }
    }
}

fn default_rows() -> u32 {
    5
}

fn default_cols() -> u32 {
    5
}

fn default_spacing() -> f64 {
    2.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastConfig {
    /// Tick period of the frame broadcaster in milliseconds
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval(),
        }
    }
}

fn default_tick_interval() -> u64 {
    10
}

impl Config {
    /// Convert to GridSettings
    pub fn grid_settings(&self) -> GridSettings {
        GridSettings {
            rows: self.grid.rows,
            cols: self.grid.cols,
            spacing: self.grid.spacing,
        }
    }

    /// Tick period of the frame broadcaster
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.broadcast.tick_interval_ms)
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    } else {
        info!(
            path = %path.display(),
            "Configuration file not found, using defaults"
        );
        Ok(Config::default())
    }
}
