// config.rs - Simulation configuration loaded from YAML
//
// Every field has a default, so an empty document (or no file at all) gives
// the stock 200x150 board at 20 px per cell.

use std::path::Path;

use serde::Deserialize;

use crate::render::{Color, Palette};

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse config YAML: {source}")]
    Yaml { source: serde_yml::Error },

    #[error("invalid configuration: {reason}")]
    Invalid { reason: String },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

impl ConfigError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub palette: Palette,
}

impl SimConfig {
    /// Load and validate configuration from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Load from `path` when given, otherwise use the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::from_file)
    }

    /// Parse and validate configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yml turns an empty document into a unit value, not a map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(ConfigError::invalid(format!(
                "grid dimensions {}x{} must both be at least 1",
                self.grid.width, self.grid.height
            )));
        }

        let vp = &self.viewport;
        if !(vp.min_cell_size > 0.0 && vp.max_cell_size.is_finite()) {
            return Err(ConfigError::invalid(
                "viewport cell size bounds must be positive and finite",
            ));
        }
        if vp.min_cell_size > vp.max_cell_size {
            return Err(ConfigError::invalid(format!(
                "min_cell_size {} exceeds max_cell_size {}",
                vp.min_cell_size, vp.max_cell_size
            )));
        }
        if !(vp.zoom_step > 0.0 && vp.zoom_step.is_finite()) {
            return Err(ConfigError::invalid("zoom_step must be positive"));
        }
        if !vp.cell_size.is_finite() {
            return Err(ConfigError::invalid("cell_size must be finite"));
        }

        if self.playback.speed_ms == 0 {
            return Err(ConfigError::invalid("speed_ms must be at least 1"));
        }
        if self.playback.step_delay_ms == 0 {
            return Err(ConfigError::invalid("step_delay_ms must be at least 1"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_grid_width")]
    pub width: usize,
    #[serde(default = "default_grid_height")]
    pub height: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: default_grid_width(),
            height: default_grid_height(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ViewportConfig {
    /// Starting edge length of one cell in pixels.
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
    #[serde(default = "default_min_cell_size")]
    pub min_cell_size: f32,
    #[serde(default = "default_max_cell_size")]
    pub max_cell_size: f32,
    /// Pixels added or removed per wheel notch.
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            cell_size: default_cell_size(),
            min_cell_size: default_min_cell_size(),
            max_cell_size: default_max_cell_size(),
            zoom_step: default_zoom_step(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PlaybackConfig {
    /// Delay between generations while running continuously.
    #[serde(default = "default_speed_ms")]
    pub speed_ms: u64,
    /// Delay between generations of a finite step chain.
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,
    /// Stop continuous playback when a recent generation repeats.
    #[serde(default)]
    pub stop_on_cycle: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed_ms: default_speed_ms(),
            step_delay_ms: default_step_delay_ms(),
            stop_on_cycle: false,
        }
    }
}

const fn default_grid_width() -> usize {
    200
}

const fn default_grid_height() -> usize {
    150
}

const fn default_cell_size() -> f32 {
    20.0
}

const fn default_min_cell_size() -> f32 {
    5.0
}

const fn default_max_cell_size() -> f32 {
    50.0
}

const fn default_zoom_step() -> f32 {
    2.0
}

const fn default_speed_ms() -> u64 {
    100
}

const fn default_step_delay_ms() -> u64 {
    100
}

pub(crate) fn default_alive() -> Color {
    Color::rgb(0x61, 0xda, 0xfb)
}

pub(crate) fn default_dead() -> Color {
    Color::rgb(0x20, 0x23, 0x2a)
}

pub(crate) fn default_outline() -> Color {
    Color::rgb(0x28, 0x2c, 0x34)
}
