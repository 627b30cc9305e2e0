use std::fs;
use std::path::{Path, PathBuf};

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Minimum per-axis movement before a pointer sample is recorded
pub const TOUCH_TOLERANCE: f32 = 4.0;
/// Upper bound of the width selector
pub const MAX_STROKE_WIDTH: u32 = 100;
pub const DEFAULT_STROKE_WIDTH: u32 = 20;
pub const DEFAULT_PALETTE_COLUMNS: usize = 5;

/// Environment variable pointing at a JSON config file
pub const CONFIG_ENV_VAR: &str = "WHITEBOARD_CONFIG";

/// Static configuration for a canvas and its tool panel.
///
/// Every field has a default, so a config file only needs to name the values
/// it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Samples closer than this on both axes are dropped as jitter
    pub touch_tolerance: f32,
    pub background: Color32,
    pub initial_color: Color32,
    pub initial_width: u32,
    pub max_width: u32,
    /// Swatches offered by the color picker
    pub palette: Vec<Color32>,
    pub palette_columns: usize,
    /// Directory saved images are written to
    pub export_dir: PathBuf,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            touch_tolerance: TOUCH_TOLERANCE,
            background: Color32::WHITE,
            initial_color: Color32::GREEN,
            initial_width: DEFAULT_STROKE_WIDTH,
            max_width: MAX_STROKE_WIDTH,
            palette: default_palette(),
            palette_columns: DEFAULT_PALETTE_COLUMNS,
            export_dir: PathBuf::from("."),
        }
    }
}

impl CanvasConfig {
    /// Parse a config from a JSON string and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded canvas config from {}", path.display());
        Ok(config)
    }

    /// Load the config named by `WHITEBOARD_CONFIG`, or the defaults when unset
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.touch_tolerance.is_finite() || self.touch_tolerance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "touch_tolerance must be a non-negative number, got {}",
                self.touch_tolerance
            )));
        }
        if self.max_width == 0 {
            return Err(ConfigError::Invalid("max_width must be positive".to_owned()));
        }
        if self.initial_width > self.max_width {
            return Err(ConfigError::Invalid(format!(
                "initial_width {} exceeds max_width {}",
                self.initial_width, self.max_width
            )));
        }
        if self.palette_columns == 0 {
            return Err(ConfigError::Invalid("palette_columns must be positive".to_owned()));
        }
        Ok(())
    }
}

fn default_palette() -> Vec<Color32> {
    [
        0xf44336, 0xe91e63, 0x9c27b0, 0x673ab7, 0x3f51b5, //
        0x2196f3, 0x03a9f4, 0x00bcd4, 0x009688, 0x4caf50, //
        0x8bc34a, 0xcddc39, 0xffeb3b, 0xffc107, 0xff9800, //
        0xff5722, 0x795548, 0x9e9e9e, 0x607d8b, 0x000000,
    ]
    .into_iter()
    .map(|rgb: u32| Color32::from_rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8))
    .collect()
}
