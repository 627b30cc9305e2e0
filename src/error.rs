use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while setting up the drawing surface
#[derive(Debug, Error)]
pub enum CanvasError {
    /// The host measured a size the raster buffer cannot be allocated for
    #[error("Cannot allocate a {width}x{height} raster buffer")]
    InvalidSize { width: u32, height: u32 },
}

/// Errors that can occur while loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Errors that can occur while exporting the canvas bitmap
#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing to export until the host has laid the canvas out
    #[error("Canvas has not been laid out yet")]
    NotLaidOut,

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write image: {0}")]
    Io(#[from] io::Error),
}
