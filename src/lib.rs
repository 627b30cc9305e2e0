#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod components;
pub mod config;
pub mod document;
pub mod error;
pub mod file_handler;
pub mod input;
pub mod panels;
pub mod raster;
pub mod renderer;
pub mod stroke;
pub mod util;

pub use app::WhiteboardApp;
pub use canvas::{BrushSettings, Canvas};
pub use config::CanvasConfig;
pub use document::Document;
pub use error::{CanvasError, ConfigError, ExportError};
pub use file_handler::FileHandler;
pub use input::{ControllerState, InputController, InputHandler, PointerEvent};
pub use raster::{RasterBuffer, Snapshot};
pub use renderer::Renderer;
pub use stroke::{PathSegment, Stroke, StrokeCursor};
