use egui::{Color32, Pos2};

use crate::config::CanvasConfig;
use crate::document::Document;
use crate::error::CanvasError;
use crate::raster::{RasterBuffer, Snapshot};
use crate::stroke::{Stroke, StrokeCursor};

/// Color and width applied to the next stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushSettings {
    pub color: Color32,
    pub width: u32,
}

/// The drawing surface: stroke list, brush settings, in-progress stroke and
/// the raster buffer everything is composited onto.
#[derive(Debug)]
pub struct Canvas {
    config: CanvasConfig,
    document: Document,
    brush: BrushSettings,
    /// Present while the last stroke in `document` is being drawn
    cursor: Option<StrokeCursor>,
    buffer: Option<RasterBuffer>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl Canvas {
    pub fn new(config: CanvasConfig) -> Self {
        let brush = BrushSettings {
            color: config.initial_color,
            width: config.initial_width.min(config.max_width),
        };
        Self {
            config,
            document: Document::new(),
            brush,
            cursor: None,
            buffer: None,
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn strokes(&self) -> &[Stroke] {
        self.document.strokes()
    }

    pub fn brush(&self) -> BrushSettings {
        self.brush
    }

    pub fn is_drawing(&self) -> bool {
        self.cursor.is_some()
    }

    /// Size of the raster buffer, once laid out
    pub fn size(&self) -> Option<[u32; 2]> {
        self.buffer.as_ref().map(|buffer| [buffer.width(), buffer.height()])
    }

    /// Allocate the raster buffer from the host's first measurement.
    ///
    /// The buffer keeps that size for the canvas's lifetime; later calls
    /// are ignored.
    pub fn layout(&mut self, width: u32, height: u32) -> Result<(), CanvasError> {
        if let Some(buffer) = &self.buffer {
            if [buffer.width(), buffer.height()] != [width, height] {
                log::warn!(
                    "Ignoring layout {}x{}: buffer already sized {}x{}",
                    width,
                    height,
                    buffer.width(),
                    buffer.height()
                );
            }
            return Ok(());
        }
        let buffer = RasterBuffer::new(width, height)?;
        log::debug!("Raster buffer allocated: {}x{}", width, height);
        self.buffer = Some(buffer);
        Ok(())
    }

    pub fn set_color(&mut self, color: Color32) {
        self.brush.color = color;
    }

    /// Set the width for the next stroke, clamped to the configured maximum
    pub fn set_width(&mut self, width: u32) {
        self.brush.width = width.min(self.config.max_width);
    }

    /// Start a new stroke at `point`, closing any stroke still in progress
    pub fn begin_stroke(&mut self, point: Pos2, color: Color32, width: u32) {
        if self.cursor.is_some() {
            log::debug!("Stroke still in progress at begin; closing it");
            self.end_stroke();
        }
        self.document.add_stroke(Stroke::new(point, color, width));
        self.cursor = Some(StrokeCursor::new(point));
        log::debug!("Stroke {} started at {:?}", self.document.len(), point);
    }

    /// Extend the in-progress stroke towards `point`.
    ///
    /// Returns whether the sample was recorded. Samples within the touch
    /// tolerance of the last recorded point on both axes are dropped.
    pub fn extend_stroke(&mut self, point: Pos2) -> bool {
        let Some(cursor) = self.cursor.as_mut() else {
            return false;
        };
        if !cursor.accepts(point, self.config.touch_tolerance) {
            return false;
        }
        let Some(stroke) = self.document.last_stroke_mut() else {
            return false;
        };
        stroke.quad_towards(cursor.last(), point);
        cursor.advance(point);
        true
    }

    /// Close the in-progress stroke with a segment to its last recorded point
    pub fn end_stroke(&mut self) {
        let Some(cursor) = self.cursor.take() else {
            return;
        };
        let index = self.document.len();
        if let Some(stroke) = self.document.last_stroke_mut() {
            stroke.close_at(cursor.last());
            log::debug!("Stroke {} finished with {} curve segments", index, stroke.curve_count());
        }
    }

    /// Remove the most recent stroke. Returns whether anything was removed.
    pub fn undo(&mut self) -> bool {
        match self.document.remove_last_stroke() {
            Some(_) => {
                // The in-progress stroke is always the last one.
                self.cursor = None;
                log::info!("Undo: {} strokes remain", self.document.len());
                true
            }
            None => false,
        }
    }

    /// Clear the buffer to the background and draw every stroke in order.
    ///
    /// Does nothing before the first layout.
    pub fn render(&mut self) {
        let Some(buffer) = self.buffer.as_mut() else {
            return;
        };
        buffer.clear(self.config.background);
        for stroke in self.document.strokes() {
            buffer.draw_stroke(stroke);
        }
    }

    /// Buffer contents as of the last render, ready for a texture upload
    pub fn display_image(&self) -> Option<egui::ColorImage> {
        self.buffer.as_ref().map(RasterBuffer::to_color_image)
    }

    /// Snapshot of the buffer as of the last render
    pub fn export_bitmap(&self) -> Option<Snapshot> {
        self.buffer.as_ref().map(RasterBuffer::snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_initial_brush_from_config() {
        let canvas = Canvas::default();
        assert_eq!(
            canvas.brush(),
            BrushSettings {
                color: Color32::GREEN,
                width: 20
            }
        );
    }

    #[test]
    fn test_set_width_clamps() {
        let mut canvas = Canvas::default();
        canvas.set_width(250);
        assert_eq!(canvas.brush().width, 100);
        canvas.set_width(0);
        assert_eq!(canvas.brush().width, 0);
    }

    #[test]
    fn test_layout_only_once() {
        let mut canvas = Canvas::default();
        assert_eq!(canvas.size(), None);
        canvas.layout(30, 20).unwrap();
        canvas.layout(60, 40).unwrap();
        assert_eq!(canvas.size(), Some([30, 20]));
    }

    #[test]
    fn test_layout_rejects_empty_size() {
        let mut canvas = Canvas::default();
        assert!(canvas.layout(0, 0).is_err());
        assert_eq!(canvas.size(), None);
    }

    #[test]
    fn test_undo_drops_in_progress_stroke() {
        let mut canvas = Canvas::default();
        canvas.begin_stroke(pos2(0.0, 0.0), Color32::RED, 2);
        assert!(canvas.undo());
        assert!(!canvas.is_drawing());
        assert!(!canvas.extend_stroke(pos2(50.0, 50.0)));
        canvas.end_stroke();
        assert!(canvas.strokes().is_empty());
    }

    #[test]
    fn test_end_stroke_closes_last_stroke() {
        let mut canvas = Canvas::default();
        canvas.begin_stroke(pos2(0.0, 0.0), Color32::RED, 2);
        canvas.end_stroke();
        canvas.begin_stroke(pos2(10.0, 10.0), Color32::BLUE, 4);
        assert!(canvas.extend_stroke(pos2(30.0, 10.0)));
        canvas.end_stroke();
        canvas.end_stroke();

        assert!(!canvas.is_drawing());
        assert_eq!(canvas.strokes().len(), 2);
        assert!(canvas.strokes().iter().all(Stroke::is_closed));
        assert_eq!(canvas.strokes()[1].curve_count(), 1);
    }

    #[test]
    fn test_display_image_tracks_layout() {
        let mut canvas = Canvas::default();
        assert!(canvas.display_image().is_none());
        canvas.layout(8, 5).unwrap();
        canvas.render();
        let image = canvas.display_image().unwrap();
        assert_eq!(image.size, [8, 5]);
        assert!(image.pixels.iter().all(|&pixel| pixel == Color32::WHITE));
    }

    #[test]
    fn test_render_before_layout_is_noop() {
        let mut canvas = Canvas::default();
        canvas.begin_stroke(pos2(0.0, 0.0), Color32::RED, 2);
        canvas.render();
        assert!(canvas.export_bitmap().is_none());
    }
}
