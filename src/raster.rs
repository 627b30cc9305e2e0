use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use egui::Color32;
use image::{ImageFormat, Rgba, RgbaImage};
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke as SkiaStroke, Transform};

use crate::error::{CanvasError, ExportError};
use crate::stroke::{PathSegment, Stroke};

/// Pixel surface the strokes are composited onto
#[derive(Debug, Clone)]
pub struct RasterBuffer {
    pixmap: Pixmap,
}

impl RasterBuffer {
    pub fn new(width: u32, height: u32) -> Result<Self, CanvasError> {
        let pixmap = Pixmap::new(width, height).ok_or(CanvasError::InvalidSize { width, height })?;
        Ok(Self { pixmap })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn clear(&mut self, color: Color32) {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        self.pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
    }

    /// Stroke `stroke`'s path with its own color and width.
    ///
    /// A stroke that has not moved past its starting point has no drawable
    /// outline yet and is skipped.
    pub fn draw_stroke(&mut self, stroke: &Stroke) {
        let mut pb = PathBuilder::new();
        for segment in stroke.path() {
            match *segment {
                PathSegment::MoveTo(p) => pb.move_to(p.x, p.y),
                PathSegment::QuadTo { ctrl, end } => pb.quad_to(ctrl.x, ctrl.y, end.x, end.y),
                PathSegment::LineTo(p) => pb.line_to(p.x, p.y),
            }
        }
        let Some(path) = pb.finish() else {
            return;
        };

        let [r, g, b, a] = stroke.color().to_srgba_unmultiplied();
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;

        let skia_stroke = SkiaStroke {
            width: stroke.width() as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &skia_stroke, Transform::identity(), None);
    }

    /// Display copy of the buffer.
    ///
    /// Both tiny-skia and egui store premultiplied RGBA, so the bytes are
    /// handed over as-is.
    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_premultiplied(
            [self.width() as usize, self.height() as usize],
            self.pixmap.data(),
        )
    }

    /// Copy the current contents out as straight (non-premultiplied) RGBA
    pub fn snapshot(&self) -> Snapshot {
        let mut image = RgbaImage::new(self.width(), self.height());
        for (dst, src) in image.pixels_mut().zip(self.pixmap.pixels()) {
            let c = src.demultiply();
            *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        Snapshot {
            image: Arc::new(image),
        }
    }
}

/// Immutable copy of the raster buffer, handed out for display and export.
///
/// Cloning is cheap; the pixels are shared.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    image: Arc<RgbaImage>,
}

impl Snapshot {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        self.image
            .get_pixel_checked(x, y)
            .map(|Rgba([r, g, b, a])| Color32::from_rgba_unmultiplied(*r, *g, *b, *a))
    }

    /// Raw RGBA bytes, row-major
    pub fn as_rgba(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, ExportError> {
        let mut bytes = Vec::new();
        self.image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            RasterBuffer::new(0, 10),
            Err(CanvasError::InvalidSize { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_clear_fills_every_pixel() {
        let mut buffer = RasterBuffer::new(4, 3).unwrap();
        buffer.clear(Color32::WHITE);
        let snapshot = buffer.snapshot();
        assert_eq!(snapshot.width(), 4);
        assert_eq!(snapshot.height(), 3);
        assert!(snapshot.as_rgba().iter().all(|&byte| byte == 255));
        assert_eq!(snapshot.pixel(4, 0), None);
    }

    #[test]
    fn test_lone_start_point_draws_nothing() {
        let mut buffer = RasterBuffer::new(20, 20).unwrap();
        buffer.clear(Color32::WHITE);
        let before = buffer.snapshot();
        buffer.draw_stroke(&Stroke::new(pos2(10.0, 10.0), Color32::BLACK, 5));
        assert_eq!(buffer.snapshot(), before);
    }

    #[test]
    fn test_stroke_colors_its_path() {
        let mut buffer = RasterBuffer::new(40, 40).unwrap();
        buffer.clear(Color32::WHITE);
        let mut stroke = Stroke::new(pos2(5.0, 20.0), Color32::RED, 6);
        stroke.quad_towards(pos2(5.0, 20.0), pos2(35.0, 20.0));
        stroke.close_at(pos2(35.0, 20.0));
        buffer.draw_stroke(&stroke);

        let snapshot = buffer.snapshot();
        assert_eq!(snapshot.pixel(20, 20), Some(Color32::RED));
        assert_eq!(snapshot.pixel(20, 2), Some(Color32::WHITE));
    }

    #[test]
    fn test_color_image_matches_buffer() {
        let mut buffer = RasterBuffer::new(6, 3).unwrap();
        buffer.clear(Color32::RED);
        let image = buffer.to_color_image();
        assert_eq!(image.size, [6, 3]);
        assert!(image.pixels.iter().all(|&pixel| pixel == Color32::RED));
    }

    #[test]
    fn test_encode_png_signature() {
        let mut buffer = RasterBuffer::new(2, 2).unwrap();
        buffer.clear(Color32::WHITE);
        let png = buffer.snapshot().encode_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
