use eframe::egui::{self, Color32, ColorImage, Rect, TextureHandle, TextureOptions, pos2};

const TEXTURE_NAME: &str = "whiteboard_canvas";

/// Shows the canvas raster buffer through an egui texture
#[derive(Default)]
pub struct Renderer {
    texture: Option<TextureHandle>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("texture_size", &self.texture_size())
            .finish()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload `image`, replacing the previous frame's pixels
    pub fn upload(&mut self, ctx: &egui::Context, image: ColorImage) {
        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::NEAREST),
            None => {
                self.texture = Some(ctx.load_texture(TEXTURE_NAME, image, TextureOptions::NEAREST));
            }
        }
    }

    /// Size in pixels of the uploaded texture
    pub fn texture_size(&self) -> Option<[usize; 2]> {
        self.texture.as_ref().map(TextureHandle::size)
    }

    /// Paint the uploaded texture at the top-left of `rect`.
    ///
    /// `pixels_per_point` is the scale the texture was laid out at, so one
    /// texel lands on one physical pixel.
    pub fn render(&self, painter: &egui::Painter, rect: Rect, pixels_per_point: f32) {
        let Some(texture) = &self.texture else {
            return;
        };
        let image_rect = Rect::from_min_size(rect.min, texture.size_vec2() / pixels_per_point);
        painter.image(
            texture.id(),
            image_rect,
            Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
            Color32::WHITE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::RasterBuffer;

    fn image(width: u32, height: u32) -> ColorImage {
        let mut buffer = RasterBuffer::new(width, height).unwrap();
        buffer.clear(Color32::WHITE);
        buffer.to_color_image()
    }

    #[test]
    fn test_renderer_creation() {
        let renderer = Renderer::new();
        assert_eq!(renderer.texture_size(), None);
    }

    #[test]
    fn test_upload_creates_then_reuses_texture() {
        let ctx = egui::Context::default();
        let mut renderer = Renderer::new();

        renderer.upload(&ctx, image(16, 8));
        assert_eq!(renderer.texture_size(), Some([16, 8]));

        renderer.upload(&ctx, image(16, 8));
        assert_eq!(renderer.texture_size(), Some([16, 8]));
    }

    #[test]
    fn test_render_basics() {
        let ctx = egui::Context::default();
        let mut renderer = Renderer::new();
        let layer_id = egui::LayerId::background();
        let rect = Rect::from_min_size(pos2(0.0, 0.0), egui::vec2(100.0, 100.0));
        let painter = egui::Painter::new(ctx.clone(), layer_id, rect);

        renderer.render(&painter, rect, 1.0);
        renderer.upload(&ctx, image(100, 100));
        renderer.render(&painter, rect, 1.0);
        renderer.render(&painter, rect, 2.0);
    }
}
