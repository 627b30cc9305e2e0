use eframe::egui;

use crate::canvas::Canvas;
use crate::config::CanvasConfig;
use crate::file_handler::FileHandler;
use crate::input::{InputController, InputHandler};
use crate::panels::{central_panel, tools_panel};
use crate::renderer::Renderer;

/// Host application: lays the canvas out, feeds it pointer input and shows
/// the tool panel.
#[derive(Debug)]
pub struct WhiteboardApp {
    canvas: Canvas,
    controller: InputController,
    input: InputHandler,
    renderer: Renderer,
    file_handler: FileHandler,
    /// Set whenever the raster buffer is stale
    needs_redraw: bool,
    show_palette: bool,
    show_width_slider: bool,
    status: Option<String>,
}

impl WhiteboardApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: CanvasConfig) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        Self::with_config(config)
    }

    pub fn with_config(config: CanvasConfig) -> Self {
        let file_handler = FileHandler::new(config.export_dir.clone());
        Self {
            canvas: Canvas::new(config),
            controller: InputController::new(),
            input: InputHandler::new(egui::Rect::NOTHING),
            renderer: Renderer::new(),
            file_handler,
            needs_redraw: true,
            show_palette: false,
            show_width_slider: false,
            status: None,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn show_palette(&self) -> bool {
        self.show_palette
    }

    pub fn toggle_palette(&mut self) {
        self.show_palette = !self.show_palette;
    }

    pub fn show_width_slider(&self) -> bool {
        self.show_width_slider
    }

    pub fn toggle_width_slider(&mut self) {
        self.show_width_slider = !self.show_width_slider;
    }

    pub fn set_color(&mut self, color: egui::Color32) {
        self.canvas.set_color(color);
    }

    pub fn set_width(&mut self, width: u32) {
        self.canvas.set_width(width);
    }

    pub fn undo(&mut self) {
        if self.canvas.undo() {
            self.needs_redraw = true;
        }
    }

    /// Export the current bitmap to the configured directory
    pub fn save(&mut self) {
        self.status = Some(match self.file_handler.save_optional(self.canvas.export_bitmap()) {
            Ok(path) => format!("Saved to {}", path.display()),
            Err(err) => format!("Save failed: {err}"),
        });
    }

    /// Size the canvas from the first measured rect.
    ///
    /// The buffer is allocated in physical pixels at the current
    /// `pixels_per_point`. That scale is fixed along with the size, so input
    /// mapping and display stay consistent if it changes later.
    pub fn layout_canvas(&mut self, rect: egui::Rect, pixels_per_point: f32) {
        self.input.set_canvas_rect(rect);
        if self.canvas.size().is_some() {
            return;
        }
        let width = (rect.width() * pixels_per_point).floor() as u32;
        let height = (rect.height() * pixels_per_point).floor() as u32;
        match self.canvas.layout(width, height) {
            Ok(()) => {
                self.input.set_pixels_per_point(pixels_per_point);
                self.needs_redraw = true;
            }
            Err(err) => log::debug!("Layout deferred: {err}"),
        }
    }

    /// Scale the canvas was laid out at, in physical pixels per point
    pub fn layout_scale(&self) -> f32 {
        self.input.pixels_per_point()
    }

    /// Route this frame's pointer input to the canvas.
    ///
    /// `canvas_layer` is the layer the canvas is painted on; presses over any
    /// other layer (the palette window, popups) are not strokes.
    pub fn handle_input(&mut self, ctx: &egui::Context, canvas_layer: egui::LayerId) {
        let events = self.input.process_input(ctx, canvas_layer);
        if self.controller.handle_events(events, &mut self.canvas) {
            self.needs_redraw = true;
        }
    }

    /// Re-render the canvas and upload it if anything changed
    pub fn redraw_if_needed(&mut self, ctx: &egui::Context) {
        if !self.needs_redraw {
            return;
        }
        self.canvas.render();
        if let Some(image) = self.canvas.display_image() {
            self.renderer.upload(ctx, image);
            self.needs_redraw = false;
            ctx.request_repaint();
        }
    }
}

impl eframe::App for WhiteboardApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
