use eframe::egui;

use crate::WhiteboardApp;

pub fn central_panel(app: &mut WhiteboardApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            // Claim the whole area so drags draw instead of moving the window
            let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::drag());
            let canvas_rect = response.rect;

            app.layout_canvas(canvas_rect, ctx.pixels_per_point());
            app.handle_input(ctx, painter.layer_id());
            app.redraw_if_needed(ctx);

            app.renderer().render(&painter, canvas_rect, app.layout_scale());
        });
}
