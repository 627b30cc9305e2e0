use eframe::egui;

use crate::WhiteboardApp;
use crate::components::ColorSwatch;

pub fn tools_panel(app: &mut WhiteboardApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("tools_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let can_undo = !app.canvas().strokes().is_empty();
            if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                app.undo();
            }
            if ui.selectable_label(app.show_palette(), "🎨 Color").clicked() {
                app.toggle_palette();
            }
            if ui.selectable_label(app.show_width_slider(), "✏ Stroke").clicked() {
                app.toggle_width_slider();
            }
            if ui.button("💾 Save").clicked() {
                app.save();
            }
            if let Some(status) = app.status() {
                ui.label(status);
            }
        });

        if app.show_width_slider() {
            let max_width = app.canvas().config().max_width;
            let mut width = app.canvas().brush().width;
            let response = ui.add(egui::Slider::new(&mut width, 0..=max_width).text("Width"));
            if response.changed() {
                app.set_width(width);
            }
        }
    });

    if app.show_palette() {
        palette_window(app, ctx);
    }
}

/// Swatch grid; picking a color applies it and closes the window
fn palette_window(app: &mut WhiteboardApp, ctx: &egui::Context) {
    let palette = app.canvas().config().palette.clone();
    let columns = app.canvas().config().palette_columns;
    let current = app.canvas().brush().color;
    let mut open = true;
    let mut picked = None;

    egui::Window::new("Color")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            egui::Grid::new("palette_grid").spacing([4.0, 4.0]).show(ui, |ui| {
                for (i, &color) in palette.iter().enumerate() {
                    if ColorSwatch::new(color, color == current).show(ui).clicked() {
                        picked = Some(color);
                    }
                    if (i + 1) % columns == 0 {
                        ui.end_row();
                    }
                }
            });

            ui.separator();
            ui.horizontal(|ui| {
                ui.label("Custom:");
                let mut custom = current;
                if egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut custom,
                    egui::color_picker::Alpha::OnlyBlend,
                )
                .changed()
                {
                    app.set_color(custom);
                }
            });
        });

    if let Some(color) = picked {
        log::info!("Color picked: {:?}", color);
        app.set_color(color);
        open = false;
    }
    if !open {
        app.toggle_palette();
    }
}
