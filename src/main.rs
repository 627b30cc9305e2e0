#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = whiteboard::CanvasConfig::from_env().unwrap_or_else(|err| {
        log::error!("{err}; falling back to the default config");
        whiteboard::CanvasConfig::default()
    });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Whiteboard")
            .with_inner_size([420.0, 760.0])
            .with_min_inner_size([240.0, 320.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Whiteboard",
        native_options,
        Box::new(|cc| Ok(Box::new(whiteboard::WhiteboardApp::new(cc, config)))),
    )
}
