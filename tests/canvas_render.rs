use egui::{Color32, pos2};
use whiteboard::{Canvas, CanvasConfig, FileHandler, InputController, PointerEvent};

fn laid_out_canvas() -> Canvas {
    let mut canvas = Canvas::default();
    canvas.layout(64, 48).unwrap();
    canvas
}

fn drag(canvas: &mut Canvas, controller: &mut InputController, from: (f32, f32), to: (f32, f32)) {
    controller.handle_event(PointerEvent::Down { position: pos2(from.0, from.1) }, canvas);
    controller.handle_event(PointerEvent::Move { position: pos2(to.0, to.1) }, canvas);
    controller.handle_event(PointerEvent::Up { position: pos2(to.0, to.1) }, canvas);
}

#[test]
fn test_empty_canvas_renders_background() {
    let mut canvas = laid_out_canvas();
    canvas.render();
    let snapshot = canvas.export_bitmap().unwrap();
    assert_eq!((snapshot.width(), snapshot.height()), (64, 48));
    assert!(snapshot.as_rgba().iter().all(|&byte| byte == 255));
}

#[test]
fn test_custom_background() {
    let config = CanvasConfig {
        background: Color32::BLACK,
        ..Default::default()
    };
    let mut canvas = Canvas::new(config);
    canvas.layout(4, 4).unwrap();
    canvas.render();
    assert_eq!(canvas.export_bitmap().unwrap().pixel(2, 2), Some(Color32::BLACK));
}

#[test]
fn test_render_is_deterministic() {
    let mut canvas = laid_out_canvas();
    let mut controller = InputController::new();
    canvas.set_color(Color32::from_rgba_unmultiplied(200, 40, 90, 128));
    drag(&mut canvas, &mut controller, (5.0, 5.0), (50.0, 40.0));
    canvas.set_width(3);
    drag(&mut canvas, &mut controller, (60.0, 5.0), (5.0, 40.0));

    let strokes_before = canvas.strokes().to_vec();
    canvas.render();
    let first = canvas.export_bitmap().unwrap();
    canvas.render();
    canvas.render();
    let second = canvas.export_bitmap().unwrap();

    assert_eq!(first.as_rgba(), second.as_rgba());
    assert_eq!(canvas.strokes(), strokes_before.as_slice());
}

#[test]
fn test_later_strokes_draw_on_top() {
    let mut canvas = laid_out_canvas();
    let mut controller = InputController::new();
    canvas.set_width(10);

    canvas.set_color(Color32::RED);
    drag(&mut canvas, &mut controller, (5.0, 24.0), (60.0, 24.0));
    canvas.set_color(Color32::BLUE);
    drag(&mut canvas, &mut controller, (32.0, 2.0), (32.0, 46.0));

    canvas.render();
    let snapshot = canvas.export_bitmap().unwrap();
    assert_eq!(snapshot.pixel(32, 24), Some(Color32::BLUE));
    assert_eq!(snapshot.pixel(10, 24), Some(Color32::RED));
}

#[test]
fn test_brush_change_after_stroke_keeps_pixels() {
    let mut canvas = laid_out_canvas();
    let mut controller = InputController::new();
    canvas.set_color(Color32::RED);
    canvas.set_width(6);
    drag(&mut canvas, &mut controller, (5.0, 24.0), (60.0, 24.0));

    canvas.render();
    let before = canvas.export_bitmap().unwrap();

    canvas.set_color(Color32::BLUE);
    canvas.set_width(30);
    canvas.render();
    let after = canvas.export_bitmap().unwrap();

    assert_eq!(before, after);
    assert_eq!(after.pixel(30, 24), Some(Color32::RED));
}

#[test]
fn test_undo_clears_pixels_on_next_render() {
    let mut canvas = laid_out_canvas();
    let mut controller = InputController::new();
    canvas.set_color(Color32::RED);
    canvas.set_width(6);
    drag(&mut canvas, &mut controller, (5.0, 24.0), (60.0, 24.0));
    canvas.render();
    assert_eq!(canvas.export_bitmap().unwrap().pixel(30, 24), Some(Color32::RED));

    canvas.undo();
    canvas.render();
    assert_eq!(canvas.export_bitmap().unwrap().pixel(30, 24), Some(Color32::WHITE));
}

#[test]
fn test_snapshot_is_detached_from_canvas() {
    let mut canvas = laid_out_canvas();
    let mut controller = InputController::new();
    canvas.render();
    let blank = canvas.export_bitmap().unwrap();

    canvas.set_color(Color32::RED);
    drag(&mut canvas, &mut controller, (5.0, 24.0), (60.0, 24.0));
    canvas.render();

    assert_eq!(blank.pixel(30, 24), Some(Color32::WHITE));
}

#[test]
fn test_export_and_save() {
    let dir = std::env::temp_dir().join(format!("whiteboard-export-{}", std::process::id()));
    let mut canvas = laid_out_canvas();
    let mut controller = InputController::new();
    drag(&mut canvas, &mut controller, (5.0, 5.0), (40.0, 40.0));
    canvas.render();

    let mut handler = FileHandler::new(&dir);
    let path = handler.save_optional(canvas.export_bitmap()).unwrap();
    assert!(path.exists());
    let _ = std::fs::remove_dir_all(&dir);
}
