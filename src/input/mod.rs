use egui::{Context, Event, LayerId, PointerButton, Pos2, Rect};

mod controller;
pub use controller::{ControllerState, InputController};

/// Single-pointer events in canvas-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer pressed on the canvas
    Down { position: Pos2 },
    /// Pointer moved while pressed
    Move { position: Pos2 },
    /// Pointer released, or lost while pressed
    Up { position: Pos2 },
}

impl PointerEvent {
    pub fn position(&self) -> Pos2 {
        match *self {
            Self::Down { position } | Self::Move { position } | Self::Up { position } => position,
        }
    }
}

/// Handles converting raw egui input into canvas pointer events.
///
/// Only the primary button is tracked, and a press only counts when it lands
/// inside the canvas and no window or popup covers it. Once pressed, moves
/// outside the canvas still extend the stroke.
///
/// Positions come out in buffer pixels: canvas-local points scaled by
/// `pixels_per_point`.
#[derive(Debug)]
pub struct InputHandler {
    canvas_rect: Rect,
    pixels_per_point: f32,
    pressed: bool,
    last_pointer_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            pixels_per_point: 1.0,
            pressed: false,
            last_pointer_pos: None,
        }
    }

    /// Update the canvas rectangle (e.g. if the panel moved)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    pub fn canvas_rect(&self) -> Rect {
        self.canvas_rect
    }

    pub fn set_pixels_per_point(&mut self, pixels_per_point: f32) {
        self.pixels_per_point = pixels_per_point;
    }

    pub fn pixels_per_point(&self) -> f32 {
        self.pixels_per_point
    }

    fn to_canvas(&self, pos: Pos2) -> Pos2 {
        ((pos - self.canvas_rect.min) * self.pixels_per_point).to_pos2()
    }

    /// Drain this frame's egui input into pointer events.
    ///
    /// A press only starts a stroke when `canvas_layer` is the top-most layer
    /// under the pointer. Panels are not areas, so an uncovered canvas has no
    /// layer reported at all.
    pub fn process_input(&mut self, ctx: &Context, canvas_layer: LayerId) -> Vec<PointerEvent> {
        // Cloned so the layer lookup below does not re-enter the input lock
        let events = ctx.input(|input| input.events.clone());
        self.process_events_where(&events, |pos| {
            ctx.layer_id_at(pos).is_none_or(|layer| layer == canvas_layer)
        })
    }

    /// Translate raw egui events into pointer events
    pub fn process_events(&mut self, events: &[Event]) -> Vec<PointerEvent> {
        self.process_events_where(events, |_| true)
    }

    /// Like [`Self::process_events`], but a press at `pos` is also dropped
    /// unless `owns_press(pos)` holds.
    pub fn process_events_where(
        &mut self,
        events: &[Event],
        owns_press: impl Fn(Pos2) -> bool,
    ) -> Vec<PointerEvent> {
        let mut out = Vec::new();

        for event in events {
            match event {
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed: true,
                    ..
                } => {
                    self.last_pointer_pos = Some(*pos);
                    if self.canvas_rect.contains(*pos) && owns_press(*pos) {
                        self.pressed = true;
                        out.push(PointerEvent::Down {
                            position: self.to_canvas(*pos),
                        });
                    }
                }
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed: false,
                    ..
                } => {
                    self.last_pointer_pos = Some(*pos);
                    if self.pressed {
                        self.pressed = false;
                        out.push(PointerEvent::Up {
                            position: self.to_canvas(*pos),
                        });
                    }
                }
                Event::PointerMoved(pos) => {
                    if self.pressed && Some(*pos) != self.last_pointer_pos {
                        out.push(PointerEvent::Move {
                            position: self.to_canvas(*pos),
                        });
                    }
                    self.last_pointer_pos = Some(*pos);
                }
                Event::PointerGone => {
                    // Pointer left the window mid-stroke: finish where we last saw it
                    if self.pressed {
                        self.pressed = false;
                        if let Some(pos) = self.last_pointer_pos {
                            out.push(PointerEvent::Up {
                                position: self.to_canvas(pos),
                            });
                        }
                    }
                    self.last_pointer_pos = None;
                }
                _ => {}
            }
        }

        out
    }
}
