use crate::canvas::Canvas;

use super::PointerEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    #[default]
    Idle,
    /// A stroke is being drawn
    Active,
}

/// Drives stroke building on a [`Canvas`] from pointer events
#[derive(Debug, Default)]
pub struct InputController {
    state: ControllerState,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Apply `event` to `canvas`. Returns true when the canvas needs a redraw.
    pub fn handle_event(&mut self, event: PointerEvent, canvas: &mut Canvas) -> bool {
        match (self.state, event) {
            (_, PointerEvent::Down { position }) => {
                // A second press without a release closes the dangling stroke first.
                let brush = canvas.brush();
                canvas.begin_stroke(position, brush.color, brush.width);
                self.state = ControllerState::Active;
                true
            }
            (ControllerState::Active, PointerEvent::Move { position }) => {
                if !canvas.is_drawing() {
                    // Stroke was undone mid-draw
                    self.state = ControllerState::Idle;
                    return false;
                }
                canvas.extend_stroke(position)
            }
            (ControllerState::Active, PointerEvent::Up { .. }) => {
                canvas.end_stroke();
                self.state = ControllerState::Idle;
                true
            }
            (ControllerState::Idle, PointerEvent::Move { .. } | PointerEvent::Up { .. }) => false,
        }
    }

    /// Apply a batch of events, returning whether any of them needs a redraw
    pub fn handle_events(
        &mut self,
        events: impl IntoIterator<Item = PointerEvent>,
        canvas: &mut Canvas,
    ) -> bool {
        events
            .into_iter()
            .fold(false, |redraw, event| self.handle_event(event, canvas) | redraw)
    }
}
