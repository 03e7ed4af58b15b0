use egui::{Context, Key, PointerButton, Pos2, Rect};

use crate::tools::ToolMode;

mod router;
pub use router::route_event;

/// Keyboard shortcuts understood by the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    DeleteSelection,
    CancelGesture,
    Undo,
    Redo,
    SelectTool(ToolMode),
}

/// Input events in canvas-relative pixels
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    PointerDown(Pos2),
    PointerMove(Pos2),
    PointerUp(Pos2),
    Scroll { anchor: Pos2, delta_y: f32 },
    Shortcut(Shortcut),
}

/// Converts raw egui input into [`CanvasEvent`]s for one canvas rectangle.
///
/// A press that starts on the canvas is followed until release even if the pointer
/// leaves the canvas, so drags do not get stuck.
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    pressed: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// `keyboard` is false while a text field has focus.
    pub fn process_input(
        &mut self,
        ctx: &Context,
        canvas: Rect,
        keyboard: bool,
    ) -> Vec<CanvasEvent> {
        let mut events = Vec::new();
        let local = |pos: Pos2| (pos - canvas.min).to_pos2();

        ctx.input(|input| {
            let pointer_pos = input.pointer.latest_pos();

            if input.pointer.button_pressed(PointerButton::Primary) {
                if let Some(pos) = pointer_pos.filter(|pos| canvas.contains(*pos)) {
                    events.push(CanvasEvent::PointerDown(local(pos)));
                    self.pressed = true;
                }
            }

            if let Some(pos) = pointer_pos {
                if Some(pos) != self.last_pointer_pos && (self.pressed || canvas.contains(pos)) {
                    events.push(CanvasEvent::PointerMove(local(pos)));
                }
                self.last_pointer_pos = Some(pos);
            }

            if self.pressed && !input.pointer.button_down(PointerButton::Primary) {
                let pos = pointer_pos.or(self.last_pointer_pos).unwrap_or(canvas.min);
                events.push(CanvasEvent::PointerUp(local(pos)));
                self.pressed = false;
            }

            let delta_y = input.raw_scroll_delta.y;
            if delta_y != 0.0 {
                if let Some(pos) = input.pointer.hover_pos().filter(|pos| canvas.contains(*pos)) {
                    events.push(CanvasEvent::Scroll {
                        anchor: local(pos),
                        delta_y,
                    });
                }
            }

            if keyboard {
                collect_shortcuts(input, &mut events);
            }
        });

        events
    }
}

fn collect_shortcuts(input: &egui::InputState, events: &mut Vec<CanvasEvent>) {
    let modifiers = input.modifiers;
    if input.key_pressed(Key::Delete) || input.key_pressed(Key::Backspace) {
        events.push(CanvasEvent::Shortcut(Shortcut::DeleteSelection));
    }
    if input.key_pressed(Key::Escape) {
        events.push(CanvasEvent::Shortcut(Shortcut::CancelGesture));
    }
    if modifiers.command && input.key_pressed(Key::Z) {
        let shortcut = if modifiers.shift {
            Shortcut::Redo
        } else {
            Shortcut::Undo
        };
        events.push(CanvasEvent::Shortcut(shortcut));
        return;
    }
    if modifiers.any() {
        return;
    }
    for mode in ToolMode::ALL {
        if input.key_pressed(mode.shortcut()) {
            events.push(CanvasEvent::Shortcut(Shortcut::SelectTool(mode)));
        }
    }
}
