use egui::{Pos2, Vec2};

use crate::command::Command;
use crate::tools::{PointerInput, Tool, ToolContext, ToolMode};

/// Drags the view. Works in screen space so the content follows the pointer exactly.
#[derive(Debug, Clone, Default)]
pub struct PanTool {
    last_screen: Option<Pos2>,
}

impl PanTool {
    pub fn is_panning(&self) -> bool {
        self.last_screen.is_some()
    }
}

impl Tool for PanTool {
    fn mode(&self) -> ToolMode {
        ToolMode::Pan
    }

    fn deactivate(&mut self) -> Option<Command> {
        self.last_screen = None;
        None
    }

    fn on_pointer_down(&mut self, input: PointerInput, _ctx: &ToolContext<'_>) -> Option<Command> {
        self.last_screen = Some(input.screen);
        None
    }

    fn on_pointer_move(&mut self, input: PointerInput, _ctx: &ToolContext<'_>) -> Option<Command> {
        let last = self.last_screen.replace(input.screen)?;
        let delta = input.screen - last;
        (delta != Vec2::ZERO).then_some(Command::Pan { delta })
    }

    fn on_pointer_up(&mut self, _input: PointerInput, _ctx: &ToolContext<'_>) -> Option<Command> {
        self.last_screen = None;
        None
    }

    fn current_state_name(&self) -> &'static str {
        if self.is_panning() { "Panning" } else { "Idle" }
    }
}
