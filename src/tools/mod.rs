use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::document::Document;
use crate::element::PathKind;
use crate::id_generator::ElementId;
use crate::selection::SelectionTarget;

mod connect_tool;
mod pan_tool;
mod select_tool;

pub use connect_tool::ConnectTool;
pub use pan_tool::PanTool;
pub use select_tool::{SelectState, SelectTool};

/// Which tool interprets pointer input on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolMode {
    #[default]
    Select,
    Pan,
    Connect,
}

impl ToolMode {
    pub const ALL: [ToolMode; 3] = [ToolMode::Select, ToolMode::Pan, ToolMode::Connect];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Select => "Select & Move",
            Self::Pan => "Pan",
            Self::Connect => "Create Story Path",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Select => "↖",
            Self::Pan => "✋",
            Self::Connect => "🔗",
        }
    }

    /// Single-key shortcut, without modifiers
    pub fn shortcut(&self) -> egui::Key {
        match self {
            Self::Select => egui::Key::S,
            Self::Pan => egui::Key::P,
            Self::Connect => egui::Key::C,
        }
    }
}

/// A pointer event after it has been mapped into the world and hit tested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    /// Canvas-relative pixels
    pub screen: Pos2,
    pub world: Pos2,
    pub hit: Option<SelectionTarget>,
}

/// Read-only view of the editor handed to tools
#[derive(Debug, Clone, Copy)]
pub struct ToolContext<'a> {
    pub document: &'a Document,
    pub path_kind: &'a PathKind,
    pub read_only: bool,
}

/// Turns pointer gestures into commands. Tools never touch the document directly.
pub trait Tool {
    fn mode(&self) -> ToolMode;

    fn activate(&mut self) {}

    /// Drops any gesture in progress. A command may come back to settle what the
    /// gesture already applied.
    fn deactivate(&mut self) -> Option<Command>;

    fn on_pointer_down(&mut self, input: PointerInput, ctx: &ToolContext<'_>) -> Option<Command>;

    fn on_pointer_move(&mut self, input: PointerInput, ctx: &ToolContext<'_>) -> Option<Command>;

    fn on_pointer_up(&mut self, input: PointerInput, ctx: &ToolContext<'_>) -> Option<Command>;

    fn current_state_name(&self) -> &'static str;
}

/// All available tools, dispatched without boxing
#[derive(Debug, Clone)]
pub enum ToolType {
    Select(SelectTool),
    Pan(PanTool),
    Connect(ConnectTool),
}

impl Default for ToolType {
    fn default() -> Self {
        Self::for_mode(ToolMode::default())
    }
}

impl ToolType {
    pub fn for_mode(mode: ToolMode) -> Self {
        match mode {
            ToolMode::Select => Self::Select(SelectTool::default()),
            ToolMode::Pan => Self::Pan(PanTool::default()),
            ToolMode::Connect => Self::Connect(ConnectTool::default()),
        }
    }

    /// The first endpoint picked by the connect tool, if one is waiting.
    pub fn pending_start(&self) -> Option<ElementId> {
        match self {
            Self::Connect(tool) => tool.pending_start(),
            _ => None,
        }
    }

    pub fn is_gesture_active(&self) -> bool {
        match self {
            Self::Select(tool) => !matches!(tool.state(), SelectState::Idle),
            Self::Pan(tool) => tool.is_panning(),
            Self::Connect(tool) => tool.pending_start().is_some(),
        }
    }
}

impl Tool for ToolType {
    fn mode(&self) -> ToolMode {
        match self {
            Self::Select(tool) => tool.mode(),
            Self::Pan(tool) => tool.mode(),
            Self::Connect(tool) => tool.mode(),
        }
    }

    fn activate(&mut self) {
        match self {
            Self::Select(tool) => tool.activate(),
            Self::Pan(tool) => tool.activate(),
            Self::Connect(tool) => tool.activate(),
        }
    }

    fn deactivate(&mut self) -> Option<Command> {
        match self {
            Self::Select(tool) => tool.deactivate(),
            Self::Pan(tool) => tool.deactivate(),
            Self::Connect(tool) => tool.deactivate(),
        }
    }

    fn on_pointer_down(&mut self, input: PointerInput, ctx: &ToolContext<'_>) -> Option<Command> {
        match self {
            Self::Select(tool) => tool.on_pointer_down(input, ctx),
            Self::Pan(tool) => tool.on_pointer_down(input, ctx),
            Self::Connect(tool) => tool.on_pointer_down(input, ctx),
        }
    }

    fn on_pointer_move(&mut self, input: PointerInput, ctx: &ToolContext<'_>) -> Option<Command> {
        match self {
            Self::Select(tool) => tool.on_pointer_move(input, ctx),
            Self::Pan(tool) => tool.on_pointer_move(input, ctx),
            Self::Connect(tool) => tool.on_pointer_move(input, ctx),
        }
    }

    fn on_pointer_up(&mut self, input: PointerInput, ctx: &ToolContext<'_>) -> Option<Command> {
        match self {
            Self::Select(tool) => tool.on_pointer_up(input, ctx),
            Self::Pan(tool) => tool.on_pointer_up(input, ctx),
            Self::Connect(tool) => tool.on_pointer_up(input, ctx),
        }
    }

    fn current_state_name(&self) -> &'static str {
        match self {
            Self::Select(tool) => tool.current_state_name(),
            Self::Pan(tool) => tool.current_state_name(),
            Self::Connect(tool) => tool.current_state_name(),
        }
    }
}
