use egui::{Pos2, Vec2};

use crate::command::Command;
use crate::id_generator::ElementId;
use crate::selection::SelectionTarget;
use crate::tools::{PointerInput, Tool, ToolContext, ToolMode};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SelectState {
    #[default]
    Idle,
    Dragging {
        id: ElementId,
        /// Element position minus the pointer's world position at press time
        grab_offset: Vec2,
        origin: Pos2,
        current: Pos2,
    },
}

/// Selects whatever is under the pointer and drags elements around.
#[derive(Debug, Clone, Default)]
pub struct SelectTool {
    state: SelectState,
}

impl SelectTool {
    pub fn state(&self) -> &SelectState {
        &self.state
    }

    /// Ends a drag, returning the command that records it if the element moved.
    fn finish_drag(&mut self) -> Option<Command> {
        match std::mem::take(&mut self.state) {
            SelectState::Dragging {
                id,
                origin,
                current,
                ..
            } if origin != current => Some(Command::CommitMove {
                id,
                from: origin,
                to: current,
            }),
            _ => None,
        }
    }
}

impl Tool for SelectTool {
    fn mode(&self) -> ToolMode {
        ToolMode::Select
    }

    fn deactivate(&mut self) -> Option<Command> {
        self.finish_drag()
    }

    fn on_pointer_down(&mut self, input: PointerInput, ctx: &ToolContext<'_>) -> Option<Command> {
        self.state = SelectState::Idle;
        if let Some(SelectionTarget::Element(id)) = input.hit {
            if let Some(element) = ctx.document.element(id).filter(|_| !ctx.read_only) {
                let origin = element.position();
                self.state = SelectState::Dragging {
                    id,
                    grab_offset: origin - input.world,
                    origin,
                    current: origin,
                };
            }
        }
        Some(Command::Select(input.hit))
    }

    fn on_pointer_move(&mut self, input: PointerInput, ctx: &ToolContext<'_>) -> Option<Command> {
        let SelectState::Dragging {
            id,
            grab_offset,
            current,
            ..
        } = &mut self.state
        else {
            return None;
        };
        if ctx.document.element(*id).is_none() {
            self.state = SelectState::Idle;
            return None;
        }
        let position = input.world + *grab_offset;
        if position == *current {
            return None;
        }
        *current = position;
        Some(Command::MoveElement { id: *id, position })
    }

    fn on_pointer_up(&mut self, _input: PointerInput, _ctx: &ToolContext<'_>) -> Option<Command> {
        self.finish_drag()
    }

    fn current_state_name(&self) -> &'static str {
        match self.state {
            SelectState::Idle => "Idle",
            SelectState::Dragging { .. } => "Dragging",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::element::{ElementKind, PathKind};
    use egui::pos2;

    fn input(world: Pos2, hit: Option<SelectionTarget>) -> PointerInput {
        PointerInput {
            screen: world,
            world,
            hit,
        }
    }

    #[test]
    fn drag_keeps_grab_offset_and_commits_once() {
        let mut document = Document::new();
        let id = document.add_element(ElementKind::Ruin, pos2(100.0, 100.0)).id();
        let ctx = ToolContext {
            document: &document,
            path_kind: &PathKind::Journey,
            read_only: false,
        };
        let hit = Some(SelectionTarget::Element(id));
        let mut tool = SelectTool::default();

        assert_eq!(
            tool.on_pointer_down(input(pos2(110.0, 100.0), hit), &ctx),
            Some(Command::Select(hit))
        );
        assert_eq!(
            tool.on_pointer_move(input(pos2(130.0, 120.0), hit), &ctx),
            Some(Command::MoveElement {
                id,
                position: pos2(120.0, 120.0)
            })
        );
        assert_eq!(
            tool.on_pointer_up(input(pos2(130.0, 120.0), hit), &ctx),
            Some(Command::CommitMove {
                id,
                from: pos2(100.0, 100.0),
                to: pos2(120.0, 120.0)
            })
        );
        assert_eq!(tool.state(), &SelectState::Idle);
    }

    #[test]
    fn click_without_motion_commits_nothing() {
        let mut document = Document::new();
        let id = document.add_element(ElementKind::Ruin, Pos2::ZERO).id();
        let ctx = ToolContext {
            document: &document,
            path_kind: &PathKind::Journey,
            read_only: false,
        };
        let hit = Some(SelectionTarget::Element(id));
        let mut tool = SelectTool::default();
        tool.on_pointer_down(input(Pos2::ZERO, hit), &ctx);
        assert_eq!(tool.on_pointer_up(input(Pos2::ZERO, hit), &ctx), None);
    }

    #[test]
    fn read_only_selects_without_dragging() {
        let mut document = Document::new();
        let id = document.add_element(ElementKind::Ruin, Pos2::ZERO).id();
        let ctx = ToolContext {
            document: &document,
            path_kind: &PathKind::Journey,
            read_only: true,
        };
        let hit = Some(SelectionTarget::Element(id));
        let mut tool = SelectTool::default();
        assert_eq!(
            tool.on_pointer_down(input(Pos2::ZERO, hit), &ctx),
            Some(Command::Select(hit))
        );
        assert_eq!(tool.on_pointer_move(input(pos2(50.0, 0.0), hit), &ctx), None);
    }

    #[test]
    fn empty_canvas_clears_selection() {
        let document = Document::new();
        let ctx = ToolContext {
            document: &document,
            path_kind: &PathKind::Journey,
            read_only: false,
        };
        let mut tool = SelectTool::default();
        assert_eq!(
            tool.on_pointer_down(input(Pos2::ZERO, None), &ctx),
            Some(Command::Select(None))
        );
    }
}
