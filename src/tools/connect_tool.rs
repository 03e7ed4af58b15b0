use crate::command::Command;
use crate::id_generator::ElementId;
use crate::selection::SelectionTarget;
use crate::tools::{PointerInput, Tool, ToolContext, ToolMode};

/// Creates story paths with two clicks: the start element, then the end element.
#[derive(Debug, Clone, Default)]
pub struct ConnectTool {
    pending_start: Option<ElementId>,
}

impl ConnectTool {
    pub fn pending_start(&self) -> Option<ElementId> {
        self.pending_start
    }
}

impl Tool for ConnectTool {
    fn mode(&self) -> ToolMode {
        ToolMode::Connect
    }

    fn deactivate(&mut self) -> Option<Command> {
        self.pending_start = None;
        None
    }

    fn on_pointer_down(&mut self, input: PointerInput, ctx: &ToolContext<'_>) -> Option<Command> {
        if ctx.read_only {
            return None;
        }
        match input.hit {
            Some(SelectionTarget::Element(id)) => match self.pending_start {
                None => {
                    log::debug!("Path start: {}", id);
                    self.pending_start = Some(id);
                    None
                }
                // Second click on the start element keeps waiting for an end
                Some(start) if start == id => None,
                Some(start) => {
                    self.pending_start = None;
                    Some(Command::AddPath {
                        from: start,
                        to: id,
                        kind: ctx.path_kind.clone(),
                    })
                }
            },
            Some(SelectionTarget::Path(_)) => None,
            None => {
                if self.pending_start.take().is_some() {
                    log::debug!("Path creation cancelled");
                }
                None
            }
        }
    }

    fn on_pointer_move(&mut self, _input: PointerInput, _ctx: &ToolContext<'_>) -> Option<Command> {
        None
    }

    fn on_pointer_up(&mut self, _input: PointerInput, _ctx: &ToolContext<'_>) -> Option<Command> {
        None
    }

    fn current_state_name(&self) -> &'static str {
        if self.pending_start.is_some() {
            "Awaiting end"
        } else {
            "Awaiting start"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::element::{ElementKind, PathKind};
    use egui::{Pos2, pos2};

    fn click(hit: Option<SelectionTarget>) -> PointerInput {
        PointerInput {
            screen: Pos2::ZERO,
            world: Pos2::ZERO,
            hit,
        }
    }

    #[test]
    fn two_clicks_make_a_path_of_the_current_kind() {
        let mut document = Document::new();
        let a = document.add_element(ElementKind::Ruin, Pos2::ZERO).id();
        let b = document.add_element(ElementKind::Ruin, pos2(100.0, 0.0)).id();
        let kind = PathKind::TradeRoute;
        let ctx = ToolContext {
            document: &document,
            path_kind: &kind,
            read_only: false,
        };
        let mut tool = ConnectTool::default();

        assert_eq!(tool.on_pointer_down(click(Some(a.into())), &ctx), None);
        assert_eq!(tool.pending_start(), Some(a));
        assert_eq!(tool.on_pointer_down(click(Some(a.into())), &ctx), None);
        assert_eq!(tool.pending_start(), Some(a));
        assert_eq!(
            tool.on_pointer_down(click(Some(b.into())), &ctx),
            Some(Command::AddPath {
                from: a,
                to: b,
                kind: PathKind::TradeRoute
            })
        );
        assert_eq!(tool.pending_start(), None);
    }

    #[test]
    fn empty_click_and_deactivate_cancel() {
        let mut document = Document::new();
        let a = document.add_element(ElementKind::Ruin, Pos2::ZERO).id();
        let ctx = ToolContext {
            document: &document,
            path_kind: &PathKind::Journey,
            read_only: false,
        };
        let mut tool = ConnectTool::default();

        tool.on_pointer_down(click(Some(a.into())), &ctx);
        tool.on_pointer_down(click(None), &ctx);
        assert_eq!(tool.pending_start(), None);

        tool.on_pointer_down(click(Some(a.into())), &ctx);
        assert_eq!(tool.deactivate(), None);
        assert_eq!(tool.pending_start(), None);
    }
}
