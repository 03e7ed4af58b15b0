use egui::{Pos2, Vec2};

use super::{CommandResult, Undoable};
use crate::document::RemovedElement;
use crate::element::{ElementKind, ElementPatch, PathKind};
use crate::error::CommandError;
use crate::event::EditorEvent;
use crate::id_generator::{ElementId, PathId};
use crate::path::{PathPatch, StoryPath};
use crate::selection::SelectionTarget;
use crate::state::EditorContext;
use crate::viewport::ZoomDirection;

/// Every change the editor can make, to the document or to the view.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddElement {
        kind: ElementKind,
        position: Pos2,
    },
    /// One step of a drag. Not recorded; the gesture ends with [`Command::CommitMove`].
    MoveElement {
        id: ElementId,
        position: Pos2,
    },
    CommitMove {
        id: ElementId,
        from: Pos2,
        to: Pos2,
    },
    UpdateElement {
        id: ElementId,
        patch: ElementPatch,
    },
    RemoveElement {
        id: ElementId,
    },
    RestoreElement(RemovedElement),
    AddPath {
        from: ElementId,
        to: ElementId,
        kind: PathKind,
    },
    UpdatePath {
        id: PathId,
        patch: PathPatch,
    },
    AddWaypoint {
        id: PathId,
        position: Pos2,
    },
    RemovePath {
        id: PathId,
    },
    RestorePath {
        index: usize,
        path: StoryPath,
    },
    DeleteSelection,
    Select(Option<SelectionTarget>),
    SetElementKind(ElementKind),
    SetPathKind(PathKind),
    Pan {
        delta: Vec2,
    },
    ZoomAt {
        anchor: Pos2,
        direction: ZoomDirection,
    },
    ResetView,
}

impl Command {
    /// True for commands that change the document. These are refused on a read-only map.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::AddElement { .. }
                | Self::MoveElement { .. }
                | Self::CommitMove { .. }
                | Self::UpdateElement { .. }
                | Self::RemoveElement { .. }
                | Self::RestoreElement(_)
                | Self::AddPath { .. }
                | Self::UpdatePath { .. }
                | Self::AddWaypoint { .. }
                | Self::RemovePath { .. }
                | Self::RestorePath { .. }
                | Self::DeleteSelection
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::AddElement { .. } => "Add element",
            Self::MoveElement { .. } | Self::CommitMove { .. } => "Move element",
            Self::UpdateElement { .. } => "Edit element",
            Self::RemoveElement { .. } => "Delete element",
            Self::RestoreElement(_) => "Restore element",
            Self::AddPath { .. } => "Add path",
            Self::UpdatePath { .. } => "Edit path",
            Self::AddWaypoint { .. } => "Add waypoint",
            Self::RemovePath { .. } => "Delete path",
            Self::RestorePath { .. } => "Restore path",
            Self::DeleteSelection => "Delete selection",
            Self::Select(_) => "Select",
            Self::SetElementKind(_) => "Set element type",
            Self::SetPathKind(_) => "Set path type",
            Self::Pan { .. } => "Pan",
            Self::ZoomAt { .. } => "Zoom",
            Self::ResetView => "Reset view",
        }
    }

    /// Applies the command. Document changes that took effect come back as an
    /// [`Undoable`]; commands naming something that does not exist are no-ops.
    pub fn execute(&self, ctx: &mut EditorContext) -> CommandResult {
        if ctx.read_only && self.is_mutation() {
            log::warn!("{} refused: map is read-only", self.name());
            return Err(CommandError::ReadOnly);
        }

        match self {
            Self::AddElement { kind, position } => {
                let element = ctx.document.add_element(kind.clone(), *position).clone();
                let id = element.id();
                let index = ctx.document.elements().len() - 1;
                log::info!("Added {} {} at ({:.1}, {:.1})", kind, id, position.x, position.y);
                ctx.event_bus.emit(EditorEvent::ElementAdded(id));
                ctx.select(Some(SelectionTarget::Element(id)));
                Ok(Some(Undoable {
                    redo: Self::RestoreElement(RemovedElement {
                        index,
                        element,
                        paths: Vec::new(),
                    }),
                    undo: Self::RemoveElement { id },
                }))
            }
            Self::MoveElement { id, position } => {
                ctx.document.move_element(*id, *position);
                Ok(None)
            }
            Self::CommitMove { id, from, to } => {
                if ctx.document.move_element(*id, *to).is_none() {
                    return Ok(None);
                }
                log::debug!("Moved {} to ({:.1}, {:.1})", id, to.x, to.y);
                ctx.event_bus.emit(EditorEvent::ElementMoved {
                    id: *id,
                    position: *to,
                });
                Ok(Some(Undoable {
                    redo: self.clone(),
                    undo: Self::CommitMove {
                        id: *id,
                        from: *to,
                        to: *from,
                    },
                }))
            }
            Self::UpdateElement { id, patch } => {
                if patch.is_empty() {
                    return Ok(None);
                }
                let Some(inverse) = ctx.document.update_element(*id, patch.clone()) else {
                    return Ok(None);
                };
                ctx.event_bus.emit(EditorEvent::ElementUpdated(*id));
                Ok(Some(Undoable {
                    redo: self.clone(),
                    undo: Self::UpdateElement {
                        id: *id,
                        patch: inverse,
                    },
                }))
            }
            Self::RemoveElement { id } => {
                let Some(removed) = ctx.document.remove_element(*id) else {
                    return Ok(None);
                };
                log::info!("Removed {} and {} path(s)", id, removed.paths.len());
                if ctx.selection.is_some_and(|target| target.was_removed_with(&removed)) {
                    ctx.select(None);
                }
                ctx.event_bus.emit(EditorEvent::ElementRemoved {
                    id: *id,
                    cascaded: removed.path_ids().collect(),
                });
                Ok(Some(Undoable {
                    redo: self.clone(),
                    undo: Self::RestoreElement(removed),
                }))
            }
            Self::RestoreElement(removed) => {
                let id = removed.element.id();
                if !ctx.document.restore_element(removed.clone()) {
                    log::warn!("Could not restore {}: id already in use", id);
                    return Ok(None);
                }
                ctx.event_bus.emit(EditorEvent::ElementAdded(id));
                for path in removed.path_ids() {
                    ctx.event_bus.emit(EditorEvent::PathAdded(path));
                }
                Ok(Some(Undoable {
                    redo: self.clone(),
                    undo: Self::RemoveElement { id },
                }))
            }
            Self::AddPath { from, to, kind } => {
                let path = match ctx.document.add_path(*from, *to, kind.clone()) {
                    Ok(path) => path.clone(),
                    Err(err) => {
                        log::warn!("Path {} -> {} refused: {}", from, to, err);
                        return Err(err.into());
                    }
                };
                let id = path.id();
                let index = ctx.document.paths().len() - 1;
                log::info!("Added {} path {} from {} to {}", kind, id, from, to);
                ctx.event_bus.emit(EditorEvent::PathAdded(id));
                Ok(Some(Undoable {
                    redo: Self::RestorePath { index, path },
                    undo: Self::RemovePath { id },
                }))
            }
            Self::UpdatePath { id, patch } => {
                let Some(inverse) = ctx.document.update_path(*id, patch.clone()) else {
                    return Ok(None);
                };
                ctx.event_bus.emit(EditorEvent::PathUpdated(*id));
                Ok(Some(Undoable {
                    redo: self.clone(),
                    undo: Self::UpdatePath {
                        id: *id,
                        patch: inverse,
                    },
                }))
            }
            Self::AddWaypoint { id, position } => {
                let Some(path) = ctx.document.path(*id) else {
                    return Ok(None);
                };
                let mut waypoints = path.waypoints().to_vec();
                waypoints.push(*position);
                Self::UpdatePath {
                    id: *id,
                    patch: PathPatch {
                        waypoints: Some(waypoints),
                        ..Default::default()
                    },
                }
                .execute(ctx)
            }
            Self::RemovePath { id } => {
                let Some((index, path)) = ctx.document.remove_path(*id) else {
                    return Ok(None);
                };
                log::info!("Removed path {}", id);
                if ctx.selection == Some(SelectionTarget::Path(*id)) {
                    ctx.select(None);
                }
                ctx.event_bus.emit(EditorEvent::PathRemoved(*id));
                Ok(Some(Undoable {
                    redo: self.clone(),
                    undo: Self::RestorePath { index, path },
                }))
            }
            Self::RestorePath { index, path } => {
                let id = path.id();
                ctx.document.insert_path(Some(*index), path.clone())?;
                ctx.event_bus.emit(EditorEvent::PathAdded(id));
                Ok(Some(Undoable {
                    redo: self.clone(),
                    undo: Self::RemovePath { id },
                }))
            }
            Self::DeleteSelection => match ctx.selection {
                Some(SelectionTarget::Element(id)) => Self::RemoveElement { id }.execute(ctx),
                Some(SelectionTarget::Path(id)) => Self::RemovePath { id }.execute(ctx),
                None => Ok(None),
            },
            Self::Select(target) => {
                ctx.select(*target);
                Ok(None)
            }
            Self::SetElementKind(kind) => {
                ctx.element_kind = kind.clone();
                Ok(None)
            }
            Self::SetPathKind(kind) => {
                ctx.path_kind = kind.clone();
                Ok(None)
            }
            Self::Pan { delta } => {
                if *delta != Vec2::ZERO {
                    ctx.viewport.pan(*delta);
                    ctx.emit_view_changed();
                }
                Ok(None)
            }
            Self::ZoomAt { anchor, direction } => {
                if ctx.viewport.zoom_at(*anchor, *direction) {
                    ctx.emit_view_changed();
                }
                Ok(None)
            }
            Self::ResetView => {
                ctx.viewport.reset();
                ctx.emit_view_changed();
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::viewport::Viewport;
    use egui::pos2;

    fn context() -> EditorContext {
        EditorContext::new(Document::new(), Viewport::default(), false)
    }

    #[test]
    fn add_element_selects_it() {
        let mut ctx = context();
        let entry = Command::AddElement {
            kind: ElementKind::Ruin,
            position: pos2(1.0, 2.0),
        }
        .execute(&mut ctx)
        .unwrap()
        .unwrap();

        let Command::RemoveElement { id } = entry.undo else {
            panic!("unexpected undo command {:?}", entry.undo);
        };
        assert_eq!(ctx.selection(), Some(SelectionTarget::Element(id)));
    }

    #[test]
    fn drag_steps_are_not_recorded() {
        let mut ctx = context();
        let id = ctx.document.add_element(ElementKind::Ruin, Pos2::ZERO).id();
        let result = Command::MoveElement {
            id,
            position: pos2(5.0, 5.0),
        }
        .execute(&mut ctx);
        assert_eq!(result, Ok(None));
        assert_eq!(ctx.document.element(id).unwrap().position(), pos2(5.0, 5.0));
    }

    #[test]
    fn read_only_refuses_mutations_but_not_view_changes() {
        let mut ctx = EditorContext::new(Document::new(), Viewport::default(), true);
        let add = Command::AddElement {
            kind: ElementKind::Ruin,
            position: Pos2::ZERO,
        };
        assert_eq!(add.execute(&mut ctx), Err(CommandError::ReadOnly));
        assert!(ctx.document.elements().is_empty());

        let pan = Command::Pan {
            delta: Vec2::new(10.0, 0.0),
        };
        assert_eq!(pan.execute(&mut ctx), Ok(None));
        assert_eq!(ctx.viewport.offset(), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn removing_an_endpoint_clears_selected_path() {
        let mut ctx = context();
        let a = ctx.document.add_element(ElementKind::Ruin, Pos2::ZERO).id();
        let b = ctx.document.add_element(ElementKind::Ruin, pos2(100.0, 0.0)).id();
        let path = ctx.document.add_path(a, b, PathKind::Journey).unwrap().id();
        ctx.select(Some(SelectionTarget::Path(path)));

        Command::RemoveElement { id: b }.execute(&mut ctx).unwrap();

        assert_eq!(ctx.selection(), None);
        assert!(ctx.document.paths().is_empty());
    }

    #[test]
    fn missing_targets_are_no_ops() {
        let mut ctx = context();
        let ghost = crate::id_generator::generate_element_id();
        assert_eq!(Command::RemoveElement { id: ghost }.execute(&mut ctx), Ok(None));
        assert_eq!(
            Command::Select(Some(SelectionTarget::Element(ghost))).execute(&mut ctx),
            Ok(None)
        );
        assert_eq!(ctx.selection(), None);
    }

    #[test]
    fn waypoints_append_in_order() {
        let mut ctx = context();
        let a = ctx.document.add_element(ElementKind::Ruin, Pos2::ZERO).id();
        let b = ctx.document.add_element(ElementKind::Ruin, pos2(100.0, 0.0)).id();
        let id = ctx.document.add_path(a, b, PathKind::LeyLine).unwrap().id();

        for x in [25.0, 75.0] {
            Command::AddWaypoint {
                id,
                position: pos2(x, 10.0),
            }
            .execute(&mut ctx)
            .unwrap();
        }

        assert_eq!(
            ctx.document.path(id).unwrap().waypoints(),
            &[pos2(25.0, 10.0), pos2(75.0, 10.0)]
        );
    }
}
