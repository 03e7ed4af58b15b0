use egui::{Pos2, Vec2};

use crate::id_generator::{ElementId, PathId};
use crate::selection::SelectionTarget;
use crate::tools::ToolMode;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    ElementAdded(ElementId),
    ElementMoved {
        id: ElementId,
        position: Pos2,
    },
    ElementUpdated(ElementId),
    ElementRemoved {
        id: ElementId,
        /// Paths removed along with the element
        cascaded: Vec<PathId>,
    },
    PathAdded(PathId),
    PathUpdated(PathId),
    PathRemoved(PathId),
    SelectionChanged {
        old: Option<SelectionTarget>,
        new: Option<SelectionTarget>,
    },
    ToolChanged {
        old: ToolMode,
        new: ToolMode,
    },
    ViewChanged {
        offset: Vec2,
        scale: f32,
    },
    Saved {
        elements: usize,
        paths: usize,
    },
}

impl EditorEvent {
    /// One-line summary for the activity pane
    pub fn describe(&self) -> String {
        match self {
            Self::ElementAdded(id) => format!("Added {}", id),
            Self::ElementMoved { id, position } => {
                format!("Moved {} to ({:.0}, {:.0})", id, position.x, position.y)
            }
            Self::ElementUpdated(id) => format!("Edited {}", id),
            Self::ElementRemoved { id, cascaded } if cascaded.is_empty() => {
                format!("Removed {}", id)
            }
            Self::ElementRemoved { id, cascaded } => {
                format!("Removed {} and {} path(s)", id, cascaded.len())
            }
            Self::PathAdded(id) => format!("Added {}", id),
            Self::PathUpdated(id) => format!("Edited {}", id),
            Self::PathRemoved(id) => format!("Removed {}", id),
            Self::SelectionChanged { new: Some(_), .. } => "Selection changed".to_owned(),
            Self::SelectionChanged { new: None, .. } => "Selection cleared".to_owned(),
            Self::ToolChanged { new, .. } => format!("Tool: {}", new.name()),
            Self::ViewChanged { scale, .. } => format!("Zoom {:.0}%", scale * 100.0),
            Self::Saved { elements, paths } => {
                format!("Saved {} element(s), {} path(s)", elements, paths)
            }
        }
    }
}
