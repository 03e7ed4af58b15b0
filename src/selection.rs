use serde::{Deserialize, Serialize};

use crate::document::RemovedElement;
use crate::id_generator::{ElementId, PathId};

/// The one thing that can be selected at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionTarget {
    Element(ElementId),
    Path(PathId),
}

impl SelectionTarget {
    pub fn element_id(&self) -> Option<ElementId> {
        match self {
            Self::Element(id) => Some(*id),
            Self::Path(_) => None,
        }
    }

    pub fn path_id(&self) -> Option<PathId> {
        match self {
            Self::Path(id) => Some(*id),
            Self::Element(_) => None,
        }
    }

    /// True if this target disappeared with `removed` (the element or a cascaded path).
    pub fn was_removed_with(&self, removed: &RemovedElement) -> bool {
        match self {
            Self::Element(id) => *id == removed.element.id(),
            Self::Path(id) => removed.path_ids().any(|path| path == *id),
        }
    }
}

impl From<ElementId> for SelectionTarget {
    fn from(id: ElementId) -> Self {
        Self::Element(id)
    }
}

impl From<PathId> for SelectionTarget {
    fn from(id: PathId) -> Self {
        Self::Path(id)
    }
}
