use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::element::PathKind;
use crate::id_generator::{ElementId, PathId, generate_path_id};

/// A typed connection between two map elements, bent through optional waypoints.
///
/// Serialized as `{id, fromId, toId, type, description, waypoints}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryPath {
    id: PathId,
    from_id: ElementId,
    to_id: ElementId,
    #[serde(rename = "type")]
    kind: PathKind,
    #[serde(default)]
    description: String,
    #[serde(default)]
    waypoints: Vec<Pos2>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathPatch {
    pub kind: Option<PathKind>,
    pub description: Option<String>,
    pub waypoints: Option<Vec<Pos2>>,
}

impl PathPatch {
    /// Takes every field `later` sets, keeping ours where it sets nothing.
    pub fn overlay(&mut self, later: &Self) {
        if later.kind.is_some() {
            self.kind.clone_from(&later.kind);
        }
        if later.description.is_some() {
            self.description.clone_from(&later.description);
        }
        if later.waypoints.is_some() {
            self.waypoints.clone_from(&later.waypoints);
        }
    }
}

impl StoryPath {
    /// Creates an unattached path value. It is validated when it enters a document.
    pub fn new(from_id: ElementId, to_id: ElementId, kind: PathKind) -> Self {
        Self::with_id(generate_path_id(), from_id, to_id, kind)
    }

    pub fn with_id(id: PathId, from_id: ElementId, to_id: ElementId, kind: PathKind) -> Self {
        Self {
            id,
            from_id,
            to_id,
            kind,
            description: String::new(),
            waypoints: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_waypoints(mut self, waypoints: Vec<Pos2>) -> Self {
        self.waypoints = waypoints;
        self
    }

    pub fn id(&self) -> PathId {
        self.id
    }

    pub fn from_id(&self) -> ElementId {
        self.from_id
    }

    pub fn to_id(&self) -> ElementId {
        self.to_id
    }

    pub fn kind(&self) -> &PathKind {
        &self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn waypoints(&self) -> &[Pos2] {
        &self.waypoints
    }

    pub fn references(&self, element: ElementId) -> bool {
        self.from_id == element || self.to_id == element
    }

    /// Applies `patch` and returns the patch that would undo it.
    pub(crate) fn apply_patch(&mut self, patch: PathPatch) -> PathPatch {
        let mut inverse = PathPatch::default();
        if let Some(kind) = patch.kind {
            inverse.kind = Some(std::mem::replace(&mut self.kind, kind));
        }
        if let Some(description) = patch.description {
            inverse.description = Some(std::mem::replace(&mut self.description, description));
        }
        if let Some(waypoints) = patch.waypoints {
            inverse.waypoints = Some(std::mem::replace(&mut self.waypoints, waypoints));
        }
        inverse
    }
}
