use egui::Pos2;
use serde::{Deserialize, Serialize};

mod kind;

pub use kind::{ElementKind, Glyph, PathKind};

use crate::id_generator::{ElementId, generate_element_id};

pub const DEFAULT_SCALE: f32 = 1.0;
pub const MIN_ELEMENT_SCALE: f32 = 0.5;
pub const MAX_ELEMENT_SCALE: f32 = 2.0;

/// A typed location placed on the map.
///
/// Serialized as `{id, type, x, y, name, description, scale, rotation}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapElement {
    id: ElementId,
    #[serde(rename = "type")]
    kind: ElementKind,
    x: f32,
    y: f32,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_scale")]
    scale: f32,
    #[serde(default)]
    rotation: f32,
}

fn default_scale() -> f32 {
    DEFAULT_SCALE
}

/// A partial update of an element's editable attributes. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub scale: Option<f32>,
    pub rotation: Option<f32>,
}

impl ElementPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.scale.is_none()
            && self.rotation.is_none()
    }

    /// Takes every field `later` sets, keeping ours where it sets nothing.
    pub fn overlay(&mut self, later: &Self) {
        if later.name.is_some() {
            self.name.clone_from(&later.name);
        }
        if later.description.is_some() {
            self.description.clone_from(&later.description);
        }
        self.scale = later.scale.or(self.scale);
        self.rotation = later.rotation.or(self.rotation);
    }
}

impl MapElement {
    /// Creates an element with a fresh id and default attributes.
    pub fn new(kind: ElementKind, position: Pos2) -> Self {
        Self::with_id(generate_element_id(), kind, position)
    }

    pub fn with_id(id: ElementId, kind: ElementKind, position: Pos2) -> Self {
        Self {
            id,
            kind,
            x: position.x,
            y: position.y,
            name: String::new(),
            description: String::new(),
            scale: DEFAULT_SCALE,
            rotation: 0.0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.set_scale(scale);
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.set_rotation(rotation);
        self
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn position(&self) -> Pos2 {
        Pos2::new(self.x, self.y)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Rotation in degrees, within `[0, 360)`
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub(crate) fn set_position(&mut self, position: Pos2) {
        self.x = position.x;
        self.y = position.y;
    }

    fn set_scale(&mut self, scale: f32) {
        if scale.is_finite() {
            self.scale = scale.clamp(MIN_ELEMENT_SCALE, MAX_ELEMENT_SCALE);
        }
    }

    fn set_rotation(&mut self, rotation: f32) {
        if rotation.is_finite() {
            self.rotation = rotation.rem_euclid(360.0);
        }
    }

    /// Applies `patch` and returns the patch that would undo it.
    pub(crate) fn apply_patch(&mut self, patch: ElementPatch) -> ElementPatch {
        let mut inverse = ElementPatch::default();
        if let Some(name) = patch.name {
            inverse.name = Some(std::mem::replace(&mut self.name, name));
        }
        if let Some(description) = patch.description {
            inverse.description = Some(std::mem::replace(&mut self.description, description));
        }
        if let Some(scale) = patch.scale {
            inverse.scale = Some(self.scale);
            self.set_scale(scale);
        }
        if let Some(rotation) = patch.rotation {
            inverse.rotation = Some(self.rotation);
            self.set_rotation(rotation);
        }
        inverse
    }

    /// Brings values from host data into the editable ranges.
    pub(crate) fn normalized(mut self) -> Self {
        let (scale, rotation) = (self.scale, self.rotation);
        self.scale = DEFAULT_SCALE;
        self.rotation = 0.0;
        self.set_scale(scale);
        self.set_rotation(rotation);
        self
    }
}
