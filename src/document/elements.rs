use egui::Pos2;

use crate::element::{ElementKind, ElementPatch, MapElement};
use crate::id_generator::ElementId;

/// Insertion-ordered collection of map elements.
///
/// Mutations are only reachable through [`super::Document`], which owns the rule that
/// removing an element also removes the paths attached to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityStore {
    elements: Vec<MapElement>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Elements in insertion order (render order, bottom to top).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &MapElement> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[MapElement] {
        &self.elements
    }

    pub fn get(&self, id: ElementId) -> Option<&MapElement> {
        self.elements.iter().find(|element| element.id() == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    pub fn position_of(&self, id: ElementId) -> Option<Pos2> {
        self.get(id).map(MapElement::position)
    }

    fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|element| element.id() == id)
    }

    fn get_mut(&mut self, id: ElementId) -> Option<&mut MapElement> {
        self.elements.iter_mut().find(|element| element.id() == id)
    }

    pub(super) fn add(&mut self, kind: ElementKind, position: Pos2) -> &MapElement {
        let index = self.elements.len();
        self.elements.push(MapElement::new(kind, position));
        &self.elements[index]
    }

    /// Appends an existing element. Returns `false` if its id is already taken.
    pub(super) fn insert(&mut self, element: MapElement) -> bool {
        if self.contains(element.id()) {
            return false;
        }
        self.elements.push(element);
        true
    }

    /// Puts a previously removed element back at its old index.
    pub(super) fn insert_at(&mut self, index: usize, element: MapElement) -> bool {
        if self.contains(element.id()) {
            return false;
        }
        let index = index.min(self.elements.len());
        self.elements.insert(index, element);
        true
    }

    /// Moves an element and returns its previous position, or `None` if it does not exist.
    pub(super) fn move_to(&mut self, id: ElementId, position: Pos2) -> Option<Pos2> {
        let element = self.get_mut(id)?;
        let previous = element.position();
        element.set_position(position);
        Some(previous)
    }

    /// Applies a partial attribute update and returns the inverse patch.
    pub(super) fn update_attributes(
        &mut self,
        id: ElementId,
        patch: ElementPatch,
    ) -> Option<ElementPatch> {
        let element = self.get_mut(id)?;
        Some(element.apply_patch(patch))
    }

    pub(super) fn remove(&mut self, id: ElementId) -> Option<(usize, MapElement)> {
        let index = self.index_of(id)?;
        Some((index, self.elements.remove(index)))
    }
}
