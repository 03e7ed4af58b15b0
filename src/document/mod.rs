//! The map document: elements plus the story paths between them.
//!
//! `Document` is the single owner of the dangling-path invariant. Removing an element
//! always removes the paths that reference it in the same call, and paths can only be
//! added between two distinct elements that exist.
use egui::Pos2;

mod elements;
mod paths;

pub use elements::EntityStore;
pub use paths::{PathGraph, polyline, resolve_endpoints};

use crate::element::{ElementKind, ElementPatch, MapElement, PathKind};
use crate::error::PathError;
use crate::id_generator::{ElementId, PathId};
use crate::path::{PathPatch, StoryPath};

/// Everything taken out of the document by [`Document::remove_element`].
///
/// Holding on to it is enough to put the document back exactly as it was.
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedElement {
    pub index: usize,
    pub element: MapElement,
    /// Cascaded paths with their former indices, ascending
    pub paths: Vec<(usize, StoryPath)>,
}

impl RemovedElement {
    pub fn path_ids(&self) -> impl Iterator<Item = PathId> + '_ {
        self.paths.iter().map(|(_, path)| path.id())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    elements: EntityStore,
    paths: PathGraph,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a document from host data.
    ///
    /// Elements with a repeated id and paths that are self-loops, dangling, or repeated
    /// are dropped with a warning so the invariants hold from the start.
    pub fn from_parts(elements: Vec<MapElement>, paths: Vec<StoryPath>) -> Self {
        let mut document = Self::new();
        for element in elements {
            let id = element.id();
            if !document.elements.insert(element.normalized()) {
                log::warn!("Dropping element with duplicate id {}", id);
            }
        }
        for path in paths {
            let id = path.id();
            if let Err(err) = document.paths.insert(None, path, &document.elements) {
                log::warn!("Dropping path {}: {}", id, err);
            }
        }
        document
    }

    pub fn into_parts(self) -> (Vec<MapElement>, Vec<StoryPath>) {
        (
            self.elements.iter().cloned().collect(),
            self.paths.iter().cloned().collect(),
        )
    }

    pub fn elements(&self) -> &EntityStore {
        &self.elements
    }

    pub fn paths(&self) -> &PathGraph {
        &self.paths
    }

    pub fn element(&self, id: ElementId) -> Option<&MapElement> {
        self.elements.get(id)
    }

    pub fn path(&self, id: PathId) -> Option<&StoryPath> {
        self.paths.get(id)
    }

    pub fn add_element(&mut self, kind: ElementKind, position: Pos2) -> &MapElement {
        self.elements.add(kind, position)
    }

    /// Appends a fully-formed element. Returns `false` if the id is already used.
    pub fn insert_element(&mut self, element: MapElement) -> bool {
        self.elements.insert(element.normalized())
    }

    /// Returns the previous position, or `None` when `id` does not exist.
    pub fn move_element(&mut self, id: ElementId, position: Pos2) -> Option<Pos2> {
        self.elements.move_to(id, position)
    }

    /// Returns the inverse patch, or `None` when `id` does not exist.
    pub fn update_element(&mut self, id: ElementId, patch: ElementPatch) -> Option<ElementPatch> {
        self.elements.update_attributes(id, patch)
    }

    /// Removes an element together with every path that references it.
    pub fn remove_element(&mut self, id: ElementId) -> Option<RemovedElement> {
        let (index, element) = self.elements.remove(id)?;
        let paths = self.paths.cascade_remove_referencing(id);
        Some(RemovedElement {
            index,
            element,
            paths,
        })
    }

    /// Reverses a [`Document::remove_element`].
    pub fn restore_element(&mut self, removed: RemovedElement) -> bool {
        if !self.elements.insert_at(removed.index, removed.element) {
            return false;
        }
        for (index, path) in removed.paths {
            let id = path.id();
            if let Err(err) = self.paths.insert(Some(index), path, &self.elements) {
                log::warn!("Could not restore path {}: {}", id, err);
            }
        }
        true
    }

    pub fn add_path(
        &mut self,
        from: ElementId,
        to: ElementId,
        kind: PathKind,
    ) -> Result<&StoryPath, PathError> {
        self.paths.add(from, to, kind, &self.elements)
    }

    /// Inserts a fully-formed path, at `index` when given.
    pub fn insert_path(&mut self, index: Option<usize>, path: StoryPath) -> Result<(), PathError> {
        self.paths.insert(index, path, &self.elements)
    }

    pub fn remove_path(&mut self, id: PathId) -> Option<(usize, StoryPath)> {
        self.paths.remove(id)
    }

    pub fn update_path(&mut self, id: PathId, patch: PathPatch) -> Option<PathPatch> {
        self.paths.update(id, patch)
    }

    pub fn resolve_endpoints(&self, path: &StoryPath) -> Option<(Pos2, Pos2)> {
        resolve_endpoints(path, &self.elements)
    }

    pub fn path_polyline(&self, path: &StoryPath) -> Option<Vec<Pos2>> {
        polyline(path, &self.elements)
    }

    /// Paths whose endpoints both resolve, with their world-space polylines.
    pub fn resolved_paths(&self) -> impl Iterator<Item = (&StoryPath, Vec<Pos2>)> {
        self.paths
            .iter()
            .filter_map(|path| self.path_polyline(path).map(|points| (path, points)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn two_elements() -> (Document, ElementId, ElementId) {
        let mut document = Document::new();
        let a = document.add_element(ElementKind::Settlement, pos2(0.0, 0.0)).id();
        let b = document.add_element(ElementKind::Mountain, pos2(100.0, 0.0)).id();
        (document, a, b)
    }

    #[test]
    fn remove_cascades_to_paths() {
        let (mut document, a, b) = two_elements();
        let c = document.add_element(ElementKind::Ruin, pos2(0.0, 100.0)).id();
        let ab = document.add_path(a, b, PathKind::Journey).unwrap().id();
        let bc = document.add_path(b, c, PathKind::LeyLine).unwrap().id();

        let removed = document.remove_element(a).unwrap();
        assert_eq!(removed.path_ids().collect::<Vec<_>>(), vec![ab]);
        assert!(document.path(ab).is_none());
        assert!(document.path(bc).is_some());
        assert_eq!(document.paths().referencing(a).count(), 0);
    }

    #[test]
    fn restore_puts_everything_back_in_place() {
        let (mut document, a, b) = two_elements();
        let c = document.add_element(ElementKind::Ruin, pos2(0.0, 100.0)).id();
        document.add_path(b, c, PathKind::Journey).unwrap();
        document.add_path(a, b, PathKind::Journey).unwrap();
        document.add_path(c, b, PathKind::TradeRoute).unwrap();
        let before = document.clone();

        let removed = document.remove_element(b).unwrap();
        assert!(document.paths().is_empty());
        assert!(document.restore_element(removed));
        assert_eq!(document, before);
    }

    #[test]
    fn missing_ids_are_no_ops() {
        let (mut document, a, _) = two_elements();
        let removed = document.remove_element(a).unwrap();
        let before = document.clone();

        assert!(document.move_element(a, pos2(5.0, 5.0)).is_none());
        assert!(document.update_element(a, ElementPatch::default()).is_none());
        assert!(document.remove_element(removed.element.id()).is_none());
        assert_eq!(document, before);
    }

    #[test]
    fn from_parts_drops_invalid_records() {
        let a = MapElement::new(ElementKind::River, pos2(0.0, 0.0));
        let b = MapElement::new(ElementKind::Hollow, pos2(10.0, 0.0));
        let ghost = crate::id_generator::generate_element_id();
        let good = StoryPath::new(a.id(), b.id(), PathKind::Journey);
        let paths = vec![
            good.clone(),
            good.clone(),
            StoryPath::new(a.id(), a.id(), PathKind::Journey),
            StoryPath::new(a.id(), ghost, PathKind::Journey),
        ];
        let document = Document::from_parts(vec![a.clone(), b, a], paths);
        assert_eq!(document.elements().len(), 2);
        assert_eq!(document.paths().len(), 1);
        assert_eq!(document.paths().as_slice()[0], good);
    }

    #[test]
    fn polyline_runs_through_waypoints() {
        let (mut document, a, b) = two_elements();
        let id = document.add_path(a, b, PathKind::Journey).unwrap().id();
        document.update_path(
            id,
            PathPatch {
                waypoints: Some(vec![pos2(50.0, 40.0)]),
                ..Default::default()
            },
        );
        let path = document.path(id).unwrap();
        assert_eq!(
            document.path_polyline(path).unwrap(),
            vec![pos2(0.0, 0.0), pos2(50.0, 40.0), pos2(100.0, 0.0)]
        );
    }
}
