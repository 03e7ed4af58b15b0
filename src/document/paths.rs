use egui::Pos2;

use super::EntityStore;
use crate::element::PathKind;
use crate::error::PathError;
use crate::id_generator::{ElementId, PathId};
use crate::path::{PathPatch, StoryPath};

/// Insertion-ordered collection of story paths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathGraph {
    paths: Vec<StoryPath>,
}

impl PathGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &StoryPath> {
        self.paths.iter()
    }

    pub fn as_slice(&self) -> &[StoryPath] {
        &self.paths
    }

    pub fn get(&self, id: PathId) -> Option<&StoryPath> {
        self.paths.iter().find(|path| path.id() == id)
    }

    pub fn contains(&self, id: PathId) -> bool {
        self.get(id).is_some()
    }

    /// Paths with `element` as either endpoint
    pub fn referencing(&self, element: ElementId) -> impl Iterator<Item = &StoryPath> {
        self.paths.iter().filter(move |path| path.references(element))
    }

    fn index_of(&self, id: PathId) -> Option<usize> {
        self.paths.iter().position(|path| path.id() == id)
    }

    /// Checks that a path may connect `from` to `to` in `elements`.
    pub fn validate_endpoints(
        from: ElementId,
        to: ElementId,
        elements: &EntityStore,
    ) -> Result<(), PathError> {
        if from == to {
            return Err(PathError::SelfLoop(from));
        }
        for endpoint in [from, to] {
            if !elements.contains(endpoint) {
                return Err(PathError::MissingEndpoint(endpoint));
            }
        }
        Ok(())
    }

    pub(super) fn add(
        &mut self,
        from: ElementId,
        to: ElementId,
        kind: PathKind,
        elements: &EntityStore,
    ) -> Result<&StoryPath, PathError> {
        Self::validate_endpoints(from, to, elements)?;
        let index = self.paths.len();
        self.paths.push(StoryPath::new(from, to, kind));
        Ok(&self.paths[index])
    }

    /// Inserts an existing path, at `index` when given, after validating it.
    pub(super) fn insert(
        &mut self,
        index: Option<usize>,
        path: StoryPath,
        elements: &EntityStore,
    ) -> Result<(), PathError> {
        if self.contains(path.id()) {
            return Err(PathError::DuplicateId(path.id()));
        }
        Self::validate_endpoints(path.from_id(), path.to_id(), elements)?;
        match index {
            Some(index) => self.paths.insert(index.min(self.paths.len()), path),
            None => self.paths.push(path),
        }
        Ok(())
    }

    pub(super) fn remove(&mut self, id: PathId) -> Option<(usize, StoryPath)> {
        let index = self.index_of(id)?;
        Some((index, self.paths.remove(index)))
    }

    pub(super) fn update(&mut self, id: PathId, patch: PathPatch) -> Option<PathPatch> {
        let path = self.paths.iter_mut().find(|path| path.id() == id)?;
        Some(path.apply_patch(patch))
    }

    /// Removes every path attached to `element`, returning them with their former indices
    /// in ascending order.
    pub(super) fn cascade_remove_referencing(
        &mut self,
        element: ElementId,
    ) -> Vec<(usize, StoryPath)> {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.paths.len());
        for (index, path) in std::mem::take(&mut self.paths).into_iter().enumerate() {
            if path.references(element) {
                removed.push((index, path));
            } else {
                kept.push(path);
            }
        }
        self.paths = kept;
        removed
    }
}

/// Current positions of both endpoints, or `None` if either is missing.
pub fn resolve_endpoints(path: &StoryPath, elements: &EntityStore) -> Option<(Pos2, Pos2)> {
    let from = elements.position_of(path.from_id())?;
    let to = elements.position_of(path.to_id())?;
    Some((from, to))
}

/// The world-space polyline `from → waypoints → to`, or `None` for an unresolvable path.
pub fn polyline(path: &StoryPath, elements: &EntityStore) -> Option<Vec<Pos2>> {
    let (from, to) = resolve_endpoints(path, elements)?;
    let mut points = Vec::with_capacity(path.waypoints().len() + 2);
    points.push(from);
    points.extend_from_slice(path.waypoints());
    points.push(to);
    Some(points)
}
