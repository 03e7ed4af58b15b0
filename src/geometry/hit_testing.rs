use egui::Pos2;

use crate::document::Document;
use crate::element::MapElement;
use crate::id_generator::{ElementId, PathId};
use crate::selection::SelectionTarget;

/// Hit radius of an element at scale 1, in world units.
pub const ELEMENT_HIT_RADIUS: f32 = 24.0;

/// World-space tolerances used when resolving a pointer to a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTolerance {
    /// Multiplied by each element's scale
    pub element_radius: f32,
    /// Maximum distance from a path polyline
    pub path_distance: f32,
}

impl Default for HitTolerance {
    fn default() -> Self {
        Self {
            element_radius: ELEMENT_HIT_RADIUS,
            path_distance: 6.0,
        }
    }
}

pub fn element_radius(element: &MapElement, base_radius: f32) -> f32 {
    base_radius * element.scale()
}

pub fn element_contains(element: &MapElement, pos: Pos2, base_radius: f32) -> bool {
    element.position().distance(pos) <= element_radius(element, base_radius)
}

/// Distance from `p` to the segment `a`–`b`.
pub fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Distance from `p` to the nearest segment of `points`, `None` for fewer than two points.
pub fn distance_to_polyline(p: Pos2, points: &[Pos2]) -> Option<f32> {
    points
        .windows(2)
        .map(|segment| distance_to_segment(p, segment[0], segment[1]))
        .reduce(f32::min)
}

/// The topmost element under `pos`. Later elements are drawn above earlier ones, so
/// they win on overlap.
pub fn element_at(document: &Document, pos: Pos2, base_radius: f32) -> Option<ElementId> {
    document
        .elements()
        .iter()
        .rev()
        .find(|element| element_contains(element, pos, base_radius))
        .map(MapElement::id)
}

/// The topmost path within `tolerance` of `pos`. Paths that do not resolve are skipped.
pub fn path_at(document: &Document, pos: Pos2, tolerance: f32) -> Option<PathId> {
    document
        .paths()
        .iter()
        .rev()
        .find(|path| {
            document
                .path_polyline(path)
                .and_then(|points| distance_to_polyline(pos, &points))
                .is_some_and(|distance| distance <= tolerance)
        })
        .map(|path| path.id())
}

/// Resolves a world-space point to at most one target. Elements take priority over paths.
pub fn hit_test(
    document: &Document,
    pos: Pos2,
    tolerance: HitTolerance,
) -> Option<SelectionTarget> {
    element_at(document, pos, tolerance.element_radius)
        .map(SelectionTarget::Element)
        .or_else(|| path_at(document, pos, tolerance.path_distance).map(SelectionTarget::Path))
}
