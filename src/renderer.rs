//! Turns editor state into a flat list of screen-space draw commands.
//!
//! [`render_frame`] is pure so the output can be inspected in tests; [`paint`] hands the
//! commands to an egui painter. Z-order is the order of the list: background, grid,
//! paths, then elements in document order.
use egui::emath::Rot2;
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, Vec2, pos2, vec2};

use crate::config::EditorConfig;
use crate::document::Document;
use crate::element::{Glyph, MapElement};
use crate::id_generator::ElementId;
use crate::selection::SelectionTarget;
use crate::viewport::Viewport;

pub const BACKGROUND_COLOR: Color32 = Color32::from_rgb(0x1a, 0x1f, 0x2e);
pub const GRID_COLOR: Color32 = Color32::from_rgb(0x2a, 0x2f, 0x3e);
pub const SELECTION_COLOR: Color32 = Color32::from_rgb(0x3b, 0x82, 0xf6);
pub const PATH_START_COLOR: Color32 = Color32::from_rgb(0x22, 0xc5, 0x5e);

// Element geometry at scale 1, in world units
const BODY_RADIUS: f32 = 24.0;
const RING_RADIUS: f32 = 28.0;
const RING_WIDTH: f32 = 2.0;
const RING_DASH: (f32, f32) = (5.0, 5.0);
const LABEL_OFFSET: f32 = 30.0;
const LABEL_SIZE: f32 = 12.0;
const PATH_WIDTH: f32 = 3.0;
const PATH_DASH: (f32, f32) = (10.0, 5.0);
const RING_SEGMENTS: usize = 48;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        fill: Color32,
    },
    /// An open polyline, dashed as `(dash, gap)` when set
    Line {
        points: Vec<Pos2>,
        width: f32,
        color: Color32,
        dash: Option<(f32, f32)>,
    },
    Circle {
        center: Pos2,
        radius: f32,
        fill: Color32,
    },
    /// Must be convex
    Polygon {
        points: Vec<Pos2>,
        fill: Color32,
    },
    Text {
        /// Top center of the text
        pos: Pos2,
        text: String,
        size: f32,
        color: Color32,
    },
}

/// What a frame is drawn from
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub document: &'a Document,
    pub viewport: &'a Viewport,
    pub selection: Option<SelectionTarget>,
    pub pending_start: Option<ElementId>,
    pub canvas_size: Vec2,
    pub config: &'a EditorConfig,
}

pub fn render_frame(input: &RenderInput<'_>) -> Vec<DrawCommand> {
    let mut commands = vec![DrawCommand::Rect {
        rect: Rect::from_min_size(Pos2::ZERO, input.canvas_size),
        fill: BACKGROUND_COLOR,
    }];
    draw_grid(input, &mut commands);
    draw_paths(input, &mut commands);
    for element in input.document.elements().iter() {
        draw_element(input, element, &mut commands);
    }
    commands
}

fn draw_grid(input: &RenderInput<'_>, out: &mut Vec<DrawCommand>) {
    let spacing = input.config.grid_spacing;
    let extent = input.config.grid_extent;
    if spacing <= 0.0 || extent <= 0.0 {
        return;
    }
    let viewport = input.viewport;
    let visible = viewport.visible_world_rect(input.canvas_size);
    let width = viewport.world_len_to_screen(1.0);
    let count = (extent / spacing) as usize;

    for i in 0..count {
        let at = i as f32 * spacing;
        if (visible.min.x..=visible.max.x).contains(&at) {
            out.push(DrawCommand::Line {
                points: vec![
                    viewport.world_to_screen(pos2(at, 0.0)),
                    viewport.world_to_screen(pos2(at, extent)),
                ],
                width,
                color: GRID_COLOR,
                dash: None,
            });
        }
        if (visible.min.y..=visible.max.y).contains(&at) {
            out.push(DrawCommand::Line {
                points: vec![
                    viewport.world_to_screen(pos2(0.0, at)),
                    viewport.world_to_screen(pos2(extent, at)),
                ],
                width,
                color: GRID_COLOR,
                dash: None,
            });
        }
    }
}

fn draw_paths(input: &RenderInput<'_>, out: &mut Vec<DrawCommand>) {
    let viewport = input.viewport;
    for (path, points) in input.document.resolved_paths() {
        let points: Vec<Pos2> = points
            .into_iter()
            .map(|point| viewport.world_to_screen(point))
            .collect();
        let width = viewport.world_len_to_screen(PATH_WIDTH);
        if input.selection == Some(SelectionTarget::Path(path.id())) {
            out.push(DrawCommand::Line {
                points: points.clone(),
                width: width + 4.0,
                color: SELECTION_COLOR.gamma_multiply(0.6),
                dash: None,
            });
        }
        let dash = path.kind().is_dashed().then(|| {
            (
                viewport.world_len_to_screen(PATH_DASH.0),
                viewport.world_len_to_screen(PATH_DASH.1),
            )
        });
        out.push(DrawCommand::Line {
            points,
            width,
            color: path.kind().color().gamma_multiply(0.7),
            dash,
        });
    }
}

fn draw_element(input: &RenderInput<'_>, element: &MapElement, out: &mut Vec<DrawCommand>) {
    let viewport = input.viewport;
    let center = viewport.world_to_screen(element.position());
    let unit = viewport.world_len_to_screen(element.scale());
    let rotation = Rot2::from_angle(element.rotation().to_radians());
    // Maps a point in the element's local frame to the screen
    let local = |x: f32, y: f32| center + rotation * (vec2(x, y) * unit);

    let ring_color = if input.pending_start == Some(element.id()) {
        Some(PATH_START_COLOR)
    } else if input.selection == Some(SelectionTarget::Element(element.id())) {
        Some(SELECTION_COLOR)
    } else {
        None
    };
    if let Some(color) = ring_color {
        let radius = RING_RADIUS * unit;
        let points = (0..=RING_SEGMENTS)
            .map(|i| {
                let angle = i as f32 / RING_SEGMENTS as f32 * std::f32::consts::TAU;
                center + Vec2::angled(angle) * radius
            })
            .collect();
        out.push(DrawCommand::Line {
            points,
            width: RING_WIDTH * unit,
            color,
            dash: Some((RING_DASH.0 * unit, RING_DASH.1 * unit)),
        });
    }

    out.push(DrawCommand::Circle {
        center,
        radius: BODY_RADIUS * unit,
        fill: element.kind().color().gamma_multiply(0.8),
    });

    let glyph_color = Color32::WHITE.gamma_multiply(0.9);
    match element.kind().glyph() {
        Glyph::Triangle => {
            let points = (0..3)
                .map(|i| {
                    let angle = (i as f32 * 120.0 - 90.0).to_radians();
                    local(16.0 * angle.cos(), 16.0 * angle.sin())
                })
                .collect();
            out.push(DrawCommand::Polygon {
                points,
                fill: glyph_color,
            });
        }
        Glyph::Square => {
            let points = vec![
                local(-10.0, -10.0),
                local(10.0, -10.0),
                local(10.0, 10.0),
                local(-10.0, 10.0),
            ];
            out.push(DrawCommand::Polygon {
                points,
                fill: glyph_color,
            });
        }
        Glyph::Star => {
            let outline: Vec<Pos2> = (0..10)
                .map(|i| {
                    let radius = if i % 2 == 0 { 16.0 } else { 8.0 };
                    let angle = (i as f32 * 36.0 - 90.0).to_radians();
                    local(radius * angle.cos(), radius * angle.sin())
                })
                .collect();
            // A star is not convex; fan it out from the center
            for i in 0..outline.len() {
                out.push(DrawCommand::Polygon {
                    points: vec![center, outline[i], outline[(i + 1) % outline.len()]],
                    fill: glyph_color,
                });
            }
        }
        Glyph::Dot => out.push(DrawCommand::Circle {
            center,
            radius: 12.0 * unit,
            fill: glyph_color,
        }),
    }

    if !element.name().is_empty() {
        out.push(DrawCommand::Text {
            pos: local(0.0, LABEL_OFFSET),
            text: element.name().to_owned(),
            size: LABEL_SIZE * unit,
            color: Color32::WHITE,
        });
    }
}

/// Paints `commands` with their canvas-relative coordinates shifted by `origin`.
pub fn paint(painter: &Painter, origin: Vec2, commands: &[DrawCommand]) {
    for command in commands {
        match command {
            DrawCommand::Rect { rect, fill } => {
                painter.rect_filled(rect.translate(origin), 0.0, *fill);
            }
            DrawCommand::Line {
                points,
                width,
                color,
                dash,
            } => {
                let points: Vec<Pos2> = points.iter().map(|point| *point + origin).collect();
                let stroke = Stroke::new(*width, *color);
                match dash {
                    Some((dash, gap)) if *dash > 0.0 && *gap > 0.0 => {
                        painter.extend(Shape::dashed_line(&points, stroke, *dash, *gap));
                    }
                    _ => {
                        painter.add(Shape::line(points, stroke));
                    }
                }
            }
            DrawCommand::Circle {
                center,
                radius,
                fill,
            } => {
                painter.circle_filled(*center + origin, *radius, *fill);
            }
            DrawCommand::Polygon { points, fill } => {
                let points = points.iter().map(|point| *point + origin).collect();
                painter.add(Shape::convex_polygon(points, *fill, Stroke::NONE));
            }
            DrawCommand::Text {
                pos,
                text,
                size,
                color,
            } => {
                painter.text(
                    *pos + origin,
                    Align2::CENTER_TOP,
                    text,
                    FontId::proportional(*size),
                    *color,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, PathKind};

    fn frame(document: &Document, selection: Option<SelectionTarget>) -> Vec<DrawCommand> {
        let viewport = Viewport::default();
        let config = EditorConfig::default();
        render_frame(&RenderInput {
            document,
            viewport: &viewport,
            selection,
            pending_start: None,
            canvas_size: vec2(800.0, 600.0),
            config: &config,
        })
    }

    #[test]
    fn background_then_grid_then_paths_then_elements() {
        let mut document = Document::new();
        let a = document.add_element(ElementKind::Ruin, pos2(100.0, 100.0)).id();
        let b = document.add_element(ElementKind::Ruin, pos2(300.0, 100.0)).id();
        document.add_path(a, b, PathKind::TradeRoute).unwrap();

        let commands = frame(&document, None);
        assert!(matches!(
            commands[0],
            DrawCommand::Rect {
                fill: BACKGROUND_COLOR,
                ..
            }
        ));
        let path_line = commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Line { color, .. } if *color != GRID_COLOR))
            .unwrap();
        let first_body = commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Circle { .. }))
            .unwrap();
        let last_grid = commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Line { color: GRID_COLOR, .. }))
            .unwrap();
        assert!(last_grid < path_line);
        assert!(path_line < first_body);
    }

    #[test]
    fn drift_passage_is_dashed() {
        let mut document = Document::new();
        let a = document.add_element(ElementKind::Ruin, pos2(100.0, 100.0)).id();
        let b = document.add_element(ElementKind::Ruin, pos2(300.0, 100.0)).id();
        document.add_path(a, b, PathKind::DriftPassage).unwrap();

        let dashed = frame(&document, None).into_iter().any(|c| {
            matches!(c, DrawCommand::Line { dash: Some(_), color, .. } if color != GRID_COLOR)
        });
        assert!(dashed);
    }

    #[test]
    fn selected_element_gets_a_ring_and_label() {
        let mut document = Document::new();
        let element = document.add_element(ElementKind::Settlement, pos2(50.0, 50.0)).id();
        document.update_element(
            element,
            crate::element::ElementPatch {
                name: Some("Ashford".to_owned()),
                ..Default::default()
            },
        );

        let plain = frame(&document, None);
        let selected = frame(&document, Some(SelectionTarget::Element(element)));
        assert_eq!(selected.len(), plain.len() + 1);
        assert!(selected.iter().any(|c| matches!(
            c,
            DrawCommand::Line {
                color: SELECTION_COLOR,
                ..
            }
        )));
        assert!(
            plain
                .iter()
                .any(|c| matches!(c, DrawCommand::Text { text, .. } if text == "Ashford"))
        );
    }

    #[test]
    fn grid_outside_the_view_is_skipped() {
        let document = Document::new();
        let grid_lines = frame(&document, None)
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { color: GRID_COLOR, .. }))
            .count();
        // 0..=800 by 100 vertically, 0..=600 horizontally
        assert_eq!(grid_lines, 9 + 7);
    }
}
