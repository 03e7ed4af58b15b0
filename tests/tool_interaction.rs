use egui::{pos2, vec2};
use map_lab::element::{ElementKind, ElementPatch, PathKind};
use map_lab::error::CommandError;
use map_lab::{Document, EditorConfig, MapEditor, SelectionTarget, ToolMode};

fn editor() -> MapEditor {
    MapEditor::default()
}

// Clicks at a canvas position. With the default view, screen and world coincide.
fn click(editor: &mut MapEditor, x: f32, y: f32) -> Result<(), CommandError> {
    editor.pointer_down(pos2(x, y))?;
    editor.pointer_up(pos2(x, y))
}

#[test]
fn test_basic_session() {
    let mut editor = editor();

    let first = editor
        .add_element(ElementKind::Settlement, pos2(400.0, 300.0))
        .unwrap()
        .unwrap();
    assert_eq!(editor.document().elements().len(), 1);
    let second = editor
        .add_element(ElementKind::Mountain, pos2(600.0, 300.0))
        .unwrap()
        .unwrap();
    assert_eq!(editor.document().elements().len(), 2);

    editor.set_tool(ToolMode::Connect);
    click(&mut editor, 400.0, 300.0).unwrap();
    click(&mut editor, 600.0, 300.0).unwrap();

    let paths = editor.document().paths();
    assert_eq!(paths.len(), 1);
    let path = paths.iter().next().unwrap();
    assert_eq!(path.from_id(), first);
    assert_eq!(path.to_id(), second);
    assert_eq!(path.kind(), &PathKind::default());

    editor.remove_element(first).unwrap();
    assert_eq!(editor.document().elements().len(), 1);
    assert!(editor.document().paths().is_empty());
}

#[test]
fn test_connect_same_element_twice_creates_nothing() {
    let mut editor = editor();
    editor.add_element(ElementKind::Ruin, pos2(100.0, 100.0)).unwrap();
    editor.set_tool(ToolMode::Connect);

    click(&mut editor, 100.0, 100.0).unwrap();
    click(&mut editor, 100.0, 100.0).unwrap();

    assert!(editor.document().paths().is_empty());
    assert!(editor.pending_start().is_some());
}

#[test]
fn test_connect_uses_current_path_kind() {
    let mut editor = editor();
    editor.add_element(ElementKind::Ruin, pos2(0.0, 0.0)).unwrap();
    editor.add_element(ElementKind::Ruin, pos2(300.0, 0.0)).unwrap();
    editor.set_path_kind(PathKind::FrayCorridor);
    editor.set_tool(ToolMode::Connect);

    click(&mut editor, 0.0, 0.0).unwrap();
    click(&mut editor, 300.0, 0.0).unwrap();

    let path = editor.document().paths().iter().next().unwrap();
    assert_eq!(path.kind(), &PathKind::FrayCorridor);
}

#[test]
fn test_empty_click_cancels_pending_start() {
    let mut editor = editor();
    editor.add_element(ElementKind::Ruin, pos2(0.0, 0.0)).unwrap();
    editor.add_element(ElementKind::Ruin, pos2(300.0, 0.0)).unwrap();
    editor.set_tool(ToolMode::Connect);

    click(&mut editor, 0.0, 0.0).unwrap();
    click(&mut editor, 150.0, 150.0).unwrap();
    assert_eq!(editor.pending_start(), None);

    click(&mut editor, 300.0, 0.0).unwrap();
    assert!(editor.document().paths().is_empty());
}

#[test]
fn test_switching_tools_clears_pending_start() {
    let mut editor = editor();
    editor.add_element(ElementKind::Ruin, pos2(0.0, 0.0)).unwrap();
    editor.set_tool(ToolMode::Connect);
    click(&mut editor, 0.0, 0.0).unwrap();
    assert!(editor.pending_start().is_some());

    editor.set_tool(ToolMode::Select);
    editor.set_tool(ToolMode::Connect);
    assert_eq!(editor.pending_start(), None);
}

#[test]
fn test_path_start_deleted_before_end_click() {
    let mut editor = editor();
    let a = editor
        .add_element(ElementKind::Ruin, pos2(0.0, 0.0))
        .unwrap()
        .unwrap();
    editor.add_element(ElementKind::Ruin, pos2(300.0, 0.0)).unwrap();
    editor.set_tool(ToolMode::Connect);
    click(&mut editor, 0.0, 0.0).unwrap();

    editor.remove_element(a).unwrap();
    let result = click(&mut editor, 300.0, 0.0);

    assert!(matches!(result, Err(CommandError::InvalidPath(_))));
    assert!(editor.document().paths().is_empty());
    assert_eq!(editor.pending_start(), None);
}

#[test]
fn test_drag_moves_element_in_world_space() {
    let mut editor = editor();
    let id = editor
        .add_element(ElementKind::Settlement, pos2(100.0, 100.0))
        .unwrap()
        .unwrap();
    // Zoom in around the origin so screen and world differ
    editor.zoom_at(pos2(0.0, 0.0), map_lab::viewport::ZoomDirection::In);
    let scale = editor.viewport().scale();
    let grab = editor.viewport().world_to_screen(pos2(100.0, 100.0));

    editor.pointer_down(grab).unwrap();
    editor.pointer_move(grab + vec2(20.0, 0.0)).unwrap();
    editor.pointer_move(grab + vec2(40.0, 0.0)).unwrap();
    editor.pointer_up(grab + vec2(40.0, 0.0)).unwrap();

    let position = editor.document().element(id).unwrap().position();
    assert!((position.x - (100.0 + 40.0 / scale)).abs() < 1e-3);
    assert!((position.y - 100.0).abs() < 1e-3);
    assert_eq!(editor.history().undo_stack().len(), 2);
}

#[test]
fn test_pan_only_in_pan_mode() {
    let mut editor = editor();
    editor.pan(vec2(50.0, 0.0));
    assert_eq!(editor.viewport().offset(), vec2(0.0, 0.0));

    editor.set_tool(ToolMode::Pan);
    editor.pointer_down(pos2(10.0, 10.0)).unwrap();
    editor.pointer_move(pos2(60.0, 30.0)).unwrap();
    editor.pointer_up(pos2(60.0, 30.0)).unwrap();
    assert_eq!(editor.viewport().offset(), vec2(50.0, 20.0));
}

#[test]
fn test_scroll_zooms_toward_pointer() {
    let mut editor = editor();
    let anchor = pos2(200.0, 150.0);
    let before = editor.viewport().screen_to_world(anchor);

    editor.scroll(anchor, 1.0);

    assert!(editor.viewport().scale() > 1.0);
    let after = editor.viewport().screen_to_world(anchor);
    assert!((after - before).length() < 1e-3);
}

#[test]
fn test_click_selects_topmost_then_path_then_nothing() {
    let mut editor = editor();
    editor.add_element(ElementKind::Ruin, pos2(0.0, 0.0)).unwrap();
    let top = editor
        .add_element(ElementKind::Ruin, pos2(10.0, 0.0))
        .unwrap()
        .unwrap();
    let far = editor
        .add_element(ElementKind::Ruin, pos2(300.0, 0.0))
        .unwrap()
        .unwrap();
    let path = editor
        .add_path(top, far, PathKind::Journey)
        .unwrap()
        .unwrap();

    click(&mut editor, 5.0, 0.0).unwrap();
    assert_eq!(editor.selection(), Some(SelectionTarget::Element(top)));

    click(&mut editor, 150.0, 2.0).unwrap();
    assert_eq!(editor.selection(), Some(SelectionTarget::Path(path)));

    click(&mut editor, 150.0, 200.0).unwrap();
    assert_eq!(editor.selection(), None);
}

#[test]
fn test_read_only_rejects_mutations() {
    let mut seed = Document::new();
    let a = seed.add_element(ElementKind::Settlement, pos2(0.0, 0.0)).id();
    let b = seed.add_element(ElementKind::Mountain, pos2(200.0, 0.0)).id();
    seed.add_path(a, b, PathKind::Journey).unwrap();
    let mut editor = MapEditor::new(seed.clone(), true, EditorConfig::default());

    assert_eq!(
        editor.add_element(ElementKind::Ruin, pos2(5.0, 5.0)),
        Err(CommandError::ReadOnly)
    );
    assert_eq!(
        editor.move_element(a, pos2(50.0, 50.0)),
        Err(CommandError::ReadOnly)
    );
    assert_eq!(
        editor.update_element(
            a,
            ElementPatch {
                name: Some("Nope".to_owned()),
                ..Default::default()
            }
        ),
        Err(CommandError::ReadOnly)
    );
    assert_eq!(editor.remove_element(a), Err(CommandError::ReadOnly));
    assert_eq!(
        editor.add_path(b, a, PathKind::LeyLine),
        Err(CommandError::ReadOnly)
    );

    // Dragging selects but does not move
    click(&mut editor, 0.0, 0.0).unwrap();
    editor.pointer_down(pos2(0.0, 0.0)).unwrap();
    editor.pointer_move(pos2(80.0, 80.0)).unwrap();
    editor.pointer_up(pos2(80.0, 80.0)).unwrap();
    assert_eq!(editor.selection(), Some(SelectionTarget::Element(a)));

    editor.set_tool(ToolMode::Connect);
    click(&mut editor, 0.0, 0.0).unwrap();
    click(&mut editor, 200.0, 0.0).unwrap();

    assert_eq!(editor.document(), &seed);

    editor.set_tool(ToolMode::Pan);
    editor.pointer_down(pos2(0.0, 0.0)).unwrap();
    editor.pointer_move(pos2(10.0, 0.0)).unwrap();
    editor.pointer_up(pos2(10.0, 0.0)).unwrap();
    assert_eq!(editor.viewport().offset(), vec2(10.0, 0.0));
    editor.scroll(pos2(0.0, 0.0), -1.0);
    assert!(editor.viewport().scale() < 1.0);
}

#[test]
fn test_missing_ids_are_silent() {
    let mut editor = editor();
    let ghost = map_lab::id_generator::generate_element_id();
    assert_eq!(editor.move_element(ghost, pos2(1.0, 1.0)), Ok(()));
    assert_eq!(editor.update_element(ghost, ElementPatch::default()), Ok(()));
    assert_eq!(editor.remove_element(ghost), Ok(()));
    assert!(!editor.can_undo());
}

#[test]
fn test_attributes_clamp_and_normalize() {
    let mut editor = editor();
    let id = editor
        .add_element(ElementKind::BellTree, pos2(0.0, 0.0))
        .unwrap()
        .unwrap();
    editor
        .update_element(
            id,
            ElementPatch {
                scale: Some(5.0),
                rotation: Some(-90.0),
                ..Default::default()
            },
        )
        .unwrap();
    let element = editor.document().element(id).unwrap();
    assert_eq!(element.scale(), 2.0);
    assert_eq!(element.rotation(), 270.0);
}

#[test]
fn test_delete_selection_and_default_drop() {
    let mut editor = editor();
    editor.set_element_kind(ElementKind::ShardSite);
    let id = editor.add_element_at_default().unwrap().unwrap();
    let element = editor.document().element(id).unwrap();
    assert_eq!(element.position(), pos2(400.0, 300.0));
    assert_eq!(element.kind(), &ElementKind::ShardSite);
    assert_eq!(editor.selection(), Some(SelectionTarget::Element(id)));

    editor.delete_selection().unwrap();
    assert!(editor.document().elements().is_empty());
    assert_eq!(editor.selection(), None);
}
