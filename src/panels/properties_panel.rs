use egui::{Color32, RichText};

use crate::MapLabApp;
use crate::element::{ElementPatch, MAX_ELEMENT_SCALE, MIN_ELEMENT_SCALE, PathKind};
use crate::id_generator::{ElementId, PathId};
use crate::path::PathPatch;
use crate::selection::SelectionTarget;

pub fn properties_panel(app: &mut MapLabApp, ctx: &egui::Context) {
    egui::SidePanel::right("properties_panel")
        .resizable(true)
        .default_width(240.0)
        .show(ctx, |ui| {
            ui.heading("Properties");
            match app.editor.selection() {
                Some(SelectionTarget::Element(id)) => element_properties(app, ui, id),
                Some(SelectionTarget::Path(id)) => path_properties(app, ui, id),
                None => {
                    ui.label("Nothing selected");
                    let document = app.editor.document();
                    ui.label(format!(
                        "{} element(s), {} path(s)",
                        document.elements().len(),
                        document.paths().len()
                    ));
                }
            }

            if let Some(status) = &app.status {
                ui.separator();
                ui.label(RichText::new(status).color(Color32::LIGHT_RED));
            }

            ui.separator();
            ui.strong("Activity");
            egui::ScrollArea::vertical().show(ui, |ui| {
                for event in app.activity.entries().iter().rev() {
                    ui.label(event.describe());
                }
            });
        });
}

fn element_properties(app: &mut MapLabApp, ui: &mut egui::Ui, id: ElementId) {
    let Some(element) = app.editor.document().element(id) else {
        return;
    };
    ui.label(RichText::new(element.kind().label()).color(element.kind().color()));
    ui.label(format!(
        "({:.0}, {:.0})",
        element.position().x,
        element.position().y
    ));

    let mut name = element.name().to_owned();
    let mut description = element.description().to_owned();
    let mut scale = element.scale();
    let mut rotation = element.rotation();
    let mut patch = ElementPatch::default();
    let mut edit_finished = false;

    ui.add_enabled_ui(!app.editor.is_read_only(), |ui| {
        ui.label("Name");
        let response = ui.text_edit_singleline(&mut name);
        edit_finished |= response.lost_focus();
        if response.changed() {
            patch.name = Some(name);
        }
        ui.label("Description");
        let response = ui.text_edit_multiline(&mut description);
        edit_finished |= response.lost_focus();
        if response.changed() {
            patch.description = Some(description);
        }
        let scale_slider = egui::Slider::new(&mut scale, MIN_ELEMENT_SCALE..=MAX_ELEMENT_SCALE)
            .text("Scale");
        let response = ui.add(scale_slider);
        edit_finished |= response.drag_stopped() || response.lost_focus();
        if response.changed() {
            patch.scale = Some(scale);
        }
        let rotation_slider = egui::Slider::new(&mut rotation, 0.0..=360.0)
            .text("Rotation")
            .suffix("°");
        let response = ui.add(rotation_slider);
        edit_finished |= response.drag_stopped() || response.lost_focus();
        if response.changed() {
            patch.rotation = Some(rotation);
        }
    });

    if !patch.is_empty() {
        let result = app.editor.update_element(id, patch);
        app.report(result);
    }
    if edit_finished {
        app.editor.finish_edit();
    }
}

fn path_properties(app: &mut MapLabApp, ui: &mut egui::Ui, id: PathId) {
    let document = app.editor.document();
    let Some(path) = document.path(id) else {
        return;
    };
    let endpoint_name = |element: ElementId| {
        document
            .element(element)
            .map(|element| match element.name() {
                "" => element.kind().label(),
                name => name.to_owned(),
            })
            .unwrap_or_default()
    };
    ui.label(format!(
        "{} → {}",
        endpoint_name(path.from_id()),
        endpoint_name(path.to_id())
    ));
    ui.label(format!("{} waypoint(s)", path.waypoints().len()));

    let mut kind = path.kind().clone();
    let mut description = path.description().to_owned();
    let has_waypoints = !path.waypoints().is_empty();
    // Midpoint of the last segment, where a new bend is added
    let bend_at = document.path_polyline(path).and_then(|points| match points.as_slice() {
        [.., a, b] => Some(a.lerp(*b, 0.5)),
        _ => None,
    });
    let mut patch = PathPatch::default();
    let mut add_waypoint = None;
    let mut edit_finished = false;

    ui.add_enabled_ui(!app.editor.is_read_only(), |ui| {
        egui::ComboBox::from_id_salt("selected_path_kind")
            .selected_text(kind.label())
            .show_ui(ui, |ui| {
                for option in PathKind::vocabulary() {
                    let label = option.label();
                    ui.selectable_value(&mut kind, option, label);
                }
            });
        if &kind != path.kind() {
            patch.kind = Some(kind);
        }
        ui.label("Description");
        let response = ui.text_edit_multiline(&mut description);
        edit_finished |= response.lost_focus();
        if response.changed() {
            patch.description = Some(description);
        }
        ui.horizontal(|ui| {
            if ui.button("Add bend").clicked() {
                add_waypoint = bend_at;
            }
            if ui
                .add_enabled(has_waypoints, egui::Button::new("Straighten"))
                .clicked()
            {
                patch.waypoints = Some(Vec::new());
            }
        });
    });

    if let Some(position) = add_waypoint {
        let result = app.editor.add_waypoint(id, position);
        app.report(result);
    }
    if patch != PathPatch::default() {
        let result = app.editor.update_path(id, patch);
        app.report(result);
    }
    if edit_finished {
        app.editor.finish_edit();
    }
}
