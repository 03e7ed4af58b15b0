use egui::RichText;

use crate::MapLabApp;
use crate::components::ToolButton;
use crate::element::{ElementKind, PathKind};
use crate::tools::{Tool, ToolMode};

pub fn tools_panel(app: &mut MapLabApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Tools");
            ui.horizontal(|ui| {
                for mode in ToolMode::ALL {
                    let selected = app.editor.tool_mode() == mode;
                    if ToolButton::new(mode, selected).show(ui).clicked() {
                        log::info!("Tool selected from UI: {}", mode.name());
                        app.editor.set_tool(mode);
                    }
                }
            });
            ui.label(app.editor.tool().current_state_name());
            ui.separator();

            let read_only = app.editor.is_read_only();

            ui.strong("Elements");
            for kind in ElementKind::vocabulary() {
                let selected = app.editor.element_kind() == &kind;
                let text = RichText::new(kind.label()).color(kind.color());
                if ui.selectable_label(selected, text).clicked() {
                    app.editor.set_element_kind(kind);
                }
            }
            if ui
                .add_enabled(!read_only, egui::Button::new("Add element"))
                .clicked()
            {
                let result = app.editor.add_element_at_default().map(|_| ());
                app.report(result);
            }
            ui.separator();

            ui.strong("Path type");
            let mut path_kind = app.editor.path_kind().clone();
            egui::ComboBox::from_id_salt("path_kind")
                .selected_text(path_kind.label())
                .show_ui(ui, |ui| {
                    for kind in PathKind::vocabulary() {
                        let label = RichText::new(kind.label()).color(kind.color());
                        ui.selectable_value(&mut path_kind, kind, label);
                    }
                });
            if &path_kind != app.editor.path_kind() {
                app.editor.set_path_kind(path_kind);
            }
            ui.separator();

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(app.editor.can_undo(), egui::Button::new("Undo"))
                    .clicked()
                {
                    let result = app.editor.undo();
                    app.report(result);
                }
                if ui
                    .add_enabled(app.editor.can_redo(), egui::Button::new("Redo"))
                    .clicked()
                {
                    let result = app.editor.redo();
                    app.report(result);
                }
            });

            if !read_only {
                ui.horizontal(|ui| {
                    let has_selection = app.editor.selection().is_some();
                    if ui
                        .add_enabled(has_selection, egui::Button::new("Delete"))
                        .clicked()
                    {
                        let result = app.editor.delete_selection();
                        app.report(result);
                    }
                    if ui.button("Save").clicked() {
                        app.save_map();
                    }
                });
            }

            ui.horizontal(|ui| {
                ui.label(format!("Zoom {}%", app.editor.viewport().zoom_percent()));
                if ui.button("Reset view").clicked() {
                    app.editor.reset_view();
                }
            });
            ui.separator();

            let history = app.editor.history();
            egui::CollapsingHeader::new("History").show(ui, |ui| {
                egui::Grid::new("command_history_grid")
                    .num_columns(2)
                    .spacing([24.0, 4.0])
                    .striped(true)
                    .show(ui, |ui| {
                        ui.strong("Undo");
                        ui.strong("Redo");
                        ui.end_row();

                        let undo_stack = history.undo_stack();
                        let redo_stack = history.redo_stack();
                        for i in 0..undo_stack.len().max(redo_stack.len()) {
                            ui.label(undo_stack.get(i).map_or("", |entry| entry.label()));
                            ui.label(redo_stack.get(i).map_or("", |entry| entry.label()));
                            ui.end_row();
                        }
                    });
            });
        });
}
