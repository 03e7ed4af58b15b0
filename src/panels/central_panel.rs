use egui::{Align2, Color32, FontId, vec2};

use crate::MapLabApp;
use crate::input::{CanvasEvent, route_event};
use crate::renderer::{RenderInput, paint, render_frame};
use crate::tools::ToolMode;

pub fn central_panel(app: &mut MapLabApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
            let canvas = response.rect;

            let keyboard = !ctx.wants_keyboard_input();
            for event in app.input.process_input(ctx, canvas, keyboard) {
                let result = route_event(&event, &mut app.editor);
                if result.is_ok() && matches!(event, CanvasEvent::PointerMove(_)) {
                    // Hover leaves the status alone
                    continue;
                }
                app.report(result);
            }

            let editor = &app.editor;
            let commands = render_frame(&RenderInput {
                document: editor.document(),
                viewport: editor.viewport(),
                selection: editor.selection(),
                pending_start: editor.pending_start(),
                canvas_size: canvas.size(),
                config: editor.config(),
            });
            paint(&painter, canvas.min.to_vec2(), &commands);

            painter.text(
                canvas.right_bottom() - vec2(8.0, 8.0),
                Align2::RIGHT_BOTTOM,
                format!("{}%", editor.viewport().zoom_percent()),
                FontId::proportional(12.0),
                Color32::GRAY,
            );

            match editor.tool_mode() {
                ToolMode::Connect => {
                    let hint = if editor.pending_start().is_some() {
                        "Click the end element, or empty canvas to cancel"
                    } else {
                        "Click the start element"
                    };
                    painter.text(
                        canvas.center_top() + vec2(0.0, 8.0),
                        Align2::CENTER_TOP,
                        hint,
                        FontId::proportional(13.0),
                        Color32::LIGHT_GRAY,
                    );
                }
                ToolMode::Pan if response.hovered() => {
                    let icon = if app.input.is_pressed() {
                        egui::CursorIcon::Grabbing
                    } else {
                        egui::CursorIcon::Grab
                    };
                    ctx.set_cursor_icon(icon);
                }
                _ => {}
            }
        });
}
