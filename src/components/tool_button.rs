use eframe::egui;

use crate::tools::ToolMode;

const SELECTED_FILL: egui::Color32 = egui::Color32::from_rgb(0x25, 0x63, 0xeb);

pub struct ToolButton {
    pub mode: ToolMode,
    pub selected: bool,
}

impl ToolButton {
    pub fn new(mode: ToolMode, selected: bool) -> Self {
        Self { mode, selected }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let button_size = egui::vec2(40.0, 40.0);
        let (rect, response) = ui.allocate_exact_size(button_size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                SELECTED_FILL
            } else if response.hovered() {
                egui::Color32::from_gray(55)
            } else {
                egui::Color32::from_gray(35)
            };
            ui.painter().rect_filled(rect, 6.0, bg_color);
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.mode.icon(),
                egui::FontId::proportional(20.0),
                egui::Color32::WHITE,
            );
        }

        response.on_hover_text(format!("{} ({:?})", self.mode.name(), self.mode.shortcut()))
    }
}
