use super::super::FloorcalApp;
use super::icons;
use crate::measure;
use crate::session::DrawMode;

impl FloorcalApp {
    pub(crate) fn ui_top(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            egui::widgets::global_theme_preference_switch(ui);
            ui.separator();

            self.ui_file_menu(ui);
            ui.separator();

            self.ui_mode_buttons(ui);
            ui.separator();

            self.ui_transparency_slider(ui);
            ui.separator();

            if ui
                .add(
                    egui::Button::new(format!("{} Measurements", icons::ICON_STATS))
                        .shortcut_text("Ctrl+M"),
                )
                .on_hover_text("List every rectangle with its dimensions (Ctrl+M)")
                .clicked()
            {
                self.measurements_open = !self.measurements_open;
            }
            ui.separator();

            ui.strong(measure::format_total_area(self.session.total_area()));
        });
    }

    fn ui_file_menu(&mut self, ui: &mut egui::Ui) {
        ui.menu_button(format!("{} File", icons::ICON_MENU), |ui| {
            if ui
                .add(egui::Button::new("Open image…").shortcut_text("Ctrl+O"))
                .on_hover_text("Open a floorplan (Ctrl+O). You can also drag & drop into the canvas.")
                .clicked()
            {
                self.open_image_dialog();
                ui.close();
            }

            if ui
                .add(egui::Button::new("Paste image").shortcut_text("Ctrl+V"))
                .on_hover_text("Paste a floorplan from the clipboard (Ctrl+V)")
                .clicked()
            {
                self.paste_image_from_clipboard(ui.ctx());
                ui.close();
            }
        });
    }

    fn ui_mode_buttons(&mut self, ui: &mut egui::Ui) {
        let mode = self.session.mode();

        let line_resp = ui
            .add_enabled_ui(self.session.can_draw_lines(), |ui| {
                ui.selectable_label(
                    mode == DrawMode::Line,
                    format!("{} Draw Line", icons::ICON_LINE),
                )
            })
            .inner
            .on_hover_text("Draw the horizontal, then the vertical reference line (L)")
            .on_disabled_hover_text("Both reference lines have been drawn");
        if line_resp.clicked() {
            self.toggle_mode(DrawMode::Line);
        }

        let rect_resp = ui
            .add_enabled_ui(self.session.can_draw_rectangles(), |ui| {
                ui.selectable_label(
                    mode == DrawMode::Rectangle,
                    format!("{} Draw Rectangle", icons::ICON_RECT),
                )
            })
            .inner
            .on_hover_text("Drag out a rectangle to measure a room (R)")
            .on_disabled_hover_text("Calibrate both reference lines first");
        if rect_resp.clicked() {
            self.toggle_mode(DrawMode::Rectangle);
        }
    }

    fn ui_transparency_slider(&mut self, ui: &mut egui::Ui) {
        let mut value = self.session.transparency();
        let resp = ui
            .add(
                egui::Slider::new(&mut value, 0.0..=1.0)
                    .step_by(0.1)
                    .text("Transparency"),
            )
            .on_hover_text("Floorplan image opacity");
        if resp.changed() {
            self.session.set_transparency(value);
        }
    }
}
