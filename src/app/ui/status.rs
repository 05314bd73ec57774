use super::super::FloorcalApp;
use crate::calibration::MAX_REFERENCE_LINES;
use crate::image::human_readable_bytes;
use egui::{Color32, RichText};

impl FloorcalApp {
    pub(crate) fn ui_status_bar(&self, ui: &mut egui::Ui) {
        let scales = self.session.scales();
        let describe = |scale: Option<f64>| {
            scale.map_or_else(|| "—".to_string(), |s| format!("{s:.2} px/ft"))
        };
        ui.horizontal(|ui| {
            if let Some(meta) = &self.image_meta {
                let size = meta
                    .byte_len()
                    .map(|len| format!(" ({})", human_readable_bytes(len)))
                    .unwrap_or_default();
                ui.label(
                    RichText::new(format!("{}{size}", meta.display_name()))
                        .small()
                        .color(Color32::from_gray(180)),
                );
                ui.separator();
            }
            ui.label(
                RichText::new(format!(
                    "Lines: {}/{MAX_REFERENCE_LINES}  Rectangles: {}",
                    self.session.lines().len(),
                    self.session.rects().len()
                ))
                .small()
                .color(Color32::from_gray(180)),
            );
            ui.separator();
            ui.label(
                RichText::new(format!(
                    "H: {}  V: {}",
                    describe(scales.horizontal),
                    describe(scales.vertical)
                ))
                .small()
                .color(Color32::from_gray(180)),
            );
            ui.separator();
            ui.label(
                RichText::new(self.session.mode().label())
                    .small()
                    .color(Color32::from_gray(180)),
            );
            if let Some(msg) = &self.last_status {
                ui.separator();
                ui.label(
                    RichText::new(msg.as_str())
                        .small()
                        .color(Color32::from_gray(200)),
                );
            }
        });
    }
}
