use super::super::FloorcalApp;
use crate::config::LabelStyle;
use crate::geometry::LineStatus;
use crate::measure::Label;
use crate::session::DrawMode;
use egui::{
    Color32, CornerRadius, CursorIcon, FontId, PointerButton, Pos2, Rect, Sense, StrokeKind, Vec2,
    pos2,
};

const ENDPOINT_RADIUS: f32 = 3.5;
const LABEL_PADDING: Vec2 = Vec2::new(4.0, 2.0);

impl FloorcalApp {
    pub(crate) fn ui_canvas(&mut self, ui: &mut egui::Ui) {
        let canvas_size = self
            .image
            .as_ref()
            .map_or_else(|| ui.available_size(), |img| img.canvas_size());
        egui::ScrollArea::both().drag_to_scroll(false).show(ui, |ui| {
            let (rect, response) = ui.allocate_exact_size(canvas_size, Sense::drag());
            let painter = ui.painter().clone();

            if let Some(img) = self.image.as_ref() {
                let tint = Color32::WHITE.gamma_multiply(self.session.transparency());
                let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
                painter.image(img.texture.id(), rect, uv, tint);
            } else if self.pending_image_task.is_some() {
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "Loading floorplan…",
                    FontId::proportional(16.0),
                    ui.visuals().weak_text_color(),
                );
            } else {
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "Drop a floorplan here or use File → Open image…",
                    FontId::proportional(16.0),
                    ui.visuals().weak_text_color(),
                );
            }

            if response.hovered() && self.session.mode() != DrawMode::None {
                ui.ctx().set_cursor_icon(CursorIcon::Crosshair);
            }

            let origin = rect.min.to_vec2();
            self.handle_canvas_pointer(ui, &response, origin);
            self.paint_annotations(&painter, origin);
        });
    }

    /// Routes primary-button drags to the session in canvas pixel coordinates.
    fn handle_canvas_pointer(&mut self, ui: &egui::Ui, response: &egui::Response, origin: Vec2) {
        let to_canvas = |pos: Pos2| pos - origin;

        if response.drag_started_by(PointerButton::Primary) {
            let press = ui
                .input(|i| i.pointer.press_origin())
                .or_else(|| response.interact_pointer_pos());
            if let Some(pos) = press
                && let Err(err) = self.session.pointer_down(to_canvas(pos))
            {
                log::debug!("Pointer down ignored: {err}");
            }
        }

        if response.dragged_by(PointerButton::Primary)
            && let Some(pos) = response.interact_pointer_pos()
        {
            self.session.pointer_move(to_canvas(pos));
        }

        if response.drag_stopped_by(PointerButton::Primary)
            && let Some(request) = self.session.pointer_up()
        {
            self.open_calibration_prompt(request);
        }
    }

    fn paint_annotations(&self, painter: &egui::Painter, origin: Vec2) {
        let cfg = &self.config;

        for rect in self.session.rects() {
            let bounds = rect.bounds().translate(origin);
            painter.rect_filled(bounds, CornerRadius::ZERO, cfg.rectangle_fill());
            painter.rect_stroke(
                bounds,
                CornerRadius::ZERO,
                cfg.rectangle.stroke(),
                StrokeKind::Middle,
            );
        }

        for line in self.session.lines() {
            let style = if line.status == LineStatus::Calibrated {
                &cfg.reference_line
            } else {
                &cfg.pending_line
            };
            let stroke = style.stroke();
            let ends = [line.start + origin, line.end + origin];
            painter.line_segment(ends, stroke);
            for end in ends {
                painter.circle_filled(end, ENDPOINT_RADIUS, stroke.color);
            }
        }

        for label in self
            .session
            .line_labels()
            .iter()
            .chain(self.session.rect_labels().iter())
        {
            paint_label(painter, origin, label, &cfg.labels);
        }
    }
}

fn paint_label(painter: &egui::Painter, origin: Vec2, label: &Label, style: &LabelStyle) {
    let text_color = style.text_color32();
    let galley = painter.layout_no_wrap(
        label.text.clone(),
        FontId::proportional(style.font_size()),
        text_color,
    );
    let total = galley.size() + LABEL_PADDING * 2.0;
    let bg_rect = label.align.anchor_size(label.anchor + origin, total);
    painter.rect_filled(bg_rect, 3.0, style.background32());
    painter.galley(bg_rect.min + LABEL_PADDING, galley, text_color);
}
