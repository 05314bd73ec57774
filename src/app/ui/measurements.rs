use super::super::FloorcalApp;
use crate::measure::{self, RectMeasurement};
use std::fmt::Write as _;

impl FloorcalApp {
    pub(crate) fn ui_measurements_window(&mut self, ctx: &egui::Context) {
        if !self.measurements_open {
            return;
        }
        let rows = self.session.measurements();
        let total = self.session.total_area();

        egui::Window::new("Measurements")
            .open(&mut self.measurements_open)
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                if rows.is_empty() {
                    ui.label("No rectangles yet.");
                } else {
                    egui::ScrollArea::vertical()
                        .max_height(320.0)
                        .show(ui, |ui| {
                            egui::Grid::new("measurements_grid")
                                .striped(true)
                                .num_columns(4)
                                .show(ui, |ui| {
                                    ui.strong("#");
                                    ui.strong("Width");
                                    ui.strong("Height");
                                    ui.strong("Area");
                                    ui.end_row();
                                    for (idx, row) in rows.iter().enumerate() {
                                        ui.label(format!("{}", idx + 1));
                                        ui.label(measure::format_length(row.width));
                                        ui.label(measure::format_length(row.height));
                                        ui.label(measure::format_area(row.area));
                                        ui.end_row();
                                    }
                                });
                        });
                }
                ui.separator();
                ui.horizontal(|ui| {
                    ui.strong(measure::format_total_area(total));
                    if ui
                        .add_enabled(!rows.is_empty(), egui::Button::new("Copy"))
                        .on_hover_text("Copy the table as tab-separated text")
                        .clicked()
                    {
                        ui.ctx().copy_text(measurements_tsv(&rows, total));
                    }
                });
            });
    }
}

fn measurements_tsv(rows: &[RectMeasurement], total: f64) -> String {
    let mut out = String::from("#\twidth_ft\theight_ft\tarea_sq_ft\n");
    for (idx, row) in rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}\t{:.2}\t{:.2}\t{:.2}",
            idx + 1,
            row.width,
            row.height,
            row.area
        );
    }
    let _ = writeln!(out, "total\t\t\t{total:.2}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tsv_lists_rows_and_total() {
        let rows = [
            RectMeasurement {
                width: 10.0,
                height: 5.0,
                area: 50.0,
            },
            RectMeasurement {
                width: 2.0,
                height: 3.0,
                area: 6.0,
            },
        ];
        let text = measurements_tsv(&rows, 56.0);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "1\t10.00\t5.00\t50.00");
        assert_eq!(lines[3], "total\t\t\t56.00");
    }
}
