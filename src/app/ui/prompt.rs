use super::super::FloorcalApp;
use crate::measure::UNIT;
use egui::{Align2, Key, TextEdit, Vec2};

enum PromptOutcome {
    Confirm(String),
    Decline,
}

impl FloorcalApp {
    /// Modal length prompt for the reference line that was just drawn.
    ///
    /// Closing the window, pressing Esc, or submitting an empty field all
    /// decline; the axis then stays uncalibrated for the rest of the session.
    pub(crate) fn ui_calibration_prompt(&mut self, ctx: &egui::Context) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };
        let request = prompt.request;
        let mut outcome: Option<PromptOutcome> = None;
        let mut open = true;

        egui::Window::new("Reference length")
            .open(&mut open)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.label(format!(
                    "The {} reference line spans {:.1} px.",
                    request.axis.label(),
                    request.pixel_length
                ));
                ui.label(format!("How long is it in real life ({UNIT})?"));
                ui.add_space(4.0);
                let edit = ui.add(
                    TextEdit::singleline(&mut prompt.input)
                        .hint_text("e.g. 12.5")
                        .desired_width(160.0),
                );
                if !prompt.focus_requested {
                    edit.request_focus();
                    prompt.focus_requested = true;
                }
                let enter = edit.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
                let escape = ui.input(|i| i.key_pressed(Key::Escape));
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() || enter {
                        outcome = Some(PromptOutcome::Confirm(prompt.input.clone()));
                    }
                    if ui.button("Cancel").clicked() || escape {
                        outcome = Some(PromptOutcome::Decline);
                    }
                });
            });

        if !open {
            outcome = Some(PromptOutcome::Decline);
        }
        let Some(outcome) = outcome else {
            return;
        };
        self.prompt = None;

        let axis = request.axis.label();
        match outcome {
            PromptOutcome::Confirm(input) => match self.session.confirm_calibration(&input) {
                Ok(scale) => {
                    self.set_status(format!("Calibrated {axis} scale: {scale:.3} px/{UNIT}"));
                }
                Err(err) => {
                    self.set_status(format!("{err}. The {axis} scale stays uncalibrated."));
                }
            },
            PromptOutcome::Decline => {
                if let Err(err) = self.session.decline_calibration() {
                    log::warn!("Declining calibration failed: {err}");
                }
                self.set_status(format!(
                    "Calibration skipped. The {axis} scale stays uncalibrated."
                ));
            }
        }
    }
}
