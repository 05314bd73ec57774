//! The measurement session: one controller owning calibration, rectangles,
//! the drawing mode, and image transparency.
//!
//! All legality checks live here (at most two reference lines, rectangles
//! only once both axes are calibrated, nothing new while a length prompt is
//! open) so the UI only reflects them in its controls.

use crate::calibration::{CalibrationEngine, CalibrationRequest, Scales};
use crate::error::SessionError;
use crate::geometry::{RectAnnotation, ReferenceLine};
use crate::measure::{self, Label, RectMeasurement};
use crate::shapes::ShapeRecorder;
use egui::Pos2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    #[default]
    None,
    Line,
    Rectangle,
}

impl DrawMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "Idle",
            Self::Line => "Drawing reference line",
            Self::Rectangle => "Drawing rectangle",
        }
    }
}

#[derive(Debug)]
pub struct Session {
    calibration: CalibrationEngine,
    shapes: ShapeRecorder,
    mode: DrawMode,
    transparency: f32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Session {
    pub fn new(transparency: f32) -> Self {
        Self {
            calibration: CalibrationEngine::default(),
            shapes: ShapeRecorder::default(),
            mode: DrawMode::None,
            transparency: transparency.clamp(0.0, 1.0),
        }
    }

    pub const fn mode(&self) -> DrawMode {
        self.mode
    }

    /// Image opacity in `[0, 1]`.
    pub const fn transparency(&self) -> f32 {
        self.transparency
    }

    pub fn set_transparency(&mut self, value: f32) {
        self.transparency = if value.is_nan() {
            1.0
        } else {
            value.clamp(0.0, 1.0)
        };
    }

    pub const fn scales(&self) -> Scales {
        self.calibration.scales()
    }

    pub fn lines(&self) -> &[ReferenceLine] {
        self.calibration.lines()
    }

    pub fn rects(&self) -> &[RectAnnotation] {
        self.shapes.rects()
    }

    pub const fn pending_calibration(&self) -> Option<CalibrationRequest> {
        self.calibration.pending()
    }

    pub const fn is_drawing(&self) -> bool {
        self.calibration.is_drawing() || self.shapes.is_drawing()
    }

    pub fn can_draw_lines(&self) -> bool {
        !self.calibration.has_all_lines() && self.calibration.pending().is_none()
    }

    pub const fn can_draw_rectangles(&self) -> bool {
        self.calibration.is_fully_calibrated() && self.calibration.pending().is_none()
    }

    pub fn set_mode(&mut self, mode: DrawMode) -> Result<(), SessionError> {
        if mode == self.mode {
            return Ok(());
        }
        if self.is_drawing() {
            return Err(SessionError::NotPermitted(
                "finish the current shape before switching modes",
            ));
        }
        match mode {
            DrawMode::None => {}
            DrawMode::Line if !self.can_draw_lines() => {
                return Err(SessionError::NotPermitted(
                    "no more reference lines can be drawn",
                ));
            }
            DrawMode::Rectangle if !self.can_draw_rectangles() => {
                return Err(SessionError::NotPermitted(
                    "rectangles need both scales calibrated",
                ));
            }
            DrawMode::Line | DrawMode::Rectangle => {}
        }
        log::debug!("Draw mode: {:?} -> {mode:?}", self.mode);
        self.mode = mode;
        Ok(())
    }

    pub fn pointer_down(&mut self, point: Pos2) -> Result<(), SessionError> {
        if self.is_drawing() {
            return Err(SessionError::NotPermitted("a shape is already being drawn"));
        }
        if self.calibration.pending().is_some() {
            return Err(SessionError::NotPermitted(
                "a reference line is waiting for its length",
            ));
        }
        match self.mode {
            DrawMode::None => Err(SessionError::NotPermitted("no drawing mode selected")),
            DrawMode::Line => self.calibration.begin_line(point),
            DrawMode::Rectangle => self.shapes.begin_rect(point, self.calibration.scales()),
        }
    }

    /// Returns `false` when nothing is being drawn and the move was ignored.
    pub fn pointer_move(&mut self, point: Pos2) -> bool {
        if self.calibration.is_drawing() {
            self.calibration.extend_line(point)
        } else if self.shapes.is_drawing() {
            self.shapes.update_rect(point)
        } else {
            false
        }
    }

    /// Finishes the current shape. A finished reference line that still needs
    /// a real-world length comes back as a request for the caller to answer
    /// through [`Self::confirm_calibration`] or [`Self::decline_calibration`].
    pub fn pointer_up(&mut self) -> Option<CalibrationRequest> {
        if self.shapes.is_drawing() {
            self.shapes.end_rect();
            return None;
        }
        let request = self.calibration.end_line();
        if self.mode == DrawMode::Line && self.calibration.has_all_lines() {
            self.mode = DrawMode::None;
        }
        request
    }

    pub fn confirm_calibration(&mut self, input: &str) -> Result<f64, SessionError> {
        let result = self.calibration.confirm_length(input);
        if let Err(err) = &result {
            log::warn!("Calibration not applied: {err}");
        }
        result
    }

    pub fn decline_calibration(&mut self) -> Result<(), SessionError> {
        self.calibration.decline()
    }

    pub fn total_area(&self) -> f64 {
        measure::total_area(self.shapes.rects(), &self.calibration.scales())
    }

    pub fn measurements(&self) -> Vec<RectMeasurement> {
        let scales = self.calibration.scales();
        self.shapes
            .rects()
            .iter()
            .map(|rect| RectMeasurement::of(rect, &scales))
            .collect()
    }

    pub fn line_labels(&self) -> Vec<Label> {
        let scales = self.calibration.scales();
        self.calibration
            .lines()
            .iter()
            .enumerate()
            .filter_map(|(idx, line)| measure::line_label(idx, line, &scales))
            .collect()
    }

    pub fn rect_labels(&self) -> Vec<Label> {
        let scales = self.calibration.scales();
        self.shapes
            .rects()
            .iter()
            .flat_map(|rect| measure::rect_labels(rect, &scales))
            .collect()
    }
}
