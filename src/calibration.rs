//! Two-line scale calibration.
//!
//! The first reference line fixes the horizontal pixels-per-foot factor and the
//! second one the vertical factor. Each factor is derived once from the line's
//! pixel extent and a real-world length supplied by the user, then never
//! changes for the rest of the session.

use crate::error::SessionError;
use crate::geometry::{Axis, LineStatus, ReferenceLine};
use egui::Pos2;
use std::ops::RangeInclusive;

pub const MAX_REFERENCE_LINES: usize = 2;

/// Accepted pixels-per-foot range; keeps derived lengths and areas finite.
const SCALE_RANGE: RangeInclusive<f64> = 1e-6..=1e9;

/// Pixels per foot along each axis; `None` until calibrated.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Scales {
    pub horizontal: Option<f64>,
    pub vertical: Option<f64>,
}

impl Scales {
    pub const fn get(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }

    pub const fn is_complete(&self) -> bool {
        self.horizontal.is_some() && self.vertical.is_some()
    }

    const fn slot_mut(&mut self, axis: Axis) -> &mut Option<f64> {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }
}

/// A finished reference line waiting for its real-world length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationRequest {
    pub axis: Axis,
    pub line_index: usize,
    pub pixel_length: f64,
}

#[derive(Debug, Default)]
pub struct CalibrationEngine {
    lines: Vec<ReferenceLine>,
    scales: Scales,
    drawing: bool,
    pending: Option<CalibrationRequest>,
}

impl CalibrationEngine {
    pub fn lines(&self) -> &[ReferenceLine] {
        &self.lines
    }

    pub const fn scales(&self) -> Scales {
        self.scales
    }

    pub const fn pending(&self) -> Option<CalibrationRequest> {
        self.pending
    }

    pub const fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn has_all_lines(&self) -> bool {
        self.lines.len() >= MAX_REFERENCE_LINES
    }

    pub const fn is_fully_calibrated(&self) -> bool {
        self.scales.is_complete()
    }

    pub fn begin_line(&mut self, point: Pos2) -> Result<(), SessionError> {
        if self.has_all_lines() {
            return Err(SessionError::NotPermitted(
                "both reference lines already exist",
            ));
        }
        if self.drawing {
            return Err(SessionError::NotPermitted(
                "a reference line is already being drawn",
            ));
        }
        if self.pending.is_some() {
            return Err(SessionError::NotPermitted(
                "a reference line is waiting for its length",
            ));
        }
        self.lines.push(ReferenceLine::new(point));
        self.drawing = true;
        Ok(())
    }

    /// Moves the trailing endpoint along the line's own axis only.
    pub fn extend_line(&mut self, point: Pos2) -> bool {
        if !self.drawing {
            return false;
        }
        let index = self.lines.len().saturating_sub(1);
        let Some(line) = self.lines.last_mut() else {
            return false;
        };
        match ReferenceLine::axis_for_index(index) {
            Some(Axis::Horizontal) => line.end.x = point.x,
            Some(Axis::Vertical) => line.end.y = point.y,
            None => return false,
        }
        true
    }

    pub fn end_line(&mut self) -> Option<CalibrationRequest> {
        if !self.drawing {
            return None;
        }
        self.drawing = false;
        let index = self.lines.len().checked_sub(1)?;
        let axis = ReferenceLine::axis_for_index(index)?;
        let line = self.lines.get_mut(index)?;
        if self.scales.get(axis).is_some() {
            line.status = LineStatus::Declined;
            return None;
        }
        line.status = LineStatus::AwaitingLength;
        let request = CalibrationRequest {
            axis,
            line_index: index,
            pixel_length: line.pixel_extent(axis),
        };
        self.pending = Some(request);
        Some(request)
    }

    /// Resolves the pending request with the user's answer.
    ///
    /// Anything other than a positive number declines the line for good.
    pub fn confirm_length(&mut self, input: &str) -> Result<f64, SessionError> {
        let request = self.pending.take().ok_or(SessionError::NoPendingCalibration)?;
        let Some(feet) = parse_length(input) else {
            self.set_line_status(request.line_index, LineStatus::Declined);
            return Err(SessionError::InvalidLength(input.trim().to_string()));
        };
        if request.pixel_length <= f64::EPSILON {
            self.set_line_status(request.line_index, LineStatus::Declined);
            return Err(SessionError::DegenerateLine);
        }
        let slot = self.scales.slot_mut(request.axis);
        if slot.is_some() {
            self.set_line_status(request.line_index, LineStatus::Declined);
            return Err(SessionError::NotPermitted("axis is already calibrated"));
        }
        let scale = request.pixel_length / feet;
        if !SCALE_RANGE.contains(&scale) {
            self.set_line_status(request.line_index, LineStatus::Declined);
            return Err(SessionError::InvalidLength(input.trim().to_string()));
        }
        *slot = Some(scale);
        self.set_line_status(request.line_index, LineStatus::Calibrated);
        log::info!(
            "Calibrated {} scale: {:.3} px/ft ({:.1} px = {feet} ft)",
            request.axis.label(),
            scale,
            request.pixel_length
        );
        Ok(scale)
    }

    pub fn decline(&mut self) -> Result<(), SessionError> {
        let request = self.pending.take().ok_or(SessionError::NoPendingCalibration)?;
        self.set_line_status(request.line_index, LineStatus::Declined);
        log::info!(
            "Calibration of the {} reference line declined",
            request.axis.label()
        );
        Ok(())
    }

    fn set_line_status(&mut self, index: usize, status: LineStatus) {
        if let Some(line) = self.lines.get_mut(index) {
            line.status = status;
        }
    }
}

/// Parses a positive length in feet. Only `.` separates decimals, so `1,000`
/// is rejected instead of being read as `1.0`.
pub fn parse_length(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn drawn_line(
        engine: &mut CalibrationEngine,
        from: Pos2,
        to: Pos2,
    ) -> Option<CalibrationRequest> {
        engine.begin_line(from).expect("begin line");
        engine.extend_line(to);
        engine.end_line()
    }

    #[test]
    fn horizontal_line_keeps_y_pinned() {
        let mut engine = CalibrationEngine::default();
        engine.begin_line(pos2(100.0, 50.0)).expect("begin");
        for (x, y) in [(120.0, 80.0), (250.0, 10.0), (300.0, 400.0)] {
            assert!(engine.extend_line(pos2(x, y)));
            let line = &engine.lines()[0];
            assert!((line.start.y - line.end.y).abs() < f32::EPSILON);
        }
        assert_eq!(engine.lines()[0].end, pos2(300.0, 50.0));
    }

    #[test]
    fn vertical_line_keeps_x_pinned() {
        let mut engine = CalibrationEngine::default();
        let _ = drawn_line(&mut engine, pos2(0.0, 0.0), pos2(10.0, 0.0));
        engine.decline().expect("decline");
        engine.begin_line(pos2(50.0, 50.0)).expect("begin");
        for (x, y) in [(80.0, 90.0), (5.0, 250.0)] {
            engine.extend_line(pos2(x, y));
            let line = &engine.lines()[1];
            assert!((line.start.x - line.end.x).abs() < f32::EPSILON);
        }
        assert_eq!(engine.lines()[1].end, pos2(50.0, 250.0));
    }

    #[test]
    fn confirm_sets_scale_from_pixel_length() {
        let mut engine = CalibrationEngine::default();
        let request = drawn_line(&mut engine, pos2(100.0, 50.0), pos2(300.0, 50.0))
            .expect("request");
        assert_eq!(request.axis, Axis::Horizontal);
        assert!(approx(request.pixel_length, 200.0));
        let scale = engine.confirm_length("10").expect("confirm");
        assert!(approx(scale, 20.0));
        assert_eq!(engine.scales().horizontal, Some(scale));
        assert_eq!(engine.lines()[0].status, LineStatus::Calibrated);
    }

    #[test]
    fn scale_is_one_shot() {
        let mut engine = CalibrationEngine::default();
        let _ = drawn_line(&mut engine, pos2(0.0, 0.0), pos2(100.0, 0.0));
        engine.confirm_length("5").expect("confirm");
        assert_eq!(
            engine.confirm_length("50"),
            Err(SessionError::NoPendingCalibration)
        );
        assert_eq!(engine.scales().horizontal, Some(20.0));
    }

    #[test]
    fn invalid_input_declines_permanently() {
        let mut engine = CalibrationEngine::default();
        let _ = drawn_line(&mut engine, pos2(0.0, 0.0), pos2(100.0, 0.0));
        assert!(matches!(
            engine.confirm_length("ten"),
            Err(SessionError::InvalidLength(_))
        ));
        assert_eq!(engine.scales().horizontal, None);
        assert_eq!(engine.lines()[0].status, LineStatus::Declined);
        assert_eq!(
            engine.confirm_length("10"),
            Err(SessionError::NoPendingCalibration)
        );
        assert_eq!(engine.scales().horizontal, None);
    }

    #[test]
    fn zero_extent_line_cannot_calibrate() {
        let mut engine = CalibrationEngine::default();
        let request = drawn_line(&mut engine, pos2(20.0, 20.0), pos2(20.0, 90.0))
            .expect("request");
        assert!(approx(request.pixel_length, 0.0));
        assert_eq!(engine.confirm_length("3"), Err(SessionError::DegenerateLine));
        assert_eq!(engine.scales().horizontal, None);
    }

    #[test]
    fn tiny_length_that_overflows_the_scale_declines() {
        let mut engine = CalibrationEngine::default();
        let _ = drawn_line(&mut engine, pos2(100.0, 50.0), pos2(300.0, 50.0));
        assert!(matches!(
            engine.confirm_length("1e-320"),
            Err(SessionError::InvalidLength(_))
        ));
        assert_eq!(engine.scales().horizontal, None);
        assert_eq!(engine.lines()[0].status, LineStatus::Declined);
    }

    #[test]
    fn huge_length_on_short_line_declines() {
        let mut engine = CalibrationEngine::default();
        let _ = drawn_line(&mut engine, pos2(0.0, 0.0), pos2(2.0, 0.0));
        assert!(matches!(
            engine.confirm_length("1e300"),
            Err(SessionError::InvalidLength(_))
        ));
        assert_eq!(engine.scales().horizontal, None);
        assert!(!engine.is_fully_calibrated());
    }

    #[test]
    fn third_line_is_refused() {
        let mut engine = CalibrationEngine::default();
        let _ = drawn_line(&mut engine, pos2(0.0, 0.0), pos2(10.0, 0.0));
        engine.decline().expect("decline");
        let _ = drawn_line(&mut engine, pos2(0.0, 0.0), pos2(0.0, 10.0));
        engine.decline().expect("decline");
        assert!(matches!(
            engine.begin_line(pos2(1.0, 1.0)),
            Err(SessionError::NotPermitted(_))
        ));
        assert_eq!(engine.lines().len(), 2);
    }

    #[test]
    fn new_line_waits_for_pending_answer() {
        let mut engine = CalibrationEngine::default();
        let _ = drawn_line(&mut engine, pos2(0.0, 0.0), pos2(10.0, 0.0));
        assert!(engine.begin_line(pos2(5.0, 5.0)).is_err());
        assert_eq!(engine.lines().len(), 1);
    }

    #[test]
    fn extend_without_drawing_is_ignored() {
        let mut engine = CalibrationEngine::default();
        assert!(!engine.extend_line(pos2(3.0, 3.0)));
        assert!(engine.end_line().is_none());
        assert!(engine.lines().is_empty());
    }

    #[test]
    fn parse_length_accepts_positive_decimals_only() {
        assert_eq!(parse_length(" 12.5 "), Some(12.5));
        assert_eq!(parse_length("7,25"), None);
        assert_eq!(parse_length("1,000"), None);
        assert_eq!(parse_length(""), None);
        assert_eq!(parse_length("   "), None);
        assert_eq!(parse_length("0"), None);
        assert_eq!(parse_length("-4"), None);
        assert_eq!(parse_length("inf"), None);
        assert_eq!(parse_length("NaN"), None);
        assert_eq!(parse_length("10 feet"), None);
    }
}
