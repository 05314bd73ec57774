//! Append-only rectangle recording with live resize while dragging.

use crate::calibration::Scales;
use crate::error::SessionError;
use crate::geometry::RectAnnotation;
use egui::Pos2;

#[derive(Debug, Default)]
pub struct ShapeRecorder {
    rects: Vec<RectAnnotation>,
    drawing: bool,
}

impl ShapeRecorder {
    pub fn rects(&self) -> &[RectAnnotation] {
        &self.rects
    }

    pub const fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Starts a zero-sized rectangle at `point`; requires both axes calibrated.
    pub fn begin_rect(&mut self, point: Pos2, scales: Scales) -> Result<(), SessionError> {
        if !scales.is_complete() {
            return Err(SessionError::NotPermitted(
                "rectangles need both scales calibrated",
            ));
        }
        if self.drawing {
            return Err(SessionError::NotPermitted(
                "a rectangle is already being drawn",
            ));
        }
        self.rects.push(RectAnnotation::new(point));
        self.drawing = true;
        Ok(())
    }

    /// Stretches the last rectangle so its far corner sits at `point`.
    pub fn update_rect(&mut self, point: Pos2) -> bool {
        if !self.drawing {
            return false;
        }
        let Some(rect) = self.rects.last_mut() else {
            return false;
        };
        rect.size = point - rect.anchor;
        true
    }

    pub const fn end_rect(&mut self) {
        self.drawing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    const CALIBRATED: Scales = Scales {
        horizontal: Some(20.0),
        vertical: Some(20.0),
    };

    #[test]
    fn rectangle_follows_pointer_until_released() {
        let mut recorder = ShapeRecorder::default();
        recorder.begin_rect(pos2(100.0, 100.0), CALIBRATED).expect("begin");
        assert_eq!(recorder.rects()[0].size, vec2(0.0, 0.0));
        assert!(recorder.update_rect(pos2(150.0, 130.0)));
        assert!(recorder.update_rect(pos2(300.0, 200.0)));
        recorder.end_rect();
        assert_eq!(recorder.rects()[0].size, vec2(200.0, 100.0));
        assert!(!recorder.update_rect(pos2(0.0, 0.0)));
        assert_eq!(recorder.rects()[0].size, vec2(200.0, 100.0));
    }

    #[test]
    fn drag_up_left_gives_negative_offsets() {
        let mut recorder = ShapeRecorder::default();
        recorder.begin_rect(pos2(50.0, 50.0), CALIBRATED).expect("begin");
        recorder.update_rect(pos2(-10.0, 20.0));
        recorder.end_rect();
        assert_eq!(recorder.rects()[0].size, vec2(-60.0, -30.0));
    }

    #[test]
    fn uncalibrated_begin_is_refused() {
        let mut recorder = ShapeRecorder::default();
        let half = Scales {
            horizontal: Some(1.0),
            vertical: None,
        };
        assert!(recorder.begin_rect(pos2(0.0, 0.0), half).is_err());
        assert!(recorder.begin_rect(pos2(0.0, 0.0), Scales::default()).is_err());
        assert!(recorder.rects().is_empty());
    }

    #[test]
    fn end_rect_is_idempotent() {
        let mut recorder = ShapeRecorder::default();
        recorder.begin_rect(pos2(10.0, 10.0), CALIBRATED).expect("begin");
        recorder.update_rect(pos2(20.0, 40.0));
        recorder.end_rect();
        let before = recorder.rects().to_vec();
        recorder.end_rect();
        recorder.end_rect();
        assert_eq!(recorder.rects(), before.as_slice());
    }

    #[test]
    fn rectangles_are_appended_in_order() {
        let mut recorder = ShapeRecorder::default();
        for i in 0..3_u8 {
            let origin = pos2(f32::from(i) * 10.0, 0.0);
            recorder.begin_rect(origin, CALIBRATED).expect("begin");
            recorder.end_rect();
        }
        let anchors: Vec<_> = recorder.rects().iter().map(|r| r.anchor.x).collect();
        assert_eq!(anchors, vec![0.0, 10.0, 20.0]);
    }
}
