//! Real-world lengths, areas, and label placement.
//!
//! Everything here is a pure function of geometry and [`Scales`]; results are
//! recomputed on demand rather than cached.

use crate::calibration::Scales;
use crate::geometry::{Axis, LineStatus, RectAnnotation, ReferenceLine};
use egui::{Align2, Pos2, pos2};

pub const UNIT: &str = "ft";
pub const AREA_UNIT: &str = "sq ft";
const LABEL_GAP: f32 = 6.0;

/// Real-world extent of `line` along `axis`, or `0` while uncalibrated.
pub fn length(line: &ReferenceLine, axis: Axis, scales: &Scales) -> f64 {
    scales
        .get(axis)
        .map_or(0.0, |scale| line.pixel_extent(axis) / scale)
}

pub fn rect_width(rect: &RectAnnotation, scales: &Scales) -> f64 {
    scales
        .horizontal
        .map_or(0.0, |scale| rect.pixel_width() / scale)
}

pub fn rect_height(rect: &RectAnnotation, scales: &Scales) -> f64 {
    scales
        .vertical
        .map_or(0.0, |scale| rect.pixel_height() / scale)
}

pub fn area(rect: &RectAnnotation, scales: &Scales) -> f64 {
    if !scales.is_complete() {
        return 0.0;
    }
    rect_width(rect, scales) * rect_height(rect, scales)
}

pub fn total_area(rects: &[RectAnnotation], scales: &Scales) -> f64 {
    rects.iter().map(|rect| area(rect, scales)).sum()
}

pub fn format_length(feet: f64) -> String {
    format!("{feet:.2} {UNIT}")
}

pub fn format_area(square_feet: f64) -> String {
    format!("{square_feet:.2} {AREA_UNIT}")
}

pub fn format_total_area(square_feet: f64) -> String {
    format!("Total area: {}", format_area(square_feet))
}

/// Text positioned in canvas pixels; `align` says which side of the text
/// touches `anchor`.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub anchor: Pos2,
    pub align: Align2,
}

/// Per-rectangle measurement summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectMeasurement {
    pub width: f64,
    pub height: f64,
    pub area: f64,
}

impl RectMeasurement {
    pub fn of(rect: &RectAnnotation, scales: &Scales) -> Self {
        Self {
            width: rect_width(rect, scales),
            height: rect_height(rect, scales),
            area: area(rect, scales),
        }
    }
}

/// Length label centered on the midpoint of reference line `index`, once its
/// axis is calibrated.
pub fn line_label(index: usize, line: &ReferenceLine, scales: &Scales) -> Option<Label> {
    let axis = ReferenceLine::axis_for_index(index)?;
    if line.status != LineStatus::Calibrated {
        return None;
    }
    scales.get(axis)?;
    let text = format_length(length(line, axis, scales));
    Some(Label {
        text,
        anchor: line.midpoint(),
        align: Align2::CENTER_CENTER,
    })
}

/// Width above, height to the right, area in the middle.
pub fn rect_labels(rect: &RectAnnotation, scales: &Scales) -> Vec<Label> {
    let bounds = rect.bounds();
    let center = bounds.center();
    let mut labels = Vec::with_capacity(3);
    if scales.horizontal.is_some() {
        labels.push(Label {
            text: format_length(rect_width(rect, scales)),
            anchor: pos2(center.x, bounds.top() - LABEL_GAP),
            align: Align2::CENTER_BOTTOM,
        });
    }
    if scales.vertical.is_some() {
        labels.push(Label {
            text: format_length(rect_height(rect, scales)),
            anchor: pos2(bounds.right() + LABEL_GAP, center.y),
            align: Align2::LEFT_CENTER,
        });
    }
    if scales.is_complete() {
        labels.push(Label {
            text: format_area(area(rect, scales)),
            anchor: center,
            align: Align2::CENTER_CENTER,
        });
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;

    const SCALES: Scales = Scales {
        horizontal: Some(20.0),
        vertical: Some(20.0),
    };

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn rect(w: f32, h: f32) -> RectAnnotation {
        RectAnnotation {
            anchor: pos2(100.0, 100.0),
            size: vec2(w, h),
        }
    }

    #[test]
    fn area_ignores_drag_direction() {
        for (w, h) in [(200.0, 100.0), (-200.0, 100.0), (200.0, -100.0), (-200.0, -100.0)] {
            assert!(approx(area(&rect(w, h), &SCALES), 50.0));
        }
    }

    #[test]
    fn area_uses_each_axis_scale() {
        let scales = Scales {
            horizontal: Some(10.0),
            vertical: Some(4.0),
        };
        let r = rect(50.0, -20.0);
        assert!(approx(rect_width(&r, &scales), 5.0));
        assert!(approx(rect_height(&r, &scales), 5.0));
        assert!(approx(area(&r, &scales), 25.0));
    }

    #[test]
    fn area_is_zero_without_both_scales() {
        let r = rect(200.0, 100.0);
        let horizontal_only = Scales {
            horizontal: Some(20.0),
            vertical: None,
        };
        let vertical_only = Scales {
            horizontal: None,
            vertical: Some(20.0),
        };
        assert!(approx(area(&r, &horizontal_only), 0.0));
        assert!(approx(area(&r, &vertical_only), 0.0));
        assert!(approx(area(&r, &Scales::default()), 0.0));
    }

    #[test]
    fn total_area_sums_rectangles() {
        let mut rects = vec![rect(200.0, 100.0), rect(-40.0, 40.0)];
        assert!(approx(total_area(&rects, &SCALES), 54.0));
        rects.push(rect(20.0, 20.0));
        assert!(approx(total_area(&rects, &SCALES), 55.0));
        assert!(approx(total_area(&[], &SCALES), 0.0));
    }

    #[test]
    fn line_length_needs_its_scale() {
        let line = ReferenceLine {
            start: pos2(100.0, 50.0),
            end: pos2(300.0, 50.0),
            status: LineStatus::Calibrated,
        };
        assert!(approx(length(&line, Axis::Horizontal, &SCALES), 10.0));
        assert!(approx(length(&line, Axis::Horizontal, &Scales::default()), 0.0));
    }

    #[test]
    fn line_labels_sit_at_midpoints() {
        let horizontal = ReferenceLine {
            start: pos2(100.0, 50.0),
            end: pos2(300.0, 50.0),
            status: LineStatus::Calibrated,
        };
        let label = line_label(0, &horizontal, &SCALES).expect("label");
        assert_eq!(label.text, "10.00 ft");
        assert_eq!(label.align, Align2::CENTER_CENTER);
        assert_eq!(label.anchor, pos2(200.0, 50.0));

        let vertical = ReferenceLine {
            start: pos2(50.0, 50.0),
            end: pos2(50.0, 250.0),
            status: LineStatus::Calibrated,
        };
        let label = line_label(1, &vertical, &SCALES).expect("label");
        assert_eq!(label.align, Align2::CENTER_CENTER);
        assert_eq!(label.anchor, pos2(50.0, 150.0));
    }

    #[test]
    fn uncalibrated_line_has_no_label() {
        let line = ReferenceLine {
            start: pos2(0.0, 0.0),
            end: pos2(10.0, 0.0),
            status: LineStatus::Declined,
        };
        assert!(line_label(0, &line, &SCALES).is_none());
        let pending = ReferenceLine {
            status: LineStatus::AwaitingLength,
            ..line
        };
        assert!(line_label(0, &pending, &Scales::default()).is_none());
    }

    #[test]
    fn rect_labels_are_placed_around_bounds() {
        let labels = rect_labels(&rect(200.0, 100.0), &SCALES);
        let texts: Vec<_> = labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["10.00 ft", "5.00 ft", "50.00 sq ft"]);
        assert_eq!(labels[0].anchor, pos2(200.0, 100.0 - LABEL_GAP));
        assert_eq!(labels[1].anchor, pos2(300.0 + LABEL_GAP, 150.0));
        assert_eq!(labels[2].anchor, pos2(200.0, 150.0));
    }

    #[test]
    fn formatting_uses_two_decimals() {
        assert_eq!(format_total_area(50.0), "Total area: 50.00 sq ft");
        assert_eq!(format_length(3.1), "3.10 ft");
    }
}
