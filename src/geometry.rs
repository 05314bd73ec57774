use egui::{Pos2, Rect, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStatus {
    Drawing,
    AwaitingLength,
    Calibrated,
    Declined,
}

/// A reference line used to calibrate one axis, in canvas pixels.
///
/// Line 0 measures horizontal distance and line 1 vertical distance; only the
/// matching coordinate of `end` ever moves away from `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub start: Pos2,
    pub end: Pos2,
    pub status: LineStatus,
}

impl ReferenceLine {
    pub const fn new(point: Pos2) -> Self {
        Self {
            start: point,
            end: point,
            status: LineStatus::Drawing,
        }
    }

    pub const fn axis_for_index(index: usize) -> Option<Axis> {
        match index {
            0 => Some(Axis::Horizontal),
            1 => Some(Axis::Vertical),
            _ => None,
        }
    }

    pub fn pixel_extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => f64::from((self.end.x - self.start.x).abs()),
            Axis::Vertical => f64::from((self.end.y - self.start.y).abs()),
        }
    }

    pub fn midpoint(&self) -> Pos2 {
        self.start.lerp(self.end, 0.5)
    }
}

/// Axis-aligned rectangle anchored at the press point.
///
/// `size` holds signed offsets from the anchor; negative components mean the
/// rectangle extends left or up from where the drag began.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectAnnotation {
    pub anchor: Pos2,
    pub size: Vec2,
}

impl RectAnnotation {
    pub const fn new(anchor: Pos2) -> Self {
        Self {
            anchor,
            size: Vec2::ZERO,
        }
    }

    /// Visual bounds with non-negative extents.
    pub fn bounds(&self) -> Rect {
        Rect::from_two_pos(self.anchor, self.anchor + self.size)
    }

    pub fn pixel_width(&self) -> f64 {
        f64::from(self.size.x.abs())
    }

    pub fn pixel_height(&self) -> f64 {
        f64::from(self.size.y.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn bounds_normalize_negative_drag() {
        let rect = RectAnnotation {
            anchor: pos2(100.0, 100.0),
            size: vec2(-40.0, -20.0),
        };
        let bounds = rect.bounds();
        assert_eq!(bounds.min, pos2(60.0, 80.0));
        assert_eq!(bounds.max, pos2(100.0, 100.0));
        assert!((rect.pixel_width() - 40.0).abs() < f64::EPSILON);
        assert!((rect.pixel_height() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn pixel_extent_reads_one_axis() {
        let line = ReferenceLine {
            start: pos2(10.0, 5.0),
            end: pos2(4.0, 50.0),
            status: LineStatus::Drawing,
        };
        assert!((line.pixel_extent(Axis::Horizontal) - 6.0).abs() < f64::EPSILON);
        assert!((line.pixel_extent(Axis::Vertical) - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn only_two_axes_are_assigned() {
        assert_eq!(ReferenceLine::axis_for_index(0), Some(Axis::Horizontal));
        assert_eq!(ReferenceLine::axis_for_index(1), Some(Axis::Vertical));
        assert_eq!(ReferenceLine::axis_for_index(2), None);
    }
}
