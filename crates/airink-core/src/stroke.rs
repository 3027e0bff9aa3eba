//! Incremental freehand strokes.

use crate::style::BrushStyle;
use crate::surface::{Pen, Surface};
use kurbo::Point;

/// Upper bound on the pieces a single jump is split into.
pub const MAX_SEGMENTS: usize = 4096;

/// Split the segment `from -> to` into equal pieces no longer than `max_gap`.
///
/// Fast hand motion leaves large jumps between frames. Stroking each piece on
/// its own keeps round joins along the whole path.
pub fn segments(from: Point, to: Point, max_gap: f64) -> Vec<(Point, Point)> {
    let distance = from.distance(to);
    if max_gap <= 0.0 || distance <= max_gap {
        return vec![(from, to)];
    }
    let steps = ((distance / max_gap).ceil() as usize).min(MAX_SEGMENTS);
    (0..steps)
        .map(|i| {
            let t0 = i as f64 / steps as f64;
            let t1 = (i + 1) as f64 / steps as f64;
            (from.lerp(to, t0), from.lerp(to, t1))
        })
        .collect()
}

/// A freehand stroke in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
    style: BrushStyle,
}

impl Stroke {
    /// Start a stroke. Color, size and the eraser flag are fixed from here on.
    pub fn begin(start: Point, style: BrushStyle) -> Self {
        Self {
            points: vec![start],
            style,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn style(&self) -> &BrushStyle {
        &self.style
    }

    pub fn last_point(&self) -> Option<Point> {
        self.points.last().copied()
    }

    fn pen(&self) -> Pen {
        if self.style.eraser {
            Pen::eraser(self.style.width())
        } else {
            Pen::new(self.style.color, self.style.width())
        }
    }

    /// Add a point and ink the segment from the previous one.
    pub fn extend(&mut self, point: Point, surface: &mut Surface) {
        if let Some(last) = self.last_point() {
            let pen = self.pen();
            for (from, to) in segments(last, point, self.style.max_gap()) {
                surface.stroke_segment(from, to, &pen);
            }
        }
        self.points.push(point);
    }

    /// A stroke with a single point never inked anything.
    pub fn is_committable(&self) -> bool {
        self.points.len() > 1
    }
}
