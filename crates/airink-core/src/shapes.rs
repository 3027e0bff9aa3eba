//! Two-phase shape drawing: live preview, then commit onto the surface.

use crate::style::BrushStyle;
use crate::surface::{Pen, Surface};
use kurbo::{BezPath, Circle, Ellipse, Point, Rect, Shape as _, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Curve flattening tolerance for circles and ovals.
const TOLERANCE: f64 = 0.1;

/// Shapes that can be dragged out with the point gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Rectangle,
    Square,
    Oval,
    Triangle,
    Star,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Circle,
        ShapeKind::Rectangle,
        ShapeKind::Square,
        ShapeKind::Oval,
        ShapeKind::Triangle,
        ShapeKind::Star,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Square => "square",
            ShapeKind::Oval => "oval",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Star => "star",
        }
    }
}

/// Axis-aligned box spanning two corners.
pub fn rect_between(anchor: Point, live: Point) -> Rect {
    Rect::from_points(anchor, live)
}

/// Square anchored at `anchor`, growing toward the sign of the drag.
pub fn square_rect(anchor: Point, live: Point) -> Rect {
    let delta = live - anchor;
    let side = delta.x.abs().max(delta.y.abs());
    let x = if delta.x >= 0.0 { anchor.x } else { anchor.x - side };
    let y = if delta.y >= 0.0 { anchor.y } else { anchor.y - side };
    Rect::new(x, y, x + side, y + side)
}

/// Apex and the two base corners of the drag triangle.
pub fn triangle_points(anchor: Point, live: Point) -> [Point; 3] {
    let delta = live - anchor;
    [
        Point::new(anchor.x + delta.x / 2.0, anchor.y),
        Point::new(anchor.x + delta.x, anchor.y + delta.y),
        Point::new(anchor.x, anchor.y + delta.y),
    ]
}

/// The ten vertices of a five-pointed star centered on `anchor`.
///
/// The first vertex points straight up. Radii depend on horizontal drag only.
pub fn star_points(anchor: Point, live: Point) -> [Point; 10] {
    let dx = (live.x - anchor.x).abs();
    let outer = dx.max(10.0);
    let inner = (dx / 2.0).max(5.0);
    let step = PI / 5.0;
    std::array::from_fn(|i| {
        let angle = 1.5 * PI + step * i as f64;
        let radius = if i % 2 == 0 { outer } else { inner };
        anchor + Vec2::from_angle(angle) * radius
    })
}

fn polygon(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if let Some((first, rest)) = points.split_first() {
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        path.close_path();
    }
    path
}

/// A shape being dragged out: fixed anchor, live point following the cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeDraft {
    pub kind: ShapeKind,
    pub anchor: Point,
    pub live: Point,
    /// Style captured when the shape started.
    pub style: BrushStyle,
}

impl ShapeDraft {
    /// Start a shape at `anchor`. The live point starts on the anchor.
    pub fn new(kind: ShapeKind, anchor: Point, style: BrushStyle) -> Self {
        Self {
            kind,
            anchor,
            live: anchor,
            style,
        }
    }

    /// Move the live point.
    pub fn update(&mut self, live: Point) {
        self.live = live;
    }

    pub fn delta(&self) -> Vec2 {
        self.live - self.anchor
    }

    /// Too small on both axes to be intentional.
    pub fn is_degenerate(&self, min_extent: f64) -> bool {
        let delta = self.delta();
        delta.x.abs() < min_extent && delta.y.abs() < min_extent
    }

    /// Outline of the shape in surface coordinates.
    pub fn to_path(&self) -> BezPath {
        let (a, p) = (self.anchor, self.live);
        let delta = self.delta();
        match self.kind {
            ShapeKind::Circle => Circle::new(a, delta.hypot().max(1.0)).to_path(TOLERANCE),
            ShapeKind::Oval => Ellipse::new(
                a,
                Vec2::new(delta.x.abs().max(1.0), delta.y.abs().max(1.0)),
                0.0,
            )
            .to_path(TOLERANCE),
            ShapeKind::Rectangle => rect_between(a, p).to_path(TOLERANCE),
            ShapeKind::Square => square_rect(a, p).to_path(TOLERANCE),
            ShapeKind::Triangle => polygon(&triangle_points(a, p)),
            ShapeKind::Star => polygon(&star_points(a, p)),
        }
    }

    /// Draw the finished shape: fill first when enabled, then the outline.
    pub fn render(&self, surface: &mut Surface) {
        let path = self.to_path();
        if self.style.fill {
            surface.fill_path(&path, self.style.color);
        }
        surface.stroke_path(&path, &Pen::new(self.style.color, self.style.width()));
    }

    /// Draw the dashed preview. Fill, when enabled, is drawn at half alpha.
    pub fn render_preview(&self, overlay: &mut Surface) {
        let path = self.to_path();
        let color = self.style.color;
        if self.style.fill {
            overlay.fill_path(&path, color.with_alpha(color.a / 2));
        }
        overlay.stroke_path(&path, &Pen::new(color, self.style.width()).dashed());
    }
}
