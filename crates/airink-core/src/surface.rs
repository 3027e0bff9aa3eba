//! Persistent raster surface backed by a tiny-skia pixmap.

use crate::history::Restorable;
use crate::style::SerializableColor;
use kurbo::{BezPath, PathEl, Point};
use thiserror::Error;
use tiny_skia::{
    BlendMode, FillRule, FilterQuality, LineCap, LineJoin, Paint, PathBuilder, Pixmap,
    PixmapPaint, Stroke, StrokeDash, Transform,
};

/// Dash pattern used for live shape previews.
pub const PREVIEW_DASH: [f32; 2] = [5.0, 5.0];

/// Surface errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("Invalid surface size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}

/// How ink is combined with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Composite {
    /// Normal source-over blending.
    #[default]
    Paint,
    /// Clear alpha wherever the ink lands.
    Erase,
}

/// Stroke parameters for a single draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    pub color: SerializableColor,
    pub width: f64,
    pub composite: Composite,
    pub dashed: bool,
}

impl Pen {
    pub fn new(color: SerializableColor, width: f64) -> Self {
        Self {
            color,
            width,
            composite: Composite::Paint,
            dashed: false,
        }
    }

    pub fn eraser(width: f64) -> Self {
        Self {
            color: SerializableColor::black(),
            width,
            composite: Composite::Erase,
            dashed: false,
        }
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }

    fn paint(&self) -> Paint<'static> {
        paint_for(self.color, self.composite)
    }

    fn stroke(&self) -> Stroke {
        let mut stroke = Stroke {
            width: self.width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        if self.dashed {
            stroke.dash = StrokeDash::new(PREVIEW_DASH.to_vec(), 0.0);
        }
        stroke
    }
}

fn paint_for(color: SerializableColor, composite: Composite) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.into());
    paint.anti_alias = true;
    paint.blend_mode = match composite {
        Composite::Paint => BlendMode::SourceOver,
        Composite::Erase => BlendMode::DestinationOut,
    };
    paint
}

/// Convert a kurbo path into a tiny-skia path.
///
/// Returns `None` for paths tiny-skia cannot represent (empty or non-finite).
pub fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => builder.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

/// A full copy of a surface's pixels.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pixmap: Pixmap,
}

impl Snapshot {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }
}

/// An RGBA pixel buffer that strokes and shapes are drawn onto.
#[derive(Debug, Clone)]
pub struct Surface {
    pixmap: Pixmap,
}

fn same_pixels(a: &Pixmap, b: &Pixmap) -> bool {
    a.width() == b.width() && a.height() == b.height() && a.data() == b.data()
}

impl PartialEq for Surface {
    fn eq(&self, other: &Self) -> bool {
        same_pixels(&self.pixmap, &other.pixmap)
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        same_pixels(&self.pixmap, &other.pixmap)
    }
}

impl Surface {
    /// Create a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let pixmap = Pixmap::new(width, height).ok_or(SurfaceError::InvalidSize { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// The underlying pixmap (premultiplied RGBA).
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Erase everything.
    pub fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    /// Fill the whole surface with one color.
    pub fn fill(&mut self, color: SerializableColor) {
        self.pixmap.fill(color.into());
    }

    /// Whether every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.pixmap.data().iter().all(|&b| b == 0)
    }

    /// Stroke a path.
    pub fn stroke_path(&mut self, path: &BezPath, pen: &Pen) {
        if let Some(path) = to_skia_path(path) {
            self.pixmap
                .stroke_path(&path, &pen.paint(), &pen.stroke(), Transform::identity(), None);
        }
    }

    /// Fill a path with the non-zero winding rule.
    pub fn fill_path(&mut self, path: &BezPath, color: SerializableColor) {
        if let Some(path) = to_skia_path(path) {
            self.pixmap.fill_path(
                &path,
                &paint_for(color, Composite::Paint),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    /// Stroke a single straight segment.
    pub fn stroke_segment(&mut self, from: Point, to: Point, pen: &Pen) {
        let mut path = BezPath::new();
        path.move_to(from);
        path.line_to(to);
        self.stroke_path(&path, pen);
    }

    /// Draw another surface on top of this one.
    pub fn draw_surface(&mut self, other: &Surface) {
        self.pixmap.draw_pixmap(
            0,
            0,
            other.pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    /// Resize, scaling the existing content into the new bounds.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        let mut resized = Pixmap::new(width, height).ok_or(SurfaceError::InvalidSize { width, height })?;
        draw_scaled(&mut resized, &self.pixmap);
        self.pixmap = resized;
        Ok(())
    }

    /// Read one pixel as straight (non-premultiplied) RGBA.
    pub fn pixel(&self, x: u32, y: u32) -> Option<SerializableColor> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            SerializableColor::new(c.red(), c.green(), c.blue(), c.alpha())
        })
    }

    /// Copy out straight RGBA8 bytes, row-major.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    /// Bounding box `(x0, y0, x1, y1)` of pixels whose alpha exceeds `min_alpha`.
    pub fn painted_bounds(&self, min_alpha: u8) -> Option<(u32, u32, u32, u32)> {
        let width = self.width();
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for (i, p) in self.pixmap.pixels().iter().enumerate() {
            if p.alpha() <= min_alpha {
                continue;
            }
            let x = i as u32 % width;
            let y = i as u32 / width;
            bounds = Some(match bounds {
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                None => (x, y, x, y),
            });
        }
        bounds
    }
}

fn draw_scaled(target: &mut Pixmap, source: &Pixmap) {
    let sx = target.width() as f32 / source.width() as f32;
    let sy = target.height() as f32 / source.height() as f32;
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    target.draw_pixmap(0, 0, source.as_ref(), &paint, Transform::from_scale(sx, sy), None);
}

impl Restorable for Surface {
    type Snapshot = Snapshot;

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            pixmap: self.pixmap.clone(),
        }
    }

    fn restore(&mut self, snapshot: &Snapshot) {
        if snapshot.pixmap.width() == self.width() && snapshot.pixmap.height() == self.height() {
            self.pixmap.data_mut().copy_from_slice(snapshot.pixmap.data());
        } else {
            // Captured before a resize: scale it into the current bounds.
            self.clear();
            draw_scaled(&mut self.pixmap, &snapshot.pixmap);
        }
    }

    fn clear(&mut self) {
        Surface::clear(self);
    }
}
