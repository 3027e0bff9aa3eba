//! Gesture cursor glyphs.

use airink_core::gesture::Gesture;
use airink_core::style::SerializableColor;
use airink_core::surface::{Pen, Surface};
use kurbo::{Arc, BezPath, Circle, Point, Shape, Vec2};
use std::f64::consts::PI;

/// Radius of the main cursor ring.
pub const CURSOR_RADIUS: f64 = 12.0;

const CYAN: SerializableColor = SerializableColor::new(0x00, 0xd4, 0xff, 255);
const YELLOW: SerializableColor = SerializableColor::new(0xfa, 0xcc, 0x15, 255);
const MAGENTA: SerializableColor = SerializableColor::new(0xff, 0x00, 0xaa, 255);

/// Extra outline drawn around the main ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Halo {
    pub radius: f64,
    /// Swept angle in radians, `2π` for a full ring.
    pub sweep: f64,
    pub color: SerializableColor,
    pub width: f64,
}

/// How the cursor looks for one gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorGlyph {
    pub fill: Option<SerializableColor>,
    pub ring: SerializableColor,
    pub ring_width: f64,
    pub halo: Option<Halo>,
}

impl CursorGlyph {
    /// Glyph for a gesture. The point cursor is filled with the brush color.
    pub fn for_gesture(gesture: Gesture, brush: SerializableColor) -> Self {
        match gesture {
            Gesture::Point => Self {
                fill: Some(brush),
                ring: SerializableColor::white(),
                ring_width: 2.0,
                halo: None,
            },
            // Rotation indicator.
            Gesture::Peace => Self {
                fill: Some(CYAN.with_alpha(153)),
                ring: CYAN,
                ring_width: 2.0,
                halo: Some(Halo {
                    radius: 20.0,
                    sweep: 1.5 * PI,
                    color: CYAN,
                    width: 2.0,
                }),
            },
            // Zoom indicator.
            Gesture::Pinch => Self {
                fill: None,
                ring: YELLOW,
                ring_width: 3.0,
                halo: Some(Halo {
                    radius: 18.0,
                    sweep: 2.0 * PI,
                    color: YELLOW.with_alpha(128),
                    width: 3.0,
                }),
            },
            Gesture::Fist => Self {
                fill: Some(MAGENTA.with_alpha(153)),
                ring: MAGENTA,
                ring_width: 2.0,
                halo: None,
            },
            Gesture::Palm => Self {
                fill: None,
                ring: SerializableColor::white().with_alpha(102),
                ring_width: 2.0,
                halo: None,
            },
            Gesture::None => Self {
                fill: None,
                ring: SerializableColor::white().with_alpha(77),
                ring_width: 1.0,
                halo: None,
            },
        }
    }

    /// Draw the glyph centered on `at`.
    pub fn draw(&self, target: &mut Surface, at: Point) {
        let ring = Circle::new(at, CURSOR_RADIUS).to_path(0.1);
        if let Some(fill) = self.fill {
            target.fill_path(&ring, fill);
        }
        target.stroke_path(&ring, &Pen::new(self.ring, self.ring_width));

        if let Some(halo) = self.halo {
            let arc = Arc {
                center: at,
                radii: Vec2::new(halo.radius, halo.radius),
                start_angle: 0.0,
                sweep_angle: halo.sweep,
                x_rotation: 0.0,
            };
            let path: BezPath = arc.path_elements(0.1).collect();
            target.stroke_path(&path, &Pen::new(halo.color, halo.width));
        }
    }
}

/// Draw the cursor for `gesture` at `at`.
pub fn draw_cursor(target: &mut Surface, at: Point, gesture: Gesture, brush: SerializableColor) {
    CursorGlyph::for_gesture(gesture, brush).draw(target, at);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_cursor_uses_brush_color() {
        let brush = SerializableColor::new(0xef, 0x44, 0x44, 255);
        let glyph = CursorGlyph::for_gesture(Gesture::Point, brush);
        assert_eq!(glyph.fill, Some(brush));
        assert_eq!(glyph.ring, SerializableColor::white());
    }

    #[test]
    fn test_halos() {
        let brush = SerializableColor::black();
        let peace = CursorGlyph::for_gesture(Gesture::Peace, brush).halo.unwrap();
        assert_eq!(peace.radius, 20.0);
        assert!(peace.sweep < 2.0 * PI);
        let pinch = CursorGlyph::for_gesture(Gesture::Pinch, brush).halo.unwrap();
        assert_eq!(pinch.radius, 18.0);
        assert!(CursorGlyph::for_gesture(Gesture::Fist, brush).halo.is_none());
    }

    #[test]
    fn test_draw_point_cursor() {
        let mut overlay = Surface::new(64, 64).unwrap();
        let brush = SerializableColor::new(0, 0, 255, 255);
        draw_cursor(&mut overlay, Point::new(32.0, 32.0), Gesture::Point, brush);
        assert_eq!(overlay.pixel(32, 32), Some(brush));
        assert_eq!(overlay.pixel(2, 2).map(|c| c.a), Some(0));
    }

    #[test]
    fn test_pinch_cursor_is_hollow() {
        let mut overlay = Surface::new(64, 64).unwrap();
        draw_cursor(&mut overlay, Point::new(32.0, 32.0), Gesture::Pinch, SerializableColor::black());
        assert_eq!(overlay.pixel(32, 32).map(|c| c.a), Some(0));
        assert!(overlay.painted_bounds(0).is_some());
    }
}
