//! Brush style and color handling.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(color: &str) -> Option<Self> {
        let hex = color.trim().strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        match hex.len() {
            3 => Some(Self::new(
                channel(0..1)? * 17,
                channel(1..2)? * 17,
                channel(2..3)? * 17,
                255,
            )),
            6 => Some(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, 255)),
            8 => Some(Self::new(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => None,
        }
    }

    /// Format as `#rrggbb` (or `#rrggbbaa` when not opaque).
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

impl From<SerializableColor> for tiny_skia::Color {
    fn from(color: SerializableColor) -> Self {
        tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Named colors understood by voice and keyboard commands.
pub const PALETTE: [(&str, SerializableColor); 8] = [
    ("red", SerializableColor::new(0xef, 0x44, 0x44, 255)),
    ("green", SerializableColor::new(0x22, 0xc5, 0x5e, 255)),
    ("blue", SerializableColor::new(0x3b, 0x82, 0xf6, 255)),
    ("yellow", SerializableColor::new(0xfa, 0xcc, 0x15, 255)),
    ("black", SerializableColor::new(0x00, 0x00, 0x00, 255)),
    ("white", SerializableColor::new(0xff, 0xff, 0xff, 255)),
    ("pink", SerializableColor::new(0xff, 0x00, 0xaa, 255)),
    ("orange", SerializableColor::new(0xf9, 0x73, 0x16, 255)),
];

/// Look up a palette color by name.
pub fn named_color(name: &str) -> Option<SerializableColor> {
    PALETTE
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name.trim()))
        .map(|(_, c)| *c)
}

/// Style applied to strokes and shapes at action time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushStyle {
    /// Ink color.
    pub color: SerializableColor,
    /// Line width in pixels.
    pub size: f64,
    /// Erase instead of paint (strokes only).
    pub eraser: bool,
    /// Fill committed shapes with the ink color.
    pub fill: bool,
}

impl Default for BrushStyle {
    fn default() -> Self {
        Self {
            color: SerializableColor::new(0x3b, 0x82, 0xf6, 255),
            size: 5.0,
            eraser: false,
            fill: false,
        }
    }
}

impl BrushStyle {
    /// Smallest usable brush size.
    pub const MIN_SIZE: f64 = 1.0;

    /// Line width, never below [`Self::MIN_SIZE`].
    pub fn width(&self) -> f64 {
        self.size.max(Self::MIN_SIZE)
    }

    /// Largest gap between consecutive stroke samples before interpolation.
    pub fn max_gap(&self) -> f64 {
        self.width() * 2.0
    }
}

/// Board background theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Cycle to the other theme.
    pub fn next(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }

    pub fn background(self) -> SerializableColor {
        match self {
            Theme::Light => SerializableColor::white(),
            Theme::Dark => SerializableColor::black(),
        }
    }
}
