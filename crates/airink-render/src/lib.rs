//! AirInk Render Library
//!
//! Renderer abstraction and a tiny-skia implementation that composites the
//! board, the live shape preview and the gesture cursor.

pub mod cursor;
mod renderer;
mod skia_impl;

#[cfg(feature = "png-export")]
mod export;

pub use cursor::{CURSOR_RADIUS, CursorGlyph, draw_cursor};
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
pub use skia_impl::{PngRenderResult, SkiaRenderer, flatten};

#[cfg(feature = "png-export")]
pub use export::{encode_png, export_png};
