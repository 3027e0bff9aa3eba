//! CPU compositor built on tiny-skia.

use crate::cursor::draw_cursor;
use crate::renderer::{RenderContext, RenderResult, Renderer};
use airink_core::board::Board;
use airink_core::style::Theme;
use airink_core::surface::Surface;

/// Result of PNG rendering - contains the raw RGBA pixel data and dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct PngRenderResult {
    /// RGBA pixel data (4 bytes per pixel, straight alpha).
    pub rgba_data: Vec<u8>,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl PngRenderResult {
    fn from_surface(surface: &Surface) -> Self {
        Self {
            rgba_data: surface.to_rgba8(),
            width: surface.width(),
            height: surface.height(),
        }
    }
}

/// Composites the board into a display frame.
///
/// The frame and overlay are scratch buffers reused across frames; only the
/// board's own surface persists.
#[derive(Debug, Clone)]
pub struct SkiaRenderer {
    frame: Surface,
    overlay: Surface,
}

impl SkiaRenderer {
    /// Create a renderer for a board of the given size.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        Ok(Self {
            frame: Surface::new(width, height)?,
            overlay: Surface::new(width, height)?,
        })
    }

    /// The last composited frame.
    pub fn frame(&self) -> &Surface {
        &self.frame
    }

    /// The preview and cursor layer from the last frame.
    pub fn overlay(&self) -> &Surface {
        &self.overlay
    }

    fn ensure_size(&mut self, width: u32, height: u32) -> RenderResult<()> {
        if self.frame.width() != width || self.frame.height() != height {
            log::debug!("Renderer resized to {}x{}", width, height);
            self.frame = Surface::new(width, height)?;
            self.overlay = Surface::new(width, height)?;
        }
        Ok(())
    }

    /// Copy out the last frame.
    pub fn render_to_png(&self) -> PngRenderResult {
        PngRenderResult::from_surface(&self.frame)
    }
}

impl Renderer for SkiaRenderer {
    fn build_frame(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        let surface = ctx.board.surface();
        self.ensure_size(surface.width(), surface.height())?;

        let background = self.background_color(ctx);
        self.frame.fill(background.into());
        self.frame.draw_surface(surface);

        self.overlay.clear();
        if ctx.show_preview {
            ctx.board.render_preview(&mut self.overlay);
        }
        if let Some(cursor) = ctx.cursor {
            draw_cursor(&mut self.overlay, cursor, ctx.gesture, ctx.board.style().color);
        }
        self.frame.draw_surface(&self.overlay);
        Ok(())
    }
}

/// Flatten the board onto its theme background, without preview or cursor.
pub fn flatten(board: &Board, theme: Theme) -> RenderResult<PngRenderResult> {
    let surface = board.surface();
    let mut frame = Surface::new(surface.width(), surface.height())?;
    frame.fill(theme.background());
    frame.draw_surface(surface);
    Ok(PngRenderResult::from_surface(&frame))
}

#[cfg(test)]
mod tests {
    use super::*;
    use airink_core::config::BoardConfig;
    use airink_core::gesture::Gesture;
    use airink_core::style::SerializableColor;
    use airink_core::tools::ToolKind;
    use kurbo::Point;

    fn board() -> Board {
        Board::new(&BoardConfig {
            width: 80,
            height: 60,
            ..BoardConfig::default()
        })
        .unwrap()
    }

    fn rgba_at(result: &PngRenderResult, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * result.width + x) * 4) as usize;
        [
            result.rgba_data[i],
            result.rgba_data[i + 1],
            result.rgba_data[i + 2],
            result.rgba_data[i + 3],
        ]
    }

    #[test]
    fn test_blank_board_shows_theme() {
        let board = board();
        let mut renderer = SkiaRenderer::new(80, 60).unwrap();

        renderer
            .build_frame(&RenderContext::new(&board).with_theme(Theme::Dark))
            .unwrap();
        assert_eq!(renderer.frame().pixel(40, 30), Some(SerializableColor::black()));

        renderer.build_frame(&RenderContext::new(&board)).unwrap();
        assert_eq!(renderer.frame().pixel(40, 30), Some(SerializableColor::white()));
    }

    #[test]
    fn test_background_color_follows_theme() {
        let board = board();
        let renderer = SkiaRenderer::new(80, 60).unwrap();
        let dark = RenderContext::new(&board).with_theme(Theme::Dark);
        assert_eq!(
            SerializableColor::from(renderer.background_color(&dark)),
            SerializableColor::black()
        );
    }

    #[test]
    fn test_cursor_drawn_on_overlay_only() {
        let board = board();
        let mut renderer = SkiaRenderer::new(80, 60).unwrap();
        let ctx = RenderContext::new(&board).with_cursor(Some(Point::new(40.0, 30.0)), Gesture::Point);
        renderer.build_frame(&ctx).unwrap();

        assert_eq!(renderer.frame().pixel(40, 30), Some(board.style().color));
        assert!(!renderer.overlay().is_blank());
        assert!(board.surface().is_blank());
    }

    #[test]
    fn test_preview_composited() {
        let mut board = board();
        board.set_tool(ToolKind::Rectangle);
        board.handle_gesture(Gesture::Point, Point::new(10.0, 10.0));
        board.handle_gesture(Gesture::Point, Point::new(60.0, 50.0));

        let mut renderer = SkiaRenderer::new(80, 60).unwrap();
        renderer.build_frame(&RenderContext::new(&board)).unwrap();
        assert!(!renderer.overlay().is_blank());

        renderer
            .build_frame(&RenderContext::new(&board).with_preview(false))
            .unwrap();
        assert!(renderer.overlay().is_blank());
    }

    #[test]
    fn test_renderer_follows_board_size() {
        let mut board = board();
        let mut renderer = SkiaRenderer::new(80, 60).unwrap();
        board.resize(100, 50).unwrap();
        renderer.build_frame(&RenderContext::new(&board)).unwrap();
        assert_eq!(renderer.render_to_png().width, 100);
    }

    #[test]
    fn test_flatten_erased_areas_show_background() {
        let mut board = board();
        board.set_size(6.0);
        board.handle_gesture(Gesture::Point, Point::new(5.0, 30.0));
        board.handle_gesture(Gesture::Point, Point::new(75.0, 30.0));
        board.handle_gesture(Gesture::Palm, Point::new(75.0, 30.0));

        let light = flatten(&board, Theme::Light).unwrap();
        assert_eq!(light.rgba_data.len(), 80 * 60 * 4);
        assert_eq!(rgba_at(&light, 40, 5), [255, 255, 255, 255]);
        let ink = board.style().color;
        assert_eq!(rgba_at(&light, 40, 30), [ink.r, ink.g, ink.b, 255]);

        let dark = flatten(&board, Theme::Dark).unwrap();
        assert_eq!(rgba_at(&dark, 40, 5), [0, 0, 0, 255]);
    }
}
