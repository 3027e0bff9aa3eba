//! Renderer trait abstraction.

use airink_core::board::Board;
use airink_core::gesture::Gesture;
use airink_core::style::Theme;
use kurbo::Point;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Surface error: {0}")]
    Surface(String),
    #[error("Encoding failed: {0}")]
    Encode(String),
}

impl From<airink_core::surface::SurfaceError> for RendererError {
    fn from(err: airink_core::surface::SurfaceError) -> Self {
        RendererError::Surface(err.to_string())
    }
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The board to render.
    pub board: &'a Board,
    /// Background theme.
    pub theme: Theme,
    /// Stable gesture, used to pick the cursor glyph.
    pub gesture: Gesture,
    /// Cursor position in board pixels, if a hand is visible.
    pub cursor: Option<Point>,
    /// Draw the live shape preview.
    pub show_preview: bool,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            theme: Theme::default(),
            gesture: Gesture::None,
            cursor: None,
            show_preview: true,
        }
    }

    /// Set the background theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the cursor position and the gesture it reflects.
    pub fn with_cursor(mut self, cursor: Option<Point>, gesture: Gesture) -> Self {
        self.cursor = cursor;
        self.gesture = gesture;
        self
    }

    pub fn with_preview(mut self, show: bool) -> Self {
        self.show_preview = show;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer: Send + Sync {
    /// Composite one frame: background, board surface, preview, cursor.
    fn build_frame(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Background color the frame is cleared to.
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.theme.background().into()
    }
}
