//! The whiteboard: persistent surface, history and the active interaction.

use crate::config::BoardConfig;
use crate::gesture::Gesture;
use crate::history::History;
use crate::shapes::ShapeDraft;
use crate::stroke::Stroke;
use crate::style::{BrushStyle, SerializableColor};
use crate::surface::{Snapshot, Surface, SurfaceError};
use crate::tools::{ToolAction, ToolKind, ToolManager, ToolState};
use kurbo::Point;
use uuid::Uuid;

/// A drawing board driven by routed gestures.
#[derive(Debug, Clone)]
pub struct Board {
    /// Unique board identifier.
    pub id: Uuid,
    surface: Surface,
    history: History<Snapshot>,
    tool_manager: ToolManager,
    style: BrushStyle,
    stroke: Option<Stroke>,
    shape: Option<ShapeDraft>,
    min_shape_extent: f64,
}

impl Board {
    /// Create a blank board.
    pub fn new(config: &BoardConfig) -> Result<Self, SurfaceError> {
        let surface = Surface::new(config.width, config.height)?;
        Ok(Self {
            id: Uuid::new_v4(),
            surface,
            history: History::new(config.history_capacity),
            tool_manager: ToolManager::new(),
            style: config.style,
            stroke: None,
            shape: None,
            min_shape_extent: config.min_shape_extent,
        })
    }

    /// The persistent raster.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn history(&self) -> &History<Snapshot> {
        &self.history
    }

    pub fn style(&self) -> &BrushStyle {
        &self.style
    }

    pub fn tool(&self) -> ToolKind {
        self.tool_manager.current_tool()
    }

    pub fn tool_state(&self) -> ToolState {
        self.tool_manager.state()
    }

    /// Check if a stroke or shape is in progress.
    pub fn is_active(&self) -> bool {
        self.tool_manager.is_active()
    }

    /// The shape being dragged out, if any.
    pub fn active_shape(&self) -> Option<&ShapeDraft> {
        self.shape.as_ref()
    }

    /// The stroke being drawn, if any.
    pub fn active_stroke(&self) -> Option<&Stroke> {
        self.stroke.as_ref()
    }

    /// Route a stable gesture and apply the resulting action.
    pub fn handle_gesture(&mut self, gesture: Gesture, cursor: Point) -> ToolAction {
        let action = self.tool_manager.route(gesture, cursor);
        self.apply(action);
        action
    }

    /// Finish any stroke or shape in progress.
    pub fn finish_active(&mut self) -> ToolAction {
        let action = self.tool_manager.finish();
        self.apply(action);
        action
    }

    fn apply(&mut self, action: ToolAction) {
        match action {
            ToolAction::None => {}
            ToolAction::BeginStroke(point) => {
                self.stroke = Some(Stroke::begin(point, self.style));
            }
            ToolAction::ExtendStroke(point) => {
                if let Some(stroke) = &mut self.stroke {
                    stroke.extend(point, &mut self.surface);
                }
            }
            ToolAction::FinishStroke => {
                if let Some(stroke) = self.stroke.take() {
                    if stroke.is_committable() {
                        self.history.commit(&self.surface);
                        log::debug!("Stroke committed ({} points)", stroke.points().len());
                    }
                }
            }
            ToolAction::BeginShape { kind, anchor } => {
                self.shape = Some(ShapeDraft::new(kind, anchor, self.style));
            }
            ToolAction::UpdateShape(point) => {
                if let Some(shape) = &mut self.shape {
                    shape.update(point);
                }
            }
            ToolAction::CommitShape => {
                if let Some(shape) = self.shape.take() {
                    if shape.is_degenerate(self.min_shape_extent) {
                        log::debug!("Discarded degenerate {}", shape.kind.name());
                    } else {
                        shape.render(&mut self.surface);
                        self.history.commit(&self.surface);
                        log::debug!("Shape committed: {}", shape.kind.name());
                    }
                }
            }
        }
    }

    /// Draw the live shape preview onto an overlay. The board is not changed.
    pub fn render_preview(&self, overlay: &mut Surface) {
        if let Some(shape) = &self.shape {
            shape.render_preview(overlay);
        }
    }

    /// Undo the last committed change.
    pub fn undo(&mut self) -> bool {
        self.finish_active();
        let undone = self.history.undo(&mut self.surface);
        log::debug!("Undo: {} (cursor {:?})", undone, self.history.cursor());
        undone
    }

    /// Redo the last undone change.
    pub fn redo(&mut self) -> bool {
        self.finish_active();
        let redone = self.history.redo(&mut self.surface);
        log::debug!("Redo: {} (cursor {:?})", redone, self.history.cursor());
        redone
    }

    /// Clear the board as a single undoable step.
    pub fn clear(&mut self) {
        self.finish_active();
        self.history.clear(&mut self.surface);
        log::debug!("Board cleared");
    }

    /// Switch tools. Finishes the active interaction and turns the eraser off.
    pub fn set_tool(&mut self, tool: ToolKind) {
        let action = self.tool_manager.set_tool(tool);
        self.apply(action);
        self.style.eraser = false;
    }

    /// Change ink color. Turns the eraser off.
    pub fn set_color(&mut self, color: SerializableColor) {
        self.style.color = color;
        self.style.eraser = false;
    }

    /// Change brush size, clamped to the minimum.
    pub fn set_size(&mut self, size: f64) {
        if size.is_finite() {
            self.style.size = size.max(BrushStyle::MIN_SIZE);
        }
    }

    pub fn set_eraser(&mut self, enabled: bool) {
        self.style.eraser = enabled;
    }

    pub fn set_fill(&mut self, enabled: bool) {
        self.style.fill = enabled;
    }

    /// Resize the board, scaling existing content.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        self.finish_active();
        self.surface.resize(width, height)?;
        log::debug!("Board resized to {}x{}", width, height);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MAX_HISTORY;
    use crate::style::named_color;

    fn board() -> Board {
        Board::new(&BoardConfig {
            width: 120,
            height: 90,
            ..BoardConfig::default()
        })
        .unwrap()
    }

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn draw_line(board: &mut Board, from: Point, to: Point) {
        board.handle_gesture(Gesture::Point, from);
        board.handle_gesture(Gesture::Point, to);
        board.handle_gesture(Gesture::Palm, to);
    }

    fn drag_shape(board: &mut Board, tool: ToolKind, anchor: Point, live: Point) {
        board.set_tool(tool);
        board.handle_gesture(Gesture::Point, anchor);
        board.handle_gesture(Gesture::Point, live);
        board.handle_gesture(Gesture::Palm, live);
    }

    #[test]
    fn test_new_board_is_blank() {
        let board = board();
        assert!(board.surface().is_blank());
        assert!(board.history().is_empty());
        assert_eq!(board.tool(), ToolKind::Pen);
    }

    #[test]
    fn test_stroke_commits_once() {
        let mut board = board();
        board.handle_gesture(Gesture::Point, p(10.0, 10.0));
        board.handle_gesture(Gesture::Point, p(30.0, 10.0));
        board.handle_gesture(Gesture::Point, p(60.0, 40.0));
        assert!(board.history().is_empty());
        assert!(!board.surface().is_blank());

        board.handle_gesture(Gesture::Palm, p(60.0, 40.0));
        assert_eq!(board.history().len(), 1);
        assert!(!board.is_active());
    }

    #[test]
    fn test_single_point_stroke_not_committed() {
        let mut board = board();
        board.handle_gesture(Gesture::Point, p(10.0, 10.0));
        board.handle_gesture(Gesture::Fist, p(10.0, 10.0));
        assert!(board.history().is_empty());
        assert!(board.surface().is_blank());
    }

    #[test]
    fn test_undo_all_restores_blank_exactly() {
        let mut board = board();
        let blank = board.surface().clone();
        draw_line(&mut board, p(10.0, 10.0), p(100.0, 10.0));
        drag_shape(&mut board, ToolKind::Rectangle, p(20.0, 20.0), p(80.0, 70.0));
        drag_shape(&mut board, ToolKind::Star, p(60.0, 45.0), p(90.0, 45.0));

        for _ in 0..3 {
            assert!(board.undo());
        }
        assert_eq!(board.surface(), &blank);
        assert!(!board.undo());
    }

    #[test]
    fn test_redo_at_newest_is_noop() {
        let mut board = board();
        draw_line(&mut board, p(10.0, 10.0), p(100.0, 10.0));
        let before = board.surface().clone();
        assert!(!board.redo());
        assert_eq!(board.surface(), &before);
    }

    #[test]
    fn test_undo_redo_roundtrip() {
        let mut board = board();
        draw_line(&mut board, p(10.0, 10.0), p(100.0, 10.0));
        let first = board.surface().clone();
        draw_line(&mut board, p(10.0, 50.0), p(100.0, 50.0));
        let second = board.surface().clone();

        assert!(board.undo());
        assert_eq!(board.surface(), &first);
        assert!(board.redo());
        assert_eq!(board.surface(), &second);
    }

    #[test]
    fn test_shape_preview_does_not_touch_surface() {
        let mut board = board();
        board.set_tool(ToolKind::Rectangle);
        board.handle_gesture(Gesture::Point, p(10.0, 10.0));
        board.handle_gesture(Gesture::Point, p(50.0, 30.0));
        assert!(board.surface().is_blank());

        let mut overlay = Surface::new(120, 90).unwrap();
        board.render_preview(&mut overlay);
        assert!(!overlay.is_blank());
        assert!(board.surface().is_blank());
        assert!(board.history().is_empty());

        board.handle_gesture(Gesture::Palm, p(50.0, 30.0));
        assert_eq!(board.history().len(), 1);
        assert!(board.active_shape().is_none());
    }

    #[test]
    fn test_committed_rectangle_bounds() {
        let mut board = board();
        board.set_size(2.0);
        drag_shape(&mut board, ToolKind::Rectangle, p(10.0, 10.0), p(50.0, 30.0));
        assert_eq!(board.surface().painted_bounds(16), Some((9, 9, 50, 30)));
    }

    #[test]
    fn test_degenerate_shape_discarded() {
        let mut board = board();
        drag_shape(&mut board, ToolKind::Circle, p(40.0, 40.0), p(43.0, 44.0));
        assert!(board.surface().is_blank());
        assert!(board.history().is_empty());
    }

    #[test]
    fn test_history_capacity() {
        let mut board = board();
        for i in 0..60 {
            let y = 5.0 + (i % 16) as f64 * 5.0;
            draw_line(&mut board, p(5.0, y), p(110.0, y));
        }
        assert_eq!(board.history().len(), MAX_HISTORY);

        let mut steps = 0;
        while board.undo() {
            steps += 1;
        }
        assert_eq!(steps, 50);
    }

    #[test]
    fn test_clear_undoes_in_one_step() {
        let mut board = board();
        draw_line(&mut board, p(10.0, 10.0), p(100.0, 10.0));
        let drawn = board.surface().clone();

        board.clear();
        assert!(board.surface().is_blank());
        assert!(board.undo());
        assert_eq!(board.surface(), &drawn);
    }

    #[test]
    fn test_eraser_captured_at_stroke_start() {
        let mut board = board();
        board.set_size(8.0);
        draw_line(&mut board, p(10.0, 40.0), p(110.0, 40.0));

        board.set_eraser(true);
        board.handle_gesture(Gesture::Point, p(60.0, 10.0));
        board.set_eraser(false);
        board.handle_gesture(Gesture::Point, p(60.0, 80.0));
        board.handle_gesture(Gesture::Palm, p(60.0, 80.0));

        assert_eq!(board.surface().pixel(60, 40).map(|c| c.a), Some(0));
        assert_eq!(board.surface().pixel(30, 40).map(|c| c.a), Some(255));
    }

    #[test]
    fn test_tool_change_finishes_stroke() {
        let mut board = board();
        board.handle_gesture(Gesture::Point, p(10.0, 10.0));
        board.handle_gesture(Gesture::Point, p(80.0, 10.0));
        board.set_tool(ToolKind::Circle);
        assert!(!board.is_active());
        assert_eq!(board.history().len(), 1);
    }

    #[test]
    fn test_style_semantics() {
        let mut board = board();
        board.set_eraser(true);
        board.set_color(named_color("red").unwrap());
        assert!(!board.style().eraser);

        board.set_eraser(true);
        board.set_tool(ToolKind::Pen);
        assert!(!board.style().eraser);

        board.set_size(0.2);
        assert_eq!(board.style().size, BrushStyle::MIN_SIZE);
        board.set_size(f64::NAN);
        assert_eq!(board.style().size, BrushStyle::MIN_SIZE);
    }

    #[test]
    fn test_resize_keeps_history() {
        let mut board = board();
        draw_line(&mut board, p(10.0, 10.0), p(100.0, 10.0));
        board.resize(240, 180).unwrap();
        assert_eq!(board.surface().width(), 240);
        assert_eq!(board.history().len(), 1);
        assert!(board.undo());
        assert!(board.surface().is_blank());
        assert!(board.redo());
        assert!(!board.surface().is_blank());
    }
}
