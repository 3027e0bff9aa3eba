//! A single-user drawing session fed one landmark frame at a time.

use crate::board::Board;
use crate::commands::{BRUSH_STEP, Command, CommandOutcome};
use crate::config::EngineConfig;
use crate::landmarks::LandmarkFrame;
use crate::style::Theme;
use crate::surface::SurfaceError;
use crate::tracker::{GestureTracker, HandReading};
use kurbo::Point;

/// How far outside the unit square a normalized cursor may stray before it is
/// pinned to the board edge.
pub const CURSOR_MARGIN: f64 = 0.05;

/// Owns every piece of per-user state: tracking, board and theme.
#[derive(Debug, Clone)]
pub struct Session {
    tracker: GestureTracker,
    board: Board,
    theme: Theme,
    mirror_x: bool,
    last_timestamp: Option<f64>,
    last_cursor: Point,
    last_reading: HandReading,
}

impl Session {
    pub fn new(config: &EngineConfig) -> Result<Self, SurfaceError> {
        Ok(Self {
            tracker: GestureTracker::new(config.gesture.clone()),
            board: Board::new(&config.board)?,
            theme: Theme::default(),
            mirror_x: config.board.mirror_x,
            last_timestamp: None,
            last_cursor: Point::ZERO,
            last_reading: HandReading::default(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// The reading from the last processed frame.
    pub fn last_reading(&self) -> &HandReading {
        &self.last_reading
    }

    /// Board-space cursor from the last frame that saw a hand.
    pub fn cursor(&self) -> Point {
        self.last_cursor
    }

    /// Map a normalized landmark position to board pixels.
    ///
    /// Positions are clamped to the board plus [`CURSOR_MARGIN`] so a wild
    /// landmark cannot drag a stroke arbitrarily far off the surface.
    pub fn to_board(&self, normalized: Point) -> Point {
        let clamp = |v: f64| v.clamp(-CURSOR_MARGIN, 1.0 + CURSOR_MARGIN);
        let x = if self.mirror_x {
            1.0 - normalized.x
        } else {
            normalized.x
        };
        let surface = self.board.surface();
        Point::new(
            clamp(x) * f64::from(surface.width()),
            clamp(normalized.y) * f64::from(surface.height()),
        )
    }

    /// Run one frame through tracking and drawing.
    ///
    /// Returns `None` when the frame is not newer than the last one processed.
    /// Malformed landmark sets count as a lost hand.
    pub fn process_frame(&mut self, frame: &LandmarkFrame) -> Option<&HandReading> {
        if !frame.timestamp_ms.is_finite() {
            log::warn!("Dropping frame with timestamp {}", frame.timestamp_ms);
            return None;
        }
        if self.last_timestamp.is_some_and(|last| frame.timestamp_ms <= last) {
            log::trace!("Skipping stale frame at {} ms", frame.timestamp_ms);
            return None;
        }
        self.last_timestamp = Some(frame.timestamp_ms);

        let hand = frame.validate().unwrap_or_else(|e| {
            log::warn!("Rejected landmarks at {} ms: {}", frame.timestamp_ms, e);
            None
        });

        let reading = self.tracker.update(hand.as_ref());
        if let Some(cursor) = reading.cursor {
            self.last_cursor = self.to_board(cursor);
        }
        self.board.handle_gesture(reading.gesture, self.last_cursor);
        self.last_reading = reading;
        Some(&self.last_reading)
    }

    /// Apply a command through the same operations as direct controls.
    pub fn execute(&mut self, command: Command) -> CommandOutcome {
        log::info!("Command: {}", command);
        let board = &mut self.board;
        match command {
            Command::Undo => done_if(board.undo()),
            Command::Redo => done_if(board.redo()),
            Command::Clear => {
                board.clear();
                CommandOutcome::Done
            }
            Command::Export => {
                board.finish_active();
                CommandOutcome::ExportRequested
            }
            Command::SetColor(color) => {
                board.set_color(color);
                CommandOutcome::Done
            }
            Command::SetTool(tool) => {
                board.set_tool(tool);
                CommandOutcome::Done
            }
            Command::SetEraser(enabled) => {
                board.set_eraser(enabled);
                CommandOutcome::Done
            }
            Command::ToggleEraser => {
                let enabled = !board.style().eraser;
                board.set_eraser(enabled);
                CommandOutcome::Done
            }
            Command::SetFill(enabled) => {
                board.set_fill(enabled);
                CommandOutcome::Done
            }
            Command::ToggleFill => {
                let enabled = !board.style().fill;
                board.set_fill(enabled);
                CommandOutcome::Done
            }
            Command::SetSize(size) => {
                board.set_size(size);
                CommandOutcome::Done
            }
            Command::GrowBrush => {
                let size = board.style().size + BRUSH_STEP;
                board.set_size(size);
                CommandOutcome::Done
            }
            Command::ShrinkBrush => {
                let size = board.style().size - BRUSH_STEP;
                board.set_size(size);
                CommandOutcome::Done
            }
            Command::SetTheme(theme) => {
                self.theme = theme;
                CommandOutcome::ThemeChanged(theme)
            }
            Command::ToggleTheme => {
                self.theme = self.theme.next();
                CommandOutcome::ThemeChanged(self.theme)
            }
        }
    }
}

fn done_if(changed: bool) -> CommandOutcome {
    if changed {
        CommandOutcome::Done
    } else {
        CommandOutcome::NothingToDo
    }
}
