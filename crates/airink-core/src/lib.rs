//! AirInk Core Library
//!
//! Gesture tracking and drawing engine for the AirInk whiteboard: landmark
//! smoothing, gesture classification, tool routing, stroke and shape
//! rendering onto a raster surface, and undo/redo history.

pub mod board;
pub mod commands;
pub mod config;
pub mod gesture;
pub mod history;
pub mod landmarks;
pub mod session;
pub mod shapes;
pub mod smoothing;
pub mod stroke;
pub mod style;
pub mod surface;
pub mod tools;
pub mod tracker;

pub use board::Board;
pub use commands::{Command, CommandOutcome};
pub use config::{BoardConfig, ConfigError, EngineConfig, GestureConfig};
pub use gesture::{Gesture, GestureStabilizer, HandPose, classify};
pub use history::{History, MAX_HISTORY, Restorable};
pub use landmarks::{HandLandmarks, LANDMARK_COUNT, Landmark, LandmarkError, LandmarkFrame};
pub use session::Session;
pub use shapes::{ShapeDraft, ShapeKind};
pub use smoothing::LandmarkSmoother;
pub use stroke::Stroke;
pub use style::{BrushStyle, SerializableColor, Theme};
pub use surface::{Pen, Snapshot, Surface, SurfaceError};
pub use tools::{ToolAction, ToolKind, ToolManager, ToolState};
pub use tracker::{GestureTracker, HandReading};
