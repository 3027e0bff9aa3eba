//! AirInk Application
//!
//! Replays recorded landmark frames, spoken commands and key chords against a
//! whiteboard session and exports the result.

pub mod app;
pub mod recording;
pub mod shortcuts;

pub use app::{App, AppConfig, AppError, ReplaySummary};
pub use recording::{RecordingError, RecordingEvent, load_recording, parse_recording};
pub use shortcuts::{Shortcut, ShortcutRegistry};
