//! JSON-lines recordings of landmark frames and commands.

use airink_core::landmarks::LandmarkFrame;
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use std::path::Path;
use thiserror::Error;

/// Recording errors.
#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// One line of a recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingEvent {
    /// A landmark frame from the hand tracker.
    Frame(LandmarkFrame),
    /// A spoken or typed phrase, e.g. `"undo"` or `"hey board, draw star"`.
    Command(String),
    /// A keyboard chord, e.g. `"Ctrl+Z"`.
    Key(String),
}

/// Parse a recording from any buffered reader. Blank lines are ignored.
pub fn parse_recording<R: BufRead>(reader: R) -> Result<Vec<RecordingEvent>, RecordingError> {
    let mut events = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let event = serde_json::from_str(trimmed).map_err(|e| RecordingError::Parse {
            line: index + 1,
            message: e.to_string(),
        })?;
        events.push(event);
    }
    Ok(events)
}

/// Load a recording file.
pub fn load_recording(path: &Path) -> Result<Vec<RecordingEvent>, RecordingError> {
    let file = std::fs::File::open(path)?;
    let events = parse_recording(std::io::BufReader::new(file))?;
    log::info!("Loaded {} events from {}", events.len(), path.display());
    Ok(events)
}
