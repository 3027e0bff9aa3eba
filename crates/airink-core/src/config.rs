//! Engine configuration.

use crate::style::BrushStyle;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid configuration: {0}")]
    Parse(String),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunables for smoothing, classification and hysteresis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Weight of each new observation in the landmark moving average.
    pub smoothing_alpha: f64,
    /// Consecutive identical frames needed to enter a gesture.
    pub entry_threshold: u32,
    /// Consecutive frames needed to leave a stable point gesture.
    pub exit_point_threshold: u32,
    /// Thumb-to-index tip distance below which the hand is pinching.
    pub pinch_threshold: f64,
    /// Horizontal thumb-tip to index-knuckle distance for an extended thumb.
    pub thumb_extension_threshold: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            smoothing_alpha: crate::smoothing::DEFAULT_SMOOTHING_ALPHA,
            entry_threshold: 2,
            exit_point_threshold: 5,
            pinch_threshold: 0.05,
            thumb_extension_threshold: 0.08,
        }
    }
}

/// Board geometry, history and default style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Maximum number of history snapshots kept.
    pub history_capacity: usize,
    /// Shapes smaller than this on both axes are treated as accidental taps.
    pub min_shape_extent: f64,
    /// Mirror the camera x axis so the board behaves like a mirror.
    pub mirror_x: bool,
    /// Style used until the controller changes it.
    pub style: BrushStyle,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            history_capacity: crate::history::MAX_HISTORY,
            min_shape_extent: 5.0,
            mirror_x: true,
            style: BrushStyle::default(),
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub gesture: GestureConfig,
    pub board: BoardConfig,
}

impl EngineConfig {
    /// Parse a JSON configuration. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let alpha = self.gesture.smoothing_alpha;
        if !(0.0..=1.0).contains(&alpha) {
            return Err(ConfigError::Invalid {
                field: "gesture.smoothing_alpha",
                reason: format!("{alpha} is outside [0, 1]"),
            });
        }
        if self.gesture.entry_threshold == 0 || self.gesture.exit_point_threshold == 0 {
            return Err(ConfigError::Invalid {
                field: "gesture thresholds",
                reason: "must be at least 1 frame".to_string(),
            });
        }
        if self.board.width == 0 || self.board.height == 0 {
            return Err(ConfigError::Invalid {
                field: "board size",
                reason: format!("{}x{} is empty", self.board.width, self.board.height),
            });
        }
        if self.board.history_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "board.history_capacity",
                reason: "must keep at least one snapshot".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.gesture.entry_threshold, 2);
        assert_eq!(config.gesture.exit_point_threshold, 5);
        assert_eq!(config.board.history_capacity, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EngineConfig::from_json(r#"{"gesture": {"exit_point_threshold": 8}}"#).unwrap();
        assert_eq!(config.gesture.exit_point_threshold, 8);
        assert_eq!(config.gesture.entry_threshold, 2);
        assert_eq!(config.board, BoardConfig::default());
    }

    #[test]
    fn test_rejects_bad_alpha() {
        let err = EngineConfig::from_json(r#"{"gesture": {"smoothing_alpha": 1.5}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            EngineConfig::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"board": {{"width": 320, "height": 200}}}}"#).unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.board.width, 320);
        assert_eq!(config.board.height, 200);
    }

    #[test]
    fn test_roundtrip() {
        let config = EngineConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(EngineConfig::from_json(&json).unwrap(), config);
    }
}
