//! Per-frame hand tracking: smoothing, classification and hysteresis.

use crate::config::GestureConfig;
use crate::gesture::{Gesture, GestureStabilizer, HandPose};
use crate::landmarks::HandLandmarks;
use crate::smoothing::LandmarkSmoother;
use kurbo::Point;

/// What the tracker saw in one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HandReading {
    /// Stable gesture after hysteresis.
    pub gesture: Gesture,
    /// Raw classification of this frame.
    pub raw: Gesture,
    /// Smoothed index fingertip in normalized coordinates.
    pub cursor: Option<Point>,
    /// Smoothed wrist in normalized coordinates.
    pub hand_position: Option<Point>,
    pub pose: Option<HandPose>,
    /// Smoothed landmark set.
    pub landmarks: Option<HandLandmarks>,
}

impl HandReading {
    pub fn has_hand(&self) -> bool {
        self.landmarks.is_some()
    }

    pub fn pinch_distance(&self) -> Option<f64> {
        self.pose.map(|pose| pose.pinch_distance)
    }

    pub fn label(&self) -> &'static str {
        self.gesture.label()
    }
}

/// Turns landmark sets into stable gestures.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    config: GestureConfig,
    smoother: LandmarkSmoother,
    stabilizer: GestureStabilizer,
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureTracker {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            smoother: LandmarkSmoother::new(config.smoothing_alpha),
            stabilizer: GestureStabilizer::new(&config),
            config,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn stable(&self) -> Gesture {
        self.stabilizer.stable()
    }

    /// Process one frame. `None` means no hand was detected.
    pub fn update(&mut self, hand: Option<&HandLandmarks>) -> HandReading {
        let Some(hand) = hand else {
            return HandReading {
                gesture: self.stabilizer.lose_tracking(),
                ..HandReading::default()
            };
        };

        let smoothed = *self.smoother.smooth(hand);
        let pose = HandPose::measure(&smoothed, &self.config);
        let raw = pose.classify(&self.config);
        let gesture = self.stabilizer.update(raw);

        HandReading {
            gesture,
            raw,
            cursor: Some(smoothed.index_tip().to_point()),
            hand_position: Some(smoothed.wrist().to_point()),
            pose: Some(pose),
            landmarks: Some(smoothed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::fixtures;

    #[test]
    fn test_needs_two_frames_to_point() {
        let mut tracker = GestureTracker::default();
        let hand = fixtures::pointing();

        let first = tracker.update(Some(&hand));
        assert_eq!(first.raw, Gesture::Point);
        assert_eq!(first.gesture, Gesture::None);

        let second = tracker.update(Some(&hand));
        assert_eq!(second.gesture, Gesture::Point);
        assert_eq!(second.label(), "Drawing");
        assert_eq!(second.cursor, Some(hand.index_tip().to_point()));
    }

    #[test]
    fn test_lost_hand_reads_none() {
        let mut tracker = GestureTracker::default();
        let hand = fixtures::fist();
        tracker.update(Some(&hand));
        tracker.update(Some(&hand));
        assert_eq!(tracker.stable(), Gesture::Fist);

        let reading = tracker.update(None);
        assert_eq!(reading.gesture, Gesture::None);
        assert!(!reading.has_hand());
        assert_eq!(reading.cursor, None);
        assert_eq!(reading.label(), "No Hand");
    }

    #[test]
    fn test_reacquired_hand_blends_with_last_smoothed() {
        let mut tracker = GestureTracker::default();
        let before = fixtures::with_index_tip_at(fixtures::pointing(), 0.2, 0.4);
        let after = fixtures::with_index_tip_at(fixtures::pointing(), 0.7, 0.4);
        tracker.update(Some(&before));
        tracker.update(Some(&before));

        assert_eq!(tracker.update(None).cursor, None);

        let cursor = tracker.update(Some(&after)).cursor.unwrap();
        // 0.2 + (0.7 - 0.2) * 0.6, not 0.7
        assert!((cursor.x - 0.5).abs() < 1e-9);
        assert!((cursor.y - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_cursor_is_smoothed() {
        let mut tracker = GestureTracker::default();
        let start = fixtures::with_index_tip_at(fixtures::pointing(), 0.2, 0.4);
        let moved = fixtures::with_index_tip_at(fixtures::pointing(), 0.7, 0.4);
        tracker.update(Some(&start));
        let reading = tracker.update(Some(&moved));
        let cursor = reading.cursor.unwrap();
        // 0.2 + (0.7 - 0.2) * 0.6
        assert!((cursor.x - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_reading_reports_pinch_distance() {
        let mut tracker = GestureTracker::default();
        let reading = tracker.update(Some(&fixtures::open_palm()));
        assert!(reading.pinch_distance().unwrap() > 0.05);
        assert_eq!(reading.raw, Gesture::Palm);
        assert!(reading.hand_position.is_some());
    }
}
