//! Gesture classification and stability gating.

use crate::config::GestureConfig;
use crate::landmarks::{
    HandLandmarks, INDEX_MCP, INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP, PINKY_TIP,
    RING_PIP, RING_TIP, THUMB_TIP,
};
use serde::{Deserialize, Serialize};

/// Discrete hand gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gesture {
    /// No hand in view.
    #[default]
    None,
    /// Index finger up: draw.
    Point,
    /// Index and middle up.
    Peace,
    /// Thumb and index tips touching.
    Pinch,
    /// All fingers curled.
    Fist,
    /// Open hand, or anything ambiguous: stop.
    Palm,
}

impl Gesture {
    /// Human readable status label.
    pub fn label(self) -> &'static str {
        match self {
            Gesture::None => "No Hand",
            Gesture::Point => "Drawing",
            Gesture::Peace => "Rotating",
            Gesture::Pinch => "Zooming",
            Gesture::Fist => "Moving",
            Gesture::Palm => "Stopped",
        }
    }

    pub fn is_point(self) -> bool {
        self == Gesture::Point
    }
}

/// Finger geometry extracted from one landmark set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandPose {
    /// Extension of index, middle, ring and pinky, in that order.
    pub fingers: [bool; 4],
    pub thumb_extended: bool,
    /// 3-D distance between thumb tip and index tip.
    pub pinch_distance: f64,
}

impl HandPose {
    /// Measure finger extension and pinch distance.
    pub fn measure(hand: &HandLandmarks, config: &GestureConfig) -> Self {
        // Image y grows downward, so an extended tip sits above its PIP joint.
        let extended = |tip: usize, pip: usize| hand[tip].y < hand[pip].y;
        Self {
            fingers: [
                extended(INDEX_TIP, INDEX_PIP),
                extended(MIDDLE_TIP, MIDDLE_PIP),
                extended(RING_TIP, RING_PIP),
                extended(PINKY_TIP, PINKY_PIP),
            ],
            thumb_extended: (hand[THUMB_TIP].x - hand[INDEX_MCP].x).abs()
                > config.thumb_extension_threshold,
            pinch_distance: hand.thumb_tip().distance(hand.index_tip()),
        }
    }

    pub fn extended_count(&self) -> usize {
        self.fingers.iter().filter(|&&f| f).count()
    }

    /// Apply the priority-ordered rules. The first match wins.
    pub fn classify(&self, config: &GestureConfig) -> Gesture {
        let [index, middle, ring, pinky] = self.fingers;

        if self.pinch_distance < config.pinch_threshold {
            return Gesture::Pinch;
        }
        if self.extended_count() >= 4 && self.thumb_extended {
            return Gesture::Palm;
        }
        if self.extended_count() == 0 {
            return Gesture::Fist;
        }
        match (index, middle, ring, pinky) {
            (true, true, false, false) => Gesture::Peace,
            (true, false, false, false) => Gesture::Point,
            _ => Gesture::Palm,
        }
    }
}

/// Classify a landmark set in one step.
pub fn classify(hand: &HandLandmarks, config: &GestureConfig) -> Gesture {
    HandPose::measure(hand, config).classify(config)
}

/// Hysteresis gate turning per-frame classifications into a stable gesture.
///
/// Entering a gesture needs `entry_threshold` identical frames in a row.
/// Leaving a stable [`Gesture::Point`] needs `exit_point_threshold` so a
/// stroke in progress is not broken by a single misread frame.
#[derive(Debug, Clone)]
pub struct GestureStabilizer {
    raw: Gesture,
    stable_count: u32,
    stable: Gesture,
    entry_threshold: u32,
    exit_point_threshold: u32,
}

impl Default for GestureStabilizer {
    fn default() -> Self {
        Self::new(&GestureConfig::default())
    }
}

impl GestureStabilizer {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            raw: Gesture::None,
            stable_count: 0,
            stable: Gesture::None,
            entry_threshold: config.entry_threshold.max(1),
            exit_point_threshold: config.exit_point_threshold.max(1),
        }
    }

    /// The committed gesture.
    pub fn stable(&self) -> Gesture {
        self.stable
    }

    /// The most recent raw classification.
    pub fn raw(&self) -> Gesture {
        self.raw
    }

    /// Length of the current run of identical raw classifications.
    pub fn stable_count(&self) -> u32 {
        self.stable_count
    }

    /// Feed one raw classification and return the stable gesture.
    pub fn update(&mut self, raw: Gesture) -> Gesture {
        if raw == self.raw {
            self.stable_count = self.stable_count.saturating_add(1);
        } else {
            self.raw = raw;
            self.stable_count = 1;
        }

        let threshold = if self.stable.is_point() && !raw.is_point() {
            self.exit_point_threshold
        } else {
            self.entry_threshold
        };

        if self.stable_count >= threshold && self.stable != raw {
            log::debug!(
                "Gesture {:?} -> {:?} after {} frames",
                self.stable,
                raw,
                self.stable_count
            );
            self.stable = raw;
        }
        self.stable
    }

    /// Tracking was lost: drop to [`Gesture::None`] immediately.
    pub fn lose_tracking(&mut self) -> Gesture {
        if self.stable != Gesture::None {
            log::debug!("Tracking lost while {:?}", self.stable);
        }
        self.raw = Gesture::None;
        self.stable_count = 0;
        self.stable = Gesture::None;
        self.stable
    }
}
