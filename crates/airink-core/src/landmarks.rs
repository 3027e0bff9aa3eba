//! Hand landmark types and ingestion validation.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of landmarks reported for a single tracked hand.
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Landmark validation errors.
#[derive(Debug, Error, PartialEq)]
pub enum LandmarkError {
    #[error("Expected 21 landmarks, got {0}")]
    WrongCount(usize),
    #[error("Landmark {0} has a non-finite coordinate")]
    NonFinite(usize),
}

/// A single landmark in normalized camera coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Landmark {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// 3-D Euclidean distance to another landmark.
    pub fn distance(&self, other: &Landmark) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Project onto the image plane.
    pub fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// A validated set of exactly 21 hand landmarks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandLandmarks {
    points: [Landmark; LANDMARK_COUNT],
}

impl HandLandmarks {
    /// Build from a fixed-size array, rejecting non-finite coordinates.
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Result<Self, LandmarkError> {
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(LandmarkError::NonFinite(index));
        }
        Ok(Self { points })
    }

    /// Build from a provider slice. Anything other than 21 points is rejected.
    pub fn from_slice(points: &[Landmark]) -> Result<Self, LandmarkError> {
        let points: [Landmark; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|_| LandmarkError::WrongCount(points.len()))?;
        Self::new(points)
    }

    /// Landmark by raw index, `None` past the last point.
    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.points.get(index)
    }

    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }

    pub(crate) fn points_mut(&mut self) -> &mut [Landmark; LANDMARK_COUNT] {
        &mut self.points
    }

    pub fn wrist(&self) -> &Landmark {
        &self.points[WRIST]
    }

    pub fn index_tip(&self) -> &Landmark {
        &self.points[INDEX_TIP]
    }

    pub fn thumb_tip(&self) -> &Landmark {
        &self.points[THUMB_TIP]
    }
}

impl std::ops::Index<usize> for HandLandmarks {
    type Output = Landmark;

    fn index(&self, index: usize) -> &Landmark {
        &self.points[index]
    }
}

/// One frame delivered by the landmark provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarkFrame {
    /// Provider timestamp in milliseconds (monotonically increasing).
    pub timestamp_ms: f64,
    /// Landmarks of the tracked hand, or `None` when no hand was detected.
    #[serde(default)]
    pub landmarks: Option<Vec<Landmark>>,
}

impl LandmarkFrame {
    pub fn new(timestamp_ms: f64, landmarks: Option<Vec<Landmark>>) -> Self {
        Self {
            timestamp_ms,
            landmarks,
        }
    }

    /// A frame with no hand in view.
    pub fn empty(timestamp_ms: f64) -> Self {
        Self::new(timestamp_ms, None)
    }

    /// Validate the payload. `Ok(None)` means the provider reported no hand.
    pub fn validate(&self) -> Result<Option<HandLandmarks>, LandmarkError> {
        self.landmarks
            .as_deref()
            .map(HandLandmarks::from_slice)
            .transpose()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Synthetic hand poses shared by tests across the crate.

    use super::*;

    /// Finger tip/PIP pairs, index through pinky.
    const FINGERS: [(usize, usize); 4] = [
        (INDEX_TIP, INDEX_PIP),
        (MIDDLE_TIP, MIDDLE_PIP),
        (RING_TIP, RING_PIP),
        (PINKY_TIP, PINKY_PIP),
    ];

    /// Build a hand with the given fingers (index, middle, ring, pinky) extended.
    ///
    /// The thumb is tucked next to the index knuckle unless `thumb_out` is set,
    /// and the thumb tip is kept well away from the index tip so nothing
    /// classifies as a pinch by accident.
    pub fn hand(extended: [bool; 4], thumb_out: bool) -> HandLandmarks {
        let mut points = [Landmark::new(0.5, 0.8, 0.0); LANDMARK_COUNT];
        points[INDEX_MCP] = Landmark::new(0.45, 0.6, 0.0);
        for (i, (tip, pip)) in FINGERS.iter().enumerate() {
            let x = 0.45 + i as f64 * 0.04;
            points[*pip] = Landmark::new(x, 0.5, 0.0);
            points[*tip] = if extended[i] {
                Landmark::new(x, 0.3, 0.0)
            } else {
                Landmark::new(x, 0.55, 0.0)
            };
        }
        points[THUMB_TIP] = if thumb_out {
            Landmark::new(0.3, 0.62, 0.0)
        } else {
            Landmark::new(0.42, 0.75, 0.0)
        };
        HandLandmarks::new(points).expect("fixture is finite")
    }

    /// Move the whole hand so the index tip sits at `(x, y)`.
    pub fn with_index_tip_at(hand: HandLandmarks, x: f64, y: f64) -> HandLandmarks {
        let tip = *hand.index_tip();
        let mut moved = hand;
        for p in moved.points_mut().iter_mut() {
            p.x += x - tip.x;
            p.y += y - tip.y;
        }
        moved
    }

    pub fn pointing() -> HandLandmarks {
        hand([true, false, false, false], false)
    }

    pub fn open_palm() -> HandLandmarks {
        hand([true, true, true, true], true)
    }

    pub fn fist() -> HandLandmarks {
        hand([false, false, false, false], false)
    }

    pub fn peace() -> HandLandmarks {
        hand([true, true, false, false], false)
    }

    pub fn to_vec(hand: &HandLandmarks) -> Vec<Landmark> {
        hand.points().to_vec()
    }
}
