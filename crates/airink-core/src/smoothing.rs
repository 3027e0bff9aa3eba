//! Exponential smoothing of landmark sets.

use crate::landmarks::HandLandmarks;

/// Default blend factor applied to each new observation.
pub const DEFAULT_SMOOTHING_ALPHA: f64 = 0.6;

/// Per-coordinate exponential moving average over landmark sets.
///
/// The buffer survives tracking loss: when the hand reappears the first
/// frames blend against the last seen pose rather than starting over.
#[derive(Debug, Clone)]
pub struct LandmarkSmoother {
    alpha: f64,
    state: Option<HandLandmarks>,
}

impl Default for LandmarkSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING_ALPHA)
    }
}

impl LandmarkSmoother {
    /// Create a smoother. `alpha` is clamped to `[0, 1]`; 1 disables smoothing.
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            state: None,
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Whether a first observation has been seen.
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// The current smoothed set, if any.
    pub fn current(&self) -> Option<&HandLandmarks> {
        self.state.as_ref()
    }

    /// Fold a raw observation into the buffer and return the smoothed set.
    pub fn smooth(&mut self, raw: &HandLandmarks) -> &HandLandmarks {
        let alpha = self.alpha;
        let state = self.state.get_or_insert(*raw);
        for (smoothed, raw) in state.points_mut().iter_mut().zip(raw.points()) {
            smoothed.x += (raw.x - smoothed.x) * alpha;
            smoothed.y += (raw.y - smoothed.y) * alpha;
            smoothed.z += (raw.z - smoothed.z) * alpha;
        }
        state
    }
}
