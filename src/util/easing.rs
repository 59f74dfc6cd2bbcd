//! Easing curves for traversal pacing.
//!
//! A traversal with a rest period between sweeps is paced with an
//! accelerate/decelerate curve; a seamless repeat uses linear pacing so the
//! balls never visibly stall at the turn-around.

use std::f32::consts::PI;

/// Easing function variants for traversal progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    #[default]
    Linear,
    /// Cosine ease-in-ease-out: starts and ends slowly, fastest in the
    /// middle. Formula: cos((t + 1)·π) / 2 + 0.5
    AccelerateDecelerate,
}

impl EasingFunction {
    /// Pick the pacing curve for a given rest period between traversals.
    #[inline]
    #[must_use]
    pub fn for_pause(has_pause: bool) -> Self {
        if has_pause {
            Self::AccelerateDecelerate
        } else {
            Self::Linear
        }
    }

    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    /// Returns the eased value, also in [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::AccelerateDecelerate => {
                ((t + 1.0) * PI).cos() / 2.0 + 0.5
            }
        }
    }
}
