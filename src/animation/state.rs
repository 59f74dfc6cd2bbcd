//! Observable clock state.

use crate::geometry::Direction;

/// Coarse phase of the traversal clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockState {
    /// Never started.
    Idle,
    /// A traversal is in progress.
    Running,
    /// Resting between traversals (only with a non-zero pause).
    Paused,
    /// Stopped by `cancel`/`stop`; stays here until the next `start`.
    Cancelled,
}

/// Snapshot of the animation at the last tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    /// Eased progress through the current traversal, in `[0, 1]`.
    pub fraction: f32,
    /// Which way ball one is travelling.
    pub direction: Direction,
    /// Whether the clock is running or resting between traversals.
    pub running: bool,
    /// Whether the last run was cancelled.
    pub cancelled: bool,
}
