//! Traversal timing: the state machine that turns wall-clock time into
//! progress and direction for the frame calculator.

mod clock;
mod state;

pub use clock::TraversalClock;
pub use state::{AnimationState, ClockState};
