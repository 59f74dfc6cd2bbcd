//! Shared helpers for the animation engine.
//!
//! Easing curves for traversal pacing and density-independent unit
//! conversion.

pub mod density;
pub mod easing;
