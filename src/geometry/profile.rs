//! Piecewise-linear radius profile over one traversal.

/// Scale factor applied to a ball's rest radius at `fraction`.
///
/// The profile ramps linearly from 1 to `target_scale` over
/// `[0, scale_start]`, holds `target_scale` until `scale_end`, then ramps back
/// to 1 over `[scale_end, 1]`. Degenerate ramps (`scale_start == 0` or
/// `scale_end == 1`) collapse to a step instead of dividing by zero.
#[inline]
#[must_use]
pub fn scale_at(
    fraction: f32,
    target_scale: f32,
    scale_start: f32,
    scale_end: f32,
) -> f32 {
    let ramp = if fraction <= scale_start {
        if scale_start > 0.0 {
            fraction / scale_start
        } else {
            0.0
        }
    } else if fraction >= scale_end {
        if scale_end < 1.0 {
            (fraction - 1.0) / (scale_end - 1.0)
        } else {
            0.0
        }
    } else {
        1.0
    };
    1.0 + (target_scale - 1.0) * ramp
}

/// Radius of a ball with rest radius `initial` at `fraction`.
#[inline]
#[must_use]
pub fn radius_at(
    initial: f32,
    fraction: f32,
    target_scale: f32,
    scale_start: f32,
    scale_end: f32,
) -> f32 {
    initial * scale_at(fraction, target_scale, scale_start, scale_end)
}
