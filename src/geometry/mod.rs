//! Frame geometry for the two-ball animation.
//!
//! [`compute_frame`] is a pure function of traversal progress, direction,
//! configuration and surface size. It allocates nothing and keeps no state,
//! so it can run on every redraw and as often as needed in between (e.g.
//! for measurement or hit-testing).

mod overlap;
mod profile;

use glam::Vec2;
pub use overlap::{Circle, Lens, Overlap};
pub use profile::{radius_at, scale_at};

use crate::color::Color;
use crate::options::{BallConfig, TimingConfig};

/// Physical ball identity, fixed for the lifetime of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ball {
    /// Starts on the left; drawn with `radius1` / `color1`.
    One,
    /// Starts on the right; drawn with `radius2` / `color2`.
    Two,
}

impl Ball {
    /// The other ball.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// This ball's rest radius.
    #[must_use]
    pub fn radius(self, balls: &BallConfig) -> f32 {
        match self {
            Self::One => balls.radius1,
            Self::Two => balls.radius2,
        }
    }

    /// This ball's fill color.
    #[must_use]
    pub fn color(self, balls: &BallConfig) -> Color {
        match self {
            Self::One => balls.color1,
            Self::Two => balls.color2,
        }
    }
}

/// Which way ball one is travelling during the current traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Ball one moves left-to-right, ball two right-to-left.
    #[default]
    Ltr,
    /// Ball two moves left-to-right, ball one right-to-left.
    Rtl,
}

impl Direction {
    /// The opposite direction.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Ltr => Self::Rtl,
            Self::Rtl => Self::Ltr,
        }
    }

    /// The ball playing the left-to-right role.
    #[must_use]
    pub fn ltr_ball(self) -> Ball {
        match self {
            Self::Ltr => Ball::One,
            Self::Rtl => Ball::Two,
        }
    }

    /// The ball playing the right-to-left role.
    #[must_use]
    pub fn rtl_ball(self) -> Ball {
        self.ltr_ball().other()
    }
}

/// One ball as it should be painted this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallShape {
    /// Which physical ball this is.
    pub ball: Ball,
    /// Position and current (scaled) radius.
    pub circle: Circle,
    /// Fill color.
    pub color: Color,
}

/// Everything a renderer needs to paint one frame.
///
/// Paint order is `ltr`, then `rtl`, then `overlap` in `mix_color`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// The ball moving left-to-right.
    pub ltr: BallShape,
    /// The ball moving right-to-left.
    pub rtl: BallShape,
    /// Region covered by both balls.
    pub overlap: Overlap,
    /// Fill color of the overlap.
    pub mix_color: Color,
}

/// Compute ball positions, radii and overlap for one frame.
///
/// `fraction` is the (already eased) progress through the current
/// traversal in `[0, 1]`; values outside are clamped. Lengths in `balls` must
/// be in the same unit as `surface` (pixels for on-screen use).
#[must_use]
pub fn compute_frame(
    fraction: f32,
    direction: Direction,
    balls: &BallConfig,
    timing: &TimingConfig,
    surface: Vec2,
) -> Frame {
    let fraction = fraction.clamp(0.0, 1.0);
    let distance = balls.distance();
    let center = surface * 0.5;

    let ltr_x = center.x - distance / 2.0 + distance * fraction;
    let rtl_x = center.x + distance / 2.0 - distance * fraction;

    let ltr_ball = direction.ltr_ball();
    let rtl_ball = direction.rtl_ball();

    let ltr = BallShape {
        ball: ltr_ball,
        circle: Circle::new(
            Vec2::new(ltr_x, center.y),
            radius_at(
                ltr_ball.radius(balls),
                fraction,
                balls.ltr_scale,
                timing.scale_start_fraction,
                timing.scale_end_fraction,
            ),
        ),
        color: ltr_ball.color(balls),
    };
    let rtl = BallShape {
        ball: rtl_ball,
        circle: Circle::new(
            Vec2::new(rtl_x, center.y),
            radius_at(
                rtl_ball.radius(balls),
                fraction,
                balls.rtl_scale,
                timing.scale_start_fraction,
                timing.scale_end_fraction,
            ),
        ),
        color: rtl_ball.color(balls),
    };

    Frame {
        ltr,
        rtl,
        overlap: Overlap::between(ltr.circle, rtl.circle),
        mix_color: balls.mix_color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;
    const SURFACE: Vec2 = Vec2::new(40.0, 20.0);

    fn frame(fraction: f32, direction: Direction) -> Frame {
        compute_frame(
            fraction,
            direction,
            &BallConfig::default(),
            &TimingConfig::default(),
            SURFACE,
        )
    }

    #[test]
    fn same_inputs_same_frame() {
        for i in 0..=10 {
            let f = i as f32 / 10.0;
            for dir in [Direction::Ltr, Direction::Rtl] {
                assert_eq!(frame(f, dir), frame(f, dir));
            }
        }
    }

    #[test]
    fn rest_positions_are_distance_apart_and_unscaled() {
        let cfg = BallConfig::default();
        let f = frame(0.0, Direction::Ltr);
        let gap = f.rtl.circle.center.x - f.ltr.circle.center.x;
        assert!((gap - cfg.distance()).abs() < EPS);
        assert!((f.ltr.circle.radius - cfg.radius1).abs() < EPS);
        assert!((f.rtl.circle.radius - cfg.radius2).abs() < EPS);
        assert_eq!(f.ltr.circle.center.y, 10.0);
        assert_eq!(f.rtl.circle.center.y, 10.0);
    }

    #[test]
    fn full_traversal_swaps_sides() {
        let start = frame(0.0, Direction::Ltr);
        let end = frame(1.0, Direction::Ltr);
        assert!((end.ltr.circle.center.x - start.rtl.circle.center.x).abs() < EPS);
        assert!((end.rtl.circle.center.x - start.ltr.circle.center.x).abs() < EPS);
    }

    #[test]
    fn balls_meet_at_the_middle() {
        let f = frame(0.5, Direction::Ltr);
        assert!((f.ltr.circle.center.x - 20.0).abs() < EPS);
        assert!((f.rtl.circle.center.x - 20.0).abs() < EPS);
        // The smaller ball sits entirely inside the larger one
        assert_eq!(f.overlap, Overlap::Circle(f.rtl.circle));
    }

    #[test]
    fn plateau_radii() {
        let f = frame(0.5, Direction::Ltr);
        assert!((f.ltr.circle.radius - 7.8).abs() < EPS);
        assert!((f.rtl.circle.radius - 4.2).abs() < EPS);
    }

    #[test]
    fn ramp_radius() {
        let f = frame(0.1, Direction::Ltr);
        assert!((f.ltr.circle.radius - 6.9).abs() < EPS);
        assert!((f.rtl.circle.radius - 6.0 * (1.0 - 0.3 * 0.5)).abs() < EPS);
    }

    #[test]
    fn direction_swaps_roles_and_colors() {
        let cfg = BallConfig {
            radius1: 4.0,
            radius2: 8.0,
            ..BallConfig::default()
        };
        let timing = TimingConfig::default();
        let ltr = compute_frame(0.0, Direction::Ltr, &cfg, &timing, SURFACE);
        let rtl = compute_frame(0.0, Direction::Rtl, &cfg, &timing, SURFACE);

        assert_eq!(ltr.ltr.ball, Ball::One);
        assert_eq!(ltr.ltr.color, cfg.color1);
        assert_eq!(ltr.ltr.circle.radius, 4.0);

        assert_eq!(rtl.ltr.ball, Ball::Two);
        assert_eq!(rtl.ltr.color, cfg.color2);
        assert_eq!(rtl.ltr.circle.radius, 8.0);
        assert_eq!(rtl.rtl.ball, Ball::One);
    }

    #[test]
    fn overlap_empty_at_rest_and_present_mid_flight() {
        assert!(frame(0.0, Direction::Ltr).overlap.is_empty());
        let mid = frame(0.3, Direction::Ltr);
        assert!(!mid.overlap.is_empty());
        assert!(mid.overlap.area() > 0.0);
        assert_eq!(mid.mix_color, BallConfig::default().mix_color);
    }

    #[test]
    fn out_of_range_fraction_is_clamped() {
        assert_eq!(frame(-0.5, Direction::Ltr), frame(0.0, Direction::Ltr));
        assert_eq!(frame(1.5, Direction::Rtl), frame(1.0, Direction::Rtl));
    }

    #[test]
    fn direction_flip_round_trips() {
        assert_eq!(Direction::Ltr.flipped(), Direction::Rtl);
        assert_eq!(Direction::Ltr.flipped().flipped(), Direction::Ltr);
        assert_eq!(Direction::Rtl.rtl_ball(), Ball::One);
    }
}
