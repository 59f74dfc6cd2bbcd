//! Preferred bounding box for the animation.
//!
//! Used only for axes the host leaves open; an exact host size always wins.

use crate::options::BallConfig;
use crate::util::density::Density;

/// Margin added on each axis so anti-aliased edges are not clipped, in dp.
pub const EDGE_MARGIN_DP: f32 = 1.0;

/// Host constraint for one axis, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureSpec {
    /// The host dictates this size.
    Exactly(u32),
    /// The host offers up to this size.
    AtMost(u32),
    /// The host has no opinion.
    Unspecified,
}

/// Size that fits both balls at their largest on every side, in whole
/// pixels (truncated).
///
/// - width = gap + (2·radius1 + 2·radius2)·maxScale + margin
/// - height = 2·max(radius1, radius2)·maxScale + margin
#[must_use]
pub fn preferred_size(balls: &BallConfig, density: Density) -> (u32, u32) {
    let px = balls.to_pixels(density);
    let max_scale = px.max_scale();
    let margin = density.dp_to_px(EDGE_MARGIN_DP);

    let width =
        px.gap + (2.0 * px.radius1 + 2.0 * px.radius2) * max_scale + margin;
    let height = 2.0 * px.radius1.max(px.radius2) * max_scale + margin;
    (width as u32, height as u32)
}

/// Resolve the measured size for both axes.
///
/// Exact axes keep the host value; every other axis takes the preferred
/// size, so the balls are never clipped at their largest.
#[must_use]
pub fn measure(
    width: MeasureSpec,
    height: MeasureSpec,
    balls: &BallConfig,
    density: Density,
) -> (u32, u32) {
    let (preferred_w, preferred_h) = preferred_size(balls, density);
    let resolve = |spec: MeasureSpec, preferred: u32| match spec {
        MeasureSpec::Exactly(size) => size,
        MeasureSpec::AtMost(_) | MeasureSpec::Unspecified => preferred,
    };
    (resolve(width, preferred_w), resolve(height, preferred_h))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balls() -> BallConfig {
        BallConfig {
            radius1: 6.0,
            radius2: 4.0,
            gap: 1.0,
            rtl_scale: 0.5,
            ltr_scale: 1.5,
            ..BallConfig::default()
        }
    }

    #[test]
    fn preferred_fits_largest_scale() {
        // 1 + (12 + 8)·1.5 + 1 = 32, 2·6·1.5 + 1 = 19
        assert_eq!(preferred_size(&balls(), Density::UNIT), (32, 19));
    }

    #[test]
    fn preferred_scales_with_density() {
        assert_eq!(preferred_size(&balls(), Density::new(2.0)), (64, 38));
    }

    #[test]
    fn shrinking_scales_use_unit_scale() {
        let cfg = BallConfig {
            rtl_scale: 0.5,
            ltr_scale: 0.5,
            ..balls()
        };
        // 1 + 20 + 1 = 22, 12 + 1 = 13
        assert_eq!(preferred_size(&cfg, Density::UNIT), (22, 13));
    }

    #[test]
    fn exact_axes_win() {
        let size = measure(
            MeasureSpec::Exactly(200),
            MeasureSpec::AtMost(5),
            &balls(),
            Density::UNIT,
        );
        assert_eq!(size, (200, 19));

        let size = measure(
            MeasureSpec::Unspecified,
            MeasureSpec::Exactly(7),
            &balls(),
            Density::UNIT,
        );
        assert_eq!(size, (32, 7));
    }
}
