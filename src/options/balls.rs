use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::util::density::Density;

/// Default ball radius in dp.
pub const DEFAULT_RADIUS: f32 = 6.0;
/// Default gap between the balls at rest, in dp.
pub const DEFAULT_GAP: f32 = 0.8;
/// Default scale reached by the ball moving right-to-left.
pub const DEFAULT_RTL_SCALE: f32 = 0.7;
/// Default scale reached by the ball moving left-to-right.
pub const DEFAULT_LTR_SCALE: f32 = 1.3;
/// Default color of the ball that starts on the left (warm red).
pub const DEFAULT_COLOR1: Color = Color(0xFFFF_4040);
/// Default color of the ball that starts on the right (cool cyan).
pub const DEFAULT_COLOR2: Color = Color(0xFF00_EEEE);
/// Default color of the overlap region.
pub const DEFAULT_MIX_COLOR: Color = Color::BLACK;

/// Size, scale and color of the two balls.
///
/// Lengths are in density-independent units (dp). Ball 1 is the one that
/// starts on the left, ball 2 the one that starts on the right.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Balls", inline)]
#[serde(default)]
pub struct BallConfig {
    /// Rest radius of ball 1.
    #[schemars(title = "Radius 1", range(min = 1.0, max = 64.0), extend("step" = 0.5))]
    pub radius1: f32,
    /// Rest radius of ball 2.
    #[schemars(title = "Radius 2", range(min = 1.0, max = 64.0), extend("step" = 0.5))]
    pub radius2: f32,
    /// Edge-to-edge gap between the balls at rest.
    #[schemars(title = "Gap", range(min = 0.0, max = 32.0), extend("step" = 0.1))]
    pub gap: f32,
    /// Scale reached by whichever ball is moving right-to-left.
    #[schemars(title = "RTL Scale", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub rtl_scale: f32,
    /// Scale reached by whichever ball is moving left-to-right.
    #[schemars(title = "LTR Scale", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub ltr_scale: f32,
    /// Fill color of ball 1.
    #[schemars(title = "Color 1", with = "String")]
    pub color1: Color,
    /// Fill color of ball 2.
    #[schemars(title = "Color 2", with = "String")]
    pub color2: Color,
    /// Fill color of the region where the balls overlap.
    #[schemars(title = "Mix Color", with = "String")]
    pub mix_color: Color,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            radius1: DEFAULT_RADIUS,
            radius2: DEFAULT_RADIUS,
            gap: DEFAULT_GAP,
            rtl_scale: DEFAULT_RTL_SCALE,
            ltr_scale: DEFAULT_LTR_SCALE,
            color1: DEFAULT_COLOR1,
            color2: DEFAULT_COLOR2,
            mix_color: DEFAULT_MIX_COLOR,
        }
    }
}

impl BallConfig {
    /// Replace invalid values with their defaults.
    ///
    /// Radii must be positive, the gap and both scales non-negative. NaN and
    /// infinities count as invalid.
    pub fn sanitize(&mut self) {
        self.radius1 = positive_or(self.radius1, DEFAULT_RADIUS, "radius1");
        self.radius2 = positive_or(self.radius2, DEFAULT_RADIUS, "radius2");
        self.gap = non_negative_or(self.gap, DEFAULT_GAP, "gap");
        self.rtl_scale =
            non_negative_or(self.rtl_scale, DEFAULT_RTL_SCALE, "rtl_scale");
        self.ltr_scale =
            non_negative_or(self.ltr_scale, DEFAULT_LTR_SCALE, "ltr_scale");
    }

    /// Builder-style [`sanitize`](Self::sanitize).
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.sanitize();
        self
    }

    /// Center-to-center separation at rest, which is also how far each ball
    /// travels in one traversal.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.gap + self.radius1 + self.radius2
    }

    /// Largest scale either ball reaches, never below 1.
    #[must_use]
    pub fn max_scale(&self) -> f32 {
        self.rtl_scale.max(self.ltr_scale).max(1.0)
    }

    /// The same configuration with lengths converted from dp to pixels.
    #[must_use]
    pub fn to_pixels(&self, density: Density) -> Self {
        Self {
            radius1: density.dp_to_px(self.radius1),
            radius2: density.dp_to_px(self.radius2),
            gap: density.dp_to_px(self.gap),
            ..self.clone()
        }
    }
}

fn positive_or(value: f32, default: f32, field: &str) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        log::warn!("{field} must be positive (got {value}), using {default}");
        default
    }
}

fn non_negative_or(value: f32, default: f32, field: &str) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        log::warn!(
            "{field} must be non-negative (got {value}), using {default}"
        );
        default
    }
}
