//! Density-independent length units.

/// Pixels per density-independent unit (dp).
///
/// A density of 1.0 maps one dp onto one physical pixel; a 3x phone panel
/// uses 3.0. Non-finite or non-positive factors fall back to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Density(f32);

impl Density {
    /// One pixel per dp.
    pub const UNIT: Self = Self(1.0);

    /// Wrap a px-per-dp factor, sanitizing invalid values to 1.0.
    #[must_use]
    pub fn new(px_per_dp: f32) -> Self {
        if px_per_dp.is_finite() && px_per_dp > 0.0 {
            Self(px_per_dp)
        } else {
            log::warn!("invalid density {px_per_dp}, using 1.0");
            Self::UNIT
        }
    }

    /// The raw px-per-dp factor.
    #[must_use]
    pub fn factor(self) -> f32 {
        self.0
    }

    /// Convert a dp length to pixels.
    #[inline]
    #[must_use]
    pub fn dp_to_px(self, dp: f32) -> f32 {
        dp * self.0
    }

    /// Convert a pixel length to dp.
    #[inline]
    #[must_use]
    pub fn px_to_dp(self, px: f32) -> f32 {
        px / self.0
    }
}

impl Default for Density {
    fn default() -> Self {
        Self::UNIT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_both_ways() {
        let d = Density::new(2.5);
        assert_eq!(d.dp_to_px(4.0), 10.0);
        assert_eq!(d.px_to_dp(10.0), 4.0);
    }

    #[test]
    fn rejects_invalid_factors() {
        assert_eq!(Density::new(0.0), Density::UNIT);
        assert_eq!(Density::new(-3.0), Density::UNIT);
        assert_eq!(Density::new(f32::NAN), Density::UNIT);
    }
}
