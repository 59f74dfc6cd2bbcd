use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default length of one traversal, in milliseconds.
pub const DEFAULT_DURATION_MS: u64 = 350;
/// Default rest between traversals, in milliseconds.
pub const DEFAULT_PAUSE_DURATION_MS: u64 = 80;
/// Default progress at which the balls reach their target scale.
pub const DEFAULT_SCALE_START_FRACTION: f32 = 0.2;
/// Default progress at which the balls start shrinking back.
pub const DEFAULT_SCALE_END_FRACTION: f32 = 0.8;

/// Pacing of one traversal and of the scale ramps inside it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Timing", inline)]
#[serde(default)]
pub struct TimingConfig {
    /// Time for one ball to travel from one rest point to the other.
    #[schemars(title = "Duration (ms)", range(min = 50, max = 3000), extend("step" = 10))]
    pub duration_ms: u64,
    /// Rest between traversals; 0 repeats seamlessly with linear pacing.
    #[schemars(title = "Pause (ms)", range(min = 0, max = 2000), extend("step" = 10))]
    pub pause_duration_ms: u64,
    /// Progress in `[0, 0.5]` at which the scale-up ramp ends.
    #[schemars(title = "Scale Start", range(min = 0.0, max = 0.5), extend("step" = 0.01))]
    pub scale_start_fraction: f32,
    /// Progress in `[0.5, 1]` at which the scale-down ramp begins.
    #[schemars(title = "Scale End", range(min = 0.5, max = 1.0), extend("step" = 0.01))]
    pub scale_end_fraction: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            pause_duration_ms: DEFAULT_PAUSE_DURATION_MS,
            scale_start_fraction: DEFAULT_SCALE_START_FRACTION,
            scale_end_fraction: DEFAULT_SCALE_END_FRACTION,
        }
    }
}

impl TimingConfig {
    /// Build from [`Duration`]s, truncating to whole milliseconds.
    #[must_use]
    pub fn with_durations(
        mut self,
        duration: Duration,
        pause: Duration,
    ) -> Self {
        self.duration_ms = duration_to_ms(duration);
        self.pause_duration_ms = duration_to_ms(pause);
        self
    }

    /// One traversal.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Rest between traversals.
    #[must_use]
    pub fn pause_duration(&self) -> Duration {
        Duration::from_millis(self.pause_duration_ms)
    }

    /// Whether traversals are separated by a rest period.
    #[must_use]
    pub fn has_pause(&self) -> bool {
        self.pause_duration_ms > 0
    }

    /// Replace out-of-range scale fractions with their defaults.
    ///
    /// The start fraction must lie in `[0, 0.5]` and the end fraction in
    /// `[0.5, 1]`, so the ramps never cross.
    pub fn sanitize(&mut self) {
        if !(0.0..=0.5).contains(&self.scale_start_fraction) {
            log::warn!(
                "scale_start_fraction {} outside [0, 0.5], using {}",
                self.scale_start_fraction,
                DEFAULT_SCALE_START_FRACTION
            );
            self.scale_start_fraction = DEFAULT_SCALE_START_FRACTION;
        }
        if !(0.5..=1.0).contains(&self.scale_end_fraction) {
            log::warn!(
                "scale_end_fraction {} outside [0.5, 1], using {}",
                self.scale_end_fraction,
                DEFAULT_SCALE_END_FRACTION
            );
            self.scale_end_fraction = DEFAULT_SCALE_END_FRACTION;
        }
    }

    /// Builder-style [`sanitize`](Self::sanitize).
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.sanitize();
        self
    }
}

fn duration_to_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let t = TimingConfig::default();
        assert_eq!(t.duration(), Duration::from_millis(350));
        assert_eq!(t.pause_duration(), Duration::from_millis(80));
        assert!(t.has_pause());
        assert_eq!(t.clone().sanitized(), t);
    }

    #[test]
    fn out_of_range_fractions_fall_back() {
        let t = TimingConfig {
            scale_start_fraction: 0.6,
            scale_end_fraction: 0.4,
            ..TimingConfig::default()
        }
        .sanitized();
        assert_eq!(t.scale_start_fraction, DEFAULT_SCALE_START_FRACTION);
        assert_eq!(t.scale_end_fraction, DEFAULT_SCALE_END_FRACTION);

        let t = TimingConfig {
            scale_start_fraction: -0.1,
            scale_end_fraction: f32::NAN,
            ..TimingConfig::default()
        }
        .sanitized();
        assert_eq!(t.scale_start_fraction, DEFAULT_SCALE_START_FRACTION);
        assert_eq!(t.scale_end_fraction, DEFAULT_SCALE_END_FRACTION);
    }

    #[test]
    fn boundary_fractions_are_kept() {
        let t = TimingConfig {
            scale_start_fraction: 0.0,
            scale_end_fraction: 1.0,
            ..TimingConfig::default()
        }
        .sanitized();
        assert_eq!(t.scale_start_fraction, 0.0);
        assert_eq!(t.scale_end_fraction, 1.0);

        let t = TimingConfig {
            scale_start_fraction: 0.5,
            scale_end_fraction: 0.5,
            ..TimingConfig::default()
        }
        .sanitized();
        assert_eq!(t.scale_start_fraction, 0.5);
        assert_eq!(t.scale_end_fraction, 0.5);
    }

    #[test]
    fn durations_truncate_to_millis() {
        let t = TimingConfig::default().with_durations(
            Duration::from_micros(500_900),
            Duration::ZERO,
        );
        assert_eq!(t.duration_ms, 500);
        assert_eq!(t.pause_duration_ms, 0);
        assert!(!t.has_pause());
    }
}
