//! Host-facing facade over configuration, clock and geometry.
//!
//! [`LoadingView`] is what a host toolkit embeds. It owns the ball and
//! timing configuration (in dp), the [`TraversalClock`] and the display
//! density, and exposes the lifecycle hooks a widget receives: attach,
//! detach, measure and frame. It never draws; [`LoadingView::frame`]
//! returns a descriptor that a [`RenderAdapter`](crate::render::RenderAdapter)
//! paints.
//!
//! Every mutator sanitizes its input and records what the host has to do
//! next as an [`Invalidation`], drained with
//! [`LoadingView::take_invalidation`].

mod invalidation;

use std::time::Duration;

use glam::Vec2;
pub use invalidation::Invalidation;
use web_time::Instant;

use crate::animation::{AnimationState, ClockState, TraversalClock};
use crate::color::Color;
use crate::geometry::{compute_frame, Direction};
use crate::options::{BallConfig, Options, TimingConfig};
use crate::render::FrameDescriptor;
use crate::sizing::{self, MeasureSpec};
use crate::util::density::Density;

/// The two-ball loading animation as a host widget.
#[derive(Debug, Clone)]
pub struct LoadingView {
    balls: BallConfig,
    timing: TimingConfig,
    clock: TraversalClock,
    density: Density,
    invalidation: Invalidation,
    attached: bool,
}

impl Default for LoadingView {
    fn default() -> Self {
        Self::new(BallConfig::default(), TimingConfig::default())
    }
}

impl LoadingView {
    /// View with the given configuration at unit density. Invalid values
    /// are replaced by their defaults.
    #[must_use]
    pub fn new(balls: BallConfig, timing: TimingConfig) -> Self {
        let balls = balls.sanitized();
        let timing = timing.sanitized();
        let clock = TraversalClock::new(&timing);
        Self {
            balls,
            timing,
            clock,
            density: Density::UNIT,
            invalidation: Invalidation::Layout,
            attached: false,
        }
    }

    /// View configured from loaded [`Options`], honouring a density
    /// override when one is set.
    #[must_use]
    pub fn with_options(options: &Options) -> Self {
        let mut view = Self::new(options.ball_config(), options.timing_config());
        if let Some(density) = options.viewer.density {
            view.set_density(Density::new(density));
        }
        view
    }

    // -- Animation control ------------------------------------------------

    /// Start (or restart) the animation.
    ///
    /// Takes effect on the next [`on_frame`](Self::on_frame), so calling it
    /// before the first layout is safe. Each start reverses the direction
    /// of the previous run.
    pub fn start(&mut self) {
        self.clock.start();
        self.invalidate(Invalidation::Redraw);
    }

    /// Stop the animation. The balls stay where they are.
    pub fn stop(&mut self) {
        self.clock.stop();
        self.invalidate(Invalidation::Redraw);
    }

    // -- Mutators ---------------------------------------------------------

    /// Set both rest radii and the gap, in dp. Stops the animation.
    pub fn set_radius(&mut self, radius1: f32, radius2: f32, gap: f32) {
        self.stop();
        self.balls = BallConfig {
            radius1,
            radius2,
            gap,
            ..self.balls.clone()
        }
        .sanitized();
        self.invalidate(Invalidation::Layout);
    }

    /// Set the two ball colors and the overlap color.
    pub fn set_colors(&mut self, color1: Color, color2: Color, mix: Color) {
        self.balls.color1 = color1;
        self.balls.color2 = color2;
        self.balls.mix_color = mix;
        self.invalidate(Invalidation::Redraw);
    }

    /// Set traversal and pause durations. Stops the animation and
    /// re-derives its pacing.
    pub fn set_duration(&mut self, duration: Duration, pause: Duration) {
        self.stop();
        self.timing = self
            .timing
            .clone()
            .with_durations(duration, pause)
            .sanitized();
        self.clock.set_timing(&self.timing);
        self.invalidate(Invalidation::Redraw);
    }

    /// Set the scales reached by the left-to-right and right-to-left
    /// balls. Stops the animation.
    pub fn set_scales(&mut self, ltr_scale: f32, rtl_scale: f32) {
        self.stop();
        self.balls = BallConfig {
            ltr_scale,
            rtl_scale,
            ..self.balls.clone()
        }
        .sanitized();
        self.invalidate(Invalidation::Layout);
    }

    /// Set where the scale-up ramp ends and the scale-down ramp begins.
    pub fn set_start_end_fraction(&mut self, start: f32, end: f32) {
        self.timing = TimingConfig {
            scale_start_fraction: start,
            scale_end_fraction: end,
            ..self.timing.clone()
        }
        .sanitized();
        self.invalidate(Invalidation::Redraw);
    }

    /// Set the pixels-per-dp factor used for measurement and geometry.
    pub fn set_density(&mut self, density: Density) {
        if density != self.density {
            self.density = density;
            self.invalidate(Invalidation::Layout);
        }
    }

    // -- Accessors --------------------------------------------------------

    /// Rest radius of ball 1, in dp.
    #[must_use]
    pub fn radius1(&self) -> f32 {
        self.balls.radius1
    }

    /// Rest radius of ball 2, in dp.
    #[must_use]
    pub fn radius2(&self) -> f32 {
        self.balls.radius2
    }

    /// Gap between the balls at rest, in dp.
    #[must_use]
    pub fn gap(&self) -> f32 {
        self.balls.gap
    }

    /// Scale reached by the left-to-right ball.
    #[must_use]
    pub fn ltr_scale(&self) -> f32 {
        self.balls.ltr_scale
    }

    /// Scale reached by the right-to-left ball.
    #[must_use]
    pub fn rtl_scale(&self) -> f32 {
        self.balls.rtl_scale
    }

    /// Color of ball 1.
    #[must_use]
    pub fn color1(&self) -> Color {
        self.balls.color1
    }

    /// Color of ball 2.
    #[must_use]
    pub fn color2(&self) -> Color {
        self.balls.color2
    }

    /// Color of the overlap.
    #[must_use]
    pub fn mix_color(&self) -> Color {
        self.balls.mix_color
    }

    /// One traversal.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.timing.duration()
    }

    /// Rest between traversals.
    #[must_use]
    pub fn pause_duration(&self) -> Duration {
        self.timing.pause_duration()
    }

    /// End of the scale-up ramp.
    #[must_use]
    pub fn scale_start_fraction(&self) -> f32 {
        self.timing.scale_start_fraction
    }

    /// Start of the scale-down ramp.
    #[must_use]
    pub fn scale_end_fraction(&self) -> f32 {
        self.timing.scale_end_fraction
    }

    /// Current ball configuration, in dp.
    #[must_use]
    pub fn balls(&self) -> &BallConfig {
        &self.balls
    }

    /// Current timing configuration.
    #[must_use]
    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Pixels per dp.
    #[must_use]
    pub fn density(&self) -> Density {
        self.density
    }

    /// Coarse clock phase.
    #[must_use]
    pub fn state(&self) -> ClockState {
        self.clock.state()
    }

    /// Whether the animation is running (or resting between traversals).
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Progress, direction and run flags at the last frame.
    #[must_use]
    pub fn snapshot(&self) -> AnimationState {
        self.clock.snapshot()
    }

    /// Direction of the current (or last) traversal.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.clock.direction()
    }

    /// Whether the view is attached to a host.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    // -- Host hooks -------------------------------------------------------

    /// The view was added to a host.
    pub fn on_attach(&mut self) {
        self.attached = true;
    }

    /// The view was removed from its host; the animation stops.
    pub fn on_detach(&mut self) {
        self.attached = false;
        self.stop();
    }

    /// Resolve the view size in pixels for the host's constraints.
    #[must_use]
    pub fn on_measure(
        &self,
        width: MeasureSpec,
        height: MeasureSpec,
    ) -> (u32, u32) {
        sizing::measure(width, height, &self.balls, self.density)
    }

    /// Size that fits the balls at their largest, in pixels.
    #[must_use]
    pub fn preferred_size(&self) -> (u32, u32) {
        sizing::preferred_size(&self.balls, self.density)
    }

    /// Advance the animation to `now`. Returns `true` (and records a
    /// redraw) when the frame changed.
    pub fn on_frame(&mut self, now: Instant) -> bool {
        let changed = self.clock.tick(now);
        if changed {
            self.invalidate(Invalidation::Redraw);
        }
        changed
    }

    /// Geometry for the current progress on a surface of `surface` pixels.
    #[must_use]
    pub fn frame(&self, surface: Vec2) -> FrameDescriptor {
        compute_frame(
            self.clock.fraction(),
            self.clock.direction(),
            &self.balls.to_pixels(self.density),
            &self.timing,
            surface,
        )
    }

    /// Pending host work since the last call; resets to
    /// [`Invalidation::None`].
    pub fn take_invalidation(&mut self) -> Invalidation {
        std::mem::take(&mut self.invalidation)
    }

    /// Pending host work, without resetting it.
    #[must_use]
    pub fn invalidation(&self) -> Invalidation {
        self.invalidation
    }

    fn invalidate(&mut self, level: Invalidation) {
        self.invalidation = self.invalidation.max(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Ball;
    use crate::options::{DEFAULT_GAP, DEFAULT_RADIUS};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn running_view(t0: Instant) -> LoadingView {
        let mut view = LoadingView::default();
        view.start();
        assert!(view.on_frame(t0));
        view
    }

    #[test]
    fn new_view_needs_layout() {
        let mut view = LoadingView::default();
        assert_eq!(view.take_invalidation(), Invalidation::Layout);
        assert_eq!(view.take_invalidation(), Invalidation::None);
        assert_eq!(view.state(), ClockState::Idle);
    }

    #[test]
    fn defaults_are_exposed() {
        let view = LoadingView::default();
        assert_eq!(view.radius1(), 6.0);
        assert_eq!(view.radius2(), 6.0);
        assert_eq!(view.gap(), 0.8);
        assert_eq!(view.ltr_scale(), 1.3);
        assert_eq!(view.rtl_scale(), 0.7);
        assert_eq!(view.duration(), ms(350));
        assert_eq!(view.pause_duration(), ms(80));
        assert_eq!(view.scale_start_fraction(), 0.2);
        assert_eq!(view.scale_end_fraction(), 0.8);
        assert_eq!(view.color1(), Color(0xFFFF_4040));
        assert_eq!(view.color2(), Color(0xFF00_EEEE));
        assert_eq!(view.mix_color(), Color::BLACK);
    }

    #[test]
    fn start_is_applied_on_next_frame() {
        let t0 = Instant::now();
        let mut view = LoadingView::default();
        view.start();
        assert!(!view.is_running());
        assert!(view.on_frame(t0));
        assert!(view.is_running());
        assert_eq!(view.direction(), Direction::Ltr);
        assert!(view.take_invalidation().needs_redraw());
    }

    #[test]
    fn frames_request_redraws_while_running() {
        let t0 = Instant::now();
        let mut view = running_view(t0);
        let _ = view.take_invalidation();
        assert!(view.on_frame(t0 + ms(100)));
        assert_eq!(view.take_invalidation(), Invalidation::Redraw);
    }

    #[test]
    fn idle_frames_request_nothing() {
        let mut view = LoadingView::default();
        let _ = view.take_invalidation();
        assert!(!view.on_frame(Instant::now()));
        assert_eq!(view.take_invalidation(), Invalidation::None);
    }

    #[test]
    fn zero_radius_is_sanitized_to_default() {
        let mut view = LoadingView::default();
        view.set_radius(0.0, 4.0, 2.0);
        assert_eq!(view.radius1(), DEFAULT_RADIUS);
        assert_eq!(view.radius2(), 4.0);
        assert_eq!(view.gap(), 2.0);

        view.set_radius(5.0, 5.0, -1.0);
        assert_eq!(view.gap(), DEFAULT_GAP);
    }

    #[test]
    fn size_setters_stop_and_request_layout() {
        let t0 = Instant::now();
        let mut view = running_view(t0);
        let _ = view.take_invalidation();
        view.set_radius(8.0, 8.0, 1.0);
        assert_eq!(view.state(), ClockState::Cancelled);
        assert_eq!(view.take_invalidation(), Invalidation::Layout);

        let mut view = running_view(t0);
        let _ = view.take_invalidation();
        view.set_scales(1.5, 0.5);
        assert_eq!(view.ltr_scale(), 1.5);
        assert_eq!(view.rtl_scale(), 0.5);
        assert!(!view.is_running());
        assert_eq!(view.take_invalidation(), Invalidation::Layout);
    }

    #[test]
    fn colors_set_mix_independently() {
        let mut view = LoadingView::default();
        let _ = view.take_invalidation();
        let mix = Color::from_rgb(0x12, 0x34, 0x56);
        view.set_colors(Color::WHITE, Color::BLACK, mix);
        assert_eq!(view.color1(), Color::WHITE);
        assert_eq!(view.color2(), Color::BLACK);
        assert_eq!(view.mix_color(), mix);
        assert_eq!(view.take_invalidation(), Invalidation::Redraw);
    }

    #[test]
    fn colors_do_not_stop_the_animation() {
        let t0 = Instant::now();
        let mut view = running_view(t0);
        view.set_colors(Color::WHITE, Color::WHITE, Color::WHITE);
        assert!(view.is_running());
    }

    #[test]
    fn set_duration_stops_and_rebuilds_pacing() {
        let t0 = Instant::now();
        let mut view = running_view(t0);
        view.set_duration(ms(200), Duration::ZERO);
        assert_eq!(view.state(), ClockState::Cancelled);
        assert_eq!(view.duration(), ms(200));
        assert_eq!(view.pause_duration(), Duration::ZERO);

        // Linear pacing without a pause
        let t1 = t0 + ms(1000);
        view.start();
        assert!(view.on_frame(t1));
        assert!(view.on_frame(t1 + ms(50)));
        assert!((view.snapshot().fraction - 0.25).abs() < 1e-4);
    }

    #[test]
    fn bad_fractions_fall_back_to_defaults() {
        let mut view = LoadingView::default();
        view.set_start_end_fraction(0.1, 0.9);
        assert_eq!(view.scale_start_fraction(), 0.1);
        assert_eq!(view.scale_end_fraction(), 0.9);

        view.set_start_end_fraction(0.7, 0.2);
        assert_eq!(view.scale_start_fraction(), 0.2);
        assert_eq!(view.scale_end_fraction(), 0.8);
    }

    #[test]
    fn detach_stops() {
        let t0 = Instant::now();
        let mut view = running_view(t0);
        view.on_attach();
        assert!(view.is_attached());
        view.on_detach();
        assert!(!view.is_attached());
        assert_eq!(view.state(), ClockState::Cancelled);
        assert!(!view.on_frame(t0 + ms(500)));
    }

    #[test]
    fn measure_uses_density() {
        let mut view = LoadingView::default();
        view.set_radius(6.0, 4.0, 1.0);
        view.set_scales(1.5, 0.5);
        assert_eq!(
            view.on_measure(MeasureSpec::Unspecified, MeasureSpec::AtMost(1)),
            (32, 19)
        );
        view.set_density(Density::new(2.0));
        assert_eq!(view.preferred_size(), (64, 38));
        assert_eq!(
            view.on_measure(MeasureSpec::Exactly(100), MeasureSpec::Exactly(50)),
            (100, 50)
        );
    }

    #[test]
    fn frame_is_in_pixels() {
        let mut view = LoadingView::default();
        view.set_density(Density::new(2.0));
        let frame = view.frame(Vec2::new(100.0, 50.0));
        // At rest ball one is on the left, unscaled
        let (one, two) = if frame.ltr.ball == Ball::One {
            (frame.ltr, frame.rtl)
        } else {
            (frame.rtl, frame.ltr)
        };
        assert!(one.circle.center.x < two.circle.center.x);
        assert!((one.circle.radius - 12.0).abs() < 1e-5);
        let apart = two.circle.center.x - one.circle.center.x;
        assert!((apart - 25.6).abs() < 1e-4);
        assert!((one.circle.center.y - 25.0).abs() < 1e-5);
    }

    #[test]
    fn with_options_applies_density_override() {
        let mut options = Options::default();
        options.viewer.density = Some(3.0);
        options.balls.radius1 = 0.0;
        let view = LoadingView::with_options(&options);
        assert_eq!(view.density(), Density::new(3.0));
        assert_eq!(view.radius1(), DEFAULT_RADIUS);
    }
}
