//! Traversal clock: the run / pause / reverse / repeat / cancel state
//! machine.
//!
//! The clock never reads the time itself. The host passes `now` into
//! [`TraversalClock::tick`] once per drawing pass, which keeps the machine
//! deterministic and lets tests drive it with synthetic instants.

use std::time::Duration;

use web_time::Instant;

use super::state::{AnimationState, ClockState};
use crate::geometry::Direction;
use crate::options::TimingConfig;
use crate::util::easing::EasingFunction;

/// Internal phase, carrying the instants each phase is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Running { started_at: Instant },
    Paused { resume_at: Instant },
    Cancelled,
}

/// Drives traversal progress over time.
///
/// Transitions:
/// - `start` records a request; the next `tick` applies it by flipping the
///   direction, resetting progress to 0 and entering `Running`.
/// - `Running` advances progress over `duration`. When a traversal
///   completes, a zero pause flips direction and keeps running (linear
///   pacing); a non-zero pause enters `Paused` (eased pacing).
/// - `Paused` waits `pause` and then flips direction and runs again.
/// - `cancel`/`stop` enter `Cancelled` from anywhere and drop any pending
///   start.
#[derive(Debug, Clone)]
pub struct TraversalClock {
    duration: Duration,
    pause: Duration,
    easing: EasingFunction,
    phase: Phase,
    fraction: f32,
    direction: Direction,
    pending_start: bool,
    traversals: u64,
}

impl TraversalClock {
    /// Idle clock paced by `timing`.
    ///
    /// The clock rests at the end of a notional right-to-left traversal:
    /// ball one sits on the left, and the first `start` sends it rightward.
    #[must_use]
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            duration: timing.duration(),
            pause: timing.pause_duration(),
            easing: EasingFunction::for_pause(timing.has_pause()),
            phase: Phase::Idle,
            fraction: 1.0,
            direction: Direction::Rtl,
            pending_start: false,
            traversals: 0,
        }
    }

    /// Re-derive duration, pause and pacing from `timing`.
    ///
    /// Any run in progress is cancelled; the new pacing applies from the
    /// next `start`.
    pub fn set_timing(&mut self, timing: &TimingConfig) {
        self.cancel();
        self.duration = timing.duration();
        self.pause = timing.pause_duration();
        self.easing = EasingFunction::for_pause(timing.has_pause());
    }

    /// Request a fresh run, effective at the next [`tick`](Self::tick).
    ///
    /// A run already in progress is cancelled first.
    pub fn start(&mut self) {
        if matches!(self.phase, Phase::Running { .. } | Phase::Paused { .. }) {
            log::debug!("start while active, cancelling current run");
            self.phase = Phase::Cancelled;
        }
        self.pending_start = true;
    }

    /// Cancel the run and any pending start.
    ///
    /// Progress and direction are kept so the next `start` continues the
    /// alternation.
    pub fn cancel(&mut self) {
        if self.phase != Phase::Cancelled || self.pending_start {
            log::debug!("clock cancelled at fraction {:.3}", self.fraction);
        }
        self.phase = Phase::Cancelled;
        self.pending_start = false;
    }

    /// Alias for [`cancel`](Self::cancel), for host teardown.
    pub fn stop(&mut self) {
        self.cancel();
    }

    /// Advance to `now`. Returns `true` when the frame needs repainting.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if self.pending_start {
            self.pending_start = false;
            self.begin_traversal(now);
            changed = true;
        }

        match self.phase {
            Phase::Idle | Phase::Cancelled => changed,
            Phase::Running { started_at } => {
                self.advance(now, started_at);
                // A late tick may land past the pause that just began
                if let Phase::Paused { resume_at } = self.phase {
                    if now >= resume_at {
                        self.resume(now, resume_at);
                    }
                }
                true
            }
            Phase::Paused { resume_at } => {
                if now < resume_at {
                    return changed;
                }
                self.resume(now, resume_at);
                true
            }
        }
    }

    /// Leave the pause that ended at `resume_at`.
    ///
    /// Whole traversal-plus-pause periods missed before `now` are skipped
    /// in one step, so the clock lands on the wall-clock position.
    fn resume(&mut self, now: Instant, resume_at: Instant) {
        let period_ns = (self.duration + self.pause).as_nanos().max(1);
        let behind_ns = now.saturating_duration_since(resume_at).as_nanos();
        let skipped = behind_ns / period_ns;
        if skipped % 2 == 1 {
            self.direction = self.direction.flipped();
        }
        self.traversals = self
            .traversals
            .saturating_add(u64::try_from(skipped).unwrap_or(u64::MAX));
        let resume_at = resume_at
            + Duration::from_nanos(
                u64::try_from(skipped * period_ns).unwrap_or(u64::MAX),
            );
        log::debug!("pause over, next traversal ({skipped} skipped)");
        self.begin_traversal(resume_at);
        self.advance(now, resume_at);
    }

    /// Flip direction and run a new traversal anchored at `at`.
    fn begin_traversal(&mut self, at: Instant) {
        self.direction = self.direction.flipped();
        self.fraction = 0.0;
        self.phase = Phase::Running { started_at: at };
        self.traversals = self.traversals.saturating_add(1);
        log::debug!(
            "traversal {} started, {:?}",
            self.traversals,
            self.direction
        );
    }

    /// Update progress for a traversal that started at `started_at`.
    fn advance(&mut self, now: Instant, started_at: Instant) {
        let elapsed = now.saturating_duration_since(started_at);

        if elapsed < self.duration {
            let raw = elapsed.as_secs_f32() / self.duration.as_secs_f32();
            self.fraction = self.easing.evaluate(raw);
            return;
        }

        if !self.pause.is_zero() {
            let completed_at = started_at + self.duration;
            self.fraction = 1.0;
            self.phase = Phase::Paused {
                resume_at: completed_at + self.pause,
            };
            log::debug!("traversal {} complete, pausing", self.traversals);
            return;
        }

        if self.duration.is_zero() {
            // Every tick is a whole traversal
            if self.fraction >= 1.0 {
                self.direction = self.direction.flipped();
                self.traversals = self.traversals.saturating_add(1);
            }
            self.fraction = 1.0;
            self.phase = Phase::Running { started_at: now };
            return;
        }

        // Seamless repeat: carry overshoot into the following traversals
        let duration_ns = self.duration.as_nanos();
        let elapsed_ns = elapsed.as_nanos();
        let completed = elapsed_ns / duration_ns;
        let remainder_ns = elapsed_ns % duration_ns;
        if completed % 2 == 1 {
            self.direction = self.direction.flipped();
        }
        self.traversals = self
            .traversals
            .saturating_add(u64::try_from(completed).unwrap_or(u64::MAX));
        let consumed = Duration::from_nanos(
            u64::try_from(elapsed_ns - remainder_ns).unwrap_or(u64::MAX),
        );
        self.phase = Phase::Running {
            started_at: started_at + consumed,
        };
        self.fraction = self
            .easing
            .evaluate(remainder_ns as f32 / duration_ns as f32);
    }

    /// Coarse phase.
    #[must_use]
    pub fn state(&self) -> ClockState {
        match self.phase {
            Phase::Idle => ClockState::Idle,
            Phase::Running { .. } => ClockState::Running,
            Phase::Paused { .. } => ClockState::Paused,
            Phase::Cancelled => ClockState::Cancelled,
        }
    }

    /// Eased progress through the current traversal.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    /// Direction of the current (or last) traversal.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether a traversal is running or the clock is resting between two.
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. } | Phase::Paused { .. })
    }

    /// Whether the clock was cancelled and not restarted since.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.phase == Phase::Cancelled
    }

    /// Whether a `start` is waiting for the next tick.
    #[must_use]
    pub fn is_start_pending(&self) -> bool {
        self.pending_start
    }

    /// Traversals begun since the clock was created.
    #[must_use]
    pub fn traversals(&self) -> u64 {
        self.traversals
    }

    /// Pacing curve for the current timing.
    #[must_use]
    pub fn easing(&self) -> EasingFunction {
        self.easing
    }

    /// Snapshot of fraction, direction and run flags.
    #[must_use]
    pub fn snapshot(&self) -> AnimationState {
        AnimationState {
            fraction: self.fraction,
            direction: self.direction,
            running: self.is_running(),
            cancelled: self.is_cancelled(),
        }
    }
}
