use std::time::Duration;

/// A simulation that can only move forward in whole, fixed-size increments.
pub trait Steppable {
    /// Advances the simulation by exactly `dt`.
    fn step(&mut self, dt: Duration);
}

/// Outcome of a single [`FixedStepper::advance`] call.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct StepReport {
    /// Fixed steps executed this frame.
    pub steps: u32,
    /// Whole steps discarded because the catch-up cap was reached.
    pub dropped: u32,
}

/// Fixed-timestep accumulator.
///
/// Frame deltas are accumulated; the simulation is stepped with the constant
/// `step` for as long as at least one full step of time is pending. Simulation
/// results therefore depend only on the step size and the number of steps, not
/// on the display frame rate.
///
/// Time is kept as integer nanoseconds (`Duration`), so the accumulator can
/// never go negative and step counts are exact for a given delta sequence.
///
/// After every `advance`, `accumulator() < step()` holds.
#[derive(Debug, Clone)]
pub struct FixedStepper {
    step: Duration,
    accumulator: Duration,
    max_catch_up: Option<u32>,
    total_steps: u64,
}

impl FixedStepper {
    /// Step used when a zero step is requested.
    pub const DEFAULT_STEP: Duration = Duration::from_nanos(1_000_000_000 / 60);

    /// Creates a stepper with an empty accumulator and no catch-up cap.
    pub fn new(step: Duration) -> Self {
        let step = if step.is_zero() {
            log::warn!("FixedStepper: zero step requested; using {:?}", Self::DEFAULT_STEP);
            Self::DEFAULT_STEP
        } else {
            step
        };

        Self {
            step,
            accumulator: Duration::ZERO,
            max_catch_up: None,
            total_steps: 0,
        }
    }

    /// Creates a stepper running `hz` steps per simulated second.
    pub fn from_hz(hz: u32) -> Self {
        let step = Duration::from_secs(1).checked_div(hz).unwrap_or(Duration::ZERO);
        Self::new(step)
    }

    /// Caps the number of steps a single `advance` may execute.
    ///
    /// Time beyond the cap is discarded in whole steps; the fractional remainder
    /// is kept. `None` removes the cap.
    pub fn with_max_catch_up(mut self, max_steps: Option<u32>) -> Self {
        self.max_catch_up = max_steps;
        self
    }

    #[inline]
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Unconsumed simulation time.
    #[inline]
    pub fn accumulator(&self) -> Duration {
        self.accumulator
    }

    #[inline]
    pub fn max_catch_up(&self) -> Option<u32> {
        self.max_catch_up
    }

    /// Steps executed since creation or the last [`reset`](Self::reset).
    #[inline]
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Fraction of a step pending in the accumulator, in `[0, 1)`.
    ///
    /// Renderers may use it to interpolate between the last two simulated states.
    pub fn alpha(&self) -> f32 {
        (self.accumulator.as_secs_f64() / self.step.as_secs_f64()) as f32
    }

    /// Empties the accumulator and the step counter.
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
        self.total_steps = 0;
    }

    /// Accumulates `frame_delta` and steps `sim` as many times as it covers.
    pub fn advance<S>(&mut self, frame_delta: Duration, sim: &mut S) -> StepReport
    where
        S: Steppable + ?Sized,
    {
        self.advance_with(frame_delta, |dt| sim.step(dt))
    }

    /// Like [`advance`](Self::advance) but takes the frame delta in seconds.
    ///
    /// Negative, NaN and non-representable values count as zero elapsed time.
    pub fn advance_secs<S>(&mut self, frame_delta: f32, sim: &mut S) -> StepReport
    where
        S: Steppable + ?Sized,
    {
        self.advance(secs_to_delta(frame_delta), sim)
    }

    /// Closure form of [`advance`](Self::advance).
    pub fn advance_with<F>(&mut self, frame_delta: Duration, mut step_fn: F) -> StepReport
    where
        F: FnMut(Duration),
    {
        self.accumulator = self.accumulator.saturating_add(frame_delta);

        let mut report = StepReport::default();

        while self.accumulator >= self.step {
            if self.max_catch_up.is_some_and(|max| report.steps >= max) {
                report.dropped = self.drop_whole_steps();
                log::warn!(
                    "FixedStepper: catch-up cap of {} steps reached; dropped {} steps",
                    report.steps,
                    report.dropped
                );
                break;
            }

            step_fn(self.step);
            self.accumulator -= self.step;
            report.steps += 1;
            self.total_steps = self.total_steps.wrapping_add(1);
        }

        report
    }

    /// Discards every whole step pending in the accumulator, returning how many.
    fn drop_whole_steps(&mut self) -> u32 {
        let acc = self.accumulator.as_nanos();
        let step = self.step.as_nanos();

        // remainder < step, which always fits in u64 nanoseconds
        self.accumulator = Duration::from_nanos((acc % step) as u64);
        u32::try_from(acc / step).unwrap_or(u32::MAX)
    }
}

impl Default for FixedStepper {
    fn default() -> Self {
        Self::new(Self::DEFAULT_STEP)
    }
}

fn secs_to_delta(secs: f32) -> Duration {
    Duration::try_from_secs_f32(secs).unwrap_or(Duration::ZERO)
}
