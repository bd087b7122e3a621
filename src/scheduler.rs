use std::time::{Duration, Instant};

/// Decides when the simulation should step, independent of the frame rate.
///
/// The main loop calls [`TickScheduler::poll`] once per frame. A step is due
/// once the time since the last committed step reaches the current tick
/// interval; the baseline then moves to the frame time that fired, so a slow
/// frame never triggers a burst of catch-up steps.
#[derive(Debug, Clone, Copy)]
pub struct TickScheduler {
    last_step: Instant,
    halted: bool,
}

impl TickScheduler {
    #[must_use]
    pub fn new(now: Instant) -> Self {
        Self {
            last_step: now,
            halted: false,
        }
    }

    /// Returns true when a step is due at `now` for the given `interval`.
    pub fn poll(&mut self, now: Instant, interval: Duration) -> bool {
        if self.halted {
            return false;
        }

        if now.saturating_duration_since(self.last_step) < interval {
            return false;
        }

        self.last_step = now;
        true
    }

    /// Stops stepping until [`TickScheduler::resume`] is called.
    pub fn halt(&mut self) {
        self.halted = true;
    }

    /// Re-arms the scheduler with `now` as the new baseline.
    pub fn resume(&mut self, now: Instant) {
        self.halted = false;
        self.last_step = now;
    }

    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Time left until the next step is due, for sizing the input poll.
    #[must_use]
    pub fn time_until_due(&self, now: Instant, interval: Duration) -> Duration {
        interval.saturating_sub(now.saturating_duration_since(self.last_step))
    }
}
