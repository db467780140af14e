//! Escalation timer.
//!
//! Measures elapsed simulation time since a start instant against a fixed
//! duration.  The timer owns no clock: every time-dependent query takes the
//! current clock value (seconds) from the caller, which in practice is the
//! host's simulation clock read through the supervisor port.

/// One escalation-stage timer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Timer {
    duration_s: f32,
    /// Reference instant; `None` while stopped.
    started_at: Option<f64>,
}

impl Timer {
    pub const fn new() -> Self {
        Self {
            duration_s: 0.0,
            started_at: None,
        }
    }

    pub fn with_duration(duration_s: f32) -> Self {
        let mut timer = Self::new();
        timer.setup(duration_s);
        timer
    }

    /// Configure the duration.  Negative or NaN durations clamp to zero.
    pub fn setup(&mut self, duration_s: f32) {
        self.duration_s = if duration_s > 0.0 { duration_s } else { 0.0 };
    }

    /// Record `now` as the reference instant.  Restarts a running timer.
    pub fn start(&mut self, now: f64) {
        self.started_at = Some(now);
    }

    pub fn stop(&mut self) {
        self.started_at = None;
    }

    pub fn started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn duration_s(&self) -> f32 {
        self.duration_s
    }

    /// `true` once the timer is running and `duration_s` has elapsed.
    pub fn triggered(&self, now: f64) -> bool {
        self.elapsed_s(now)
            .is_some_and(|elapsed| elapsed >= f64::from(self.duration_s))
    }

    /// Seconds since the reference instant, `None` while stopped.
    pub fn elapsed_s(&self, now: f64) -> Option<f64> {
        self.started_at.map(|t0| now - t0)
    }

    /// Seconds left before triggering (zero once triggered), `None` while stopped.
    pub fn remaining_s(&self, now: f64) -> Option<f64> {
        self.elapsed_s(now)
            .map(|elapsed| (f64::from(self.duration_s) - elapsed).max(0.0))
    }
}
