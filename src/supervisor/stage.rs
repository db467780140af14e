//! Escalation stage tracking.
//!
//! The built-in supervisor derives its stage from its timers every tick;
//! an [`EscalationTrack`] remembers the last stage of one track
//! (vigilance or overspeed), when it was entered, and logs every change:
//!
//! ```text
//!   vigilance:  Idle ──▶ Alarm ──▶ Emergency ──▶ Idle
//!   overspeed:  Idle ──▶ Warning ──▶ Alarm ──▶ Idle
//! ```

use log::{error, info, warn};

/// Escalation stage of one monitoring track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Stage {
    #[default]
    Idle,
    Warning,
    Alarm,
    Emergency,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Warning => "warning",
            Self::Alarm => "alarm",
            Self::Emergency => "emergency",
        }
    }
}

/// Current stage of one track plus entry bookkeeping.
#[derive(Debug, Clone, Copy)]
pub struct EscalationTrack {
    label: &'static str,
    current: Stage,
    /// Clock value when `current` was entered.
    entered_at: f64,
    transitions: u32,
}

impl EscalationTrack {
    pub const fn new(label: &'static str) -> Self {
        Self {
            label,
            current: Stage::Idle,
            entered_at: 0.0,
            transitions: 0,
        }
    }

    pub fn current(&self) -> Stage {
        self.current
    }

    pub fn secs_in_stage(&self, now: f64) -> f64 {
        now - self.entered_at
    }

    /// Number of stage changes since construction.
    pub fn transitions(&self) -> u32 {
        self.transitions
    }

    /// Move to `next`.  Returns `true` if the stage changed.
    pub fn enter(&mut self, next: Stage, now: f64) -> bool {
        if next == self.current {
            return false;
        }

        let from = self.current.name();
        let held = self.secs_in_stage(now);
        match next {
            Stage::Idle => info!("{}: {} -> idle after {:.1}s", self.label, from, held),
            Stage::Warning | Stage::Alarm => {
                warn!("{}: {} -> {} after {:.1}s", self.label, from, next.name(), held);
            }
            Stage::Emergency => error!("{}: {} -> emergency after {:.1}s", self.label, from, held),
        }

        self.current = next;
        self.entered_at = now;
        self.transitions = self.transitions.saturating_add(1);
        true
    }
}
