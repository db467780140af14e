//! Port traits: the hexagonal boundary between the supervisor and the host.
//!
//! ```text
//!   Host adapter ──▶ LocomotivePort ──▶ TickContext ──▶ SupervisorPort ──▶ TrainControlSystem
//!                    EventSink      ◀──             ◀──
//! ```
//!
//! The host implements [`LocomotivePort`] (its locomotive model, brake and
//! throttle controllers) and [`EventSink`] (its event handler list).  The
//! [`TrainControlUnit`](super::service::TrainControlUnit) wraps both,
//! together with the lookahead cache and the cab display, into a
//! [`TickContext`](super::context::TickContext) which is what a
//! [`TrainControlSystem`](crate::supervisor::TrainControlSystem) sees as
//! its [`SupervisorPort`].

use crate::lookahead::{Aspect, TrainInfoSource};

use super::events::TcsEvent;

// ───────────────────────────────────────────────────────────────
// Locomotive port (driven adapter: host model ↔ control unit)
// ───────────────────────────────────────────────────────────────

/// Queries and commands the host locomotive provides.
pub trait LocomotivePort: TrainInfoSource {
    // ── Queries ───────────────────────────────────────────────

    /// Simulation clock (seconds).
    fn clock_time_s(&self) -> f64;

    /// Odometer (metres).
    fn distance_m(&self) -> f32;

    /// Signed speed (m/s); the control unit uses its absolute value.
    fn speed_mps(&self) -> f32;

    fn is_brake_emergency(&self) -> bool;

    fn is_brake_full_service(&self) -> bool;

    /// Limit imposed by the last signal passed (m/s), negative if none.
    fn current_signal_speed_limit_mps(&self) -> f32;

    /// Limit imposed by the last speed post passed (m/s).
    fn current_post_speed_limit_mps(&self) -> f32;

    /// Whether the audible vigilance alarm is currently sounding.
    fn alerter_sound(&self) -> bool;

    /// Whether the driver is looking from the cab.
    fn is_cab_view(&self) -> bool {
        true
    }

    // ── Commands ──────────────────────────────────────────────

    fn set_full_brake(&mut self);

    fn set_emergency_brake(&mut self);

    /// Throttle setpoint in the controller's own range.
    fn set_throttle(&mut self, value: f32);

    /// Dynamic brake setpoint in the controller's own range.
    fn set_dynamic_brake(&mut self, value: f32);

    /// Lower every pantograph of the locomotive and the train.
    fn set_pantographs_down(&mut self);

    /// Stop the prime mover.  Locomotives without one ignore it.
    fn shut_down_engine(&mut self) {}

    fn set_horn(&mut self, on: bool);

    /// Switch the audible vigilance alarm.
    fn set_vigilance_alarm(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: control unit → host handlers)
// ───────────────────────────────────────────────────────────────

/// Receives sound cues and lifecycle notifications.
pub trait EventSink {
    fn emit(&mut self, event: &TcsEvent);
}

// ───────────────────────────────────────────────────────────────
// Supervisor port (what a train control system can see and do)
// ───────────────────────────────────────────────────────────────

/// Capability surface of one tick.
///
/// Lookahead queries take `&mut self` because they populate the tick's
/// cache on a miss.  Object safe: systems receive `&mut dyn SupervisorPort`.
pub trait SupervisorPort {
    // ── Train state ───────────────────────────────────────────

    fn clock_time_s(&self) -> f64;
    fn distance_m(&self) -> f32;
    /// Absolute speed (m/s).
    fn speed_mps(&self) -> f32;
    fn is_brake_emergency(&self) -> bool;
    fn is_brake_full_service(&self) -> bool;
    fn current_signal_speed_limit_mps(&self) -> f32;
    fn current_post_speed_limit_mps(&self) -> f32;
    fn is_alerter_enabled(&self) -> bool;
    fn alerter_sound(&self) -> bool;

    // ── Lookahead ─────────────────────────────────────────────

    fn train_speed_limit_mps(&mut self) -> f32;
    fn next_signal_speed_limit_mps(&mut self, index: i32) -> f32;
    fn next_signal_aspect(&mut self, index: i32) -> Aspect;
    fn next_signal_distance_m(&mut self, index: i32) -> f32;
    fn next_post_speed_limit_mps(&mut self, index: i32) -> f32;
    fn next_post_distance_m(&mut self, index: i32) -> f32;

    // ── Locomotive commands ───────────────────────────────────

    fn set_full_brake(&mut self);
    fn set_emergency_brake(&mut self);
    fn set_throttle(&mut self, value: f32);
    fn set_dynamic_brake(&mut self, value: f32);
    fn set_pantographs_down(&mut self);
    fn shut_down_engine(&mut self);
    fn set_horn(&mut self, on: bool);
    fn set_vigilance_alarm(&mut self, on: bool);

    // ── Cab display ───────────────────────────────────────────

    fn set_vigilance_alarm_display(&mut self, on: bool);
    fn set_vigilance_emergency_display(&mut self, on: bool);
    fn set_overspeed_warning_display(&mut self, on: bool);
    fn set_penalty_application_display(&mut self, on: bool);
    fn set_current_speed_limit_mps(&mut self, value: f32);
    fn set_next_speed_limit_mps(&mut self, value: f32);
    fn set_next_signal_aspect(&mut self, aspect: Aspect);

    // ── Notifications ─────────────────────────────────────────

    fn trigger_sound(&mut self, event: TcsEvent);
}
