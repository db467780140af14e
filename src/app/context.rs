//! Per-tick context handed to the train control system.
//!
//! `TickContext` is the concrete [`SupervisorPort`]: it borrows the host's
//! locomotive and event sink for the duration of one call, together with
//! the control unit's lookahead cache and cab display.  Nothing in it
//! outlives the call.

use crate::lookahead::{Aspect, SignalLookahead};

use super::events::TcsEvent;
use super::ports::{EventSink, LocomotivePort, SupervisorPort};

// ---------------------------------------------------------------------------
// Cab display (written by the system; read by the host)
// ---------------------------------------------------------------------------

/// Indicators and values shown to the driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CabDisplay {
    pub vigilance_alarm: bool,
    pub vigilance_emergency: bool,
    pub overspeed_warning: bool,
    pub penalty_application: bool,
    pub current_speed_limit_mps: f32,
    pub next_speed_limit_mps: f32,
    pub next_signal_aspect: Aspect,
}

impl Default for CabDisplay {
    fn default() -> Self {
        Self {
            vigilance_alarm: false,
            vigilance_emergency: false,
            overspeed_warning: false,
            penalty_application: false,
            current_speed_limit_mps: 0.0,
            next_speed_limit_mps: 0.0,
            next_signal_aspect: Aspect::None,
        }
    }
}

// ---------------------------------------------------------------------------
// TickContext
// ---------------------------------------------------------------------------

pub struct TickContext<'a, L: LocomotivePort, S: EventSink> {
    loco: &'a mut L,
    sink: &'a mut S,
    lookahead: &'a mut SignalLookahead,
    display: &'a mut CabDisplay,
    alerter_enabled: bool,
}

impl<'a, L: LocomotivePort, S: EventSink> TickContext<'a, L, S> {
    pub fn new(
        loco: &'a mut L,
        sink: &'a mut S,
        lookahead: &'a mut SignalLookahead,
        display: &'a mut CabDisplay,
        alerter_enabled: bool,
    ) -> Self {
        Self {
            loco,
            sink,
            lookahead,
            display,
            alerter_enabled,
        }
    }
}

impl<L: LocomotivePort, S: EventSink> SupervisorPort for TickContext<'_, L, S> {
    // ── Train state ───────────────────────────────────────────

    fn clock_time_s(&self) -> f64 {
        self.loco.clock_time_s()
    }

    fn distance_m(&self) -> f32 {
        self.loco.distance_m()
    }

    fn speed_mps(&self) -> f32 {
        self.loco.speed_mps().abs()
    }

    fn is_brake_emergency(&self) -> bool {
        self.loco.is_brake_emergency()
    }

    fn is_brake_full_service(&self) -> bool {
        self.loco.is_brake_full_service()
    }

    fn current_signal_speed_limit_mps(&self) -> f32 {
        self.loco.current_signal_speed_limit_mps()
    }

    fn current_post_speed_limit_mps(&self) -> f32 {
        self.loco.current_post_speed_limit_mps()
    }

    fn is_alerter_enabled(&self) -> bool {
        self.alerter_enabled
    }

    fn alerter_sound(&self) -> bool {
        self.loco.alerter_sound()
    }

    // ── Lookahead ─────────────────────────────────────────────

    fn train_speed_limit_mps(&mut self) -> f32 {
        self.lookahead.train_speed_limit_mps(&*self.loco)
    }

    fn next_signal_speed_limit_mps(&mut self, index: i32) -> f32 {
        self.lookahead.signal(index, &*self.loco).speed_limit_mps
    }

    fn next_signal_aspect(&mut self, index: i32) -> Aspect {
        self.lookahead.signal(index, &*self.loco).aspect
    }

    fn next_signal_distance_m(&mut self, index: i32) -> f32 {
        self.lookahead.signal(index, &*self.loco).distance_m
    }

    fn next_post_speed_limit_mps(&mut self, index: i32) -> f32 {
        self.lookahead.post(index, &*self.loco).speed_limit_mps
    }

    fn next_post_distance_m(&mut self, index: i32) -> f32 {
        self.lookahead.post(index, &*self.loco).distance_m
    }

    // ── Locomotive commands ───────────────────────────────────

    fn set_full_brake(&mut self) {
        self.loco.set_full_brake();
    }

    fn set_emergency_brake(&mut self) {
        self.loco.set_emergency_brake();
    }

    fn set_throttle(&mut self, value: f32) {
        self.loco.set_throttle(value);
    }

    fn set_dynamic_brake(&mut self, value: f32) {
        self.loco.set_dynamic_brake(value);
    }

    fn set_pantographs_down(&mut self) {
        self.loco.set_pantographs_down();
    }

    fn shut_down_engine(&mut self) {
        self.loco.shut_down_engine();
    }

    fn set_horn(&mut self, on: bool) {
        self.loco.set_horn(on);
    }

    fn set_vigilance_alarm(&mut self, on: bool) {
        self.loco.set_vigilance_alarm(on);
    }

    // ── Cab display ───────────────────────────────────────────

    fn set_vigilance_alarm_display(&mut self, on: bool) {
        self.display.vigilance_alarm = on;
    }

    fn set_vigilance_emergency_display(&mut self, on: bool) {
        self.display.vigilance_emergency = on;
    }

    fn set_overspeed_warning_display(&mut self, on: bool) {
        self.display.overspeed_warning = on;
    }

    fn set_penalty_application_display(&mut self, on: bool) {
        self.display.penalty_application = on;
    }

    fn set_current_speed_limit_mps(&mut self, value: f32) {
        self.display.current_speed_limit_mps = value;
    }

    fn set_next_speed_limit_mps(&mut self, value: f32) {
        self.display.next_speed_limit_mps = value;
    }

    fn set_next_signal_aspect(&mut self, aspect: Aspect) {
        self.display.next_signal_aspect = aspect;
    }

    // ── Notifications ─────────────────────────────────────────

    fn trigger_sound(&mut self, event: TcsEvent) {
        self.sink.emit(&event);
    }
}
