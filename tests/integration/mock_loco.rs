//! Mock locomotive adapter for integration tests.
//!
//! Records every command so tests can assert on the full history.  Brake
//! commands also change the reported brake state, the way a real brake
//! controller would.

use std::cell::Cell;

use traincontrol::app::events::TcsEvent;
use traincontrol::app::ports::{EventSink, LocomotivePort};
use traincontrol::lookahead::{Direction, TrackObject, TrainInfo, TrainInfoSource};

// ── Command record ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum LocoCall {
    FullBrake,
    EmergencyBrake,
    Throttle(f32),
    DynamicBrake(f32),
    PantographsDown,
    ShutDownEngine,
    Horn(bool),
    VigilanceAlarm(bool),
}

// ── MockLocomotive ────────────────────────────────────────────

pub struct MockLocomotive {
    pub calls: Vec<LocoCall>,
    pub now: f64,
    pub speed: f32,
    pub brake_emergency: bool,
    pub brake_full_service: bool,
    pub alerter_sound: bool,
    pub cab_view: bool,
    pub signal_limit: f32,
    pub post_limit: f32,
    pub info: TrainInfo,
    pub direction: Direction,
    /// Number of `train_info` snapshots taken.
    pub snapshots: Cell<u32>,
}

#[allow(dead_code)]
impl MockLocomotive {
    pub fn new(allowed_speed_mps: f32) -> Self {
        Self {
            calls: Vec::new(),
            now: 0.0,
            speed: 0.0,
            brake_emergency: false,
            brake_full_service: false,
            alerter_sound: false,
            cab_view: true,
            signal_limit: -1.0,
            post_limit: -1.0,
            info: TrainInfo {
                allowed_speed_mps,
                ..TrainInfo::default()
            },
            direction: Direction::Forward,
            snapshots: Cell::new(0),
        }
    }

    pub fn with_forward(mut self, objects: Vec<TrackObject>) -> Self {
        self.info.forward = objects;
        self
    }

    pub fn count(&self, call: &LocoCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub fn emergency_brake_count(&self) -> usize {
        self.count(&LocoCall::EmergencyBrake)
    }

    pub fn full_brake_count(&self) -> usize {
        self.count(&LocoCall::FullBrake)
    }

    /// Driver releases the train brake.
    pub fn release_brakes(&mut self) {
        self.brake_emergency = false;
        self.brake_full_service = false;
    }
}

impl TrainInfoSource for MockLocomotive {
    fn train_info(&self) -> TrainInfo {
        self.snapshots.set(self.snapshots.get() + 1);
        self.info.clone()
    }

    fn direction(&self) -> Direction {
        self.direction
    }
}

impl LocomotivePort for MockLocomotive {
    fn clock_time_s(&self) -> f64 {
        self.now
    }

    fn distance_m(&self) -> f32 {
        0.0
    }

    fn speed_mps(&self) -> f32 {
        self.speed
    }

    fn is_brake_emergency(&self) -> bool {
        self.brake_emergency
    }

    fn is_brake_full_service(&self) -> bool {
        self.brake_full_service
    }

    fn current_signal_speed_limit_mps(&self) -> f32 {
        self.signal_limit
    }

    fn current_post_speed_limit_mps(&self) -> f32 {
        self.post_limit
    }

    fn alerter_sound(&self) -> bool {
        self.alerter_sound
    }

    fn is_cab_view(&self) -> bool {
        self.cab_view
    }

    fn set_full_brake(&mut self) {
        self.calls.push(LocoCall::FullBrake);
        self.brake_full_service = true;
    }

    fn set_emergency_brake(&mut self) {
        self.calls.push(LocoCall::EmergencyBrake);
        self.brake_emergency = true;
    }

    fn set_throttle(&mut self, value: f32) {
        self.calls.push(LocoCall::Throttle(value));
    }

    fn set_dynamic_brake(&mut self, value: f32) {
        self.calls.push(LocoCall::DynamicBrake(value));
    }

    fn set_pantographs_down(&mut self) {
        self.calls.push(LocoCall::PantographsDown);
    }

    fn shut_down_engine(&mut self) {
        self.calls.push(LocoCall::ShutDownEngine);
    }

    fn set_horn(&mut self, on: bool) {
        self.calls.push(LocoCall::Horn(on));
    }

    fn set_vigilance_alarm(&mut self, on: bool) {
        self.calls.push(LocoCall::VigilanceAlarm(on));
        self.alerter_sound = on;
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<TcsEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &TcsEvent) {
        self.events.push(*event);
    }
}

// ── Tick driver ───────────────────────────────────────────────

/// Advance the mock clock in 1 s steps up to `until`, updating the unit
/// after every step.
#[allow(dead_code)]
pub fn run_until(
    unit: &mut traincontrol::app::service::TrainControlUnit,
    loco: &mut MockLocomotive,
    sink: &mut RecordingSink,
    until: f64,
) {
    while loco.now < until {
        loco.now += 1.0;
        unit.update(loco, sink);
    }
}
