//! Simulated locomotive.
//!
//! A point-mass train on a straight line with a fixed list of track
//! objects at absolute positions.  Good enough to drive the control unit
//! from the `tcs-sim` binary and from tests; no adhesion, no grades.

use log::debug;

use crate::app::ports::LocomotivePort;
use crate::lookahead::{Direction, TrackObject, TrackObjectKind, TrainInfo, TrainInfoSource};

/// Traction acceleration at full throttle (m/s²).
const MAX_TRACTION_MPS2: f32 = 0.5;
const FULL_SERVICE_MPS2: f32 = 0.8;
const EMERGENCY_MPS2: f32 = 1.3;

/// Train brake state as the simulation sees it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BrakeState {
    #[default]
    Released,
    FullService,
    Emergency,
}

#[derive(Debug, Clone)]
pub struct SimLocomotive {
    clock_s: f64,
    position_m: f32,
    speed_mps: f32,
    throttle: f32,
    dynamic_brake: f32,
    brake: BrakeState,
    alerter_sound: bool,
    horn: bool,
    pantographs_up: bool,
    engine_running: bool,
    cab_view: bool,
    allowed_speed_mps: f32,
    signal_limit_mps: f32,
    post_limit_mps: f32,
    /// Objects at absolute positions along the line, ascending.
    objects: Vec<TrackObject>,
}

impl SimLocomotive {
    pub fn new(allowed_speed_mps: f32) -> Self {
        Self {
            clock_s: 0.0,
            position_m: 0.0,
            speed_mps: 0.0,
            throttle: 0.0,
            dynamic_brake: 0.0,
            brake: BrakeState::Released,
            alerter_sound: false,
            horn: false,
            pantographs_up: true,
            engine_running: true,
            cab_view: true,
            allowed_speed_mps,
            signal_limit_mps: -1.0,
            post_limit_mps: -1.0,
            objects: Vec::new(),
        }
    }

    /// Place track objects; `distance_m` is read as an absolute position.
    pub fn with_objects(mut self, mut objects: Vec<TrackObject>) -> Self {
        objects.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
        self.objects = objects;
        self
    }

    /// Advance the model by `dt_s` seconds.
    pub fn step(&mut self, dt_s: f32) {
        let traction = if self.pantographs_up && self.engine_running {
            self.throttle.clamp(0.0, 1.0) * MAX_TRACTION_MPS2
        } else {
            0.0
        };
        let braking = match self.brake {
            BrakeState::Released => 0.0,
            BrakeState::FullService => FULL_SERVICE_MPS2,
            BrakeState::Emergency => EMERGENCY_MPS2,
        } + self.dynamic_brake.clamp(0.0, 1.0) * FULL_SERVICE_MPS2 * 0.5;

        self.speed_mps = (self.speed_mps + (traction - braking) * dt_s).max(0.0);
        let before = self.position_m;
        self.position_m += self.speed_mps * dt_s;
        self.clock_s += f64::from(dt_s);

        let after = self.position_m;
        for object in &self.objects {
            if object.distance_m <= before || object.distance_m > after {
                continue;
            }
            match object.kind {
                TrackObjectKind::Signal => self.signal_limit_mps = object.allowed_speed_mps,
                TrackObjectKind::SpeedPost => self.post_limit_mps = object.allowed_speed_mps,
                TrackObjectKind::Authority => {}
            }
        }
    }

    /// Driver releases the train brake.
    pub fn release_brakes(&mut self) {
        if self.brake != BrakeState::Released {
            debug!("sim: brakes released at {:.1}s", self.clock_s);
        }
        self.brake = BrakeState::Released;
    }

    pub fn set_speed(&mut self, speed_mps: f32) {
        self.speed_mps = speed_mps.max(0.0);
    }

    pub fn set_cab_view(&mut self, cab_view: bool) {
        self.cab_view = cab_view;
    }

    pub fn brake_state(&self) -> BrakeState {
        self.brake
    }

    pub fn throttle(&self) -> f32 {
        self.throttle
    }

    pub fn horn(&self) -> bool {
        self.horn
    }

    pub fn pantographs_up(&self) -> bool {
        self.pantographs_up
    }

    pub fn engine_running(&self) -> bool {
        self.engine_running
    }
}

impl TrainInfoSource for SimLocomotive {
    fn train_info(&self) -> TrainInfo {
        let forward = self
            .objects
            .iter()
            .filter(|o| o.distance_m > self.position_m)
            .map(|o| TrackObject {
                distance_m: o.distance_m - self.position_m,
                ..*o
            })
            .collect();
        TrainInfo {
            allowed_speed_mps: self.allowed_speed_mps,
            forward,
            backward: Vec::new(),
        }
    }

    fn direction(&self) -> Direction {
        Direction::Forward
    }
}

impl LocomotivePort for SimLocomotive {
    fn clock_time_s(&self) -> f64 {
        self.clock_s
    }

    fn distance_m(&self) -> f32 {
        self.position_m
    }

    fn speed_mps(&self) -> f32 {
        self.speed_mps
    }

    fn is_brake_emergency(&self) -> bool {
        self.brake == BrakeState::Emergency
    }

    fn is_brake_full_service(&self) -> bool {
        self.brake == BrakeState::FullService
    }

    fn current_signal_speed_limit_mps(&self) -> f32 {
        self.signal_limit_mps
    }

    fn current_post_speed_limit_mps(&self) -> f32 {
        self.post_limit_mps
    }

    fn alerter_sound(&self) -> bool {
        self.alerter_sound
    }

    fn is_cab_view(&self) -> bool {
        self.cab_view
    }

    fn set_full_brake(&mut self) {
        if self.brake == BrakeState::Released {
            self.brake = BrakeState::FullService;
        }
    }

    fn set_emergency_brake(&mut self) {
        self.brake = BrakeState::Emergency;
    }

    fn set_throttle(&mut self, value: f32) {
        self.throttle = value;
    }

    fn set_dynamic_brake(&mut self, value: f32) {
        self.dynamic_brake = value;
    }

    fn set_pantographs_down(&mut self) {
        self.pantographs_up = false;
    }

    fn shut_down_engine(&mut self) {
        self.engine_running = false;
    }

    fn set_horn(&mut self, on: bool) {
        self.horn = on;
    }

    fn set_vigilance_alarm(&mut self, on: bool) {
        self.alerter_sound = on;
    }
}
