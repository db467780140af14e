//! Train control systems.
//!
//! A [`TrainControlSystem`] is the pluggable safety logic of a locomotive.
//! It sees the world only through a [`SupervisorPort`] and is driven by
//! the [`TrainControlUnit`](crate::app::service::TrainControlUnit):
//!
//! ```text
//!   initialize ──▶ update ──▶ update ──▶ …        (once per tick)
//!                     ▲
//!        handle_event / set_emergency              (between ticks)
//! ```
//!
//! [`builtin::BuiltinSupervisor`] is the default implementation: vigilance
//! and overspeed monitoring with penalty braking.  Alternatives are
//! registered on the control unit by name and selected from the
//! configuration.

pub mod builtin;
pub mod stage;

use crate::app::commands::TcsCommand;
use crate::app::ports::SupervisorPort;
use crate::config::SupervisorConfig;

/// Below this speed (m/s) the train counts as stopped.
pub const STANDSTILL_MPS: f32 = 0.1;

/// Snapshot of a system's escalation flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SupervisorStatus {
    pub activated: bool,
    pub vigilance_alarm: bool,
    pub vigilance_emergency: bool,
    pub overspeed_warning: bool,
    pub overspeed_alarm: bool,
    /// A penalty brake is being enforced by either track.
    pub penalty_application: bool,
}

/// One train control system implementation.
pub trait TrainControlSystem {
    fn name(&self) -> &str;

    /// Called once before the first update.
    fn initialize(&mut self, port: &mut dyn SupervisorPort);

    /// Called once per simulation tick.
    fn update(&mut self, port: &mut dyn SupervisorPort);

    /// Driver input.
    fn handle_event(&mut self, command: TcsCommand, port: &mut dyn SupervisorPort);

    /// External request for an emergency stop.
    fn set_emergency(&mut self, port: &mut dyn SupervisorPort);

    fn status(&self) -> SupervisorStatus;
}

/// Builds a system from the locomotive's configuration.
pub type SystemFactory = fn(&SupervisorConfig) -> Box<dyn TrainControlSystem>;
