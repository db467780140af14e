//! Application core: the control unit and its port boundary.
//!
//! The host talks to a [`service::TrainControlUnit`] only.  Everything it
//! needs from the host goes through the traits in [`ports`]; the
//! [`context::TickContext`] adapts those to the
//! [`SupervisorPort`](ports::SupervisorPort) a train control system sees.

pub mod commands;
pub mod context;
pub mod events;
pub mod ports;
pub mod service;
