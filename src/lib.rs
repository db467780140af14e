//! Train control safety supervisor.
//!
//! Vigilance (alerter) and overspeed supervision for a simulated
//! locomotive, driven by the host once per simulation tick.  The host
//! implements [`app::ports::LocomotivePort`] and [`app::ports::EventSink`]
//! and talks to an [`app::service::TrainControlUnit`]; everything below the
//! port boundary is pure logic.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod braking;
pub mod config;
pub mod error;
pub mod lookahead;
pub mod supervisor;
pub mod timer;
