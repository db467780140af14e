//! Outbound notifications.
//!
//! A [`TrainControlSystem`](crate::supervisor::TrainControlSystem) raises
//! these through [`SupervisorPort::trigger_sound`](super::ports::SupervisorPort::trigger_sound);
//! the control unit forwards them to the host's
//! [`EventSink`](super::ports::EventSink), which maps them to sound
//! streams of the cab sound definition.

/// Sound cues and lifecycle notifications of a train control system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TcsEvent {
    Info1,
    Info2,
    Penalty1,
    Penalty2,
    /// The system switched itself on.
    SystemActivate,
    /// The system switched itself off.
    SystemDeactivate,
}

impl TcsEvent {
    pub fn name(self) -> &'static str {
        match self {
            Self::Info1 => "info1",
            Self::Info2 => "info2",
            Self::Penalty1 => "penalty1",
            Self::Penalty2 => "penalty2",
            Self::SystemActivate => "activate",
            Self::SystemDeactivate => "deactivate",
        }
    }
}
