//! Inbound driver inputs.
//!
//! The host forwards cab control actions to the
//! [`TrainControlUnit`](super::service::TrainControlUnit), which hands them
//! to the active train control system.

/// Inputs a train control system reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TcsCommand {
    AlerterPressed = 0,
    AlerterReleased = 1,
    AlerterReset = 2,
}

impl TcsCommand {
    /// Decode a host event code.  Unknown codes yield `None` and are dropped.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::AlerterPressed),
            1 => Some(Self::AlerterReleased),
            2 => Some(Self::AlerterReset),
            _ => None,
        }
    }
}
