//! Unified error types for the train control system.
//!
//! A single `Error` enum that every subsystem converts into. None of these
//! ever abort a simulation tick: the supervisor saturates instead, and the
//! typed errors exist for the configuration layer and the checked
//! braking-curve variants. All variants are `Copy`.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A monitoring device or supervisor setting is inconsistent.
    Config(ConfigError),
    /// A braking curve was asked for with unusable inputs.
    Braking(BrakingError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Braking(e) => write!(f, "braking curve: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A duration field is negative or not finite.
    InvalidDuration(&'static str),
    /// A speed field is negative or not finite.
    InvalidSpeed(&'static str),
    /// `alarm_time_s` exceeds `monitor_time_s`; the emergency stage follows
    /// the alarm immediately.
    AlarmAfterMonitor,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDuration(field) => write!(f, "{field} must be a finite, non-negative duration"),
            Self::InvalidSpeed(field) => write!(f, "{field} must be a finite, non-negative speed"),
            Self::AlarmAfterMonitor => write!(f, "alarm time exceeds monitor time"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Braking curve errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrakingError {
    /// Deceleration minus the grade component is zero or negative.
    NonPositiveDeceleration,
}

impl fmt::Display for BrakingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveDeceleration => write!(f, "grade-adjusted deceleration is not positive"),
        }
    }
}

impl From<BrakingError> for Error {
    fn from(e: BrakingError) -> Self {
        Self::Braking(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
