//! Supervisor configuration parameters
//!
//! One [`MonitoringDevice`] per monitor kind plus the locomotive-level
//! emergency flags and alerter settings.  Values arrive already parsed from
//! the rolling-stock definition; serde is used to carry them between the
//! host and the supervisor (JSON for files, postcard for snapshots).

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Name that selects the built-in supervisor explicitly.
pub const BUILTIN_SYSTEM_NAME: &str = "MSTS";

/// Which brake a penalty application commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrakePolicy {
    Emergency,
    FullService,
    None,
}

/// The four monitor slots a locomotive can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonitorKind {
    Vigilance,
    Overspeed,
    EmergencyStop,
    /// Automatic warning system (auxiliary, not acted on by the built-in supervisor).
    Aws,
}

/// Thresholds and behaviour flags for one monitoring device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringDevice {
    // --- Escalation timing ---
    /// Time from alerter reset to the penalty (seconds)
    pub monitor_time_s: f32,
    /// Time from alerter reset to the audible and visible alarm (seconds)
    pub alarm_time_s: f32,
    /// Minimum time the penalty stays applied (seconds)
    pub penalty_time_s: f32,

    // --- Penalty policy ---
    pub emergency_cuts_power: bool,
    pub emergency_shuts_down_engine: bool,
    pub applies_full_brake: bool,
    pub applies_emergency_brake: bool,

    // --- Reset conditions ---
    pub reset_on_zero_speed: bool,
    pub reset_on_reset_button: bool,
    /// Alarm cancels itself at or below this speed (m/s)
    pub reset_level_mps: f32,

    // --- Overspeed only ---
    /// Absolute overspeed trigger (m/s), 0 = disabled
    pub trigger_on_overspeed_mps: f32,
    /// Trigger relative to the current track/signal limit
    pub trigger_on_track_overspeed: bool,
    /// Margin above the current limit for the track-relative trigger (m/s)
    pub trigger_on_track_overspeed_margin_mps: f32,
    /// Critical level trigger (m/s), 0 = disabled
    pub critical_level_mps: f32,
    /// Warning time before the overspeed penalty (seconds)
    pub alarm_time_before_overspeed_s: f32,
}

impl Default for MonitoringDevice {
    fn default() -> Self {
        Self {
            // Timing
            monitor_time_s: 66.0,
            alarm_time_s: 60.0,
            penalty_time_s: 0.0,

            // Policy
            emergency_cuts_power: false,
            emergency_shuts_down_engine: false,
            applies_full_brake: true,
            applies_emergency_brake: false,

            // Reset
            reset_on_zero_speed: true,
            reset_on_reset_button: false,
            reset_level_mps: 0.0,

            // Overspeed
            trigger_on_overspeed_mps: 0.0,
            trigger_on_track_overspeed: false,
            trigger_on_track_overspeed_margin_mps: 4.0,
            critical_level_mps: 0.0,
            alarm_time_before_overspeed_s: 5.0,
        }
    }
}

impl MonitoringDevice {
    /// Time from the alarm to the emergency stage.  Saturates to zero when
    /// the alarm is configured after the monitor time.
    pub fn alarm_timeout_s(&self) -> f32 {
        if self.monitor_time_s > self.alarm_time_s {
            self.monitor_time_s - self.alarm_time_s
        } else {
            0.0
        }
    }

    /// Warning time the overspeed alarm waits for.
    pub fn overspeed_alarm_delay_s(&self) -> f32 {
        self.alarm_time_s.max(self.alarm_time_before_overspeed_s)
    }

    /// Emergency brake wins over full service when both are requested.
    pub fn brake_policy(&self) -> BrakePolicy {
        if self.applies_emergency_brake {
            BrakePolicy::Emergency
        } else if self.applies_full_brake {
            BrakePolicy::FullService
        } else {
            BrakePolicy::None
        }
    }

    /// Whether an alarm may cancel itself at `speed_mps` without a button press.
    pub fn auto_resets_at(&self, speed_mps: f32) -> bool {
        (self.reset_on_zero_speed && speed_mps < crate::supervisor::STANDSTILL_MPS)
            || speed_mps <= self.reset_level_mps
    }

    /// Range checks for the loading layer.  The supervisor itself never
    /// requires a valid device; it saturates instead.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("monitor_time_s", self.monitor_time_s),
            ("alarm_time_s", self.alarm_time_s),
            ("penalty_time_s", self.penalty_time_s),
            ("alarm_time_before_overspeed_s", self.alarm_time_before_overspeed_s),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDuration(field).into());
            }
        }
        for (field, value) in [
            ("reset_level_mps", self.reset_level_mps),
            ("trigger_on_overspeed_mps", self.trigger_on_overspeed_mps),
            (
                "trigger_on_track_overspeed_margin_mps",
                self.trigger_on_track_overspeed_margin_mps,
            ),
            ("critical_level_mps", self.critical_level_mps),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidSpeed(field).into());
            }
        }
        if self.alarm_time_s > self.monitor_time_s {
            return Err(ConfigError::AlarmAfterMonitor.into());
        }
        Ok(())
    }
}

/// Complete train control configuration for one locomotive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupervisorConfig {
    // --- Monitors ---
    pub vigilance: Option<MonitoringDevice>,
    pub overspeed: Option<MonitoringDevice>,
    pub emergency_stop: Option<MonitoringDevice>,
    pub aws: Option<MonitoringDevice>,

    // --- Locomotive emergency behaviour ---
    /// Throttle goes to zero when the emergency brake is applied
    pub emergency_causes_throttle_down: bool,
    /// Horn sounds when the emergency brake is applied
    pub emergency_engages_horn: bool,

    // --- Alerter settings ---
    /// Alerter enabled in the simulator settings
    pub alerter_enabled: bool,
    /// Alerter disabled while the driver is not in the cab view
    pub alerter_disable_external: bool,

    // --- Implementation ---
    /// Name of an alternative train control system; `None` or "MSTS"
    /// selects the built-in supervisor
    pub system_name: Option<String>,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            vigilance: None,
            overspeed: None,
            emergency_stop: None,
            aws: None,
            emergency_causes_throttle_down: false,
            emergency_engages_horn: false,
            alerter_enabled: true,
            alerter_disable_external: false,
            system_name: None,
        }
    }
}

impl SupervisorConfig {
    pub fn monitor(&self, kind: MonitorKind) -> Option<&MonitoringDevice> {
        match kind {
            MonitorKind::Vigilance => self.vigilance.as_ref(),
            MonitorKind::Overspeed => self.overspeed.as_ref(),
            MonitorKind::EmergencyStop => self.emergency_stop.as_ref(),
            MonitorKind::Aws => self.aws.as_ref(),
        }
    }

    /// Whether the built-in supervisor is requested.
    pub fn uses_builtin(&self) -> bool {
        self.system_name
            .as_deref()
            .is_none_or(|name| name.is_empty() || name == BUILTIN_SYSTEM_NAME)
    }

    /// Validate every configured monitor.  The first problem is reported
    /// together with the monitor it belongs to.
    pub fn validate(&self) -> core::result::Result<(), (MonitorKind, crate::error::Error)> {
        for kind in [
            MonitorKind::Vigilance,
            MonitorKind::Overspeed,
            MonitorKind::EmergencyStop,
            MonitorKind::Aws,
        ] {
            if let Some(device) = self.monitor(kind) {
                device.validate().map_err(|e| (kind, e))?;
            }
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
