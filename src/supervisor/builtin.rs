//! Built-in train control system.
//!
//! Two independent escalation tracks evaluated every tick:
//!
//! * **Vigilance**: the driver must acknowledge the alerter within
//!   `alarm_time_s`; after `monitor_time_s` a penalty brake is applied and
//!   held until the train stands still and `penalty_time_s` has passed.
//! * **Overspeed**: exceeding a trigger speed raises a warning; if it
//!   persists for the alarm delay, a penalty brake is applied under the
//!   same release rule.
//!
//! Each stage is driven by a [`Timer`] against the host clock, so the
//! supervisor keeps no per-tick counters and tolerates variable tick
//! lengths.

use log::{debug, error, info};

use crate::app::commands::TcsCommand;
use crate::app::ports::SupervisorPort;
use crate::config::{BrakePolicy, MonitoringDevice, SupervisorConfig, BUILTIN_SYSTEM_NAME};
use crate::timer::Timer;

use super::stage::{EscalationTrack, Stage};
use super::{STANDSTILL_MPS, SupervisorStatus, TrainControlSystem};

/// Vigilance and overspeed supervisor.
#[derive(Debug, Clone)]
pub struct BuiltinSupervisor {
    vigilance_monitor: Option<MonitoringDevice>,
    overspeed_monitor: Option<MonitoringDevice>,
    emergency_stop_monitor: Option<MonitoringDevice>,
    /// Carried for alternative systems built on this one; not acted on.
    aws_monitor: Option<MonitoringDevice>,
    emergency_causes_throttle_down: bool,
    emergency_engages_horn: bool,

    vigilance_alarm_timer: Timer,
    vigilance_emergency_timer: Timer,
    vigilance_penalty_timer: Timer,
    overspeed_alarm_timer: Timer,
    overspeed_penalty_timer: Timer,

    vigilance_alarm: bool,
    vigilance_emergency: bool,
    overspeed_warning: bool,
    overspeed_alarm: bool,
    penalty_application: bool,

    current_speed_limit_mps: f32,
    vigilance_track: EscalationTrack,
    overspeed_track: EscalationTrack,
    activated: bool,
}

impl BuiltinSupervisor {
    pub fn new(config: &SupervisorConfig) -> Self {
        let vigilance = config.vigilance.as_ref();
        let overspeed = config.overspeed.as_ref();

        Self {
            vigilance_monitor: config.vigilance.clone(),
            overspeed_monitor: config.overspeed.clone(),
            emergency_stop_monitor: config.emergency_stop.clone(),
            aws_monitor: config.aws.clone(),
            emergency_causes_throttle_down: config.emergency_causes_throttle_down,
            emergency_engages_horn: config.emergency_engages_horn,

            vigilance_alarm_timer: Timer::with_duration(vigilance.map_or(0.0, |m| m.alarm_time_s)),
            vigilance_emergency_timer: Timer::with_duration(
                vigilance.map_or(0.0, MonitoringDevice::alarm_timeout_s),
            ),
            vigilance_penalty_timer: Timer::with_duration(
                vigilance.map_or(0.0, |m| m.penalty_time_s),
            ),
            overspeed_alarm_timer: Timer::with_duration(
                overspeed.map_or(0.0, MonitoringDevice::overspeed_alarm_delay_s),
            ),
            overspeed_penalty_timer: Timer::with_duration(
                overspeed.map_or(0.0, |m| m.penalty_time_s),
            ),

            vigilance_alarm: false,
            vigilance_emergency: false,
            overspeed_warning: false,
            overspeed_alarm: false,
            penalty_application: false,

            current_speed_limit_mps: 0.0,
            vigilance_track: EscalationTrack::new("vigilance"),
            overspeed_track: EscalationTrack::new("overspeed"),
            activated: false,
        }
    }

    /// [`SystemFactory`](super::SystemFactory) for the built-in system.
    pub fn factory(config: &SupervisorConfig) -> Box<dyn TrainControlSystem> {
        Box::new(Self::new(config))
    }

    /// Limit computed on the last update (m/s).
    pub fn current_speed_limit_mps(&self) -> f32 {
        self.current_speed_limit_mps
    }

    pub fn aws_monitor(&self) -> Option<&MonitoringDevice> {
        self.aws_monitor.as_ref()
    }

    /// Stage history of the vigilance track.
    pub fn vigilance_track(&self) -> &EscalationTrack {
        &self.vigilance_track
    }

    pub fn overspeed_track(&self) -> &EscalationTrack {
        &self.overspeed_track
    }

    // ── Vigilance ─────────────────────────────────────────────────

    fn update_vigilance(&mut self, port: &mut dyn SupervisorPort) {
        let speed = port.speed_mps();
        let Some((policy, auto_reset)) = self
            .vigilance_monitor
            .as_ref()
            .map(|m| (m.brake_policy(), m.auto_resets_at(speed)))
        else {
            return;
        };

        if port.alerter_sound() && !port.is_alerter_enabled() {
            self.handle_event(TcsCommand::AlerterPressed, port);
        }

        let now = port.clock_time_s();
        self.vigilance_alarm = self.vigilance_alarm_timer.triggered(now);
        self.vigilance_emergency = self.vigilance_emergency_timer.triggered(now);

        if self.vigilance_emergency {
            port.set_penalty_application_display(true);
            self.apply_penalty(policy, port);

            if !self.vigilance_penalty_timer.started() {
                self.vigilance_penalty_timer.start(now);
            }
            if port.alerter_sound() {
                port.set_vigilance_alarm(false);
            }
            if speed < STANDSTILL_MPS && self.vigilance_penalty_timer.triggered(now) {
                self.release_vigilance(now);
            }
        } else if self.vigilance_alarm {
            if auto_reset {
                self.handle_event(TcsCommand::AlerterPressed, port);
            } else {
                if !self.vigilance_emergency_timer.started() {
                    self.vigilance_emergency_timer.start(now);
                }
                if !port.alerter_sound() {
                    port.set_vigilance_alarm(true);
                }
            }
        } else {
            self.vigilance_emergency_timer.stop();
            if self.vigilance_penalty_timer.triggered(now) {
                self.vigilance_penalty_timer.stop();
            }
        }

        port.set_vigilance_alarm_display(self.vigilance_alarm);
        port.set_vigilance_emergency_display(self.vigilance_emergency);
        self.sync_vigilance_stage(now);
    }

    /// Acknowledge: restart the alarm timer and cancel a pending escalation.
    fn restart_vigilance(&mut self, now: f64, port: &mut dyn SupervisorPort) {
        self.vigilance_alarm_timer.start(now);
        self.vigilance_emergency_timer.stop();
        self.vigilance_alarm = self.vigilance_alarm_timer.triggered(now);
        if port.alerter_sound() {
            port.set_vigilance_alarm(false);
        }
        port.set_vigilance_alarm_display(self.vigilance_alarm);
        self.sync_vigilance_stage(now);
    }

    /// Leave the emergency stage after a completed penalty at standstill.
    fn release_vigilance(&mut self, now: f64) {
        self.vigilance_emergency_timer.stop();
        self.vigilance_penalty_timer.stop();
        self.vigilance_alarm_timer.start(now);
        self.vigilance_alarm = false;
        self.vigilance_emergency = false;
    }

    /// A reset may cut a vigilance penalty short once the speed-based
    /// auto-reset condition holds.
    fn vigilance_reset_allowed(&self, speed: f32) -> bool {
        self.vigilance_monitor
            .as_ref()
            .is_some_and(|m| m.auto_resets_at(speed))
    }

    fn sync_vigilance_stage(&mut self, now: f64) {
        let stage = if self.vigilance_emergency {
            Stage::Emergency
        } else if self.vigilance_alarm {
            Stage::Alarm
        } else {
            Stage::Idle
        };
        self.vigilance_track.enter(stage, now);
    }

    // ── Overspeed ─────────────────────────────────────────────────

    fn update_speed_control(&mut self, port: &mut dyn SupervisorPort) {
        let Some(monitor) = self.overspeed_monitor.as_ref() else {
            return;
        };
        let speed = port.speed_mps();
        let policy = monitor.brake_policy();

        let mut warning = false;
        if monitor.trigger_on_overspeed_mps > 0.0 {
            warning |= speed > monitor.trigger_on_overspeed_mps;
        }
        if monitor.critical_level_mps > 0.0 {
            warning |= speed > monitor.critical_level_mps;
        }
        if monitor.trigger_on_track_overspeed {
            warning |= speed
                > self.current_speed_limit_mps + monitor.trigger_on_track_overspeed_margin_mps;
        }

        let now = port.clock_time_s();
        self.overspeed_warning = warning;
        port.set_overspeed_warning_display(warning);
        self.overspeed_alarm = self.overspeed_alarm_timer.triggered(now);

        if self.overspeed_alarm && port.is_alerter_enabled() {
            port.set_penalty_application_display(true);
            self.apply_penalty(policy, port);

            if !self.overspeed_penalty_timer.started() {
                self.overspeed_penalty_timer.start(now);
            }
            if speed < STANDSTILL_MPS && self.overspeed_penalty_timer.triggered(now) {
                self.overspeed_alarm_timer.stop();
                self.overspeed_penalty_timer.stop();
                self.overspeed_alarm = false;
            }
        } else if warning {
            if !self.overspeed_alarm_timer.started() {
                self.overspeed_alarm_timer.start(now);
            }
        } else {
            self.overspeed_alarm_timer.stop();
            self.overspeed_alarm = false;
            if self.overspeed_penalty_timer.triggered(now) {
                self.overspeed_penalty_timer.stop();
            }
        }

        let stage = if self.overspeed_alarm {
            Stage::Alarm
        } else if self.overspeed_warning {
            Stage::Warning
        } else {
            Stage::Idle
        };
        self.overspeed_track.enter(stage, now);
    }

    // ── Braking ───────────────────────────────────────────────────

    fn apply_penalty(&mut self, policy: BrakePolicy, port: &mut dyn SupervisorPort) {
        match policy {
            BrakePolicy::Emergency => self.set_emergency(port),
            BrakePolicy::FullService => {
                if !port.is_brake_full_service() && !port.is_brake_emergency() {
                    error!("penalty: full service brake");
                    port.set_full_brake();
                }
            }
            BrakePolicy::None => {}
        }
    }
}

impl TrainControlSystem for BuiltinSupervisor {
    fn name(&self) -> &str {
        BUILTIN_SYSTEM_NAME
    }

    fn initialize(&mut self, port: &mut dyn SupervisorPort) {
        let now = port.clock_time_s();
        if self.vigilance_monitor.is_some() {
            self.vigilance_alarm_timer.start(now);
        }
        self.activated = true;
        info!(
            "built-in train control active (vigilance={}, overspeed={}, emergency stop={})",
            self.vigilance_monitor.is_some(),
            self.overspeed_monitor.is_some(),
            self.emergency_stop_monitor.is_some(),
        );
    }

    fn update(&mut self, port: &mut dyn SupervisorPort) {
        let aspect = port.next_signal_aspect(0);
        port.set_next_signal_aspect(aspect);

        let train_limit = port.train_speed_limit_mps();
        let signal_limit = port.current_signal_speed_limit_mps();
        self.current_speed_limit_mps = if signal_limit >= 0.0 {
            signal_limit.min(train_limit)
        } else {
            train_limit
        };
        port.set_current_speed_limit_mps(self.current_speed_limit_mps);

        let next_signal_limit = port.next_signal_speed_limit_mps(0);
        let next_limit = if (0.0..train_limit).contains(&next_signal_limit) {
            next_signal_limit
        } else {
            train_limit
        };
        port.set_next_speed_limit_mps(next_limit);

        self.update_vigilance(port);
        self.update_speed_control(port);

        self.penalty_application = self.vigilance_emergency
            || (self.overspeed_alarm && port.is_alerter_enabled());
        if !port.is_brake_emergency() && !port.is_brake_full_service() {
            port.set_penalty_application_display(false);
        }
    }

    fn handle_event(&mut self, command: TcsCommand, port: &mut dyn SupervisorPort) {
        match command {
            TcsCommand::AlerterPressed | TcsCommand::AlerterReleased | TcsCommand::AlerterReset => {
                if !self.activated {
                    debug!("{command:?} before activation, ignored");
                    return;
                }
                let now = port.clock_time_s();

                if self.vigilance_emergency {
                    if !self.vigilance_reset_allowed(port.speed_mps()) {
                        debug!("{command:?} during vigilance penalty, ignored");
                        return;
                    }
                    self.release_vigilance(now);
                    port.set_vigilance_emergency_display(false);
                }

                if self.vigilance_monitor.is_some() {
                    self.restart_vigilance(now, port);
                }

                let restarts_overspeed = self
                    .overspeed_monitor
                    .as_ref()
                    .is_some_and(|m| m.reset_on_reset_button);
                if self.overspeed_warning && restarts_overspeed {
                    self.overspeed_alarm_timer.start(now);
                }
            }
        }
    }

    fn set_emergency(&mut self, port: &mut dyn SupervisorPort) {
        port.set_penalty_application_display(true);

        let stop_monitor = self.emergency_stop_monitor.as_ref();
        let engaged = if stop_monitor.is_some_and(|m| !m.applies_emergency_brake) {
            if port.is_brake_full_service() || port.is_brake_emergency() {
                false
            } else {
                port.set_full_brake();
                true
            }
        } else if port.is_brake_emergency() {
            false
        } else {
            port.set_emergency_brake();
            true
        };
        if !engaged {
            return;
        }

        error!("emergency stop engaged");
        if self.emergency_causes_throttle_down {
            port.set_throttle(0.0);
        }
        if let Some(monitor) = stop_monitor {
            if monitor.emergency_cuts_power {
                port.set_pantographs_down();
            }
            if monitor.emergency_shuts_down_engine {
                port.shut_down_engine();
            }
        }
        if self.emergency_engages_horn {
            port.set_horn(true);
        }
    }

    fn status(&self) -> SupervisorStatus {
        SupervisorStatus {
            activated: self.activated,
            vigilance_alarm: self.vigilance_alarm,
            vigilance_emergency: self.vigilance_emergency,
            overspeed_warning: self.overspeed_warning,
            overspeed_alarm: self.overspeed_alarm,
            penalty_application: self.penalty_application,
        }
    }
}
