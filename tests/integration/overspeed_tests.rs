//! Overspeed supervision through the control unit.

use traincontrol::app::service::TrainControlUnit;
use traincontrol::config::{MonitoringDevice, SupervisorConfig};

use crate::mock_loco::{MockLocomotive, RecordingSink, run_until};

fn overspeed_device() -> MonitoringDevice {
    MonitoringDevice {
        trigger_on_overspeed_mps: 30.0,
        alarm_time_s: 0.0,
        alarm_time_before_overspeed_s: 5.0,
        applies_emergency_brake: true,
        ..MonitoringDevice::default()
    }
}

fn started(device: MonitoringDevice) -> (TrainControlUnit, MockLocomotive, RecordingSink) {
    let config = SupervisorConfig {
        overspeed: Some(device),
        ..SupervisorConfig::default()
    };
    let mut unit = TrainControlUnit::new(config);
    let mut loco = MockLocomotive::new(40.0);
    let mut sink = RecordingSink::default();
    unit.initialize(&mut loco, &mut sink);
    (unit, loco, sink)
}

#[test]
fn warning_then_penalty_after_delay() {
    let (mut unit, mut loco, mut sink) = started(overspeed_device());
    loco.speed = 32.0;

    run_until(&mut unit, &mut loco, &mut sink, 1.0);
    assert!(unit.display().overspeed_warning);
    assert!(!unit.status().overspeed_alarm);

    run_until(&mut unit, &mut loco, &mut sink, 5.0);
    assert!(!unit.status().overspeed_alarm);
    assert_eq!(loco.emergency_brake_count(), 0);

    run_until(&mut unit, &mut loco, &mut sink, 6.0);
    assert!(unit.status().overspeed_alarm);
    assert!(unit.display().penalty_application);
    assert_eq!(loco.emergency_brake_count(), 1);
}

#[test]
fn alarm_time_and_pre_overspeed_time_take_the_longer() {
    let device = MonitoringDevice {
        trigger_on_overspeed_mps: 30.0,
        alarm_time_s: 5.0,
        applies_emergency_brake: true,
        ..MonitoringDevice::default()
    };
    let (mut unit, mut loco, mut sink) = started(device.clone());
    loco.speed = 32.0;
    run_until(&mut unit, &mut loco, &mut sink, 1.0);
    assert!(unit.display().overspeed_warning);
    run_until(&mut unit, &mut loco, &mut sink, 5.0);
    assert!(!unit.status().overspeed_alarm);
    run_until(&mut unit, &mut loco, &mut sink, 6.0);
    assert!(unit.status().overspeed_alarm);
    assert_eq!(loco.emergency_brake_count(), 1);

    let (mut unit, mut loco, mut sink) = started(MonitoringDevice {
        alarm_time_s: 8.0,
        ..device
    });
    loco.speed = 32.0;
    run_until(&mut unit, &mut loco, &mut sink, 8.0);
    assert!(!unit.status().overspeed_alarm);
    run_until(&mut unit, &mut loco, &mut sink, 9.0);
    assert!(unit.status().overspeed_alarm);
}

#[test]
fn dropping_below_trigger_cancels_pending_alarm() {
    let (mut unit, mut loco, mut sink) = started(overspeed_device());
    loco.speed = 32.0;
    run_until(&mut unit, &mut loco, &mut sink, 3.0);

    loco.speed = 28.0;
    run_until(&mut unit, &mut loco, &mut sink, 4.0);
    assert!(!unit.display().overspeed_warning);

    loco.speed = 32.0;
    run_until(&mut unit, &mut loco, &mut sink, 9.0);
    assert!(!unit.status().overspeed_alarm);
    run_until(&mut unit, &mut loco, &mut sink, 10.0);
    assert!(unit.status().overspeed_alarm);
}

#[test]
fn penalty_releases_at_standstill_after_penalty_time() {
    let (mut unit, mut loco, mut sink) = started(MonitoringDevice {
        penalty_time_s: 3.0,
        ..overspeed_device()
    });
    loco.speed = 32.0;
    run_until(&mut unit, &mut loco, &mut sink, 6.0);
    assert!(unit.status().overspeed_alarm);

    loco.speed = 0.0;
    run_until(&mut unit, &mut loco, &mut sink, 8.0);
    assert!(unit.status().overspeed_alarm);

    run_until(&mut unit, &mut loco, &mut sink, 9.0);
    assert!(!unit.status().overspeed_alarm);
    assert!(!unit.display().overspeed_warning);
}

#[test]
fn reset_button_restarts_overspeed_delay() {
    let (mut unit, mut loco, mut sink) = started(MonitoringDevice {
        reset_on_reset_button: true,
        ..overspeed_device()
    });
    loco.speed = 32.0;
    run_until(&mut unit, &mut loco, &mut sink, 4.0);

    unit.alerter_pressed(true, &mut loco, &mut sink);
    run_until(&mut unit, &mut loco, &mut sink, 8.0);
    assert!(!unit.status().overspeed_alarm);
    run_until(&mut unit, &mut loco, &mut sink, 9.0);
    assert!(unit.status().overspeed_alarm);
}

#[test]
fn no_penalty_while_alerter_disabled() {
    let config = SupervisorConfig {
        overspeed: Some(overspeed_device()),
        alerter_enabled: false,
        ..SupervisorConfig::default()
    };
    let mut unit = TrainControlUnit::new(config);
    let mut loco = MockLocomotive::new(40.0);
    let mut sink = RecordingSink::default();
    unit.initialize(&mut loco, &mut sink);

    loco.speed = 32.0;
    run_until(&mut unit, &mut loco, &mut sink, 20.0);
    assert!(unit.status().overspeed_alarm);
    assert!(!unit.status().penalty_application);
    assert_eq!(loco.emergency_brake_count(), 0);
}

#[test]
fn track_trigger_follows_signal_limit() {
    let (mut unit, mut loco, mut sink) = started(MonitoringDevice {
        trigger_on_overspeed_mps: 0.0,
        trigger_on_track_overspeed: true,
        trigger_on_track_overspeed_margin_mps: 4.0,
        ..overspeed_device()
    });
    loco.signal_limit = 20.0;
    loco.speed = 23.0;
    run_until(&mut unit, &mut loco, &mut sink, 1.0);
    assert_eq!(unit.display().current_speed_limit_mps, 20.0);
    assert!(!unit.display().overspeed_warning);

    loco.speed = 25.0;
    run_until(&mut unit, &mut loco, &mut sink, 2.0);
    assert!(unit.display().overspeed_warning);
}

#[test]
fn critical_level_triggers_independently() {
    let (mut unit, mut loco, mut sink) = started(MonitoringDevice {
        trigger_on_overspeed_mps: 0.0,
        critical_level_mps: 35.0,
        ..overspeed_device()
    });
    loco.speed = 34.0;
    run_until(&mut unit, &mut loco, &mut sink, 1.0);
    assert!(!unit.display().overspeed_warning);

    loco.speed = 36.0;
    run_until(&mut unit, &mut loco, &mut sink, 2.0);
    assert!(unit.display().overspeed_warning);
}
