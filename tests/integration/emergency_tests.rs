//! External emergency requests and penalty side effects.

use traincontrol::app::service::TrainControlUnit;
use traincontrol::config::{MonitoringDevice, SupervisorConfig};

use crate::mock_loco::{LocoCall, MockLocomotive, RecordingSink, run_until};

fn emergency_config(applies_emergency_brake: bool) -> SupervisorConfig {
    SupervisorConfig {
        emergency_stop: Some(MonitoringDevice {
            applies_emergency_brake,
            emergency_cuts_power: true,
            emergency_shuts_down_engine: true,
            ..MonitoringDevice::default()
        }),
        emergency_causes_throttle_down: true,
        emergency_engages_horn: true,
        ..SupervisorConfig::default()
    }
}

#[test]
fn side_effects_fire_once_per_engagement() {
    let mut unit = TrainControlUnit::new(emergency_config(true));
    let mut loco = MockLocomotive::new(40.0);
    let mut sink = RecordingSink::default();
    unit.initialize(&mut loco, &mut sink);

    unit.set_emergency(&mut loco, &mut sink);
    unit.set_emergency(&mut loco, &mut sink);

    assert_eq!(
        loco.calls,
        vec![
            LocoCall::EmergencyBrake,
            LocoCall::Throttle(0.0),
            LocoCall::PantographsDown,
            LocoCall::ShutDownEngine,
            LocoCall::Horn(true),
        ]
    );
    assert!(unit.display().penalty_application);
}

#[test]
fn monitor_without_emergency_brake_uses_full_service() {
    let mut unit = TrainControlUnit::new(emergency_config(false));
    let mut loco = MockLocomotive::new(40.0);
    let mut sink = RecordingSink::default();
    unit.initialize(&mut loco, &mut sink);

    unit.set_emergency(&mut loco, &mut sink);
    assert_eq!(loco.full_brake_count(), 1);
    assert_eq!(loco.emergency_brake_count(), 0);
    assert_eq!(loco.count(&LocoCall::Horn(true)), 1);

    unit.set_emergency(&mut loco, &mut sink);
    assert_eq!(loco.full_brake_count(), 1);
    assert_eq!(loco.count(&LocoCall::Horn(true)), 1);
}

#[test]
fn no_side_effects_when_already_in_emergency() {
    let mut unit = TrainControlUnit::new(emergency_config(true));
    let mut loco = MockLocomotive::new(40.0);
    let mut sink = RecordingSink::default();
    unit.initialize(&mut loco, &mut sink);
    loco.brake_emergency = true;

    unit.set_emergency(&mut loco, &mut sink);
    assert!(loco.calls.is_empty());
    assert!(unit.display().penalty_application);
}

#[test]
fn without_monitor_the_emergency_brake_is_used() {
    let mut unit = TrainControlUnit::new(SupervisorConfig::default());
    let mut loco = MockLocomotive::new(40.0);
    let mut sink = RecordingSink::default();
    unit.initialize(&mut loco, &mut sink);

    unit.set_emergency(&mut loco, &mut sink);
    assert_eq!(loco.calls, vec![LocoCall::EmergencyBrake]);
}

#[test]
fn before_initialization_only_the_brake_is_applied() {
    let mut unit = TrainControlUnit::new(emergency_config(false));
    let mut loco = MockLocomotive::new(40.0);
    let mut sink = RecordingSink::default();

    unit.set_emergency(&mut loco, &mut sink);
    assert_eq!(loco.calls, vec![LocoCall::EmergencyBrake]);
    assert!(!unit.display().penalty_application);
}

#[test]
fn penalty_display_clears_after_brake_release() {
    let mut unit = TrainControlUnit::new(SupervisorConfig::default());
    let mut loco = MockLocomotive::new(40.0);
    let mut sink = RecordingSink::default();
    unit.initialize(&mut loco, &mut sink);
    unit.set_emergency(&mut loco, &mut sink);

    run_until(&mut unit, &mut loco, &mut sink, 1.0);
    assert!(unit.display().penalty_application);

    loco.release_brakes();
    run_until(&mut unit, &mut loco, &mut sink, 2.0);
    assert!(!unit.display().penalty_application);
}
