//! Control unit wiring: lookahead, display, event codes, configuration.

use traincontrol::app::service::TrainControlUnit;
use traincontrol::config::{BUILTIN_SYSTEM_NAME, MonitoringDevice, SupervisorConfig};
use traincontrol::lookahead::{Aspect, Direction, TrackObject};

use crate::mock_loco::{MockLocomotive, RecordingSink, run_until};

fn track() -> Vec<TrackObject> {
    vec![
        TrackObject::speed_post(30.0, 200.0),
        TrackObject::signal(20.0, Aspect::Approach1, 500.0),
        TrackObject::signal(-1.0, Aspect::Clear2, 1500.0),
    ]
}

#[test]
fn display_follows_lookahead() {
    let mut unit = TrainControlUnit::new(SupervisorConfig::default());
    let mut loco = MockLocomotive::new(40.0).with_forward(track());
    let mut sink = RecordingSink::default();
    unit.initialize(&mut loco, &mut sink);

    run_until(&mut unit, &mut loco, &mut sink, 1.0);
    let display = unit.display();
    assert_eq!(display.next_signal_aspect, Aspect::Approach1);
    assert_eq!(display.next_speed_limit_mps, 20.0);
    assert_eq!(display.current_speed_limit_mps, 40.0);
}

#[test]
fn next_limit_above_train_limit_shows_train_limit() {
    let mut unit = TrainControlUnit::new(SupervisorConfig::default());
    let mut loco = MockLocomotive::new(15.0).with_forward(track());
    let mut sink = RecordingSink::default();
    unit.initialize(&mut loco, &mut sink);

    loco.signal_limit = 25.0;
    run_until(&mut unit, &mut loco, &mut sink, 1.0);
    assert_eq!(unit.display().next_speed_limit_mps, 15.0);
    assert_eq!(unit.display().current_speed_limit_mps, 15.0);
}

#[test]
fn one_snapshot_per_tick() {
    let mut unit = TrainControlUnit::new(SupervisorConfig::default());
    let mut loco = MockLocomotive::new(40.0).with_forward(track());
    let mut sink = RecordingSink::default();
    unit.initialize(&mut loco, &mut sink);
    let before = loco.snapshots.get();

    run_until(&mut unit, &mut loco, &mut sink, 3.0);
    assert_eq!(loco.snapshots.get() - before, 3);
    assert_eq!(unit.tick_count(), 3);
}

#[test]
fn lookahead_sees_track_changes_on_the_next_tick() {
    let mut unit = TrainControlUnit::new(SupervisorConfig::default());
    let mut loco = MockLocomotive::new(40.0).with_forward(track());
    let mut sink = RecordingSink::default();
    unit.initialize(&mut loco, &mut sink);
    run_until(&mut unit, &mut loco, &mut sink, 1.0);

    loco.info.forward = vec![TrackObject::authority(300.0)];
    run_until(&mut unit, &mut loco, &mut sink, 2.0);
    assert_eq!(unit.display().next_signal_aspect, Aspect::Stop);
    assert_eq!(unit.display().next_speed_limit_mps, 0.0);
}

#[test]
fn direction_selects_object_list() {
    let mut unit = TrainControlUnit::new(SupervisorConfig::default());
    let mut loco = MockLocomotive::new(40.0).with_forward(track());
    loco.info.backward = vec![TrackObject::signal(10.0, Aspect::Restricted, 80.0)];
    loco.direction = Direction::Reverse;
    let mut sink = RecordingSink::default();
    unit.initialize(&mut loco, &mut sink);

    run_until(&mut unit, &mut loco, &mut sink, 1.0);
    assert_eq!(unit.display().next_signal_aspect, Aspect::Restricted);
    assert_eq!(unit.display().next_speed_limit_mps, 10.0);
}

#[test]
fn raw_event_codes() {
    let config = SupervisorConfig {
        vigilance: Some(MonitoringDevice::default()),
        ..SupervisorConfig::default()
    };
    let mut unit = TrainControlUnit::new(config);
    let mut loco = MockLocomotive::new(40.0);
    let mut sink = RecordingSink::default();
    loco.speed = 10.0;
    unit.initialize(&mut loco, &mut sink);
    run_until(&mut unit, &mut loco, &mut sink, 61.0);
    assert!(unit.status().vigilance_alarm);

    unit.handle_event_code(42, &mut loco, &mut sink);
    assert!(unit.status().vigilance_alarm);

    unit.handle_event_code(2, &mut loco, &mut sink);
    assert!(!unit.status().vigilance_alarm);
}

#[test]
fn json_configuration_drives_the_unit() {
    let config = SupervisorConfig::from_json(
        r#"{
            "vigilance": { "alarm_time_s": 10.0, "monitor_time_s": 15.0 },
            "system_name": "MSTS"
        }"#,
    )
    .expect("valid json");
    let mut unit = TrainControlUnit::new(config);
    let mut loco = MockLocomotive::new(40.0);
    let mut sink = RecordingSink::default();
    loco.speed = 10.0;
    unit.initialize(&mut loco, &mut sink);
    assert_eq!(unit.system_name(), Some(BUILTIN_SYSTEM_NAME));

    run_until(&mut unit, &mut loco, &mut sink, 10.0);
    assert!(unit.status().vigilance_alarm);
    run_until(&mut unit, &mut loco, &mut sink, 15.0);
    assert!(unit.status().vigilance_emergency);
    assert_eq!(loco.full_brake_count(), 1);
}

#[test]
fn invalid_configuration_still_runs() {
    let config = SupervisorConfig {
        vigilance: Some(MonitoringDevice {
            alarm_time_s: 30.0,
            monitor_time_s: 20.0,
            ..MonitoringDevice::default()
        }),
        ..SupervisorConfig::default()
    };
    assert!(config.validate().is_err());

    let mut unit = TrainControlUnit::new(config);
    let mut loco = MockLocomotive::new(40.0);
    let mut sink = RecordingSink::default();
    loco.speed = 10.0;
    unit.initialize(&mut loco, &mut sink);

    run_until(&mut unit, &mut loco, &mut sink, 30.0);
    assert!(unit.status().vigilance_alarm);
    run_until(&mut unit, &mut loco, &mut sink, 31.0);
    assert!(unit.status().vigilance_emergency);
}

#[test]
fn duplicate_starts_fresh() {
    let config = SupervisorConfig {
        vigilance: Some(MonitoringDevice::default()),
        ..SupervisorConfig::default()
    };
    let mut unit = TrainControlUnit::new(config);
    let mut loco = MockLocomotive::new(40.0);
    let mut sink = RecordingSink::default();
    loco.speed = 10.0;
    unit.initialize(&mut loco, &mut sink);
    run_until(&mut unit, &mut loco, &mut sink, 61.0);

    let mut copy = unit.duplicate();
    assert!(!copy.is_activated());
    assert!(!copy.status().vigilance_alarm);
    assert_eq!(copy.config(), unit.config());

    let mut other = MockLocomotive::new(40.0);
    other.speed = 10.0;
    other.now = 61.0;
    copy.initialize(&mut other, &mut sink);
    run_until(&mut copy, &mut other, &mut sink, 62.0);
    assert!(!copy.status().vigilance_alarm);
    assert!(unit.status().vigilance_alarm);
}
