//! tcs-sim: drive a train control unit against a simulated locomotive.
//!
//! ```text
//!  tcs-sim [config.json]
//! ```
//!
//! The run: accelerate, acknowledge the alerter once, then ignore it.  The
//! vigilance device escalates to a penalty brake, the train stops and the
//! penalty releases.  Every change of the cab display is printed.
//!
//! Logging goes through `log`; set `RUST_LOG=debug` for supervisor detail.

use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use tracing_subscriber::EnvFilter;

use traincontrol::adapters::fanout::EventHandlers;
use traincontrol::adapters::log_sink::LogEventSink;
use traincontrol::adapters::sim::{BrakeState, SimLocomotive};
use traincontrol::app::context::CabDisplay;
use traincontrol::app::ports::LocomotivePort;
use traincontrol::app::service::TrainControlUnit;
use traincontrol::config::{MonitoringDevice, SupervisorConfig};
use traincontrol::lookahead::{Aspect, TrackObject};

const TICK_S: f32 = 0.5;
const RUN_S: f64 = 240.0;
const CRUISE_MPS: f32 = 22.0;
/// The driver acknowledges the alerter once, at this time.
const ACK_AT_S: f64 = 30.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => demo_config(),
    };
    info!("tcs-sim v{}", env!("CARGO_PKG_VERSION"));

    let mut loco = SimLocomotive::new(33.0).with_objects(vec![
        TrackObject::speed_post(25.0, 1200.0),
        TrackObject::signal(20.0, Aspect::Approach1, 2000.0),
        TrackObject::signal(-1.0, Aspect::Clear2, 3500.0),
    ]);
    let mut handlers = EventHandlers::new();
    handlers.push(Box::new(LogEventSink::new()));

    let mut unit = TrainControlUnit::new(config);
    unit.initialize(&mut loco, &mut handlers);

    let mut shown = *unit.display();
    let mut acknowledged = false;
    while loco.clock_time_s() < RUN_S {
        let status = unit.status();
        drive(&mut loco, status.vigilance_emergency || status.overspeed_alarm);
        loco.step(TICK_S);

        if !acknowledged && loco.clock_time_s() >= ACK_AT_S {
            unit.alerter_pressed(true, &mut loco, &mut handlers);
            unit.alerter_pressed(false, &mut loco, &mut handlers);
            acknowledged = true;
            println!("{:>7.1}s  driver acknowledges alerter", loco.clock_time_s());
        }

        unit.update(&mut loco, &mut handlers);

        let display = *unit.display();
        if display != shown {
            print_changes(loco.clock_time_s(), loco.speed_mps(), &shown, &display);
            shown = display;
        }
    }

    let status = unit.status();
    println!(
        "end: t={:.1}s  x={:.0}m  v={:.1}m/s  brake={:?}  alarm={}  emergency={}",
        loco.clock_time_s(),
        loco.distance_m(),
        loco.speed_mps(),
        loco.brake_state(),
        status.vigilance_alarm,
        status.vigilance_emergency,
    );
    Ok(())
}

fn load_config(path: &Path) -> Result<SupervisorConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config = SupervisorConfig::from_json(&text)
        .with_context(|| format!("parsing {}", path.display()))?;
    info!("configuration loaded from {}", path.display());
    Ok(config)
}

fn demo_config() -> SupervisorConfig {
    SupervisorConfig {
        vigilance: Some(MonitoringDevice {
            penalty_time_s: 10.0,
            ..MonitoringDevice::default()
        }),
        overspeed: Some(MonitoringDevice {
            trigger_on_track_overspeed: true,
            reset_on_reset_button: true,
            ..MonitoringDevice::default()
        }),
        emergency_stop: Some(MonitoringDevice {
            applies_emergency_brake: true,
            ..MonitoringDevice::default()
        }),
        emergency_causes_throttle_down: true,
        ..SupervisorConfig::default()
    }
}

/// A driver who holds cruise speed and releases the brake once the
/// penalty is no longer enforced.
fn drive(loco: &mut SimLocomotive, penalty_held: bool) {
    if loco.brake_state() != BrakeState::Released {
        loco.set_throttle(0.0);
        if loco.speed_mps() == 0.0 && !penalty_held {
            loco.release_brakes();
        }
        return;
    }
    let throttle = if loco.speed_mps() < CRUISE_MPS { 0.6 } else { 0.0 };
    loco.set_throttle(throttle);
}

fn print_changes(now: f64, speed: f32, old: &CabDisplay, new: &CabDisplay) {
    let on_off = |on: bool| if on { "ON" } else { "off" };
    let prefix = format!("{now:>7.1}s  v={speed:>5.1}m/s ");

    if old.vigilance_alarm != new.vigilance_alarm {
        println!("{prefix} vigilance alarm {}", on_off(new.vigilance_alarm));
    }
    if old.vigilance_emergency != new.vigilance_emergency {
        println!("{prefix} vigilance emergency {}", on_off(new.vigilance_emergency));
    }
    if old.overspeed_warning != new.overspeed_warning {
        println!("{prefix} overspeed warning {}", on_off(new.overspeed_warning));
    }
    if old.penalty_application != new.penalty_application {
        println!("{prefix} penalty {}", on_off(new.penalty_application));
    }
    if old.current_speed_limit_mps != new.current_speed_limit_mps {
        println!("{prefix} limit {:.1} m/s", new.current_speed_limit_mps);
    }
    if old.next_speed_limit_mps != new.next_speed_limit_mps {
        println!("{prefix} next limit {:.1} m/s", new.next_speed_limit_mps);
    }
    if old.next_signal_aspect != new.next_signal_aspect {
        println!("{prefix} next aspect {:?}", new.next_signal_aspect);
    }
}
