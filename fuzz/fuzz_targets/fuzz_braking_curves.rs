//! Fuzz target: braking curve functions
//!
//! Feeds arbitrary (including non-finite) inputs into the speed and
//! distance curves.  They must never panic and the speed curve must never
//! return a negative speed for non-NaN inputs.
//!
//! cargo fuzz run fuzz_braking_curves

#![no_main]

use libfuzzer_sys::fuzz_target;
use traincontrol::braking::{distance_curve, speed_curve, try_speed_curve};

fn take(data: &[u8], i: usize) -> f32 {
    data.get(i * 4..i * 4 + 4)
        .map_or(0.0, |b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

fuzz_target!(|data: &[u8]| {
    let d = take(data, 0);
    let v = take(data, 1);
    let slope = take(data, 2);
    let delay = take(data, 3);
    let decel = take(data, 4);

    let speed = speed_curve(d, v, slope, delay, decel);
    if [d, v, slope, delay, decel].iter().all(|x| x.is_finite()) && !speed.is_nan() {
        assert!(speed >= 0.0, "negative permitted speed {speed}");
    }

    let _ = distance_curve(v, speed, slope, delay, decel);
    let _ = try_speed_curve(d, v, slope, delay, decel);
});
