//! Braking curve math.
//!
//! Kinematics for a train that keeps its current speed for `delay_s`
//! seconds (driver and brake build-up time) and then decelerates at a
//! constant rate corrected for the track grade.  `slope` is the grade as a
//! fraction; positive values are falling grades that eat into the braking
//! deceleration.
//!
//! The plain functions never fail: a grade-adjusted deceleration at or
//! below zero saturates (see each function).  The `try_` variants report it
//! as [`BrakingError::NonPositiveDeceleration`] instead.

use crate::error::{BrakingError, Result};

/// Standard gravity (m/s²).
pub const GRAVITY_MPS2: f32 = 9.806_65;

/// Deceleration left after the gravitational component of the grade.
pub fn grade_adjusted_deceleration(deceleration_mps2: f32, slope: f32) -> f32 {
    deceleration_mps2 - GRAVITY_MPS2 * slope
}

/// Highest current speed from which the train still reaches
/// `target_speed_mps` at `target_distance_m`.
///
/// `sqrt(v² + (t·a)² + 2·d·a) − t·a`.  Returns the target speed when the
/// adjusted deceleration is not positive, and never returns less than zero.
pub fn speed_curve(
    target_distance_m: f32,
    target_speed_mps: f32,
    slope: f32,
    delay_s: f32,
    deceleration_mps2: f32,
) -> f32 {
    let target = target_speed_mps.max(0.0);
    let a = grade_adjusted_deceleration(deceleration_mps2, slope);
    if a <= 0.0 || a.is_nan() {
        return target;
    }

    let delay_component = delay_s * a;
    let square = target * target + delay_component * delay_component + 2.0 * target_distance_m * a;

    // A negative radicand means the target point is already behind us.
    (square.max(0.0).sqrt() - delay_component).max(0.0)
}

/// Distance needed to get from `current_speed_mps` down to
/// `target_speed_mps`, including the distance covered during the delay.
///
/// `(v0² − v1²) / (2a) + t·v0`.  With a non-positive adjusted deceleration
/// the train can never slow down: the result is `+∞` when `v0 > v1` and the
/// delay distance otherwise.
pub fn distance_curve(
    current_speed_mps: f32,
    target_speed_mps: f32,
    slope: f32,
    delay_s: f32,
    deceleration_mps2: f32,
) -> f32 {
    let target = target_speed_mps.max(0.0);
    let delay_distance_m = delay_s * current_speed_mps;
    let a = grade_adjusted_deceleration(deceleration_mps2, slope);
    if a <= 0.0 || a.is_nan() {
        return if current_speed_mps > target {
            f32::INFINITY
        } else {
            delay_distance_m
        };
    }

    let braking_distance_m =
        (current_speed_mps * current_speed_mps - target * target) / (2.0 * a);
    braking_distance_m + delay_distance_m
}

/// [`speed_curve`] that rejects a non-positive adjusted deceleration.
pub fn try_speed_curve(
    target_distance_m: f32,
    target_speed_mps: f32,
    slope: f32,
    delay_s: f32,
    deceleration_mps2: f32,
) -> Result<f32> {
    check_deceleration(deceleration_mps2, slope)?;
    Ok(speed_curve(
        target_distance_m,
        target_speed_mps,
        slope,
        delay_s,
        deceleration_mps2,
    ))
}

/// [`distance_curve`] that rejects a non-positive adjusted deceleration.
pub fn try_distance_curve(
    current_speed_mps: f32,
    target_speed_mps: f32,
    slope: f32,
    delay_s: f32,
    deceleration_mps2: f32,
) -> Result<f32> {
    check_deceleration(deceleration_mps2, slope)?;
    Ok(distance_curve(
        current_speed_mps,
        target_speed_mps,
        slope,
        delay_s,
        deceleration_mps2,
    ))
}

fn check_deceleration(deceleration_mps2: f32, slope: f32) -> Result<()> {
    if grade_adjusted_deceleration(deceleration_mps2, slope) > 0.0 {
        Ok(())
    } else {
        Err(BrakingError::NonPositiveDeceleration.into())
    }
}
