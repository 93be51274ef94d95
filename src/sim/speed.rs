//! Speed controller

use crate::consts::{MAX_SPEED, MIN_SPEED};
use crate::tuning::SpeedModel;

/// Integrate one tick of speed from the held keys
///
/// With both keys held, accelerate wins if the model gives it priority and
/// the two steps cancel otherwise. Drag only applies with no key held. The
/// result is clamped to `[MIN_SPEED, MAX_SPEED]`.
pub fn integrate(speed: f32, accelerate: bool, decelerate: bool, model: &SpeedModel) -> f32 {
    let next = if accelerate && decelerate && !model.accelerate_priority {
        speed + model.accel_step - model.decel_step
    } else if accelerate {
        speed + model.accel_step
    } else if decelerate {
        speed - model.decel_step
    } else if speed > MIN_SPEED {
        speed - model.drag_step
    } else {
        speed
    };

    if next.is_finite() {
        next.clamp(MIN_SPEED, MAX_SPEED)
    } else {
        MIN_SPEED
    }
}
