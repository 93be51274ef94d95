//! Overspeed monitor
//!
//! Rate-limited alert: while the car is over the limit the beep fires
//! whenever the cooldown is zero, then the cooldown restarts. The cooldown
//! counts down every tick whether or not the car is overspeeding.

use glam::Vec2;

use super::particles::spawn_burst;
use super::state::SimulationState;
use crate::audio::{AudioSink, Cue, emit};
use crate::consts::{CAR_WIDTH, CAR_X, CAR_Y};
use crate::palette::SPARK_ORANGE;

/// Warning predicate
#[inline]
pub fn is_overspeed(speed: f32, limit: u32) -> bool {
    speed > limit as f32
}

/// Where overspeed sparks appear (the car's bonnet)
pub fn spark_origin() -> Vec2 {
    Vec2::new(CAR_X + CAR_WIDTH / 2.0, CAR_Y)
}

/// One tick of the monitor
///
/// Returns true if the beep fired this tick.
pub fn update<A: AudioSink + ?Sized>(state: &mut SimulationState, audio: &mut A) -> bool {
    state.overspeeding = is_overspeed(state.speed, state.speed_limit);

    let mut fired = false;
    if state.overspeeding && state.beep_cooldown == 0 {
        emit(audio, Cue::OverspeedBeep);
        state.beep_cooldown = state.tuning.beep_cooldown_ticks;
        if state.tuning.overspeed_sparks {
            spawn_burst(
                &mut state.spark_particles,
                spark_origin(),
                SPARK_ORANGE,
                &mut state.rng,
            );
        }
        fired = true;
    }

    state.beep_cooldown = state.beep_cooldown.saturating_sub(1);
    fired
}
