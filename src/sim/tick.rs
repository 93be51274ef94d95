//! Fixed timestep simulation tick
//!
//! Core loop body that advances the simulation deterministically.

use super::state::SimulationState;
use super::{horn, overspeed, particles, signs, speed};
use crate::audio::AudioSink;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Accelerate key held
    pub accelerate: bool,
    /// Decelerate key held
    pub decelerate: bool,
    /// Horn pressed since the last tick (one-shot)
    pub horn: bool,
    /// Clock reading used by the sign spawner
    pub now_ms: u64,
}

/// Advance the simulation by one fixed timestep
///
/// Components run in a fixed order: speed, signs, particles, overspeed, horn.
pub fn tick<A: AudioSink + ?Sized>(state: &mut SimulationState, input: &TickInput, audio: &mut A) {
    state.time_ticks += 1;

    state.speed = speed::integrate(
        state.speed,
        input.accelerate,
        input.decelerate,
        &state.tuning.speed,
    );
    state.scroll_road();

    signs::update(state, input.now_ms);

    particles::advance(&mut state.horn_particles);
    particles::advance(&mut state.spark_particles);

    overspeed::update(state, audio);

    horn::update(state, input.horn, audio);
}
