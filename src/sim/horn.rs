//! Horn subsystem
//!
//! Reacts to discrete horn presses. Inside a no-horn zone a press is a
//! violation; debounced variants ignore repeat violations until the warning
//! timer runs out.

use glam::Vec2;

use super::particles::spawn_burst;
use super::state::SimulationState;
use crate::audio::{AudioSink, Cue, emit};
use crate::consts::{CAR_Y, SCREEN_WIDTH};
use crate::palette::VIOLATION_RED;

/// Result of a horn press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HornOutcome {
    /// Horn disabled in this variant
    Ignored,
    /// Outside a no-horn zone
    Honked,
    /// Inside a no-horn zone, warning raised
    Violation,
    /// Inside a no-horn zone while the previous warning still runs
    Suppressed,
}

/// Fixed spot where the violation burst appears, just above the car
pub fn violation_origin() -> Vec2 {
    Vec2::new(SCREEN_WIDTH / 2.0, CAR_Y - 20.0)
}

/// Handle one horn press
pub fn press<A: AudioSink + ?Sized>(state: &mut SimulationState, audio: &mut A) -> HornOutcome {
    let Some(horn) = state.tuning.horn else {
        return HornOutcome::Ignored;
    };

    if !state.no_horn_zone {
        emit(audio, Cue::HornNormal);
        return HornOutcome::Honked;
    }

    if horn.debounce && state.horn_warning_timer > 0 {
        return HornOutcome::Suppressed;
    }

    state.horn_warning_timer = horn.warning_ticks;
    if horn.burst {
        spawn_burst(
            &mut state.horn_particles,
            violation_origin(),
            VIOLATION_RED,
            &mut state.rng,
        );
    }
    emit(audio, Cue::HornViolation);
    log::debug!("Horn violation at tick {}", state.time_ticks);
    HornOutcome::Violation
}

/// Count the warning timer down one tick
pub fn cool_down(state: &mut SimulationState) {
    state.horn_warning_timer = state.horn_warning_timer.saturating_sub(1);
}

/// One tick of the horn subsystem
pub fn update<A: AudioSink + ?Sized>(
    state: &mut SimulationState,
    pressed: bool,
    audio: &mut A,
) -> Option<HornOutcome> {
    let outcome = pressed.then(|| press(state, audio));
    cool_down(state);
    outcome
}
