//! Autopilot driver for headless runs
//!
//! Produces plausible inputs from the current state: cruise a little above
//! the limit now and then so the overspeed alert gets exercised, and sound
//! the horn on a fixed cadence.

use super::state::SimulationState;
use super::tick::TickInput;

/// Simple scripted driver
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Ticks between horn presses
    pub horn_every: u64,
    /// Ticks spent in each cruise phase (obey, then speed)
    pub phase_ticks: u64,
    /// How far over the limit to cruise during the speeding phase
    pub overspeed_margin: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            horn_every: 90,
            phase_ticks: 300,
            overspeed_margin: 10.0,
        }
    }
}

impl Autopilot {
    /// Target speed for the current tick
    pub fn target_speed(&self, state: &SimulationState) -> f32 {
        let speeding = (state.time_ticks / self.phase_ticks.max(1)) % 2 == 1;
        let limit = state.speed_limit as f32;
        if speeding {
            limit + self.overspeed_margin
        } else {
            limit - self.overspeed_margin / 2.0
        }
    }

    /// Inputs for the next tick
    pub fn input(&self, state: &SimulationState, now_ms: u64) -> TickInput {
        let target = self.target_speed(state);
        TickInput {
            accelerate: state.speed < target - 1.0,
            decelerate: state.speed > target + 1.0,
            horn: self.horn_every > 0 && state.time_ticks % self.horn_every == 0,
            now_ms,
        }
    }
}
