//! Simulation state
//!
//! Everything a tick reads or writes lives in [`SimulationState`], including
//! the RNG, so a state plus an input sequence fully determines the run.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::particles::Particle;
use super::signs::Sign;
use crate::consts::*;
use crate::tuning::Tuning;

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance this run uses
    pub tuning: Tuning,
    /// Simulation tick counter
    pub time_ticks: u64,

    /// Car speed in km/h, always within [MIN_SPEED, MAX_SPEED]
    pub speed: f32,
    /// Active speed limit
    pub speed_limit: u32,
    /// Clock reading (ms) of the last sign spawn
    pub last_sign_spawn_ms: u64,
    /// Ticks until the overspeed beep may fire again
    pub beep_cooldown: u32,
    /// True while a no-horn sign is on screen
    pub no_horn_zone: bool,
    /// Ticks left on the horn violation warning
    pub horn_warning_timer: u32,
    /// Speed above the limit this tick
    pub overspeeding: bool,
    /// Centre-line dash scroll in pixels
    pub lane_offset: f32,

    /// Active signs in spawn order
    pub signs: Vec<Sign>,
    /// Burst shown on a horn violation
    pub horn_particles: Vec<Particle>,
    /// Burst shown when the overspeed beep fires
    pub spark_particles: Vec<Particle>,

    pub(crate) rng: Pcg32,
}

impl SimulationState {
    /// Create a new state with the given seed and balance
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            tuning,
            time_ticks: 0,
            speed: MIN_SPEED,
            speed_limit: DEFAULT_SPEED_LIMIT,
            last_sign_spawn_ms: 0,
            beep_cooldown: 0,
            no_horn_zone: false,
            horn_warning_timer: 0,
            overspeeding: false,
            lane_offset: 0.0,
            signs: Vec::new(),
            horn_particles: Vec::new(),
            spark_particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Speed as shown on the HUD (truncated)
    pub fn display_speed(&self) -> u32 {
        self.speed as u32
    }

    /// Horn violation warning still showing
    pub fn horn_warning_active(&self) -> bool {
        self.horn_warning_timer > 0
    }

    /// Advance the road dash scroll
    pub fn scroll_road(&mut self) {
        self.lane_offset += self.speed * self.tuning.road_scroll_factor;
        if self.lane_offset > LANE_DASH_SPACING {
            self.lane_offset = 0.0;
        }
    }
}
