//! Traffic Signs - a scrolling-road driving simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (speed, signs, particles, alerts)
//! - `audio`: Tone cues behind the `AudioSink` capability
//! - `renderer`: WebGPU rendering pipeline and scene building
//! - `platform`: Fixed-step clock and input latching
//! - `settings`: User-facing configuration
//! - `tuning`: Data-driven balance, one preset per variant

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{Settings, Variant};
pub use tuning::Tuning;

/// Simulation configuration constants
///
/// Screen space is 800x600 with the origin top-left and y growing downward.
pub mod consts {
    /// Viewport dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Road occupies the middle third of the screen
    pub const ROAD_LEFT: f32 = SCREEN_WIDTH / 3.0;
    pub const ROAD_RIGHT: f32 = 2.0 * SCREEN_WIDTH / 3.0;

    /// Car body (top-left corner and size)
    pub const CAR_WIDTH: f32 = 60.0;
    pub const CAR_HEIGHT: f32 = 100.0;
    pub const CAR_X: f32 = SCREEN_WIDTH / 2.0 - CAR_WIDTH / 2.0;
    pub const CAR_Y: f32 = SCREEN_HEIGHT - 150.0;

    /// Speed bounds (km/h)
    pub const MIN_SPEED: f32 = 0.0;
    pub const MAX_SPEED: f32 = 120.0;

    /// Limit in force before any speed sign has been seen
    pub const DEFAULT_SPEED_LIMIT: u32 = 60;
    /// Limits a speed sign can carry
    pub const SPEED_LIMITS: [u32; 4] = [40, 60, 80, 100];

    /// Signs
    pub const SIGN_SPAWN_INTERVAL_MS: u64 = 5000;
    pub const SIGN_RADIUS: f32 = 40.0;
    pub const SIGN_SPAWN_Y: f32 = -60.0;
    pub const SPEED_SIGN_X: f32 = SCREEN_WIDTH - 150.0;
    pub const NO_HORN_SIGN_X: f32 = SCREEN_WIDTH - 200.0;

    /// Particles
    pub const PARTICLE_BURST: usize = 5;
    pub const PARTICLE_LIFE: u32 = 20;
    pub const PARTICLE_JITTER: f32 = 10.0;
    /// Per-collection cap
    pub const MAX_PARTICLES: usize = 256;

    /// Overspeed beep rate limit (ticks)
    pub const BEEP_COOLDOWN_TICKS: u32 = 30;

    /// Dash pattern of the centre line
    pub const LANE_DASH_SPACING: f32 = 80.0;
    pub const LANE_DASH_LENGTH: f32 = 40.0;

    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}

/// Particle and sign colors (RGB)
pub mod palette {
    pub const VIOLATION_RED: [u8; 3] = [255, 40, 40];
    pub const SPARK_ORANGE: [u8; 3] = [255, 160, 0];
}
