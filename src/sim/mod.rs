//! Deterministic simulation module
//!
//! All driving logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (signs and particles keep insertion order)
//! - No rendering or platform dependencies; audio goes through `AudioSink`

pub mod autopilot;
pub mod horn;
pub mod overspeed;
pub mod particles;
pub mod signs;
pub mod speed;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use overspeed::is_overspeed;
pub use particles::{Particle, particle_alpha};
pub use signs::{Sign, SignKind};
pub use state::SimulationState;
pub use tick::{TickInput, tick};
