//! Decorative particle bursts
//!
//! Particles never affect gameplay. They move a fixed amount per tick (not
//! scaled by elapsed time) and live for [`PARTICLE_LIFE`] ticks.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_PARTICLES, PARTICLE_BURST, PARTICLE_JITTER, PARTICLE_LIFE};

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    /// Ticks remaining
    pub life: u32,
    pub color: [u8; 3],
}

/// Spawn a burst of [`PARTICLE_BURST`] particles around `origin`
///
/// Horizontal velocity is symmetric, vertical velocity always points up the
/// screen. The oldest particles are dropped if the burst would overflow
/// [`MAX_PARTICLES`].
pub fn spawn_burst<R: Rng>(
    particles: &mut Vec<Particle>,
    origin: Vec2,
    color: [u8; 3],
    rng: &mut R,
) {
    for _ in 0..PARTICLE_BURST {
        let jitter = Vec2::new(
            rng.random_range(-PARTICLE_JITTER..=PARTICLE_JITTER),
            rng.random_range(-PARTICLE_JITTER..=PARTICLE_JITTER),
        );
        let vel = Vec2::new(rng.random_range(-2.0..=2.0), rng.random_range(-4.0..=-1.0));
        particles.push(Particle {
            pos: origin + jitter,
            vel,
            life: PARTICLE_LIFE,
            color,
        });
    }

    if particles.len() > MAX_PARTICLES {
        let excess = particles.len() - MAX_PARTICLES;
        particles.drain(..excess);
    }
}

/// Advance every particle one tick
///
/// Particles that reached zero life last tick are removed first, so each one
/// is observed with life 20, 19, ..., 0 and then disappears.
pub fn advance(particles: &mut Vec<Particle>) {
    particles.retain(|p| p.life > 0);
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.life -= 1;
    }
}

/// Opacity for a particle with `life` ticks remaining
pub fn particle_alpha(life: u32) -> u8 {
    life.saturating_mul(12).min(255) as u8
}
