//! Sign spawner and mover
//!
//! A new sign is spawned once the spawn interval has elapsed since the last
//! one. Signs fall down the screen and are pruned once below the viewport.
//! The no-horn zone and the active limit are recomputed while the signs
//! move, before pruning.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::SimulationState;
use crate::consts::*;

/// What a sign regulates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignKind {
    SpeedLimit { limit: u32 },
    NoHorn,
}

/// A falling sign entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sign {
    pub kind: SignKind,
    /// Centre of the sign in screen space
    pub pos: Vec2,
    /// Pixels per tick
    pub fall_speed: f32,
}

impl Sign {
    /// A sign of `kind` at its spawn point above the viewport
    pub fn spawn(kind: SignKind, fall_speed: f32) -> Self {
        let x = match kind {
            SignKind::SpeedLimit { .. } => SPEED_SIGN_X,
            SignKind::NoHorn => NO_HORN_SIGN_X,
        };
        Self {
            kind,
            pos: Vec2::new(x, SIGN_SPAWN_Y),
            fall_speed,
        }
    }

    /// Fully below the bottom edge
    pub fn is_off_screen(&self) -> bool {
        self.pos.y > SCREEN_HEIGHT
    }
}

/// Whether a spawn is due at clock reading `now_ms`
pub fn spawn_due(last_spawn_ms: u64, now_ms: u64) -> bool {
    now_ms.saturating_sub(last_spawn_ms) >= SIGN_SPAWN_INTERVAL_MS
}

/// Pick the kind of the next sign
pub fn choose_kind<R: Rng>(rng: &mut R, random_kinds: bool) -> SignKind {
    if random_kinds && rng.random_bool(0.5) {
        SignKind::NoHorn
    } else {
        let limit = SPEED_LIMITS[rng.random_range(0..SPEED_LIMITS.len())];
        SignKind::SpeedLimit { limit }
    }
}

/// Spawn a sign if the interval has elapsed
///
/// Returns the kind spawned, if any.
pub fn spawn_if_due(state: &mut SimulationState, now_ms: u64) -> Option<SignKind> {
    if !spawn_due(state.last_sign_spawn_ms, now_ms) {
        return None;
    }

    let kind = choose_kind(&mut state.rng, state.tuning.random_sign_kinds);
    let fall_speed = state.tuning.fall.fall_speed(state.speed);
    state.signs.push(Sign::spawn(kind, fall_speed));
    state.last_sign_spawn_ms = now_ms;

    if let (true, SignKind::SpeedLimit { limit }) = (state.tuning.limit_on_spawn, kind) {
        state.speed_limit = limit;
    }
    log::debug!("Spawned {:?} at {} ms", kind, now_ms);
    Some(kind)
}

/// Move every sign, apply its regulation, then prune those off screen
///
/// A sign still regulates on the tick it leaves the viewport. Every speed
/// sign overwrites the limit in list order; with no speed sign present the
/// limit keeps its last value. The zone flag only holds while a no-horn sign
/// was seen this tick.
pub fn advance(state: &mut SimulationState) {
    let fall = state.tuning.fall;
    let car_speed = state.speed;
    state.no_horn_zone = false;
    for sign in state.signs.iter_mut() {
        sign.fall_speed = fall.fall_speed(car_speed);
        sign.pos.y += sign.fall_speed;
        match sign.kind {
            SignKind::SpeedLimit { limit } => state.speed_limit = limit,
            SignKind::NoHorn => state.no_horn_zone = true,
        }
    }
    state.signs.retain(|s| !s.is_off_screen());
}

/// One tick of the spawner and mover
pub fn update(state: &mut SimulationState, now_ms: u64) {
    spawn_if_due(state, now_ms);
    advance(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Variant;
    use crate::tuning::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn state(variant: Variant) -> SimulationState {
        SimulationState::new(42, Tuning::for_variant(variant))
    }

    #[test]
    fn test_spawn_due_boundary() {
        assert!(!spawn_due(0, 4999));
        assert!(spawn_due(0, 5000));
        assert!(spawn_due(0, 5001));
        assert!(!spawn_due(5001, 9000));
        // Clock going backwards never spawns
        assert!(!spawn_due(6000, 10));
    }

    #[test]
    fn test_spawn_resets_baseline() {
        let mut state = state(Variant::Zoned);
        assert!(spawn_if_due(&mut state, 4999).is_none());
        assert!(state.signs.is_empty());

        assert!(spawn_if_due(&mut state, 5001).is_some());
        assert_eq!(state.signs.len(), 1);
        assert_eq!(state.last_sign_spawn_ms, 5001);
        assert_eq!(state.signs[0].pos.y, SIGN_SPAWN_Y);

        assert!(spawn_if_due(&mut state, 5002).is_none());
        assert_eq!(state.signs.len(), 1);
    }

    #[test]
    fn test_classic_only_speed_signs() {
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..200 {
            match choose_kind(&mut rng, false) {
                SignKind::SpeedLimit { limit } => assert!(SPEED_LIMITS.contains(&limit)),
                SignKind::NoHorn => panic!("classic never spawns no-horn signs"),
            }
        }
    }

    #[test]
    fn test_random_kinds_cover_everything() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut no_horn = 0;
        let mut limits = std::collections::HashSet::new();
        for _ in 0..400 {
            match choose_kind(&mut rng, true) {
                SignKind::SpeedLimit { limit } => {
                    limits.insert(limit);
                }
                SignKind::NoHorn => no_horn += 1,
            }
        }
        assert!(no_horn > 100 && no_horn < 300);
        assert_eq!(limits.len(), SPEED_LIMITS.len());
    }

    #[test]
    fn test_classic_applies_limit_on_spawn() {
        let mut state = state(Variant::Classic);
        let kind = spawn_if_due(&mut state, 5000);
        match kind {
            Some(SignKind::SpeedLimit { limit }) => assert_eq!(state.speed_limit, limit),
            other => panic!("expected a speed sign, got {other:?}"),
        }
    }

    #[test]
    fn test_sign_removed_exactly_when_past_bottom() {
        let mut state = state(Variant::Zoned);
        state
            .signs
            .push(Sign::spawn(SignKind::NoHorn, 3.0));

        // -60 + 3n > 600 first holds at n = 221
        for _ in 0..220 {
            advance(&mut state);
            assert_eq!(state.signs.len(), 1);
        }
        assert_eq!(state.signs[0].pos.y, 600.0);
        advance(&mut state);
        assert!(state.signs.is_empty());
    }

    #[test]
    fn test_speed_scaled_fall() {
        let mut state = state(Variant::Deluxe);
        state.speed = 100.0;
        state
            .signs
            .push(Sign::spawn(SignKind::SpeedLimit { limit: 80 }, 0.0));
        advance(&mut state);
        assert!((state.signs[0].fall_speed - 8.0).abs() < 1e-4);
        assert!((state.signs[0].pos.y - (SIGN_SPAWN_Y + 8.0)).abs() < 1e-4);
    }

    #[test]
    fn test_regulations_track_signs_on_screen() {
        let mut state = state(Variant::Zoned);
        state.signs.push(Sign::spawn(SignKind::NoHorn, 3.0));
        state
            .signs
            .push(Sign::spawn(SignKind::SpeedLimit { limit: 40 }, 3.0));
        state
            .signs
            .push(Sign::spawn(SignKind::SpeedLimit { limit: 100 }, 3.0));
        advance(&mut state);
        assert!(state.no_horn_zone);
        assert_eq!(state.speed_limit, 100);

        state.signs.clear();
        advance(&mut state);
        assert!(!state.no_horn_zone);
        // Limit is sticky once the sign has gone
        assert_eq!(state.speed_limit, 100);
    }

    #[test]
    fn test_exiting_sign_regulates_its_last_tick() {
        let mut state = state(Variant::Zoned);
        let mut no_horn = Sign::spawn(SignKind::NoHorn, 3.0);
        no_horn.pos.y = 598.0;
        let mut limit = Sign::spawn(SignKind::SpeedLimit { limit: 40 }, 3.0);
        limit.pos.y = 599.0;
        state.signs.extend([no_horn, limit]);

        advance(&mut state);
        assert!(state.signs.is_empty());
        assert!(state.no_horn_zone);
        assert_eq!(state.speed_limit, 40);

        advance(&mut state);
        assert!(!state.no_horn_zone);
    }

    #[test]
    fn test_sign_spawn_positions() {
        assert_eq!(Sign::spawn(SignKind::NoHorn, 1.0).pos.x, NO_HORN_SIGN_X);
        assert_eq!(
            Sign::spawn(SignKind::SpeedLimit { limit: 60 }, 1.0).pos.x,
            SPEED_SIGN_X
        );
    }
}
