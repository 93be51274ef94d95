//! Data-driven balance
//!
//! Every behavioral difference between the four variants is a field here, so
//! the simulation itself has a single code path.

use serde::{Deserialize, Serialize};

use crate::consts::BEEP_COOLDOWN_TICKS;
use crate::settings::Variant;

/// How held keys change the car's speed each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedModel {
    pub accel_step: f32,
    pub decel_step: f32,
    /// Decay toward zero when no key is held (0 disables drag)
    pub drag_step: f32,
    /// With both keys held, accelerate alone applies; otherwise both steps do
    pub accelerate_priority: bool,
}

/// How far a sign falls per tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FallModel {
    Constant(f32),
    /// `base + car_speed * factor`
    SpeedScaled { base: f32, factor: f32 },
}

impl FallModel {
    /// Fall distance for one tick at the given car speed
    pub fn fall_speed(&self, car_speed: f32) -> f32 {
        match *self {
            FallModel::Constant(v) => v,
            FallModel::SpeedScaled { base, factor } => base + car_speed * factor,
        }
    }
}

/// Horn behavior; `None` in [`Tuning::horn`] ignores presses entirely
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HornModel {
    /// Value the warning timer is set to on a violation
    pub warning_ticks: u32,
    /// Suppress repeat violations while the warning timer runs
    pub debounce: bool,
    /// Spawn a particle burst on a violation
    pub burst: bool,
}

/// Complete balance for one variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Simulation steps per second
    pub tick_rate: u32,
    pub speed: SpeedModel,
    pub fall: FallModel,
    /// Spawn no-horn signs as well as speed signs (50/50)
    pub random_sign_kinds: bool,
    /// Apply a new speed sign's limit at the moment it spawns
    pub limit_on_spawn: bool,
    /// Ticks between overspeed beeps (0 beeps every overspeeding tick)
    pub beep_cooldown_ticks: u32,
    pub horn: Option<HornModel>,
    /// Spark burst at the car whenever the overspeed beep fires
    pub overspeed_sparks: bool,
    /// Lane dash scroll per unit of speed (0 keeps the road still)
    pub road_scroll_factor: f32,
}

impl Tuning {
    /// Balance used by a variant
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Classic => Self {
                tick_rate: 30,
                speed: SpeedModel {
                    accel_step: 1.0,
                    decel_step: 1.0,
                    drag_step: 0.0,
                    accelerate_priority: false,
                },
                fall: FallModel::Constant(5.0),
                random_sign_kinds: false,
                limit_on_spawn: true,
                beep_cooldown_ticks: 0,
                horn: None,
                overspeed_sparks: false,
                road_scroll_factor: 0.0,
            },
            Variant::Zoned => Self {
                tick_rate: 30,
                horn: Some(HornModel {
                    warning_ticks: 60,
                    debounce: false,
                    burst: false,
                }),
                ..Self::modern()
            },
            Variant::Vivid => Self {
                tick_rate: 60,
                horn: Some(HornModel {
                    warning_ticks: 60,
                    debounce: true,
                    burst: true,
                }),
                ..Self::modern()
            },
            Variant::Deluxe => Self {
                tick_rate: 60,
                fall: FallModel::SpeedScaled {
                    base: 3.0,
                    factor: 0.05,
                },
                horn: Some(HornModel {
                    warning_ticks: 120,
                    debounce: true,
                    burst: true,
                }),
                overspeed_sparks: true,
                ..Self::modern()
            },
        }
    }

    /// Shared base of the later variants
    fn modern() -> Self {
        Self {
            tick_rate: 30,
            speed: SpeedModel {
                accel_step: 0.5,
                decel_step: 0.5,
                drag_step: 0.1,
                accelerate_priority: true,
            },
            fall: FallModel::Constant(3.0),
            random_sign_kinds: true,
            limit_on_spawn: false,
            beep_cooldown_ticks: BEEP_COOLDOWN_TICKS,
            horn: None,
            overspeed_sparks: false,
            road_scroll_factor: 0.3,
        }
    }

    /// Milliseconds covered by one tick
    pub fn tick_ms(&self) -> f64 {
        1000.0 / self.tick_rate.max(1) as f64
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fall_model() {
        assert_eq!(FallModel::Constant(3.0).fall_speed(120.0), 3.0);
        let scaled = FallModel::SpeedScaled {
            base: 3.0,
            factor: 0.05,
        };
        assert_eq!(scaled.fall_speed(0.0), 3.0);
        assert!((scaled.fall_speed(120.0) - 9.0).abs() < 1e-5);
    }

    #[test]
    fn test_variant_presets() {
        let classic = Tuning::for_variant(Variant::Classic);
        assert!(classic.horn.is_none());
        assert_eq!(classic.beep_cooldown_ticks, 0);
        assert_eq!(classic.speed.drag_step, 0.0);

        let deluxe = Tuning::for_variant(Variant::Deluxe);
        assert_eq!(deluxe.tick_rate, 60);
        assert_eq!(deluxe.horn.map(|h| h.warning_ticks), Some(120));
        assert!(deluxe.overspeed_sparks);
    }

    #[test]
    fn test_tuning_json_roundtrip_keeps_preset() {
        let tuning = Tuning::for_variant(Variant::Vivid);
        let json = serde_json::to_string(&tuning).unwrap();
        let back: Tuning = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tuning);
    }
}
