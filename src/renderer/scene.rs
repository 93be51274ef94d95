//! Scene building
//!
//! Turns a [`SimulationState`] into one triangle list in screen space. Pure,
//! so it can be tested without a GPU.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors, rgb8};
use crate::consts::*;
use crate::sim::{Particle, Sign, SignKind, SimulationState, particle_alpha};

const SIGN_SEGMENTS: u32 = 32;
const SIGN_RIM_WIDTH: f32 = 5.0;
const PARTICLE_SIZE: f32 = 4.0;
/// Overspeed flash toggles every this many ticks
const FLASH_PERIOD_TICKS: u64 = 8;

/// Build the full frame for the current state
pub fn build_scene(state: &SimulationState) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(4096);

    vertices.extend(shapes::rect(
        Vec2::ZERO,
        Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
        colors::GRASS,
    ));
    draw_road(&mut vertices, state.lane_offset);
    draw_car(&mut vertices);

    for sign in &state.signs {
        draw_sign(&mut vertices, sign);
    }
    draw_particles(&mut vertices, &state.spark_particles);
    draw_particles(&mut vertices, &state.horn_particles);

    if warning_flash_on(state) {
        vertices.extend(shapes::rect(
            Vec2::ZERO,
            Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            colors::WARNING_FLASH,
        ));
    }
    if state.horn_warning_active() {
        vertices.extend(shapes::rect(
            Vec2::ZERO,
            Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            colors::HORN_FLASH,
        ));
    }

    vertices
}

/// Overspeed overlay blinks while the car is over the limit
pub fn warning_flash_on(state: &SimulationState) -> bool {
    state.overspeeding && (state.time_ticks / FLASH_PERIOD_TICKS) % 2 == 0
}

fn draw_road(out: &mut Vec<Vertex>, lane_offset: f32) {
    out.extend(shapes::rect(
        Vec2::new(ROAD_LEFT, 0.0),
        Vec2::new(ROAD_RIGHT - ROAD_LEFT, SCREEN_HEIGHT),
        colors::ROAD,
    ));
    for x in [ROAD_LEFT, ROAD_RIGHT] {
        out.extend(shapes::line(
            Vec2::new(x, 0.0),
            Vec2::new(x, SCREEN_HEIGHT),
            3.0,
            colors::ROAD_EDGE,
        ));
    }

    // Dashes start one spacing above the screen so scrolling never shows a gap
    let center_x = SCREEN_WIDTH / 2.0;
    let mut y = -LANE_DASH_LENGTH;
    while y < SCREEN_HEIGHT + LANE_DASH_LENGTH {
        out.extend(shapes::rect(
            Vec2::new(center_x - 2.0, y + lane_offset),
            Vec2::new(4.0, LANE_DASH_LENGTH),
            colors::LANE_DASH,
        ));
        y += LANE_DASH_SPACING;
    }
}

fn draw_car(out: &mut Vec<Vertex>) {
    let top_left = Vec2::new(CAR_X, CAR_Y);
    let size = Vec2::new(CAR_WIDTH, CAR_HEIGHT);
    out.extend(shapes::rect(
        top_left + Vec2::new(5.0, 5.0),
        size,
        colors::CAR_SHADOW,
    ));
    out.extend(shapes::rect(top_left, size, colors::CAR));
    out.extend(shapes::rect_outline(top_left, size, 3.0, colors::CAR_OUTLINE));
}

fn draw_sign(out: &mut Vec<Vertex>, sign: &Sign) {
    let c = sign.pos;
    out.extend(shapes::circle(c, SIGN_RADIUS, colors::SIGN_FACE, SIGN_SEGMENTS));
    out.extend(shapes::ring(
        c,
        SIGN_RADIUS - SIGN_RIM_WIDTH,
        SIGN_RADIUS,
        colors::SIGN_RIM,
        SIGN_SEGMENTS,
    ));

    match sign.kind {
        SignKind::SpeedLimit { limit } => {
            out.extend(shapes::number(limit, c, 24.0, colors::SIGN_INK));
        }
        SignKind::NoHorn => {
            // Speaker box and cone
            out.extend(shapes::rect(
                c + Vec2::new(-15.0, -10.0),
                Vec2::new(10.0, 20.0),
                colors::SIGN_INK,
            ));
            out.extend(shapes::polygon(
                &[
                    c + Vec2::new(-5.0, -10.0),
                    c + Vec2::new(5.0, -20.0),
                    c + Vec2::new(5.0, 20.0),
                    c + Vec2::new(-5.0, 10.0),
                ],
                colors::SIGN_INK,
            ));
            // Cross
            out.extend(shapes::line(
                c + Vec2::new(-20.0, -20.0),
                c + Vec2::new(20.0, 20.0),
                4.0,
                colors::SIGN_RIM,
            ));
            out.extend(shapes::line(
                c + Vec2::new(-20.0, 20.0),
                c + Vec2::new(20.0, -20.0),
                4.0,
                colors::SIGN_RIM,
            ));
        }
    }
}

fn draw_particles(out: &mut Vec<Vertex>, particles: &[Particle]) {
    for p in particles {
        let color = rgb8(p.color, particle_alpha(p.life));
        out.extend(shapes::rect(
            p.pos - Vec2::splat(PARTICLE_SIZE / 2.0),
            Vec2::splat(PARTICLE_SIZE),
            color,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Variant;
    use crate::tuning::Tuning;

    fn state() -> SimulationState {
        SimulationState::new(5, Tuning::for_variant(Variant::Deluxe))
    }

    #[test]
    fn test_empty_scene_has_road_and_car() {
        let vertices = build_scene(&state());
        assert!(!vertices.is_empty());
        assert_eq!(vertices.len() % 3, 0);
    }

    #[test]
    fn test_signs_add_geometry() {
        let mut s = state();
        let base = build_scene(&s).len();
        s.signs.push(Sign::spawn(SignKind::NoHorn, 3.0));
        let with_sign = build_scene(&s).len();
        assert!(with_sign > base);
    }

    #[test]
    fn test_particle_alpha_follows_life() {
        let mut s = state();
        s.horn_particles.push(Particle {
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::ZERO,
            life: 10,
            color: [255, 0, 0],
        });
        let vertices = build_scene(&s);
        let last = vertices.last().copied().unwrap();
        assert!((last.color[3] - 120.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_warning_flash_blinks() {
        let mut s = state();
        s.overspeeding = true;
        s.time_ticks = 0;
        assert!(warning_flash_on(&s));
        s.time_ticks = FLASH_PERIOD_TICKS;
        assert!(!warning_flash_on(&s));
        s.overspeeding = false;
        s.time_ticks = 0;
        assert!(!warning_flash_on(&s));
    }
}
