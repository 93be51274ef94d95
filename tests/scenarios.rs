//! End-to-end scenarios driven through `tick` with a recording audio sink

use traffic_signs::audio::{AudioError, AudioSink, Cue, NoAudio, Tone};
use traffic_signs::consts::*;
use traffic_signs::sim::{Autopilot, Sign, SignKind, SimulationState, TickInput, tick};
use traffic_signs::{Tuning, Variant};

/// Records every cue instead of playing it
#[derive(Debug, Default)]
struct RecordingAudio {
    cues: Vec<(u64, Cue)>,
    ticks_seen: u64,
}

impl RecordingAudio {
    fn count(&self, cue: Cue) -> usize {
        self.cues.iter().filter(|(_, c)| *c == cue).count()
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: Cue, tone: Tone) -> Result<(), AudioError> {
        assert_eq!(tone, cue.tone());
        self.cues.push((self.ticks_seen, cue));
        Ok(())
    }
}

/// Fails every request, like a machine without a sound device
#[derive(Debug, Default)]
struct BrokenAudio {
    attempts: u32,
}

impl AudioSink for BrokenAudio {
    fn play(&mut self, _cue: Cue, _tone: Tone) -> Result<(), AudioError> {
        self.attempts += 1;
        Err(AudioError::Backend("device unplugged".into()))
    }
}

fn state(variant: Variant) -> SimulationState {
    SimulationState::new(2024, Tuning::for_variant(variant))
}

fn run(state: &mut SimulationState, input: &TickInput, audio: &mut RecordingAudio, ticks: u64) {
    for _ in 0..ticks {
        tick(state, input, audio);
        audio.ticks_seen += 1;
    }
}

#[test]
fn overspeed_beeps_four_times_in_a_hundred_ticks() {
    let mut s = state(Variant::Zoned);
    s.speed = 100.0;
    s.speed_limit = 60;
    let mut audio = RecordingAudio::default();

    run(&mut s, &TickInput::default(), &mut audio, 100);

    assert!(s.overspeeding);
    let fired: Vec<u64> = audio
        .cues
        .iter()
        .filter(|(_, c)| *c == Cue::OverspeedBeep)
        .map(|(t, _)| *t)
        .collect();
    assert_eq!(fired, vec![0, 30, 60, 90]);
}

#[test]
fn classic_beeps_every_overspeeding_tick() {
    let mut s = state(Variant::Classic);
    s.speed = 100.0;
    s.speed_limit = 60;
    let mut audio = RecordingAudio::default();

    run(&mut s, &TickInput::default(), &mut audio, 10);

    assert_eq!(audio.count(Cue::OverspeedBeep), 10);
}

#[test]
fn horn_violation_is_debounced() {
    let mut s = state(Variant::Vivid);
    s.signs.push(Sign::spawn(SignKind::NoHorn, 3.0));
    let press = TickInput {
        horn: true,
        ..Default::default()
    };
    let mut audio = RecordingAudio::default();

    run(&mut s, &press, &mut audio, 1);
    assert!(s.no_horn_zone);
    assert!(s.horn_warning_timer > 0);
    assert_eq!(s.horn_particles.len(), PARTICLE_BURST);

    // Still warning: no new particles, no new tone
    run(&mut s, &press, &mut audio, 1);
    assert_eq!(s.horn_particles.len(), PARTICLE_BURST);
    assert_eq!(audio.count(Cue::HornViolation), 1);
}

#[test]
fn violation_burst_is_red_above_the_car() {
    let mut s = state(Variant::Deluxe);
    s.signs.push(Sign::spawn(SignKind::NoHorn, 3.0));
    let press = TickInput {
        horn: true,
        ..Default::default()
    };
    let mut audio = RecordingAudio::default();

    run(&mut s, &press, &mut audio, 1);

    let origin_x = SCREEN_WIDTH / 2.0;
    let origin_y = CAR_Y - 20.0;
    for p in &s.horn_particles {
        assert_eq!(p.color, traffic_signs::palette::VIOLATION_RED);
        assert_eq!(p.life, PARTICLE_LIFE);
        assert!((p.pos.x - origin_x).abs() <= PARTICLE_JITTER);
        assert!((p.pos.y - origin_y).abs() <= PARTICLE_JITTER);
    }
    assert_eq!(s.horn_warning_timer, 119);
}

#[test]
fn horn_on_the_tick_the_zone_sign_leaves_is_a_violation() {
    let mut s = state(Variant::Vivid);
    let mut sign = Sign::spawn(SignKind::NoHorn, 3.0);
    sign.pos.y = 598.0;
    s.signs.push(sign);
    let press = TickInput {
        horn: true,
        ..Default::default()
    };
    let mut audio = RecordingAudio::default();

    run(&mut s, &press, &mut audio, 1);

    assert!(s.signs.is_empty());
    assert_eq!(audio.count(Cue::HornViolation), 1);
    assert_eq!(audio.count(Cue::HornNormal), 0);
    assert_eq!(s.horn_particles.len(), PARTICLE_BURST);

    // Zone is gone on the next tick
    s.horn_warning_timer = 0;
    run(&mut s, &press, &mut audio, 1);
    assert!(!s.no_horn_zone);
    assert_eq!(audio.count(Cue::HornNormal), 1);
}

#[test]
fn zoned_horn_repeats_violations_without_particles() {
    let mut s = state(Variant::Zoned);
    s.signs.push(Sign::spawn(SignKind::NoHorn, 3.0));
    let press = TickInput {
        horn: true,
        ..Default::default()
    };
    let mut audio = RecordingAudio::default();

    run(&mut s, &press, &mut audio, 2);

    assert_eq!(audio.count(Cue::HornViolation), 2);
    assert!(s.horn_particles.is_empty());
}

#[test]
fn horn_outside_zone_is_a_normal_honk() {
    let mut s = state(Variant::Deluxe);
    let press = TickInput {
        horn: true,
        ..Default::default()
    };
    let mut audio = RecordingAudio::default();

    run(&mut s, &press, &mut audio, 1);

    assert_eq!(audio.count(Cue::HornNormal), 1);
    assert_eq!(s.horn_warning_timer, 0);
    assert!(s.horn_particles.is_empty());
}

#[test]
fn classic_has_no_horn() {
    let mut s = state(Variant::Classic);
    let press = TickInput {
        horn: true,
        ..Default::default()
    };
    let mut audio = RecordingAudio::default();

    run(&mut s, &press, &mut audio, 5);

    assert!(audio.cues.is_empty());
}

#[test]
fn sign_spawns_once_when_clock_crosses_interval() {
    let mut s = state(Variant::Zoned);
    let mut audio = RecordingAudio::default();

    let before = TickInput {
        now_ms: 4999,
        ..Default::default()
    };
    run(&mut s, &before, &mut audio, 1);
    assert!(s.signs.is_empty());

    let after = TickInput {
        now_ms: 5001,
        ..Default::default()
    };
    run(&mut s, &after, &mut audio, 1);
    assert_eq!(s.signs.len(), 1);
    assert_eq!(s.last_sign_spawn_ms, 5001);

    // Same reading again does not spawn a second sign
    run(&mut s, &after, &mut audio, 1);
    assert_eq!(s.signs.len(), 1);
}

#[test]
fn sign_is_removed_exactly_when_below_the_screen() {
    let mut s = state(Variant::Zoned);
    let mut audio = RecordingAudio::default();
    let input = TickInput {
        now_ms: SIGN_SPAWN_INTERVAL_MS,
        ..Default::default()
    };

    // Constant 3 px per tick from y = -60: y reaches 600 after 220 moves
    for n in 1..=220 {
        run(&mut s, &input, &mut audio, 1);
        assert_eq!(s.signs.len(), 1, "sign missing after {n} ticks");
        assert_eq!(s.signs[0].pos.y, SIGN_SPAWN_Y + 3.0 * n as f32);
    }
    run(&mut s, &input, &mut audio, 1);
    assert!(s.signs.is_empty());
}

#[test]
fn classic_limit_follows_spawned_sign() {
    let mut s = state(Variant::Classic);
    let mut audio = RecordingAudio::default();
    let input = TickInput {
        now_ms: SIGN_SPAWN_INTERVAL_MS,
        ..Default::default()
    };

    run(&mut s, &input, &mut audio, 1);

    let SignKind::SpeedLimit { limit } = s.signs[0].kind else {
        panic!("classic only spawns speed signs");
    };
    assert_eq!(s.speed_limit, limit);
    assert!(SPEED_LIMITS.contains(&limit));
}

#[test]
fn limit_persists_after_sign_leaves() {
    let mut s = state(Variant::Zoned);
    let mut sign = Sign::spawn(SignKind::SpeedLimit { limit: 100 }, 3.0);
    sign.pos.y = SCREEN_HEIGHT - 10.0;
    s.signs.push(sign);
    let mut audio = RecordingAudio::default();

    run(&mut s, &TickInput::default(), &mut audio, 1);
    assert_eq!(s.signs.len(), 1);
    assert_eq!(s.speed_limit, 100);

    run(&mut s, &TickInput::default(), &mut audio, 5);
    assert!(s.signs.is_empty());
    assert_eq!(s.speed_limit, 100);
}

#[test]
fn missing_audio_never_stalls_the_simulation() {
    let mut s = state(Variant::Deluxe);
    s.speed = 110.0;
    s.signs.push(Sign::spawn(SignKind::NoHorn, 3.0));
    let input = TickInput {
        accelerate: true,
        horn: true,
        ..Default::default()
    };

    let mut broken = BrokenAudio::default();
    for _ in 0..90 {
        tick(&mut s, &input, &mut broken);
    }
    assert!(broken.attempts > 0);
    assert_eq!(s.time_ticks, 90);
    assert_eq!(s.speed, MAX_SPEED);

    let mut silent = NoAudio;
    for _ in 0..10 {
        tick(&mut s, &input, &mut silent);
    }
    assert_eq!(s.time_ticks, 100);
}

#[test]
fn deluxe_overspeed_throws_sparks() {
    let mut s = state(Variant::Deluxe);
    s.speed = 100.0;
    s.speed_limit = 60;
    let mut audio = RecordingAudio::default();

    run(&mut s, &TickInput::default(), &mut audio, 1);

    assert_eq!(s.spark_particles.len(), PARTICLE_BURST);
    assert!(
        s.spark_particles
            .iter()
            .all(|p| p.color == traffic_signs::palette::SPARK_ORANGE)
    );
}

#[test]
fn autopilot_session_is_reproducible() {
    let autopilot = Autopilot::default();
    let drive = |seed: u64| {
        let mut s = SimulationState::new(seed, Tuning::for_variant(Variant::Deluxe));
        let mut audio = RecordingAudio::default();
        let step_ms = s.tuning.tick_ms();
        for n in 1..=1800u64 {
            let now_ms = (n as f64 * step_ms) as u64;
            let input = autopilot.input(&s, now_ms);
            tick(&mut s, &input, &mut audio);
            audio.ticks_seen += 1;
        }
        (s, audio.cues)
    };

    let (a, cues_a) = drive(77);
    let (b, cues_b) = drive(77);
    assert_eq!(cues_a, cues_b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
    assert!(!cues_a.is_empty());
}

#[test]
fn classic_both_pedals_hold_speed_while_later_variants_accelerate() {
    let both = TickInput {
        accelerate: true,
        decelerate: true,
        ..Default::default()
    };
    let mut audio = RecordingAudio::default();

    let mut classic = state(Variant::Classic);
    classic.speed = 50.0;
    run(&mut classic, &both, &mut audio, 10);
    assert_eq!(classic.speed, 50.0);

    let mut zoned = state(Variant::Zoned);
    zoned.speed = 50.0;
    run(&mut zoned, &both, &mut audio, 10);
    assert_eq!(zoned.speed, 55.0);
}
