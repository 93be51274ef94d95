//! Tone cues
//!
//! The simulation never talks to a sound device directly. It asks an
//! [`AudioSink`] to play a [`Tone`]; failures come back as [`AudioError`] and
//! are dropped by [`emit`] so a missing device can never stall a tick.

use std::fmt;

/// A single beep: frequency and duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub frequency_hz: u32,
    pub duration_ms: u32,
}

impl Tone {
    pub const fn new(frequency_hz: u32, duration_ms: u32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
        }
    }
}

/// Sound cues raised by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Car is faster than the active limit
    OverspeedBeep,
    /// Horn pressed inside a no-horn zone
    HornViolation,
    /// Horn pressed anywhere else
    HornNormal,
}

impl Cue {
    pub fn tone(&self) -> Tone {
        match self {
            Cue::OverspeedBeep => Tone::new(1000, 200),
            Cue::HornViolation => Tone::new(400, 200),
            Cue::HornNormal => Tone::new(1500, 200),
        }
    }
}

/// Why a tone could not be played
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// No output device / audio context
    Unavailable,
    /// The backend rejected the request
    Backend(String),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::Unavailable => write!(f, "audio device unavailable"),
            AudioError::Backend(msg) => write!(f, "audio backend error: {msg}"),
        }
    }
}

impl std::error::Error for AudioError {}

/// Fire-and-forget tone output
pub trait AudioSink {
    fn play(&mut self, cue: Cue, tone: Tone) -> Result<(), AudioError>;
}

impl<A: AudioSink + ?Sized> AudioSink for &mut A {
    fn play(&mut self, cue: Cue, tone: Tone) -> Result<(), AudioError> {
        (**self).play(cue, tone)
    }
}

impl<A: AudioSink + ?Sized> AudioSink for Box<A> {
    fn play(&mut self, cue: Cue, tone: Tone) -> Result<(), AudioError> {
        (**self).play(cue, tone)
    }
}

/// Play a cue, discarding any failure
pub fn emit<A: AudioSink + ?Sized>(audio: &mut A, cue: Cue) {
    if let Err(e) = audio.play(cue, cue.tone()) {
        log::trace!("Dropped {:?}: {}", cue, e);
    }
}

/// Sink with no device behind it; every request fails
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAudio;

impl AudioSink for NoAudio {
    fn play(&mut self, _cue: Cue, _tone: Tone) -> Result<(), AudioError> {
        Err(AudioError::Unavailable)
    }
}

/// Writes each tone to the log (headless native runs)
#[derive(Debug, Clone, Default)]
pub struct LogAudio {
    muted: bool,
    played: u64,
}

impl LogAudio {
    pub fn new(muted: bool) -> Self {
        Self { muted, played: 0 }
    }

    /// Tones logged so far
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, cue: Cue, tone: Tone) -> Result<(), AudioError> {
        if self.muted {
            return Ok(());
        }
        self.played += 1;
        log::info!(
            "Tone {:?}: {} Hz for {} ms",
            cue,
            tone.frequency_hz,
            tone.duration_ms
        );
        Ok(())
    }
}

/// Web Audio oscillator output
#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioError, AudioSink, Cue, Tone};

    /// Audio manager backed by an `AudioContext`
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        /// Already zero when muted
        volume: f32,
    }

    impl WebAudio {
        pub fn new(volume: f32) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: volume.clamp(0.0, 1.0),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Result<(OscillatorNode, GainNode), AudioError> {
            let backend = |e: wasm_bindgen::JsValue| AudioError::Backend(format!("{e:?}"));
            let osc = ctx.create_oscillator().map_err(backend)?;
            let gain = ctx.create_gain().map_err(backend)?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).map_err(backend)?;
            gain.connect_with_audio_node(&ctx.destination())
                .map_err(backend)?;

            Ok((osc, gain))
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, cue: Cue, tone: Tone) -> Result<(), AudioError> {
            let vol = self.volume;
            if vol <= 0.0 {
                return Ok(());
            }
            let ctx = self.ctx.as_ref().ok_or(AudioError::Unavailable)?;

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            // Violations get a harsher waveform
            let wave = match cue {
                Cue::HornViolation => OscillatorType::Square,
                Cue::OverspeedBeep | Cue::HornNormal => OscillatorType::Sine,
            };
            let (osc, gain) = Self::create_osc(ctx, tone.frequency_hz as f32, wave)?;
            let t = ctx.current_time();
            let end = t + tone.duration_ms as f64 / 1000.0;

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, end)
                .ok();

            osc.start()
                .map_err(|e| AudioError::Backend(format!("{e:?}")))?;
            osc.stop_with_when(end + 0.02).ok();
            Ok(())
        }
    }
}
