//! User settings
//!
//! Read once at startup from the environment (native), the page query string
//! (web), or a JSON document. Nothing is ever written back.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Which iteration of the simulation to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Speed signs only, no drag, beeps every overspeeding tick
    Classic,
    /// Adds drag, no-horn signs and the horn
    Zoned,
    /// 60 Hz, debounced horn with particle bursts
    Vivid,
    /// Speed-scaled sign fall, longer horn warning, overspeed sparks
    #[default]
    Deluxe,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Classic,
        Variant::Zoned,
        Variant::Vivid,
        Variant::Deluxe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "Classic",
            Variant::Zoned => "Zoned",
            Variant::Vivid => "Vivid",
            Variant::Deluxe => "Deluxe",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "classic" | "1" => Some(Variant::Classic),
            "zoned" | "2" => Some(Variant::Zoned),
            "vivid" | "3" => Some(Variant::Vivid),
            "deluxe" | "4" => Some(Variant::Deluxe),
            _ => None,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors while reading settings
#[derive(Debug)]
pub enum SettingsError {
    Json(serde_json::Error),
    UnknownVariant(String),
    InvalidNumber { key: &'static str, value: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Json(e) => write!(f, "invalid settings JSON: {e}"),
            SettingsError::UnknownVariant(v) => write!(f, "unknown variant: {v:?}"),
            SettingsError::InvalidNumber { key, value } => {
                write!(f, "{key} expects a number, got {value:?}")
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Json(e)
    }
}

/// Settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub variant: Variant,
    /// RNG seed (time-based when absent)
    pub seed: Option<u64>,
    /// Length of a headless native run in simulated seconds
    pub run_seconds: u32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            seed: None,
            run_seconds: 30,
            master_volume: 0.8,
            muted: false,
        }
    }
}

impl Settings {
    /// Environment variables read by [`Settings::from_env`]
    pub const ENV_VARIANT: &'static str = "SIGNSIM_VARIANT";
    pub const ENV_SEED: &'static str = "SIGNSIM_SEED";
    pub const ENV_SECONDS: &'static str = "SIGNSIM_SECONDS";
    pub const ENV_MUTED: &'static str = "SIGNSIM_MUTED";

    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    /// Build settings from `key=value` pairs, ignoring unknown keys
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut settings = Self::default();
        for (key, value) in pairs {
            settings.apply(key, value)?;
        }
        Ok(settings)
    }

    /// Read `SIGNSIM_*` variables from the process environment
    pub fn from_env() -> Result<Self, SettingsError> {
        let vars: Vec<(&'static str, String)> = [
            ("variant", Self::ENV_VARIANT),
            ("seed", Self::ENV_SEED),
            ("seconds", Self::ENV_SECONDS),
            ("muted", Self::ENV_MUTED),
        ]
        .into_iter()
        .filter_map(|(key, var)| std::env::var(var).ok().map(|v| (key, v)))
        .collect();
        Self::from_pairs(vars.iter().map(|(k, v)| (*k, v.as_str())))
    }

    /// Parse a URL query string such as `?variant=vivid&seed=7`
    pub fn from_query(query: &str) -> Result<Self, SettingsError> {
        let query = query.trim_start_matches('?');
        Self::from_pairs(
            query
                .split('&')
                .filter(|p| !p.is_empty())
                .map(|p| p.split_once('=').unwrap_or((p, ""))),
        )
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        match key {
            "variant" => {
                self.variant = Variant::from_str(value)
                    .ok_or_else(|| SettingsError::UnknownVariant(value.to_string()))?;
            }
            "seed" => self.seed = Some(parse_number("seed", value)?),
            "seconds" => self.run_seconds = parse_number("seconds", value)?,
            "volume" => {
                let vol: f32 = parse_number("volume", value)?;
                self.master_volume = vol.clamp(0.0, 1.0);
            }
            "muted" => self.muted = matches!(value, "" | "1" | "true" | "yes"),
            _ => log::debug!("Ignoring unknown setting {key}"),
        }
        Ok(())
    }

    /// Balance for the selected variant
    pub fn tuning(&self) -> Tuning {
        Tuning::for_variant(self.variant)
    }

    /// Effective volume (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, SettingsError> {
    value.trim().parse().map_err(|_| SettingsError::InvalidNumber {
        key,
        value: value.to_string(),
    })
}
