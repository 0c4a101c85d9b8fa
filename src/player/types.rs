// Common types used by the playback state machine
use serde::Serialize;
use std::fmt;

use crate::constants::PLAYBACK_RATES;

/// Playback rates offered in the settings panel. Nothing outside this set can be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlaybackRate {
    Half,
    ThreeQuarters,
    Normal,
    OneAndQuarter,
    OneAndHalf,
    Double,
}

impl PlaybackRate {
    pub const ALL: [PlaybackRate; 6] = [
        PlaybackRate::Half,
        PlaybackRate::ThreeQuarters,
        PlaybackRate::Normal,
        PlaybackRate::OneAndQuarter,
        PlaybackRate::OneAndHalf,
        PlaybackRate::Double,
    ];

    pub fn value(self) -> f64 {
        match self {
            PlaybackRate::Half => PLAYBACK_RATES[0],
            PlaybackRate::ThreeQuarters => PLAYBACK_RATES[1],
            PlaybackRate::Normal => PLAYBACK_RATES[2],
            PlaybackRate::OneAndQuarter => PLAYBACK_RATES[3],
            PlaybackRate::OneAndHalf => PLAYBACK_RATES[4],
            PlaybackRate::Double => PLAYBACK_RATES[5],
        }
    }

    pub fn label(self) -> String {
        match self {
            PlaybackRate::Normal => "Normal".to_string(),
            rate => format!("{}x", rate.value()),
        }
    }
}

impl Default for PlaybackRate {
    fn default() -> Self {
        Self::Normal
    }
}

impl fmt::Display for PlaybackRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.value())
    }
}

/// Volume level, always within `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Volume(f64);

impl Volume {
    pub const SILENT: Volume = Volume(0.0);
    pub const FULL: Volume = Volume(1.0);

    pub fn new(level: f64) -> Self {
        if level.is_nan() {
            return Self::SILENT;
        }
        Self(level.clamp(0.0, 1.0))
    }

    /// Slider values are percentages.
    pub fn from_percent(percent: f64) -> Self {
        Self::new(percent / 100.0)
    }

    pub fn level(self) -> f64 {
        self.0
    }

    pub fn percent(self) -> f64 {
        self.0 * 100.0
    }

    pub fn is_silent(self) -> bool {
        self.0 == 0.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::FULL
    }
}
