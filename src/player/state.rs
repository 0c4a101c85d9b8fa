//! Playback state machine.
//!
//! The phase is a single tagged value so impossible combinations (an errored
//! element that is also playing) cannot be represented:
//! - Idle: no source attached yet
//! - Loading: source attached, waiting for the element to be playable
//! - Ready / Playing / Paused: playable, with buffering as an overlay flag
//! - Errored: the element reported an error; only a new source leaves this state
//!
//! Media element signals are mapped onto transitions by [`PlaybackState::apply`].

use tracing::{debug, trace, warn};

use super::traits::MediaEvent;
use super::types::{PlaybackRate, Volume};

const DEFAULT_ERROR_MESSAGE: &str = "Failed to load or play the video";

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackPhase {
    Idle,
    Loading,
    Ready { buffering: bool },
    Playing { buffering: bool },
    Paused { buffering: bool },
    Errored { message: String },
}

impl PlaybackPhase {
    fn buffering(&self) -> bool {
        match self {
            Self::Loading => true,
            Self::Ready { buffering } | Self::Playing { buffering } | Self::Paused { buffering } => {
                *buffering
            }
            Self::Idle | Self::Errored { .. } => false,
        }
    }

    fn with_buffering(&self, value: bool) -> Self {
        match self {
            Self::Ready { .. } => Self::Ready { buffering: value },
            Self::Playing { .. } => Self::Playing { buffering: value },
            Self::Paused { .. } => Self::Paused { buffering: value },
            other => other.clone(),
        }
    }
}

/// Outcome of feeding one signal into the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Applied,
    /// The signal has no meaning in the current phase.
    Ignored,
    /// Playback reached the end of the source.
    Ended,
    /// The element reported an error; the caller decides how to surface it.
    Failed(String),
}

/// Everything the player knows about the attached source's playback.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    phase: PlaybackPhase,
    current_time: f64,
    duration: f64,
    can_play: bool,
    /// Last audible level; unmuting restores it.
    level: Volume,
    muted: bool,
    rate: PlaybackRate,
    /// Transient message for a refused play request.
    notice: Option<String>,
}

impl PlaybackState {
    pub fn new(initial_volume: Volume) -> Self {
        let level = if initial_volume.is_silent() {
            Volume::FULL
        } else {
            initial_volume
        };

        Self {
            phase: PlaybackPhase::Idle,
            current_time: 0.0,
            duration: 0.0,
            can_play: false,
            level,
            muted: initial_volume.is_silent(),
            rate: PlaybackRate::Normal,
            notice: None,
        }
    }

    /// Forget everything about the previous source. Volume and mute are audio
    /// preferences and survive; the element resets its own rate on load, so the
    /// rate goes back to normal with it.
    pub fn reset_for_new_source(&mut self) {
        self.phase = PlaybackPhase::Idle;
        self.current_time = 0.0;
        self.duration = 0.0;
        self.can_play = false;
        self.rate = PlaybackRate::Normal;
        self.notice = None;
    }

    /// Source resolution started; the element is not attached yet.
    pub fn begin_loading(&mut self) {
        if !matches!(self.phase, PlaybackPhase::Errored { .. }) {
            self.phase = PlaybackPhase::Loading;
        }
    }

    /// Enter the error phase, e.g. when no source could be resolved.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.phase = PlaybackPhase::Errored {
            message: message.into(),
        };
        self.can_play = false;
    }

    /// Single transition function for media element signals.
    pub fn apply(&mut self, event: &MediaEvent) -> Transition {
        if let PlaybackPhase::Errored { .. } = self.phase {
            trace!("Ignoring {:?} while errored", event);
            return Transition::Ignored;
        }

        match event {
            MediaEvent::LoadStart => {
                self.phase = PlaybackPhase::Loading;
            }
            MediaEvent::LoadedMetadata { duration } => {
                self.duration = if duration.is_finite() && *duration > 0.0 {
                    *duration
                } else {
                    0.0
                };
                self.can_play = true;
                self.current_time = self.clamp_position(self.current_time);
                debug!("Metadata loaded, duration {:.2}s", self.duration);
            }
            MediaEvent::CanPlay => {
                self.can_play = true;
                self.phase = match &self.phase {
                    PlaybackPhase::Idle | PlaybackPhase::Loading => {
                        PlaybackPhase::Ready { buffering: false }
                    }
                    other => other.with_buffering(false),
                };
            }
            MediaEvent::Waiting => match self.phase {
                PlaybackPhase::Ready { .. }
                | PlaybackPhase::Playing { .. }
                | PlaybackPhase::Paused { .. } => {
                    self.phase = self.phase.with_buffering(true);
                }
                _ => return Transition::Ignored,
            },
            MediaEvent::CanPlayThrough => {
                self.phase = self.phase.with_buffering(false);
            }
            MediaEvent::Progress { buffered_ranges } => {
                if *buffered_ranges == 0 {
                    return Transition::Ignored;
                }
                self.phase = self.phase.with_buffering(false);
            }
            MediaEvent::Play => {
                self.mark_playing();
            }
            MediaEvent::Pause => {
                self.mark_paused();
            }
            MediaEvent::TimeUpdate { current_time } => {
                self.current_time = self.clamp_position(*current_time);
            }
            MediaEvent::Ended => {
                self.phase = PlaybackPhase::Paused { buffering: false };
                if self.duration > 0.0 {
                    self.current_time = self.duration;
                }
                return Transition::Ended;
            }
            MediaEvent::Error { message } => {
                let message = message
                    .clone()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
                warn!("Media element error: {}", message);
                return Transition::Failed(message);
            }
        }

        Transition::Applied
    }

    /// Mirror a started playback, either from the element or a fulfilled play request.
    pub fn mark_playing(&mut self) {
        match self.phase {
            PlaybackPhase::Errored { .. } => {}
            _ => {
                self.phase = PlaybackPhase::Playing {
                    buffering: self.phase.buffering(),
                };
                self.notice = None;
            }
        }
    }

    pub fn mark_paused(&mut self) {
        match self.phase {
            PlaybackPhase::Errored { .. } | PlaybackPhase::Idle => {}
            _ => {
                self.phase = PlaybackPhase::Paused {
                    buffering: self.phase.buffering(),
                };
            }
        }
    }

    /// Clamp a position to `[0, duration]`; only the lower bound applies while
    /// the duration is unknown.
    pub fn clamp_position(&self, seconds: f64) -> f64 {
        let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
        if self.duration > 0.0 {
            seconds.min(self.duration)
        } else {
            seconds
        }
    }

    /// Record a seek issued by the player. Last write wins.
    pub fn record_seek(&mut self, seconds: f64) -> f64 {
        self.current_time = self.clamp_position(seconds);
        self.current_time
    }

    /// Apply a slider volume. Exactly zero mutes and keeps the last audible level.
    pub fn set_volume(&mut self, volume: Volume) {
        if volume.is_silent() {
            self.muted = true;
        } else {
            self.level = volume;
            self.muted = false;
        }
    }

    /// Flip mute and return the volume the element should now use.
    pub fn toggle_mute(&mut self) -> Volume {
        self.muted = !self.muted;
        self.volume()
    }

    pub fn set_rate(&mut self, rate: PlaybackRate) {
        self.rate = rate;
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub fn phase(&self) -> &PlaybackPhase {
        &self.phase
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.phase, PlaybackPhase::Playing { .. })
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, PlaybackPhase::Loading)
    }

    pub fn is_buffering(&self) -> bool {
        self.phase.buffering()
    }

    pub fn can_play(&self) -> bool {
        self.can_play
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            PlaybackPhase::Errored { message } => Some(message),
            _ => None,
        }
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Position as a percentage of the duration, 0 while the duration is unknown.
    pub fn progress_percent(&self) -> f64 {
        if self.duration > 0.0 {
            (self.current_time / self.duration * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        }
    }

    /// Volume the element plays at.
    pub fn volume(&self) -> Volume {
        if self.muted { Volume::SILENT } else { self.level }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn rate(&self) -> PlaybackRate {
        self.rate
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(Volume::FULL)
    }
}
