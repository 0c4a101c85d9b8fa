// Render snapshot of the player page. A front end draws exactly what is here and
// forwards user input back as `PlayerInput` messages.

use serde::Serialize;

use super::overlays::Overlay;
use super::seek_bar::format_time;
use super::PlayerPage;
use crate::models::EpisodeKey;
use crate::player::{FullscreenMode, PlaybackPhase, PlaybackRate};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlayerView {
    /// Terminal playback failure; the only action offered is a page reload.
    Error { message: String },
    Player(Box<PlayerScreen>),
}

impl PlayerView {
    pub fn screen(&self) -> Option<&PlayerScreen> {
        match self {
            PlayerView::Player(screen) => Some(screen),
            PlayerView::Error { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            PlayerView::Error { message } => Some(message),
            PlayerView::Player(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerScreen {
    pub source_url: Option<String>,
    pub poster: Option<String>,
    pub title: Option<String>,
    pub fullscreen: FullscreenMode,
    pub landscape: bool,
    pub blurred: bool,
    pub spinner: Option<Spinner>,
    /// Large play button in the middle of a paused, playable video.
    pub center_play: bool,
    /// Transient message, e.g. a refused play request.
    pub notice: Option<String>,
    pub controls: Option<ControlsView>,
    pub overlay: Option<OverlayView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Spinner {
    LoadingVideo,
    Buffering,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlsView {
    pub playing: bool,
    pub progress_percent: f64,
    pub position_label: String,
    pub duration_label: String,
    pub volume_percent: f64,
    pub muted: bool,
    pub rate: PlaybackRate,
    pub episode_list_available: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "panel", rename_all = "snake_case")]
pub enum OverlayView {
    Settings { rates: Vec<RateOption> },
    EpisodeList { seasons: Vec<SeasonView> },
}

impl OverlayView {
    pub fn overlay(&self) -> Overlay {
        match self {
            OverlayView::Settings { .. } => Overlay::Settings,
            OverlayView::EpisodeList { .. } => Overlay::EpisodeList,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateOption {
    pub rate: PlaybackRate,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonView {
    pub season: u32,
    pub episodes: Vec<EpisodeEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeEntry {
    pub key: EpisodeKey,
    pub title: String,
    pub current: bool,
    /// Served from object storage rather than a direct URL.
    pub stored_file: bool,
}

impl PlayerPage {
    pub fn view(&self) -> PlayerView {
        if let PlaybackPhase::Errored { message } = self.playback.phase() {
            return PlayerView::Error {
                message: message.clone(),
            };
        }

        let playing = self.playback.is_playing();
        let spinner = match self.playback.phase() {
            PlaybackPhase::Idle | PlaybackPhase::Loading => Some(Spinner::LoadingVideo),
            _ if self.playback.is_buffering() => Some(Spinner::Buffering),
            _ => None,
        };

        let controls = self.controls_visible().then(|| ControlsView {
            playing,
            progress_percent: self.playback.progress_percent(),
            position_label: format_time(self.playback.current_time()),
            duration_label: format_time(self.playback.duration()),
            volume_percent: self.playback.volume().percent(),
            muted: self.playback.is_muted(),
            rate: self.playback.rate(),
            episode_list_available: !self.episodes.is_empty(),
        });

        PlayerView::Player(Box::new(PlayerScreen {
            source_url: self.source.as_ref().map(|source| source.url.clone()),
            poster: self.props.poster.clone(),
            title: self.props.display_title(),
            fullscreen: self.fullscreen.mode(),
            landscape: self.orientation.is_landscape(),
            blurred: self.blurred,
            spinner,
            center_play: !playing && spinner.is_none() && self.playback.can_play(),
            notice: self.playback.notice().map(str::to_string),
            controls,
            overlay: self.overlay.visible().map(|overlay| self.overlay_view(overlay)),
        }))
    }

    fn overlay_view(&self, overlay: Overlay) -> OverlayView {
        match overlay {
            Overlay::Settings => OverlayView::Settings {
                rates: PlaybackRate::ALL
                    .into_iter()
                    .map(|rate| RateOption {
                        rate,
                        label: rate.label(),
                        selected: rate == self.playback.rate(),
                    })
                    .collect(),
            },
            Overlay::EpisodeList => OverlayView::EpisodeList {
                seasons: self
                    .episodes
                    .seasons()
                    .into_iter()
                    .map(|season| SeasonView {
                        season,
                        episodes: self
                            .episodes
                            .episodes_for_season(season)
                            .map(|episode| EpisodeEntry {
                                key: episode.key(),
                                title: episode.title.clone(),
                                current: self.props.current_episode == Some(episode.key()),
                                stored_file: episode.uses_stored_file(),
                            })
                            .collect(),
                    })
                    .collect(),
            },
        }
    }
}
