use tracing::debug;

use super::PlayerPage;
use crate::player::{PlaybackRate, Volume};

impl PlayerPage {
    /// Volume slider, in percent. Zero mutes without forgetting the previous level.
    pub(super) fn set_volume_percent(&mut self, percent: f64) {
        let volume = Volume::from_percent(percent);
        self.playback.set_volume(volume);
        self.services.media.set_volume(self.playback.volume().level());
        debug!(
            "Volume {:.0}%{}",
            volume.percent(),
            if self.playback.is_muted() { " (muted)" } else { "" }
        );
    }

    pub(super) fn toggle_mute(&mut self) {
        let volume = self.playback.toggle_mute();
        self.services.media.set_volume(volume.level());
        debug!("Muted: {}", self.playback.is_muted());
    }

    pub(super) fn set_playback_rate(&mut self, rate: PlaybackRate) {
        self.close_overlay(super::Overlay::Settings);
        if self.source.is_none() {
            return;
        }

        debug!("Playback rate {}", rate);
        self.playback.set_rate(rate);
        self.services.media.set_playback_rate(rate.value());
    }
}
