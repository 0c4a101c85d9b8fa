use tracing::debug;

use super::PlayerPage;

/// Format seconds as `H:MM:SS`, or `M:SS` under an hour.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

impl PlayerPage {
    /// Seek to a percentage of the duration.
    pub(super) fn seek_to_percent(&mut self, percent: f64) {
        if self.source.is_none() {
            return;
        }

        let percent = if percent.is_finite() {
            percent.clamp(0.0, 100.0)
        } else {
            0.0
        };
        let target = percent / 100.0 * self.playback.duration();
        self.seek_to(target);
    }

    /// Move the position by `delta` seconds, clamped to the media bounds.
    pub(super) fn skip(&mut self, delta: f64) {
        if self.source.is_none() {
            return;
        }

        let target = self.playback.current_time() + delta;
        self.seek_to(target);
    }

    fn seek_to(&mut self, seconds: f64) {
        let position = self.playback.record_seek(seconds);
        debug!("Seeking to {:.2}s", position);
        self.services.media.set_current_time(position);
    }
}
