use tracing::{debug, info};

use super::{PlayerOutput, PlayerPage};
use crate::models::Episode;

impl PlayerPage {
    /// Playback reached the end: advance to the following episode when there is one.
    pub(super) fn handle_playback_ended(&mut self) {
        let Some(current) = self.props.current_episode else {
            debug!("Movie finished");
            return;
        };

        match self.episodes.next_after(current).map(Episode::key) {
            Some(next) => {
                info!("{} ended, advancing to {}", current, next);
                self.sender.output(PlayerOutput::EpisodeChanged(next));
            }
            None => info!("{} was the last episode, stopping", current),
        }
    }
}
