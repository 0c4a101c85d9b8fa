use tracing::{debug, info, warn};

use super::{PlayerOutput, PlayerPage};
use crate::models::{Episode, EpisodeKey};

/// Episodes ordered by (season, episode), one entry per key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EpisodeIndex {
    episodes: Vec<Episode>,
}

impl EpisodeIndex {
    pub fn new(episodes: &[Episode]) -> Self {
        let mut episodes = episodes.to_vec();
        // Stable sort keeps the first entry supplied for a duplicated key.
        episodes.sort_by_key(Episode::key);
        episodes.dedup_by_key(|episode| episode.key());
        Self { episodes }
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Episode> {
        self.episodes.iter()
    }

    /// Distinct seasons, ascending.
    pub fn seasons(&self) -> Vec<u32> {
        let mut seasons: Vec<u32> = self.episodes.iter().map(|e| e.season).collect();
        seasons.dedup();
        seasons
    }

    pub fn episodes_for_season(&self, season: u32) -> impl Iterator<Item = &Episode> {
        self.episodes.iter().filter(move |e| e.season == season)
    }

    pub fn get(&self, key: EpisodeKey) -> Option<&Episode> {
        self.position(key).map(|index| &self.episodes[index])
    }

    /// The episode that follows `key`, crossing into the next season.
    pub fn next_after(&self, key: EpisodeKey) -> Option<&Episode> {
        let index = self.position(key)?;
        self.episodes.get(index + 1)
    }

    pub fn first_in_season(&self, season: u32) -> Option<&Episode> {
        self.episodes_for_season(season).next()
    }

    fn position(&self, key: EpisodeKey) -> Option<usize> {
        self.episodes
            .binary_search_by_key(&key, Episode::key)
            .ok()
    }
}

impl PlayerPage {
    /// Ask the host to switch to `key`. The player itself only follows once the
    /// host passes new props back.
    pub(super) fn select_episode(&mut self, key: EpisodeKey) {
        self.close_overlays();

        match self.episodes.get(key) {
            Some(episode) => {
                info!("Switching to {} ({})", key, episode.title);
                self.sender.output(PlayerOutput::EpisodeChanged(key));
            }
            None => warn!("Ignoring selection of unknown episode {}", key),
        }
    }

    /// Jump to the first episode of `season`.
    pub(super) fn select_season(&mut self, season: u32) {
        match self.episodes.first_in_season(season).map(Episode::key) {
            Some(first) => {
                debug!("Season {} selected, starting at {}", season, first);
                self.select_episode(first);
            }
            None => {
                self.close_overlays();
                warn!("Ignoring selection of unknown season {}", season);
            }
        }
    }
}
