use super::episode::{non_empty, Episode, EpisodeKey};

/// What to play for the current context: a direct URL and/or a stored object name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaDescriptor {
    pub direct_url: Option<String>,
    pub use_stored_file: bool,
    pub stored_file_name: Option<String>,
}

impl MediaDescriptor {
    /// The direct URL used whenever the stored file branch is skipped or fails.
    pub fn fallback_url(&self) -> Option<&str> {
        non_empty(self.direct_url.as_deref())
    }

    /// The stored object name, only when the stored file branch applies.
    pub fn stored_file(&self) -> Option<&str> {
        if self.use_stored_file {
            non_empty(self.stored_file_name.as_deref())
        } else {
            None
        }
    }
}

/// Inputs supplied by the page hosting the player.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerProps {
    pub src: String,
    pub poster: Option<String>,
    pub title: Option<String>,
    pub use_file_instead: bool,
    pub file_name: Option<String>,
    /// Empty means movie mode.
    pub episodes: Vec<Episode>,
    pub current_episode: Option<EpisodeKey>,
}

impl PlayerProps {
    pub fn movie(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            ..Self::default()
        }
    }

    pub fn series(episodes: Vec<Episode>, current: EpisodeKey) -> Self {
        Self {
            episodes,
            current_episode: Some(current),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_poster(mut self, poster: impl Into<String>) -> Self {
        self.poster = Some(poster.into());
        self
    }

    pub fn with_stored_file(mut self, file_name: impl Into<String>) -> Self {
        self.use_file_instead = true;
        self.file_name = Some(file_name.into());
        self
    }

    /// The episode entry matching the current pointer, if any.
    pub fn current_episode_data(&self) -> Option<&Episode> {
        let current = self.current_episode?;
        self.episodes.iter().find(|e| e.key() == current)
    }

    /// Descriptor after per-episode overrides: an episode's stored-file flag is OR-ed
    /// with the top-level flag and its file name / URL win when present.
    pub fn effective_descriptor(&self) -> MediaDescriptor {
        let episode = self.current_episode_data();

        let use_stored_file =
            self.use_file_instead || episode.is_some_and(Episode::uses_stored_file);
        let stored_file_name = episode
            .and_then(Episode::file_name)
            .or_else(|| non_empty(self.file_name.as_deref()))
            .map(str::to_string);
        let direct_url = episode
            .and_then(Episode::url)
            .or_else(|| non_empty(Some(self.src.as_str())))
            .map(str::to_string);

        MediaDescriptor {
            direct_url,
            use_stored_file,
            stored_file_name,
        }
    }

    /// True when a change from `previous` requires resolving the source again.
    pub fn source_inputs_changed(&self, previous: &PlayerProps) -> bool {
        self.src != previous.src
            || self.use_file_instead != previous.use_file_instead
            || self.file_name != previous.file_name
            || self.episodes != previous.episodes
            || self.current_episode != previous.current_episode
    }

    /// Heading shown above the player.
    pub fn display_title(&self) -> Option<String> {
        match self.current_episode_data() {
            Some(episode) => Some(format!(
                "{} - Season {} Episode {}",
                episode.title, episode.season, episode.episode
            )),
            None => self.title.clone(),
        }
    }
}
