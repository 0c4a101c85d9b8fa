use serde::{Deserialize, Serialize};
use std::fmt;

/// Composite key of an episode inside a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EpisodeKey {
    pub season: u32,
    pub episode: u32,
}

impl EpisodeKey {
    pub fn new(season: u32, episode: u32) -> Self {
        Self { season, episode }
    }
}

impl fmt::Display for EpisodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}E{}", self.season, self.episode)
    }
}

/// One entry of a series as stored in the catalog's `episodes` column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub season: u32,
    pub episode: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_file_path: Option<String>,
    #[serde(default)]
    pub video_file_name: Option<String>,
    #[serde(default)]
    pub use_file_instead_of_url: Option<bool>,
}

impl Episode {
    pub fn new(season: u32, episode: u32, title: impl Into<String>) -> Self {
        Self {
            season,
            episode,
            title: title.into(),
            video_url: None,
            video_file_path: None,
            video_file_name: None,
            use_file_instead_of_url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.video_url = Some(url.into());
        self
    }

    pub fn with_stored_file(mut self, file_name: impl Into<String>) -> Self {
        self.video_file_name = Some(file_name.into());
        self.use_file_instead_of_url = Some(true);
        self
    }

    pub fn key(&self) -> EpisodeKey {
        EpisodeKey::new(self.season, self.episode)
    }

    pub fn uses_stored_file(&self) -> bool {
        self.use_file_instead_of_url.unwrap_or(false)
    }

    /// Direct URL of this episode, if one is set.
    pub fn url(&self) -> Option<&str> {
        non_empty(self.video_url.as_deref())
    }

    /// Name of the stored object backing this episode, if one is set.
    pub fn file_name(&self) -> Option<&str> {
        non_empty(self.video_file_name.as_deref())
    }

    /// Parse the catalog's JSON episode column. A `null` column means no episodes.
    pub fn parse_list(json: &str) -> Result<Vec<Episode>, serde_json::Error> {
        let episodes: Option<Vec<Episode>> = serde_json::from_str(json)?;
        Ok(episodes.unwrap_or_default())
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
