use thiserror::Error;

use crate::player::{PlayError, ResolveError};

/// Failures that reach the player's error handling.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlayerError {
    #[error("{0}")]
    Resolve(#[from] ResolveError),

    /// The media element failed to load or decode the source.
    #[error("{0}")]
    Playback(String),

    #[error("{0}")]
    PlayRejected(#[from] PlayError),
}

impl PlayerError {
    /// Whether the error replaces the whole player with the reload panel.
    /// A refused play request only shows an inline notice; pressing play retries it.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, PlayerError::PlayRejected(_))
    }
}
