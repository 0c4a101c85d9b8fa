pub mod episode;
pub mod media;

pub use episode::{Episode, EpisodeKey};
pub use media::{MediaDescriptor, PlayerProps};
