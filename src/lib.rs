// Headless video player component: source resolution, playback state, controls,
// gestures and episode navigation. A front end supplies the platform traits and
// renders `PlayerView` snapshots.

pub mod backends;
pub mod config;
pub mod constants;
pub mod models;
pub mod player;
pub mod ui;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use backends::{StorageBackend, StorageError, SupabaseStorage};
pub use config::Config;
pub use models::{Episode, EpisodeKey, MediaDescriptor, PlayerProps};
pub use player::{PlatformServices, ResolvedSource, SourceResolver};
pub use ui::pages::player::{
    KeyCommand, Overlay, PlayerHandle, PlayerInput, PlayerOutput, PlayerPage, PlayerView,
    PointerKind, mount,
};
pub use utils::PlayerError;
