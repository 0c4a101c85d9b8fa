// Platform-agnostic seams between the player and its host.
// A web front end implements these over the HTML media element and DOM APIs;
// tests implement them with recording fakes.

use async_trait::async_trait;
use thiserror::Error;

/// Identifies one attached source. Signals tagged with an older generation
/// belong to a source that has been torn down and are dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceGeneration(u64);

impl SourceGeneration {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Lifecycle signals raised by the media element.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    LoadStart,
    LoadedMetadata { duration: f64 },
    CanPlay,
    CanPlayThrough,
    Waiting,
    Progress { buffered_ranges: usize },
    Play,
    Pause,
    TimeUpdate { current_time: f64 },
    Ended,
    Error { message: Option<String> },
}

/// Reasons the element refuses a play request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlayError {
    /// Autoplay policy or missing user gesture
    #[error("Playback was blocked: {0}")]
    NotAllowed(String),

    /// A newer load or pause interrupted the request
    #[error("Playback request aborted: {0}")]
    Aborted(String),

    #[error("Source not supported: {0}")]
    NotSupported(String),
}

/// The single media element owned by a player instance.
#[async_trait]
pub trait MediaElement: Send + Sync {
    /// Point the element at `url`. Every signal emitted for this source must be
    /// delivered tagged with `generation`.
    fn load(&self, url: &str, generation: SourceGeneration);

    /// Detach from the current source and stop emitting signals for it.
    fn unload(&self);

    /// Request playback. Resolves once playback has begun or the request was refused.
    async fn play(&self) -> Result<(), PlayError>;

    fn pause(&self);

    fn set_current_time(&self, seconds: f64);

    fn set_volume(&self, volume: f64);

    fn set_playback_rate(&self, rate: f64);
}

/// Native fullscreen entry points, tried in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenVariant {
    Standard,
    Webkit,
    Moz,
    Ms,
}

impl FullscreenVariant {
    pub const ALL: [FullscreenVariant; 4] = [
        FullscreenVariant::Standard,
        FullscreenVariant::Webkit,
        FullscreenVariant::Moz,
        FullscreenVariant::Ms,
    ];
}

/// Fullscreen and orientation failures. Logged, never shown to the user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FullscreenError {
    #[error("{0:?} fullscreen API is not available")]
    Unsupported(FullscreenVariant),

    #[error("Fullscreen request rejected: {0}")]
    Rejected(String),

    #[error("Orientation lock unavailable: {0}")]
    Orientation(String),
}

pub trait FullscreenApi: Send + Sync {
    /// Whether the document currently has a fullscreen element.
    fn is_fullscreen(&self) -> bool;

    fn request(&self, variant: FullscreenVariant) -> Result<(), FullscreenError>;

    fn exit(&self, variant: FullscreenVariant) -> Result<(), FullscreenError>;
}

pub trait OrientationApi: Send + Sync {
    fn lock_landscape(&self) -> Result<(), FullscreenError>;

    fn unlock(&self) -> Result<(), FullscreenError>;
}

/// The browser window hosting the player.
pub trait HostWindow: Send + Sync {
    /// Viewport width and height in CSS pixels.
    fn inner_size(&self) -> (f64, f64);

    fn is_touch_capable(&self) -> bool;

    /// Full page reload, the only recovery offered after a playback error.
    fn reload(&self);
}
