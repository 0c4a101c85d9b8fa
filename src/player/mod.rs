pub mod factory;
pub mod fullscreen;
pub mod source_resolver;
pub mod state;
pub mod traits;
pub mod types;

pub use factory::{PlatformServices, create_fullscreen_controller};
pub use fullscreen::{FullscreenController, FullscreenMode, NativeFullscreen, OverlayFullscreen};
pub use source_resolver::{ResolveError, ResolvedSource, SourceOrigin, SourceResolver};
pub use state::{PlaybackPhase, PlaybackState, Transition};
pub use traits::{
    FullscreenApi, FullscreenError, FullscreenVariant, HostWindow, MediaElement, MediaEvent,
    OrientationApi, PlayError, SourceGeneration,
};
pub use types::{PlaybackRate, Volume};
