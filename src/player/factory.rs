use std::sync::Arc;
use tracing::info;

use super::fullscreen::{FullscreenController, NativeFullscreen, OverlayFullscreen};
use super::traits::{FullscreenApi, HostWindow, MediaElement, OrientationApi};
use crate::backends::StorageBackend;
use crate::utils::Platform;

/// Everything the host supplies when mounting a player.
#[derive(Clone)]
pub struct PlatformServices {
    pub media: Arc<dyn MediaElement>,
    pub storage: Arc<dyn StorageBackend>,
    pub fullscreen: Arc<dyn FullscreenApi>,
    pub orientation: Arc<dyn OrientationApi>,
    pub window: Arc<dyn HostWindow>,
}

/// Pick the fullscreen strategy for the detected platform.
pub fn create_fullscreen_controller(
    platform: Platform,
    services: &PlatformServices,
) -> Box<dyn FullscreenController> {
    match platform {
        Platform::Desktop => {
            info!("Using native fullscreen");
            Box::new(NativeFullscreen::new(services.fullscreen.clone()))
        }
        Platform::Mobile => {
            info!("Using custom overlay fullscreen");
            Box::new(OverlayFullscreen::new(services.orientation.clone()))
        }
    }
}
