use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use super::traits::{FullscreenApi, FullscreenVariant, OrientationApi};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FullscreenMode {
    Windowed,
    /// Browser Fullscreen API
    Native,
    /// Fixed full-viewport overlay used where the native API is unreliable
    CustomOverlay,
}

/// Fullscreen strategy, chosen once when the player mounts.
pub trait FullscreenController: Send {
    fn toggle(&mut self);

    fn is_active(&self) -> bool;

    fn mode(&self) -> FullscreenMode;
}

/// Desktop strategy over the native Fullscreen API and its vendor-prefixed variants.
pub struct NativeFullscreen {
    api: Arc<dyn FullscreenApi>,
}

impl NativeFullscreen {
    pub fn new(api: Arc<dyn FullscreenApi>) -> Self {
        Self { api }
    }

    fn request(&self) {
        for variant in FullscreenVariant::ALL {
            match self.api.request(variant) {
                Ok(()) => {
                    debug!("Entered fullscreen via {:?} API", variant);
                    return;
                }
                Err(e) => debug!("Fullscreen request failed: {}", e),
            }
        }
        info!("No fullscreen API accepted the request");
    }

    fn exit(&self) {
        for variant in FullscreenVariant::ALL {
            match self.api.exit(variant) {
                Ok(()) => {
                    debug!("Left fullscreen via {:?} API", variant);
                    return;
                }
                Err(e) => debug!("Fullscreen exit failed: {}", e),
            }
        }
        info!("No fullscreen API accepted the exit");
    }
}

impl FullscreenController for NativeFullscreen {
    fn toggle(&mut self) {
        if self.api.is_fullscreen() {
            self.exit();
        } else {
            self.request();
        }
    }

    fn is_active(&self) -> bool {
        self.api.is_fullscreen()
    }

    fn mode(&self) -> FullscreenMode {
        if self.is_active() {
            FullscreenMode::Native
        } else {
            FullscreenMode::Windowed
        }
    }
}

/// Mobile strategy: the player is laid out as a fixed overlay covering the viewport,
/// with a best-effort landscape lock while it is active.
pub struct OverlayFullscreen {
    orientation: Arc<dyn OrientationApi>,
    active: bool,
}

impl OverlayFullscreen {
    pub fn new(orientation: Arc<dyn OrientationApi>) -> Self {
        Self {
            orientation,
            active: false,
        }
    }
}

impl FullscreenController for OverlayFullscreen {
    fn toggle(&mut self) {
        self.active = !self.active;

        let result = if self.active {
            self.orientation.lock_landscape()
        } else {
            self.orientation.unlock()
        };
        if let Err(e) = result {
            debug!("Ignoring orientation failure: {}", e);
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn mode(&self) -> FullscreenMode {
        if self.active {
            FullscreenMode::CustomOverlay
        } else {
            FullscreenMode::Windowed
        }
    }
}
