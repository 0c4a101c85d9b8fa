use async_trait::async_trait;
use cinema_player::backends::{StorageBackend, StorageError};
use cinema_player::player::{
    FullscreenApi, FullscreenError, FullscreenVariant, HostWindow, MediaElement, OrientationApi,
    PlatformServices, PlayError, SourceGeneration,
};
use std::sync::{Arc, Mutex};
use url::Url;

#[derive(Debug, Default)]
pub struct MockMediaElement {
    loads: Mutex<Vec<(String, SourceGeneration)>>,
    unloads: Mutex<usize>,
    plays: Mutex<usize>,
    seeks: Mutex<Vec<f64>>,
}

impl MockMediaElement {
    pub fn loads(&self) -> Vec<(String, SourceGeneration)> {
        self.loads.lock().unwrap().clone()
    }

    pub fn generation(&self) -> SourceGeneration {
        self.loads()
            .last()
            .map(|(_, generation)| *generation)
            .expect("nothing loaded yet")
    }

    pub fn unloads(&self) -> usize {
        *self.unloads.lock().unwrap()
    }

    pub fn plays(&self) -> usize {
        *self.plays.lock().unwrap()
    }

    pub fn seeks(&self) -> Vec<f64> {
        self.seeks.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaElement for MockMediaElement {
    fn load(&self, url: &str, generation: SourceGeneration) {
        self.loads.lock().unwrap().push((url.to_string(), generation));
    }

    fn unload(&self) {
        *self.unloads.lock().unwrap() += 1;
    }

    async fn play(&self) -> Result<(), PlayError> {
        *self.plays.lock().unwrap() += 1;
        Ok(())
    }

    fn pause(&self) {}

    fn set_current_time(&self, seconds: f64) {
        self.seeks.lock().unwrap().push(seconds);
    }

    fn set_volume(&self, _volume: f64) {}

    fn set_playback_rate(&self, _rate: f64) {}
}

/// Storage that serves every object from a fixed CDN prefix.
#[derive(Debug)]
pub struct MockStorage {
    base: String,
}

impl MockStorage {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.to_string(),
        }
    }
}

#[async_trait]
impl StorageBackend for MockStorage {
    async fn get_public_url(&self, _bucket: &str, object_path: &str) -> Result<Url, StorageError> {
        Url::parse(&format!("{}/{}", self.base, object_path))
            .map_err(|e| StorageError::InvalidUrl(e.to_string()))
    }
}

#[derive(Debug, Default)]
pub struct MockFullscreen {
    active: Mutex<bool>,
}

impl FullscreenApi for MockFullscreen {
    fn is_fullscreen(&self) -> bool {
        *self.active.lock().unwrap()
    }

    fn request(&self, variant: FullscreenVariant) -> Result<(), FullscreenError> {
        match variant {
            FullscreenVariant::Webkit => {
                *self.active.lock().unwrap() = true;
                Ok(())
            }
            other => Err(FullscreenError::Unsupported(other)),
        }
    }

    fn exit(&self, _variant: FullscreenVariant) -> Result<(), FullscreenError> {
        *self.active.lock().unwrap() = false;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MockOrientation;

impl OrientationApi for MockOrientation {
    fn lock_landscape(&self) -> Result<(), FullscreenError> {
        Err(FullscreenError::Orientation("not supported".to_string()))
    }

    fn unlock(&self) -> Result<(), FullscreenError> {
        Ok(())
    }
}

#[derive(Debug)]
pub struct MockWindow {
    size: (f64, f64),
    touch: bool,
}

impl HostWindow for MockWindow {
    fn inner_size(&self) -> (f64, f64) {
        self.size
    }

    fn is_touch_capable(&self) -> bool {
        self.touch
    }

    fn reload(&self) {}
}

pub struct MockPlatform {
    pub media: Arc<MockMediaElement>,
    pub fullscreen: Arc<MockFullscreen>,
    window: MockWindow,
}

impl MockPlatform {
    pub fn desktop() -> Self {
        Self {
            media: Arc::new(MockMediaElement::default()),
            fullscreen: Arc::new(MockFullscreen::default()),
            window: MockWindow {
                size: (1920.0, 1080.0),
                touch: false,
            },
        }
    }

    pub fn phone() -> Self {
        Self {
            window: MockWindow {
                size: (390.0, 844.0),
                touch: true,
            },
            ..Self::desktop()
        }
    }

    pub fn services(&self, storage: Arc<dyn StorageBackend>) -> PlatformServices {
        PlatformServices {
            media: self.media.clone(),
            storage,
            fullscreen: self.fullscreen.clone(),
            orientation: Arc::new(MockOrientation),
            window: Arc::new(MockWindow {
                size: self.window.size,
                touch: self.window.touch,
            }),
        }
    }
}
