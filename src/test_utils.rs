#![cfg(test)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use url::Url;

use crate::backends::{StorageBackend, StorageError};
use crate::player::{
    FullscreenApi, FullscreenError, FullscreenVariant, HostWindow, MediaElement, OrientationApi,
    PlatformServices, PlayError, SourceGeneration,
};

/// Storage double that either serves `{base}/{object_path}` or fails every lookup.
#[derive(Debug, Clone, Default)]
pub struct FakeStorage {
    base: Option<String>,
    lookups: Arc<Mutex<Vec<(String, String)>>>,
}

impl FakeStorage {
    pub fn serving(base: &str) -> Self {
        Self {
            base: Some(base.trim_end_matches('/').to_string()),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn lookups(&self) -> Vec<(String, String)> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl StorageBackend for FakeStorage {
    async fn get_public_url(&self, bucket: &str, object_path: &str) -> Result<Url, StorageError> {
        self.lookups
            .lock()
            .unwrap()
            .push((bucket.to_string(), object_path.to_string()));

        match &self.base {
            Some(base) => Ok(Url::parse(&format!("{}/{}", base, object_path)).unwrap()),
            None => Err(StorageError::NotFound {
                bucket: bucket.to_string(),
                path: object_path.to_string(),
            }),
        }
    }
}

/// Everything the player asked the media element to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaCall {
    Load(String, SourceGeneration),
    Unload,
    Play,
    Pause,
    SetCurrentTime(f64),
    SetVolume(f64),
    SetPlaybackRate(f64),
}

#[derive(Debug, Default)]
pub struct FakeMediaElement {
    calls: Mutex<Vec<MediaCall>>,
    play_error: Mutex<Option<PlayError>>,
}

impl FakeMediaElement {
    /// Refuse every following play request with `error`.
    pub fn reject_play(&self, error: PlayError) {
        *self.play_error.lock().unwrap() = Some(error);
    }

    pub fn calls(&self) -> Vec<MediaCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn loads(&self) -> Vec<(String, SourceGeneration)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MediaCall::Load(url, generation) => Some((url, generation)),
                _ => None,
            })
            .collect()
    }

    /// Generation of the most recent load, used to tag simulated events.
    pub fn generation(&self) -> SourceGeneration {
        self.loads()
            .last()
            .map(|(_, generation)| *generation)
            .unwrap_or_default()
    }

    pub fn count(&self, wanted: &MediaCall) -> usize {
        self.calls().iter().filter(|call| *call == wanted).count()
    }

    pub fn seeks(&self) -> Vec<f64> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MediaCall::SetCurrentTime(seconds) => Some(seconds),
                _ => None,
            })
            .collect()
    }

    pub fn last_volume(&self) -> Option<f64> {
        self.calls().into_iter().rev().find_map(|call| match call {
            MediaCall::SetVolume(volume) => Some(volume),
            _ => None,
        })
    }

    fn record(&self, call: MediaCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl MediaElement for FakeMediaElement {
    fn load(&self, url: &str, generation: SourceGeneration) {
        self.record(MediaCall::Load(url.to_string(), generation));
    }

    fn unload(&self) {
        self.record(MediaCall::Unload);
    }

    async fn play(&self) -> Result<(), PlayError> {
        self.record(MediaCall::Play);
        match self.play_error.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn pause(&self) {
        self.record(MediaCall::Pause);
    }

    fn set_current_time(&self, seconds: f64) {
        self.record(MediaCall::SetCurrentTime(seconds));
    }

    fn set_volume(&self, volume: f64) {
        self.record(MediaCall::SetVolume(volume));
    }

    fn set_playback_rate(&self, rate: f64) {
        self.record(MediaCall::SetPlaybackRate(rate));
    }
}

#[derive(Debug, Default)]
pub struct FakeFullscreenApi {
    supported: Vec<FullscreenVariant>,
    active: Mutex<bool>,
    attempts: Mutex<Vec<FullscreenVariant>>,
}

impl FakeFullscreenApi {
    pub fn supporting(variants: &[FullscreenVariant]) -> Self {
        Self {
            supported: variants.to_vec(),
            ..Self::default()
        }
    }

    /// Variants tried by `request`, in order.
    pub fn attempts(&self) -> Vec<FullscreenVariant> {
        self.attempts.lock().unwrap().clone()
    }
}

impl FullscreenApi for FakeFullscreenApi {
    fn is_fullscreen(&self) -> bool {
        *self.active.lock().unwrap()
    }

    fn request(&self, variant: FullscreenVariant) -> Result<(), FullscreenError> {
        self.attempts.lock().unwrap().push(variant);
        if self.supported.contains(&variant) {
            *self.active.lock().unwrap() = true;
            Ok(())
        } else {
            Err(FullscreenError::Unsupported(variant))
        }
    }

    fn exit(&self, variant: FullscreenVariant) -> Result<(), FullscreenError> {
        if self.supported.contains(&variant) {
            *self.active.lock().unwrap() = false;
            Ok(())
        } else {
            Err(FullscreenError::Unsupported(variant))
        }
    }
}

#[derive(Debug, Default)]
pub struct FakeOrientation {
    fail: bool,
    lock_attempts: Mutex<usize>,
}

impl FakeOrientation {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn lock_attempts(&self) -> usize {
        *self.lock_attempts.lock().unwrap()
    }
}

impl OrientationApi for FakeOrientation {
    fn lock_landscape(&self) -> Result<(), FullscreenError> {
        *self.lock_attempts.lock().unwrap() += 1;
        if self.fail {
            Err(FullscreenError::Orientation("not supported".to_string()))
        } else {
            Ok(())
        }
    }

    fn unlock(&self) -> Result<(), FullscreenError> {
        if self.fail {
            Err(FullscreenError::Orientation("not supported".to_string()))
        } else {
            Ok(())
        }
    }
}

#[derive(Debug)]
pub struct FakeWindow {
    size: Mutex<(f64, f64)>,
    touch: bool,
    reloads: Mutex<usize>,
}

impl FakeWindow {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Mutex::new((width, height)),
            touch: false,
            reloads: Mutex::new(0),
        }
    }

    pub fn touch(mut self) -> Self {
        self.touch = true;
        self
    }

    pub fn resize(&self, width: f64, height: f64) {
        *self.size.lock().unwrap() = (width, height);
    }

    pub fn reloads(&self) -> usize {
        *self.reloads.lock().unwrap()
    }
}

impl HostWindow for FakeWindow {
    fn inner_size(&self) -> (f64, f64) {
        *self.size.lock().unwrap()
    }

    fn is_touch_capable(&self) -> bool {
        self.touch
    }

    fn reload(&self) {
        *self.reloads.lock().unwrap() += 1;
    }
}

/// Recording doubles behind a [`PlatformServices`] bundle.
pub struct FakePlatform {
    pub media: Arc<FakeMediaElement>,
    pub storage: FakeStorage,
    pub fullscreen: Arc<FakeFullscreenApi>,
    pub orientation: Arc<FakeOrientation>,
    pub window: Arc<FakeWindow>,
}

impl FakePlatform {
    pub fn desktop() -> Self {
        Self::with_window(FakeWindow::new(1280.0, 800.0))
    }

    pub fn mobile() -> Self {
        Self::with_window(FakeWindow::new(390.0, 844.0).touch())
    }

    pub fn with_window(window: FakeWindow) -> Self {
        Self {
            media: Arc::new(FakeMediaElement::default()),
            storage: FakeStorage::serving("https://storage.test/public"),
            fullscreen: Arc::new(FakeFullscreenApi::supporting(&[FullscreenVariant::Standard])),
            orientation: Arc::new(FakeOrientation::default()),
            window: Arc::new(window),
        }
    }

    pub fn with_storage(mut self, storage: FakeStorage) -> Self {
        self.storage = storage;
        self
    }

    pub fn services(&self) -> PlatformServices {
        PlatformServices {
            media: self.media.clone(),
            storage: Arc::new(self.storage.clone()),
            fullscreen: self.fullscreen.clone(),
            orientation: self.orientation.clone(),
            window: self.window.clone(),
        }
    }
}
