use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info, trace, warn};

use crate::config::{Config, PlayerConfig};
use crate::models::{EpisodeKey, PlayerProps};
use crate::player::{
    FullscreenController, MediaEvent, PlatformServices, PlayError, PlaybackRate, PlaybackState,
    ResolveError, ResolvedSource, SourceGeneration, SourceResolver, Transition, Volume,
    create_fullscreen_controller,
};
use crate::utils::{Platform, PlayerError};

mod auto_play;
mod controls_visibility;
mod episode_navigation;
mod gestures;
mod keyboard;
mod orientation;
mod overlays;
mod seek_bar;
mod timers;
mod view;
mod volume;


use controls_visibility::ControlState;
use orientation::OrientationTracker;
use overlays::OverlayState;
use timers::Timers;

pub use episode_navigation::EpisodeIndex;
pub use gestures::{ClickZone, PointerKind, SurfaceGesture, TapTracker};
pub use keyboard::KeyCommand;
pub use overlays::Overlay;
pub use seek_bar::format_time;
pub use timers::TimerId;
pub use view::{
    ControlsView, EpisodeEntry, OverlayView, PlayerScreen, PlayerView, RateOption, SeasonView,
    Spinner,
};

#[derive(Debug)]
pub enum PlayerInput {
    /// New inputs from the hosting page
    SetProps(PlayerProps),
    /// Signal from the media element, tagged with the source it belongs to
    Media {
        generation: SourceGeneration,
        event: MediaEvent,
    },
    // Control widgets. Using any of them keeps the controls on screen.
    PlayPause,
    /// Seek slider, in percent of the duration
    Seek(f64),
    /// Volume slider, in percent
    SetVolume(f64),
    ToggleMute,
    SkipForward,
    SkipBackward,
    SetPlaybackRate(PlaybackRate),
    ToggleSettings,
    ToggleEpisodeList,
    SelectEpisode(EpisodeKey),
    SelectSeason(u32),
    ToggleBlur,
    ToggleFullscreen,
    /// Pointer down on a control widget that sends nothing else
    ControlInteraction,
    // Document and surface input
    Key(KeyCommand),
    SurfaceTap {
        x: f64,
        width: f64,
        pointer: PointerKind,
        at: Instant,
    },
    /// Window resize or orientation change
    ViewportChanged,
    /// Reload button of the error panel
    ReloadPage,
    // Internal
    SourceResolved {
        request: u64,
        result: Result<ResolvedSource, ResolveError>,
    },
    PlayRequestFinished {
        generation: SourceGeneration,
        result: Result<(), PlayError>,
    },
    HideControls(TimerId),
    OpenOverlay {
        overlay: Overlay,
        timer: TimerId,
    },
    OrientationSettled(TimerId),
    Unmount,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerOutput {
    /// The user picked an episode, or the current one ended and another follows.
    EpisodeChanged(EpisodeKey),
}

/// Channels back into the component and out to its host.
#[derive(Debug, Clone)]
pub struct ComponentSender {
    input: mpsc::UnboundedSender<PlayerInput>,
    output: mpsc::UnboundedSender<PlayerOutput>,
}

impl ComponentSender {
    pub fn new(
        input: mpsc::UnboundedSender<PlayerInput>,
        output: mpsc::UnboundedSender<PlayerOutput>,
    ) -> Self {
        Self { input, output }
    }

    pub fn input(&self, message: PlayerInput) {
        if let Err(e) = self.input.send(message) {
            trace!("Player is gone, dropping {:?}", e.0);
        }
    }

    pub fn output(&self, message: PlayerOutput) {
        if let Err(e) = self.output.send(message) {
            warn!("Nobody is listening for {:?}", e.0);
        }
    }
}

pub struct PlayerPage {
    props: PlayerProps,
    episodes: EpisodeIndex,
    config: PlayerConfig,
    services: PlatformServices,
    resolver: SourceResolver,
    sender: ComponentSender,
    timers: Timers,
    // Source lifecycle
    source: Option<ResolvedSource>,
    generation: SourceGeneration,
    resolve_request: u64,
    playback: PlaybackState,
    // UI state
    control_state: ControlState,
    taps: TapTracker,
    overlay: OverlayState,
    fullscreen: Box<dyn FullscreenController>,
    orientation: OrientationTracker,
    blurred: bool,
}

impl PlayerPage {
    pub fn new(
        props: PlayerProps,
        services: PlatformServices,
        config: &Config,
        sender: ComponentSender,
    ) -> Self {
        let platform = Platform::detect(
            services.window.as_ref(),
            config.player.mobile_breakpoint_px,
        );
        info!("Creating player for {:?} platform", platform);

        Self {
            episodes: EpisodeIndex::new(&props.episodes),
            props,
            config: config.player.clone(),
            resolver: SourceResolver::new(services.storage.clone(), &config.storage),
            fullscreen: create_fullscreen_controller(platform, &services),
            services,
            timers: Timers::new(sender.clone()),
            sender,
            source: None,
            generation: SourceGeneration::default(),
            resolve_request: 0,
            playback: PlaybackState::new(Volume::new(config.player.default_volume)),
            control_state: ControlState::Visible { timer: None },
            taps: TapTracker::new(config.player.double_tap_window()),
            overlay: OverlayState::Closed,
            orientation: OrientationTracker::default(),
            blurred: false,
        }
    }

    /// Start resolving the initial source and take the first orientation reading.
    pub fn mount(&mut self) {
        debug!("Mounting player");
        self.services
            .media
            .set_volume(self.playback.volume().level());
        self.request_resolution();
        self.schedule_orientation_check();
    }

    /// Cancel every pending timer and background task and release the media element.
    pub fn unmount(&mut self) {
        debug!("Unmounting player");
        self.timers.shutdown();
        self.resolve_request += 1;
        self.overlay = OverlayState::Closed;
        self.orientation.cancel();
        if let ControlState::Visible { timer } = &mut self.control_state {
            *timer = None;
        }
        if self.source.take().is_some() {
            self.services.media.unload();
        }
    }

    pub fn update(&mut self, msg: PlayerInput) {
        let was_playing = self.playback.is_playing();

        match msg {
            PlayerInput::SetProps(props) => self.set_props(props),
            PlayerInput::Media { generation, event } => self.handle_media_event(generation, event),
            PlayerInput::PlayPause => {
                self.pin_controls();
                self.toggle_play();
            }
            PlayerInput::Seek(percent) => {
                self.pin_controls();
                self.seek_to_percent(percent);
            }
            PlayerInput::SetVolume(percent) => {
                self.pin_controls();
                self.set_volume_percent(percent);
            }
            PlayerInput::ToggleMute => {
                self.pin_controls();
                self.toggle_mute();
            }
            PlayerInput::SkipForward => {
                self.pin_controls();
                self.skip(self.config.skip_seconds);
            }
            PlayerInput::SkipBackward => {
                self.pin_controls();
                self.skip(-self.config.skip_seconds);
            }
            PlayerInput::SetPlaybackRate(rate) => {
                self.pin_controls();
                self.set_playback_rate(rate);
            }
            PlayerInput::ToggleSettings => {
                self.pin_controls();
                self.toggle_overlay(Overlay::Settings);
            }
            PlayerInput::ToggleEpisodeList => {
                self.pin_controls();
                self.toggle_overlay(Overlay::EpisodeList);
            }
            PlayerInput::SelectEpisode(key) => {
                self.pin_controls();
                self.select_episode(key);
            }
            PlayerInput::SelectSeason(season) => {
                self.pin_controls();
                self.select_season(season);
            }
            PlayerInput::ToggleBlur => {
                self.pin_controls();
                self.blurred = !self.blurred;
            }
            PlayerInput::ToggleFullscreen => {
                self.pin_controls();
                self.toggle_fullscreen();
            }
            PlayerInput::ControlInteraction => self.pin_controls(),
            PlayerInput::Key(command) => self.handle_key(command),
            PlayerInput::SurfaceTap {
                x,
                width,
                pointer,
                at,
            } => self.handle_surface_tap(x, width, pointer, at),
            PlayerInput::ViewportChanged => self.schedule_orientation_check(),
            PlayerInput::ReloadPage => {
                info!("Reloading page");
                self.services.window.reload();
            }
            PlayerInput::SourceResolved { request, result } => {
                self.on_source_resolved(request, result)
            }
            PlayerInput::PlayRequestFinished { generation, result } => {
                self.on_play_request_finished(generation, result)
            }
            PlayerInput::HideControls(timer) => self.on_hide_timer(timer),
            PlayerInput::OpenOverlay { overlay, timer } => self.on_overlay_timer(overlay, timer),
            PlayerInput::OrientationSettled(timer) => self.on_orientation_settled(timer),
            PlayerInput::Unmount => self.unmount(),
        }

        let playing = self.playback.is_playing();
        if was_playing && !playing {
            self.reveal_stopped_controls();
        } else if !was_playing && playing {
            self.resume_controls_timer();
        }
    }

    fn set_props(&mut self, props: PlayerProps) {
        let resolve = props.source_inputs_changed(&self.props);

        if props.episodes != self.props.episodes {
            self.episodes = EpisodeIndex::new(&props.episodes);
            if self.episodes.is_empty() {
                self.close_overlay(Overlay::EpisodeList);
            }
        }
        self.props = props;

        if resolve {
            debug!("Source inputs changed, resolving again");
            self.request_resolution();
        }
    }

    /// Tear down the current source and resolve the one described by the props.
    fn request_resolution(&mut self) {
        self.detach_source();
        self.playback.begin_loading();

        self.resolve_request += 1;
        let request = self.resolve_request;
        let resolver = self.resolver.clone();
        let props = self.props.clone();
        let sender = self.sender.clone();
        let lifetime = self.timers.lifetime();

        tokio::spawn(async move {
            tokio::select! {
                result = resolver.resolve(&props) => {
                    sender.input(PlayerInput::SourceResolved { request, result });
                }
                _ = lifetime.cancelled() => {
                    debug!("Player unmounted, abandoning source resolution");
                }
            }
        });
    }

    fn detach_source(&mut self) {
        if self.source.take().is_some() {
            self.services.media.unload();
        }
        self.generation = self.generation.next();
        self.playback.reset_for_new_source();
    }

    fn on_source_resolved(&mut self, request: u64, result: Result<ResolvedSource, ResolveError>) {
        if request != self.resolve_request {
            debug!("Dropping result of superseded resolution #{}", request);
            return;
        }

        match result {
            Ok(source) => {
                info!("Loading {}", source.url);
                self.services.media.load(&source.url, self.generation);
                self.services
                    .media
                    .set_volume(self.playback.volume().level());
                self.source = Some(source);
            }
            Err(e) => self.report(PlayerError::from(e)),
        }
    }

    /// Fatal errors replace the player with the reload panel, the rest become a notice.
    fn report(&mut self, error: PlayerError) {
        if error.is_fatal() {
            error!("Player error: {}", error);
            self.playback.fail(error.to_string());
            self.close_overlays();
        } else {
            warn!("{}", error);
            self.playback.set_notice(error.to_string());
        }
    }

    fn handle_media_event(&mut self, generation: SourceGeneration, event: MediaEvent) {
        if generation != self.generation || self.source.is_none() {
            trace!("Dropping {:?} from stale source {:?}", event, generation);
            return;
        }

        match self.playback.apply(&event) {
            Transition::Applied => {}
            Transition::Ignored => trace!("{:?} ignored in {:?}", event, self.playback.phase()),
            Transition::Ended => self.handle_playback_ended(),
            Transition::Failed(message) => self.report(PlayerError::Playback(message)),
        }
    }

    fn toggle_play(&mut self) {
        if self.source.is_none() || !self.playback.can_play() {
            debug!("Nothing playable yet, ignoring play toggle");
            return;
        }

        if self.playback.is_playing() {
            self.services.media.pause();
            self.playback.mark_paused();
            return;
        }

        let media = self.services.media.clone();
        let sender = self.sender.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let result = media.play().await;
            sender.input(PlayerInput::PlayRequestFinished { generation, result });
        });
    }

    fn on_play_request_finished(
        &mut self,
        generation: SourceGeneration,
        result: Result<(), PlayError>,
    ) {
        if generation != self.generation {
            trace!("Dropping play result for stale source {:?}", generation);
            return;
        }

        match result {
            Ok(()) => self.playback.mark_playing(),
            Err(e) => self.report(PlayerError::from(e)),
        }
    }

    fn toggle_fullscreen(&mut self) {
        self.fullscreen.toggle();
        debug!("Fullscreen mode {:?}", self.fullscreen.mode());
    }

    fn handle_key(&mut self, command: KeyCommand) {
        if self.playback.error_message().is_some() {
            return;
        }

        match command {
            KeyCommand::TogglePlay => self.toggle_play(),
            KeyCommand::SkipForward => self.skip(self.config.skip_seconds),
            KeyCommand::SkipBackward => self.skip(-self.config.skip_seconds),
            KeyCommand::ToggleFullscreen => self.toggle_fullscreen(),
            KeyCommand::ToggleMute => self.toggle_mute(),
        }

        if command.rearms_controls() {
            self.show_controls_with_timeout();
        }
    }

    fn handle_surface_tap(&mut self, x: f64, width: f64, pointer: PointerKind, at: Instant) {
        if self.playback.error_message().is_some() {
            return;
        }

        match self.taps.register(pointer, x, width, at) {
            SurfaceGesture::ToggleControls => self.toggle_controls(),
            SurfaceGesture::DoubleTap(ClickZone::Right) => self.skip(self.config.skip_seconds),
            SurfaceGesture::DoubleTap(ClickZone::Left) => self.skip(-self.config.skip_seconds),
            SurfaceGesture::DoubleTap(ClickZone::Middle) => self.toggle_play(),
        }
    }
}

/// A mounted player running on its own task.
pub struct PlayerHandle {
    input: mpsc::UnboundedSender<PlayerInput>,
    output: mpsc::UnboundedReceiver<PlayerOutput>,
    view: watch::Receiver<PlayerView>,
    task: Option<JoinHandle<()>>,
}

impl PlayerHandle {
    pub fn send(&self, message: PlayerInput) {
        if self.input.send(message).is_err() {
            warn!("Player task has stopped");
        }
    }

    /// Feed a DOM `KeyboardEvent.key`. Returns whether the key was handled, in
    /// which case the host prevents the browser default.
    pub fn key(&self, key: &str) -> bool {
        match KeyCommand::from_key(key) {
            Some(command) => {
                self.send(PlayerInput::Key(command));
                true
            }
            None => false,
        }
    }

    pub async fn next_output(&mut self) -> Option<PlayerOutput> {
        self.output.recv().await
    }

    pub fn try_next_output(&mut self) -> Option<PlayerOutput> {
        self.output.try_recv().ok()
    }

    /// Latest published view.
    pub fn view(&self) -> PlayerView {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PlayerView> {
        self.view.clone()
    }

    /// Stop the player and wait for its task to finish.
    pub async fn unmount(mut self) {
        self.send(PlayerInput::Unmount);
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            error!("Player task failed: {}", e);
        }
    }
}

impl Drop for PlayerHandle {
    fn drop(&mut self) {
        // The task may already be gone after an explicit unmount.
        let _ = self.input.send(PlayerInput::Unmount);
    }
}

/// Mount a player on a new task. Every message is processed in order and a
/// fresh view is published after each one.
pub fn mount(props: PlayerProps, services: PlatformServices, config: &Config) -> PlayerHandle {
    let (input_tx, mut input_rx) = mpsc::unbounded_channel();
    let (output_tx, output_rx) = mpsc::unbounded_channel();

    let sender = ComponentSender::new(input_tx.clone(), output_tx);
    let mut page = PlayerPage::new(props, services, config, sender);
    page.mount();

    let (view_tx, view_rx) = watch::channel(page.view());
    let task = tokio::spawn(async move {
        while let Some(msg) = input_rx.recv().await {
            let unmount = matches!(msg, PlayerInput::Unmount);
            page.update(msg);
            view_tx.send_replace(page.view());
            if unmount {
                break;
            }
        }
        debug!("Player task finished");
    });

    PlayerHandle {
        input: input_tx,
        output: output_rx,
        view: view_rx,
        task: Some(task),
    }
}

impl std::fmt::Debug for PlayerPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerPage")
            .field("props", &self.props)
            .field("source", &self.source)
            .field("generation", &self.generation)
            .field("playback", &self.playback)
            .field("control_state", &self.control_state)
            .field("overlay", &self.overlay)
            .field("blurred", &self.blurred)
            .finish()
    }
}
