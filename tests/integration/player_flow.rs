use cinema_player::player::{FullscreenApi, FullscreenMode, MediaEvent};
use cinema_player::{
    Episode, EpisodeKey, PlayerInput, PlayerOutput, PlayerProps, PlayerView, mount,
};
use std::sync::Arc;

use crate::common::mocks::MockStorage;
use crate::common::{MockPlatform, config_for, source_url, wait_for_view};

fn episodes() -> Vec<Episode> {
    vec![
        Episode::new(1, 1, "Pilot").with_url("https://cdn.test/s1e1"),
        Episode::new(1, 2, "Second").with_stored_file("s1e2"),
        Episode::new(2, 1, "Return").with_url("https://cdn.test/s2e1.webm"),
    ]
}

fn storage() -> Arc<MockStorage> {
    Arc::new(MockStorage::new("https://objects.test"))
}

fn is_playing(view: &PlayerView) -> bool {
    view.screen()
        .and_then(|screen| screen.controls.as_ref())
        .is_some_and(|controls| controls.playing)
}

#[tokio::test(start_paused = true)]
async fn test_series_plays_through_to_next_episode() {
    let platform = MockPlatform::desktop();
    let config = config_for("https://project.test");
    let mut handle = mount(
        PlayerProps::series(episodes(), EpisodeKey::new(1, 1)),
        platform.services(storage()),
        &config,
    );

    let view = wait_for_view(&handle, |view| source_url(view).is_some()).await;
    assert_eq!(source_url(&view), Some("https://cdn.test/s1e1.mp4"));
    assert_eq!(
        view.screen().unwrap().title.as_deref(),
        Some("Pilot - Season 1 Episode 1")
    );

    let generation = platform.media.generation();
    for event in [
        MediaEvent::LoadStart,
        MediaEvent::LoadedMetadata { duration: 1500.0 },
        MediaEvent::CanPlay,
    ] {
        handle.send(PlayerInput::Media { generation, event });
    }

    assert!(handle.key("ArrowRight"));
    wait_for_view(&handle, |view| {
        view.screen()
            .and_then(|screen| screen.controls.as_ref())
            .is_some_and(|controls| controls.position_label == "0:10")
    })
    .await;
    assert_eq!(platform.media.seeks(), vec![10.0]);

    assert!(handle.key(" "));
    wait_for_view(&handle, is_playing).await;
    assert_eq!(platform.media.plays(), 1);

    handle.send(PlayerInput::Media {
        generation,
        event: MediaEvent::Ended,
    });
    assert_eq!(
        handle.next_output().await,
        Some(PlayerOutput::EpisodeChanged(EpisodeKey::new(1, 2)))
    );

    // The host follows the event by passing the new current episode back in.
    handle.send(PlayerInput::SetProps(PlayerProps::series(
        episodes(),
        EpisodeKey::new(1, 2),
    )));
    let view = wait_for_view(&handle, |view| {
        source_url(view) == Some("https://objects.test/movies/s1e2.mp4")
    })
    .await;
    assert!(!is_playing(&view));
    assert_eq!(platform.media.unloads(), 1);
    assert_ne!(platform.media.generation(), generation);

    handle.unmount().await;
    assert_eq!(platform.media.unloads(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_controls_fade_out_during_playback() {
    let platform = MockPlatform::desktop();
    let handle = mount(
        PlayerProps::movie("https://cdn.test/feature.mp4"),
        platform.services(storage()),
        &config_for("https://project.test"),
    );

    wait_for_view(&handle, |view| source_url(view).is_some()).await;
    let generation = platform.media.generation();
    handle.send(PlayerInput::Media {
        generation,
        event: MediaEvent::LoadedMetadata { duration: 90.0 },
    });
    handle.send(PlayerInput::Media {
        generation,
        event: MediaEvent::CanPlay,
    });
    assert!(handle.key(" "));
    wait_for_view(&handle, is_playing).await;

    let view = wait_for_view(&handle, |view| {
        view.screen().is_some_and(|screen| screen.controls.is_none())
    })
    .await;
    assert!(view.screen().unwrap().spinner.is_none());

    handle.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn test_unknown_keys_are_left_to_the_browser() {
    let platform = MockPlatform::desktop();
    let handle = mount(
        PlayerProps::movie("https://cdn.test/feature.mp4"),
        platform.services(storage()),
        &config_for("https://project.test"),
    );

    assert!(!handle.key("Enter"));
    assert!(!handle.key("ArrowUp"));
    assert!(handle.key("f"));

    let view = wait_for_view(&handle, |view| {
        view.screen()
            .is_some_and(|screen| screen.fullscreen == FullscreenMode::Native)
    })
    .await;
    assert!(view.error_message().is_none());
    assert!(platform.fullscreen.is_fullscreen());

    handle.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn test_phone_uses_overlay_fullscreen() {
    let platform = MockPlatform::phone();
    let handle = mount(
        PlayerProps::movie("https://cdn.test/feature.mp4"),
        platform.services(storage()),
        &config_for("https://project.test"),
    );

    handle.send(PlayerInput::ToggleFullscreen);
    wait_for_view(&handle, |view| {
        view.screen()
            .is_some_and(|screen| screen.fullscreen == FullscreenMode::CustomOverlay)
    })
    .await;
    assert!(!platform.fullscreen.is_fullscreen());

    handle.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn test_missing_source_shows_error_panel() {
    let platform = MockPlatform::desktop();
    let handle = mount(
        PlayerProps::default(),
        platform.services(storage()),
        &config_for("https://project.test"),
    );

    let view = wait_for_view(&handle, |view| view.error_message().is_some()).await;
    assert_eq!(view.error_message(), Some("No video source available"));
    assert!(platform.media.loads().is_empty());

    handle.unmount().await;
}
