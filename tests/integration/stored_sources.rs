use cinema_player::{PlayerProps, SupabaseStorage, mount};
use mockito::Server;
use std::sync::Arc;

use crate::common::{MockPlatform, config_for, source_url, wait_for_view};

#[tokio::test]
async fn test_verified_stored_file_is_played() {
    let mut server = Server::new_async().await;
    let probe = server
        .mock("HEAD", "/storage/v1/object/public/movies/movies/feature.mp4")
        .with_status(200)
        .create_async()
        .await;

    let mut config = config_for(&server.url());
    config.storage.verify_objects = true;
    let storage = Arc::new(SupabaseStorage::new(&config.storage).unwrap());

    let platform = MockPlatform::desktop();
    let handle = mount(
        PlayerProps::movie("https://cdn.test/backup").with_stored_file("feature"),
        platform.services(storage),
        &config,
    );

    let view = wait_for_view(&handle, |view| source_url(view).is_some()).await;
    assert_eq!(
        source_url(&view),
        Some(format!("{}/storage/v1/object/public/movies/movies/feature.mp4", server.url()).as_str())
    );
    probe.assert_async().await;

    handle.unmount().await;
}

#[tokio::test]
async fn test_missing_stored_file_falls_back_to_direct_url() {
    let mut server = Server::new_async().await;
    let probe = server
        .mock("HEAD", "/storage/v1/object/public/movies/movies/feature.mp4")
        .with_status(404)
        .create_async()
        .await;

    let mut config = config_for(&server.url());
    config.storage.verify_objects = true;
    let storage = Arc::new(SupabaseStorage::new(&config.storage).unwrap());

    let platform = MockPlatform::desktop();
    let handle = mount(
        PlayerProps::movie("https://cdn.test/backup").with_stored_file("feature"),
        platform.services(storage),
        &config,
    );

    let view = wait_for_view(&handle, |view| source_url(view).is_some()).await;
    assert_eq!(source_url(&view), Some("https://cdn.test/backup.mp4"));
    assert!(view.error_message().is_none());
    probe.assert_async().await;

    handle.unmount().await;
}

#[tokio::test]
async fn test_missing_stored_file_without_fallback_is_fatal() {
    let mut server = Server::new_async().await;
    server
        .mock("HEAD", "/storage/v1/object/public/movies/movies/feature.mp4")
        .with_status(404)
        .create_async()
        .await;

    let mut config = config_for(&server.url());
    config.storage.verify_objects = true;
    let storage = Arc::new(SupabaseStorage::new(&config.storage).unwrap());

    let platform = MockPlatform::desktop();
    let handle = mount(
        PlayerProps::default().with_stored_file("feature"),
        platform.services(storage),
        &config,
    );

    let view = wait_for_view(&handle, |view| view.error_message().is_some()).await;
    assert!(view.error_message().unwrap().contains("movies/feature.mp4"));
    assert!(platform.media.loads().is_empty());

    handle.unmount().await;
}
