use std::collections::HashMap;
use std::sync::Arc;

use trimx_timeline::adapters::{
    CatalogAdapter, HeadlessMediaElement, JsonStoreAdapter, MemoryStoreAdapter,
};
use trimx_timeline::app::{AppContainer, DefaultAppContainer, SessionSettings};
use trimx_timeline::engine::{
    PlaybackCommand, PointerEvent, PointerTarget, SaveResolution, SaveState,
};
use trimx_timeline::ports::PersistencePort;
use trimx_timeline::*;

/// Test utilities for editing sessions
mod test_utils {
    use super::*;

    pub const CATALOG: &str = r#"
        [[clips]]
        id = "beach"
        url = "https://cdn.example/beach.mp4"
        name = "Beach"
        owner_id = "owner-7"
        duration = 120.0

        [[clips]]
        id = "broken"
        url = "https://cdn.example/broken.mp4"
        name = "Broken"
    "#;

    pub fn container(store: Arc<dyn PersistencePort>) -> DefaultAppContainer {
        let catalog = CatalogAdapter::from_toml(CATALOG).unwrap();
        let library = catalog.durations();
        DefaultAppContainer::with_ports(
            Arc::new(catalog),
            store,
            library,
            SessionSettings::default(),
        )
    }

    pub async fn open(
        container: &DefaultAppContainer,
        id: &str,
    ) -> (EditSession, Arc<HeadlessMediaElement>) {
        let media = container.media_element();
        let session = container
            .open_session_interactor()
            .open(id, media.clone())
            .await
            .unwrap();
        (session, media)
    }

    /// Feed everything the media element has queued into the session
    pub fn pump(
        session: &mut EditSession,
        events: Vec<ports::MediaEvent>,
    ) -> Result<(), DomainError> {
        for event in events {
            session.on_media(event)?;
        }
        Ok(())
    }
}

use test_utils::*;

#[tokio::test]
async fn test_scenario_a_end_clamps_past_start() {
    let container = container(Arc::new(MemoryStoreAdapter::new()));
    let (mut session, media) = open(&container, "beach").await;
    pump(&mut session, media.finish_load()).unwrap();

    session.edit_start_field("10").unwrap();
    session.edit_end_field("5").unwrap();

    let range = session.snapshot();
    assert_eq!(range.start, 10.0);
    assert!((range.end - 10.1).abs() < 1e-9);
}

#[tokio::test]
async fn test_scenario_b_playback_pauses_at_end() {
    let container = container(Arc::new(MemoryStoreAdapter::new()));
    let (mut session, media) = open(&container, "beach").await;
    pump(&mut session, media.finish_load()).unwrap();

    session.edit_start_field("10").unwrap();
    session.edit_end_field("20").unwrap();
    session.on_playback(PlaybackCommand::SkipToStart).unwrap();
    session.on_playback(PlaybackCommand::TogglePlayPause).unwrap();
    pump(&mut session, media.take_events()).unwrap();

    pump(&mut session, media.advance(4.0)).unwrap();
    assert!(session.is_playing());
    assert_eq!(session.snapshot().playhead, 14.0);

    pump(&mut session, media.advance(6.0)).unwrap();
    assert!(!session.is_playing());
    assert_eq!(session.snapshot().playhead, 20.0);

    // Exhausted selection restarts from its start
    session.on_playback(PlaybackCommand::TogglePlayPause).unwrap();
    assert_eq!(media.current_time(), 10.0);
    assert!(media.is_playing());
}

#[tokio::test]
async fn test_scenario_c_square_overlay() {
    let container = container(Arc::new(MemoryStoreAdapter::new()));
    let (mut session, _media) = open(&container, "beach").await;
    session.set_aspect(AspectPreset::Square).unwrap();

    let overlay = session.overlay(domain::model::BoxSize::new(400.0, 300.0));
    assert_eq!((overlay.left, overlay.top), (50.0, 0.0));
    assert_eq!((overlay.width, overlay.height), (300.0, 300.0));
}

#[tokio::test]
async fn test_scenario_d_empty_name_not_sent() {
    let store = Arc::new(MemoryStoreAdapter::new());
    let container = container(store.clone());
    let (mut session, media) = open(&container, "beach").await;
    pump(&mut session, media.finish_load()).unwrap();

    session.commit(SaveCommand::Open).await.unwrap();
    session.commit(SaveCommand::SaveAsNew).await.unwrap();
    assert!(session.commit(SaveCommand::SubmitName).await.is_err());

    assert_eq!(store.call_count(), 0);
    assert_eq!(session.last_error(), Some("Please enter a valid name"));
}

#[tokio::test]
async fn test_scenario_e_quota_exceeded_returns_to_choosing() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonStoreAdapter::new(dir.path(), Some(1)));
    let container = container(store.clone());
    let (mut session, media) = open(&container, "beach").await;
    pump(&mut session, media.finish_load()).unwrap();

    session.commit(SaveCommand::Open).await.unwrap();
    let first = session.commit(SaveCommand::Overwrite).await.unwrap();
    assert!(matches!(first, Some(SaveResolution::Succeeded { .. })));

    session.commit(SaveCommand::Open).await.unwrap();
    let second = session.commit(SaveCommand::Overwrite).await.unwrap();
    assert!(matches!(second, Some(SaveResolution::Failed { .. })));
    assert_eq!(session.save_state(), SaveState::Choosing);
    assert_eq!(session.last_error(), Some("quota exceeded"));

    let stored = store.list().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].request.owner_id, "owner-7");
}

#[tokio::test]
async fn test_drag_sequence_stays_ordered() {
    let container = container(Arc::new(MemoryStoreAdapter::new()));
    let (mut session, media) = open(&container, "beach").await;
    pump(&mut session, media.finish_load()).unwrap();

    session
        .on_pointer(PointerEvent::Down {
            target: PointerTarget::StartHandle,
            x: 0.0,
        })
        .unwrap();
    for x in [100.0, 400.0, 900.0, -50.0, 600.0] {
        session.on_pointer(PointerEvent::Move { x }).unwrap();
        let range = session.snapshot();
        assert!(range.start >= 0.0);
        assert!(range.end - range.start >= 0.1 - 1e-9);
        assert!(range.end <= range.duration);
    }
    session.on_pointer(PointerEvent::Up { x: 600.0 }).unwrap();

    assert_eq!(session.snapshot().start, 90.0);
}

#[tokio::test]
async fn test_unavailable_media_then_teardown() {
    let store = Arc::new(MemoryStoreAdapter::new());
    let container = container(store.clone());
    let (mut session, media) = open(&container, "broken").await;

    let err = pump(&mut session, media.finish_load()).unwrap_err();
    assert!(matches!(err, DomainError::MediaUnavailable(_)));

    session.on_save(SaveCommand::Open).unwrap();
    let pending = session.on_save(SaveCommand::Overwrite).unwrap().unwrap();
    session.close();

    let result = pending.run().await;
    assert_eq!(session.finish_commit(result), SaveResolution::Discarded);
    assert_eq!(store.call_count(), 1);
}

#[tokio::test]
async fn test_teardown_discards_in_flight_save_as_new() {
    let store = Arc::new(MemoryStoreAdapter::new());
    store.push_response(Ok(TrimResponse::rejected("quota exceeded")));
    let container = container(store.clone());
    let (mut session, media) = open(&container, "beach").await;
    pump(&mut session, media.finish_load()).unwrap();
    session.edit_start_field("12").unwrap();

    session.on_save(SaveCommand::Open).unwrap();
    session.on_save(SaveCommand::SaveAsNew).unwrap();
    session
        .on_save(SaveCommand::SetName {
            name: "Keepers".to_string(),
        })
        .unwrap();
    let pending = session.on_save(SaveCommand::SubmitName).unwrap().unwrap();
    session.close();

    let before = session.view();
    let result = pending.run().await;
    assert_eq!(session.finish_commit(result), SaveResolution::Discarded);

    // The rejection reached the store but never touched the closed session
    assert_eq!(store.call_count(), 1);
    assert_eq!(store.requests()[0].name, "Keepers");
    let after = session.view();
    assert_eq!(after.candidate_name, before.candidate_name);
    assert_eq!(after.last_error, before.last_error);
    assert_eq!(session.last_error(), None);
    assert_eq!(session.save_state(), SaveState::Idle);
    assert_eq!(session.snapshot().start, 12.0);
}

#[tokio::test]
async fn test_unknown_clip_fails_to_open() {
    let container = container(Arc::new(MemoryStoreAdapter::new()));
    let media = Arc::new(HeadlessMediaElement::new(HashMap::new()));
    let err = container
        .open_session_interactor()
        .open("missing", media)
        .await
        .err()
        .unwrap();
    assert_eq!(err.user_message(), "Video not found: missing");
}
