//! End-to-end tests of the audio operations, wired to the real SQLite
//! registry and the real filesystem blob store.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha2::{Digest, Sha256};
use streetcode_media_server::audio::{AudioService, CreateAudioRequest};
use streetcode_media_server::blob_store::FsBlobStore;
use streetcode_media_server::logging::TracingLog;
use streetcode_media_server::media_store::SqliteMediaStore;
use streetcode_media_server::outcome::Outcome;
use tempfile::TempDir;
use tokio::io::AsyncReadExt;

struct TestApp {
    service: AudioService,
    store: Arc<SqliteMediaStore>,
    blob_dir: TempDir,
}

async fn test_app() -> TestApp {
    let blob_dir = TempDir::new().unwrap();
    let store = Arc::new(SqliteMediaStore::in_memory().unwrap());
    let blob_store = Arc::new(FsBlobStore::new(blob_dir.path()));
    blob_store.init().await.unwrap();

    let service = AudioService::new(
        store.clone(),
        store.clone(),
        blob_store,
        Arc::new(TracingLog),
    );

    TestApp {
        service,
        store,
        blob_dir,
    }
}

fn request_with_payload(title: &str, payload: &[u8], extension: &str) -> CreateAudioRequest {
    CreateAudioRequest {
        title: title.to_string(),
        description: Some("test audio".to_string()),
        mime_type: "audio/mpeg".to_string(),
        encoded_payload: BASE64.encode(payload),
        extension: extension.to_string(),
    }
}

fn blob_file_count(app: &TestApp) -> usize {
    std::fs::read_dir(app.blob_dir.path()).unwrap().count()
}

#[tokio::test]
async fn test_create_then_get_by_id_round_trips() {
    let app = test_app().await;
    let payload = b"streetcode anthem bytes";

    let created = app
        .service
        .create(request_with_payload("anthem", payload, "mp3"))
        .await
        .unwrap();
    assert!(created.is_success());

    let view = created.value().unwrap();
    let expected_name = format!("{:x}.mp3", Sha256::digest(payload));
    assert_eq!(view.blob_name, expected_name);
    assert!(view.payload.is_none());

    let fetched = app.service.get_by_id(view.id).await.unwrap();
    let fetched_view = fetched.value().unwrap();
    assert_eq!(fetched_view.blob_name, expected_name);
    assert_eq!(fetched_view.payload.as_deref(), Some(BASE64.encode(payload).as_str()));
}

#[tokio::test]
async fn test_create_identical_content_dedups_in_storage() {
    let app = test_app().await;
    let payload = b"shared content";

    let first = app
        .service
        .create(request_with_payload("first", payload, "mp3"))
        .await
        .unwrap();
    let second = app
        .service
        .create(request_with_payload("second", payload, "mp3"))
        .await
        .unwrap();

    let first_name = &first.value().unwrap().blob_name;
    let second_name = &second.value().unwrap().blob_name;
    assert_eq!(first_name, second_name);

    // Two metadata rows, one stored blob
    let all = app.service.get_all().await.unwrap();
    assert_eq!(all.value().unwrap().len(), 2);
    assert_eq!(blob_file_count(&app), 1);
}

#[tokio::test]
async fn test_get_all_resolves_every_payload() {
    let app = test_app().await;

    app.service
        .create(request_with_payload("one", b"payload one", "mp3"))
        .await
        .unwrap();
    app.service
        .create(request_with_payload("two", b"payload two", "ogg"))
        .await
        .unwrap();

    let all = app.service.get_all().await.unwrap();
    let views = all.value().unwrap();
    assert_eq!(views.len(), 2);
    assert_eq!(
        views[0].payload.as_deref(),
        Some(BASE64.encode(b"payload one").as_str())
    );
    assert_eq!(
        views[1].payload.as_deref(),
        Some(BASE64.encode(b"payload two").as_str())
    );
}

#[tokio::test]
async fn test_get_raw_streams_the_stored_bytes() {
    let app = test_app().await;
    let payload = b"raw audio bytes";

    let created = app
        .service
        .create(request_with_payload("raw", payload, "wav"))
        .await
        .unwrap();
    let id = created.value().unwrap().id;

    let outcome = app.service.get_raw(id).await.unwrap();
    let mut stream = outcome.into_value().unwrap();
    let mut bytes = Vec::new();
    stream.read_to_end(&mut bytes).await.unwrap();

    assert_eq!(bytes, payload);
}

#[tokio::test]
async fn test_delete_removes_row_and_blob() {
    let app = test_app().await;

    let created = app
        .service
        .create(request_with_payload("doomed", b"doomed bytes", "mp3"))
        .await
        .unwrap();
    let id = created.value().unwrap().id;
    assert_eq!(blob_file_count(&app), 1);

    let deleted = app.service.delete(id).await.unwrap();
    assert!(deleted.is_success());
    assert_eq!(blob_file_count(&app), 0);

    let missing = app.service.get_by_id(id).await.unwrap();
    assert!(missing.is_failure());
}

#[tokio::test]
async fn test_delete_unknown_id_reports_the_id() {
    let app = test_app().await;

    let outcome = app.service.delete(7).await.unwrap();

    assert!(outcome.is_failure());
    assert_eq!(
        outcome.errors(),
        &["Cannot find an audio with corresponding categoryId: 7".to_string()]
    );
}

#[tokio::test]
async fn test_streetcode_with_audio_returns_the_view() {
    let app = test_app().await;
    let payload = b"attached audio";

    let created = app
        .service
        .create(request_with_payload("attached", payload, "mp3"))
        .await
        .unwrap();
    let audio_id = created.value().unwrap().id;
    let streetcode_id = app
        .store
        .insert_streetcode("memorial", Some(audio_id))
        .unwrap();

    let outcome = app
        .service
        .get_by_streetcode_id(streetcode_id)
        .await
        .unwrap();

    let view = outcome.value().unwrap();
    assert_eq!(view.id, audio_id);
    assert_eq!(view.payload.as_deref(), Some(BASE64.encode(payload).as_str()));
}

#[tokio::test]
async fn test_streetcode_without_audio_is_no_content() {
    let app = test_app().await;

    let streetcode_id = app.store.insert_streetcode("silent", None).unwrap();
    let outcome = app
        .service
        .get_by_streetcode_id(streetcode_id)
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::NoContent);
}

#[tokio::test]
async fn test_missing_streetcode_is_a_failure() {
    let app = test_app().await;

    let outcome = app.service.get_by_streetcode_id(99).await.unwrap();

    assert!(outcome.is_failure());
    assert_eq!(
        outcome.errors(),
        &["Cannot find an audio with the corresponding streetcode id: 99".to_string()]
    );
}
