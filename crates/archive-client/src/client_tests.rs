//! Tests for the archive client against a mocked backend.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use archive_models::UploadForm;

use crate::client::{ArchiveClient, ClientConfig};
use crate::error::ClientError;

// =============================================================================
// Test Helpers
// =============================================================================

fn test_client(server: &MockServer) -> ArchiveClient {
    ArchiveClient::new(ClientConfig {
        base_url: server.uri(),
        timeout: Duration::from_secs(5),
        upload_timeout: Duration::from_secs(5),
        max_retries: 2,
        retry_base_delay: Duration::from_millis(5),
    })
    .unwrap()
}

fn catalog_json() -> serde_json::Value {
    json!([
        {
            "id": "1",
            "filename": "1.mp4",
            "metadata": { "title": "Cats", "description": "", "tags": ["fun"], "school": "A" }
        },
        {
            "id": "2",
            "filename": "2.mp4",
            "metadata": { "title": "Dogs", "description": "", "tags": ["fun", "pets"], "school": "B" }
        }
    ])
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_list_videos() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/videos/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_json()))
        .expect(1)
        .mount(&server)
        .await;

    let videos = test_client(&server).list_videos().await.unwrap();
    assert_eq!(videos.len(), 2);
    assert_eq!(videos[1].metadata.tags, vec!["fun", "pets"]);
}

#[tokio::test]
async fn test_list_videos_rejects_non_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/videos/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "videos": [] })))
        .mount(&server)
        .await;

    let err = test_client(&server).list_videos().await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_list_videos_retries_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/videos/"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/videos/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_json()))
        .mount(&server)
        .await;

    let videos = test_client(&server).list_videos().await.unwrap();
    assert_eq!(videos.len(), 2);
}

#[tokio::test]
async fn test_list_videos_gives_up_after_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/videos/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "boom" })))
        .expect(3)
        .mount(&server)
        .await;

    let err = test_client(&server).list_videos().await.unwrap_err();
    assert!(matches!(err, ClientError::ServiceUnavailable { status: 500, .. }));
}

#[tokio::test]
async fn test_check_connectivity() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/videos/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    assert!(test_client(&server).check_connectivity().await.unwrap());
}

// =============================================================================
// Upload
// =============================================================================

#[tokio::test]
async fn test_upload_video_sends_multipart_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/videos/upload"))
        .and(body_string_contains("filename=\"lecture.mp4\""))
        .and(body_string_contains("name=\"title\""))
        .and(body_string_contains("Intro lecture"))
        .and(body_string_contains("fun, pets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "new-id",
            "filename": "abc.mp4",
            "metadata": { "title": "Intro lecture", "description": "Week 1", "tags": ["fun", "pets"], "school": "A" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("lecture.mp4");
    std::fs::write(&file, b"not really a video").unwrap();

    let form = UploadForm::new("Intro lecture", "Week 1")
        .with_school("A")
        .with_tags("fun, pets");
    let record = test_client(&server).upload_video(&file, &form).await.unwrap();

    assert_eq!(record.id.as_str(), "new-id");
    assert_eq!(record.metadata.tags, vec!["fun", "pets"]);
}

#[tokio::test]
async fn test_upload_streams_large_archive() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/videos/upload"))
        .and(body_string_contains("filename=\"term.zip\""))
        .and(body_string_contains("application/zip"))
        .and(body_string_contains("END-OF-ARCHIVE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "zip-id",
            "filename": "term.zip",
            "metadata": { "title": "Term", "description": "All lectures" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("term.zip");
    let mut contents = vec![b'a'; 1024 * 1024];
    contents.extend_from_slice(b"END-OF-ARCHIVE");
    std::fs::write(&file, &contents).unwrap();

    let form = UploadForm::new("Term", "All lectures");
    let record = test_client(&server).upload_video(&file, &form).await.unwrap();
    assert_eq!(record.id.as_str(), "zip-id");

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.len() > contents.len());
}

#[tokio::test]
async fn test_upload_missing_file_is_io_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let form = UploadForm::new("Gone", "Missing file");
    let err = test_client(&server)
        .upload_video(&dir.path().join("gone.mp4"), &form)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Io(_)));
}

#[tokio::test]
async fn test_upload_rejects_unsupported_file_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("notes.pdf");
    std::fs::write(&file, b"%PDF").unwrap();

    let err = test_client(&server)
        .upload_video(&file, &UploadForm::new("Notes", "Slides"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Upload(_)));
}

#[tokio::test]
async fn test_upload_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/videos/upload"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("batch.zip");
    std::fs::write(&file, b"PK").unwrap();

    let err = test_client(&server)
        .upload_video(&file, &UploadForm::new("Batch", "Many videos"))
        .await
        .unwrap_err();
    assert!(err.is_retryable());
}

// =============================================================================
// Google sign-in
// =============================================================================

#[tokio::test]
async fn test_google_auth_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/google/url"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "url": "https://accounts.google.com/o/oauth2/v2/auth?x=1" })),
        )
        .mount(&server)
        .await;

    let url = test_client(&server).google_auth_url().await.unwrap();
    assert!(url.starts_with("https://accounts.google.com/"));
}

#[tokio::test]
async fn test_exchange_google_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/google/callback"))
        .and(body_json(json!({ "code": "4/abc" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "email": "teacher@school.org",
            "name": "Teacher",
            "picture": "https://example.org/p.png",
            "token": "ya29.token"
        })))
        .mount(&server)
        .await;

    let user = test_client(&server).exchange_google_code("4/abc").await.unwrap();
    assert_eq!(user.email, "teacher@school.org");
    assert_eq!(user.token, "ya29.token");
}

#[tokio::test]
async fn test_exchange_google_code_surfaces_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/google/callback"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "detail": "invalid_grant" })))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server).exchange_google_code("used").await.unwrap_err();
    match err {
        ClientError::Api { status, detail } => {
            assert_eq!(status, 400);
            assert_eq!(detail, "invalid_grant");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
