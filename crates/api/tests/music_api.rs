//! HTTP-level integration tests for the music endpoints: multipart upload,
//! ownership guards, and distribution requests.

mod common;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Request, StatusCode};
use common::{body_json, create_user, delete_auth, get_auth, login, post_json_auth, put_json_auth};
use singleaudio_core::types::DbId;
use singleaudio_db::models::track::CreateTrack;
use singleaudio_db::repositories::TrackRepo;
use sqlx::PgPool;
use tower::ServiceExt;

/// Seed a track for the user directly through the repository.
async fn seed_track(pool: &PgPool, user_id: DbId) -> DbId {
    TrackRepo::create(
        pool,
        &CreateTrack {
            user_id,
            title: "Seeded Single".to_string(),
            artist: "Seeded Artist".to_string(),
            album: None,
            genre: Some("pop".to_string()),
            release_date: None,
            duration: Some(195.0),
            file_url: "/api/music/files/audio/seed.mp3".to_string(),
            cover_art_url: None,
        },
    )
    .await
    .expect("track seed should succeed")
    .id
}

/// Build a multipart body with title, artist, and an audio part.
fn multipart_upload(boundary: &str, title: &str, audio_name: &str) -> String {
    format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"title\"\r\n\r\n{title}\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=\"artist\"\r\n\r\nTest Artist\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=\"genre\"\r\n\r\nelectronic\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=\"audio\"; filename=\"{audio_name}\"\r\n\
         Content-Type: audio/mpeg\r\n\r\nnot really audio bytes\r\n\
         --{boundary}--\r\n"
    )
}

async fn post_multipart(
    app: axum::Router,
    uri: &str,
    boundary: &str,
    body: String,
    token: &str,
) -> axum::http::Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Uploading a track stores the file and returns the track with serving
/// URLs.
#[sqlx::test(migrations = "../db/migrations")]
async fn upload_track_success(pool: PgPool) {
    let (_user, password) = create_user(&pool, "artist@test.com", "user", "approved").await;
    let token = login(common::build_test_app(pool.clone()), "artist@test.com", &password).await;

    let boundary = "test-boundary-7f3a";
    let body = multipart_upload(boundary, "Night Drive", "night-drive.mp3");
    let app = common::build_test_app(pool);
    let response = post_multipart(app, "/api/music/tracks", boundary, body, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["track"]["title"], "Night Drive");
    assert_eq!(json["data"]["track"]["status"], "draft");
    let file_url = json["data"]["track"]["file_url"].as_str().unwrap();
    assert!(file_url.starts_with("/api/music/files/audio/"));
    assert!(file_url.ends_with(".mp3"));
}

/// An upload with a disallowed audio extension is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn upload_rejects_bad_extension(pool: PgPool) {
    let (_user, password) = create_user(&pool, "artist@test.com", "user", "approved").await;
    let token = login(common::build_test_app(pool.clone()), "artist@test.com", &password).await;

    let boundary = "test-boundary-7f3a";
    let body = multipart_upload(boundary, "Sneaky", "payload.exe");
    let app = common::build_test_app(pool);
    let response = post_multipart(app, "/api/music/tracks", boundary, body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Another user's track reads as not-found for get, update, and delete.
#[sqlx::test(migrations = "../db/migrations")]
async fn foreign_track_is_not_found(pool: PgPool) {
    let (owner, _) = create_user(&pool, "owner@test.com", "user", "approved").await;
    let (_other, other_pw) = create_user(&pool, "other@test.com", "user", "approved").await;
    let track_id = seed_track(&pool, owner.id).await;
    let token = login(common::build_test_app(pool.clone()), "other@test.com", &other_pw).await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/music/tracks/{track_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/music/tracks/{track_id}"),
        serde_json::json!({ "title": "Hijacked" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = delete_auth(app, &format!("/api/music/tracks/{track_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// The owner can update their track's metadata.
#[sqlx::test(migrations = "../db/migrations")]
async fn owner_updates_track(pool: PgPool) {
    let (owner, password) = create_user(&pool, "owner@test.com", "user", "approved").await;
    let track_id = seed_track(&pool, owner.id).await;
    let token = login(common::build_test_app(pool.clone()), "owner@test.com", &password).await;

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/music/tracks/{track_id}"),
        serde_json::json!({ "title": "Renamed", "genre": "ambient" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["track"]["title"], "Renamed");
    assert_eq!(json["data"]["track"]["genre"], "ambient");
    // Untouched fields survive the partial update.
    assert_eq!(json["data"]["track"]["artist"], "Seeded Artist");
}

/// A distribution request needs at least one DSP.
#[sqlx::test(migrations = "../db/migrations")]
async fn distribute_requires_dsps(pool: PgPool) {
    let (owner, password) = create_user(&pool, "owner@test.com", "user", "approved").await;
    let track_id = seed_track(&pool, owner.id).await;
    let token = login(common::build_test_app(pool.clone()), "owner@test.com", &password).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/music/distribute",
        serde_json::json!({ "track_id": track_id, "dsps": [] }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Distributing another user's track is not-found; the owner's request
/// lands in pending.
#[sqlx::test(migrations = "../db/migrations")]
async fn distribute_ownership_and_success(pool: PgPool) {
    let (owner, owner_pw) = create_user(&pool, "owner@test.com", "user", "approved").await;
    let (_other, other_pw) = create_user(&pool, "other@test.com", "user", "approved").await;
    let track_id = seed_track(&pool, owner.id).await;

    let body = serde_json::json!({ "track_id": track_id, "dsps": ["Spotify", "TikTok"] });

    let other_token = login(common::build_test_app(pool.clone()), "other@test.com", &other_pw).await;
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/music/distribute", body.clone(), &other_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let owner_token = login(common::build_test_app(pool.clone()), "owner@test.com", &owner_pw).await;
    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/api/music/distribute", body, &owner_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["distribution"]["status"], "pending");
    assert_eq!(
        json["data"]["distribution"]["dsps"],
        serde_json::json!(["Spotify", "TikTok"])
    );
}

/// The owner may flip their distribution's status; a foreign distribution
/// reads as not-found, and delivery stamps the date.
#[sqlx::test(migrations = "../db/migrations")]
async fn distribution_status_is_owner_scoped(pool: PgPool) {
    let (owner, owner_pw) = create_user(&pool, "owner@test.com", "user", "approved").await;
    let (_other, other_pw) = create_user(&pool, "other@test.com", "user", "approved").await;
    let track_id = seed_track(&pool, owner.id).await;

    let owner_token = login(common::build_test_app(pool.clone()), "owner@test.com", &owner_pw).await;
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/music/distribute",
        serde_json::json!({ "track_id": track_id, "dsps": ["Spotify"] }),
        &owner_token,
    )
    .await;
    let dist_id = body_json(response).await["data"]["distribution"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    // Unknown statuses are rejected before anything else.
    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/music/distributions/{dist_id}/status"),
        serde_json::json!({ "status": "shipped" }),
        &owner_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Another user cannot see the distribution at all.
    let other_token = login(common::build_test_app(pool.clone()), "other@test.com", &other_pw).await;
    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/music/distributions/{dist_id}/status"),
        serde_json::json!({ "status": "delivered" }),
        &other_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The owner can.
    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/music/distributions/{dist_id}/status"),
        serde_json::json!({ "status": "delivered" }),
        &owner_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["distribution"]["status"], "delivered");
    assert!(!json["data"]["distribution"]["delivery_date"].is_null());
}

/// Track updates reject statuses outside the vocabulary.
#[sqlx::test(migrations = "../db/migrations")]
async fn update_track_rejects_unknown_status(pool: PgPool) {
    let (owner, password) = create_user(&pool, "owner@test.com", "user", "approved").await;
    let track_id = seed_track(&pool, owner.id).await;
    let token = login(common::build_test_app(pool.clone()), "owner@test.com", &password).await;

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/music/tracks/{track_id}"),
        serde_json::json!({ "status": "bogus" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/music/tracks/{track_id}"),
        serde_json::json!({ "status": "processing" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["track"]["status"], "processing");
}

/// Requesting a stored file that does not exist is not-found.
#[sqlx::test(migrations = "../db/migrations")]
async fn missing_stored_file_is_not_found(pool: PgPool) {
    let (_user, password) = create_user(&pool, "owner@test.com", "user", "approved").await;
    let token = login(common::build_test_app(pool.clone()), "owner@test.com", &password).await;

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        "/api/music/files/audio/11111111-2222-3333-4444-555555555555.mp3",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
