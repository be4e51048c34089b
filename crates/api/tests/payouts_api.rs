//! HTTP-level integration tests for the payout endpoints: balance
//! enforcement on request, and the admin review lifecycle.

mod common;

use axum::http::StatusCode;
use chrono::NaiveDate;
use common::{body_json, create_user, get_auth, login, post_json_auth};
use singleaudio_core::types::DbId;
use singleaudio_db::models::royalty::CreateRoyalty;
use singleaudio_db::models::track::CreateTrack;
use singleaudio_db::repositories::{RoyaltyRepo, TrackRepo};
use sqlx::PgPool;

/// Seed a track and one royalty entry of the given amount for the user.
async fn seed_earnings(pool: &PgPool, user_id: DbId, amount: f64) {
    let track = TrackRepo::create(
        pool,
        &CreateTrack {
            user_id,
            title: "Test Single".to_string(),
            artist: "Test Artist".to_string(),
            album: None,
            genre: Some("electronic".to_string()),
            release_date: None,
            duration: Some(200.0),
            file_url: "/api/music/files/audio/seed.mp3".to_string(),
            cover_art_url: None,
        },
    )
    .await
    .expect("track seed should succeed");

    RoyaltyRepo::create(
        pool,
        &CreateRoyalty {
            track_id: track.id,
            user_id,
            dsp: "Spotify".to_string(),
            amount,
            currency: "USD".to_string(),
            period_start: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            period_end: NaiveDate::from_ymd_opt(2026, 7, 31).unwrap(),
        },
    )
    .await
    .expect("royalty seed should succeed");
}

fn payout_body(amount: f64) -> serde_json::Value {
    serde_json::json!({
        "amount": amount,
        "currency": "USD",
        "method": "paypal",
        "payment_details": { "paypal_email": "artist@test.com" },
    })
}

/// A payout below the $25 minimum is rejected even with plenty of balance.
#[sqlx::test(migrations = "../db/migrations")]
async fn payout_below_minimum_rejected(pool: PgPool) {
    let (user, password) = create_user(&pool, "artist@test.com", "user", "approved").await;
    seed_earnings(&pool, user.id, 500.0).await;
    let token = login(common::build_test_app(pool.clone()), "artist@test.com", &password).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/api/payouts/request", payout_body(24.99), &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Minimum payout"));
}

/// A payout above the available balance is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn payout_above_balance_rejected(pool: PgPool) {
    let (user, password) = create_user(&pool, "artist@test.com", "user", "approved").await;
    seed_earnings(&pool, user.id, 100.0).await;
    let token = login(common::build_test_app(pool.clone()), "artist@test.com", &password).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/api/payouts/request", payout_body(100.01), &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("Insufficient balance"));
}

/// A payout for exactly the available balance is accepted.
#[sqlx::test(migrations = "../db/migrations")]
async fn payout_exactly_at_balance_accepted(pool: PgPool) {
    let (user, password) = create_user(&pool, "artist@test.com", "user", "approved").await;
    seed_earnings(&pool, user.id, 100.0).await;
    let token = login(common::build_test_app(pool.clone()), "artist@test.com", &password).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/api/payouts/request", payout_body(100.0), &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["payout"]["status"], "pending");
    assert_eq!(json["data"]["payout"]["amount"], 100.0);
}

/// An unsupported payout method is rejected before any balance check.
#[sqlx::test(migrations = "../db/migrations")]
async fn payout_unknown_method_rejected(pool: PgPool) {
    let (_user, password) = create_user(&pool, "artist@test.com", "user", "approved").await;
    let token = login(common::build_test_app(pool.clone()), "artist@test.com", &password).await;

    let body = serde_json::json!({
        "amount": 50.0,
        "currency": "USD",
        "method": "cheque",
    });
    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/api/payouts/request", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Approved payouts hold balance: after approval a second full-balance
/// request no longer fits.
#[sqlx::test(migrations = "../db/migrations")]
async fn approved_payout_holds_balance(pool: PgPool) {
    let (user, user_pw) = create_user(&pool, "artist@test.com", "user", "approved").await;
    let (_admin, admin_pw) = create_user(&pool, "admin@test.com", "admin", "approved").await;
    seed_earnings(&pool, user.id, 100.0).await;

    let token = login(common::build_test_app(pool.clone()), "artist@test.com", &user_pw).await;
    let admin_token = login(common::build_test_app(pool.clone()), "admin@test.com", &admin_pw).await;

    // Request 60 of the 100 available.
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/payouts/request", payout_body(60.0), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let payout_id = body_json(response).await["data"]["payout"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    // While pending, the 60 does not hold balance yet.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/royalties/balance", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["available_balance"], 100.0);

    // Approve it.
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/payouts/admin/{payout_id}/approve"),
        serde_json::json!({}),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Now only 40 remains; a 50 request fails.
    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/api/payouts/request", payout_body(50.0), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A payout can only be reviewed once, and only approved ones can be
/// processed.
#[sqlx::test(migrations = "../db/migrations")]
async fn review_lifecycle_guards(pool: PgPool) {
    let (user, user_pw) = create_user(&pool, "artist@test.com", "user", "approved").await;
    let (_admin, admin_pw) = create_user(&pool, "admin@test.com", "admin", "approved").await;
    seed_earnings(&pool, user.id, 200.0).await;

    let token = login(common::build_test_app(pool.clone()), "artist@test.com", &user_pw).await;
    let admin_token = login(common::build_test_app(pool.clone()), "admin@test.com", &admin_pw).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/payouts/request", payout_body(50.0), &token).await;
    let payout_id = body_json(response).await["data"]["payout"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    // Processing a pending payout is a conflict.
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/payouts/admin/{payout_id}/process"),
        serde_json::json!({}),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Reject it.
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/payouts/admin/{payout_id}/reject"),
        serde_json::json!({ "reason": "Details incomplete" }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // A second review is a conflict.
    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/payouts/admin/{payout_id}/approve"),
        serde_json::json!({}),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Another user's payout reads as not-found.
#[sqlx::test(migrations = "../db/migrations")]
async fn foreign_payout_is_not_found(pool: PgPool) {
    let (owner, owner_pw) = create_user(&pool, "owner@test.com", "user", "approved").await;
    let (_other, other_pw) = create_user(&pool, "other@test.com", "user", "approved").await;
    seed_earnings(&pool, owner.id, 100.0).await;

    let owner_token = login(common::build_test_app(pool.clone()), "owner@test.com", &owner_pw).await;
    let other_token = login(common::build_test_app(pool.clone()), "other@test.com", &other_pw).await;

    let app = common::build_test_app(pool.clone());
    let response =
        post_json_auth(app, "/api/payouts/request", payout_body(50.0), &owner_token).await;
    let payout_id = body_json(response).await["data"]["payout"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/payouts/{payout_id}"), &other_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
