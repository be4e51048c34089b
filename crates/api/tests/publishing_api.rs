//! HTTP-level integration tests for the publishing endpoints: identity
//! registration and review, and composition ownership.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, get_auth, login, post_json_auth};
use sqlx::PgPool;

async fn register_identity(pool: &PgPool, token: &str, name: &str) -> String {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/publishing/identities",
        serde_json::json!({ "name": name, "ipi_number": "00123456789" }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"]["identity"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

/// A new identity starts pending review.
#[sqlx::test(migrations = "../db/migrations")]
async fn new_identity_is_pending(pool: PgPool) {
    let (_user, password) = create_user(&pool, "writer@test.com", "user", "approved").await;
    let token = login(common::build_test_app(pool.clone()), "writer@test.com", &password).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/publishing/identities",
        serde_json::json!({ "name": "Night Drive Publishing" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["identity"]["status"], "pending");
}

/// An admin can approve or reject an identity.
#[sqlx::test(migrations = "../db/migrations")]
async fn admin_reviews_identity(pool: PgPool) {
    let (_user, user_pw) = create_user(&pool, "writer@test.com", "user", "approved").await;
    let (_admin, admin_pw) = create_user(&pool, "admin@test.com", "admin", "approved").await;

    let token = login(common::build_test_app(pool.clone()), "writer@test.com", &user_pw).await;
    let admin_token = login(common::build_test_app(pool.clone()), "admin@test.com", &admin_pw).await;
    let identity_id = register_identity(&pool, &token, "Night Drive Publishing").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/publishing/admin/identities/{identity_id}/approve"),
        serde_json::json!({}),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["identity"]["status"], "approved");

    // The review endpoints are admin only.
    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/publishing/admin/identities/{identity_id}/reject"),
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Compositions can only be registered against the caller's own identity.
#[sqlx::test(migrations = "../db/migrations")]
async fn composition_requires_own_identity(pool: PgPool) {
    let (_owner, owner_pw) = create_user(&pool, "owner@test.com", "user", "approved").await;
    let (_other, other_pw) = create_user(&pool, "other@test.com", "user", "approved").await;

    let owner_token = login(common::build_test_app(pool.clone()), "owner@test.com", &owner_pw).await;
    let other_token = login(common::build_test_app(pool.clone()), "other@test.com", &other_pw).await;
    let identity_id = register_identity(&pool, &owner_token, "Owner Publishing").await;

    let body = serde_json::json!({
        "publishing_identity_id": identity_id,
        "title": "Midnight Chorus",
        "writers": [{ "name": "A. Writer", "share": 100 }],
    });

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/publishing/compositions", body.clone(), &other_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/api/publishing/compositions", body, &owner_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["composition"]["title"], "Midnight Chorus");
}

/// The stats endpoint breaks identities down by review status.
#[sqlx::test(migrations = "../db/migrations")]
async fn stats_counts_identities(pool: PgPool) {
    let (_user, user_pw) = create_user(&pool, "writer@test.com", "user", "approved").await;
    let (_admin, admin_pw) = create_user(&pool, "admin@test.com", "admin", "approved").await;

    let token = login(common::build_test_app(pool.clone()), "writer@test.com", &user_pw).await;
    let admin_token = login(common::build_test_app(pool.clone()), "admin@test.com", &admin_pw).await;

    let first = register_identity(&pool, &token, "First Publishing").await;
    register_identity(&pool, &token, "Second Publishing").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/publishing/admin/identities/{first}/approve"),
        serde_json::json!({}),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/publishing/stats", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["identities"]["total"], 2);
    assert_eq!(json["data"]["identities"]["approved"], 1);
    assert_eq!(json["data"]["identities"]["pending"], 1);
}
