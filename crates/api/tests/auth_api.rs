//! HTTP-level integration tests for the auth endpoints.
//!
//! Tests cover login for users and admins, the approval gate, access
//! requests, token verification, and password changes.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, get_auth, login, post_json, post_json_auth};
use sqlx::PgPool;

/// Successful login returns 200 with a token and the safe user shape.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_success(pool: PgPool) {
    let (user, password) = create_user(&pool, "artist@test.com", "user", "approved").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "artist@test.com", "password": password });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["data"]["token"].is_string());
    assert_eq!(json["data"]["user"]["id"], user.id.to_string());
    assert_eq!(json["data"]["user"]["email"], "artist@test.com");
    assert!(
        json["data"]["user"]["password_hash"].is_null(),
        "password hash must never leak"
    );
}

/// Login with an incorrect password returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_wrong_password(pool: PgPool) {
    create_user(&pool, "artist@test.com", "user", "approved").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "artist@test.com", "password": "incorrect" });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login with an unknown email returns 401, same as a wrong password.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_unknown_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "ghost@test.com", "password": "whatever" });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// An account that is not approved cannot log in even with the right
/// password.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_pending_account_forbidden(pool: PgPool) {
    let (_user, password) = create_user(&pool, "pending@test.com", "user", "pending").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "pending@test.com", "password": password });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Admin login rejects a regular user with 403.
#[sqlx::test(migrations = "../db/migrations")]
async fn admin_login_requires_admin_role(pool: PgPool) {
    let (_user, password) = create_user(&pool, "artist@test.com", "user", "approved").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "artist@test.com", "password": password });
    let response = post_json(app, "/api/auth/admin/login", body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Admin login succeeds for an approved admin.
#[sqlx::test(migrations = "../db/migrations")]
async fn admin_login_success(pool: PgPool) {
    let (_admin, password) = create_user(&pool, "admin@test.com", "admin", "approved").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "admin@test.com", "password": password });
    let response = post_json(app, "/api/auth/admin/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user"]["role"], "admin");
}

/// A fresh access request is accepted.
#[sqlx::test(migrations = "../db/migrations")]
async fn request_access_accepted(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "newartist@test.com",
        "full_name": "New Artist",
        "reason": "I want to distribute my first single",
    });
    let response = post_json(app, "/api/auth/request-access", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["request"]["status"], "pending");
}

/// An access request for an existing user's email is a conflict.
#[sqlx::test(migrations = "../db/migrations")]
async fn request_access_existing_user_conflict(pool: PgPool) {
    create_user(&pool, "artist@test.com", "user", "approved").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "artist@test.com",
        "full_name": "Someone Else",
        "reason": "Taking over this email",
    });
    let response = post_json(app, "/api/auth/request-access", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// A second request while the first is pending is a conflict.
#[sqlx::test(migrations = "../db/migrations")]
async fn request_access_duplicate_pending_conflict(pool: PgPool) {
    let body = serde_json::json!({
        "email": "eager@test.com",
        "full_name": "Eager Artist",
        "reason": "First request",
    });

    let app = common::build_test_app(pool.clone());
    let first = post_json(app, "/api/auth/request-access", body.clone()).await;
    assert_eq!(first.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let second = post_json(app, "/api/auth/request-access", body).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

/// verify-token reports valid for a live token and invalid for garbage,
/// always with 200.
#[sqlx::test(migrations = "../db/migrations")]
async fn verify_token_reports_validity(pool: PgPool) {
    let (_user, password) = create_user(&pool, "artist@test.com", "user", "approved").await;
    let token = login(common::build_test_app(pool.clone()), "artist@test.com", &password).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/auth/verify-token",
        serde_json::json!({ "token": token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["valid"], true);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/auth/verify-token",
        serde_json::json!({ "token": "garbage" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["valid"], false);
}

/// Changing the password requires the current one and takes effect for the
/// next login.
#[sqlx::test(migrations = "../db/migrations")]
async fn change_password_flow(pool: PgPool) {
    let (_user, password) = create_user(&pool, "artist@test.com", "user", "approved").await;
    let token = login(common::build_test_app(pool.clone()), "artist@test.com", &password).await;

    // Wrong current password is rejected.
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/auth/change-password",
        serde_json::json!({ "current_password": "wrong", "new_password": "brand_new_pass1" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Correct current password succeeds.
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/auth/change-password",
        serde_json::json!({ "current_password": password, "new_password": "brand_new_pass1" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // The new password now logs in.
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "email": "artist@test.com", "password": "brand_new_pass1" });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// /auth/me returns the current user and their profile slot.
#[sqlx::test(migrations = "../db/migrations")]
async fn me_returns_current_user(pool: PgPool) {
    let (user, password) = create_user(&pool, "artist@test.com", "user", "approved").await;
    let token = login(common::build_test_app(pool.clone()), "artist@test.com", &password).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/auth/me", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user"]["id"], user.id.to_string());
}
