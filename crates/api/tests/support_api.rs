//! HTTP-level integration tests for the support endpoints: ticket
//! visibility and internal-note handling.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, get_auth, login, post_json_auth, put_json_auth};
use sqlx::PgPool;

async fn open_ticket(pool: &PgPool, token: &str) -> String {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/support/tickets",
        serde_json::json!({
            "subject": "Missing royalties",
            "description": "July royalties have not appeared on my statement",
        }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"]["ticket"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

/// A new ticket defaults to medium priority and open status.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_ticket_defaults(pool: PgPool) {
    let (_user, password) = create_user(&pool, "artist@test.com", "user", "approved").await;
    let token = login(common::build_test_app(pool.clone()), "artist@test.com", &password).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/support/tickets",
        serde_json::json!({
            "subject": "Question about DSP delivery",
            "description": "How long does Spotify delivery usually take?",
        }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["ticket"]["priority"], "medium");
    assert_eq!(json["data"]["ticket"]["status"], "open");
}

/// An unknown priority is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_ticket_rejects_unknown_priority(pool: PgPool) {
    let (_user, password) = create_user(&pool, "artist@test.com", "user", "approved").await;
    let token = login(common::build_test_app(pool.clone()), "artist@test.com", &password).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/support/tickets",
        serde_json::json!({
            "subject": "Urgent!!",
            "description": "Please look at this",
            "priority": "critical",
        }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Another user's ticket reads as not-found, while an admin can see it.
#[sqlx::test(migrations = "../db/migrations")]
async fn ticket_visibility(pool: PgPool) {
    let (_owner, owner_pw) = create_user(&pool, "owner@test.com", "user", "approved").await;
    let (_other, other_pw) = create_user(&pool, "other@test.com", "user", "approved").await;
    let (_admin, admin_pw) = create_user(&pool, "admin@test.com", "admin", "approved").await;

    let owner_token = login(common::build_test_app(pool.clone()), "owner@test.com", &owner_pw).await;
    let ticket_id = open_ticket(&pool, &owner_token).await;

    let other_token = login(common::build_test_app(pool.clone()), "other@test.com", &other_pw).await;
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/support/tickets/{ticket_id}"), &other_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let admin_token = login(common::build_test_app(pool.clone()), "admin@test.com", &admin_pw).await;
    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/support/tickets/{ticket_id}"), &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Internal notes can only be posted by admins and stay hidden from the
/// ticket owner.
#[sqlx::test(migrations = "../db/migrations")]
async fn internal_notes_are_admin_only(pool: PgPool) {
    let (_owner, owner_pw) = create_user(&pool, "owner@test.com", "user", "approved").await;
    let (_admin, admin_pw) = create_user(&pool, "admin@test.com", "admin", "approved").await;

    let owner_token = login(common::build_test_app(pool.clone()), "owner@test.com", &owner_pw).await;
    let admin_token = login(common::build_test_app(pool.clone()), "admin@test.com", &admin_pw).await;
    let ticket_id = open_ticket(&pool, &owner_token).await;

    // The owner cannot post an internal note.
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/support/tickets/{ticket_id}/messages"),
        serde_json::json!({ "message": "Sneaky note", "is_internal": true }),
        &owner_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The admin posts one internal note and one public reply.
    for (message, is_internal) in [("Check their payout history", true), ("Looking into it", false)] {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(
            app,
            &format!("/api/support/tickets/{ticket_id}/messages"),
            serde_json::json!({ "message": message, "is_internal": is_internal }),
            &admin_token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    // The owner only sees the public reply.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/support/tickets/{ticket_id}/messages"),
        &owner_token,
    )
    .await;
    let json = body_json(response).await;
    let messages = json["data"]["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["message"], "Looking into it");

    // The admin sees both.
    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/support/tickets/{ticket_id}/messages"),
        &admin_token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["messages"].as_array().unwrap().len(), 2);
}

/// Tickets can only be assigned to admin accounts; assignment moves the
/// ticket to in_progress.
#[sqlx::test(migrations = "../db/migrations")]
async fn assignment_requires_admin_assignee(pool: PgPool) {
    let (owner, owner_pw) = create_user(&pool, "owner@test.com", "user", "approved").await;
    let (admin, admin_pw) = create_user(&pool, "admin@test.com", "admin", "approved").await;

    let owner_token = login(common::build_test_app(pool.clone()), "owner@test.com", &owner_pw).await;
    let admin_token = login(common::build_test_app(pool.clone()), "admin@test.com", &admin_pw).await;
    let ticket_id = open_ticket(&pool, &owner_token).await;

    // Assigning to a regular user fails.
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/support/admin/tickets/{ticket_id}/assign"),
        serde_json::json!({ "assignee_id": owner.id }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Assigning to an admin succeeds.
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/support/admin/tickets/{ticket_id}/assign"),
        serde_json::json!({ "assignee_id": admin.id }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["ticket"]["status"], "in_progress");
    assert_eq!(json["data"]["ticket"]["assigned_to"], admin.id.to_string());

    // Status updates validate the value.
    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/support/admin/tickets/{ticket_id}/status"),
        serde_json::json!({ "status": "done" }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
