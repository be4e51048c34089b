//! Health endpoint smoke tests.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use sqlx::PgPool;

/// The root health endpoint reports service and database status.
#[sqlx::test(migrations = "../db/migrations")]
async fn health_returns_ok(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["db_healthy"], true);
    assert!(json["data"]["version"].is_string());
}

/// The same endpoint is reachable under the API prefix.
#[sqlx::test(migrations = "../db/migrations")]
async fn health_is_mounted_under_api(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}
