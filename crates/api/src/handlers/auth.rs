//! Handlers for the `/auth` resource.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use singleaudio_core::error::CoreError;
use singleaudio_core::roles::ROLE_ADMIN;
use singleaudio_core::status::account;
use singleaudio_db::models::access_request::CreateAccessRequest;
use singleaudio_db::models::user::{User, UserResponse};
use singleaudio_db::repositories::{AccessRequestRepo, ProfileRepo, UserRepo};
use validator::Validate;

use crate::auth::jwt::{generate_token, validate_token};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login` and `POST /auth/admin/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request body for `POST /auth/request-access`.
#[derive(Debug, Deserialize, Validate)]
pub struct RequestAccessRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(length(min = 1, message = "Reason is required"))]
    pub reason: String,
}

/// Request body for `POST /auth/verify-token`.
#[derive(Debug, Deserialize)]
pub struct VerifyTokenRequest {
    pub token: String,
}

/// Request body for `POST /auth/request-password-reset`.
#[derive(Debug, Deserialize, Validate)]
pub struct PasswordResetRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

/// Request body for `POST /auth/change-password`.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    #[validate(length(min = 8, message = "New password must be at least 8 characters"))]
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/login
///
/// Authenticate with email + password. Only approved accounts may log in:
/// wrong credentials are 401, an unapproved account is 403.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    input.validate()?;
    let user = authenticate(&state, &input).await?;
    issue_token_response(&state, &user)
}

/// POST /api/auth/admin/login
///
/// Same as login, but additionally requires the `admin` role.
pub async fn admin_login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    input.validate()?;
    let user = authenticate(&state, &input).await?;

    if user.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "Admin access required".into(),
        )));
    }

    issue_token_response(&state, &user)
}

/// POST /api/auth/request-access
///
/// Submit a pre-account access request. Rejected when the email already
/// belongs to a user or has a pending request.
pub async fn request_access(
    State(state): State<AppState>,
    Json(input): Json<RequestAccessRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    input.validate()?;

    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "An account with this email already exists".into(),
        )));
    }

    if AccessRequestRepo::find_pending_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "An access request for this email is already pending".into(),
        )));
    }

    let request = AccessRequestRepo::create(
        &state.pool,
        &CreateAccessRequest {
            email: input.email,
            full_name: input.full_name,
            reason: input.reason,
        },
    )
    .await?;

    tracing::info!(request_id = %request.id, "Access request submitted");
    Ok(Json(ApiResponse::with_message(
        json!({ "request": request }),
        "Access request submitted. You will be notified once it is reviewed.",
    )))
}

/// POST /api/auth/verify-token
///
/// Check a token's validity, including that its user still exists and is
/// approved. Always 200; the payload carries the verdict.
pub async fn verify_token(
    State(state): State<AppState>,
    Json(input): Json<VerifyTokenRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let Ok(claims) = validate_token(&input.token, &state.config.jwt) else {
        return Ok(Json(ApiResponse::data(json!({ "valid": false }))));
    };

    let user = UserRepo::find_by_id(&state.pool, claims.sub).await?;
    let payload = match user {
        Some(user) if user.status == account::APPROVED => json!({
            "valid": true,
            "user": UserResponse::from(&user),
        }),
        _ => json!({ "valid": false }),
    };

    Ok(Json(ApiResponse::data(payload)))
}

/// POST /api/auth/request-password-reset
///
/// Always returns 200 so the endpoint cannot be used to discover which
/// emails have accounts.
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(input): Json<PasswordResetRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    input.validate()?;

    if let Some(user) = UserRepo::find_by_email(&state.pool, &input.email).await? {
        tracing::info!(user_id = %user.id, "Password reset requested");
    }

    Ok(Json(ApiResponse::message(
        "If an account exists for this email, reset instructions have been sent.",
    )))
}

/// POST /api/auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    input.validate()?;

    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let current_valid = verify_password(&input.current_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Current password is incorrect".into(),
        )));
    }

    let new_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &new_hash).await?;

    Ok(Json(ApiResponse::message("Password changed")))
}

/// POST /api/auth/logout
///
/// Tokens are stateless; logout exists so clients have a uniform endpoint to
/// call when discarding credentials.
pub async fn logout(_auth_user: AuthUser) -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::message("Logged out"))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    let profile = ProfileRepo::find_by_user(&state.pool, user.id).await?;

    Ok(Json(ApiResponse::data(json!({
        "user": UserResponse::from(&user),
        "profile": profile,
    }))))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Shared email + password + approval check for both login endpoints.
async fn authenticate(state: &AppState, input: &LoginRequest) -> AppResult<User> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    if user.status != account::APPROVED {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is not approved".into(),
        )));
    }

    Ok(user)
}

fn issue_token_response(
    state: &AppState,
    user: &User,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let token = generate_token(user.id, &user.email, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(ApiResponse::data(json!({
        "token": token,
        "user": UserResponse::from(user),
    }))))
}
