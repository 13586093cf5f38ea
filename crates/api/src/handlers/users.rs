//! Handlers for the `/users` resource (register, login, profile, logout).

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use ryde_core::error::CoreError;
use ryde_core::roles::ROLE_USER;
use ryde_db::models::user::{CreateUser, User};
use ryde_db::repositories::UserRepo;

use crate::auth::flow::{self, LoginRequest};
use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{validation_error, AppError, AppResult};
use crate::middleware::auth::AuthActor;
use crate::response::DataResponse;
use crate::state::AppState;

/// Minimum password length enforced at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /users/register`.
///
/// Missing fields deserialize to empty strings so validation reports them
/// by name instead of the request being rejected wholesale.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterUserRequest {
    #[validate(length(min = 3, message = "Firstname must be at least 3 characters"))]
    pub first_name: String,
    pub last_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub password: String,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct UserAuthResponse {
    pub token: String,
    pub user: User,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/users/register
///
/// Create a user account, issue a bearer token, and set the token cookie.
/// Returns 201 with the token and the created user (sans credential).
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterUserRequest>,
) -> AppResult<(StatusCode, HeaderMap, Json<UserAuthResponse>)> {
    input.validate().map_err(|e| validation_error(&e))?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    // Argon2 is CPU-bound; hash off the async worker threads.
    let password = input.password;
    let hashed = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::InternalError(format!("Password hashing task failed: {e}")))?
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateUser {
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email,
        password_hash: hashed,
    };

    // A duplicate email surfaces from uq_users_email as a field-named 400.
    let user = UserRepo::create(&state.pool, &create).await?;
    tracing::info!(user_id = user.id, "User registered");

    let (token, headers) = flow::issue_session(&state, user.id, ROLE_USER)?;
    Ok((
        StatusCode::CREATED,
        headers,
        Json(UserAuthResponse { token, user }),
    ))
}

/// POST /api/v1/users/login
///
/// Authenticate with email + password. The failure response is deliberately
/// identical for unknown email and wrong password.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<(HeaderMap, Json<UserAuthResponse>)> {
    let found = UserRepo::find_by_email_with_password(&state.pool, &input.email).await?;
    let row = flow::require_actor(found)?;
    flow::check_credentials(input.password, row.password_hash).await?;

    let user = row.user;
    tracing::info!(user_id = user.id, "User logged in");

    let (token, headers) = flow::issue_session(&state, user.id, ROLE_USER)?;
    Ok((headers, Json(UserAuthResponse { token, user })))
}

/// GET /api/v1/users/profile
///
/// Return the authenticated user's profile.
pub async fn profile(
    State(state): State<AppState>,
    actor: AuthActor,
) -> AppResult<Json<DataResponse<User>>> {
    flow::require_role(&actor, ROLE_USER)?;

    let user = UserRepo::find_by_id(&state.pool, actor.actor_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "user",
            id: actor.actor_id,
        }))?;

    Ok(Json(DataResponse { data: user }))
}

/// GET /api/v1/users/logout
///
/// Revoke the presented token and clear the token cookie.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<(HeaderMap, Json<serde_json::Value>)> {
    let response_headers = flow::logout(&state, &headers).await?;
    Ok((response_headers, Json(json!({ "message": "Logout done" }))))
}
