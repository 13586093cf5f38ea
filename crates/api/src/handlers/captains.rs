//! Handlers for the `/captains` resource (register, login, profile, logout).

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use ryde_core::error::CoreError;
use ryde_core::roles::ROLE_CAPTAIN;
use ryde_core::vehicle::{CaptainStatus, VehicleType};
use ryde_db::models::captain::{Captain, CreateCaptain};
use ryde_db::repositories::CaptainRepo;

use crate::auth::flow::{self, LoginRequest};
use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{validation_error, AppError, AppResult};
use crate::handlers::users::MIN_PASSWORD_LENGTH;
use crate::middleware::auth::AuthActor;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Vehicle record nested in [`RegisterCaptainRequest`].
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct VehicleRequest {
    #[validate(length(min = 3, message = "Color must be at least 3 characters"))]
    pub color: String,
    #[validate(length(min = 3, message = "Plate must be at least 3 characters"))]
    pub plate: String,
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: i32,
    /// Checked against the known vehicle types in the handler.
    pub vehicle_type: String,
}

/// Request body for `POST /captains/register`.
///
/// Missing fields deserialize to empty values so validation reports them
/// by name instead of the request being rejected wholesale.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterCaptainRequest {
    #[validate(length(min = 3, message = "Firstname must be at least 3 characters"))]
    pub first_name: String,
    pub last_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub password: String,
    #[validate(nested)]
    pub vehicle: VehicleRequest,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct CaptainAuthResponse {
    pub token: String,
    pub captain: Captain,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/captains/register
///
/// Create a captain account with its vehicle record, issue a bearer token,
/// and set the token cookie. New captains start out unavailable.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterCaptainRequest>,
) -> AppResult<(StatusCode, HeaderMap, Json<CaptainAuthResponse>)> {
    input.validate().map_err(|e| validation_error(&e))?;
    let vehicle_type = VehicleType::parse(&input.vehicle.vehicle_type).map_err(AppError::Core)?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    // Argon2 is CPU-bound; hash off the async worker threads.
    let password = input.password;
    let hashed = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::InternalError(format!("Password hashing task failed: {e}")))?
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateCaptain {
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email,
        password_hash: hashed,
        status: CaptainStatus::Unavailable.as_str().to_string(),
        vehicle_color: input.vehicle.color,
        vehicle_plate: input.vehicle.plate,
        vehicle_capacity: input.vehicle.capacity,
        vehicle_type: vehicle_type.as_str().to_string(),
    };

    // Duplicate emails and plates surface from uq_captains_email /
    // uq_captains_vehicle_plate as field-named 400s.
    let captain = CaptainRepo::create(&state.pool, &create).await?;
    tracing::info!(captain_id = captain.id, "Captain registered");

    let (token, headers) = flow::issue_session(&state, captain.id, ROLE_CAPTAIN)?;
    Ok((
        StatusCode::CREATED,
        headers,
        Json(CaptainAuthResponse { token, captain }),
    ))
}

/// POST /api/v1/captains/login
///
/// Authenticate with email + password. The failure response is deliberately
/// identical for unknown email and wrong password.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<(HeaderMap, Json<CaptainAuthResponse>)> {
    let found = CaptainRepo::find_by_email_with_password(&state.pool, &input.email).await?;
    let row = flow::require_actor(found)?;
    flow::check_credentials(input.password, row.password_hash).await?;

    let captain = row.captain;
    tracing::info!(captain_id = captain.id, "Captain logged in");

    let (token, headers) = flow::issue_session(&state, captain.id, ROLE_CAPTAIN)?;
    Ok((headers, Json(CaptainAuthResponse { token, captain })))
}

/// GET /api/v1/captains/profile
///
/// Return the authenticated captain's profile, vehicle included.
pub async fn profile(
    State(state): State<AppState>,
    actor: AuthActor,
) -> AppResult<Json<DataResponse<Captain>>> {
    flow::require_role(&actor, ROLE_CAPTAIN)?;

    let captain = CaptainRepo::find_by_id(&state.pool, actor.actor_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "captain",
            id: actor.actor_id,
        }))?;

    Ok(Json(DataResponse { data: captain }))
}

/// GET /api/v1/captains/logout
///
/// Revoke the presented token and clear the token cookie.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<(HeaderMap, Json<serde_json::Value>)> {
    let response_headers = flow::logout(&state, &headers).await?;
    Ok((response_headers, Json(json!({ "message": "Logout done" }))))
}
