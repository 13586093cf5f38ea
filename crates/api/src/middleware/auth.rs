//! Authentication extractor gating protected routes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use ryde_core::error::CoreError;
use ryde_core::types::DbId;
use ryde_db::repositories::RevokedTokenRepo;

use crate::auth::flow::{extract_token, hash_token};
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated actor extracted from the token cookie or the
/// `Authorization: Bearer <token>` header (cookie wins).
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(actor: AuthActor) -> AppResult<Json<()>> {
///     tracing::info!(actor_id = actor.actor_id, role = %actor.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// Extraction is a three-step gate: find a token, reject it if it is on the
/// revocation list, then verify signature and expiry. Every failure path
/// resolves to a 401 response; nothing else escapes.
#[derive(Debug, Clone)]
pub struct AuthActor {
    /// The actor's internal database id (from `claims.sub`).
    pub actor_id: DbId,
    /// The actor's role name (`"user"` or `"captain"`).
    pub role: String,
}

impl FromRequestParts<AppState> for AuthActor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Missing authentication token".into()))
        })?;

        // Logged-out tokens are rejected even while their signature and
        // expiry are still valid.
        let revoked = RevokedTokenRepo::is_revoked(
            &state.pool,
            &hash_token(&token),
            state.config.jwt.token_expiry_days,
        )
        .await
        .map_err(AppError::Database)?;
        if revoked {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Token has been revoked".into(),
            )));
        }

        let claims = validate_token(&token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthActor {
            actor_id: claims.sub,
            role: claims.role,
        })
    }
}
