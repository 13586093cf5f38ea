//! Session flow shared by both actor kinds.
//!
//! Users and captains authenticate identically; everything that does not
//! depend on the concrete table lives here, parameterized by the role tag:
//! token extraction (cookie first, then bearer header), the digest under
//! which tokens enter the revocation list, cookie issue/clear, the
//! undifferentiated credential check, and logout.

use axum::http::header::{InvalidHeaderValue, AUTHORIZATION, COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use ryde_core::error::CoreError;
use ryde_core::types::DbId;
use ryde_db::repositories::RevokedTokenRepo;

use crate::auth::jwt::generate_token;
use crate::auth::password::verify_password;
use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthActor;
use crate::state::AppState;

/// Name of the HTTP-only cookie carrying the bearer token.
pub const TOKEN_COOKIE_NAME: &str = "token";

/// Message returned for any login failure. Deliberately identical for
/// unknown email and wrong password so callers cannot enumerate accounts.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Request body for `POST /users/login` and `POST /captains/login`.
///
/// Missing fields deserialize to empty strings; an empty email simply never
/// matches an account, which keeps the failure undifferentiated.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Token extraction and revocation digests
// ---------------------------------------------------------------------------

/// Compute the SHA-256 hex digest under which a token is stored in the
/// revocation list. The raw token never reaches the database.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Extract the bearer token from a request: `token` cookie first, then the
/// `Authorization: Bearer <token>` header. `None` when neither is present.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    extract_cookie_token(headers).or_else(|| extract_bearer_token(headers))
}

fn extract_cookie_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(COOKIE)?.to_str().ok()?;
    for pair in value.split(';') {
        let mut parts = pair.splitn(2, '=');
        let (Some(key), Some(val)) = (parts.next(), parts.next()) else {
            continue;
        };
        if key.trim() == TOKEN_COOKIE_NAME && !val.trim().is_empty() {
            return Some(val.trim().to_string());
        }
    }
    None
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.trim().strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

// ---------------------------------------------------------------------------
// Cookies
// ---------------------------------------------------------------------------

/// Build the `Set-Cookie` value carrying a freshly issued token. HTTP-only,
/// `Max-Age` equal to the token lifetime.
pub fn auth_cookie(token: &str, config: &ServerConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    let max_age = config.jwt.token_expiry_secs();
    let mut cookie = format!(
        "{TOKEN_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}"
    );
    if config.cookie_secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Build the `Set-Cookie` value that clears the token cookie.
pub fn clear_auth_cookie(config: &ServerConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie =
        format!("{TOKEN_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if config.cookie_secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

// ---------------------------------------------------------------------------
// Login / logout plumbing
// ---------------------------------------------------------------------------

/// Map an absent actor lookup to the undifferentiated login failure.
pub fn require_actor<T>(actor: Option<T>) -> AppResult<T> {
    actor.ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))
}

/// Verify a login password against the stored hash, failing with the same
/// undifferentiated error a missing actor produces.
pub async fn check_credentials(password: String, stored_hash: String) -> AppResult<()> {
    // Argon2 verification is CPU-bound; keep it off the async worker threads.
    let valid = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .map_err(|e| AppError::InternalError(format!("Password verification task failed: {e}")))?
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if valid {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )))
    }
}

/// Reject tokens minted for the other actor kind. Ids are per-table, so a
/// captain token must never resolve against the users table or vice versa.
pub fn require_role(actor: &AuthActor, role: &str) -> AppResult<()> {
    if actor.role == role {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Unauthorized(
            "Token does not grant access to this resource".into(),
        )))
    }
}

/// Mint a token for the actor and build the matching `Set-Cookie` headers.
pub fn issue_session(
    state: &AppState,
    actor_id: DbId,
    role: &str,
) -> AppResult<(String, HeaderMap)> {
    let token = generate_token(actor_id, role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let cookie = auth_cookie(&token, &state.config)
        .map_err(|e| AppError::InternalError(format!("Cookie encoding error: {e}")))?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);

    Ok((token, headers))
}

/// Shared logout: extract the current token, insert it into the revocation
/// list, and clear the client cookie.
///
/// A request with no token in either place is an authentication error, not
/// a server fault. The token is revoked without verifying its signature:
/// revoking an expired or even garbage token is harmless.
pub async fn logout(state: &AppState, headers: &HeaderMap) -> AppResult<HeaderMap> {
    let token = extract_token(headers).ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized("Missing authentication token".into()))
    })?;

    RevokedTokenRepo::revoke(&state.pool, &hash_token(&token)).await?;
    tracing::info!("Token revoked on logout");

    let cookie = clear_auth_cookie(&state.config)
        .map_err(|e| AppError::InternalError(format!("Cookie encoding error: {e}")))?;
    let mut response_headers = HeaderMap::new();
    response_headers.insert(SET_COOKIE, cookie);

    Ok(response_headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::JwtConfig;

    fn test_server_config(secure: bool) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec![],
            request_timeout_secs: 30,
            shutdown_timeout_secs: 30,
            cookie_secure: secure,
            jwt: JwtConfig {
                secret: "unit-test-secret".to_string(),
                token_expiry_days: 7,
            },
        }
    }

    #[test]
    fn test_hash_token_is_stable_sha256_hex() {
        let a = hash_token("some.jwt.token");
        let b = hash_token("some.jwt.token");
        assert_eq!(a, b, "digest of the same token must be stable");
        assert_eq!(a.len(), 64);
        assert_ne!(a, hash_token("another.jwt.token"));
    }

    #[test]
    fn test_extract_prefers_cookie_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("token=from-cookie"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_static("Bearer from-header"),
        );
        assert_eq!(extract_token(&headers).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn test_extract_falls_back_to_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_static("Bearer from-header"),
        );
        assert_eq!(extract_token(&headers).as_deref(), Some("from-header"));
    }

    #[test]
    fn test_extract_finds_token_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; token=abc123; lang=en"),
        );
        assert_eq!(extract_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_extract_absent_token_is_none() {
        let headers = HeaderMap::new();
        assert_eq!(extract_token(&headers), None);

        // A malformed Authorization header is treated as absent.
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic xyz"));
        assert_eq!(extract_token(&headers), None);
    }

    #[test]
    fn test_auth_cookie_attributes() {
        let config = test_server_config(false);
        let cookie = auth_cookie("tok", &config).expect("cookie should build");
        let value = cookie.to_str().unwrap();
        assert!(value.starts_with("token=tok;"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("Max-Age=604800"));
        assert!(!value.contains("Secure"));

        let secure = auth_cookie("tok", &test_server_config(true)).unwrap();
        assert!(secure.to_str().unwrap().contains("Secure"));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let config = test_server_config(false);
        let cookie = clear_auth_cookie(&config).expect("cookie should build");
        let value = cookie.to_str().unwrap();
        assert!(value.starts_with("token=;"));
        assert!(value.contains("Max-Age=0"));
    }
}
