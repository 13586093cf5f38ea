pub mod captains;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users/register        register (public)
/// /users/login           login (public)
/// /users/profile         profile (requires auth)
/// /users/logout          logout (revokes the presented token)
///
/// /captains/register     register (public)
/// /captains/login        login (public)
/// /captains/profile      profile (requires auth)
/// /captains/logout       logout (revokes the presented token)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/captains", captains::router())
}
