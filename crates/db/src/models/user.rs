//! User entity model and DTOs.

use ryde_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A user row as read by the default column list, which excludes
/// `password_hash`. Safe to serialize into API responses as-is.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A user row including the credential hash. Only the login path reads this;
/// it is never serialized.
#[derive(Debug, Clone, FromRow)]
pub struct UserWithCredential {
    #[sqlx(flatten)]
    pub user: User,
    pub password_hash: String,
}

/// DTO for creating a new user.
#[derive(Debug)]
pub struct CreateUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}
