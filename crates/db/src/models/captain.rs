//! Captain entity model and DTOs.

use ryde_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A captain row as read by the default column list, which excludes
/// `password_hash`. Safe to serialize into API responses as-is.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Captain {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// `"available"` or `"unavailable"`.
    pub status: String,
    pub vehicle_color: String,
    pub vehicle_plate: String,
    pub vehicle_capacity: i32,
    /// `"motorcycle"`, `"car"`, or `"auto"`.
    pub vehicle_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A captain row including the credential hash. Only the login path reads
/// this; it is never serialized.
#[derive(Debug, Clone, FromRow)]
pub struct CaptainWithCredential {
    #[sqlx(flatten)]
    pub captain: Captain,
    pub password_hash: String,
}

/// DTO for creating a new captain.
#[derive(Debug)]
pub struct CreateCaptain {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub status: String,
    pub vehicle_color: String,
    pub vehicle_plate: String,
    pub vehicle_capacity: i32,
    pub vehicle_type: String,
}
