//! Repository for the `captains` table.

use ryde_core::types::DbId;
use sqlx::PgPool;

use crate::models::captain::{Captain, CaptainWithCredential, CreateCaptain};

/// Column list shared across queries. Excludes `password_hash`; credential
/// reads go through [`CaptainRepo::find_by_email_with_password`].
const COLUMNS: &str = "id, first_name, last_name, email, status, vehicle_color, \
                       vehicle_plate, vehicle_capacity, vehicle_type, created_at, updated_at";

/// Provides CRUD operations for captains.
pub struct CaptainRepo;

impl CaptainRepo {
    /// Insert a new captain, returning the created row.
    ///
    /// A duplicate email or plate violates `uq_captains_email` /
    /// `uq_captains_vehicle_plate` and surfaces as a database error carrying
    /// that constraint name.
    pub async fn create(pool: &PgPool, input: &CreateCaptain) -> Result<Captain, sqlx::Error> {
        let query = format!(
            "INSERT INTO captains (first_name, last_name, email, password_hash, status,
                                   vehicle_color, vehicle_plate, vehicle_capacity, vehicle_type)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Captain>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.status)
            .bind(&input.vehicle_color)
            .bind(&input.vehicle_plate)
            .bind(input.vehicle_capacity)
            .bind(&input.vehicle_type)
            .fetch_one(pool)
            .await
    }

    /// Find a captain by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Captain>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM captains WHERE id = $1");
        sqlx::query_as::<_, Captain>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a captain by email including the stored credential hash.
    ///
    /// Login is the only caller; every other read uses the safe column list.
    pub async fn find_by_email_with_password(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<CaptainWithCredential>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS}, password_hash FROM captains WHERE email = $1");
        sqlx::query_as::<_, CaptainWithCredential>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}
