//! Repository for the `users` table.

use ryde_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User, UserWithCredential};

/// Column list shared across queries. Excludes `password_hash`; credential
/// reads go through [`UserRepo::find_by_email_with_password`].
const COLUMNS: &str = "id, first_name, last_name, email, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// A duplicate email violates `uq_users_email` and surfaces as a
    /// database error carrying that constraint name.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (first_name, last_name, email, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email including the stored credential hash.
    ///
    /// Login is the only caller; every other read uses the safe column list.
    pub async fn find_by_email_with_password(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<UserWithCredential>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS}, password_hash FROM users WHERE email = $1");
        sqlx::query_as::<_, UserWithCredential>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}
