//! Repository for the `revoked_tokens` table.
//!
//! Tokens enter this table at logout, keyed by their SHA-256 digest. A
//! record matters only while the token it revokes could still be presented,
//! so lookups ignore records older than the token validity window and the
//! background sweeper deletes them.

use chrono::Utc;
use ryde_core::types::Timestamp;
use sqlx::PgPool;

/// Provides operations on the revocation list.
pub struct RevokedTokenRepo;

impl RevokedTokenRepo {
    /// Record a token digest as revoked.
    ///
    /// Idempotent: revoking an already-revoked token succeeds without
    /// error, so concurrent logouts with the same token are a benign race.
    pub async fn revoke(pool: &PgPool, token_hash: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO revoked_tokens (token_hash) VALUES ($1)
             ON CONFLICT (token_hash) DO NOTHING",
        )
        .bind(token_hash)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Check whether a token digest is on the revocation list.
    ///
    /// Records older than `ttl_days` are treated as absent: the token they
    /// revoked has itself expired by then, so the revocation is moot. The
    /// unique index makes this a point lookup.
    pub async fn is_revoked(
        pool: &PgPool,
        token_hash: &str,
        ttl_days: i64,
    ) -> Result<bool, sqlx::Error> {
        let cutoff = Utc::now() - chrono::Duration::days(ttl_days);
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM revoked_tokens
              WHERE token_hash = $1 AND created_at > $2)",
        )
        .bind(token_hash)
        .bind(cutoff)
        .fetch_one(pool)
        .await?;
        Ok(exists.0)
    }

    /// Delete revocation records created before `cutoff`. Returns the count
    /// of deleted rows.
    pub async fn delete_older_than(pool: &PgPool, cutoff: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM revoked_tokens WHERE created_at < $1")
            .bind(cutoff)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
