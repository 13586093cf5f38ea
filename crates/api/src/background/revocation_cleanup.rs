//! Periodic cleanup of aged token-revocation records.
//!
//! A revocation record only matters while the token it revokes could still
//! be presented; once the token validity window has passed, both are dead
//! weight. The `is_revoked` lookup already ignores aged records, so this job
//! only bounds table growth -- correctness never depends on its timing.

use std::time::Duration;

use chrono::Utc;
use ryde_db::repositories::RevokedTokenRepo;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// How often the cleanup job runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(3600); // 1 hour

/// Run the revocation cleanup loop.
///
/// Deletes revocation records older than `retention_days` (the token
/// validity window). Runs until `cancel` is triggered.
pub async fn run(pool: PgPool, retention_days: i64, cancel: CancellationToken) {
    tracing::info!(
        retention_days,
        interval_secs = CLEANUP_INTERVAL.as_secs(),
        "Revocation cleanup job started"
    );

    let mut interval = tokio::time::interval(CLEANUP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Revocation cleanup job stopping");
                break;
            }
            _ = interval.tick() => {
                let cutoff = Utc::now() - chrono::Duration::days(retention_days);
                match RevokedTokenRepo::delete_older_than(&pool, cutoff).await {
                    Ok(deleted) => {
                        if deleted > 0 {
                            tracing::info!(deleted, "Revocation cleanup: purged aged records");
                        } else {
                            tracing::debug!("Revocation cleanup: no records to purge");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Revocation cleanup failed");
                    }
                }
            }
        }
    }
}
