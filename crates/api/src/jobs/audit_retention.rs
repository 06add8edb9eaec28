//! Audit log retention background job.

use chrono::{Duration, Utc};
use persistence::repositories::AuditLogRepository;
use sqlx::PgPool;
use tracing::info;

use super::scheduler::{Job, JobFrequency};

/// Background job that prunes audit entries older than the retention window.
pub struct AuditRetentionJob {
    pool: PgPool,
    retention_days: u32,
    batch_size: i64,
}

impl AuditRetentionJob {
    /// Create a new retention job.
    pub fn new(pool: PgPool, retention_days: u32) -> Self {
        Self {
            pool,
            retention_days,
            batch_size: 10_000,
        }
    }

    /// Delete expired entries in batches to avoid long locks.
    async fn purge_expired(&self) -> Result<u64, sqlx::Error> {
        let repo = AuditLogRepository::new(self.pool.clone());
        let cutoff = Utc::now() - Duration::days(self.retention_days as i64);
        let mut total_deleted: u64 = 0;

        loop {
            let deleted = repo.delete_older_than(cutoff, self.batch_size).await?;
            total_deleted += deleted;

            if deleted < self.batch_size as u64 {
                break;
            }

            // Yield between batches so request queries get pool time
            tokio::task::yield_now().await;
        }

        Ok(total_deleted)
    }
}

#[async_trait::async_trait]
impl Job for AuditRetentionJob {
    fn name(&self) -> &'static str {
        "audit_retention"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Daily
    }

    async fn execute(&self) -> Result<(), String> {
        let deleted = self
            .purge_expired()
            .await
            .map_err(|e| format!("Failed to purge expired audit entries: {}", e))?;

        info!(
            deleted,
            retention_days = self.retention_days,
            "Purged expired audit entries"
        );

        Ok(())
    }
}
