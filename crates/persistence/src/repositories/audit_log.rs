//! Audit log repository for database operations.

use chrono::{DateTime, Utc};
use domain::models::{
    AuditAction, AuditEntityType, AuditLog, AuditSeverity, CreateAuditLogInput,
    ListAuditLogsQuery,
};
use sqlx::PgPool;

use crate::entities::AuditLogEntity;

const AUDIT_LOG_COLUMNS: &str = "id, entity_type, entity_id, action, user_id, user_name, \
     description, old_value, new_value, severity, created_at";

/// Helper struct for building dynamic WHERE clauses from audit log filters.
/// Tracks conditions and parameter positions to avoid code duplication.
struct AuditLogFilterBuilder {
    conditions: Vec<String>,
    param_count: i32,
}

impl AuditLogFilterBuilder {
    /// Build filter conditions from a query.
    /// Returns the builder with WHERE clause and parameter count.
    fn build(query: &ListAuditLogsQuery) -> Self {
        let mut conditions = Vec::new();
        let mut param_count = 0;

        if query.entity_type.is_some() {
            param_count += 1;
            conditions.push(format!("entity_type = ${}", param_count));
        }

        if query.entity_id.is_some() {
            param_count += 1;
            conditions.push(format!("entity_id = ${}", param_count));
        }

        if query.action.is_some() {
            param_count += 1;
            conditions.push(format!("action = ${}", param_count));
        }

        if query.severity.is_some() {
            param_count += 1;
            conditions.push(format!("severity = ${}", param_count));
        }

        if query.user_id.is_some() {
            param_count += 1;
            conditions.push(format!("user_id = ${}", param_count));
        }

        if query.from.is_some() {
            param_count += 1;
            conditions.push(format!("created_at >= ${}", param_count));
        }

        if query.to.is_some() {
            param_count += 1;
            conditions.push(format!("created_at <= ${}", param_count));
        }

        Self {
            conditions,
            param_count,
        }
    }

    /// Get the WHERE clause as a string.
    fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            "TRUE".to_string()
        } else {
            self.conditions.join(" AND ")
        }
    }

    /// Get the current parameter count.
    fn param_count(&self) -> i32 {
        self.param_count
    }
}

/// Macro to bind query filter parameters to a SQLx builder.
/// This avoids code duplication for binding optional query parameters.
macro_rules! bind_query_filters {
    ($builder:expr, $query:expr) => {{
        let mut b = $builder;
        if let Some(entity_type) = $query.entity_type {
            b = b.bind(entity_type.to_string());
        }
        if let Some(ref entity_id) = $query.entity_id {
            b = b.bind(entity_id);
        }
        if let Some(action) = $query.action {
            b = b.bind(action.to_string());
        }
        if let Some(severity) = $query.severity {
            b = b.bind(severity.to_string());
        }
        if let Some(user_id) = $query.user_id {
            b = b.bind(user_id);
        }
        if let Some(from) = $query.from {
            b = b.bind(from);
        }
        if let Some(to) = $query.to {
            b = b.bind(to);
        }
        b
    }};
}

/// Repository for audit log database operations.
#[derive(Clone)]
pub struct AuditLogRepository {
    pool: PgPool,
}

impl AuditLogRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new audit log entry.
    pub async fn insert(&self, input: CreateAuditLogInput) -> Result<AuditLog, sqlx::Error> {
        let entity = sqlx::query_as::<_, AuditLogEntity>(&format!(
            r#"
            INSERT INTO audit_logs (entity_type, entity_id, action, user_id, user_name,
                                    description, old_value, new_value, severity)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {AUDIT_LOG_COLUMNS}
            "#
        ))
        .bind(input.entity_type.to_string())
        .bind(&input.entity_id)
        .bind(input.action.to_string())
        .bind(input.user_id)
        .bind(&input.user_name)
        .bind(&input.description)
        .bind(&input.old_value)
        .bind(&input.new_value)
        .bind(input.severity.to_string())
        .fetch_one(&self.pool)
        .await?;

        Ok(entity_to_domain(entity))
    }

    /// Insert audit log entry asynchronously (fire and forget).
    /// Uses tokio::spawn to avoid blocking the request.
    pub fn insert_async(&self, input: CreateAuditLogInput) {
        let pool = self.pool.clone();
        tokio::spawn(async move {
            let repo = AuditLogRepository::new(pool);
            if let Err(e) = repo.insert(input).await {
                tracing::error!("Failed to insert audit log: {}", e);
            }
        });
    }

    /// List audit logs with pagination and filtering, newest first.
    pub async fn list(
        &self,
        query: &ListAuditLogsQuery,
    ) -> Result<(Vec<AuditLog>, i64), sqlx::Error> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(50).clamp(1, 100);
        let offset = (page - 1) * limit;

        let filter = AuditLogFilterBuilder::build(query);
        let where_clause = filter.where_clause();
        let param_count = filter.param_count();

        let count_query = format!("SELECT COUNT(*) FROM audit_logs WHERE {}", where_clause);

        let count_builder = sqlx::query_scalar::<_, i64>(&count_query);
        let count_builder = bind_query_filters!(count_builder, query);
        let total: i64 = count_builder.fetch_one(&self.pool).await?;

        let list_query = format!(
            r#"
            SELECT {}
            FROM audit_logs
            WHERE {}
            ORDER BY created_at DESC
            LIMIT ${} OFFSET ${}
            "#,
            AUDIT_LOG_COLUMNS,
            where_clause,
            param_count + 1,
            param_count + 2
        );

        let list_builder = sqlx::query_as::<_, AuditLogEntity>(&list_query);
        let list_builder = bind_query_filters!(list_builder, query);
        let entities = list_builder
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let logs = entities.into_iter().map(entity_to_domain).collect();

        Ok((logs, total))
    }

    /// Delete one batch of entries older than the cutoff. Returns the number
    /// of rows removed; callers loop until a batch comes back short.
    pub async fn delete_older_than(
        &self,
        cutoff: DateTime<Utc>,
        batch_size: i64,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM audit_logs
            WHERE id IN (
                SELECT id FROM audit_logs
                WHERE created_at < $1
                ORDER BY created_at
                LIMIT $2
            )
            "#,
        )
        .bind(cutoff)
        .bind(batch_size)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

/// Convert entity to domain model.
fn entity_to_domain(entity: AuditLogEntity) -> AuditLog {
    AuditLog {
        id: entity.id,
        entity_type: entity
            .entity_type
            .parse()
            .unwrap_or(AuditEntityType::Setting),
        entity_id: entity.entity_id,
        action: entity.action.parse().unwrap_or(AuditAction::Update),
        user_id: entity.user_id,
        user_name: entity.user_name,
        description: entity.description,
        old_value: entity.old_value,
        new_value: entity.new_value,
        severity: entity.severity.parse().unwrap_or_default(),
        created_at: entity.created_at,
    }
}
