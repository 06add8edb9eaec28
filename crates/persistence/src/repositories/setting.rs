//! Setting repository for database operations.

use domain::models::{CategorySummary, Setting, SettingCategory, SettingValueType};
use serde_json::Value as JsonValue;
use sqlx::PgPool;

use crate::entities::{SettingEntity, SettingUpsertEntity, SettingVersionEntity};
use crate::metrics::QueryTimer;

const SETTING_COLUMNS: &str = "id, key, category, value, value_type, description, is_public, \
     encrypted, active, version, last_modified_by, last_modified_at, created_at, updated_at";

/// Repository for setting-related database operations.
#[derive(Clone)]
pub struct SettingRepository {
    pool: PgPool,
}

impl SettingRepository {
    /// Creates a new SettingRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates or overwrites a setting in one statement.
    ///
    /// The version bump happens inside the UPDATE arm, so concurrent upserts
    /// cannot lose increments. Returns the stored record plus whether the
    /// statement created a fresh row. Upserting a soft-deleted key revives it.
    #[allow(clippy::too_many_arguments)]
    pub async fn upsert(
        &self,
        category: SettingCategory,
        key: &str,
        value: &JsonValue,
        value_type: SettingValueType,
        description: Option<&str>,
        is_public: Option<bool>,
        encrypted: Option<bool>,
        modified_by: Option<&str>,
    ) -> Result<(Setting, bool), sqlx::Error> {
        let timer = QueryTimer::new("upsert_setting");
        let result = sqlx::query_as::<_, SettingUpsertEntity>(&format!(
            r#"
            INSERT INTO settings (key, category, value, value_type, description,
                                  is_public, encrypted, active, version,
                                  last_modified_by, last_modified_at)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, false), COALESCE($7, false),
                    true, 1, $8, NOW())
            ON CONFLICT (key)
            DO UPDATE SET
                category = $2,
                value = $3,
                value_type = $4,
                description = COALESCE($5, settings.description),
                is_public = COALESCE($6, settings.is_public),
                encrypted = COALESCE($7, settings.encrypted),
                active = true,
                version = settings.version + 1,
                last_modified_by = $8,
                last_modified_at = NOW(),
                updated_at = NOW()
            RETURNING {SETTING_COLUMNS}, (xmax = 0) AS created
            "#
        ))
        .bind(key)
        .bind(category.to_string())
        .bind(value)
        .bind(value_type.to_string())
        .bind(description)
        .bind(is_public)
        .bind(encrypted)
        .bind(modified_by)
        .fetch_one(&self.pool)
        .await;
        timer.record();

        let row = result?;
        Ok((entity_to_domain(row.setting), row.created))
    }

    /// Find an active setting by category and key.
    pub async fn find(
        &self,
        category: SettingCategory,
        key: &str,
    ) -> Result<Option<Setting>, sqlx::Error> {
        let timer = QueryTimer::new("find_setting");
        let result = sqlx::query_as::<_, SettingEntity>(&format!(
            r#"
            SELECT {SETTING_COLUMNS}
            FROM settings
            WHERE key = $1 AND category = $2 AND active = true
            "#
        ))
        .bind(key)
        .bind(category.to_string())
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(entity_to_domain))
    }

    /// List active settings, optionally restricted to a category and to
    /// public records.
    pub async fn list(
        &self,
        category: Option<SettingCategory>,
        public_only: bool,
    ) -> Result<Vec<Setting>, sqlx::Error> {
        let timer = QueryTimer::new("list_settings");
        let result = sqlx::query_as::<_, SettingEntity>(&format!(
            r#"
            SELECT {SETTING_COLUMNS}
            FROM settings
            WHERE active = true
              AND ($1::text IS NULL OR category = $1)
              AND (NOT $2 OR is_public = true)
            ORDER BY category, key
            "#
        ))
        .bind(category.map(|c| c.to_string()))
        .bind(public_only)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?.into_iter().map(entity_to_domain).collect())
    }

    /// Soft-delete a setting. Still a version-incrementing write; the key
    /// remains reserved and can be revived by a later upsert.
    pub async fn soft_delete(
        &self,
        category: SettingCategory,
        key: &str,
        modified_by: Option<&str>,
    ) -> Result<Option<Setting>, sqlx::Error> {
        let timer = QueryTimer::new("soft_delete_setting");
        let result = sqlx::query_as::<_, SettingEntity>(&format!(
            r#"
            UPDATE settings
            SET active = false,
                version = version + 1,
                last_modified_by = $3,
                last_modified_at = NOW(),
                updated_at = NOW()
            WHERE key = $1 AND category = $2 AND active = true
            RETURNING {SETTING_COLUMNS}
            "#
        ))
        .bind(key)
        .bind(category.to_string())
        .bind(modified_by)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(entity_to_domain))
    }

    /// `(key, version)` pairs of active settings for the aggregate hash.
    pub async fn version_pairs(
        &self,
        category: Option<SettingCategory>,
    ) -> Result<Vec<(String, i32)>, sqlx::Error> {
        let timer = QueryTimer::new("setting_version_pairs");
        let result = sqlx::query_as::<_, SettingVersionEntity>(
            r#"
            SELECT key, version
            FROM settings
            WHERE active = true
              AND ($1::text IS NULL OR category = $1)
            "#,
        )
        .bind(category.map(|c| c.to_string()))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?.into_iter().map(|r| (r.key, r.version)).collect())
    }

    /// Distinct categories of active settings with their record counts.
    pub async fn categories(&self) -> Result<Vec<CategorySummary>, sqlx::Error> {
        let timer = QueryTimer::new("setting_categories");
        let result = sqlx::query_as::<_, crate::entities::CategoryCountEntity>(
            r#"
            SELECT category, COUNT(*) AS count
            FROM settings
            WHERE active = true
            GROUP BY category
            ORDER BY category
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?
            .into_iter()
            .map(|r| CategorySummary {
                category: r
                    .category
                    .parse()
                    .unwrap_or(SettingCategory::General),
                count: r.count,
            })
            .collect())
    }
}

/// Convert entity to domain model.
fn entity_to_domain(entity: SettingEntity) -> Setting {
    Setting {
        id: entity.id,
        key: entity.key,
        category: entity
            .category
            .parse()
            .unwrap_or(SettingCategory::General),
        value: entity.value,
        value_type: entity
            .value_type
            .parse()
            .unwrap_or(SettingValueType::String),
        description: entity.description,
        is_public: entity.is_public,
        encrypted: entity.encrypted,
        active: entity.active,
        version: entity.version,
        last_modified_by: entity.last_modified_by,
        last_modified_at: entity.last_modified_at,
        created_at: entity.created_at,
        updated_at: entity.updated_at,
    }
}
