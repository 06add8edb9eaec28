//! Language repository for database operations.

use domain::models::{
    CreateLanguageRequest, Language, LanguageStatus, TextDirection, TranslationProgress,
    UpdateLanguageRequest,
};
use sqlx::PgPool;

use crate::entities::LanguageEntity;
use crate::metrics::QueryTimer;

const LANGUAGE_COLUMNS: &str = "id, code, name, native_name, direction, enabled, is_default, \
     version, status, progress_total, progress_translated, progress_percentage, \
     last_published_at, published_by, priority, region, locale, date_format, time_format, \
     number_format, currency, flag, last_modified_by, created_at, updated_at";

/// Repository for language-related database operations.
///
/// Codes are normalized to uppercase at this seam, so callers may pass any
/// casing.
#[derive(Clone)]
pub struct LanguageRepository {
    pool: PgPool,
}

impl LanguageRepository {
    /// Creates a new LanguageRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new language. When the request marks it default, the current
    /// default is cleared in the same transaction.
    pub async fn create(
        &self,
        input: &CreateLanguageRequest,
        modified_by: Option<&str>,
    ) -> Result<Language, sqlx::Error> {
        let timer = QueryTimer::new("create_language");
        let code = input.code.to_uppercase();
        let is_default = input.is_default.unwrap_or(false);

        let mut tx = self.pool.begin().await?;

        if is_default {
            sqlx::query("UPDATE languages SET is_default = false WHERE is_default = true")
                .execute(&mut *tx)
                .await?;
        }

        let entity = sqlx::query_as::<_, LanguageEntity>(&format!(
            r#"
            INSERT INTO languages (code, name, native_name, direction, enabled, is_default,
                                   version, status, priority, region, locale, date_format,
                                   time_format, number_format, currency, flag, last_modified_by)
            VALUES ($1, $2, $3, $4, $5, $6, 1, 'draft', $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {LANGUAGE_COLUMNS}
            "#
        ))
        .bind(&code)
        .bind(&input.name)
        .bind(&input.native_name)
        .bind(input.direction.unwrap_or_default().to_string())
        .bind(input.enabled.unwrap_or(true))
        .bind(is_default)
        .bind(input.priority.unwrap_or(0))
        .bind(&input.region)
        .bind(&input.locale)
        .bind(&input.date_format)
        .bind(&input.time_format)
        .bind(&input.number_format)
        .bind(&input.currency)
        .bind(&input.flag)
        .bind(modified_by)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(entity_to_domain(entity))
    }

    /// Find a language by code.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Language>, sqlx::Error> {
        let timer = QueryTimer::new("find_language_by_code");
        let result = sqlx::query_as::<_, LanguageEntity>(&format!(
            r#"
            SELECT {LANGUAGE_COLUMNS}
            FROM languages
            WHERE code = $1
            "#
        ))
        .bind(code.to_uppercase())
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(entity_to_domain))
    }

    /// List languages with optional enabled/status filters, highest priority
    /// first, ties broken by name.
    pub async fn list(
        &self,
        enabled: Option<bool>,
        status: Option<LanguageStatus>,
    ) -> Result<Vec<Language>, sqlx::Error> {
        let timer = QueryTimer::new("list_languages");
        let result = sqlx::query_as::<_, LanguageEntity>(&format!(
            r#"
            SELECT {LANGUAGE_COLUMNS}
            FROM languages
            WHERE ($1::bool IS NULL OR enabled = $1)
              AND ($2::text IS NULL OR status = $2)
            ORDER BY priority DESC, name ASC
            "#
        ))
        .bind(enabled)
        .bind(status.map(|s| s.to_string()))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?.into_iter().map(entity_to_domain).collect())
    }

    /// Apply a partial field update. The version is untouched; only publish
    /// bumps it.
    pub async fn update(
        &self,
        code: &str,
        input: &UpdateLanguageRequest,
        modified_by: Option<&str>,
    ) -> Result<Option<Language>, sqlx::Error> {
        let timer = QueryTimer::new("update_language");
        let result = sqlx::query_as::<_, LanguageEntity>(&format!(
            r#"
            UPDATE languages
            SET name = COALESCE($2, name),
                native_name = COALESCE($3, native_name),
                direction = COALESCE($4, direction),
                enabled = COALESCE($5, enabled),
                is_default = COALESCE($6, is_default),
                status = COALESCE($7, status),
                priority = COALESCE($8, priority),
                region = COALESCE($9, region),
                locale = COALESCE($10, locale),
                date_format = COALESCE($11, date_format),
                time_format = COALESCE($12, time_format),
                number_format = COALESCE($13, number_format),
                currency = COALESCE($14, currency),
                flag = COALESCE($15, flag),
                last_modified_by = $16,
                updated_at = NOW()
            WHERE code = $1
            RETURNING {LANGUAGE_COLUMNS}
            "#
        ))
        .bind(code.to_uppercase())
        .bind(&input.name)
        .bind(&input.native_name)
        .bind(input.direction.map(|d| d.to_string()))
        .bind(input.enabled)
        // is_default = true must go through set_default; only clearing is bound here
        .bind(input.is_default.filter(|d| !d))
        .bind(input.status.map(|s| s.to_string()))
        .bind(input.priority)
        .bind(&input.region)
        .bind(&input.locale)
        .bind(&input.date_format)
        .bind(&input.time_format)
        .bind(&input.number_format)
        .bind(&input.currency)
        .bind(&input.flag)
        .bind(modified_by)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(entity_to_domain))
    }

    /// Make one language the default. Clear-all-then-set-one inside a
    /// transaction; the partial unique index backstops concurrent writers.
    pub async fn set_default(&self, code: &str) -> Result<Option<Language>, sqlx::Error> {
        let timer = QueryTimer::new("set_default_language");
        let code = code.to_uppercase();

        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE languages SET is_default = false WHERE is_default = true AND code <> $1")
            .bind(&code)
            .execute(&mut *tx)
            .await?;

        let entity = sqlx::query_as::<_, LanguageEntity>(&format!(
            r#"
            UPDATE languages
            SET is_default = true, updated_at = NOW()
            WHERE code = $1
            RETURNING {LANGUAGE_COLUMNS}
            "#
        ))
        .bind(&code)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(entity.map(entity_to_domain))
    }

    /// The effective default: the flagged record when enabled, else the
    /// enabled record with the highest priority, ties broken by name.
    pub async fn get_default(&self) -> Result<Option<Language>, sqlx::Error> {
        let timer = QueryTimer::new("get_default_language");
        let result = sqlx::query_as::<_, LanguageEntity>(&format!(
            r#"
            SELECT {LANGUAGE_COLUMNS}
            FROM languages
            WHERE enabled = true
            ORDER BY is_default DESC, priority DESC, name ASC
            LIMIT 1
            "#
        ))
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(entity_to_domain))
    }

    /// Count active translation keys and how many have a non-empty entry for
    /// this language, without writing anything.
    pub async fn compute_progress(&self, code: &str) -> Result<(i64, i64), sqlx::Error> {
        let timer = QueryTimer::new("compute_language_progress");
        let result = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE e.text IS NOT NULL AND e.text <> '') AS translated
            FROM translations t
            LEFT JOIN translation_entries e
                   ON e.translation_id = t.id AND e.language_code = $1
            WHERE t.status = 'active'
            "#,
        )
        .bind(code.to_uppercase())
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Recompute and store the progress counters. Idempotent; does not touch
    /// the version.
    pub async fn update_progress(&self, code: &str) -> Result<Option<Language>, sqlx::Error> {
        let timer = QueryTimer::new("update_language_progress");
        let result = sqlx::query_as::<_, LanguageEntity>(&format!(
            r#"
            UPDATE languages l
            SET progress_total = c.total,
                progress_translated = c.translated,
                progress_percentage = CASE
                    WHEN c.total > 0 THEN ROUND(c.translated::numeric / c.total * 100)::int
                    ELSE 0
                END
            FROM (
                SELECT COUNT(*) AS total,
                       COUNT(*) FILTER (WHERE e.text IS NOT NULL AND e.text <> '') AS translated
                FROM translations t
                LEFT JOIN translation_entries e
                       ON e.translation_id = t.id AND e.language_code = $1
                WHERE t.status = 'active'
            ) c
            WHERE l.code = $1
            RETURNING {LANGUAGE_COLUMNS}
            "#
        ))
        .bind(code.to_uppercase())
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(entity_to_domain))
    }

    /// Mark a language published: status flips, version bumps, publisher and
    /// timestamp are stamped, all in one statement. Archived languages are
    /// left untouched.
    pub async fn publish(
        &self,
        code: &str,
        published_by: Option<&str>,
    ) -> Result<Option<Language>, sqlx::Error> {
        let timer = QueryTimer::new("publish_language");
        let result = sqlx::query_as::<_, LanguageEntity>(&format!(
            r#"
            UPDATE languages
            SET status = 'published',
                version = version + 1,
                last_published_at = NOW(),
                published_by = $2,
                last_modified_by = $2,
                updated_at = NOW()
            WHERE code = $1 AND status <> 'archived'
            RETURNING {LANGUAGE_COLUMNS}
            "#
        ))
        .bind(code.to_uppercase())
        .bind(published_by)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(entity_to_domain))
    }

    /// Hard delete. Entries referencing the language go with it via the
    /// cascade on translation_entries.
    pub async fn delete(&self, code: &str) -> Result<Option<Language>, sqlx::Error> {
        let timer = QueryTimer::new("delete_language");
        let result = sqlx::query_as::<_, LanguageEntity>(&format!(
            r#"
            DELETE FROM languages
            WHERE code = $1
            RETURNING {LANGUAGE_COLUMNS}
            "#
        ))
        .bind(code.to_uppercase())
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(entity_to_domain))
    }
}

/// Convert entity to domain model.
fn entity_to_domain(entity: LanguageEntity) -> Language {
    Language {
        id: entity.id,
        code: entity.code,
        name: entity.name,
        native_name: entity.native_name,
        direction: entity.direction.parse().unwrap_or(TextDirection::Ltr),
        enabled: entity.enabled,
        is_default: entity.is_default,
        version: entity.version,
        status: entity.status.parse().unwrap_or(LanguageStatus::Draft),
        translation_progress: TranslationProgress {
            total: entity.progress_total,
            translated: entity.progress_translated,
            percentage: entity.progress_percentage,
        },
        last_published_at: entity.last_published_at,
        published_by: entity.published_by,
        priority: entity.priority,
        region: entity.region,
        locale: entity.locale,
        date_format: entity.date_format,
        time_format: entity.time_format,
        number_format: entity.number_format,
        currency: entity.currency,
        flag: entity.flag,
        last_modified_by: entity.last_modified_by,
        created_at: entity.created_at,
        updated_at: entity.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_entity_to_domain_conversion() {
        let entity = LanguageEntity {
            id: Uuid::new_v4(),
            code: "DE".to_string(),
            name: "German".to_string(),
            native_name: Some("Deutsch".to_string()),
            direction: "ltr".to_string(),
            enabled: true,
            is_default: false,
            version: 4,
            status: "published".to_string(),
            progress_total: 200,
            progress_translated: 150,
            progress_percentage: 75,
            last_published_at: Some(Utc::now()),
            published_by: Some("admin@example.com".to_string()),
            priority: 5,
            region: None,
            locale: Some("de-DE".to_string()),
            date_format: None,
            time_format: None,
            number_format: None,
            currency: Some("EUR".to_string()),
            flag: None,
            last_modified_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let language = entity_to_domain(entity);
        assert_eq!(language.status, LanguageStatus::Published);
        assert_eq!(language.direction, TextDirection::Ltr);
        assert_eq!(language.translation_progress.percentage, 75);
    }

    #[test]
    fn test_entity_to_domain_unknown_enum_falls_back() {
        let entity = LanguageEntity {
            id: Uuid::new_v4(),
            code: "XX".to_string(),
            name: "Unknown".to_string(),
            native_name: None,
            direction: "bogus".to_string(),
            enabled: false,
            is_default: false,
            version: 1,
            status: "bogus".to_string(),
            progress_total: 0,
            progress_translated: 0,
            progress_percentage: 0,
            last_published_at: None,
            published_by: None,
            priority: 0,
            region: None,
            locale: None,
            date_format: None,
            time_format: None,
            number_format: None,
            currency: None,
            flag: None,
            last_modified_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let language = entity_to_domain(entity);
        assert_eq!(language.status, LanguageStatus::Draft);
        assert_eq!(language.direction, TextDirection::Ltr);
    }
}
