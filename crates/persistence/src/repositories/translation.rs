//! Translation repository for database operations.
//!
//! Entry writes and verification bump the parent translation's version and
//! refresh the affected language's stored progress counters inside the same
//! transaction.

use chrono::Utc;
use domain::models::{
    CategoryCount, CreateTranslationRequest, EntryStatus, LanguageStats, Translation,
    TranslationEntry, TranslationStatus, UpdateTranslationRequest,
};
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashMap;
use uuid::Uuid;

use crate::entities::{
    ExportRowEntity, LanguageStatsEntity, PackRowEntity, TranslationEntity, TranslationEntryEntity,
};
use crate::metrics::QueryTimer;

const TRANSLATION_COLUMNS: &str = "id, key, category, default_text, description, context, \
     version, status, created_by, updated_by, created_at, updated_at";

const ENTRY_COLUMNS: &str = "id, translation_id, language_code, text, status, needs_review, \
     auto_translated, translated_by, translated_at, verified_by, verified_at, created_at, \
     updated_at";

/// Outcome of a per-language entry write.
#[derive(Debug, Clone)]
pub enum EntryWriteOutcome {
    Saved(TranslationEntry),
    UnknownKey,
    LanguageUnavailable,
}

/// Outcome of a single import item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Created,
    Updated,
    Skipped,
    UnknownKey,
}

/// Repository for translation-related database operations.
#[derive(Clone)]
pub struct TranslationRepository {
    pool: PgPool,
}

impl TranslationRepository {
    /// Creates a new TranslationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new translation key with its default text.
    pub async fn create(
        &self,
        input: &CreateTranslationRequest,
        created_by: Option<&str>,
    ) -> Result<Translation, sqlx::Error> {
        let timer = QueryTimer::new("create_translation");
        let category = input
            .category
            .as_deref()
            .unwrap_or(domain::models::translation::DEFAULT_CATEGORY);

        let result = sqlx::query_as::<_, TranslationEntity>(&format!(
            r#"
            INSERT INTO translations (key, category, default_text, description, context,
                                      version, status, created_by, updated_by)
            VALUES ($1, $2, $3, $4, $5, 1, 'active', $6, $6)
            RETURNING {TRANSLATION_COLUMNS}
            "#
        ))
        .bind(&input.key)
        .bind(category)
        .bind(&input.default_text)
        .bind(&input.description)
        .bind(&input.context)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(entity_to_domain(result?, Vec::new()))
    }

    /// Find a translation by key with its entries, optionally restricted to
    /// one language.
    pub async fn find_by_key(
        &self,
        key: &str,
        language_code: Option<&str>,
    ) -> Result<Option<Translation>, sqlx::Error> {
        let timer = QueryTimer::new("find_translation_by_key");
        let parent = sqlx::query_as::<_, TranslationEntity>(&format!(
            r#"
            SELECT {TRANSLATION_COLUMNS}
            FROM translations
            WHERE key = $1
            "#
        ))
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        let Some(parent) = parent else {
            timer.record();
            return Ok(None);
        };

        let entries = sqlx::query_as::<_, TranslationEntryEntity>(&format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM translation_entries
            WHERE translation_id = $1
              AND ($2::text IS NULL OR language_code = $2)
            ORDER BY language_code
            "#
        ))
        .bind(parent.id)
        .bind(language_code.map(|c| c.to_uppercase()))
        .fetch_all(&self.pool)
        .await?;
        timer.record();

        let entries = entries.into_iter().map(entry_entity_to_domain).collect();
        Ok(Some(entity_to_domain(parent, entries)))
    }

    /// Filtered, searched, paginated listing sorted by category then key.
    /// Returns the page plus the total match count.
    pub async fn list(
        &self,
        page: i64,
        limit: i64,
        search: Option<&str>,
        category: Option<&str>,
        status: Option<TranslationStatus>,
        language_code: Option<&str>,
    ) -> Result<(Vec<Translation>, i64), sqlx::Error> {
        let timer = QueryTimer::new("list_translations");
        let offset = (page - 1) * limit;
        let status = status.map(|s| s.to_string());
        let language_code = language_code.map(|c| c.to_uppercase());

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM translations
            WHERE ($1::text IS NULL OR category = $1)
              AND ($2::text IS NULL OR status = $2)
              AND ($3::text IS NULL OR key ILIKE '%' || $3 || '%'
                   OR default_text ILIKE '%' || $3 || '%')
            "#,
        )
        .bind(&category)
        .bind(&status)
        .bind(search)
        .fetch_one(&self.pool)
        .await?;

        let parents = sqlx::query_as::<_, TranslationEntity>(&format!(
            r#"
            SELECT {TRANSLATION_COLUMNS}
            FROM translations
            WHERE ($1::text IS NULL OR category = $1)
              AND ($2::text IS NULL OR status = $2)
              AND ($3::text IS NULL OR key ILIKE '%' || $3 || '%'
                   OR default_text ILIKE '%' || $3 || '%')
            ORDER BY category ASC, key ASC
            LIMIT $4 OFFSET $5
            "#
        ))
        .bind(&category)
        .bind(&status)
        .bind(search)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<Uuid> = parents.iter().map(|p| p.id).collect();
        let entries = sqlx::query_as::<_, TranslationEntryEntity>(&format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM translation_entries
            WHERE translation_id = ANY($1)
              AND ($2::text IS NULL OR language_code = $2)
            ORDER BY language_code
            "#
        ))
        .bind(&ids)
        .bind(&language_code)
        .fetch_all(&self.pool)
        .await?;
        timer.record();

        let mut by_parent: HashMap<Uuid, Vec<TranslationEntry>> = HashMap::new();
        for entry in entries {
            by_parent
                .entry(entry.translation_id)
                .or_default()
                .push(entry_entity_to_domain(entry));
        }

        let translations = parents
            .into_iter()
            .map(|p| {
                let entries = by_parent.remove(&p.id).unwrap_or_default();
                entity_to_domain(p, entries)
            })
            .collect();

        Ok((translations, total))
    }

    /// Apply a partial update to default text and metadata; bumps the
    /// version.
    pub async fn update(
        &self,
        key: &str,
        input: &UpdateTranslationRequest,
        updated_by: Option<&str>,
    ) -> Result<Option<Translation>, sqlx::Error> {
        let timer = QueryTimer::new("update_translation");
        let parent = sqlx::query_as::<_, TranslationEntity>(&format!(
            r#"
            UPDATE translations
            SET category = COALESCE($2, category),
                default_text = COALESCE($3, default_text),
                description = COALESCE($4, description),
                context = COALESCE($5, context),
                status = COALESCE($6, status),
                version = version + 1,
                updated_by = $7,
                updated_at = NOW()
            WHERE key = $1
            RETURNING {TRANSLATION_COLUMNS}
            "#
        ))
        .bind(key)
        .bind(&input.category)
        .bind(&input.default_text)
        .bind(&input.description)
        .bind(&input.context)
        .bind(input.status.map(|s| s.to_string()))
        .bind(updated_by)
        .fetch_optional(&self.pool)
        .await?;

        let Some(parent) = parent else {
            timer.record();
            return Ok(None);
        };

        let entries = sqlx::query_as::<_, TranslationEntryEntity>(&format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM translation_entries
            WHERE translation_id = $1
            ORDER BY language_code
            "#
        ))
        .bind(parent.id)
        .fetch_all(&self.pool)
        .await?;
        timer.record();

        let entries = entries.into_iter().map(entry_entity_to_domain).collect();
        Ok(Some(entity_to_domain(parent, entries)))
    }

    /// Hard delete a translation key; entries go with it via the cascade.
    pub async fn delete(&self, key: &str) -> Result<Option<Translation>, sqlx::Error> {
        let timer = QueryTimer::new("delete_translation");
        let result = sqlx::query_as::<_, TranslationEntity>(&format!(
            r#"
            DELETE FROM translations
            WHERE key = $1
            RETURNING {TRANSLATION_COLUMNS}
            "#
        ))
        .bind(key)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(|p| entity_to_domain(p, Vec::new())))
    }

    /// Upsert one language's entry for a key.
    ///
    /// Validates inside the transaction that the key exists and the language
    /// is enabled, bumps the parent version, and refreshes the language's
    /// stored progress.
    #[allow(clippy::too_many_arguments)]
    pub async fn set_entry(
        &self,
        key: &str,
        language_code: &str,
        text: &str,
        status: EntryStatus,
        needs_review: bool,
        auto_translated: bool,
        editor: Option<&str>,
    ) -> Result<EntryWriteOutcome, sqlx::Error> {
        let timer = QueryTimer::new("set_translation_entry");
        let language_code = language_code.to_uppercase();

        let mut tx = self.pool.begin().await?;

        let translation_id: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM translations WHERE key = $1")
                .bind(key)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(translation_id) = translation_id else {
            timer.record();
            return Ok(EntryWriteOutcome::UnknownKey);
        };

        let enabled: Option<bool> =
            sqlx::query_scalar("SELECT enabled FROM languages WHERE code = $1")
                .bind(&language_code)
                .fetch_optional(&mut *tx)
                .await?;
        if enabled != Some(true) {
            timer.record();
            return Ok(EntryWriteOutcome::LanguageUnavailable);
        }

        let verified = status == EntryStatus::Verified;
        let verified_by = if verified { editor } else { None };
        let verified_at = verified.then(Utc::now);

        let entry = sqlx::query_as::<_, TranslationEntryEntity>(&format!(
            r#"
            INSERT INTO translation_entries (translation_id, language_code, text, status,
                                             needs_review, auto_translated, translated_by,
                                             translated_at, verified_by, verified_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), $8, $9)
            ON CONFLICT (translation_id, language_code)
            DO UPDATE SET
                text = $3,
                status = $4,
                needs_review = $5,
                auto_translated = $6,
                translated_by = $7,
                translated_at = NOW(),
                verified_by = $8,
                verified_at = $9,
                updated_at = NOW()
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(translation_id)
        .bind(&language_code)
        .bind(text)
        .bind(status.to_string())
        .bind(needs_review)
        .bind(auto_translated)
        .bind(editor)
        .bind(verified_by)
        .bind(verified_at)
        .fetch_one(&mut *tx)
        .await?;

        bump_parent_version(&mut tx, translation_id, editor).await?;
        refresh_language_progress(&mut tx, &language_code).await?;

        tx.commit().await?;
        timer.record();
        Ok(EntryWriteOutcome::Saved(entry_entity_to_domain(entry)))
    }

    /// Mark an existing entry verified; bumps the parent version. Returns
    /// `None` when the entry does not exist.
    pub async fn verify_entry(
        &self,
        key: &str,
        language_code: &str,
        verifier: Option<&str>,
    ) -> Result<Option<TranslationEntry>, sqlx::Error> {
        let timer = QueryTimer::new("verify_translation_entry");
        let language_code = language_code.to_uppercase();

        let mut tx = self.pool.begin().await?;

        let entry = sqlx::query_as::<_, TranslationEntryEntity>(
            r#"
            UPDATE translation_entries e
            SET status = 'verified',
                needs_review = false,
                verified_by = $3,
                verified_at = NOW(),
                updated_at = NOW()
            FROM translations t
            WHERE e.translation_id = t.id
              AND t.key = $1
              AND e.language_code = $2
            RETURNING e.id, e.translation_id, e.language_code, e.text, e.status,
                      e.needs_review, e.auto_translated, e.translated_by, e.translated_at,
                      e.verified_by, e.verified_at, e.created_at, e.updated_at
            "#,
        )
        .bind(key)
        .bind(&language_code)
        .bind(verifier)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(entry) = entry else {
            timer.record();
            return Ok(None);
        };

        bump_parent_version(&mut tx, entry.translation_id, verifier).await?;

        tx.commit().await?;
        timer.record();
        Ok(Some(entry_entity_to_domain(entry)))
    }

    /// Apply one import item. Existing entries are skipped unless
    /// `overwrite` is set; the parent version bumps only when something is
    /// written.
    #[allow(clippy::too_many_arguments)]
    pub async fn import_entry(
        &self,
        key: &str,
        language_code: &str,
        text: &str,
        overwrite: bool,
        verified: bool,
        editor: Option<&str>,
    ) -> Result<ImportOutcome, sqlx::Error> {
        let timer = QueryTimer::new("import_translation_entry");
        let language_code = language_code.to_uppercase();

        let mut tx = self.pool.begin().await?;

        let translation_id: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM translations WHERE key = $1")
                .bind(key)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(translation_id) = translation_id else {
            timer.record();
            return Ok(ImportOutcome::UnknownKey);
        };

        let exists: Option<Uuid> = sqlx::query_scalar(
            "SELECT id FROM translation_entries WHERE translation_id = $1 AND language_code = $2",
        )
        .bind(translation_id)
        .bind(&language_code)
        .fetch_optional(&mut *tx)
        .await?;

        if exists.is_some() && !overwrite {
            timer.record();
            return Ok(ImportOutcome::Skipped);
        }

        let status = if verified {
            EntryStatus::Verified
        } else {
            EntryStatus::Translated
        };
        let verified_by = if verified { editor } else { None };
        let verified_at = verified.then(Utc::now);

        sqlx::query(
            r#"
            INSERT INTO translation_entries (translation_id, language_code, text, status,
                                             needs_review, auto_translated, translated_by,
                                             translated_at, verified_by, verified_at)
            VALUES ($1, $2, $3, $4, false, false, $5, NOW(), $6, $7)
            ON CONFLICT (translation_id, language_code)
            DO UPDATE SET
                text = $3,
                status = $4,
                needs_review = false,
                translated_by = $5,
                translated_at = NOW(),
                verified_by = $6,
                verified_at = $7,
                updated_at = NOW()
            "#,
        )
        .bind(translation_id)
        .bind(&language_code)
        .bind(text)
        .bind(status.to_string())
        .bind(editor)
        .bind(verified_by)
        .bind(verified_at)
        .execute(&mut *tx)
        .await?;

        bump_parent_version(&mut tx, translation_id, editor).await?;

        tx.commit().await?;
        timer.record();
        Ok(if exists.is_some() {
            ImportOutcome::Updated
        } else {
            ImportOutcome::Created
        })
    }

    /// Resolved `key -> text` rows for a language pack: the entry's text when
    /// present and non-empty, else the default text. Covers every active key.
    pub async fn pack_rows(
        &self,
        language_code: &str,
        category: Option<&str>,
    ) -> Result<Vec<PackRowEntity>, sqlx::Error> {
        let timer = QueryTimer::new("translation_pack_rows");
        let result = sqlx::query_as::<_, PackRowEntity>(
            r#"
            SELECT t.key, COALESCE(NULLIF(e.text, ''), t.default_text) AS text
            FROM translations t
            LEFT JOIN translation_entries e
                   ON e.translation_id = t.id AND e.language_code = $1
            WHERE t.status = 'active'
              AND ($2::text IS NULL OR t.category = $2)
            ORDER BY t.key
            "#,
        )
        .bind(language_code.to_uppercase())
        .bind(category)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Export rows for one language; missing entries come back as empty
    /// strings, not defaults.
    pub async fn export_rows(
        &self,
        language_code: &str,
        category: Option<&str>,
    ) -> Result<Vec<ExportRowEntity>, sqlx::Error> {
        let timer = QueryTimer::new("translation_export_rows");
        let result = sqlx::query_as::<_, ExportRowEntity>(
            r#"
            SELECT t.key, t.category, t.default_text,
                   COALESCE(e.text, '') AS translation,
                   t.description, t.context
            FROM translations t
            LEFT JOIN translation_entries e
                   ON e.translation_id = t.id AND e.language_code = $1
            WHERE t.status = 'active'
              AND ($2::text IS NULL OR t.category = $2)
            ORDER BY t.category, t.key
            "#,
        )
        .bind(language_code.to_uppercase())
        .bind(category)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// All active translations with every entry, for multi-language export.
    pub async fn list_active_with_entries(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<Translation>, sqlx::Error> {
        let timer = QueryTimer::new("list_active_translations_with_entries");
        let parents = sqlx::query_as::<_, TranslationEntity>(&format!(
            r#"
            SELECT {TRANSLATION_COLUMNS}
            FROM translations
            WHERE status = 'active'
              AND ($1::text IS NULL OR category = $1)
            ORDER BY category, key
            "#
        ))
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<Uuid> = parents.iter().map(|p| p.id).collect();
        let entries = sqlx::query_as::<_, TranslationEntryEntity>(&format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM translation_entries
            WHERE translation_id = ANY($1)
            ORDER BY language_code
            "#
        ))
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;
        timer.record();

        let mut by_parent: HashMap<Uuid, Vec<TranslationEntry>> = HashMap::new();
        for entry in entries {
            by_parent
                .entry(entry.translation_id)
                .or_default()
                .push(entry_entity_to_domain(entry));
        }

        Ok(parents
            .into_iter()
            .map(|p| {
                let entries = by_parent.remove(&p.id).unwrap_or_default();
                entity_to_domain(p, entries)
            })
            .collect())
    }

    /// Total active key count plus per-category counts, largest first.
    pub async fn stats_totals(&self) -> Result<(i64, Vec<CategoryCount>), sqlx::Error> {
        let timer = QueryTimer::new("translation_stats_totals");
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM translations WHERE status = 'active'")
                .fetch_one(&self.pool)
                .await?;

        let by_category = sqlx::query_as::<_, crate::entities::CategoryCountEntity>(
            r#"
            SELECT category, COUNT(*) AS count
            FROM translations
            WHERE status = 'active'
            GROUP BY category
            ORDER BY count DESC, category ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        timer.record();

        Ok((
            total,
            by_category
                .into_iter()
                .map(|r| CategoryCount {
                    category: r.category,
                    count: r.count,
                })
                .collect(),
        ))
    }

    /// Coverage counters for one language over active keys.
    pub async fn language_stats(&self, language_code: &str) -> Result<LanguageStats, sqlx::Error> {
        let timer = QueryTimer::new("translation_language_stats");
        let row = sqlx::query_as::<_, LanguageStatsEntity>(
            r#"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE e.text IS NOT NULL AND e.text <> '') AS translated,
                   COUNT(*) FILTER (WHERE e.status = 'verified') AS verified,
                   COUNT(*) FILTER (WHERE e.needs_review) AS needs_review
            FROM translations t
            LEFT JOIN translation_entries e
                   ON e.translation_id = t.id AND e.language_code = $1
            WHERE t.status = 'active'
            "#,
        )
        .bind(language_code.to_uppercase())
        .fetch_one(&self.pool)
        .await?;
        timer.record();

        let percentage = if row.total > 0 {
            ((row.translated as f64 / row.total as f64) * 100.0).round() as i32
        } else {
            0
        };
        Ok(LanguageStats {
            total: row.total,
            translated: row.translated,
            missing: row.total - row.translated,
            verified: row.verified,
            needs_review: row.needs_review,
            percentage,
        })
    }
}

async fn bump_parent_version(
    tx: &mut Transaction<'_, Postgres>,
    translation_id: Uuid,
    updated_by: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE translations
        SET version = version + 1,
            updated_by = COALESCE($2, updated_by),
            updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(translation_id)
    .bind(updated_by)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

async fn refresh_language_progress(
    tx: &mut Transaction<'_, Postgres>,
    language_code: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
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
        "#,
    )
    .bind(language_code)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Convert entity to domain model.
fn entity_to_domain(entity: TranslationEntity, entries: Vec<TranslationEntry>) -> Translation {
    Translation {
        id: entity.id,
        key: entity.key,
        category: entity.category,
        default_text: entity.default_text,
        description: entity.description,
        context: entity.context,
        version: entity.version,
        status: entity.status.parse().unwrap_or(TranslationStatus::Active),
        entries,
        created_by: entity.created_by,
        updated_by: entity.updated_by,
        created_at: entity.created_at,
        updated_at: entity.updated_at,
    }
}

/// Convert entry entity to domain model.
fn entry_entity_to_domain(entity: TranslationEntryEntity) -> TranslationEntry {
    TranslationEntry {
        language_code: entity.language_code,
        text: entity.text,
        status: entity.status.parse().unwrap_or(EntryStatus::Draft),
        needs_review: entity.needs_review,
        auto_translated: entity.auto_translated,
        translated_by: entity.translated_by,
        translated_at: entity.translated_at,
        verified_by: entity.verified_by,
        verified_at: entity.verified_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry_entity(status: &str) -> TranslationEntryEntity {
        TranslationEntryEntity {
            id: Uuid::new_v4(),
            translation_id: Uuid::new_v4(),
            language_code: "DE".to_string(),
            text: "Speichern".to_string(),
            status: status.to_string(),
            needs_review: false,
            auto_translated: false,
            translated_by: Some("admin@example.com".to_string()),
            translated_at: Some(Utc::now()),
            verified_by: None,
            verified_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_entry_entity_to_domain_conversion() {
        let entry = entry_entity_to_domain(sample_entry_entity("verified"));
        assert_eq!(entry.status, EntryStatus::Verified);
        assert_eq!(entry.language_code, "DE");
    }

    #[test]
    fn test_entry_entity_unknown_status_falls_back() {
        let entry = entry_entity_to_domain(sample_entry_entity("bogus"));
        assert_eq!(entry.status, EntryStatus::Draft);
    }

    #[test]
    fn test_entity_to_domain_carries_entries() {
        let parent = TranslationEntity {
            id: Uuid::new_v4(),
            key: "common.save".to_string(),
            category: "common".to_string(),
            default_text: "Save".to_string(),
            description: None,
            context: None,
            version: 2,
            status: "active".to_string(),
            created_by: None,
            updated_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let entries = vec![entry_entity_to_domain(sample_entry_entity("translated"))];

        let translation = entity_to_domain(parent, entries);
        assert_eq!(translation.status, TranslationStatus::Active);
        assert_eq!(translation.entries.len(), 1);
        assert_eq!(translation.text_for("DE"), "Speichern");
    }
}
