//! Translation entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the translations table.
#[derive(Debug, Clone, FromRow)]
pub struct TranslationEntity {
    pub id: Uuid,
    pub key: String,
    pub category: String,
    pub default_text: String,
    pub description: Option<String>,
    pub context: Option<String>,
    pub version: i32,
    pub status: String,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database row mapping for the translation_entries table.
#[derive(Debug, Clone, FromRow)]
pub struct TranslationEntryEntity {
    pub id: Uuid,
    pub translation_id: Uuid,
    pub language_code: String,
    pub text: String,
    pub status: String,
    pub needs_review: bool,
    pub auto_translated: bool,
    pub translated_by: Option<String>,
    pub translated_at: Option<DateTime<Utc>>,
    pub verified_by: Option<String>,
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One resolved `key -> text` pack row.
#[derive(Debug, Clone, FromRow)]
pub struct PackRowEntity {
    pub key: String,
    pub text: String,
}

/// One resolved export row for a single language.
#[derive(Debug, Clone, FromRow)]
pub struct ExportRowEntity {
    pub key: String,
    pub category: String,
    pub default_text: String,
    pub translation: String,
    pub description: Option<String>,
    pub context: Option<String>,
}

/// Aggregate entry counters for one language.
#[derive(Debug, Clone, FromRow)]
pub struct LanguageStatsEntity {
    pub total: i64,
    pub translated: i64,
    pub verified: i64,
    pub needs_review: i64,
}
