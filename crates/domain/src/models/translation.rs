//! Translation domain models.
//!
//! A translation is a keyed default text plus one entry per language. The
//! entry row carries both the translated text and its review status, so the
//! two cannot drift apart. Any write to a translation or one of its entries
//! bumps the parent `version`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Lifecycle of a translation key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationStatus {
    #[default]
    Active,
    Archived,
}

impl FromStr for TranslationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(TranslationStatus::Active),
            "archived" => Ok(TranslationStatus::Archived),
            _ => Err(format!("Unknown translation status: {}", s)),
        }
    }
}

impl std::fmt::Display for TranslationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TranslationStatus::Active => "active",
            TranslationStatus::Archived => "archived",
        };
        write!(f, "{}", s)
    }
}

/// Review status of a per-language entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Draft,
    Translated,
    Verified,
    Auto,
}

impl FromStr for EntryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(EntryStatus::Draft),
            "translated" => Ok(EntryStatus::Translated),
            "verified" => Ok(EntryStatus::Verified),
            "auto" => Ok(EntryStatus::Auto),
            _ => Err(format!("Unknown entry status: {}", s)),
        }
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EntryStatus::Draft => "draft",
            EntryStatus::Translated => "translated",
            EntryStatus::Verified => "verified",
            EntryStatus::Auto => "auto",
        };
        write!(f, "{}", s)
    }
}

/// Export serialization format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(format!("Unknown export format: {}", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        };
        write!(f, "{}", s)
    }
}

/// One language's text and review state for a translation key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationEntry {
    pub language_code: String,
    pub text: String,
    pub status: EntryStatus,
    pub needs_review: bool,
    pub auto_translated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
}

/// A translation key with its default text and per-language entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub id: Uuid,
    pub key: String,
    pub category: String,
    pub default_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub version: i32,
    pub status: TranslationStatus,
    pub entries: Vec<TranslationEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Translation {
    /// Resolved text for a language: the entry's text when present and
    /// non-empty, else the default text.
    pub fn text_for(&self, language_code: &str) -> &str {
        self.entries
            .iter()
            .find(|e| e.language_code.eq_ignore_ascii_case(language_code))
            .filter(|e| !e.text.is_empty())
            .map(|e| e.text.as_str())
            .unwrap_or(&self.default_text)
    }
}

/// Default category for keys created without one.
pub const DEFAULT_CATEGORY: &str = "common";

// ============================================================================
// Request DTOs
// ============================================================================

/// Request payload for `POST /translations`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTranslationRequest {
    #[validate(custom(function = "shared::validation::validate_translation_key"))]
    pub key: String,

    #[validate(length(min = 1, max = 100, message = "Category must be 1-100 characters"))]
    pub category: Option<String>,

    #[validate(length(min = 1, max = 10000, message = "Default text must be 1-10000 characters"))]
    pub default_text: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 500, message = "Context must be at most 500 characters"))]
    pub context: Option<String>,
}

/// Request payload for `PUT /translations/:key`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTranslationRequest {
    #[validate(length(min = 1, max = 100, message = "Category must be 1-100 characters"))]
    pub category: Option<String>,

    #[validate(length(min = 1, max = 10000, message = "Default text must be 1-10000 characters"))]
    pub default_text: Option<String>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 500, message = "Context must be at most 500 characters"))]
    pub context: Option<String>,

    pub status: Option<TranslationStatus>,
}

impl UpdateTranslationRequest {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.default_text.is_none()
            && self.description.is_none()
            && self.context.is_none()
            && self.status.is_none()
    }
}

/// Request payload for `PUT /translations/:key/languages/:languageCode`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetEntryRequest {
    #[validate(length(max = 10000, message = "Text must be at most 10000 characters"))]
    pub text: String,

    pub verified: Option<bool>,

    pub needs_review: Option<bool>,

    pub auto_translated: Option<bool>,
}

impl SetEntryRequest {
    /// Status stamped on the entry: auto-translated wins, then verified,
    /// otherwise plain translated.
    pub fn resolved_status(&self) -> EntryStatus {
        if self.auto_translated.unwrap_or(false) {
            EntryStatus::Auto
        } else if self.verified.unwrap_or(false) {
            EntryStatus::Verified
        } else {
            EntryStatus::Translated
        }
    }
}

/// Query parameters for the translations listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTranslationsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    /// Substring match over key and default text.
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<TranslationStatus>,
    /// Restrict the embedded entries to one language.
    pub language_code: Option<String>,
}

/// One item of a translations import.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImportItem {
    #[validate(custom(function = "shared::validation::validate_translation_key"))]
    pub key: String,

    #[validate(length(max = 10000, message = "Text must be at most 10000 characters"))]
    pub text: String,
}

/// Request payload for `POST /translations/import`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImportTranslationsRequest {
    #[validate(length(min = 1, max = 1000, message = "Translations must contain 1-1000 items"))]
    #[validate(nested)]
    pub translations: Vec<ImportItem>,

    #[validate(custom(function = "shared::validation::validate_language_code"))]
    pub language_code: String,

    /// Replace entries that already exist; default is to skip them.
    #[serde(default)]
    pub overwrite: bool,

    /// Mark imported entries as verified.
    #[serde(default)]
    pub verified: bool,
}

/// Query parameters for the export endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuery {
    pub language_code: Option<String>,
    pub category: Option<String>,
    pub format: Option<ExportFormat>,
}

/// Query parameters for the stats endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationStatsQuery {
    pub language_code: Option<String>,
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Response payload after writing a per-language entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetEntryOutcome {
    pub key: String,
    pub language_code: String,
    pub entry: TranslationEntry,
}

/// Per-item results of an import. Items fail independently.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub created: u32,
    pub updated: u32,
    pub skipped: u32,
    pub errors: Vec<ImportItemError>,
}

/// A failed item of an import.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportItemError {
    pub key: String,
    pub error: String,
}

/// One exported row for a single-language export.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub key: String,
    pub category: String,
    pub default_text: String,
    /// Entry text for the requested language, empty when missing.
    pub translation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// One exported row covering all languages.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportAllRow {
    pub key: String,
    pub category: String,
    pub default_text: String,
    pub translations: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Coverage counters for one language.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageStats {
    pub total: i64,
    pub translated: i64,
    pub missing: i64,
    pub verified: i64,
    pub needs_review: i64,
    pub percentage: i32,
}

/// Key count for one category.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

/// Response payload for the stats endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationStatsResponse {
    pub total: i64,
    pub by_category: Vec<CategoryCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_stats: Option<LanguageStats>,
}
