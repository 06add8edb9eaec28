//! Language registry domain models.
//!
//! A language carries its own publish version, which doubles as the cache
//! token for the flattened language pack served to clients. Ordinary edits
//! never bump the version; only an explicit publish does.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Publish lifecycle of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageStatus {
    Draft,
    Published,
    Archived,
}

impl LanguageStatus {
    /// Archived is terminal; draft and published languages may (re-)publish.
    pub fn can_publish(&self) -> bool {
        !matches!(self, LanguageStatus::Archived)
    }
}

impl FromStr for LanguageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(LanguageStatus::Draft),
            "published" => Ok(LanguageStatus::Published),
            "archived" => Ok(LanguageStatus::Archived),
            _ => Err(format!("Unknown language status: {}", s)),
        }
    }
}

impl std::fmt::Display for LanguageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LanguageStatus::Draft => "draft",
            LanguageStatus::Published => "published",
            LanguageStatus::Archived => "archived",
        };
        write!(f, "{}", s)
    }
}

/// Text direction for rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl FromStr for TextDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ltr" => Ok(TextDirection::Ltr),
            "rtl" => Ok(TextDirection::Rtl),
            _ => Err(format!("Unknown text direction: {}", s)),
        }
    }
}

impl std::fmt::Display for TextDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        };
        write!(f, "{}", s)
    }
}

/// Translation coverage counters for a language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationProgress {
    pub total: i32,
    pub translated: i32,
    pub percentage: i32,
}

impl TranslationProgress {
    /// Derives progress from raw counts. Percentage rounds to the nearest
    /// whole number and is 0 when there are no keys at all.
    pub fn compute(total: i64, translated: i64) -> Self {
        let percentage = if total > 0 {
            ((translated as f64 / total as f64) * 100.0).round() as i32
        } else {
            0
        };
        Self {
            total: total as i32,
            translated: translated as i32,
            percentage,
        }
    }
}

/// A registered language with publish state and formatting metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub id: Uuid,
    /// ISO-style code, stored uppercase (e.g. `EN`, `PT-BR`).
    pub code: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_name: Option<String>,
    pub direction: TextDirection,
    pub enabled: bool,
    pub is_default: bool,
    pub version: i32,
    pub status: LanguageStatus,
    pub translation_progress: TranslationProgress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_by: Option<String>,
    /// Sort weight; higher sorts first in listings.
    pub priority: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Request DTOs
// ============================================================================

/// Request payload for `POST /languages`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLanguageRequest {
    #[validate(custom(function = "shared::validation::validate_language_code"))]
    pub code: String,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 100, message = "Native name must be at most 100 characters"))]
    pub native_name: Option<String>,

    pub direction: Option<TextDirection>,

    pub enabled: Option<bool>,

    pub is_default: Option<bool>,

    #[validate(custom(function = "crate::models::language::validate_optional_priority"))]
    pub priority: Option<i32>,

    #[validate(length(max = 100, message = "Region must be at most 100 characters"))]
    pub region: Option<String>,

    #[validate(custom(function = "crate::models::language::validate_optional_locale"))]
    pub locale: Option<String>,

    #[validate(length(max = 50, message = "Date format must be at most 50 characters"))]
    pub date_format: Option<String>,

    #[validate(length(max = 50, message = "Time format must be at most 50 characters"))]
    pub time_format: Option<String>,

    #[validate(length(max = 50, message = "Number format must be at most 50 characters"))]
    pub number_format: Option<String>,

    #[validate(length(max = 10, message = "Currency must be at most 10 characters"))]
    pub currency: Option<String>,

    #[validate(length(max = 20, message = "Flag must be at most 20 characters"))]
    pub flag: Option<String>,
}

/// Request payload for `PUT /languages/:code`.
///
/// Status may only move to `archived` here; publishing goes through the
/// dedicated publish endpoint.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLanguageRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 100, message = "Native name must be at most 100 characters"))]
    pub native_name: Option<String>,

    pub direction: Option<TextDirection>,

    pub enabled: Option<bool>,

    pub is_default: Option<bool>,

    pub status: Option<LanguageStatus>,

    #[validate(custom(function = "crate::models::language::validate_optional_priority"))]
    pub priority: Option<i32>,

    #[validate(length(max = 100, message = "Region must be at most 100 characters"))]
    pub region: Option<String>,

    #[validate(custom(function = "crate::models::language::validate_optional_locale"))]
    pub locale: Option<String>,

    #[validate(length(max = 50, message = "Date format must be at most 50 characters"))]
    pub date_format: Option<String>,

    #[validate(length(max = 50, message = "Time format must be at most 50 characters"))]
    pub time_format: Option<String>,

    #[validate(length(max = 50, message = "Number format must be at most 50 characters"))]
    pub number_format: Option<String>,

    #[validate(length(max = 10, message = "Currency must be at most 10 characters"))]
    pub currency: Option<String>,

    #[validate(length(max = 20, message = "Flag must be at most 20 characters"))]
    pub flag: Option<String>,
}

impl UpdateLanguageRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.native_name.is_none()
            && self.direction.is_none()
            && self.enabled.is_none()
            && self.is_default.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.region.is_none()
            && self.locale.is_none()
            && self.date_format.is_none()
            && self.time_format.is_none()
            && self.number_format.is_none()
            && self.currency.is_none()
            && self.flag.is_none()
    }
}

/// Validates optional priority.
pub fn validate_optional_priority(priority: i32) -> Result<(), validator::ValidationError> {
    shared::validation::validate_priority(priority)
}

/// Validates optional locale.
pub fn validate_optional_locale(locale: &str) -> Result<(), validator::ValidationError> {
    shared::validation::validate_locale(locale)
}

/// Query parameters for listing languages.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLanguagesQuery {
    pub enabled: Option<bool>,
    pub status: Option<LanguageStatus>,
    /// Recompute progress on the fly instead of returning stored counters.
    pub with_progress: Option<bool>,
}

/// Query parameters for the language pack endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguagePackQuery {
    /// Client-held pack version; matching the current version yields 304.
    pub version: Option<i32>,
    pub category: Option<String>,
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Response payload for a successful publish.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguagePublished {
    pub code: String,
    pub version: i32,
    pub published_at: DateTime<Utc>,
}

/// Flattened `key -> text` pack for one language.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguagePack {
    pub language: PackLanguage,
    pub translations: BTreeMap<String, String>,
    pub meta: PackMeta,
}

/// Language header of a pack.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackLanguage {
    pub code: String,
    pub name: String,
    pub direction: TextDirection,
    pub version: i32,
}

/// Pack generation metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackMeta {
    pub total_keys: usize,
    pub generated_at: DateTime<Utc>,
}
