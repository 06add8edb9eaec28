//! Language entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the languages table.
///
/// Progress counters are stored flat; the domain model nests them under
/// `translation_progress`.
#[derive(Debug, Clone, FromRow)]
pub struct LanguageEntity {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub native_name: Option<String>,
    pub direction: String,
    pub enabled: bool,
    pub is_default: bool,
    pub version: i32,
    pub status: String,
    pub progress_total: i32,
    pub progress_translated: i32,
    pub progress_percentage: i32,
    pub last_published_at: Option<DateTime<Utc>>,
    pub published_by: Option<String>,
    pub priority: i32,
    pub region: Option<String>,
    pub locale: Option<String>,
    pub date_format: Option<String>,
    pub time_format: Option<String>,
    pub number_format: Option<String>,
    pub currency: Option<String>,
    pub flag: Option<String>,
    pub last_modified_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
