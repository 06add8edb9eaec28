//! Domain models for the platform-config backend.

pub mod audit_log;
pub mod language;
pub mod setting;
pub mod translation;

pub use audit_log::{
    AuditAction, AuditEntityType, AuditLog, AuditSeverity, CreateAuditLogInput,
    ListAuditLogsQuery,
};
pub use language::{
    CreateLanguageRequest, Language, LanguagePack, LanguagePackQuery, LanguagePublished,
    LanguageStatus, ListLanguagesQuery, PackLanguage, PackMeta, TextDirection,
    TranslationProgress, UpdateLanguageRequest,
};
pub use setting::{
    BulkItemError, BulkUpdateOutcome, BulkUpdateSettingsRequest, CategorySummary,
    ListSettingsQuery, Setting, SettingCategory, SettingResponse, SettingValueType,
    SettingsVersion, SettingsVersionQuery, UpsertSettingRequest,
};
pub use translation::{
    CategoryCount, CreateTranslationRequest, EntryStatus, ExportAllRow, ExportFormat,
    ExportQuery, ExportRow, ImportItemError, ImportReport, ImportTranslationsRequest,
    LanguageStats, ListTranslationsQuery, SetEntryOutcome, SetEntryRequest, Translation,
    TranslationEntry, TranslationStatsQuery, TranslationStatsResponse, TranslationStatus,
    UpdateTranslationRequest,
};

use serde::{Deserialize, Serialize};

/// Page-based pagination info for list responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl Pagination {
    /// Builds pagination info, computing the page count from the total.
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };
        Self {
            page,
            limit,
            total,
            pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_rounds_up() {
        let p = Pagination::new(1, 50, 101);
        assert_eq!(p.pages, 3);
    }

    #[test]
    fn test_pagination_exact_fit() {
        let p = Pagination::new(2, 50, 100);
        assert_eq!(p.pages, 2);
    }

    #[test]
    fn test_pagination_empty() {
        let p = Pagination::new(1, 50, 0);
        assert_eq!(p.pages, 0);
    }

    #[test]
    fn test_pagination_zero_limit() {
        let p = Pagination::new(1, 0, 10);
        assert_eq!(p.pages, 0);
    }
}
