//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod audit_log;
pub mod language;
pub mod setting;
pub mod translation;

pub use audit_log::AuditLogEntity;
pub use language::LanguageEntity;
pub use setting::{CategoryCountEntity, SettingEntity, SettingUpsertEntity, SettingVersionEntity};
pub use translation::{
    ExportRowEntity, LanguageStatsEntity, PackRowEntity, TranslationEntity, TranslationEntryEntity,
};
