//! Repository implementations for database operations.

pub mod audit_log;
pub mod language;
pub mod setting;
pub mod translation;

pub use audit_log::AuditLogRepository;
pub use language::LanguageRepository;
pub use setting::SettingRepository;
pub use translation::{EntryWriteOutcome, ImportOutcome, TranslationRepository};
