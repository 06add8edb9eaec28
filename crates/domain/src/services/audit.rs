//! Audit entry construction for route handlers.
//!
//! Handlers describe what happened through these helpers and hand the result
//! to the audit repository, which inserts it asynchronously so requests are
//! never blocked on audit writes.

use serde_json::{json, Value as JsonValue};
use uuid::Uuid;

use crate::models::{
    AuditAction, AuditEntityType, AuditSeverity, CreateAuditLogInput, ImportReport, Language,
    Setting, Translation, TranslationEntry,
};

/// Snapshot of a setting for audit storage. Encrypted values are masked so
/// secrets never land in the audit table.
fn setting_snapshot(setting: &Setting) -> JsonValue {
    let value = match setting.masked_value() {
        Some(masked) => json!(masked),
        None => setting.value.clone(),
    };
    json!({
        "key": setting.key,
        "category": setting.category,
        "value": value,
        "type": setting.value_type,
        "isPublic": setting.is_public,
        "encrypted": setting.encrypted,
        "version": setting.version,
    })
}

/// Audit entry for a setting upsert. Creation is `medium`, a routine update
/// `low`; either escalates to `high` when the record holds a secret.
pub fn setting_saved(
    user_id: Option<Uuid>,
    user_name: Option<&str>,
    setting: &Setting,
    created: bool,
    old_value: Option<JsonValue>,
) -> CreateAuditLogInput {
    let action = if created {
        AuditAction::Create
    } else {
        AuditAction::Update
    };
    let severity = if setting.encrypted {
        AuditSeverity::High
    } else if created {
        AuditSeverity::Medium
    } else {
        AuditSeverity::Low
    };
    let verb = if created { "Created" } else { "Updated" };

    let mut input = CreateAuditLogInput::new(AuditEntityType::Setting, action)
        .with_entity_id(&setting.key)
        .with_user(user_id, user_name.map(String::from))
        .with_description(format!("{} setting: {}", verb, setting.key))
        .with_new_value(setting_snapshot(setting))
        .with_severity(severity);
    if let Some(old) = old_value {
        input = input.with_old_value(old);
    }
    input
}

/// Audit entry for a setting soft delete.
pub fn setting_deleted(
    user_id: Option<Uuid>,
    user_name: Option<&str>,
    setting: &Setting,
) -> CreateAuditLogInput {
    CreateAuditLogInput::new(AuditEntityType::Setting, AuditAction::Delete)
        .with_entity_id(&setting.key)
        .with_user(user_id, user_name.map(String::from))
        .with_description(format!("Deleted setting: {}", setting.key))
        .with_old_value(setting_snapshot(setting))
        .with_severity(AuditSeverity::High)
}

/// Audit entry for a language creation.
pub fn language_created(
    user_id: Option<Uuid>,
    user_name: Option<&str>,
    language: &Language,
) -> CreateAuditLogInput {
    CreateAuditLogInput::new(AuditEntityType::Language, AuditAction::Create)
        .with_entity_id(&language.code)
        .with_user(user_id, user_name.map(String::from))
        .with_description(format!("Created language: {} ({})", language.name, language.code))
        .with_new_value(serde_json::to_value(language).unwrap_or_default())
        .with_severity(AuditSeverity::Medium)
}

/// Audit entry for a language field update, with before/after snapshots.
pub fn language_updated(
    user_id: Option<Uuid>,
    user_name: Option<&str>,
    old: &Language,
    new: &Language,
) -> CreateAuditLogInput {
    CreateAuditLogInput::new(AuditEntityType::Language, AuditAction::Update)
        .with_entity_id(&new.code)
        .with_user(user_id, user_name.map(String::from))
        .with_description(format!("Updated language: {}", new.code))
        .with_old_value(serde_json::to_value(old).unwrap_or_default())
        .with_new_value(serde_json::to_value(new).unwrap_or_default())
        .with_severity(AuditSeverity::Low)
}

/// Audit entry for a language publish.
pub fn language_published(
    user_id: Option<Uuid>,
    user_name: Option<&str>,
    code: &str,
    version: i32,
) -> CreateAuditLogInput {
    CreateAuditLogInput::new(AuditEntityType::Language, AuditAction::Publish)
        .with_entity_id(code)
        .with_user(user_id, user_name.map(String::from))
        .with_description(format!("Published language pack: {} (v{})", code, version))
        .with_new_value(json!({ "code": code, "version": version }))
        .with_severity(AuditSeverity::Medium)
}

/// Audit entry for a language hard delete.
pub fn language_deleted(
    user_id: Option<Uuid>,
    user_name: Option<&str>,
    language: &Language,
) -> CreateAuditLogInput {
    CreateAuditLogInput::new(AuditEntityType::Language, AuditAction::Delete)
        .with_entity_id(&language.code)
        .with_user(user_id, user_name.map(String::from))
        .with_description(format!("Deleted language: {} ({})", language.name, language.code))
        .with_old_value(serde_json::to_value(language).unwrap_or_default())
        .with_severity(AuditSeverity::High)
}

/// Audit entry for a translation key creation.
pub fn translation_created(
    user_id: Option<Uuid>,
    user_name: Option<&str>,
    translation: &Translation,
) -> CreateAuditLogInput {
    CreateAuditLogInput::new(AuditEntityType::Translation, AuditAction::Create)
        .with_entity_id(&translation.key)
        .with_user(user_id, user_name.map(String::from))
        .with_description(format!("Created translation: {}", translation.key))
        .with_new_value(serde_json::to_value(translation).unwrap_or_default())
        .with_severity(AuditSeverity::Low)
}

/// Audit entry for a translation metadata update.
pub fn translation_updated(
    user_id: Option<Uuid>,
    user_name: Option<&str>,
    old: &Translation,
    new: &Translation,
) -> CreateAuditLogInput {
    CreateAuditLogInput::new(AuditEntityType::Translation, AuditAction::Update)
        .with_entity_id(&new.key)
        .with_user(user_id, user_name.map(String::from))
        .with_description(format!("Updated translation: {}", new.key))
        .with_old_value(serde_json::to_value(old).unwrap_or_default())
        .with_new_value(serde_json::to_value(new).unwrap_or_default())
        .with_severity(AuditSeverity::Low)
}

/// Audit entry for a translation hard delete.
pub fn translation_deleted(
    user_id: Option<Uuid>,
    user_name: Option<&str>,
    translation: &Translation,
) -> CreateAuditLogInput {
    CreateAuditLogInput::new(AuditEntityType::Translation, AuditAction::Delete)
        .with_entity_id(&translation.key)
        .with_user(user_id, user_name.map(String::from))
        .with_description(format!("Deleted translation: {}", translation.key))
        .with_old_value(serde_json::to_value(translation).unwrap_or_default())
        .with_severity(AuditSeverity::High)
}

/// Audit entry for a per-language entry write.
pub fn entry_set(
    user_id: Option<Uuid>,
    user_name: Option<&str>,
    key: &str,
    language_code: &str,
    entry: &TranslationEntry,
) -> CreateAuditLogInput {
    CreateAuditLogInput::new(AuditEntityType::Translation, AuditAction::Update)
        .with_entity_id(key)
        .with_user(user_id, user_name.map(String::from))
        .with_description(format!("Set {} translation for: {}", language_code, key))
        .with_new_value(serde_json::to_value(entry).unwrap_or_default())
        .with_severity(AuditSeverity::Low)
}

/// Audit entry for an entry verification.
pub fn entry_verified(
    user_id: Option<Uuid>,
    user_name: Option<&str>,
    key: &str,
    language_code: &str,
    entry: &TranslationEntry,
) -> CreateAuditLogInput {
    CreateAuditLogInput::new(AuditEntityType::Translation, AuditAction::Update)
        .with_entity_id(key)
        .with_user(user_id, user_name.map(String::from))
        .with_description(format!("Verified {} translation for: {}", language_code, key))
        .with_new_value(serde_json::to_value(entry).unwrap_or_default())
        .with_severity(AuditSeverity::Low)
}

/// Audit entry for a batch import, carrying the per-item outcome counts.
pub fn translations_imported(
    user_id: Option<Uuid>,
    user_name: Option<&str>,
    language_code: &str,
    report: &ImportReport,
) -> CreateAuditLogInput {
    CreateAuditLogInput::new(AuditEntityType::Translation, AuditAction::Import)
        .with_entity_id(language_code)
        .with_user(user_id, user_name.map(String::from))
        .with_description(format!(
            "Imported translations for {}: {} created, {} updated, {} skipped, {} errors",
            language_code,
            report.created,
            report.updated,
            report.skipped,
            report.errors.len()
        ))
        .with_new_value(serde_json::to_value(report).unwrap_or_default())
        .with_severity(AuditSeverity::Medium)
}

/// Audit entry for an export.
pub fn translations_exported(
    user_id: Option<Uuid>,
    user_name: Option<&str>,
    language_code: Option<&str>,
    format: &str,
    count: usize,
) -> CreateAuditLogInput {
    let scope = language_code.unwrap_or("all");
    CreateAuditLogInput::new(AuditEntityType::Translation, AuditAction::Export)
        .with_entity_id(scope)
        .with_user(user_id, user_name.map(String::from))
        .with_description(format!(
            "Exported {} translations ({}, {})",
            count, scope, format
        ))
        .with_new_value(json!({ "languageCode": scope, "format": format, "count": count }))
        .with_severity(AuditSeverity::Low)
}
