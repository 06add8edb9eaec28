//! Setting entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the settings table.
#[derive(Debug, Clone, FromRow)]
pub struct SettingEntity {
    pub id: Uuid,
    pub key: String,
    pub category: String,
    pub value: serde_json::Value,
    pub value_type: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub encrypted: bool,
    pub active: bool,
    pub version: i32,
    pub last_modified_by: Option<String>,
    pub last_modified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Upsert result row: the stored setting plus whether the statement inserted
/// a fresh row (`xmax = 0`) rather than updating an existing one.
#[derive(Debug, Clone, FromRow)]
pub struct SettingUpsertEntity {
    #[sqlx(flatten)]
    pub setting: SettingEntity,
    pub created: bool,
}

/// `(key, version)` pair feeding the aggregate version hash.
#[derive(Debug, Clone, FromRow)]
pub struct SettingVersionEntity {
    pub key: String,
    pub version: i32,
}

/// A distinct category with its row count.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryCountEntity {
    pub category: String,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_entity_holds_json_value() {
        let entity = SettingEntity {
            id: Uuid::new_v4(),
            key: "max_upload_mb".to_string(),
            category: "media".to_string(),
            value: serde_json::json!(50),
            value_type: "number".to_string(),
            description: None,
            is_public: true,
            encrypted: false,
            active: true,
            version: 1,
            last_modified_by: None,
            last_modified_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert_eq!(entity.value, serde_json::json!(50));
        assert_eq!(entity.value_type, "number");
    }
}
