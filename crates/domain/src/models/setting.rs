//! Setting domain models for platform configuration.
//!
//! Settings are typed key/value records with per-record versions. Versions
//! feed the aggregate version hash that clients use as a cache-busting token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Category for grouping settings in the admin UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingCategory {
    General,
    I18n,
    Streaming,
    Cms,
    Supporters,
    Currencies,
    Coins,
    Moderation,
    Payments,
    Ads,
    Media,
    Integrations,
    Notifications,
    Security,
    Maintenance,
}

impl FromStr for SettingCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "general" => Ok(SettingCategory::General),
            "i18n" => Ok(SettingCategory::I18n),
            "streaming" => Ok(SettingCategory::Streaming),
            "cms" => Ok(SettingCategory::Cms),
            "supporters" => Ok(SettingCategory::Supporters),
            "currencies" => Ok(SettingCategory::Currencies),
            "coins" => Ok(SettingCategory::Coins),
            "moderation" => Ok(SettingCategory::Moderation),
            "payments" => Ok(SettingCategory::Payments),
            "ads" => Ok(SettingCategory::Ads),
            "media" => Ok(SettingCategory::Media),
            "integrations" => Ok(SettingCategory::Integrations),
            "notifications" => Ok(SettingCategory::Notifications),
            "security" => Ok(SettingCategory::Security),
            "maintenance" => Ok(SettingCategory::Maintenance),
            _ => Err(format!("Unknown setting category: {}", s)),
        }
    }
}

impl std::fmt::Display for SettingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SettingCategory::General => "general",
            SettingCategory::I18n => "i18n",
            SettingCategory::Streaming => "streaming",
            SettingCategory::Cms => "cms",
            SettingCategory::Supporters => "supporters",
            SettingCategory::Currencies => "currencies",
            SettingCategory::Coins => "coins",
            SettingCategory::Moderation => "moderation",
            SettingCategory::Payments => "payments",
            SettingCategory::Ads => "ads",
            SettingCategory::Media => "media",
            SettingCategory::Integrations => "integrations",
            SettingCategory::Notifications => "notifications",
            SettingCategory::Security => "security",
            SettingCategory::Maintenance => "maintenance",
        };
        write!(f, "{}", s)
    }
}

/// Declared JSON shape of a setting value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingValueType {
    String,
    Number,
    Boolean,
    Object,
    Array,
}

impl SettingValueType {
    /// Whether a JSON value matches this declared type.
    pub fn matches(&self, value: &JsonValue) -> bool {
        match self {
            SettingValueType::String => value.is_string(),
            SettingValueType::Number => value.is_number(),
            SettingValueType::Boolean => value.is_boolean(),
            SettingValueType::Object => value.is_object(),
            SettingValueType::Array => value.is_array(),
        }
    }

    /// Infers the declared type from a JSON value. `null` has no type.
    pub fn infer(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::String(_) => Some(SettingValueType::String),
            JsonValue::Number(_) => Some(SettingValueType::Number),
            JsonValue::Bool(_) => Some(SettingValueType::Boolean),
            JsonValue::Object(_) => Some(SettingValueType::Object),
            JsonValue::Array(_) => Some(SettingValueType::Array),
            JsonValue::Null => None,
        }
    }
}

impl FromStr for SettingValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "string" => Ok(SettingValueType::String),
            "number" => Ok(SettingValueType::Number),
            "boolean" => Ok(SettingValueType::Boolean),
            "object" => Ok(SettingValueType::Object),
            "array" => Ok(SettingValueType::Array),
            _ => Err(format!("Unknown value type: {}", s)),
        }
    }
}

impl std::fmt::Display for SettingValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SettingValueType::String => "string",
            SettingValueType::Number => "number",
            SettingValueType::Boolean => "boolean",
            SettingValueType::Object => "object",
            SettingValueType::Array => "array",
        };
        write!(f, "{}", s)
    }
}

/// A configuration record with per-record versioning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    pub id: Uuid,
    pub key: String,
    pub category: SettingCategory,
    pub value: JsonValue,
    #[serde(rename = "type")]
    pub value_type: SettingValueType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_public: bool,
    pub encrypted: bool,
    pub active: bool,
    pub version: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Setting {
    /// Renders the stored value as a string for masking purposes.
    fn value_as_string(&self) -> String {
        match &self.value {
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// The masked rendering of a sensitive value, `None` when not encrypted.
    pub fn masked_value(&self) -> Option<String> {
        if self.encrypted {
            Some(shared::crypto::mask_secret(&self.value_as_string()))
        } else {
            None
        }
    }

    /// Projects the record for an API caller.
    ///
    /// Admins see the clear value plus `maskedValue` when the record is
    /// encrypted. Everyone else sees only the masked rendering.
    pub fn into_response(self, admin: bool) -> SettingResponse {
        let masked = self.masked_value();
        let value = if !admin && self.encrypted {
            JsonValue::String(masked.clone().unwrap_or_else(|| "****".to_string()))
        } else {
            self.value
        };
        SettingResponse {
            id: self.id,
            key: self.key,
            category: self.category,
            value,
            value_type: self.value_type,
            description: self.description,
            is_public: self.is_public,
            encrypted: self.encrypted,
            version: self.version,
            masked_value: if admin { masked } else { None },
            last_modified_by: self.last_modified_by,
            last_modified_at: self.last_modified_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// API projection of a [`Setting`] with role-dependent masking applied.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingResponse {
    pub id: Uuid,
    pub key: String,
    pub category: SettingCategory,
    pub value: JsonValue,
    #[serde(rename = "type")]
    pub value_type: SettingValueType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_public: bool,
    pub encrypted: bool,
    pub version: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masked_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Request DTOs
// ============================================================================

/// Request payload for `PUT /settings/:category/:key`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertSettingRequest {
    pub value: JsonValue,

    /// Declared type; inferred from the value when omitted.
    #[serde(default, rename = "type")]
    pub value_type: Option<SettingValueType>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    pub is_public: Option<bool>,

    pub encrypted: Option<bool>,
}

impl UpsertSettingRequest {
    /// Resolves the declared type, inferring it from the value when omitted.
    ///
    /// Returns an error when the declaration does not match the value shape,
    /// or when the value is `null` (which has no type).
    pub fn resolved_value_type(&self) -> Result<SettingValueType, String> {
        match self.value_type {
            Some(declared) => {
                if declared.matches(&self.value) {
                    Ok(declared)
                } else {
                    Err(format!(
                        "Value does not match declared type '{}'",
                        declared
                    ))
                }
            }
            None => SettingValueType::infer(&self.value)
                .ok_or_else(|| "Value must not be null".to_string()),
        }
    }
}

/// One item of a bulk settings write.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BulkSettingItem {
    #[validate(custom(function = "shared::validation::validate_setting_key"))]
    pub key: String,

    pub value: JsonValue,

    pub category: Option<SettingCategory>,

    #[serde(default, rename = "type")]
    pub value_type: Option<SettingValueType>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    pub is_public: Option<bool>,

    pub encrypted: Option<bool>,
}

impl BulkSettingItem {
    /// Converts this item into the single-key upsert payload.
    pub fn to_upsert(&self) -> UpsertSettingRequest {
        UpsertSettingRequest {
            value: self.value.clone(),
            value_type: self.value_type,
            description: self.description.clone(),
            is_public: self.is_public,
            encrypted: self.encrypted,
        }
    }
}

/// Request payload for `PUT /settings/bulk`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdateSettingsRequest {
    #[validate(length(min = 1, max = 100, message = "Settings must contain 1-100 items"))]
    #[validate(nested)]
    pub settings: Vec<BulkSettingItem>,
}

/// Query parameters for listing settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSettingsQuery {
    pub category: Option<SettingCategory>,
    pub public_only: Option<bool>,
}

/// Query parameters for the aggregate version endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsVersionQuery {
    pub category: Option<SettingCategory>,
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Per-item results of a bulk settings write. Items fail independently.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdateOutcome {
    pub created: Vec<String>,
    pub updated: Vec<String>,
    pub failed: Vec<BulkItemError>,
}

/// A failed item of a bulk settings write.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkItemError {
    pub key: String,
    pub error: String,
}

/// Aggregate version token over a set of settings.
///
/// The hash changes whenever any matching record's version changes, which
/// makes it usable as an ETag-style cache buster.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsVersion {
    pub version: String,
    pub count: i64,
    pub timestamp: DateTime<Utc>,
}

/// A distinct settings category with its record count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: SettingCategory,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_setting(value: JsonValue, encrypted: bool) -> Setting {
        Setting {
            id: Uuid::new_v4(),
            key: "smtp_password".to_string(),
            category: SettingCategory::Integrations,
            value_type: SettingValueType::infer(&value).unwrap_or(SettingValueType::String),
            value,
            description: None,
            is_public: false,
            encrypted,
            active: true,
            version: 3,
            last_modified_by: None,
            last_modified_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_setting_category_roundtrip() {
        for name in [
            "general",
            "i18n",
            "streaming",
            "cms",
            "supporters",
            "currencies",
            "coins",
            "moderation",
            "payments",
            "ads",
            "media",
            "integrations",
            "notifications",
            "security",
            "maintenance",
        ] {
            let parsed = SettingCategory::from_str(name).unwrap();
            assert_eq!(parsed.to_string(), name);
        }
        assert!(SettingCategory::from_str("bogus").is_err());
    }

    #[test]
    fn test_setting_category_from_str_case_insensitive() {
        assert_eq!(
            SettingCategory::from_str("STREAMING").unwrap(),
            SettingCategory::Streaming
        );
    }

    #[test]
    fn test_value_type_matches() {
        assert!(SettingValueType::String.matches(&json!("x")));
        assert!(SettingValueType::Number.matches(&json!(42)));
        assert!(SettingValueType::Number.matches(&json!(4.2)));
        assert!(SettingValueType::Boolean.matches(&json!(true)));
        assert!(SettingValueType::Object.matches(&json!({"a": 1})));
        assert!(SettingValueType::Array.matches(&json!([1, 2])));

        assert!(!SettingValueType::String.matches(&json!(42)));
        assert!(!SettingValueType::Boolean.matches(&json!("true")));
    }

    #[test]
    fn test_value_type_infer() {
        assert_eq!(
            SettingValueType::infer(&json!("x")),
            Some(SettingValueType::String)
        );
        assert_eq!(
            SettingValueType::infer(&json!([1])),
            Some(SettingValueType::Array)
        );
        assert_eq!(SettingValueType::infer(&json!(null)), None);
    }

    #[test]
    fn test_resolved_value_type_inference() {
        let req: UpsertSettingRequest =
            serde_json::from_value(json!({"value": {"limit": 5}})).unwrap();
        assert_eq!(
            req.resolved_value_type().unwrap(),
            SettingValueType::Object
        );
    }

    #[test]
    fn test_resolved_value_type_mismatch() {
        let req: UpsertSettingRequest =
            serde_json::from_value(json!({"value": 42, "type": "string"})).unwrap();
        assert!(req.resolved_value_type().is_err());
    }

    #[test]
    fn test_resolved_value_type_null_rejected() {
        let req: UpsertSettingRequest = serde_json::from_value(json!({"value": null})).unwrap();
        assert!(req.resolved_value_type().is_err());
    }

    #[test]
    fn test_masked_value_only_when_encrypted() {
        let plain = sample_setting(json!("hello-world"), false);
        assert!(plain.masked_value().is_none());

        let secret = sample_setting(json!("sk_live_abcdef123456"), true);
        assert_eq!(secret.masked_value().unwrap(), "sk_l****************");
    }

    #[test]
    fn test_masking_of_non_string_values() {
        // non-string values are masked over their JSON rendering
        let secret = sample_setting(json!({"token": "abc"}), true);
        let masked = secret.masked_value().unwrap();
        assert!(masked.starts_with("{\"to"));
        assert!(!masked.contains("abc"));
    }

    #[test]
    fn test_into_response_admin_sees_clear_value() {
        let secret = sample_setting(json!("super-secret-value"), true);
        let resp = secret.into_response(true);
        assert_eq!(resp.value, json!("super-secret-value"));
        assert_eq!(resp.masked_value.as_deref(), Some("supe**************"));
    }

    #[test]
    fn test_into_response_non_admin_gets_mask() {
        let secret = sample_setting(json!("super-secret-value"), true);
        let resp = secret.into_response(false);
        assert_eq!(resp.value, json!("supe**************"));
        assert!(resp.masked_value.is_none());
    }

    #[test]
    fn test_into_response_plain_value_untouched() {
        let plain = sample_setting(json!(3600), false);
        let resp = plain.into_response(false);
        assert_eq!(resp.value, json!(3600));
        assert!(resp.masked_value.is_none());
    }

    #[test]
    fn test_upsert_request_deserialize() {
        let req: UpsertSettingRequest = serde_json::from_value(json!({
            "value": "Shoply",
            "type": "string",
            "description": "Site display name",
            "isPublic": true
        }))
        .unwrap();
        assert_eq!(req.value, json!("Shoply"));
        assert_eq!(req.value_type, Some(SettingValueType::String));
        assert_eq!(req.is_public, Some(true));
        assert!(req.encrypted.is_none());
    }

    #[test]
    fn test_bulk_request_deserialize() {
        let req: BulkUpdateSettingsRequest = serde_json::from_value(json!({
            "settings": [
                {"key": "site_name", "value": "Shoply"},
                {"key": "max_upload_mb", "value": 50, "category": "media"}
            ]
        }))
        .unwrap();
        assert_eq!(req.settings.len(), 2);
        assert_eq!(
            req.settings[1].category,
            Some(SettingCategory::Media)
        );
    }

    #[test]
    fn test_setting_serializes_type_field_name() {
        let s = sample_setting(json!("x"), false);
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["type"], json!("string"));
        assert!(v.get("valueType").is_none());
    }
}
