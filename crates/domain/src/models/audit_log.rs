//! Audit log domain models.
//!
//! Every mutation of settings, translations, and languages appends an audit
//! entry. The log is append-only; rows age out through the retention job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::str::FromStr;
use uuid::Uuid;

/// Kind of entity an audit entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditEntityType {
    Setting,
    Translation,
    Language,
}

impl FromStr for AuditEntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "setting" => Ok(AuditEntityType::Setting),
            "translation" => Ok(AuditEntityType::Translation),
            "language" => Ok(AuditEntityType::Language),
            _ => Err(format!("Unknown audit entity type: {}", s)),
        }
    }
}

impl std::fmt::Display for AuditEntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AuditEntityType::Setting => "setting",
            AuditEntityType::Translation => "translation",
            AuditEntityType::Language => "language",
        };
        write!(f, "{}", s)
    }
}

/// What was done to the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Publish,
    Export,
    Import,
}

impl FromStr for AuditAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "create" => Ok(AuditAction::Create),
            "update" => Ok(AuditAction::Update),
            "delete" => Ok(AuditAction::Delete),
            "publish" => Ok(AuditAction::Publish),
            "export" => Ok(AuditAction::Export),
            "import" => Ok(AuditAction::Import),
            _ => Err(format!("Unknown audit action: {}", s)),
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AuditAction::Create => "create",
            AuditAction::Update => "update",
            AuditAction::Delete => "delete",
            AuditAction::Publish => "publish",
            AuditAction::Export => "export",
            AuditAction::Import => "import",
        };
        write!(f, "{}", s)
    }
}

/// How consequential the change was.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditSeverity {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl FromStr for AuditSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(AuditSeverity::Low),
            "medium" => Ok(AuditSeverity::Medium),
            "high" => Ok(AuditSeverity::High),
            "critical" => Ok(AuditSeverity::Critical),
            _ => Err(format!("Unknown audit severity: {}", s)),
        }
    }
}

impl std::fmt::Display for AuditSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AuditSeverity::Low => "low",
            AuditSeverity::Medium => "medium",
            AuditSeverity::High => "high",
            AuditSeverity::Critical => "critical",
        };
        write!(f, "{}", s)
    }
}

/// A stored audit entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: Uuid,
    pub entity_type: AuditEntityType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    pub action: AuditAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<JsonValue>,
    pub severity: AuditSeverity,
    pub created_at: DateTime<Utc>,
}

/// Input for appending an audit entry, assembled with the builder methods.
#[derive(Debug, Clone)]
pub struct CreateAuditLogInput {
    pub entity_type: AuditEntityType,
    pub entity_id: Option<String>,
    pub action: AuditAction,
    pub user_id: Option<Uuid>,
    pub user_name: Option<String>,
    pub description: String,
    pub old_value: Option<JsonValue>,
    pub new_value: Option<JsonValue>,
    pub severity: AuditSeverity,
}

impl CreateAuditLogInput {
    pub fn new(entity_type: AuditEntityType, action: AuditAction) -> Self {
        Self {
            entity_type,
            entity_id: None,
            action,
            user_id: None,
            user_name: None,
            description: String::new(),
            old_value: None,
            new_value: None,
            severity: AuditSeverity::default(),
        }
    }

    pub fn with_entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    pub fn with_user(mut self, user_id: Option<Uuid>, user_name: Option<String>) -> Self {
        self.user_id = user_id;
        self.user_name = user_name;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_old_value(mut self, value: JsonValue) -> Self {
        self.old_value = Some(value);
        self
    }

    pub fn with_new_value(mut self, value: JsonValue) -> Self {
        self.new_value = Some(value);
        self
    }

    pub fn with_severity(mut self, severity: AuditSeverity) -> Self {
        self.severity = severity;
        self
    }
}

/// Query parameters for listing audit entries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAuditLogsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub entity_type: Option<AuditEntityType>,
    pub entity_id: Option<String>,
    pub action: Option<AuditAction>,
    pub severity: Option<AuditSeverity>,
    pub user_id: Option<Uuid>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}
