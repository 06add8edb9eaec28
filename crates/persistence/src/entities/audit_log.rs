//! Audit log entity.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the audit_logs table.
///
/// Enum columns are stored as text and parsed back into domain enums by the
/// repository.
#[derive(Debug, Clone, FromRow)]
pub struct AuditLogEntity {
    pub id: Uuid,
    pub entity_type: String,
    pub entity_id: Option<String>,
    pub action: String,
    pub user_id: Option<Uuid>,
    pub user_name: Option<String>,
    pub description: String,
    pub old_value: Option<serde_json::Value>,
    pub new_value: Option<serde_json::Value>,
    pub severity: String,
    pub created_at: DateTime<Utc>,
}
