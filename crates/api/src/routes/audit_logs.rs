//! Audit log endpoints.
//!
//! Read-only: entries are appended by the mutation handlers and aged out by
//! the retention job, never edited through the API.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::models::{ListAuditLogsQuery, Pagination};
use persistence::repositories::AuditLogRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::PagedResponse;

/// GET /api/v1/audit-logs
#[axum::debug_handler]
pub async fn list_audit_logs(
    State(state): State<AppState>,
    Query(query): Query<ListAuditLogsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    // repository clamps the same way; recomputed here for the envelope
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(50).clamp(1, 100);

    let repo = AuditLogRepository::new(state.pool.clone());
    let (logs, total) = repo.list(&query).await?;

    Ok((
        StatusCode::OK,
        Json(PagedResponse::new(logs, Pagination::new(page, limit, total))),
    ))
}
