//! Platform settings endpoints.
//!
//! Reads are public-or-admin: anonymous callers only see `isPublic` records
//! and get encrypted values masked. Writes require an admin token and land in
//! the audit log.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use domain::models::{
    BulkItemError, BulkUpdateOutcome, BulkUpdateSettingsRequest, ListSettingsQuery,
    SettingCategory, SettingsVersionQuery, UpsertSettingRequest,
};
use domain::services::{audit, compute_settings_version};
use persistence::repositories::{AuditLogRepository, SettingRepository};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::AdminAuth;
use crate::routes::ApiResponse;

/// GET /api/v1/settings
///
/// Anonymous callers are forced onto `publicOnly`; admins may widen the
/// listing with `publicOnly=false` (the default for them).
#[axum::debug_handler]
pub async fn list_settings(
    State(state): State<AppState>,
    auth: Option<Extension<AdminAuth>>,
    Query(query): Query<ListSettingsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let admin = auth.is_some();
    let public_only = if admin {
        query.public_only.unwrap_or(false)
    } else {
        true
    };

    let repo = SettingRepository::new(state.pool.clone());
    let settings = repo.list(query.category, public_only).await?;

    let responses: Vec<_> = settings
        .into_iter()
        .map(|s| s.into_response(admin))
        .collect();

    Ok((StatusCode::OK, Json(ApiResponse::new(responses))))
}

/// GET /api/v1/settings/version
#[axum::debug_handler]
pub async fn get_settings_version(
    State(state): State<AppState>,
    Query(query): Query<SettingsVersionQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = SettingRepository::new(state.pool.clone());
    let pairs = repo.version_pairs(query.category).await?;
    let version = compute_settings_version(pairs);

    Ok((StatusCode::OK, Json(ApiResponse::new(version))))
}

/// GET /api/v1/settings/categories
#[axum::debug_handler]
pub async fn list_setting_categories(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = SettingRepository::new(state.pool.clone());
    let categories = repo.categories().await?;

    Ok((StatusCode::OK, Json(ApiResponse::new(categories))))
}

/// GET /api/v1/settings/:category/:key
///
/// Non-public records are indistinguishable from missing ones for anonymous
/// callers.
#[axum::debug_handler]
pub async fn get_setting(
    State(state): State<AppState>,
    auth: Option<Extension<AdminAuth>>,
    Path((category, key)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let admin = auth.is_some();
    let category: SettingCategory = category
        .parse()
        .map_err(|_| ApiError::NotFound("Setting not found".to_string()))?;

    let repo = SettingRepository::new(state.pool.clone());
    let setting = repo
        .find(category, &key)
        .await?
        .ok_or_else(|| ApiError::NotFound("Setting not found".to_string()))?;

    if !setting.is_public && !admin {
        return Err(ApiError::NotFound("Setting not found".to_string()));
    }

    Ok((StatusCode::OK, Json(ApiResponse::new(setting.into_response(admin)))))
}

/// PUT /api/v1/settings/:category/:key
#[axum::debug_handler]
pub async fn upsert_setting(
    State(state): State<AppState>,
    Extension(auth): Extension<AdminAuth>,
    Path((category, key)): Path<(String, String)>,
    Json(payload): Json<UpsertSettingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let category: SettingCategory = category.parse().map_err(ApiError::validation)?;
    payload.validate()?;
    let value_type = payload.resolved_value_type().map_err(ApiError::validation)?;

    let actor = auth.actor();
    let repo = SettingRepository::new(state.pool.clone());
    let (setting, created) = repo
        .upsert(
            category,
            &key,
            &payload.value,
            value_type,
            payload.description.as_deref(),
            payload.is_public,
            payload.encrypted,
            Some(actor.as_str()),
        )
        .await?;

    AuditLogRepository::new(state.pool.clone()).insert_async(audit::setting_saved(
        Some(auth.user_id),
        auth.name.as_deref(),
        &setting,
        created,
        None,
    ));

    info!(
        user_id = %auth.user_id,
        key = %setting.key,
        category = %setting.category,
        version = setting.version,
        created,
        "Setting saved"
    );

    Ok((StatusCode::OK, Json(ApiResponse::new(setting.into_response(true)))))
}

/// DELETE /api/v1/settings/:category/:key
///
/// Soft delete. The key stays reserved and a later upsert revives it.
#[axum::debug_handler]
pub async fn delete_setting(
    State(state): State<AppState>,
    Extension(auth): Extension<AdminAuth>,
    Path((category, key)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let category: SettingCategory = category
        .parse()
        .map_err(|_| ApiError::NotFound("Setting not found".to_string()))?;

    let actor = auth.actor();
    let repo = SettingRepository::new(state.pool.clone());
    let setting = repo
        .soft_delete(category, &key, Some(actor.as_str()))
        .await?
        .ok_or_else(|| ApiError::NotFound("Setting not found".to_string()))?;

    AuditLogRepository::new(state.pool.clone()).insert_async(audit::setting_deleted(
        Some(auth.user_id),
        auth.name.as_deref(),
        &setting,
    ));

    info!(user_id = %auth.user_id, key = %setting.key, "Setting deleted");

    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_message(
            setting.into_response(true),
            "Setting deleted",
        )),
    ))
}

/// PUT /api/v1/settings/bulk
///
/// Items are applied independently; one bad item never aborts the rest.
#[axum::debug_handler]
pub async fn bulk_update_settings(
    State(state): State<AppState>,
    Extension(auth): Extension<AdminAuth>,
    Json(payload): Json<BulkUpdateSettingsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;

    let actor = auth.actor();
    let repo = SettingRepository::new(state.pool.clone());
    let audit_repo = AuditLogRepository::new(state.pool.clone());
    let mut outcome = BulkUpdateOutcome::default();

    for item in &payload.settings {
        let category = item.category.unwrap_or(SettingCategory::General);
        let upsert = item.to_upsert();
        let value_type = match upsert.resolved_value_type() {
            Ok(vt) => vt,
            Err(message) => {
                outcome.failed.push(BulkItemError {
                    key: item.key.clone(),
                    error: message,
                });
                continue;
            }
        };

        match repo
            .upsert(
                category,
                &item.key,
                &upsert.value,
                value_type,
                upsert.description.as_deref(),
                upsert.is_public,
                upsert.encrypted,
                Some(actor.as_str()),
            )
            .await
        {
            Ok((setting, created)) => {
                audit_repo.insert_async(audit::setting_saved(
                    Some(auth.user_id),
                    auth.name.as_deref(),
                    &setting,
                    created,
                    None,
                ));
                if created {
                    outcome.created.push(setting.key);
                } else {
                    outcome.updated.push(setting.key);
                }
            }
            Err(error) => {
                tracing::error!(key = %item.key, error = %error, "Bulk setting write failed");
                outcome.failed.push(BulkItemError {
                    key: item.key.clone(),
                    error: "Database error".to_string(),
                });
            }
        }
    }

    info!(
        user_id = %auth.user_id,
        created = outcome.created.len(),
        updated = outcome.updated.len(),
        failed = outcome.failed.len(),
        "Bulk settings update"
    );

    Ok((StatusCode::OK, Json(ApiResponse::new(outcome))))
}
