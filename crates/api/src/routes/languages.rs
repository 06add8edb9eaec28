//! Language registry endpoints.
//!
//! Reads are public so clients can discover languages and fetch packs without
//! a token. The pack endpoint honors a client-held version for cheap 304
//! revalidation; the stored version only moves on publish.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use chrono::Utc;
use domain::models::{
    CreateLanguageRequest, LanguagePack, LanguagePackQuery, LanguagePublished, LanguageStatus,
    ListLanguagesQuery, PackLanguage, PackMeta, TranslationProgress, UpdateLanguageRequest,
};
use domain::services::{audit, PlatformEvent};
use persistence::repositories::{AuditLogRepository, LanguageRepository, TranslationRepository};
use std::collections::BTreeMap;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_language_pack_served;
use crate::middleware::AdminAuth;
use crate::routes::ApiResponse;

/// GET /api/v1/languages
///
/// Anonymous callers get enabled languages only unless they filter
/// explicitly; admins see everything by default.
#[axum::debug_handler]
pub async fn list_languages(
    State(state): State<AppState>,
    auth: Option<Extension<AdminAuth>>,
    Query(query): Query<ListLanguagesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let admin = auth.is_some();
    let enabled = query.enabled.or(if admin { None } else { Some(true) });

    let repo = LanguageRepository::new(state.pool.clone());
    let mut languages = repo.list(enabled, query.status).await?;

    if query.with_progress.unwrap_or(false) {
        for language in &mut languages {
            let (total, translated) = repo.compute_progress(&language.code).await?;
            language.translation_progress = TranslationProgress::compute(total, translated);
        }
    }

    Ok((StatusCode::OK, Json(ApiResponse::new(languages))))
}

/// GET /api/v1/languages/default
///
/// The flagged default when it is enabled, else the enabled language with the
/// highest priority.
#[axum::debug_handler]
pub async fn get_default_language(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = LanguageRepository::new(state.pool.clone());
    let language = repo
        .get_default()
        .await?
        .ok_or_else(|| ApiError::NotFound("No enabled language available".to_string()))?;

    Ok((StatusCode::OK, Json(ApiResponse::new(language))))
}

/// GET /api/v1/languages/packs/:languageCode
///
/// Flattened `key -> text` map for one language. A matching `?version=N`
/// short-circuits to 304 so clients can cache on the publish version.
#[axum::debug_handler]
pub async fn get_language_pack(
    State(state): State<AppState>,
    Path(language_code): Path<String>,
    Query(query): Query<LanguagePackQuery>,
) -> Result<Response, ApiError> {
    let repo = LanguageRepository::new(state.pool.clone());
    let language = repo
        .find_by_code(&language_code)
        .await?
        .ok_or_else(|| ApiError::NotFound("Language not found".to_string()))?;

    let etag = format!("\"{}\"", language.version);

    if query.version == Some(language.version) {
        record_language_pack_served(&language.code, true);
        return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
    }

    let rows = TranslationRepository::new(state.pool.clone())
        .pack_rows(&language.code, query.category.as_deref())
        .await?;

    let translations: BTreeMap<String, String> =
        rows.into_iter().map(|row| (row.key, row.text)).collect();

    let pack = LanguagePack {
        language: PackLanguage {
            code: language.code.clone(),
            name: language.name.clone(),
            direction: language.direction,
            version: language.version,
        },
        meta: PackMeta {
            total_keys: translations.len(),
            generated_at: Utc::now(),
        },
        translations,
    };

    record_language_pack_served(&language.code, false);

    let max_age = state.config.cache.language_pack_max_age_secs;
    let headers = [
        (header::ETAG, etag),
        (
            header::CACHE_CONTROL,
            format!("public, max-age={}", max_age),
        ),
    ];

    Ok((StatusCode::OK, headers, Json(ApiResponse::new(pack))).into_response())
}

/// GET /api/v1/languages/:code
#[axum::debug_handler]
pub async fn get_language(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = LanguageRepository::new(state.pool.clone());
    let mut language = repo
        .find_by_code(&code)
        .await?
        .ok_or_else(|| ApiError::NotFound("Language not found".to_string()))?;

    let (total, translated) = repo.compute_progress(&language.code).await?;
    language.translation_progress = TranslationProgress::compute(total, translated);

    Ok((StatusCode::OK, Json(ApiResponse::new(language))))
}

/// POST /api/v1/languages
#[axum::debug_handler]
pub async fn create_language(
    State(state): State<AppState>,
    Extension(auth): Extension<AdminAuth>,
    Json(payload): Json<CreateLanguageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;

    let actor = auth.actor();
    let repo = LanguageRepository::new(state.pool.clone());
    let language = match repo.create(&payload, Some(actor.as_str())).await {
        Ok(language) => language,
        Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some("23505") => {
            return Err(ApiError::Conflict("Language code already exists".to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    AuditLogRepository::new(state.pool.clone()).insert_async(audit::language_created(
        Some(auth.user_id),
        auth.name.as_deref(),
        &language,
    ));

    info!(
        user_id = %auth.user_id,
        code = %language.code,
        is_default = language.is_default,
        "Language created"
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::new(language))))
}

/// PUT /api/v1/languages/:code
///
/// Partial field update. `isDefault=true` goes through the transactional
/// set-default path; status may only move to archived here since publishing
/// has its own endpoint.
#[axum::debug_handler]
pub async fn update_language(
    State(state): State<AppState>,
    Extension(auth): Extension<AdminAuth>,
    Path(code): Path<String>,
    Json(payload): Json<UpdateLanguageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;
    if payload.is_empty() {
        return Err(ApiError::validation("No fields to update"));
    }
    if let Some(status) = payload.status {
        if status != LanguageStatus::Archived {
            return Err(ApiError::validation(
                "Status can only be set to archived here; use the publish endpoint",
            ));
        }
    }

    let actor = auth.actor();
    let repo = LanguageRepository::new(state.pool.clone());
    let old = repo
        .find_by_code(&code)
        .await?
        .ok_or_else(|| ApiError::NotFound("Language not found".to_string()))?;

    let mut language = repo
        .update(&code, &payload, Some(actor.as_str()))
        .await?
        .ok_or_else(|| ApiError::NotFound("Language not found".to_string()))?;

    if payload.is_default == Some(true) {
        language = repo
            .set_default(&language.code)
            .await?
            .ok_or_else(|| ApiError::NotFound("Language not found".to_string()))?;
    }

    AuditLogRepository::new(state.pool.clone()).insert_async(audit::language_updated(
        Some(auth.user_id),
        auth.name.as_deref(),
        &old,
        &language,
    ));

    info!(user_id = %auth.user_id, code = %language.code, "Language updated");

    Ok((StatusCode::OK, Json(ApiResponse::new(language))))
}

/// DELETE /api/v1/languages/:code
///
/// Hard delete; refused while the language is the default.
#[axum::debug_handler]
pub async fn delete_language(
    State(state): State<AppState>,
    Extension(auth): Extension<AdminAuth>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = LanguageRepository::new(state.pool.clone());
    let language = repo
        .find_by_code(&code)
        .await?
        .ok_or_else(|| ApiError::NotFound("Language not found".to_string()))?;

    if language.is_default {
        return Err(ApiError::InvalidState(
            "Cannot delete the default language".to_string(),
        ));
    }

    let language = repo
        .delete(&language.code)
        .await?
        .ok_or_else(|| ApiError::NotFound("Language not found".to_string()))?;

    AuditLogRepository::new(state.pool.clone()).insert_async(audit::language_deleted(
        Some(auth.user_id),
        auth.name.as_deref(),
        &language,
    ));

    info!(user_id = %auth.user_id, code = %language.code, "Language deleted");

    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_message(language, "Language deleted")),
    ))
}

/// POST /api/v1/languages/:code/publish
///
/// Refreshes progress, refuses archived languages and languages with nothing
/// translated, then bumps the version and announces the new pack.
#[axum::debug_handler]
pub async fn publish_language(
    State(state): State<AppState>,
    Extension(auth): Extension<AdminAuth>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = LanguageRepository::new(state.pool.clone());
    let language = repo
        .find_by_code(&code)
        .await?
        .ok_or_else(|| ApiError::NotFound("Language not found".to_string()))?;

    if !language.status.can_publish() {
        return Err(ApiError::InvalidState(
            "Cannot publish an archived language".to_string(),
        ));
    }

    let refreshed = repo
        .update_progress(&language.code)
        .await?
        .ok_or_else(|| ApiError::NotFound("Language not found".to_string()))?;

    if refreshed.translation_progress.translated == 0 {
        return Err(ApiError::InvalidState(
            "Cannot publish a language with no translated entries".to_string(),
        ));
    }

    let actor = auth.actor();
    let published = repo
        .publish(&refreshed.code, Some(actor.as_str()))
        .await?
        .ok_or_else(|| {
            ApiError::InvalidState("Cannot publish an archived language".to_string())
        })?;

    AuditLogRepository::new(state.pool.clone()).insert_async(audit::language_published(
        Some(auth.user_id),
        auth.name.as_deref(),
        &published.code,
        published.version,
    ));

    state
        .events
        .publish(PlatformEvent::LanguagePublished {
            code: published.code.clone(),
            version: published.version,
        })
        .await;

    info!(
        user_id = %auth.user_id,
        code = %published.code,
        version = published.version,
        "Language published"
    );

    let response = LanguagePublished {
        code: published.code,
        version: published.version,
        published_at: published.last_published_at.unwrap_or_else(Utc::now),
    };

    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_message(response, "Language published")),
    ))
}

/// POST /api/v1/languages/:code/update-progress
#[axum::debug_handler]
pub async fn update_language_progress(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = LanguageRepository::new(state.pool.clone());
    let language = repo
        .update_progress(&code)
        .await?
        .ok_or_else(|| ApiError::NotFound("Language not found".to_string()))?;

    Ok((StatusCode::OK, Json(ApiResponse::new(language))))
}
