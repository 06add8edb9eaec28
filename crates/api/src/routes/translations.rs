//! Translation management endpoints.
//!
//! Key CRUD, per-language entry writes, verification, batch import and
//! export. All of it is admin-only; clients consume translations through the
//! public language pack endpoint instead.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use chrono::Utc;
use domain::models::{
    CreateTranslationRequest, ExportAllRow, ExportFormat, ExportQuery, ExportRow,
    ImportItemError, ImportReport, ImportTranslationsRequest, ListTranslationsQuery, Pagination,
    SetEntryOutcome, SetEntryRequest, TranslationStatsQuery, TranslationStatsResponse,
    UpdateTranslationRequest,
};
use domain::services::audit;
use persistence::repositories::{
    AuditLogRepository, EntryWriteOutcome, ImportOutcome, LanguageRepository,
    TranslationRepository,
};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::AdminAuth;
use crate::routes::{ApiResponse, PagedResponse};

/// GET /api/v1/translations
#[axum::debug_handler]
pub async fn list_translations(
    State(state): State<AppState>,
    Query(query): Query<ListTranslationsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(50).clamp(1, 100);

    let repo = TranslationRepository::new(state.pool.clone());
    let (translations, total) = repo
        .list(
            page,
            limit,
            query.search.as_deref(),
            query.category.as_deref(),
            query.status,
            query.language_code.as_deref(),
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(PagedResponse::new(
            translations,
            Pagination::new(page, limit, total),
        )),
    ))
}

/// POST /api/v1/translations
#[axum::debug_handler]
pub async fn create_translation(
    State(state): State<AppState>,
    Extension(auth): Extension<AdminAuth>,
    Json(payload): Json<CreateTranslationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;

    let actor = auth.actor();
    let repo = TranslationRepository::new(state.pool.clone());
    let translation = match repo.create(&payload, Some(actor.as_str())).await {
        Ok(translation) => translation,
        Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some("23505") => {
            return Err(ApiError::Conflict(
                "Translation key already exists".to_string(),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    AuditLogRepository::new(state.pool.clone()).insert_async(audit::translation_created(
        Some(auth.user_id),
        auth.name.as_deref(),
        &translation,
    ));

    info!(user_id = %auth.user_id, key = %translation.key, "Translation created");

    Ok((StatusCode::CREATED, Json(ApiResponse::new(translation))))
}

/// GET /api/v1/translations/:key
#[axum::debug_handler]
pub async fn get_translation(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = TranslationRepository::new(state.pool.clone());
    let translation = repo
        .find_by_key(&key, None)
        .await?
        .ok_or_else(|| ApiError::NotFound("Translation not found".to_string()))?;

    Ok((StatusCode::OK, Json(ApiResponse::new(translation))))
}

/// PUT /api/v1/translations/:key
#[axum::debug_handler]
pub async fn update_translation(
    State(state): State<AppState>,
    Extension(auth): Extension<AdminAuth>,
    Path(key): Path<String>,
    Json(payload): Json<UpdateTranslationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;
    if payload.is_empty() {
        return Err(ApiError::validation("No fields to update"));
    }

    let actor = auth.actor();
    let repo = TranslationRepository::new(state.pool.clone());
    let old = repo
        .find_by_key(&key, None)
        .await?
        .ok_or_else(|| ApiError::NotFound("Translation not found".to_string()))?;

    let translation = repo
        .update(&key, &payload, Some(actor.as_str()))
        .await?
        .ok_or_else(|| ApiError::NotFound("Translation not found".to_string()))?;

    AuditLogRepository::new(state.pool.clone()).insert_async(audit::translation_updated(
        Some(auth.user_id),
        auth.name.as_deref(),
        &old,
        &translation,
    ));

    info!(user_id = %auth.user_id, key = %translation.key, "Translation updated");

    Ok((StatusCode::OK, Json(ApiResponse::new(translation))))
}

/// DELETE /api/v1/translations/:key
#[axum::debug_handler]
pub async fn delete_translation(
    State(state): State<AppState>,
    Extension(auth): Extension<AdminAuth>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = TranslationRepository::new(state.pool.clone());
    let translation = repo
        .delete(&key)
        .await?
        .ok_or_else(|| ApiError::NotFound("Translation not found".to_string()))?;

    AuditLogRepository::new(state.pool.clone()).insert_async(audit::translation_deleted(
        Some(auth.user_id),
        auth.name.as_deref(),
        &translation,
    ));

    info!(user_id = %auth.user_id, key = %translation.key, "Translation deleted");

    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_message(translation, "Translation deleted")),
    ))
}

/// PUT /api/v1/translations/:key/languages/:languageCode
#[axum::debug_handler]
pub async fn set_translation_entry(
    State(state): State<AppState>,
    Extension(auth): Extension<AdminAuth>,
    Path((key, language_code)): Path<(String, String)>,
    Json(payload): Json<SetEntryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;

    let actor = auth.actor();
    let repo = TranslationRepository::new(state.pool.clone());
    let outcome = repo
        .set_entry(
            &key,
            &language_code,
            &payload.text,
            payload.resolved_status(),
            payload.needs_review.unwrap_or(false),
            payload.auto_translated.unwrap_or(false),
            Some(actor.as_str()),
        )
        .await?;

    let entry = match outcome {
        EntryWriteOutcome::Saved(entry) => entry,
        EntryWriteOutcome::UnknownKey => {
            return Err(ApiError::NotFound("Translation key not found".to_string()));
        }
        EntryWriteOutcome::LanguageUnavailable => {
            return Err(ApiError::NotFound(
                "Language not found or not enabled".to_string(),
            ));
        }
    };

    AuditLogRepository::new(state.pool.clone()).insert_async(audit::entry_set(
        Some(auth.user_id),
        auth.name.as_deref(),
        &key,
        &entry.language_code,
        &entry,
    ));

    info!(
        user_id = %auth.user_id,
        key = %key,
        language_code = %entry.language_code,
        status = %entry.status,
        "Translation entry saved"
    );

    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(SetEntryOutcome {
            language_code: entry.language_code.clone(),
            key,
            entry,
        })),
    ))
}

/// POST /api/v1/translations/:key/languages/:languageCode/verify
#[axum::debug_handler]
pub async fn verify_translation_entry(
    State(state): State<AppState>,
    Extension(auth): Extension<AdminAuth>,
    Path((key, language_code)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let actor = auth.actor();
    let repo = TranslationRepository::new(state.pool.clone());
    let entry = repo
        .verify_entry(&key, &language_code, Some(actor.as_str()))
        .await?
        .ok_or_else(|| ApiError::NotFound("Translation entry not found".to_string()))?;

    AuditLogRepository::new(state.pool.clone()).insert_async(audit::entry_verified(
        Some(auth.user_id),
        auth.name.as_deref(),
        &key,
        &entry.language_code,
        &entry,
    ));

    info!(
        user_id = %auth.user_id,
        key = %key,
        language_code = %entry.language_code,
        "Translation entry verified"
    );

    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(SetEntryOutcome {
            language_code: entry.language_code.clone(),
            key,
            entry,
        })),
    ))
}

/// POST /api/v1/translations/import
///
/// Items are applied independently; the language's progress is refreshed once
/// after the whole batch.
#[axum::debug_handler]
pub async fn import_translations(
    State(state): State<AppState>,
    Extension(auth): Extension<AdminAuth>,
    Json(payload): Json<ImportTranslationsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;

    let language_repo = LanguageRepository::new(state.pool.clone());
    let language = language_repo
        .find_by_code(&payload.language_code)
        .await?
        .filter(|l| l.enabled)
        .ok_or_else(|| ApiError::NotFound("Language not found or not enabled".to_string()))?;

    let actor = auth.actor();
    let repo = TranslationRepository::new(state.pool.clone());
    let mut report = ImportReport::default();

    for item in &payload.translations {
        match repo
            .import_entry(
                &item.key,
                &language.code,
                &item.text,
                payload.overwrite,
                payload.verified,
                Some(actor.as_str()),
            )
            .await
        {
            Ok(ImportOutcome::Created) => report.created += 1,
            Ok(ImportOutcome::Updated) => report.updated += 1,
            Ok(ImportOutcome::Skipped) => report.skipped += 1,
            Ok(ImportOutcome::UnknownKey) => report.errors.push(ImportItemError {
                key: item.key.clone(),
                error: "Translation key not found".to_string(),
            }),
            Err(error) => {
                tracing::error!(key = %item.key, error = %error, "Import item failed");
                report.errors.push(ImportItemError {
                    key: item.key.clone(),
                    error: "Database error".to_string(),
                });
            }
        }
    }

    // one progress refresh for the whole batch
    language_repo.update_progress(&language.code).await?;

    AuditLogRepository::new(state.pool.clone()).insert_async(audit::translations_imported(
        Some(auth.user_id),
        auth.name.as_deref(),
        &language.code,
        &report,
    ));

    info!(
        user_id = %auth.user_id,
        language_code = %language.code,
        created = report.created,
        updated = report.updated,
        skipped = report.skipped,
        errors = report.errors.len(),
        "Translations imported"
    );

    Ok((StatusCode::OK, Json(ApiResponse::new(report))))
}

/// GET /api/v1/translations/export
///
/// Single-language exports resolve entry text per key (empty when missing);
/// the all-languages export nests every entry and is JSON only.
#[axum::debug_handler]
pub async fn export_translations(
    State(state): State<AppState>,
    Extension(auth): Extension<AdminAuth>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    let format = query.format.unwrap_or_default();
    let repo = TranslationRepository::new(state.pool.clone());

    let (body, count, scope) = match &query.language_code {
        Some(code) => {
            let language = LanguageRepository::new(state.pool.clone())
                .find_by_code(code)
                .await?
                .ok_or_else(|| ApiError::NotFound("Language not found".to_string()))?;

            let rows: Vec<ExportRow> = repo
                .export_rows(&language.code, query.category.as_deref())
                .await?
                .into_iter()
                .map(|r| ExportRow {
                    key: r.key,
                    category: r.category,
                    default_text: r.default_text,
                    translation: r.translation,
                    description: r.description,
                    context: r.context,
                })
                .collect();

            let body = match format {
                ExportFormat::Json => serde_json::to_string_pretty(&rows).map_err(|e| {
                    ApiError::Internal(format!("Export serialization failed: {}", e))
                })?,
                ExportFormat::Csv => generate_csv(&rows),
            };
            let count = rows.len();
            (body, count, Some(language.code))
        }
        None => {
            if format == ExportFormat::Csv {
                return Err(ApiError::validation("CSV export requires languageCode"));
            }

            let rows: Vec<ExportAllRow> = repo
                .list_active_with_entries(query.category.as_deref())
                .await?
                .into_iter()
                .map(|t| {
                    let translations = t
                        .entries
                        .iter()
                        .map(|e| (e.language_code.clone(), e.text.clone()))
                        .collect();
                    ExportAllRow {
                        key: t.key,
                        category: t.category,
                        default_text: t.default_text,
                        translations,
                        description: t.description,
                        context: t.context,
                    }
                })
                .collect();

            let body = serde_json::to_string_pretty(&rows)
                .map_err(|e| ApiError::Internal(format!("Export serialization failed: {}", e)))?;
            let count = rows.len();
            (body, count, None)
        }
    };

    AuditLogRepository::new(state.pool.clone()).insert_async(audit::translations_exported(
        Some(auth.user_id),
        auth.name.as_deref(),
        scope.as_deref(),
        &format.to_string(),
        count,
    ));

    info!(
        user_id = %auth.user_id,
        scope = scope.as_deref().unwrap_or("all"),
        format = %format,
        count,
        "Translations exported"
    );

    let content_type = match format {
        ExportFormat::Json => "application/json",
        ExportFormat::Csv => "text/csv; charset=utf-8",
    };
    let filename = format!(
        "translations_{}_{}.{}",
        scope.as_deref().unwrap_or("all"),
        Utc::now().format("%Y%m%d_%H%M%S"),
        format
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response())
}

/// GET /api/v1/translations/stats
#[axum::debug_handler]
pub async fn get_translation_stats(
    State(state): State<AppState>,
    Query(query): Query<TranslationStatsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = TranslationRepository::new(state.pool.clone());
    let (total, by_category) = repo.stats_totals().await?;

    let language_stats = match query.language_code.as_deref() {
        Some(code) => Some(repo.language_stats(code).await?),
        None => None,
    };

    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(TranslationStatsResponse {
            total,
            by_category,
            language_stats,
        })),
    ))
}

/// Quotes a CSV field when it contains a delimiter, quote, or newline.
fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Renders export rows as CSV with a UTF-8 BOM so spreadsheet tools detect
/// the encoding.
fn generate_csv(rows: &[ExportRow]) -> String {
    let mut csv = String::from("\u{FEFF}");
    csv.push_str("key,category,default_text,translation,description,context\n");
    for row in rows {
        csv.push_str(&format!(
            "{},{},{},{},{},{}\n",
            escape_csv(&row.key),
            escape_csv(&row.category),
            escape_csv(&row.default_text),
            escape_csv(&row.translation),
            escape_csv(row.description.as_deref().unwrap_or("")),
            escape_csv(row.context.as_deref().unwrap_or("")),
        ));
    }
    csv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_csv_plain() {
        assert_eq!(escape_csv("hello"), "hello");
    }

    #[test]
    fn test_escape_csv_comma() {
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
    }

    #[test]
    fn test_escape_csv_quotes() {
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_escape_csv_newline() {
        assert_eq!(escape_csv("line1\nline2"), "\"line1\nline2\"");
    }

    #[test]
    fn test_generate_csv_header_and_bom() {
        let rows = vec![ExportRow {
            key: "common.save".to_string(),
            category: "common".to_string(),
            default_text: "Save".to_string(),
            translation: "Speichern".to_string(),
            description: None,
            context: Some("Button, top right".to_string()),
        }];

        let csv = generate_csv(&rows);
        assert!(csv.starts_with('\u{FEFF}'));
        let without_bom = csv.trim_start_matches('\u{FEFF}');
        assert!(without_bom
            .starts_with("key,category,default_text,translation,description,context\n"));
        assert!(csv.contains("\"Button, top right\""));
    }

    #[test]
    fn test_generate_csv_empty() {
        let csv = generate_csv(&[]);
        assert_eq!(
            csv,
            "\u{FEFF}key,category,default_text,translation,description,context\n"
        );
    }
}
