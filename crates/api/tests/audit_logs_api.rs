//! Integration tests for the audit log listing endpoint.
//!
//! Audit entries are written by a spawned task after the mutation response is
//! sent, so these tests poll the listing endpoint until the expected rows show
//! up instead of asserting right after the mutation.

mod common;

use axum::http::{Method, StatusCode};
use axum::Router;
use serde_json::json;
use std::time::Duration;
use tower::ServiceExt;

/// Poll the audit listing until `data` holds at least `min` rows.
async fn wait_for_audit_rows(
    app: &Router,
    token: &str,
    query: &str,
    min: usize,
) -> serde_json::Value {
    let uri = format!("/api/v1/audit-logs{}", query);
    for _ in 0..40 {
        let response = app
            .clone()
            .oneshot(common::get_request_with_auth(&uri, token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = common::parse_response_body(response).await;
        if body["data"].as_array().map(|rows| rows.len()).unwrap_or(0) >= min {
            return body;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("audit rows did not appear for {}", uri);
}

#[tokio::test]
async fn test_audit_listing_requires_admin() {
    let Some(pool) = common::create_test_pool().await else {
        return;
    };
    let _guard = common::DB_LOCK.lock().await;
    common::run_migrations(&pool).await;
    common::cleanup_all_test_data(&pool).await;

    let config = common::test_config();
    let app = common::create_test_app(config.clone(), pool.clone());

    let response = app
        .clone()
        .oneshot(common::get_request("/api/v1/audit-logs"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = common::parse_response_body(response).await;
    assert_eq!(body["error"], "unauthorized");

    let editor = common::token_for_role(&config, "editor", Some("Test Editor"));
    let response = app
        .clone()
        .oneshot(common::get_request_with_auth("/api/v1/audit-logs", &editor))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_language_create_appends_audit_entry() {
    let Some(pool) = common::create_test_pool().await else {
        return;
    };
    let _guard = common::DB_LOCK.lock().await;
    common::run_migrations(&pool).await;
    common::cleanup_all_test_data(&pool).await;

    let config = common::test_config();
    let app = common::create_test_app(config.clone(), pool.clone());
    let token = common::admin_token(&config);

    common::create_test_language(&app, &token, "de", "German").await;

    let body = wait_for_audit_rows(&app, &token, "", 1).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["limit"], 50);
    assert_eq!(body["pagination"]["total"], 1);

    let entry = &body["data"][0];
    assert_eq!(entry["entityType"], "language");
    assert_eq!(entry["entityId"], "DE");
    assert_eq!(entry["action"], "create");
    assert_eq!(entry["severity"], "medium");
    assert_eq!(entry["userName"], "Test Admin");
    assert_eq!(entry["description"], "Created language: German (DE)");
    assert_eq!(entry["newValue"]["code"], "DE");
    assert!(entry["userId"].is_string());
    assert!(entry["createdAt"].is_string());
}

#[tokio::test]
async fn test_audit_filters_narrow_results() {
    let Some(pool) = common::create_test_pool().await else {
        return;
    };
    let _guard = common::DB_LOCK.lock().await;
    common::run_migrations(&pool).await;
    common::cleanup_all_test_data(&pool).await;

    let config = common::test_config();
    let app = common::create_test_app(config.clone(), pool.clone());
    let token = common::admin_token(&config);

    common::create_test_language(&app, &token, "de", "German").await;
    common::create_test_translation(&app, &token, "common.save", "Save").await;

    let request = common::json_request_with_auth(
        Method::PUT,
        "/api/v1/translations/common.save/languages/de",
        json!({"text": "Speichern"}),
        &token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(common::post_request_with_auth(
            "/api/v1/languages/de/publish",
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Only the publish entry matches this filter pair
    let body =
        wait_for_audit_rows(&app, &token, "?entityType=language&action=publish", 1).await;
    assert_eq!(body["pagination"]["total"], 1);
    let entry = &body["data"][0];
    assert_eq!(entry["entityId"], "DE");
    assert_eq!(entry["severity"], "medium");
    assert_eq!(entry["description"], "Published language pack: DE (v2)");
    assert_eq!(entry["newValue"]["version"], 2);

    // Nothing was deleted in this scenario
    let response = app
        .clone()
        .oneshot(common::get_request_with_auth(
            "/api/v1/audit-logs?action=delete",
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::parse_response_body(response).await;
    assert_eq!(body["pagination"]["total"], 0);
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    // Entity scoping splits the language rows from the translation rows
    let body = wait_for_audit_rows(&app, &token, "?entityType=translation", 1).await;
    for entry in body["data"].as_array().unwrap() {
        assert_eq!(entry["entityType"], "translation");
    }
}

#[tokio::test]
async fn test_setting_audit_create_then_update() {
    let Some(pool) = common::create_test_pool().await else {
        return;
    };
    let _guard = common::DB_LOCK.lock().await;
    common::run_migrations(&pool).await;
    common::cleanup_all_test_data(&pool).await;

    let config = common::test_config();
    let app = common::create_test_app(config.clone(), pool.clone());
    let token = common::admin_token(&config);

    let request = common::json_request_with_auth(
        Method::PUT,
        "/api/v1/settings/general/app_name",
        json!({"value": "Foo", "type": "string"}),
        &token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = common::json_request_with_auth(
        Method::PUT,
        "/api/v1/settings/general/app_name",
        json!({"value": "Bar"}),
        &token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Two writes leave one create and one update entry
    let body =
        wait_for_audit_rows(&app, &token, "?entityType=setting&entityId=app_name", 2).await;
    assert_eq!(body["pagination"]["total"], 2);
    let rows = body["data"].as_array().unwrap();

    let update = rows.iter().find(|r| r["action"] == "update").unwrap();
    assert_eq!(update["severity"], "low");
    assert_eq!(update["description"], "Updated setting: app_name");
    assert_eq!(update["newValue"]["value"], "Bar");
    assert_eq!(update["newValue"]["version"], 2);

    let create = rows.iter().find(|r| r["action"] == "create").unwrap();
    assert_eq!(create["severity"], "medium");
    assert_eq!(create["description"], "Created setting: app_name");
    assert_eq!(create["newValue"]["value"], "Foo");
    assert_eq!(create["newValue"]["version"], 1);

    // The listing itself comes back newest first
    let first = chrono::DateTime::parse_from_rfc3339(rows[0]["createdAt"].as_str().unwrap());
    let second = chrono::DateTime::parse_from_rfc3339(rows[1]["createdAt"].as_str().unwrap());
    assert!(first.unwrap() >= second.unwrap());
}

#[tokio::test]
async fn test_audit_pagination_and_time_filters() {
    let Some(pool) = common::create_test_pool().await else {
        return;
    };
    let _guard = common::DB_LOCK.lock().await;
    common::run_migrations(&pool).await;
    common::cleanup_all_test_data(&pool).await;

    let config = common::test_config();
    let app = common::create_test_app(config.clone(), pool.clone());
    let token = common::admin_token(&config);

    common::create_test_language(&app, &token, "de", "German").await;
    common::create_test_language(&app, &token, "fr", "French").await;
    common::create_test_language(&app, &token, "es", "Spanish").await;

    wait_for_audit_rows(&app, &token, "?entityType=language", 3).await;

    let response = app
        .clone()
        .oneshot(common::get_request_with_auth(
            "/api/v1/audit-logs?entityType=language&limit=2&page=1",
            &token,
        ))
        .await
        .unwrap();
    let body = common::parse_response_body(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["limit"], 2);
    assert_eq!(body["pagination"]["total"], 3);
    assert_eq!(body["pagination"]["pages"], 2);

    let response = app
        .clone()
        .oneshot(common::get_request_with_auth(
            "/api/v1/audit-logs?entityType=language&limit=2&page=2",
            &token,
        ))
        .await
        .unwrap();
    let body = common::parse_response_body(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // A cutoff in the past excludes everything
    let response = app
        .clone()
        .oneshot(common::get_request_with_auth(
            "/api/v1/audit-logs?to=2000-01-01T00:00:00Z",
            &token,
        ))
        .await
        .unwrap();
    let body = common::parse_response_body(response).await;
    assert_eq!(body["pagination"]["total"], 0);

    let response = app
        .clone()
        .oneshot(common::get_request_with_auth(
            "/api/v1/audit-logs?from=2000-01-01T00:00:00Z&severity=medium",
            &token,
        ))
        .await
        .unwrap();
    let body = common::parse_response_body(response).await;
    assert_eq!(body["pagination"]["total"], 3);
}
