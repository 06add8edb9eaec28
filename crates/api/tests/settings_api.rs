//! Integration tests for the settings endpoints.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_upsert_creates_then_updates() {
    let Some(pool) = common::create_test_pool().await else {
        return;
    };
    let _guard = common::DB_LOCK.lock().await;
    common::run_migrations(&pool).await;
    common::cleanup_all_test_data(&pool).await;

    let config = common::test_config();
    let app = common::create_test_app(config.clone(), pool.clone());
    let token = common::admin_token(&config);

    // First write creates the record at version 1
    let request = common::json_request_with_auth(
        Method::PUT,
        "/api/v1/settings/general/site_name",
        json!({"value": "Shoply", "type": "string", "isPublic": true}),
        &token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::parse_response_body(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["key"], "site_name");
    assert_eq!(body["data"]["category"], "general");
    assert_eq!(body["data"]["value"], "Shoply");
    assert_eq!(body["data"]["version"], 1);

    // Second write bumps the per-record version
    let request = common::json_request_with_auth(
        Method::PUT,
        "/api/v1/settings/general/site_name",
        json!({"value": "Shoply Store"}),
        &token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::parse_response_body(response).await;
    assert_eq!(body["data"]["value"], "Shoply Store");
    assert_eq!(body["data"]["version"], 2);
}

#[tokio::test]
async fn test_upsert_rejects_type_mismatch() {
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
        "/api/v1/settings/general/max_items",
        json!({"value": "not a number", "type": "number"}),
        &token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::parse_response_body(response).await;
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_non_public_setting_hidden_from_anonymous() {
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
        "/api/v1/settings/payments/api_endpoint",
        json!({"value": "https://internal.example.com", "isPublic": false}),
        &token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Anonymous caller cannot tell the record apart from a missing one
    let response = app
        .clone()
        .oneshot(common::get_request("/api/v1/settings/payments/api_endpoint"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Admin sees it
    let response = app
        .clone()
        .oneshot(common::get_request_with_auth(
            "/api/v1/settings/payments/api_endpoint",
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_encrypted_setting_masked_for_anonymous() {
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
        "/api/v1/settings/integrations/webhook_secret",
        json!({"value": "sk_live_abcdef123456", "isPublic": true, "encrypted": true}),
        &token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::parse_response_body(response).await;
    // Admin response carries the clear value plus the mask
    assert_eq!(body["data"]["value"], "sk_live_abcdef123456");
    assert_eq!(body["data"]["maskedValue"], "sk_l****************");

    // Anonymous caller only ever sees the mask
    let response = app
        .clone()
        .oneshot(common::get_request(
            "/api/v1/settings/integrations/webhook_secret",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::parse_response_body(response).await;
    assert_eq!(body["data"]["value"], "sk_l****************");
    assert!(body["data"].get("maskedValue").is_none());
}

#[tokio::test]
async fn test_list_respects_public_only_for_anonymous() {
    let Some(pool) = common::create_test_pool().await else {
        return;
    };
    let _guard = common::DB_LOCK.lock().await;
    common::run_migrations(&pool).await;
    common::cleanup_all_test_data(&pool).await;

    let config = common::test_config();
    let app = common::create_test_app(config.clone(), pool.clone());
    let token = common::admin_token(&config);

    for (key, public) in [("public_flag", true), ("private_flag", false)] {
        let request = common::json_request_with_auth(
            Method::PUT,
            &format!("/api/v1/settings/general/{}", key),
            json!({"value": true, "isPublic": public}),
            &token,
        );
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(common::get_request("/api/v1/settings"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::parse_response_body(response).await;
    let keys: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["key"].as_str().unwrap().to_string())
        .collect();
    assert!(keys.contains(&"public_flag".to_string()));
    assert!(!keys.contains(&"private_flag".to_string()));

    // Admin default listing includes both
    let response = app
        .clone()
        .oneshot(common::get_request_with_auth("/api/v1/settings", &token))
        .await
        .unwrap();
    let body = common::parse_response_body(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_version_token_changes_on_write() {
    let Some(pool) = common::create_test_pool().await else {
        return;
    };
    let _guard = common::DB_LOCK.lock().await;
    common::run_migrations(&pool).await;
    common::cleanup_all_test_data(&pool).await;

    let config = common::test_config();
    let app = common::create_test_app(config.clone(), pool.clone());
    let token = common::admin_token(&config);

    let response = app
        .clone()
        .oneshot(common::get_request("/api/v1/settings/version"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let before = common::parse_response_body(response).await;
    assert_eq!(before["data"]["count"], 0);

    let request = common::json_request_with_auth(
        Method::PUT,
        "/api/v1/settings/general/site_name",
        json!({"value": "Shoply"}),
        &token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(common::get_request("/api/v1/settings/version"))
        .await
        .unwrap();
    let after = common::parse_response_body(response).await;
    assert_eq!(after["data"]["count"], 1);
    assert_ne!(after["data"]["version"], before["data"]["version"]);

    // Unchanged data keeps the token stable
    let response = app
        .clone()
        .oneshot(common::get_request("/api/v1/settings/version"))
        .await
        .unwrap();
    let again = common::parse_response_body(response).await;
    assert_eq!(again["data"]["version"], after["data"]["version"]);
}

#[tokio::test]
async fn test_delete_is_soft_and_drops_from_version() {
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
        "/api/v1/settings/general/obsolete",
        json!({"value": 1, "isPublic": true}),
        &token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(common::delete_request_with_auth(
            "/api/v1/settings/general/obsolete",
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::parse_response_body(response).await;
    assert_eq!(body["message"], "Setting deleted");

    // Gone from reads and from the aggregate version
    let response = app
        .clone()
        .oneshot(common::get_request_with_auth(
            "/api/v1/settings/general/obsolete",
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(common::get_request("/api/v1/settings/version"))
        .await
        .unwrap();
    let version = common::parse_response_body(response).await;
    assert_eq!(version["data"]["count"], 0);

    // A later upsert revives the key with its version history intact
    let request = common::json_request_with_auth(
        Method::PUT,
        "/api/v1/settings/general/obsolete",
        json!({"value": 2}),
        &token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::parse_response_body(response).await;
    assert!(body["data"]["version"].as_i64().unwrap() > 1);
}

#[tokio::test]
async fn test_bulk_update_applies_items_independently() {
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
        "/api/v1/settings/bulk",
        json!({"settings": [
            {"key": "site_name", "value": "Shoply"},
            {"key": "max_upload_mb", "value": 50, "category": "media"},
            {"key": "bad_item", "value": "text", "type": "number"}
        ]}),
        &token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::parse_response_body(response).await;
    assert_eq!(body["data"]["created"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["updated"].as_array().unwrap().len(), 0);
    assert_eq!(body["data"]["failed"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["failed"][0]["key"], "bad_item");

    // The healthy items landed despite the bad one
    let response = app
        .clone()
        .oneshot(common::get_request_with_auth(
            "/api/v1/settings/media/max_upload_mb",
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_writes_require_admin_token() {
    let Some(pool) = common::create_test_pool().await else {
        return;
    };
    let _guard = common::DB_LOCK.lock().await;
    common::run_migrations(&pool).await;
    common::cleanup_all_test_data(&pool).await;

    let config = common::test_config();
    let app = common::create_test_app(config.clone(), pool.clone());

    // No token
    let request = common::json_request(
        Method::PUT,
        "/api/v1/settings/general/site_name",
        json!({"value": "x"}),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Valid token with a non-admin role
    let user_token = common::token_for_role(&config, "editor", None);
    let request = common::json_request_with_auth(
        Method::PUT,
        "/api/v1/settings/general/site_name",
        json!({"value": "x"}),
        &user_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_category_is_not_found() {
    let Some(pool) = common::create_test_pool().await else {
        return;
    };
    let _guard = common::DB_LOCK.lock().await;
    common::run_migrations(&pool).await;
    common::cleanup_all_test_data(&pool).await;

    let config = common::test_config();
    let app = common::create_test_app(config.clone(), pool.clone());
    let token = common::admin_token(&config);

    let response = app
        .clone()
        .oneshot(common::get_request_with_auth(
            "/api/v1/settings/bogus/site_name",
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Writing to an unknown category is a validation error, not a 404
    let request = common::json_request_with_auth(
        Method::PUT,
        "/api/v1/settings/bogus/site_name",
        json!({"value": "x"}),
        &token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
