use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use domain::services::{EventPublisher, TracingEventPublisher};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, optional_admin, rate_limit_middleware, require_admin,
    require_superadmin, security_headers_middleware, trace_id, RateLimiterState,
};
use crate::routes::{audit_logs, health, languages, settings, translations};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub events: Arc<dyn EventPublisher>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    create_app_with_events(config, pool, Arc::new(TracingEventPublisher::new()))
}

/// Build the router with an explicit event publisher.
///
/// Tests swap in a mock publisher to assert on published events.
pub fn create_app_with_events(
    config: Config,
    pool: PgPool,
    events: Arc<dyn EventPublisher>,
) -> Router {
    let config = Arc::new(config);

    // Create rate limiter if rate limiting is enabled (rate_limit_per_minute > 0)
    let rate_limiter = if config.security.rate_limit_per_minute > 0 {
        Some(Arc::new(RateLimiterState::new(
            config.security.rate_limit_per_minute,
        )))
    } else {
        None
    };

    let state = AppState {
        pool,
        config: config.clone(),
        events,
        rate_limiter,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Content routes consumed by end-user clients (no authentication)
    let content_routes = Router::new()
        .route(
            "/api/v1/languages/default",
            get(languages::get_default_language),
        )
        .route(
            "/api/v1/languages/packs/:language_code",
            get(languages::get_language_pack),
        )
        .route("/api/v1/languages/:code", get(languages::get_language))
        .route(
            "/api/v1/settings/version",
            get(settings::get_settings_version),
        );

    // Listing routes return more to admins than to anonymous callers,
    // so the token is decoded when present but never required
    let mixed_routes = Router::new()
        .route("/api/v1/languages", get(languages::list_languages))
        .route("/api/v1/settings", get(settings::list_settings))
        .route(
            "/api/v1/settings/:category/:key",
            get(settings::get_setting),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            optional_admin,
        ));

    // Admin routes (require a JWT with the admin or superadmin role)
    // Middleware order: auth runs first, then rate limiting (which keys on the user id)
    let admin_routes = Router::new()
        .route("/api/v1/languages", post(languages::create_language))
        .route("/api/v1/languages/:code", put(languages::update_language))
        .route(
            "/api/v1/languages/:code/publish",
            post(languages::publish_language),
        )
        .route(
            "/api/v1/languages/:code/update-progress",
            post(languages::update_language_progress),
        )
        .route(
            "/api/v1/settings/categories",
            get(settings::list_setting_categories),
        )
        .route("/api/v1/settings/bulk", put(settings::bulk_update_settings))
        .route(
            "/api/v1/settings/:category/:key",
            put(settings::upsert_setting).delete(settings::delete_setting),
        )
        .route(
            "/api/v1/translations",
            get(translations::list_translations).post(translations::create_translation),
        )
        .route(
            "/api/v1/translations/import",
            post(translations::import_translations),
        )
        .route(
            "/api/v1/translations/export",
            get(translations::export_translations),
        )
        .route(
            "/api/v1/translations/stats",
            get(translations::get_translation_stats),
        )
        .route(
            "/api/v1/translations/:key",
            get(translations::get_translation).put(translations::update_translation),
        )
        .route(
            "/api/v1/translations/:key/languages/:language_code",
            put(translations::set_translation_entry),
        )
        .route(
            "/api/v1/translations/:key/languages/:language_code/verify",
            post(translations::verify_translation_entry),
        )
        .route("/api/v1/audit-logs", get(audit_logs::list_audit_logs))
        // Rate limiting runs after auth (keys on the authenticated user)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        // Auth runs first (outermost layer = runs first)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    // Hard deletes require the superadmin role
    let superadmin_routes = Router::new()
        .route("/api/v1/languages/:code", delete(languages::delete_language))
        .route(
            "/api/v1/translations/:key",
            delete(translations::delete_translation),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_superadmin,
        ));

    // Operational routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(content_routes)
        .merge(mixed_routes)
        .merge(admin_routes)
        .merge(superadmin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware)) // Security headers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware)) // Prometheus metrics
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id)) // Request ID and logging
        .layer(cors)
        .with_state(state)
}
