//! Admin JWT authentication middleware.
//!
//! Provides middleware for requiring admin or superadmin JWT authentication
//! on routes, plus an optional variant for endpoints that behave differently
//! for anonymous callers.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::app::AppState;
use crate::config::JwtAuthConfig;
use crate::error::ApiError;
use shared::jwt::JwtConfig;

/// Role claim values that grant access to the admin API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminRole {
    Admin,
    Superadmin,
}

impl AdminRole {
    pub fn parse(role: &str) -> Option<Self> {
        match role {
            "admin" => Some(AdminRole::Admin),
            "superadmin" => Some(AdminRole::Superadmin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::Admin => "admin",
            AdminRole::Superadmin => "superadmin",
        }
    }
}

/// Authenticated admin information extracted from JWT.
#[derive(Debug, Clone)]
pub struct AdminAuth {
    /// Admin user ID from the JWT subject claim.
    pub user_id: Uuid,
    /// Role parsed from the JWT role claim.
    pub role: AdminRole,
    /// Display name from the JWT, when present.
    pub name: Option<String>,
    /// JWT ID (jti) for session tracking.
    pub jti: String,
}

/// Why a token was rejected. Distinguishes a bad token (401) from a
/// valid token whose role does not grant admin access (403).
#[derive(Debug)]
pub enum AuthRejection {
    InvalidToken(String),
    NotAdmin(String),
}

impl AdminAuth {
    /// Validates an access token and returns admin authentication info.
    pub fn validate(jwt_config: &JwtConfig, token: &str) -> Result<Self, AuthRejection> {
        let claims = jwt_config
            .validate_access_token(token)
            .map_err(|e| AuthRejection::InvalidToken(format!("Invalid token: {}", e)))?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AuthRejection::InvalidToken("Invalid user ID in token".to_string()))?;

        let role = match AdminRole::parse(&claims.role) {
            Some(role) => role,
            None => return Err(AuthRejection::NotAdmin(claims.role)),
        };

        Ok(AdminAuth {
            user_id,
            role,
            name: claims.name,
            jti: claims.jti,
        })
    }

    /// Creates a JwtConfig from JwtAuthConfig.
    pub fn create_jwt_config(config: &JwtAuthConfig) -> Result<JwtConfig, String> {
        JwtConfig::new(
            &config.private_key,
            &config.public_key,
            config.access_token_expiry_secs,
            config.leeway_secs,
        )
        .map_err(|e| format!("Failed to initialize JWT config: {}", e))
    }

    /// Identity string recorded in `modified_by` columns and audit entries.
    pub fn actor(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.user_id.to_string())
    }
}

fn bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// Full token check shared by the mandatory-auth middlewares. On failure
/// the ready-to-send rejection response is returned instead.
fn authenticate(state: &AppState, req: &Request<Body>) -> Result<AdminAuth, Response> {
    let token = bearer_token(req).ok_or_else(|| {
        ApiError::Unauthorized("Missing or invalid Authorization header".into()).into_response()
    })?;

    let jwt_config = AdminAuth::create_jwt_config(&state.config.jwt).map_err(|e| {
        tracing::error!("Failed to create JWT config: {}", e);
        ApiError::ServiceUnavailable("Authentication service unavailable".into()).into_response()
    })?;

    AdminAuth::validate(&jwt_config, token).map_err(|rejection| match rejection {
        AuthRejection::NotAdmin(role) => {
            tracing::debug!(role = %role, "Rejected token without admin role");
            ApiError::Forbidden("Admin access required".into()).into_response()
        }
        AuthRejection::InvalidToken(e) => {
            tracing::debug!("JWT validation failed: {}", e);
            ApiError::Unauthorized("Invalid or expired token".into()).into_response()
        }
    })
}

/// Middleware that requires an admin or superadmin JWT.
///
/// Validates the Bearer token in the Authorization header and rejects
/// requests without one. A valid token carrying a non-admin role is
/// rejected with 403 rather than 401. Authenticated admin information
/// is stored in request extensions for use by downstream handlers.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    match authenticate(&state, &req) {
        Ok(auth) => {
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Err(rejection) => rejection,
    }
}

/// Middleware that requires a superadmin JWT.
///
/// Same contract as [`require_admin`] but an ordinary admin token is
/// rejected with 403. Used for destructive routes.
pub async fn require_superadmin(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    match authenticate(&state, &req) {
        Ok(auth) if auth.role == AdminRole::Superadmin => {
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Ok(auth) => {
            tracing::debug!(role = auth.role.as_str(), "Rejected non-superadmin token");
            ApiError::Forbidden("Superadmin access required".into()).into_response()
        }
        Err(rejection) => rejection,
    }
}

/// Middleware that optionally validates an admin JWT.
///
/// Attempts to validate the Bearer token if present, but allows the
/// request to proceed anonymously when the header is absent, the token
/// is invalid, or the role is not an admin role. Handlers use the
/// presence of `AdminAuth` in extensions to widen their response.
pub async fn optional_admin(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(&req) {
        if let Ok(jwt_config) = AdminAuth::create_jwt_config(&state.config.jwt) {
            if let Ok(auth) = AdminAuth::validate(&jwt_config, token) {
                req.extensions_mut().insert(auth);
            }
        }
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_role_parse() {
        assert_eq!(AdminRole::parse("admin"), Some(AdminRole::Admin));
        assert_eq!(AdminRole::parse("superadmin"), Some(AdminRole::Superadmin));
        assert_eq!(AdminRole::parse("user"), None);
        assert_eq!(AdminRole::parse(""), None);
        assert_eq!(AdminRole::parse("Admin"), None);
    }

    #[test]
    fn test_admin_role_as_str() {
        assert_eq!(AdminRole::Admin.as_str(), "admin");
        assert_eq!(AdminRole::Superadmin.as_str(), "superadmin");
    }

    #[test]
    fn test_bearer_token_extraction() {
        let req = Request::builder()
            .header(header::AUTHORIZATION, "Bearer abc123")
            .body(Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&req), Some("abc123"));

        let req = Request::builder()
            .header(header::AUTHORIZATION, "Basic abc123")
            .body(Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&req), None);

        let req = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(bearer_token(&req), None);
    }

    #[test]
    fn test_actor_prefers_name() {
        let auth = AdminAuth {
            user_id: Uuid::new_v4(),
            role: AdminRole::Admin,
            name: Some("Alice Admin".to_string()),
            jti: "test_jti".to_string(),
        };
        assert_eq!(auth.actor(), "Alice Admin");
    }

    #[test]
    fn test_actor_falls_back_to_user_id() {
        let user_id = Uuid::new_v4();
        let auth = AdminAuth {
            user_id,
            role: AdminRole::Superadmin,
            name: None,
            jti: "test_jti".to_string(),
        };
        assert_eq!(auth.actor(), user_id.to_string());
    }

    #[test]
    fn test_create_jwt_config_rejects_garbage_keys() {
        let config = JwtAuthConfig {
            private_key: "not a pem".to_string(),
            public_key: "not a pem".to_string(),
            access_token_expiry_secs: 3600,
            leeway_secs: 30,
        };
        assert!(AdminAuth::create_jwt_config(&config).is_err());
    }
}
