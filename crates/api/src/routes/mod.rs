//! HTTP route handlers.

pub mod audit_logs;
pub mod health;
pub mod languages;
pub mod settings;
pub mod translations;

use domain::models::Pagination;
use serde::Serialize;

/// Standard success envelope for single-object responses.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
        }
    }
}

/// Success envelope for paginated list responses.
#[derive(Debug, Serialize)]
pub struct PagedResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> PagedResponse<T> {
    pub fn new(data: Vec<T>, pagination: Pagination) -> Self {
        Self {
            success: true,
            data,
            pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_omits_absent_message() {
        let body = serde_json::to_value(ApiResponse::new(42)).unwrap();
        assert_eq!(body, serde_json::json!({"success": true, "data": 42}));
    }

    #[test]
    fn test_api_response_with_message() {
        let body = serde_json::to_value(ApiResponse::with_message(1, "Created")).unwrap();
        assert_eq!(body["success"], serde_json::json!(true));
        assert_eq!(body["message"], "Created");
        assert_eq!(body["data"], 1);
    }

    #[test]
    fn test_paged_response_shape() {
        let body =
            serde_json::to_value(PagedResponse::new(vec!["a", "b"], Pagination::new(1, 50, 2)))
                .unwrap();
        assert_eq!(body["success"], serde_json::json!(true));
        assert_eq!(body["data"], serde_json::json!(["a", "b"]));
        assert_eq!(body["pagination"]["total"], 2);
        assert_eq!(body["pagination"]["pages"], 1);
    }
}
