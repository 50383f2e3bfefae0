//! HTTP error handling
//!
//! Provides the consistent JSON error body every endpoint returns on
//! failure, and the mapping from catalog errors onto it.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

use vitrine_core::services::CatalogError;
use vitrine_core::store::StoreError;

/// HTTP error response body
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpError {
    /// User-facing error message
    pub message: String,
    /// Machine-readable error code
    pub code: String,
    /// Optional detailed error information for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl HttpError {
    /// Create a new HTTP error
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            details: None,
        }
    }

    /// Create a new HTTP error with details
    pub fn with_details(
        message: impl Into<String>,
        code: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            details: Some(details.into()),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = match self.code.as_str() {
            "ITEM_NOT_FOUND" => StatusCode::NOT_FOUND,
            "INVALID_INPUT" | "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
            "INVALID_CREDENTIALS" => StatusCode::UNAUTHORIZED,
            "STORE_QUOTA_EXCEEDED" => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self)).into_response()
    }
}

impl From<CatalogError> for HttpError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::ItemNotFound { id } => {
                HttpError::new(format!("Content item not found: {}", id), "ITEM_NOT_FOUND")
            }
            CatalogError::ValidationFailed(source) => {
                HttpError::new(source.to_string(), "VALIDATION_ERROR")
            }
            CatalogError::StoreFailed(StoreError::QuotaExceeded { need, limit }) => {
                HttpError::with_details(
                    "Content exceeds the storage quota",
                    "STORE_QUOTA_EXCEEDED",
                    format!("need: {} bytes, limit: {} bytes", need, limit),
                )
            }
            CatalogError::StoreFailed(source) => {
                HttpError::new(source.to_string(), "STORE_ERROR")
            }
            CatalogError::InvalidReorder(message) => {
                HttpError::new(format!("Invalid reorder: {}", message), "INVALID_INPUT")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::models::ValidationError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            ("ITEM_NOT_FOUND", StatusCode::NOT_FOUND),
            ("VALIDATION_ERROR", StatusCode::BAD_REQUEST),
            ("INVALID_INPUT", StatusCode::BAD_REQUEST),
            ("INVALID_CREDENTIALS", StatusCode::UNAUTHORIZED),
            ("STORE_QUOTA_EXCEEDED", StatusCode::UNPROCESSABLE_ENTITY),
            ("STORE_ERROR", StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (code, expected) in cases {
            let response = HttpError::new("boom", code).into_response();
            assert_eq!(response.status(), expected, "code {}", code);
        }
    }

    #[test]
    fn test_catalog_errors_map_to_codes() {
        let not_found = CatalogError::item_not_found("abc");
        assert_eq!(HttpError::from(not_found).code, "ITEM_NOT_FOUND");

        let validation =
            CatalogError::ValidationFailed(ValidationError::MissingField("title".to_string()));
        assert_eq!(HttpError::from(validation).code, "VALIDATION_ERROR");

        let quota = CatalogError::StoreFailed(StoreError::QuotaExceeded {
            need: 11,
            limit: 10,
        });
        let http = HttpError::from(quota);
        assert_eq!(http.code, "STORE_QUOTA_EXCEEDED");
        assert!(http.details.unwrap().contains("11"));

        let reorder = CatalogError::invalid_reorder("expected 3 ids, got 2");
        assert_eq!(HttpError::from(reorder).code, "INVALID_INPUT");
    }
}
