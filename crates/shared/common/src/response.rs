//! Response envelope shared by every endpoint.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::pagination::PageMeta;

/// Outcome marker carried in every envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Error details (safe to return to client)
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            data: Some(data),
            meta: None,
            error: None,
        }
    }

    pub fn paginated(data: T, meta: PageMeta) -> Self {
        Self {
            status: ResponseStatus::Success,
            data: Some(data),
            meta: Some(meta),
            error: None,
        }
    }

    pub fn error(error: ErrorBody) -> Self {
        Self {
            status: ResponseStatus::Error,
            data: None,
            meta: None,
            error: Some(error),
        }
    }
}

/// Message-only payload
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Created response helper
pub struct Created<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(ApiResponse::success(self.0))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_omits_empty_parts() {
        let body = serde_json::to_value(ApiResponse::success(MessageResponse::new("ok"))).unwrap();
        assert_eq!(body, json!({"status": "success", "data": {"message": "ok"}}));
    }

    #[test]
    fn test_error_envelope() {
        let body = serde_json::to_value(ApiResponse::<()>::error(ErrorBody {
            code: "NOT_FOUND".to_string(),
            message: "user 'x' doesn't exist".to_string(),
        }))
        .unwrap();

        assert_eq!(body["status"], "error");
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert!(body.get("data").is_none());
    }
}
