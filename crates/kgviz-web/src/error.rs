//! HTTP error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kgviz_core::VizError;
use serde_json::json;

/// An error rendered as `{"detail": message}` with an HTTP status.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, detail)
    }
}

impl From<VizError> for ApiError {
    fn from(err: VizError) -> Self {
        let status = match &err {
            VizError::Validation(_) | VizError::Json(_) => StatusCode::BAD_REQUEST,
            VizError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
            VizError::Query(_) | VizError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}
