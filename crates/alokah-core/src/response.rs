//! JSON response envelope.
//!
//! Every handler outcome is shaped as `{success, message, ...data}` so web and
//! mobile clients can branch on a single boolean before touching the payload.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Success envelope. Failures are produced by the service error types, which
/// render the same shape with `success: false`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize = serde_json::Value> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 envelope with no payload.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            status: StatusCode::OK,
        }
    }

    /// 201 envelope with no payload.
    pub fn created(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            status: StatusCode::CREATED,
        }
    }

    /// Attach a payload under `data`.
    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}
