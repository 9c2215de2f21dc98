use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::user_input::InputError;

/// Shown when the report could not be produced at all. The client returns
/// the user to the input form with this message.
pub const REPORT_UNAVAILABLE_MESSAGE: &str = "결과를 생성하는 데 실패했습니다. \
    AI 모델이 응답하지 않았거나 네트워크 문제가 발생했을 수 있습니다. 잠시 후 다시 시도해 주세요.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Report unavailable: {0}")]
    ReportUnavailable(String),
}

impl From<InputError> for AppError {
    fn from(e: InputError) -> Self {
        let message = e.to_string();
        match e {
            InputError::PhotoTooLarge { .. } => AppError::PayloadTooLarge(message),
            _ => AppError::Validation(message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                msg.clone(),
            ),
            AppError::ReportUnavailable(msg) => {
                tracing::error!("Report unavailable: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "REPORT_UNAVAILABLE",
                    REPORT_UNAVAILABLE_MESSAGE.to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
