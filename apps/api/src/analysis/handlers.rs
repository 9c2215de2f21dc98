//! Axum route handlers for the Report API.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use tracing::info;

use crate::analysis::orchestrator::get_report;
use crate::analysis::view::ReportView;
use crate::errors::AppError;
use crate::models::user_input::{
    normalize_birth_time, parse_birth_date, InputError, PhotoDataUri, ReportRequest, UserInput,
};
use crate::state::AppState;

/// Used when an uploaded photo part carries no content type.
const DEFAULT_PHOTO_MIME: &str = "image/jpeg";

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/report
///
/// Validates the submission and runs the full report pipeline.
/// Individual task failures still yield 200 with partial sections.
pub async fn handle_create_report(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> Result<Json<ReportView>, AppError> {
    let input = UserInput::from_request(request, state.config.max_photo_bytes)?;
    build_report(&state, input).await
}

/// POST /api/v1/report/upload
///
/// Multipart variant: text fields `name`, `birthDate`, `birthTime`,
/// `birthLocation` and a file field `photo`.
pub async fn handle_upload_report(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ReportView>, AppError> {
    let mut name = None;
    let mut birth_date = None;
    let mut birth_time = None;
    let mut birth_location = None;
    let mut photo: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "photo" => {
                let mime = field
                    .content_type()
                    .unwrap_or(DEFAULT_PHOTO_MIME)
                    .to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                photo = Some((mime, data));
            }
            "name" => name = Some(field.text().await.map_err(multipart_error)?),
            "birthDate" => birth_date = Some(field.text().await.map_err(multipart_error)?),
            "birthTime" => birth_time = Some(field.text().await.map_err(multipart_error)?),
            "birthLocation" => {
                birth_location = Some(field.text().await.map_err(multipart_error)?)
            }
            _ => {}
        }
    }

    let (mime, data) =
        photo.ok_or_else(|| AppError::Validation("photo field is required".to_string()))?;
    let photo = PhotoDataUri::from_bytes(&mime, &data, state.config.max_photo_bytes)?;

    let input = UserInput {
        name: required("name", name)?,
        birth_date: parse_birth_date(&required("birthDate", birth_date)?)?,
        birth_time: normalize_birth_time(&required("birthTime", birth_time)?)?,
        birth_location: required("birthLocation", birth_location)?,
        photo,
    };

    build_report(&state, input).await
}

async fn build_report(state: &AppState, input: UserInput) -> Result<Json<ReportView>, AppError> {
    info!(
        "Report requested (birth_date={}, photo_type={})",
        input.birth_date_iso(),
        input.photo.mime_type()
    );

    let report = get_report(state.tasks.clone(), input)
        .await
        .map_err(|e| AppError::ReportUnavailable(e.to_string()))?;

    Ok(Json(ReportView::from(report)))
}

fn required(field: &'static str, value: Option<String>) -> Result<String, AppError> {
    let value = value.unwrap_or_default();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyField(field).into());
    }
    Ok(trimmed.to_string())
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("malformed multipart body: {}", e.body_text()))
    }
}
