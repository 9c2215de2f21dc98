//! The validated form submission a report is generated from.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("birthDate must be an ISO date (YYYY-MM-DD), got '{0}'")]
    InvalidBirthDate(String),

    #[error("birthTime must be HH:MM (24h), got '{0}'")]
    InvalidBirthTime(String),

    #[error("invalid photo: {0}")]
    InvalidPhoto(String),

    #[error("photo is {size} bytes; the limit is {max} bytes")]
    PhotoTooLarge { size: usize, max: usize },
}

/// Raw request body for `POST /api/v1/report`, before validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub name: String,
    pub birth_date: String,
    pub birth_time: String,
    pub birth_location: String,
    pub photo_data_uri: String,
}

/// A `data:<mime>;base64,<payload>` image, checked once at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoDataUri {
    raw: String,
    mime_type: String,
    data_offset: usize,
}

impl PhotoDataUri {
    /// Parses a data URI, rejecting non-images, non-base64 payloads and
    /// decoded sizes above `max_bytes`.
    pub fn parse(raw: String, max_bytes: usize) -> Result<Self, InputError> {
        let rest = raw
            .strip_prefix("data:")
            .ok_or_else(|| InputError::InvalidPhoto("expected a data: URI".to_string()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| InputError::InvalidPhoto("data URI has no payload".to_string()))?;

        let mut header_parts = header.split(';');
        let mime_type = header_parts.next().unwrap_or_default().trim().to_lowercase();
        if !header_parts.any(|p| p.trim() == "base64") {
            return Err(InputError::InvalidPhoto(
                "data URI must be base64-encoded".to_string(),
            ));
        }
        check_image_mime(&mime_type)?;

        let decoded = STANDARD
            .decode(payload.trim())
            .map_err(|e| InputError::InvalidPhoto(format!("payload is not valid base64: {e}")))?;
        if decoded.is_empty() {
            return Err(InputError::InvalidPhoto("photo is empty".to_string()));
        }
        if decoded.len() > max_bytes {
            return Err(InputError::PhotoTooLarge {
                size: decoded.len(),
                max: max_bytes,
            });
        }

        let data_offset = raw.len() - payload.len();
        Ok(Self {
            raw,
            mime_type,
            data_offset,
        })
    }

    /// Encodes an uploaded file as a data URI.
    pub fn from_bytes(mime_type: &str, bytes: &[u8], max_bytes: usize) -> Result<Self, InputError> {
        let mime_type = mime_type.trim().to_lowercase();
        check_image_mime(&mime_type)?;
        if bytes.is_empty() {
            return Err(InputError::InvalidPhoto("photo is empty".to_string()));
        }
        if bytes.len() > max_bytes {
            return Err(InputError::PhotoTooLarge {
                size: bytes.len(),
                max: max_bytes,
            });
        }

        let raw = format!("data:{mime_type};base64,{}", STANDARD.encode(bytes));
        let data_offset = raw.find(',').map_or(raw.len(), |i| i + 1);
        Ok(Self {
            raw,
            mime_type,
            data_offset,
        })
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn base64_data(&self) -> &str {
        self.raw[self.data_offset..].trim()
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Serialize for PhotoDataUri {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

fn check_image_mime(mime_type: &str) -> Result<(), InputError> {
    match mime_type.strip_prefix("image/") {
        Some(subtype) if !subtype.is_empty() => Ok(()),
        _ => Err(InputError::InvalidPhoto(format!(
            "expected an image/* MIME type, got '{mime_type}'"
        ))),
    }
}

/// Validated user input. Immutable; consumed once per report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    pub name: String,
    pub birth_date: NaiveDate,
    /// Normalized to zero-padded `HH:MM`.
    pub birth_time: String,
    pub birth_location: String,
    #[serde(rename = "photoDataUri")]
    pub photo: PhotoDataUri,
}

impl UserInput {
    pub fn from_request(request: ReportRequest, max_photo_bytes: usize) -> Result<Self, InputError> {
        let name = non_empty("name", request.name)?;
        let birth_location = non_empty("birthLocation", request.birth_location)?;
        let birth_date = parse_birth_date(&request.birth_date)?;
        let birth_time = normalize_birth_time(&request.birth_time)?;
        let photo = PhotoDataUri::parse(request.photo_data_uri, max_photo_bytes)?;

        Ok(Self {
            name,
            birth_date,
            birth_time,
            birth_location,
            photo,
        })
    }

    /// Birth date as the `YYYY-MM-DD` string every prompt expects.
    pub fn birth_date_iso(&self) -> String {
        self.birth_date.format("%Y-%m-%d").to_string()
    }
}

fn non_empty(field: &'static str, value: String) -> Result<String, InputError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

pub fn parse_birth_date(raw: &str) -> Result<NaiveDate, InputError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| InputError::InvalidBirthDate(raw.to_string()))
}

pub fn normalize_birth_time(raw: &str) -> Result<String, InputError> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .map(|t| t.format("%H:%M").to_string())
        .map_err(|_| InputError::InvalidBirthTime(raw.to_string()))
}
