//! Celebrity matching — finds the Korean celebrity who most resembles the user's photo.
//!
//! The model signals "no face" with a sentinel name. That string is converted to
//! `MatchOutcome::NotFound` here and never leaves this module.

use serde::{Deserialize, Serialize};

use crate::analysis::prompts::{MATCH_PERSONA, MATCH_PROMPT_TEMPLATE};
use crate::analysis::tasks::ModelInvocationError;
use crate::llm_client::prompts::{render, system_instruction, KOREAN_OUTPUT_INSTRUCTION};
use crate::llm_client::{GeminiClient, InlineImage};
use crate::models::user_input::{PhotoDataUri, UserInput};

/// The name the model returns when it cannot recognise a face.
pub const FACE_NOT_RECOGNIZED: &str = "얼굴 인식 불가";

/// Shown to the user when no face could be matched.
pub const FACE_NOT_FOUND_MESSAGE: &str = "사진에서 얼굴을 찾을 수 없습니다. \
    더 선명한 정면 사진을 사용하거나 다른 사진으로 시도해 보세요.";

pub const PLACEHOLDER_PHOTO_URL: &str = "https://placehold.co/400x400.png";

/// Input for the matching task.
#[derive(Debug, Clone)]
pub struct MatchInput<'a> {
    pub photo: &'a PhotoDataUri,
    pub birth_date: String,
    pub birth_time: String,
    pub birth_location: String,
}

impl<'a> From<&'a UserInput> for MatchInput<'a> {
    fn from(input: &'a UserInput) -> Self {
        Self {
            photo: &input.photo,
            birth_date: input.birth_date_iso(),
            birth_time: input.birth_time.clone(),
            birth_location: input.birth_location.clone(),
        }
    }
}

/// A recognised celebrity match.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CelebrityMatch {
    pub celebrity_match: String,
    /// 0 – 100
    pub match_percentage: u8,
    pub fortune_similarity: String,
    pub celebrity_photo_url: String,
}

/// Result of the matching task.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MatchOutcome {
    Found(CelebrityMatch),
    #[serde(rename_all = "camelCase")]
    NotFound {
        description: String,
        placeholder_photo_url: String,
    },
}

impl MatchOutcome {
    /// The outcome used when the matching task itself failed.
    pub fn face_not_found() -> Self {
        MatchOutcome::NotFound {
            description: FACE_NOT_FOUND_MESSAGE.to_string(),
            placeholder_photo_url: PLACEHOLDER_PHOTO_URL.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, MatchOutcome::NotFound { .. })
    }

    pub fn celebrity_name(&self) -> Option<&str> {
        match self {
            MatchOutcome::Found(m) => Some(&m.celebrity_match),
            MatchOutcome::NotFound { .. } => None,
        }
    }

    pub fn match_percentage(&self) -> u8 {
        match self {
            MatchOutcome::Found(m) => m.match_percentage,
            MatchOutcome::NotFound { .. } => 0,
        }
    }

    /// The text shown under the match: similarity on success, the reason otherwise.
    pub fn description(&self) -> &str {
        match self {
            MatchOutcome::Found(m) => &m.fortune_similarity,
            MatchOutcome::NotFound { description, .. } => description,
        }
    }
}

/// Raw JSON object the model returns.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchModelOutput {
    pub celebrity_match: String,
    pub match_percentage: f64,
    #[serde(default)]
    pub fortune_similarity: String,
    #[serde(default)]
    pub celebrity_photo_url: String,
}

impl MatchModelOutput {
    /// Validates the raw output and converts it into a tagged outcome.
    pub fn into_outcome(self) -> Result<MatchOutcome, String> {
        let name = self.celebrity_match.trim();

        let rounded = self.match_percentage.round();
        let no_face = is_sentinel(name)
            || (rounded == 0.0 && is_placeholder_url(&self.celebrity_photo_url));

        if no_face {
            let description = non_blank_or(self.fortune_similarity, FACE_NOT_FOUND_MESSAGE);
            let placeholder_photo_url = if is_http_url(&self.celebrity_photo_url) {
                self.celebrity_photo_url.trim().to_string()
            } else {
                PLACEHOLDER_PHOTO_URL.to_string()
            };
            return Ok(MatchOutcome::NotFound {
                description,
                placeholder_photo_url,
            });
        }

        if name.is_empty() {
            return Err("celebrityMatch is empty".to_string());
        }
        if !self.match_percentage.is_finite() || !(0.0..=100.0).contains(&self.match_percentage) {
            return Err(format!(
                "matchPercentage must be within 0-100, got {}",
                self.match_percentage
            ));
        }
        if !is_http_url(&self.celebrity_photo_url) {
            return Err(format!(
                "celebrityPhotoUrl must be an http(s) URL, got '{}'",
                self.celebrity_photo_url
            ));
        }
        let fortune_similarity = self.fortune_similarity.trim();
        if fortune_similarity.is_empty() {
            return Err("fortuneSimilarity is empty".to_string());
        }

        Ok(MatchOutcome::Found(CelebrityMatch {
            celebrity_match: name.to_string(),
            match_percentage: rounded as u8,
            fortune_similarity: fortune_similarity.to_string(),
            celebrity_photo_url: self.celebrity_photo_url.trim().to_string(),
        }))
    }
}

/// Tolerates drift in the sentinel: spacing, punctuation, quotes, or extra
/// words around it ("얼굴인식불가", "얼굴 인식 불가.", "\"얼굴 인식 불가\" (no face)").
fn is_sentinel(name: &str) -> bool {
    let sentinel = compact(FACE_NOT_RECOGNIZED);
    compact(name).contains(&sentinel)
}

fn compact(text: &str) -> String {
    text.chars().filter(|c| c.is_alphanumeric()).collect()
}

fn is_http_url(url: &str) -> bool {
    let url = url.trim();
    url.starts_with("https://") || url.starts_with("http://")
}

/// A missing, non-http, or placehold.co photo URL.
fn is_placeholder_url(url: &str) -> bool {
    let url = url.trim();
    !is_http_url(url)
        || url.starts_with("https://placehold.co/")
        || url.starts_with("http://placehold.co/")
}

fn non_blank_or(value: String, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn build_match_prompt(input: &MatchInput<'_>) -> String {
    render(
        MATCH_PROMPT_TEMPLATE,
        &[
            ("birth_date", input.birth_date.as_str()),
            ("birth_time", input.birth_time.as_str()),
            ("birth_location", input.birth_location.as_str()),
            ("sentinel", FACE_NOT_RECOGNIZED),
            ("not_found_message", FACE_NOT_FOUND_MESSAGE),
            ("placeholder_photo_url", PLACEHOLDER_PHOTO_URL),
            ("korean_instruction", KOREAN_OUTPUT_INSTRUCTION),
        ],
    )
}

/// Runs the matching task against the model.
pub async fn match_user_with_celebrity(
    input: &MatchInput<'_>,
    llm: &GeminiClient,
) -> Result<MatchOutcome, ModelInvocationError> {
    let prompt = build_match_prompt(input);
    let system = system_instruction(MATCH_PERSONA);
    let image = InlineImage {
        mime_type: input.photo.mime_type(),
        data: input.photo.base64_data(),
    };

    let output: MatchModelOutput = llm.call_json(&prompt, &system, &[image]).await?;
    output.into_outcome().map_err(ModelInvocationError::Schema)
}
