//! LLM Client — the single point of entry for all Gemini API calls in the report service.
//!
//! ARCHITECTURAL RULE: No other module may call the Gemini API directly.
//! All model interactions MUST go through this module.
//!
//! Model: gemini-2.0-flash (hardcoded — do not make configurable to prevent drift)

use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for every analysis task.
/// This is intentionally hardcoded to prevent accidental drift between tasks.
pub const MODEL: &str = "gemini-2.0-flash";
const TEMPERATURE: f32 = 0.7;
const JSON_MIME_TYPE: &str = "application/json";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("Prompt blocked by the model: {reason}")]
    Blocked { reason: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// An image sent alongside the prompt as an inline base64 part.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineImage<'a> {
    pub mime_type: &'a str,
    pub data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Instruction<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Instruction<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    Image {
        #[serde(rename = "inlineData")]
        inline_data: InlineImage<'a>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

impl LlmResponse {
    /// Extracts the text content from the first text part of the first candidate.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|content| content.parts.iter().find_map(|p| p.text.as_deref()))
    }

    fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// The single LLM client used by all analysis tasks.
/// Wraps the Gemini `generateContent` API with optional retry and structured output helpers.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    max_retries: u32,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        max_retries: u32,
        timeout: Option<Duration>,
    ) -> Result<Self, LlmError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_key,
            max_retries,
        })
    }

    /// Makes a raw call to the Gemini API, returning the full response object.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff,
    /// up to `max_retries` extra attempts.
    pub async fn call(
        &self,
        prompt: &str,
        system: &str,
        images: &[InlineImage<'_>],
    ) -> Result<LlmResponse, LlmError> {
        let request_body = build_request(prompt, system, images);
        let url = format!("{GEMINI_API_BASE}/{MODEL}:generateContent");

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1).min(5)));
                warn!(
                    "Gemini call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Gemini API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message: api_error_message(body),
                });
            }

            let llm_response: LlmResponse = response.json().await?;

            let usage = llm_response.usage_metadata.as_ref();
            debug!(
                "Gemini call succeeded: prompt_tokens={}, output_tokens={}",
                usage.map_or(0, |u| u.prompt_token_count),
                usage.map_or(0, |u| u.candidates_token_count)
            );

            return Ok(llm_response);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: self.max_retries,
        }))
    }

    /// Convenience method that calls the model and deserializes the text response as JSON.
    /// The request asks for `application/json`, but fences are still stripped defensively.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
        images: &[InlineImage<'_>],
    ) -> Result<T, LlmError> {
        let response = self.call(prompt, system, images).await?;
        parse_json_response(&response)
    }
}

fn build_request<'a>(
    prompt: &'a str,
    system: &'a str,
    images: &[InlineImage<'a>],
) -> GenerateContentRequest<'a> {
    let mut parts = vec![Part::Text { text: prompt }];
    parts.extend(images.iter().map(|&inline_data| Part::Image { inline_data }));

    GenerateContentRequest {
        system_instruction: Instruction {
            parts: vec![Part::Text { text: system }],
        },
        contents: vec![Content {
            role: "user",
            parts,
        }],
        generation_config: GenerationConfig {
            temperature: TEMPERATURE,
            response_mime_type: JSON_MIME_TYPE,
        },
    }
}

/// Pulls the human-readable message out of a Gemini error body, falling back to the raw body.
fn api_error_message(body: String) -> String {
    serde_json::from_str::<GeminiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

fn parse_json_response<T: DeserializeOwned>(response: &LlmResponse) -> Result<T, LlmError> {
    let Some(text) = response.text() else {
        let finish_reason = response
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref());
        warn!("Gemini returned no text (finish_reason={finish_reason:?})");
        return Err(match response.block_reason() {
            Some(reason) => LlmError::Blocked {
                reason: reason.to_string(),
            },
            None => LlmError::EmptyContent,
        });
    };

    serde_json::from_str(strip_json_fences(text)).map_err(LlmError::Parse)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_request_carries_text_then_inline_images() {
        let images = [InlineImage {
            mime_type: "image/png",
            data: "iVBORw0KGgo=",
        }];
        let request = build_request("find the celebrity", "json only", &images);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "json only");
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "find the celebrity");
        assert_eq!(
            value["contents"][0]["parts"][1]["inlineData"]["mimeType"],
            "image/png"
        );
        assert_eq!(
            value["contents"][0]["parts"][1]["inlineData"]["data"],
            "iVBORw0KGgo="
        );
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn test_request_without_images_has_single_part() {
        let request = build_request("chart data please", "json only", &[]);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_response_text_and_json_parse() {
        let response: LlmResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "```json\n{\"answer\": 42}\n```"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 120, "candidatesTokenCount": 8}
        }))
        .unwrap();

        #[derive(Deserialize)]
        struct Answer {
            answer: u32,
        }

        let parsed: Answer = parse_json_response(&response).unwrap();
        assert_eq!(parsed.answer, 42);
        assert_eq!(response.usage_metadata.unwrap().prompt_token_count, 120);
    }

    #[test]
    fn test_blocked_prompt_surfaces_reason() {
        let response: LlmResponse = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();

        let result: Result<serde_json::Value, _> = parse_json_response(&response);
        match result {
            Err(LlmError::Blocked { reason }) => assert_eq!(reason, "SAFETY"),
            other => panic!("expected Blocked, got {other:?}"),
        }
    }

    #[test]
    fn test_candidate_without_content_is_empty() {
        let response: LlmResponse = serde_json::from_value(json!({
            "candidates": [{"finishReason": "MAX_TOKENS"}]
        }))
        .unwrap();

        let result: Result<serde_json::Value, _> = parse_json_response(&response);
        assert!(matches!(result, Err(LlmError::EmptyContent)));
    }

    #[test]
    fn test_api_error_message_extracts_gemini_message() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(api_error_message(body.to_string()), "API key not valid.");
        assert_eq!(api_error_message("plain".to_string()), "plain");
    }
}
