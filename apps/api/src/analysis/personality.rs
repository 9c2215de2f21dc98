//! Big Five personality analysis and success prediction from the photo and birth date.

use serde::{Deserialize, Serialize};

use crate::analysis::prompts::{PERSONALITY_PERSONA, PERSONALITY_PROMPT_TEMPLATE};
use crate::analysis::tasks::ModelInvocationError;
use crate::llm_client::prompts::{render, system_instruction, KOREAN_OUTPUT_INSTRUCTION};
use crate::llm_client::{GeminiClient, InlineImage};
use crate::models::user_input::{PhotoDataUri, UserInput};

/// The five Big Five traits, named in Korean on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BigFiveTrait {
    #[serde(rename = "개방성")]
    Openness,
    #[serde(rename = "성실성")]
    Conscientiousness,
    #[serde(rename = "외향성")]
    Extraversion,
    #[serde(rename = "친화성")]
    Agreeableness,
    #[serde(rename = "신경성")]
    Neuroticism,
}

impl BigFiveTrait {
    pub const ALL: [BigFiveTrait; 5] = [
        BigFiveTrait::Openness,
        BigFiveTrait::Conscientiousness,
        BigFiveTrait::Extraversion,
        BigFiveTrait::Agreeableness,
        BigFiveTrait::Neuroticism,
    ];

    pub fn korean_name(self) -> &'static str {
        match self {
            BigFiveTrait::Openness => "개방성",
            BigFiveTrait::Conscientiousness => "성실성",
            BigFiveTrait::Extraversion => "외향성",
            BigFiveTrait::Agreeableness => "친화성",
            BigFiveTrait::Neuroticism => "신경성",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityTrait {
    #[serde(rename = "trait")]
    pub trait_name: BigFiveTrait,
    /// 0 – 100
    pub score: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityAnalysisResult {
    pub personality_analysis: Vec<PersonalityTrait>,
    pub success_prediction: String,
}

impl PersonalityAnalysisResult {
    /// Enforces exactly one entry per trait with scores in range, and orders
    /// the entries canonically so the radar chart is stable.
    pub fn validated(mut self) -> Result<Self, String> {
        if self.personality_analysis.len() != BigFiveTrait::ALL.len() {
            return Err(format!(
                "personalityAnalysis must have {} entries, got {}",
                BigFiveTrait::ALL.len(),
                self.personality_analysis.len()
            ));
        }

        for expected in BigFiveTrait::ALL {
            let count = self
                .personality_analysis
                .iter()
                .filter(|t| t.trait_name == expected)
                .count();
            if count != 1 {
                return Err(format!(
                    "trait {} must appear exactly once, found {count}",
                    expected.korean_name()
                ));
            }
        }

        if let Some(bad) = self
            .personality_analysis
            .iter()
            .find(|t| !t.score.is_finite() || !(0.0..=100.0).contains(&t.score))
        {
            return Err(format!(
                "score for {} must be within 0-100, got {}",
                bad.trait_name.korean_name(),
                bad.score
            ));
        }

        self.success_prediction = self.success_prediction.trim().to_string();
        if self.success_prediction.is_empty() {
            return Err("successPrediction is empty".to_string());
        }

        self.personality_analysis.sort_by_key(|t| t.trait_name);
        Ok(self)
    }
}

/// Input for the personality task.
#[derive(Debug, Clone)]
pub struct PersonalityInput<'a> {
    pub photo: &'a PhotoDataUri,
    pub birth_date: String,
}

impl<'a> From<&'a UserInput> for PersonalityInput<'a> {
    fn from(input: &'a UserInput) -> Self {
        Self {
            photo: &input.photo,
            birth_date: input.birth_date_iso(),
        }
    }
}

pub fn build_personality_prompt(input: &PersonalityInput<'_>) -> String {
    let trait_names = BigFiveTrait::ALL
        .iter()
        .map(|t| format!("'{}'", t.korean_name()))
        .collect::<Vec<_>>()
        .join(", ");

    render(
        PERSONALITY_PROMPT_TEMPLATE,
        &[
            ("birth_date", input.birth_date.as_str()),
            ("trait_names", trait_names.as_str()),
            ("korean_instruction", KOREAN_OUTPUT_INSTRUCTION),
        ],
    )
}

/// Runs the personality task against the model.
pub async fn perform_personality_analysis(
    input: &PersonalityInput<'_>,
    llm: &GeminiClient,
) -> Result<PersonalityAnalysisResult, ModelInvocationError> {
    let prompt = build_personality_prompt(input);
    let system = system_instruction(PERSONALITY_PERSONA);
    let image = InlineImage {
        mime_type: input.photo.mime_type(),
        data: input.photo.base64_data(),
    };

    let output: PersonalityAnalysisResult = llm.call_json(&prompt, &system, &[image]).await?;
    output.validated().map_err(ModelInvocationError::Schema)
}
