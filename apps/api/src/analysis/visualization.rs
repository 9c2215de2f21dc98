//! Astrological chart data, career persona and destiny narrative.

use serde::{Deserialize, Serialize};

use crate::analysis::prompts::{
    CELEBRITY_LINE, CELEBRITY_NARRATIVE_INSTRUCTION, GENERIC_NARRATIVE_INSTRUCTION,
    VISUALIZATION_PERSONA, VISUALIZATION_PROMPT_TEMPLATE,
};
use crate::analysis::tasks::ModelInvocationError;
use crate::llm_client::prompts::{render, system_instruction, KOREAN_OUTPUT_INSTRUCTION};
use crate::llm_client::GeminiClient;
use crate::models::user_input::UserInput;

/// Input for the visualization task. `matched_celebrity` is `None` when the
/// face match failed, which selects the generic narrative.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualizationInput {
    pub birth_date: String,
    pub birth_time: String,
    pub birth_location: String,
    pub matched_celebrity: Option<String>,
}

impl VisualizationInput {
    pub fn new(input: &UserInput, matched_celebrity: Option<&str>) -> Self {
        Self {
            birth_date: input.birth_date_iso(),
            birth_time: input.birth_time.clone(),
            birth_location: input.birth_location.clone(),
            matched_celebrity: matched_celebrity
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
        }
    }
}

/// A labelled value on one of the index charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationResult {
    pub fortune_curve: Vec<ChartDataPoint>,
    pub wealth_index: Vec<ChartDataPoint>,
    pub affection_index: Vec<ChartDataPoint>,
    pub health_index: Vec<ChartDataPoint>,
    pub career_persona: String,
    #[serde(default)]
    pub interpretation: Option<String>,
}

impl VisualizationResult {
    /// Checks the series and persona, dropping a blank narrative to `None`.
    pub fn validated(mut self) -> Result<Self, String> {
        for (name, series) in [
            ("fortuneCurve", &self.fortune_curve),
            ("wealthIndex", &self.wealth_index),
            ("affectionIndex", &self.affection_index),
            ("healthIndex", &self.health_index),
        ] {
            if series.is_empty() {
                return Err(format!("{name} has no data points"));
            }
            if let Some(point) = series.iter().find(|p| !p.value.is_finite()) {
                return Err(format!("{name} point '{}' has a non-finite value", point.label));
            }
        }

        self.career_persona = self.career_persona.trim().to_string();
        if self.career_persona.is_empty() {
            return Err("careerPersona is empty".to_string());
        }

        self.interpretation = self
            .interpretation
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        Ok(self)
    }
}

pub fn build_visualization_prompt(input: &VisualizationInput) -> String {
    let (celebrity_line, narrative_instruction) = match &input.matched_celebrity {
        Some(name) => (
            render(CELEBRITY_LINE, &[("matched_celebrity", name)]),
            render(CELEBRITY_NARRATIVE_INSTRUCTION, &[("matched_celebrity", name)]),
        ),
        None => (String::new(), GENERIC_NARRATIVE_INSTRUCTION.to_string()),
    };

    render(
        VISUALIZATION_PROMPT_TEMPLATE,
        &[
            ("birth_date", input.birth_date.as_str()),
            ("birth_time", input.birth_time.as_str()),
            ("birth_location", input.birth_location.as_str()),
            ("celebrity_line", celebrity_line.as_str()),
            ("narrative_instruction", narrative_instruction.as_str()),
            ("korean_instruction", KOREAN_OUTPUT_INSTRUCTION),
        ],
    )
}

/// Runs the visualization task against the model.
pub async fn generate_astrological_visualizations(
    input: &VisualizationInput,
    llm: &GeminiClient,
) -> Result<VisualizationResult, ModelInvocationError> {
    let prompt = build_visualization_prompt(input);
    let system = system_instruction(VISUALIZATION_PERSONA);

    let output: VisualizationResult = llm.call_json(&prompt, &system, &[]).await?;
    output.validated().map_err(ModelInvocationError::Schema)
}
