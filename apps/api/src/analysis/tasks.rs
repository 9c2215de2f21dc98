//! The three model-backed analysis tasks behind one pluggable trait.
//!
//! Default: `GeminiTasks`, which runs each task through `llm_client`.
//! `AppState` holds an `Arc<dyn AnalysisTasks>`, so the orchestrator and the
//! handlers never depend on a concrete model backend.

use async_trait::async_trait;
use thiserror::Error;

use crate::analysis::celebrity_match::{match_user_with_celebrity, MatchInput, MatchOutcome};
use crate::analysis::personality::{
    perform_personality_analysis, PersonalityAnalysisResult, PersonalityInput,
};
use crate::analysis::visualization::{
    generate_astrological_visualizations, VisualizationInput, VisualizationResult,
};
use crate::llm_client::{GeminiClient, LlmError};

/// Any failure while running a single task.
#[derive(Debug, Error)]
pub enum ModelInvocationError {
    #[error("model call failed: {0}")]
    Model(#[from] LlmError),

    #[error("model output failed validation: {0}")]
    Schema(String),
}

#[async_trait]
pub trait AnalysisTasks: Send + Sync {
    async fn match_celebrity(
        &self,
        input: &MatchInput<'_>,
    ) -> Result<MatchOutcome, ModelInvocationError>;

    async fn generate_visualizations(
        &self,
        input: &VisualizationInput,
    ) -> Result<VisualizationResult, ModelInvocationError>;

    async fn analyze_personality(
        &self,
        input: &PersonalityInput<'_>,
    ) -> Result<PersonalityAnalysisResult, ModelInvocationError>;
}

/// Runs every task against Gemini.
pub struct GeminiTasks {
    llm: GeminiClient,
}

impl GeminiTasks {
    pub fn new(llm: GeminiClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl AnalysisTasks for GeminiTasks {
    async fn match_celebrity(
        &self,
        input: &MatchInput<'_>,
    ) -> Result<MatchOutcome, ModelInvocationError> {
        match_user_with_celebrity(input, &self.llm).await
    }

    async fn generate_visualizations(
        &self,
        input: &VisualizationInput,
    ) -> Result<VisualizationResult, ModelInvocationError> {
        generate_astrological_visualizations(input, &self.llm).await
    }

    async fn analyze_personality(
        &self,
        input: &PersonalityInput<'_>,
    ) -> Result<PersonalityAnalysisResult, ModelInvocationError> {
        perform_personality_analysis(input, &self.llm).await
    }
}
