use serde::Serialize;
use uuid::Uuid;

use crate::analysis::celebrity_match::MatchOutcome;
use crate::analysis::personality::PersonalityAnalysisResult;
use crate::analysis::visualization::VisualizationResult;
use crate::models::user_input::UserInput;

/// Everything produced for one submission. Built fresh per request; never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: Uuid,
    pub user_input: UserInput,
    #[serde(rename = "match")]
    pub match_outcome: MatchOutcome,
    pub visualization: Option<VisualizationResult>,
    pub personality: Option<PersonalityAnalysisResult>,
}
