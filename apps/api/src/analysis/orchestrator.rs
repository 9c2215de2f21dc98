//! Report orchestration — runs the analysis tasks for one submission.
//!
//! Flow: match_celebrity → (face flag) → generate_visualizations → analyze_personality
//!       → assemble Report.
//!
//! Task failures never abort the flow. A failed match becomes `NotFound`;
//! failed visualization or personality tasks leave their field empty. Only a
//! panic escaping the spawned flow is reported as a hard failure.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::analysis::celebrity_match::{MatchInput, MatchOutcome};
use crate::analysis::personality::PersonalityInput;
use crate::analysis::tasks::AnalysisTasks;
use crate::analysis::visualization::VisualizationInput;
use crate::models::report::Report;
use crate::models::user_input::UserInput;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report generation aborted unexpectedly: {0}")]
    HardFailure(String),
}

/// Produces a report for one validated submission.
///
/// Steps:
/// 1. match_celebrity() → MatchOutcome (errors become `NotFound`)
/// 2. face_recognition_failed = outcome is `NotFound`
/// 3. generate_visualizations() with the celebrity only when recognised
/// 4. analyze_personality() regardless of the match
/// 5. assemble Report from whatever succeeded
pub async fn get_report(
    tasks: Arc<dyn AnalysisTasks>,
    input: UserInput,
) -> Result<Report, ReportError> {
    let report_id = Uuid::new_v4();

    tokio::spawn(assemble_report(tasks, input, report_id))
        .await
        .map_err(|e| {
            error!("Report {report_id} aborted: {e}");
            ReportError::HardFailure(e.to_string())
        })
}

async fn assemble_report(tasks: Arc<dyn AnalysisTasks>, input: UserInput, id: Uuid) -> Report {
    info!("Generating report {id}");

    // Step 1: celebrity match
    let match_outcome = match tasks.match_celebrity(&MatchInput::from(&input)).await {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("Report {id}: celebrity match failed, continuing without a face: {e}");
            MatchOutcome::face_not_found()
        }
    };

    // Step 2: face flag
    let face_recognition_failed = match_outcome.is_not_found();
    if face_recognition_failed {
        info!(
            "Report {id}: no face recognised ({}), using generic narrative",
            match_outcome.description()
        );
    }

    // Step 3: visualization
    let visualization_input = VisualizationInput::new(&input, match_outcome.celebrity_name());
    let visualization = match tasks.generate_visualizations(&visualization_input).await {
        Ok(result) => Some(result),
        Err(e) => {
            warn!("Report {id}: visualization failed, omitting section: {e}");
            None
        }
    };

    // Step 4: personality
    let personality = match tasks
        .analyze_personality(&PersonalityInput::from(&input))
        .await
    {
        Ok(result) => Some(result),
        Err(e) => {
            warn!("Report {id}: personality analysis failed, omitting section: {e}");
            None
        }
    };

    info!(
        "Report {id} assembled: face_recognised={}, visualization={}, personality={}",
        !face_recognition_failed,
        visualization.is_some(),
        personality.is_some()
    );

    Report {
        id,
        user_input: input,
        match_outcome,
        visualization,
        personality,
    }
}
