//! Response body handed to the web client: the report plus what to render.

use serde::Serialize;

use crate::analysis::celebrity_match::MatchOutcome;
use crate::models::report::Report;

pub const FACE_RECOGNITION_FAILED_TITLE: &str = "얼굴 인식 실패";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Warning,
}

/// A non-blocking toast shown next to the results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

/// Which result sections the client should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sections {
    pub celebrity_card: bool,
    pub charts: bool,
    pub personality: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    pub report: Report,
    pub sections: Sections,
    pub notices: Vec<Notice>,
}

impl From<Report> for ReportView {
    fn from(report: Report) -> Self {
        let sections = Sections {
            celebrity_card: !report.match_outcome.is_not_found(),
            charts: report.visualization.is_some(),
            personality: report.personality.is_some(),
        };

        // Missing charts or personality are simply not rendered; only the
        // face failure warrants a notice.
        let notices = match &report.match_outcome {
            MatchOutcome::NotFound { description, .. } => vec![Notice {
                level: NoticeLevel::Warning,
                title: FACE_RECOGNITION_FAILED_TITLE.to_string(),
                description: description.clone(),
            }],
            MatchOutcome::Found(_) => Vec::new(),
        };

        Self {
            report,
            sections,
            notices,
        }
    }
}
