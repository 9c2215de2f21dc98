//! Fixtures and a scripted `AnalysisTasks` double shared by the unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::analysis::celebrity_match::{CelebrityMatch, MatchInput, MatchOutcome};
use crate::analysis::personality::{
    BigFiveTrait, PersonalityAnalysisResult, PersonalityInput, PersonalityTrait,
};
use crate::analysis::tasks::{AnalysisTasks, ModelInvocationError};
use crate::analysis::visualization::{ChartDataPoint, VisualizationInput, VisualizationResult};
use crate::llm_client::LlmError;
use crate::models::user_input::{ReportRequest, UserInput};

/// 1x1 transparent PNG.
pub const TINY_PNG_B64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

pub fn sample_request() -> ReportRequest {
    ReportRequest {
        name: "Kim".to_string(),
        birth_date: "1990-05-05".to_string(),
        birth_time: "14:30".to_string(),
        birth_location: "Seoul".to_string(),
        photo_data_uri: format!("data:image/png;base64,{TINY_PNG_B64}"),
    }
}

pub fn sample_user_input() -> UserInput {
    UserInput::from_request(sample_request(), 4 * 1024 * 1024)
        .expect("sample request is valid")
}

pub fn sample_found_match() -> MatchOutcome {
    MatchOutcome::Found(CelebrityMatch {
        celebrity_match: "아이유".to_string(),
        match_percentage: 87,
        fortune_similarity: "두 분 모두 봄의 기운을 타고났습니다.".to_string(),
        celebrity_photo_url: "https://example.com/iu.jpg".to_string(),
    })
}

fn series(labels: &[&str], base: f64) -> Vec<ChartDataPoint> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| ChartDataPoint {
            label: label.to_string(),
            value: base + i as f64,
        })
        .collect()
}

pub fn sample_visualization() -> VisualizationResult {
    VisualizationResult {
        fortune_curve: series(&["1월", "2월", "3월"], 60.0),
        wealth_index: series(&["저축운", "투자운"], 55.0),
        affection_index: series(&["연애운", "우정운"], 70.0),
        health_index: series(&["활력", "수면"], 65.0),
        career_persona: "음악가".to_string(),
        interpretation: Some("당신은 자신의 무대에서 빛날 운명입니다.".to_string()),
    }
}

pub fn sample_personality() -> PersonalityAnalysisResult {
    PersonalityAnalysisResult {
        personality_analysis: BigFiveTrait::ALL
            .iter()
            .enumerate()
            .map(|(i, &trait_name)| PersonalityTrait {
                trait_name,
                score: 50.0 + 10.0 * i as f64,
                description: format!("{} 설명", trait_name.korean_name()),
            })
            .collect(),
        success_prediction: "꾸준함이 당신을 성공으로 이끌 것입니다.".to_string(),
    }
}

/// What a scripted task does when called.
#[derive(Debug, Clone)]
pub enum Behavior<T> {
    Succeed(T),
    Fail,
    Panic,
}

impl<T: Clone> Behavior<T> {
    fn run(&self, task: &str) -> Result<T, ModelInvocationError> {
        match self {
            Behavior::Succeed(value) => Ok(value.clone()),
            Behavior::Fail => Err(ModelInvocationError::Model(LlmError::EmptyContent)),
            Behavior::Panic => panic!("scripted panic in {task}"),
        }
    }
}

pub struct MockTasks {
    pub match_behavior: Behavior<MatchOutcome>,
    pub visualization_behavior: Behavior<VisualizationResult>,
    pub personality_behavior: Behavior<PersonalityAnalysisResult>,
    pub calls_log: Mutex<Vec<&'static str>>,
    pub visualization_log: Mutex<Vec<VisualizationInput>>,
}

impl MockTasks {
    pub fn all_succeed() -> Self {
        Self {
            match_behavior: Behavior::Succeed(sample_found_match()),
            visualization_behavior: Behavior::Succeed(sample_visualization()),
            personality_behavior: Behavior::Succeed(sample_personality()),
            calls_log: Mutex::new(Vec::new()),
            visualization_log: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls_log.lock().unwrap().clone()
    }

    pub fn visualization_inputs(&self) -> Vec<VisualizationInput> {
        self.visualization_log.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls_log.lock().unwrap().push(call);
    }
}

#[async_trait]
impl AnalysisTasks for MockTasks {
    async fn match_celebrity(
        &self,
        _input: &MatchInput<'_>,
    ) -> Result<MatchOutcome, ModelInvocationError> {
        self.record("match_celebrity");
        self.match_behavior.run("match_celebrity")
    }

    async fn generate_visualizations(
        &self,
        input: &VisualizationInput,
    ) -> Result<VisualizationResult, ModelInvocationError> {
        self.record("generate_visualizations");
        self.visualization_log.lock().unwrap().push(input.clone());
        self.visualization_behavior.run("generate_visualizations")
    }

    async fn analyze_personality(
        &self,
        _input: &PersonalityInput<'_>,
    ) -> Result<PersonalityAnalysisResult, ModelInvocationError> {
        self.record("analyze_personality");
        self.personality_behavior.run("analyze_personality")
    }
}
