//! ScoreChoicesHandler - Weighted sum scoring of a decision problem.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::domain::analysis::{
    AnalysisError, ChoiceScore, DecisionRequest, NormalizationPolicy, RequestValidator,
    WeightedScoringEngine,
};

/// Result of weighted scoring.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreChoicesResult {
    /// Scores in request choice order (not sorted).
    pub scores: Vec<ChoiceScore>,
    /// The policy that produced the scores.
    pub normalization: NormalizationPolicy,
}

/// Handler for weighted scoring requests.
///
/// Resolves the normalization policy (request value, else service default),
/// validates the request, then scores every choice.
pub struct ScoreChoicesHandler {
    config: Arc<AnalysisConfig>,
}

impl ScoreChoicesHandler {
    pub fn new(config: Arc<AnalysisConfig>) -> Self {
        Self { config }
    }

    pub fn handle(&self, request: &DecisionRequest) -> Result<ScoreChoicesResult, AnalysisError> {
        let problem = RequestValidator::validate_decision(request)?;
        let normalization = self.config.normalization(request.normalization);

        let scores = WeightedScoringEngine::score(&problem, normalization)?;

        debug!(
            choices = scores.len(),
            criteria = problem.criteria().len(),
            normalization = %normalization,
            "Computed weighted scores"
        );

        Ok(ScoreChoicesResult {
            scores,
            normalization,
        })
    }
}
