//! RankByTopsisHandler - TOPSIS ranking of a decision problem.

use tracing::debug;

use crate::domain::analysis::{
    AnalysisError, DecisionRequest, RequestValidator, TopsisEngine, TopsisOutcome,
};

/// Handler for TOPSIS requests.
#[derive(Debug, Default)]
pub struct RankByTopsisHandler;

impl RankByTopsisHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, request: &DecisionRequest) -> Result<TopsisOutcome, AnalysisError> {
        let problem = RequestValidator::validate_decision(request)?;

        if let Some(policy) = request.normalization {
            debug!(normalization = %policy, "Ignoring normalization policy for TOPSIS");
        }

        let outcome = TopsisEngine::rank(&problem)?;

        debug!(
            choices = outcome.ranked.len(),
            criteria = problem.criteria().len(),
            best = outcome.ranked.first().map(|c| c.choice.as_str()).unwrap_or_default(),
            "Ranked choices by TOPSIS closeness"
        );

        Ok(outcome)
    }
}
