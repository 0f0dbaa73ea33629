//! RankByAhpHandler - AHP prioritization and ranking of alternatives.

use std::sync::Arc;

use tracing::debug;

use crate::config::AnalysisConfig;
use crate::domain::analysis::{
    AhpEngine, AhpOutcome, AhpRequest, AnalysisError, Composition, RequestValidator,
};

/// Handler for AHP requests.
///
/// The consistency check follows the request's `checkConsistency` flag when
/// present, else the service default.
pub struct RankByAhpHandler {
    config: Arc<AnalysisConfig>,
}

impl RankByAhpHandler {
    pub fn new(config: Arc<AnalysisConfig>) -> Self {
        Self { config }
    }

    pub fn handle(&self, request: &AhpRequest) -> Result<AhpOutcome, AnalysisError> {
        let problem = RequestValidator::validate_ahp(request)?;
        let options = self.config.ahp_options(request.check_consistency);

        let outcome = AhpEngine::rank(&problem, options)?;

        debug!(
            alternatives = outcome.ranked.len(),
            matrices = problem.comparisons().len(),
            weights = problem.leaf_count(),
            two_level = matches!(problem.composition(), Composition::TwoLevel { .. }),
            consistency_checked = options.check_consistency,
            "Ranked alternatives by AHP"
        );

        Ok(outcome)
    }
}
