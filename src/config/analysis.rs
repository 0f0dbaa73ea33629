//! Analysis defaults applied by the service when a request leaves them open

use serde::Deserialize;

use crate::domain::analysis::{AhpOptions, NormalizationPolicy, DEFAULT_CONSISTENCY_THRESHOLD};

use super::error::ValidationError;

/// Analysis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Weighted scoring normalization used when a request names none
    #[serde(default)]
    pub default_normalization: NormalizationPolicy,

    /// Run the AHP consistency check unless a request opts out
    #[serde(default)]
    pub ahp_consistency_check: bool,

    /// Highest accepted AHP consistency ratio
    #[serde(default = "default_consistency_threshold")]
    pub ahp_consistency_threshold: f64,
}

impl AnalysisConfig {
    /// Resolves the normalization policy for one request.
    pub fn normalization(&self, requested: Option<NormalizationPolicy>) -> NormalizationPolicy {
        requested.unwrap_or(self.default_normalization)
    }

    /// Resolves AHP options for one request.
    pub fn ahp_options(&self, check_consistency: Option<bool>) -> AhpOptions {
        AhpOptions {
            check_consistency: check_consistency.unwrap_or(self.ahp_consistency_check),
            consistency_threshold: self.ahp_consistency_threshold,
        }
    }

    /// Validate analysis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.ahp_consistency_threshold.is_finite() && self.ahp_consistency_threshold > 0.0) {
            return Err(ValidationError::InvalidConsistencyThreshold(
                self.ahp_consistency_threshold,
            ));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_normalization: NormalizationPolicy::default(),
            ahp_consistency_check: false,
            ahp_consistency_threshold: default_consistency_threshold(),
        }
    }
}

fn default_consistency_threshold() -> f64 {
    DEFAULT_CONSISTENCY_THRESHOLD
}
