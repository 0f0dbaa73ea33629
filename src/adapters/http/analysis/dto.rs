//! HTTP DTOs for analysis endpoints.
//!
//! Request records are designed for deserialization in the domain layer
//! (every required field optional, camelCase names), so we re-export them
//! directly. Responses keep the established wire shapes.

pub use crate::domain::analysis::{
    AhpRequest, AlternativeScore, ChoiceScore, DecisionRequest, MatrixConsistency,
    NormalizationPolicy,
};

use serde::{Deserialize, Serialize};

use crate::application::ScoreChoicesResult;
use crate::domain::analysis::{AhpOutcome, TopsisOutcome};
use crate::domain::foundation::DomainError;

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for `POST /scoring`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringResponse {
    pub scores: Vec<ChoiceScore>,
    pub normalization: NormalizationPolicy,
}

impl From<ScoreChoicesResult> for ScoringResponse {
    fn from(result: ScoreChoicesResult) -> Self {
        Self {
            scores: result.scores,
            normalization: result.normalization,
        }
    }
}

/// One entry of a TOPSIS ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedChoice {
    pub choice: String,
    pub closeness: f64,
}

/// Response for `POST /topsis`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopsisResponse {
    pub ranked_choices: Vec<RankedChoice>,
}

impl From<TopsisOutcome> for TopsisResponse {
    fn from(outcome: TopsisOutcome) -> Self {
        Self {
            ranked_choices: outcome
                .ranked
                .into_iter()
                .map(|c| RankedChoice {
                    choice: c.choice,
                    closeness: c.closeness,
                })
                .collect(),
        }
    }
}

/// Response for `POST /ahp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AhpResponse {
    pub ranked_alternatives: Vec<AlternativeScore>,
    pub criteria_weights: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consistency_ratios: Option<Vec<MatrixConsistency>>,
}

impl From<AhpOutcome> for AhpResponse {
    fn from(outcome: AhpOutcome) -> Self {
        Self {
            ranked_alternatives: outcome.ranked,
            criteria_weights: outcome.criteria_weights,
            consistency_ratios: outcome.consistency,
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<DomainError> for ErrorResponse {
    fn from(error: DomainError) -> Self {
        let details = if error.details.is_empty() {
            None
        } else {
            serde_json::to_value(&error.details).ok()
        };

        Self {
            code: error.code.to_string(),
            message: error.message,
            details,
        }
    }
}
