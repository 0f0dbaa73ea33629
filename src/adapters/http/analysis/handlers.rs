//! HTTP handlers for analysis endpoints.
//!
//! These handlers connect Axum routes to the application layer analysis handlers.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::warn;

use crate::application::{RankByAhpHandler, RankByTopsisHandler, ScoreChoicesHandler};
use crate::config::AnalysisConfig;
use crate::domain::analysis::AnalysisError;
use crate::domain::foundation::DomainError;

use super::dto::{
    AhpRequest, AhpResponse, DecisionRequest, ErrorResponse, ScoringResponse, TopsisResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// Analysis API error that implements IntoResponse.
#[derive(Debug)]
pub enum AnalysisApiError {
    /// Missing fields or inconsistent lengths.
    BadRequest(DomainError),
    /// Well-formed request whose numbers cannot be ranked.
    Unprocessable(DomainError),
}

impl IntoResponse for AnalysisApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            AnalysisApiError::BadRequest(err) => (StatusCode::BAD_REQUEST, err),
            AnalysisApiError::Unprocessable(err) => (StatusCode::UNPROCESSABLE_ENTITY, err),
        };
        (status, Json(ErrorResponse::from(error))).into_response()
    }
}

impl From<AnalysisError> for AnalysisApiError {
    fn from(error: AnalysisError) -> Self {
        let error = DomainError::from(error);
        if error.code.is_shape_error() {
            AnalysisApiError::BadRequest(error)
        } else {
            AnalysisApiError::Unprocessable(error)
        }
    }
}

fn rejected(method: &'static str, error: AnalysisError) -> AnalysisApiError {
    warn!(method, code = %error.code(), error = %error, "Rejected analysis request");
    error.into()
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing analysis defaults.
#[derive(Clone)]
pub struct AnalysisAppState {
    pub config: Arc<AnalysisConfig>,
}

impl AnalysisAppState {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn score_choices_handler(&self) -> ScoreChoicesHandler {
        ScoreChoicesHandler::new(self.config.clone())
    }

    pub fn rank_topsis_handler(&self) -> RankByTopsisHandler {
        RankByTopsisHandler::new()
    }

    pub fn rank_ahp_handler(&self) -> RankByAhpHandler {
        RankByAhpHandler::new(self.config.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/dss/scoring
///
/// Returns unsorted weighted scores and the normalization policy applied.
pub async fn score_choices(
    State(state): State<AnalysisAppState>,
    Json(request): Json<DecisionRequest>,
) -> Result<Json<ScoringResponse>, AnalysisApiError> {
    let result = state
        .score_choices_handler()
        .handle(&request)
        .map_err(|e| rejected("scoring", e))?;

    Ok(Json(result.into()))
}

/// POST /api/dss/topsis
///
/// Returns choices sorted by descending closeness coefficient.
pub async fn rank_topsis(
    State(state): State<AnalysisAppState>,
    Json(request): Json<DecisionRequest>,
) -> Result<Json<TopsisResponse>, AnalysisApiError> {
    let outcome = state
        .rank_topsis_handler()
        .handle(&request)
        .map_err(|e| rejected("topsis", e))?;

    Ok(Json(outcome.into()))
}

/// POST /api/dss/ahp
///
/// Returns alternatives sorted by descending total score.
pub async fn rank_ahp(
    State(state): State<AnalysisAppState>,
    Json(request): Json<AhpRequest>,
) -> Result<Json<AhpResponse>, AnalysisApiError> {
    let outcome = state
        .rank_ahp_handler()
        .handle(&request)
        .map_err(|e| rejected("ahp", e))?;

    Ok(Json(outcome.into()))
}

/// GET /
pub async fn service_banner() -> &'static str {
    "Decision Scoring Service"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_errors_map_to_bad_request() {
        let response = AnalysisApiError::from(AnalysisError::missing(["weights"])).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response =
            AnalysisApiError::from(AnalysisError::length("weights", 2, 1)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn computation_errors_map_to_unprocessable() {
        let response = AnalysisApiError::from(AnalysisError::degenerate(
            "vector normalization",
            "criterion 'x' has only zero values",
        ))
        .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
