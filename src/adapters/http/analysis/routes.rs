//! Axum router configuration for analysis endpoints.

use axum::{routing::post, Router};

use super::handlers::{rank_ahp, rank_topsis, score_choices, AnalysisAppState};

/// Create the analysis API router.
///
/// # Routes
///
/// - `POST /scoring` - Weighted sum scores (unsorted)
/// - `POST /topsis` - TOPSIS closeness ranking
/// - `POST /ahp` - AHP prioritization and ranking
///
/// Suitable for mounting at `/api/dss`.
pub fn analysis_routes() -> Router<AnalysisAppState> {
    Router::new()
        .route("/scoring", post(score_choices))
        .route("/topsis", post(rank_topsis))
        .route("/ahp", post(rank_ahp))
}
