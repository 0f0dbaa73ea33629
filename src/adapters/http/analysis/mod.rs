//! Analysis HTTP adapter - REST API for decision analysis methods.
//!
//! Provides endpoints for:
//! - Weighted sum scoring
//! - TOPSIS ranking
//! - AHP ranking

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{AhpResponse, ErrorResponse, RankedChoice, ScoringResponse, TopsisResponse};
pub use handlers::{AnalysisApiError, AnalysisAppState};
pub use routes::analysis_routes;
