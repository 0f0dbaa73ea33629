//! Analysis Module - Pure domain services for multi-criteria decision analysis.
//!
//! This module contains stateless functions that rank alternatives against
//! weighted criteria.
//!
//! # Components
//!
//! - `RequestValidator` - Presence and shape checks, producing validated problems
//! - `WeightedScoringEngine` - Additive weighted scores (ratio or sign-flip normalization)
//! - `TopsisEngine` - Closeness to the ideal solution
//! - `AhpEngine` - Geometric-mean prioritization of pairwise comparisons
//!
//! # Design Philosophy
//!
//! All functions are pure (no side effects) and stateless. Engines only
//! accept validated problems, so a malformed request fails before any
//! numeric work starts. Zero divisors surface as
//! `AnalysisError::DegenerateComputation` instead of NaN or infinity.

mod ahp_engine;
mod consistency;
mod decision_problem;
mod errors;
mod expression;
mod ranking;
mod request;
mod request_validator;
mod topsis_engine;
mod weighted_scoring;

// Re-export all public types
pub use ahp_engine::{AhpEngine, AhpOptions, AhpOutcome, AlternativeScore};
pub use consistency::{
    consistency_ratio, random_index, MatrixConsistency, DEFAULT_CONSISTENCY_THRESHOLD,
};
pub use decision_problem::{AhpProblem, Choice, Composition, Criterion, DecisionProblem};
pub use errors::AnalysisError;
pub use expression::{evaluate as evaluate_expression, ExpressionError};
pub use request::{AhpRequest, ComparisonMatrix, DecisionRequest, RatioCell};
pub use request_validator::RequestValidator;
pub use topsis_engine::{ChoiceCloseness, TopsisEngine, TopsisOutcome};
pub use weighted_scoring::{ChoiceScore, NormalizationPolicy, WeightedScoringEngine};
