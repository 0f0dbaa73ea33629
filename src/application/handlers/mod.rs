//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod analysis;

pub use analysis::{RankByAhpHandler, RankByTopsisHandler, ScoreChoicesHandler, ScoreChoicesResult};
