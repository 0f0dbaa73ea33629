//! Application layer - Handlers that run decision analyses.
//!
//! This layer sits between the transport adapters and the pure analysis
//! services: it resolves service defaults, runs validation and the engine,
//! and logs the outcome.

pub mod handlers;

pub use handlers::{RankByAhpHandler, RankByTopsisHandler, ScoreChoicesHandler, ScoreChoicesResult};
