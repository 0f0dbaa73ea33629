//! Analysis handlers.
//!
//! One handler per decision method. Each validates the request, applies
//! service defaults from `AnalysisConfig`, and runs the matching engine.

mod rank_ahp;
mod rank_topsis;
mod score_choices;

pub use rank_ahp::RankByAhpHandler;
pub use rank_topsis::RankByTopsisHandler;
pub use score_choices::{ScoreChoicesHandler, ScoreChoicesResult};
