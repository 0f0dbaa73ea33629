//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (error codes, domain errors)
//! - `analysis` - Pure domain services for decision analysis (scoring, TOPSIS, AHP)

pub mod analysis;
pub mod foundation;
