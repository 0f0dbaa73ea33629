//! Decision Scoring - Multi-criteria decision analysis service
//!
//! This crate ranks alternatives against weighted criteria using three
//! classical methods: weighted sum scoring, TOPSIS, and AHP. The engines in
//! [`domain::analysis`] are pure functions over validated records; the
//! service shell exposes them over HTTP.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
