//! Adapters - Connect the analysis core to external systems.
//!
//! - `http` - axum REST API for the analysis endpoints

pub mod http;
