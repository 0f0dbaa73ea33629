//! Foundation module - Shared domain primitives.
//!
//! Contains the error vocabulary shared by the analysis services and the
//! adapters that report their failures.

mod errors;

pub use errors::{DomainError, ErrorCode};
