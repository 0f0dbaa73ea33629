//! Error types shared across the domain layer.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request shape errors
    MissingField,
    ShapeMismatch,

    // Computation errors
    DegenerateComputation,
    InvalidExpression,
    InconsistentJudgments,
}

impl ErrorCode {
    /// Returns true for errors caused by the structure of the request itself.
    pub fn is_shape_error(&self) -> bool {
        matches!(self, ErrorCode::MissingField | ErrorCode::ShapeMismatch)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::MissingField => "MISSING_FIELD",
            ErrorCode::ShapeMismatch => "SHAPE_MISMATCH",
            ErrorCode::DegenerateComputation => "DEGENERATE_COMPUTATION",
            ErrorCode::InvalidExpression => "INVALID_EXPRESSION",
            ErrorCode::InconsistentJudgments => "INCONSISTENT_JUDGMENTS",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: BTreeMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}
