//! Analysis errors - every way a decision problem can fail to produce a ranking.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised while validating or computing a decision analysis.
///
/// All errors are local to one request. None are retried since the
/// computation is deterministic, and no partial result accompanies them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("Missing required fields: {}", .fields.join(", "))]
    MissingField { fields: Vec<String> },

    #[error("Field '{field}' has an invalid shape: {reason}")]
    ShapeMismatch { field: String, reason: String },

    #[error("Degenerate computation during {step}: {detail}")]
    DegenerateComputation { step: &'static str, detail: String },

    #[error("Cell ({row}, {column}) of {matrix} is not a valid ratio '{expression}': {reason}")]
    InvalidExpression {
        matrix: String,
        row: usize,
        column: usize,
        expression: String,
        reason: String,
    },

    #[error("{matrix} has consistency ratio {ratio:.3}, above the accepted {threshold:.3}")]
    InconsistentJudgments {
        matrix: String,
        ratio: f64,
        threshold: f64,
    },
}

impl AnalysisError {
    /// Creates a missing field error for the given field names.
    pub fn missing<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AnalysisError::MissingField {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a shape mismatch error.
    pub fn shape(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AnalysisError::ShapeMismatch {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a length mismatch error with a standard reason.
    pub fn length(field: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::shape(
            field,
            format!("expected {} entries, found {}", expected, actual),
        )
    }

    /// Creates a degenerate computation error.
    pub fn degenerate(step: &'static str, detail: impl Into<String>) -> Self {
        AnalysisError::DegenerateComputation {
            step,
            detail: detail.into(),
        }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AnalysisError::MissingField { .. } => ErrorCode::MissingField,
            AnalysisError::ShapeMismatch { .. } => ErrorCode::ShapeMismatch,
            AnalysisError::DegenerateComputation { .. } => ErrorCode::DegenerateComputation,
            AnalysisError::InvalidExpression { .. } => ErrorCode::InvalidExpression,
            AnalysisError::InconsistentJudgments { .. } => ErrorCode::InconsistentJudgments,
        }
    }
}

impl From<AnalysisError> for DomainError {
    fn from(err: AnalysisError) -> Self {
        let base = DomainError::new(err.code(), err.to_string());
        match err {
            AnalysisError::MissingField { fields } => base.with_detail("fields", fields.join(",")),
            AnalysisError::ShapeMismatch { field, reason } => {
                base.with_detail("field", field).with_detail("reason", reason)
            }
            AnalysisError::DegenerateComputation { step, detail } => {
                base.with_detail("step", step).with_detail("detail", detail)
            }
            AnalysisError::InvalidExpression {
                matrix,
                row,
                column,
                expression,
                ..
            } => base
                .with_detail("matrix", matrix)
                .with_detail("row", row.to_string())
                .with_detail("column", column.to_string())
                .with_detail("expression", expression),
            AnalysisError::InconsistentJudgments {
                matrix,
                ratio,
                threshold,
            } => base
                .with_detail("matrix", matrix)
                .with_detail("ratio", format!("{:.4}", ratio))
                .with_detail("threshold", format!("{:.4}", threshold)),
        }
    }
}
