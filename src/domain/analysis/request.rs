//! Request records - decision problems as delivered by a caller.
//!
//! Every required field is optional here so that absence is reported by the
//! validator as a missing field rather than rejected during deserialization.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::expression::{self, ExpressionError};
use super::NormalizationPolicy;

/// Request payload shared by weighted scoring and TOPSIS.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRequest {
    /// Ordered criterion identifiers.
    pub criteria: Option<Vec<String>>,
    /// One weight per criterion.
    pub weights: Option<Vec<f64>>,
    /// One flag per criterion; true marks a cost-type criterion.
    pub negativity_bias: Option<Vec<bool>>,
    /// Choice identifiers.
    pub choices: Option<Vec<String>>,
    /// Raw values per choice, ordered like `criteria`.
    pub values: Option<HashMap<String, Vec<f64>>>,
    /// Normalization policy for weighted scoring. Ignored by TOPSIS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalization: Option<NormalizationPolicy>,
}

/// Request payload for AHP prioritization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AhpRequest {
    /// Ordered criterion identifiers.
    pub criteria: Option<Vec<String>>,
    /// One comparison matrix per criterion.
    pub comparisons: Option<Vec<ComparisonMatrix>>,
    /// Alternative identifiers.
    pub alternatives: Option<Vec<String>>,
    /// Pre-supplied score vector per alternative.
    pub alternative_scores: Option<HashMap<String, Vec<f64>>>,
    /// Comparison matrix over the criteria themselves. When present, each
    /// entry of `comparisons` is read as the sub-criteria matrix of the
    /// criterion at the same position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criteria_comparison: Option<ComparisonMatrix>,
    /// Opt in to the Saaty consistency-ratio check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_consistency: Option<bool>,
}

/// A single pairwise judgment, given as a number or as an arithmetic expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RatioCell {
    Number(f64),
    Expression(String),
}

impl RatioCell {
    /// Evaluates the cell to a finite number.
    pub fn evaluate(&self) -> Result<f64, ExpressionError> {
        match self {
            RatioCell::Number(value) if value.is_finite() => Ok(*value),
            RatioCell::Number(_) => Err(ExpressionError::NonFinite),
            RatioCell::Expression(text) => expression::evaluate(text),
        }
    }

    /// Returns the cell as written, for diagnostics.
    pub fn as_text(&self) -> String {
        match self {
            RatioCell::Number(value) => value.to_string(),
            RatioCell::Expression(text) => text.clone(),
        }
    }
}

impl From<f64> for RatioCell {
    fn from(value: f64) -> Self {
        RatioCell::Number(value)
    }
}

impl From<&str> for RatioCell {
    fn from(text: &str) -> Self {
        RatioCell::Expression(text.to_string())
    }
}

/// Square matrix of pairwise preference ratios.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComparisonMatrix(pub Vec<Vec<RatioCell>>);

impl ComparisonMatrix {
    /// Builds a matrix from rows of anything convertible to a cell.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<RatioCell>,
    {
        Self(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    /// Number of rows.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Returns the rows of the matrix.
    pub fn rows(&self) -> &[Vec<RatioCell>] {
        &self.0
    }

    /// Returns the index of the first row whose length differs from the row count.
    pub fn first_ragged_row(&self) -> Option<usize> {
        let n = self.size();
        self.0.iter().position(|row| row.len() != n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_request_deserializes_camel_case() {
        let json = r#"{
            "criteria": ["cost", "quality"],
            "weights": [0.5, 0.5],
            "negativityBias": [true, false],
            "choices": ["A", "B"],
            "values": {"A": [100, 8], "B": [50, 6]},
            "normalization": "signFlip"
        }"#;

        let request: DecisionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.negativity_bias, Some(vec![true, false]));
        assert_eq!(request.values.unwrap()["A"], vec![100.0, 8.0]);
        assert_eq!(request.normalization, Some(NormalizationPolicy::SignFlip));
    }

    #[test]
    fn absent_fields_deserialize_as_none() {
        let request: DecisionRequest = serde_json::from_str(r#"{"criteria": ["x"]}"#).unwrap();
        assert!(request.weights.is_none());
        assert!(request.negativity_bias.is_none());
        assert!(request.normalization.is_none());
    }

    #[test]
    fn ratio_cells_accept_numbers_and_strings() {
        let matrix: ComparisonMatrix = serde_json::from_str(r#"[[1, "3"], ["1/3", 1]]"#).unwrap();
        assert_eq!(matrix.size(), 2);
        assert_eq!(matrix.rows()[0][0], RatioCell::Number(1.0));
        assert_eq!(matrix.rows()[1][0], RatioCell::Expression("1/3".to_string()));
    }

    #[test]
    fn ratio_cell_evaluates_expression() {
        let cell = RatioCell::from("1/4");
        assert_eq!(cell.evaluate(), Ok(0.25));
        assert_eq!(RatioCell::from(2.0).evaluate(), Ok(2.0));
    }

    #[test]
    fn ragged_row_is_detected() {
        let matrix = ComparisonMatrix::from_rows(vec![vec![1.0, 2.0], vec![0.5]]);
        assert_eq!(matrix.first_ragged_row(), Some(1));

        let square = ComparisonMatrix::from_rows(vec![vec![1.0, 2.0], vec![0.5, 1.0]]);
        assert_eq!(square.first_ragged_row(), None);
    }

    #[test]
    fn ahp_request_deserializes_optional_hierarchy() {
        let json = r#"{
            "criteria": ["price"],
            "comparisons": [[[1]]],
            "alternatives": ["A"],
            "alternativeScores": {"A": [0.4]},
            "criteriaComparison": [[1]],
            "checkConsistency": true
        }"#;

        let request: AhpRequest = serde_json::from_str(json).unwrap();
        assert!(request.criteria_comparison.is_some());
        assert_eq!(request.check_consistency, Some(true));
    }
}
