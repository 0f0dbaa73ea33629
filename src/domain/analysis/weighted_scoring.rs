//! Weighted Scoring Engine - additive weighted score per choice.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{AnalysisError, DecisionProblem};

/// How raw values are normalized before weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NormalizationPolicy {
    /// Benefit: `value / column max`. Cost: `column min / value`.
    #[default]
    Ratio,
    /// Benefit: `value`. Cost: `-value`. No rescaling.
    #[serde(alias = "sign_flip", alias = "linear")]
    SignFlip,
}

impl NormalizationPolicy {
    /// Returns the wire label for this policy.
    pub fn label(&self) -> &'static str {
        match self {
            NormalizationPolicy::Ratio => "ratio",
            NormalizationPolicy::SignFlip => "signFlip",
        }
    }
}

impl fmt::Display for NormalizationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Total weighted score of a single choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceScore {
    pub choice: String,
    pub total_score: f64,
}

/// Weighted sum scoring.
pub struct WeightedScoringEngine;

impl WeightedScoringEngine {
    /// Computes the total score of every choice.
    ///
    /// # Algorithm
    /// For each choice: score = Σ(normalized[criterion] × weight[criterion])
    ///
    /// Results keep the request's choice order. Sorting is left to the caller.
    ///
    /// # Errors
    /// Under [`NormalizationPolicy::Ratio`], a zero divisor (a cost value of
    /// zero, or a benefit column whose maximum is zero) is a
    /// `DegenerateComputation`. So is any ratio or total that overflows.
    pub fn score(
        problem: &DecisionProblem,
        policy: NormalizationPolicy,
    ) -> Result<Vec<ChoiceScore>, AnalysisError> {
        let normalized = Self::normalize(problem, policy)?;

        problem
            .choices()
            .iter()
            .zip(normalized)
            .map(|(choice, row)| {
                let total_score: f64 = row
                    .iter()
                    .zip(problem.criteria())
                    .map(|(value, criterion)| value * criterion.weight)
                    .sum();

                if !total_score.is_finite() {
                    return Err(AnalysisError::degenerate(
                        "weighted sum",
                        format!("total score of choice '{}' is not finite", choice.name),
                    ));
                }

                Ok(ChoiceScore {
                    choice: choice.name.clone(),
                    total_score,
                })
            })
            .collect()
    }

    /// Normalizes the value matrix. Rows follow choice order.
    pub fn normalize(
        problem: &DecisionProblem,
        policy: NormalizationPolicy,
    ) -> Result<Vec<Vec<f64>>, AnalysisError> {
        let mut rows: Vec<Vec<f64>> = problem
            .choices()
            .iter()
            .map(|choice| Vec::with_capacity(choice.values.len()))
            .collect();

        for (index, criterion) in problem.criteria().iter().enumerate() {
            match policy {
                NormalizationPolicy::SignFlip => {
                    for (row, value) in rows.iter_mut().zip(problem.column(index)) {
                        row.push(if criterion.is_cost() { -value } else { value });
                    }
                }
                NormalizationPolicy::Ratio => {
                    let highest = problem.column(index).fold(f64::NEG_INFINITY, f64::max);
                    let lowest = problem.column(index).fold(f64::INFINITY, f64::min);

                    if !criterion.is_cost() && highest == 0.0 {
                        return Err(AnalysisError::degenerate(
                            "ratio normalization",
                            format!("benefit criterion '{}' has a maximum of 0", criterion.name),
                        ));
                    }

                    for (row, choice) in rows.iter_mut().zip(problem.choices()) {
                        let value = choice.values[index];
                        let normalized = if criterion.is_cost() {
                            if value == 0.0 {
                                return Err(AnalysisError::degenerate(
                                    "ratio normalization",
                                    format!(
                                        "cost criterion '{}' has a value of 0 for choice '{}'",
                                        criterion.name, choice.name
                                    ),
                                ));
                            }
                            lowest / value
                        } else {
                            value / highest
                        };
                        if !normalized.is_finite() {
                            return Err(AnalysisError::degenerate(
                                "ratio normalization",
                                format!(
                                    "criterion '{}' gives choice '{}' a non-finite ratio",
                                    criterion.name, choice.name
                                ),
                            ));
                        }
                        row.push(normalized);
                    }
                }
            }
        }

        Ok(rows)
    }
}
