//! TOPSIS Engine - ranking by relative closeness to the ideal solution.

use serde::{Deserialize, Serialize};

use super::ranking::sort_descending_by;
use super::{AnalysisError, DecisionProblem};

/// Closeness coefficient of a single choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceCloseness {
    pub choice: String,
    /// `negative_separation / (positive_separation + negative_separation)`, in [0, 1].
    pub closeness: f64,
    /// Euclidean distance to the ideal solution.
    pub positive_separation: f64,
    /// Euclidean distance to the negative-ideal solution.
    pub negative_separation: f64,
}

/// Full TOPSIS computation, including intermediate matrices.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopsisOutcome {
    /// Choices sorted by descending closeness.
    pub ranked: Vec<ChoiceCloseness>,
    /// Vector-normalized values, rows in request choice order.
    pub normalized: Vec<Vec<f64>>,
    /// Normalized values multiplied by criterion weights.
    pub weighted: Vec<Vec<f64>>,
    pub ideal: Vec<f64>,
    pub negative_ideal: Vec<f64>,
}

/// Technique for Order of Preference by Similarity to Ideal Solution.
pub struct TopsisEngine;

impl TopsisEngine {
    /// Ranks every choice by closeness coefficient.
    ///
    /// # Algorithm
    /// 1. Vector normalization: value / sqrt(Σ column²)
    /// 2. Weighting by criterion weight
    /// 3. Ideal = best weighted value per criterion (min for cost, max for
    ///    benefit); negative-ideal = worst
    /// 4. Euclidean separation from both
    /// 5. Closeness = negative / (positive + negative)
    /// 6. Stable sort, highest closeness first
    ///
    /// # Errors
    /// - A criterion whose values are all zero has no normalization
    ///   denominator
    /// - A choice at zero distance from both ideal points has an undefined
    ///   closeness (only happens when every choice is identical)
    pub fn rank(problem: &DecisionProblem) -> Result<TopsisOutcome, AnalysisError> {
        let normalized = Self::vector_normalize(problem)?;

        let weighted: Vec<Vec<f64>> = normalized
            .iter()
            .map(|row| {
                row.iter()
                    .zip(problem.criteria())
                    .map(|(value, criterion)| value * criterion.weight)
                    .collect()
            })
            .collect();

        let (ideal, negative_ideal) = Self::ideal_points(problem, &weighted);

        let mut ranked = Vec::with_capacity(weighted.len());
        for (choice, row) in problem.choices().iter().zip(&weighted) {
            let positive_separation = euclidean_distance(row, &ideal);
            let negative_separation = euclidean_distance(row, &negative_ideal);
            let total = positive_separation + negative_separation;

            if !total.is_finite() {
                return Err(AnalysisError::degenerate(
                    "closeness coefficient",
                    format!("separations of choice '{}' are not finite", choice.name),
                ));
            }
            if total == 0.0 {
                return Err(AnalysisError::degenerate(
                    "closeness coefficient",
                    format!(
                        "choice '{}' coincides with both the ideal and negative-ideal solutions",
                        choice.name
                    ),
                ));
            }

            ranked.push(ChoiceCloseness {
                choice: choice.name.clone(),
                closeness: negative_separation / total,
                positive_separation,
                negative_separation,
            });
        }

        sort_descending_by(&mut ranked, |c| c.closeness);

        Ok(TopsisOutcome {
            ranked,
            normalized,
            weighted,
            ideal,
            negative_ideal,
        })
    }

    /// Divides each value by the Euclidean norm of its criterion column.
    pub fn vector_normalize(problem: &DecisionProblem) -> Result<Vec<Vec<f64>>, AnalysisError> {
        let denominators = problem
            .criteria()
            .iter()
            .enumerate()
            .map(|(index, criterion)| {
                // hypot keeps large but finite columns from overflowing the sum of squares.
                let denominator = problem.column(index).fold(0.0, f64::hypot);
                if denominator == 0.0 {
                    Err(AnalysisError::degenerate(
                        "vector normalization",
                        format!("criterion '{}' has only zero values", criterion.name),
                    ))
                } else if !denominator.is_finite() {
                    Err(AnalysisError::degenerate(
                        "vector normalization",
                        format!("criterion '{}' has a non-finite norm", criterion.name),
                    ))
                } else {
                    Ok(denominator)
                }
            })
            .collect::<Result<Vec<f64>, _>>()?;

        Ok(problem
            .choices()
            .iter()
            .map(|choice| {
                choice
                    .values
                    .iter()
                    .zip(&denominators)
                    .map(|(value, denominator)| value / denominator)
                    .collect()
            })
            .collect())
    }

    /// Returns the ideal and negative-ideal vectors for the weighted matrix.
    fn ideal_points(problem: &DecisionProblem, weighted: &[Vec<f64>]) -> (Vec<f64>, Vec<f64>) {
        problem
            .criteria()
            .iter()
            .enumerate()
            .map(|(index, criterion)| {
                let column = weighted.iter().map(|row| row[index]);
                let highest = column.clone().fold(f64::NEG_INFINITY, f64::max);
                let lowest = column.fold(f64::INFINITY, f64::min);
                if criterion.is_cost() {
                    (lowest, highest)
                } else {
                    (highest, lowest)
                }
            })
            .unzip()
    }
}

fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).fold(0.0, |acc, (x, y)| acc.hypot(x - y))
}
