//! AHP Engine - criterion weights from pairwise comparisons.
//!
//! Priorities are derived with the row geometric-mean method. Consistency of
//! the judgments is only checked when requested through [`AhpOptions`].

use serde::{Deserialize, Serialize};

use super::consistency::{consistency_ratio, MatrixConsistency, DEFAULT_CONSISTENCY_THRESHOLD};
use super::ranking::sort_descending_by;
use super::{AhpProblem, AnalysisError, ComparisonMatrix, Composition};

/// Run options for [`AhpEngine::rank`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AhpOptions {
    /// Reject matrices whose consistency ratio exceeds the threshold.
    pub check_consistency: bool,
    pub consistency_threshold: f64,
}

impl Default for AhpOptions {
    fn default() -> Self {
        Self {
            check_consistency: false,
            consistency_threshold: DEFAULT_CONSISTENCY_THRESHOLD,
        }
    }
}

/// Total score of a single alternative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeScore {
    pub alternative: String,
    pub total_score: f64,
}

/// Full AHP computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AhpOutcome {
    /// Alternatives sorted by descending total score.
    pub ranked: Vec<AlternativeScore>,
    /// Priority vector of each comparison matrix, in request order.
    pub local_priorities: Vec<Vec<f64>>,
    /// Priorities of the criteria themselves (two-level composition only).
    pub criteria_priorities: Option<Vec<f64>>,
    /// Global weights applied to alternative scores. Sums to 1.
    pub criteria_weights: Vec<f64>,
    /// Present when the consistency check ran.
    pub consistency: Option<Vec<MatrixConsistency>>,
}

/// Analytic Hierarchy Process.
pub struct AhpEngine;

impl AhpEngine {
    /// Derives criterion weights and ranks the alternatives.
    ///
    /// # Algorithm
    /// 1. Evaluate every cell to a positive ratio
    /// 2. Local priorities: row geometric means, normalized to sum to 1
    /// 3. Global weights:
    ///    - flat: concatenate local priorities and renormalize
    ///    - two-level: parent criterion priority × local priority
    /// 4. Alternative score = Σ(score[i] × weight[i])
    /// 5. Stable sort, highest score first
    ///
    /// In flat composition each alternative supplies one score per criterion,
    /// so only the first `criteria.len()` global weights take part in the sum.
    pub fn rank(problem: &AhpProblem, options: AhpOptions) -> Result<AhpOutcome, AnalysisError> {
        let mut consistency = Vec::new();

        let mut local_priorities = Vec::with_capacity(problem.comparisons().len());
        for (index, matrix) in problem.comparisons().iter().enumerate() {
            let label = format!("comparisons[{}]", index);
            let priorities = Self::prioritize(&label, matrix, options, &mut consistency)?;
            local_priorities.push(priorities);
        }

        let (criteria_priorities, criteria_weights) = match problem.composition() {
            Composition::Flat => (None, Self::flatten(&local_priorities)?),
            Composition::TwoLevel {
                criteria_comparison,
            } => {
                let parent = Self::prioritize(
                    "criteriaComparison",
                    criteria_comparison,
                    options,
                    &mut consistency,
                )?;
                let weights = Self::compose(&parent, &local_priorities);
                (Some(parent), weights)
            }
        };

        let mut ranked = problem
            .alternatives()
            .iter()
            .map(|alternative| {
                let total_score: f64 = alternative
                    .values
                    .iter()
                    .zip(&criteria_weights)
                    .map(|(score, weight)| score * weight)
                    .sum();

                if !total_score.is_finite() {
                    return Err(AnalysisError::degenerate(
                        "alternative scoring",
                        format!(
                            "total score of alternative '{}' is not finite",
                            alternative.name
                        ),
                    ));
                }

                Ok(AlternativeScore {
                    alternative: alternative.name.clone(),
                    total_score,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        sort_descending_by(&mut ranked, |a| a.total_score);

        Ok(AhpOutcome {
            ranked,
            local_priorities,
            criteria_priorities,
            criteria_weights,
            consistency: options.check_consistency.then_some(consistency),
        })
    }

    /// Evaluates every cell of a matrix to a strictly positive finite ratio.
    pub fn evaluate_matrix(
        label: &str,
        matrix: &ComparisonMatrix,
    ) -> Result<Vec<Vec<f64>>, AnalysisError> {
        matrix
            .rows()
            .iter()
            .enumerate()
            .map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .map(|(column, cell)| {
                        let invalid = |reason: String| AnalysisError::InvalidExpression {
                            matrix: label.to_string(),
                            row,
                            column,
                            expression: cell.as_text(),
                            reason,
                        };
                        let value = cell.evaluate().map_err(|e| invalid(e.to_string()))?;
                        if value <= 0.0 {
                            return Err(invalid("ratio must be positive".to_string()));
                        }
                        Ok(value)
                    })
                    .collect::<Result<Vec<f64>, _>>()
            })
            .collect()
    }

    /// Row geometric means normalized to sum to 1.
    pub fn priority_vector(label: &str, values: &[Vec<f64>]) -> Result<Vec<f64>, AnalysisError> {
        // Mean of logarithms keeps large products from overflowing.
        let means: Vec<f64> = values
            .iter()
            .map(|row| (row.iter().map(|v| v.ln()).sum::<f64>() / row.len() as f64).exp())
            .collect();

        let total: f64 = means.iter().sum();
        if !(total.is_finite() && total > 0.0) {
            return Err(AnalysisError::degenerate(
                "geometric-mean prioritization",
                format!("row geometric means of {} do not sum to a positive number", label),
            ));
        }

        Ok(means.into_iter().map(|m| m / total).collect())
    }

    fn prioritize(
        label: &str,
        matrix: &ComparisonMatrix,
        options: AhpOptions,
        consistency: &mut Vec<MatrixConsistency>,
    ) -> Result<Vec<f64>, AnalysisError> {
        let values = Self::evaluate_matrix(label, matrix)?;
        let priorities = Self::priority_vector(label, &values)?;

        if options.check_consistency {
            let ratio = consistency_ratio(&values, &priorities);
            if ratio > options.consistency_threshold {
                return Err(AnalysisError::InconsistentJudgments {
                    matrix: label.to_string(),
                    ratio,
                    threshold: options.consistency_threshold,
                });
            }
            consistency.push(MatrixConsistency {
                matrix: label.to_string(),
                ratio,
            });
        }

        Ok(priorities)
    }

    /// Concatenates local priorities and renormalizes them to sum to 1.
    fn flatten(local_priorities: &[Vec<f64>]) -> Result<Vec<f64>, AnalysisError> {
        let flattened: Vec<f64> = local_priorities.iter().flatten().copied().collect();
        let total: f64 = flattened.iter().sum();
        if total <= 0.0 {
            return Err(AnalysisError::degenerate(
                "weight flattening",
                "local priorities sum to zero",
            ));
        }
        Ok(flattened.into_iter().map(|w| w / total).collect())
    }

    /// Multiplies each local priority by its parent criterion's priority.
    fn compose(parent: &[f64], local_priorities: &[Vec<f64>]) -> Vec<f64> {
        parent
            .iter()
            .zip(local_priorities)
            .flat_map(|(parent_weight, local)| local.iter().map(move |w| parent_weight * w))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::Choice;
    use crate::domain::foundation::ErrorCode;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn comparisons() -> Vec<ComparisonMatrix> {
        vec![
            ComparisonMatrix::from_rows(vec![vec!["1", "3"], vec!["1/3", "1"]]),
            ComparisonMatrix::from_rows(vec![vec![1.0]]),
        ]
    }

    fn flat_problem() -> AhpProblem {
        AhpProblem::new(
            vec!["price".into(), "comfort".into()],
            comparisons(),
            Composition::Flat,
            vec![
                Choice::new("Y", vec![0.3, 0.8]),
                Choice::new("X", vec![0.7, 0.2]),
            ],
        )
    }

    fn two_level_problem() -> AhpProblem {
        AhpProblem::new(
            vec!["price".into(), "comfort".into()],
            comparisons(),
            Composition::TwoLevel {
                criteria_comparison: ComparisonMatrix::from_rows(vec![
                    vec!["1", "2"],
                    vec!["1/2", "1"],
                ]),
            },
            vec![
                Choice::new("X", vec![0.7, 0.2, 0.5]),
                Choice::new("Y", vec![0.3, 0.8, 0.5]),
            ],
        )
    }

    #[test]
    fn local_priorities_sum_to_one() {
        let values = vec![
            vec![1.0, 2.0, 4.0],
            vec![0.5, 1.0, 2.0],
            vec![0.25, 0.5, 1.0],
        ];

        let priorities = AhpEngine::priority_vector("m", &values).unwrap();
        assert!(approx(priorities.iter().sum::<f64>(), 1.0));
        assert!(approx(priorities[0], 4.0 / 7.0));
        assert!(approx(priorities[2], 1.0 / 7.0));
    }

    #[test]
    fn flat_composition_renormalizes_concatenated_priorities() {
        let outcome = AhpEngine::rank(&flat_problem(), AhpOptions::default()).unwrap();

        assert!(approx(outcome.local_priorities[0][0], 0.75));
        assert!(approx(outcome.local_priorities[1][0], 1.0));
        assert_eq!(outcome.criteria_weights.len(), 3);
        assert!(approx(outcome.criteria_weights[0], 0.375));
        assert!(approx(outcome.criteria_weights[1], 0.125));
        assert!(approx(outcome.criteria_weights[2], 0.5));
        assert!(approx(outcome.criteria_weights.iter().sum::<f64>(), 1.0));
        assert!(outcome.criteria_priorities.is_none());
    }

    #[test]
    fn flat_composition_ranks_descending() {
        let outcome = AhpEngine::rank(&flat_problem(), AhpOptions::default()).unwrap();

        assert_eq!(outcome.ranked[0].alternative, "X");
        assert!(approx(outcome.ranked[0].total_score, 0.2875));
        assert_eq!(outcome.ranked[1].alternative, "Y");
        assert!(approx(outcome.ranked[1].total_score, 0.2125));
    }

    #[test]
    fn two_level_composition_multiplies_parent_weights() {
        let outcome = AhpEngine::rank(&two_level_problem(), AhpOptions::default()).unwrap();

        let parent = outcome.criteria_priorities.as_ref().unwrap();
        assert!(approx(parent[0], 2.0 / 3.0));
        assert!(approx(outcome.criteria_weights[0], 0.5));
        assert!(approx(outcome.criteria_weights[1], 1.0 / 6.0));
        assert!(approx(outcome.criteria_weights[2], 1.0 / 3.0));
        assert!(approx(outcome.criteria_weights.iter().sum::<f64>(), 1.0));

        assert_eq!(outcome.ranked[0].alternative, "X");
        assert!(approx(outcome.ranked[0].total_score, 0.55));
        assert!(approx(outcome.ranked[1].total_score, 0.45));
    }

    #[test]
    fn invalid_expression_names_the_cell() {
        let matrix = ComparisonMatrix::from_rows(vec![vec!["1", "abc"], vec!["1/3", "1"]]);

        let err = AhpEngine::evaluate_matrix("comparisons[0]", &matrix).unwrap_err();
        match err {
            AnalysisError::InvalidExpression {
                matrix,
                row,
                column,
                expression,
                ..
            } => {
                assert_eq!(matrix, "comparisons[0]");
                assert_eq!((row, column), (0, 1));
                assert_eq!(expression, "abc");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn non_positive_ratio_is_invalid() {
        let matrix = ComparisonMatrix::from_rows(vec![vec!["1", "0"], vec!["1/3", "1"]]);
        let err = AhpEngine::evaluate_matrix("m", &matrix).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidExpression);

        let matrix = ComparisonMatrix::from_rows(vec![vec!["1", "-3"], vec!["1/3", "1"]]);
        assert!(AhpEngine::evaluate_matrix("m", &matrix).is_err());
    }

    #[test]
    fn division_by_zero_cell_is_invalid() {
        let matrix = ComparisonMatrix::from_rows(vec![vec!["1", "1/0"], vec!["3", "1"]]);
        let err = AhpEngine::evaluate_matrix("m", &matrix).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidExpression);
    }

    #[test]
    fn non_finite_total_is_degenerate() {
        let problem = AhpProblem::new(
            vec!["price".into(), "comfort".into()],
            comparisons(),
            Composition::Flat,
            vec![
                Choice::new("X", vec![0.7, 0.2]),
                Choice::new("Y", vec![f64::INFINITY, f64::NEG_INFINITY]),
            ],
        );

        let err = AhpEngine::rank(&problem, AhpOptions::default()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::DegenerateComputation);
        assert!(err.to_string().contains("alternative 'Y'"));
    }

    #[test]
    fn consistency_is_skipped_by_default() {
        let outcome = AhpEngine::rank(&flat_problem(), AhpOptions::default()).unwrap();
        assert!(outcome.consistency.is_none());
    }

    #[test]
    fn consistency_ratios_reported_when_checked() {
        let options = AhpOptions {
            check_consistency: true,
            ..AhpOptions::default()
        };

        let outcome = AhpEngine::rank(&two_level_problem(), options).unwrap();
        let consistency = outcome.consistency.unwrap();
        assert_eq!(consistency.len(), 3);
        assert_eq!(consistency[2].matrix, "criteriaComparison");
        assert!(consistency.iter().all(|c| c.ratio == 0.0));
    }

    #[test]
    fn inconsistent_matrix_is_rejected_when_checked() {
        let problem = AhpProblem::new(
            vec!["a".into()],
            vec![ComparisonMatrix::from_rows(vec![
                vec!["1", "9", "1/9"],
                vec!["1/9", "1", "9"],
                vec!["9", "1/9", "1"],
            ])],
            Composition::Flat,
            vec![Choice::new("X", vec![1.0])],
        );

        assert!(AhpEngine::rank(&problem, AhpOptions::default()).is_ok());

        let options = AhpOptions {
            check_consistency: true,
            ..AhpOptions::default()
        };
        let err = AhpEngine::rank(&problem, options).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InconsistentJudgments);
    }
}
