//! Request Validator - structural checks that run before any numeric work.
//!
//! Missing fields are reported together in one error. Length invariants are
//! checked afterwards, stopping at the first violation.

use std::collections::{HashMap, HashSet};

use super::{
    AhpProblem, AhpRequest, AnalysisError, Choice, ComparisonMatrix, Composition, Criterion,
    DecisionProblem, DecisionRequest,
};

/// Validation functions for incoming decision problems.
pub struct RequestValidator;

impl RequestValidator {
    /// Validates a weighted scoring or TOPSIS request.
    ///
    /// # Checks
    /// 1. `criteria`, `weights`, `negativityBias`, `choices` present and non-empty,
    ///    `values` present
    /// 2. `weights` and `negativityBias` have one entry per criterion
    /// 3. Choice identifiers are unique
    /// 4. Every choice has a `values` entry with one value per criterion
    pub fn validate_decision(request: &DecisionRequest) -> Result<DecisionProblem, AnalysisError> {
        let mut missing = Vec::new();
        let criteria = required_list(&request.criteria, "criteria", &mut missing);
        let weights = required_list(&request.weights, "weights", &mut missing);
        let bias = required_list(&request.negativity_bias, "negativityBias", &mut missing);
        let choices = required_list(&request.choices, "choices", &mut missing);
        let values = required_map(&request.values, "values", &mut missing);

        let (Some(criteria), Some(weights), Some(bias), Some(choices), Some(values)) =
            (criteria, weights, bias, choices, values)
        else {
            return Err(AnalysisError::MissingField { fields: missing });
        };

        if weights.len() != criteria.len() {
            return Err(AnalysisError::length("weights", criteria.len(), weights.len()));
        }
        if bias.len() != criteria.len() {
            return Err(AnalysisError::length(
                "negativityBias",
                criteria.len(),
                bias.len(),
            ));
        }
        ensure_unique(choices, "choices")?;

        let rows = collect_rows(choices, values, "values", criteria.len())?;

        let criteria = criteria
            .iter()
            .zip(weights)
            .zip(bias)
            .map(|((name, &weight), &negativity_bias)| Criterion {
                name: name.clone(),
                weight,
                negativity_bias,
            })
            .collect();

        Ok(DecisionProblem::new(criteria, rows))
    }

    /// Validates an AHP request.
    ///
    /// # Checks
    /// 1. `criteria`, `comparisons`, `alternatives` present and non-empty,
    ///    `alternativeScores` present
    /// 2. One comparison matrix per criterion, each non-empty and square
    /// 3. `criteriaComparison`, when given, is square over the criteria
    /// 4. Alternative identifiers are unique
    /// 5. Every alternative has a score vector: one entry per criterion, or one
    ///    per sub-criterion when `criteriaComparison` is given
    pub fn validate_ahp(request: &AhpRequest) -> Result<AhpProblem, AnalysisError> {
        let mut missing = Vec::new();
        let criteria = required_list(&request.criteria, "criteria", &mut missing);
        let comparisons = required_list(&request.comparisons, "comparisons", &mut missing);
        let alternatives = required_list(&request.alternatives, "alternatives", &mut missing);
        let scores = required_map(
            &request.alternative_scores,
            "alternativeScores",
            &mut missing,
        );

        let (Some(criteria), Some(comparisons), Some(alternatives), Some(scores)) =
            (criteria, comparisons, alternatives, scores)
        else {
            return Err(AnalysisError::MissingField { fields: missing });
        };

        if comparisons.len() != criteria.len() {
            return Err(AnalysisError::length(
                "comparisons",
                criteria.len(),
                comparisons.len(),
            ));
        }
        for (index, matrix) in comparisons.iter().enumerate() {
            check_square(&format!("comparisons[{}]", index), matrix)?;
        }

        let composition = match &request.criteria_comparison {
            Some(matrix) => {
                check_square("criteriaComparison", matrix)?;
                if matrix.size() != criteria.len() {
                    return Err(AnalysisError::length(
                        "criteriaComparison",
                        criteria.len(),
                        matrix.size(),
                    ));
                }
                Composition::TwoLevel {
                    criteria_comparison: matrix.clone(),
                }
            }
            None => Composition::Flat,
        };

        ensure_unique(alternatives, "alternatives")?;

        let expected_len = match composition {
            Composition::Flat => criteria.len(),
            Composition::TwoLevel { .. } => comparisons.iter().map(ComparisonMatrix::size).sum(),
        };
        let rows = collect_rows(alternatives, scores, "alternativeScores", expected_len)?;

        Ok(AhpProblem::new(
            criteria.to_vec(),
            comparisons.to_vec(),
            composition,
            rows,
        ))
    }
}

/// Returns the list when present and non-empty, otherwise records it as missing.
fn required_list<'a, T>(
    value: &'a Option<Vec<T>>,
    field: &str,
    missing: &mut Vec<String>,
) -> Option<&'a [T]> {
    match value {
        Some(list) if !list.is_empty() => Some(list.as_slice()),
        _ => {
            missing.push(field.to_string());
            None
        }
    }
}

fn required_map<'a, V>(
    value: &'a Option<HashMap<String, V>>,
    field: &str,
    missing: &mut Vec<String>,
) -> Option<&'a HashMap<String, V>> {
    if value.is_none() {
        missing.push(field.to_string());
    }
    value.as_ref()
}

fn ensure_unique(ids: &[String], field: &str) -> Result<(), AnalysisError> {
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(id.as_str()) {
            return Err(AnalysisError::shape(
                field,
                format!("duplicate identifier '{}'", id),
            ));
        }
    }
    Ok(())
}

fn check_square(field: &str, matrix: &ComparisonMatrix) -> Result<(), AnalysisError> {
    if matrix.size() == 0 {
        return Err(AnalysisError::shape(field, "matrix has no rows"));
    }
    if let Some(row) = matrix.first_ragged_row() {
        return Err(AnalysisError::shape(
            field,
            format!(
                "row {} has {} entries, expected {}",
                row,
                matrix.rows()[row].len(),
                matrix.size()
            ),
        ));
    }
    Ok(())
}

/// Looks up one row per identifier, reporting every missing entry at once.
fn collect_rows(
    ids: &[String],
    table: &HashMap<String, Vec<f64>>,
    field: &str,
    expected_len: usize,
) -> Result<Vec<Choice>, AnalysisError> {
    let absent: Vec<String> = ids
        .iter()
        .filter(|id| !table.contains_key(id.as_str()))
        .map(|id| format!("{}.{}", field, id))
        .collect();
    if !absent.is_empty() {
        return Err(AnalysisError::MissingField { fields: absent });
    }

    ids.iter()
        .map(|id| {
            let row = &table[id.as_str()];
            if row.len() != expected_len {
                return Err(AnalysisError::length(
                    format!("{}.{}", field, id),
                    expected_len,
                    row.len(),
                ));
            }
            Ok(Choice::new(id.clone(), row.clone()))
        })
        .collect()
}
