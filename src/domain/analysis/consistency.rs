//! Saaty consistency ratio for pairwise comparison matrices.
//!
//! Not applied unless a caller opts in. A ratio above 0.10 is the usual
//! signal that judgments should be revisited.

use serde::{Deserialize, Serialize};

/// Conventional upper bound for an acceptable consistency ratio.
pub const DEFAULT_CONSISTENCY_THRESHOLD: f64 = 0.10;

/// Saaty's random consistency index, indexed by matrix size.
const RANDOM_INDEX: [f64; 16] = [
    0.0, 0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49, 1.51, 1.48, 1.56, 1.57, 1.59,
];

/// Consistency ratio computed for one matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixConsistency {
    pub matrix: String,
    pub ratio: f64,
}

/// Random index for an `n x n` matrix. Sizes past the table reuse its last entry.
pub fn random_index(n: usize) -> f64 {
    RANDOM_INDEX[n.min(RANDOM_INDEX.len() - 1)]
}

/// Computes `CR = CI / RI` with `CI = (λmax - n) / (n - 1)`.
///
/// λmax is estimated as the mean of `(A·w)_i / w_i`. Matrices of size 1 or 2
/// are always consistent and return 0.
pub fn consistency_ratio(matrix: &[Vec<f64>], priorities: &[f64]) -> f64 {
    let n = matrix.len();
    if n <= 2 {
        return 0.0;
    }

    let lambda_max = matrix
        .iter()
        .zip(priorities)
        .map(|(row, weight)| {
            let weighted: f64 = row.iter().zip(priorities).map(|(a, w)| a * w).sum();
            weighted / weight
        })
        .sum::<f64>()
        / n as f64;

    let consistency_index = (lambda_max - n as f64) / (n as f64 - 1.0);
    (consistency_index / random_index(n)).max(0.0)
}
