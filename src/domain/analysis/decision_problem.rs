//! Validated decision problems - the only inputs the engines accept.
//!
//! Instances are produced by [`RequestValidator`](super::RequestValidator),
//! so every choice carries exactly one value per criterion and engines may
//! index freely.

use serde::Serialize;

use super::ComparisonMatrix;

/// A weighted criterion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Criterion {
    pub name: String,
    pub weight: f64,
    /// True when a lower raw value is better (cost-type).
    pub negativity_bias: bool,
}

impl Criterion {
    /// Creates a benefit-type criterion.
    pub fn benefit(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            negativity_bias: false,
        }
    }

    /// Creates a cost-type criterion.
    pub fn cost(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            negativity_bias: true,
        }
    }

    /// Returns true for cost-type criteria.
    pub fn is_cost(&self) -> bool {
        self.negativity_bias
    }
}

/// A named choice with one raw value per criterion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Choice {
    pub name: String,
    pub values: Vec<f64>,
}

impl Choice {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Choices x criteria problem for weighted scoring and TOPSIS.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionProblem {
    criteria: Vec<Criterion>,
    choices: Vec<Choice>,
}

impl DecisionProblem {
    pub(super) fn new(criteria: Vec<Criterion>, choices: Vec<Choice>) -> Self {
        Self { criteria, choices }
    }

    /// Criteria in request order.
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Choices in request order.
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// Raw values of every choice for the criterion at `index`.
    pub fn column(&self, index: usize) -> impl Iterator<Item = f64> + '_ {
        self.choices.iter().map(move |c| c.values[index])
    }
}

/// How AHP priority vectors combine into criterion weights.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "mode")]
pub enum Composition {
    /// Local priority vectors are concatenated and renormalized.
    Flat,
    /// Leaf weight = parent criterion priority x local sub-criterion priority.
    TwoLevel { criteria_comparison: ComparisonMatrix },
}

/// Validated AHP problem.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AhpProblem {
    criteria: Vec<String>,
    comparisons: Vec<ComparisonMatrix>,
    composition: Composition,
    alternatives: Vec<Choice>,
}

impl AhpProblem {
    pub(super) fn new(
        criteria: Vec<String>,
        comparisons: Vec<ComparisonMatrix>,
        composition: Composition,
        alternatives: Vec<Choice>,
    ) -> Self {
        Self {
            criteria,
            comparisons,
            composition,
            alternatives,
        }
    }

    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    pub fn comparisons(&self) -> &[ComparisonMatrix] {
        &self.comparisons
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    /// Alternatives with their pre-supplied scores, in request order.
    pub fn alternatives(&self) -> &[Choice] {
        &self.alternatives
    }

    /// Total number of sub-criteria across every comparison matrix.
    pub fn leaf_count(&self) -> usize {
        self.comparisons.iter().map(ComparisonMatrix::size).sum()
    }
}
