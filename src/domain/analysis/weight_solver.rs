//! AHP Weight Solver - criterion priorities from a pairwise matrix.

use serde::{Deserialize, Serialize};

use super::PairwiseMatrix;
use crate::domain::foundation::DecisionError;
use crate::domain::neutrosophic::NeutrosophicNumber;

/// Normalized criterion weights, positionally aligned with the criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub criterion_ids: Vec<String>,
    pub weights: Vec<f64>,
    /// Neutrosophic reading of each weight under the matrix uncertainty.
    pub neutrosophic: Vec<NeutrosophicNumber>,
}

impl WeightVector {
    /// Builds a weight vector directly, renormalizing to sum to one.
    ///
    /// # Errors
    /// `DimensionMismatch` if ids and weights differ in length,
    /// `DegenerateMatrix` if any weight is not positive and finite.
    pub fn from_weights(criterion_ids: Vec<String>, weights: Vec<f64>) -> Result<Self, DecisionError> {
        if criterion_ids.len() != weights.len() {
            return Err(DecisionError::DimensionMismatch {
                alternative_id: "weights".to_string(),
                expected: criterion_ids.len(),
                actual: weights.len(),
            });
        }
        let weights = normalize_positive(weights)?;
        let neutrosophic = weights
            .iter()
            .map(|w| NeutrosophicNumber::from_weight(*w, 0.0))
            .collect();
        Ok(Self {
            criterion_ids,
            weights,
            neutrosophic,
        })
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Weight of a criterion by id.
    pub fn weight_of(&self, criterion_id: &str) -> Option<f64> {
        self.criterion_ids
            .iter()
            .position(|id| id == criterion_id)
            .map(|i| self.weights[i])
    }

    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }
}

/// Derives weights with the row geometric mean of the crisp matrix.
///
/// The geometric mean is exact for consistent matrices and is computed in
/// log space so large orders cannot overflow the row products.
pub struct AhpWeightSolver;

impl AhpWeightSolver {
    /// Solves the weight vector for a neutrosophic pairwise matrix.
    ///
    /// # Errors
    /// - `DegenerateMatrix` if a comparison has no positive finite ratio
    /// - `NumericFailure` if the log-space computation leaves the finite range
    pub fn solve(matrix: &PairwiseMatrix) -> Result<WeightVector, DecisionError> {
        let crisp = matrix.crisp()?;
        let weights = Self::geometric_mean_weights(&crisp)?;
        let neutrosophic = weights
            .iter()
            .map(|w| NeutrosophicNumber::from_weight(*w, matrix.uncertainty()))
            .collect();

        Ok(WeightVector {
            criterion_ids: matrix.criterion_ids().to_vec(),
            weights,
            neutrosophic,
        })
    }

    /// Geometric-mean priorities of a positive reciprocal matrix.
    pub fn geometric_mean_weights(crisp: &[Vec<f64>]) -> Result<Vec<f64>, DecisionError> {
        let n = crisp.len();
        if n == 0 {
            return Err(DecisionError::degenerate("matrix has no rows"));
        }

        let mut log_means = Vec::with_capacity(n);
        for (i, row) in crisp.iter().enumerate() {
            if row.len() != n {
                return Err(DecisionError::degenerate(format!(
                    "row {} has {} entries in a matrix of order {}",
                    i,
                    row.len(),
                    n
                )));
            }
            if row.iter().any(|a| !a.is_finite() || *a <= 0.0) {
                return Err(DecisionError::degenerate(format!(
                    "row {} contains a zero, negative, or non-finite comparison",
                    i
                )));
            }
            log_means.push(row.iter().map(|a| a.ln()).sum::<f64>() / n as f64);
        }

        // Shift by the largest log so the biggest priority is exp(0) = 1.
        let max_log = log_means.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let raw: Vec<f64> = log_means.iter().map(|l| (l - max_log).exp()).collect();

        normalize_positive(raw).map_err(|_| {
            DecisionError::numeric("ahp weights", "geometric mean produced no positive weight")
        })
    }
}

fn normalize_positive(values: Vec<f64>) -> Result<Vec<f64>, DecisionError> {
    if values.iter().any(|v| !v.is_finite() || *v <= 0.0) {
        return Err(DecisionError::degenerate("weight vector is not strictly positive"));
    }
    let sum: f64 = values.iter().sum();
    if !sum.is_finite() || sum <= 0.0 {
        return Err(DecisionError::numeric("weight normalization", format!("sum is {}", sum)));
    }
    Ok(values.into_iter().map(|v| v / sum).collect())
}
