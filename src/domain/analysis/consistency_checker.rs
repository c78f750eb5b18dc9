//! Consistency Checker - neutrosophic consistency ratio (NCR) of a pairwise matrix.

use serde::{Deserialize, Serialize};

use super::{AhpWeightSolver, PairwiseMatrix};
use crate::domain::foundation::DecisionError;

/// Standard AHP acceptance threshold (inclusive).
pub const CONSISTENCY_THRESHOLD: f64 = 0.10;

/// Saaty's random consistency index for matrix orders 1 through 10.
pub const RANDOM_INDEX: [f64; 10] = [0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49];

/// Result of a consistency check. Advisory: ranking proceeds either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub order: usize,
    pub lambda_max: f64,
    pub consistency_index: f64,
    /// Neutrosophic consistency ratio.
    pub ncr: f64,
    pub is_consistent: bool,
}

/// Consistency ratio over the scalarized comparison matrix.
pub struct ConsistencyChecker;

impl ConsistencyChecker {
    /// Computes the NCR of a pairwise matrix.
    ///
    /// # Algorithm
    /// 1. Scalarize every triple (`truth - falsity`) into the crisp matrix
    /// 2. Estimate λmax as the mean of `(A·w)ᵢ / wᵢ` with geometric-mean weights
    /// 3. `CI = (λmax - n) / (n - 1)`, `NCR = CI / RI(n)`
    ///
    /// # Edge Cases
    /// - Orders 1 and 2 are always consistent (NCR = 0)
    /// - Rounding noise that makes CI slightly negative is clamped to 0
    pub fn check(matrix: &PairwiseMatrix) -> Result<ConsistencyReport, DecisionError> {
        let crisp = matrix.crisp()?;
        Self::check_crisp(&crisp)
    }

    /// Same as [`ConsistencyChecker::check`] for an already crisp matrix.
    pub fn check_crisp(crisp: &[Vec<f64>]) -> Result<ConsistencyReport, DecisionError> {
        let n = crisp.len();
        if n <= 2 {
            return Ok(ConsistencyReport {
                order: n,
                lambda_max: n as f64,
                consistency_index: 0.0,
                ncr: 0.0,
                is_consistent: true,
            });
        }

        let weights = AhpWeightSolver::geometric_mean_weights(crisp)?;
        let lambda_max = crisp
            .iter()
            .zip(&weights)
            .map(|(row, w_i)| {
                let weighted: f64 = row.iter().zip(&weights).map(|(a, w)| a * w).sum();
                weighted / w_i
            })
            .sum::<f64>()
            / n as f64;

        if !lambda_max.is_finite() {
            return Err(DecisionError::numeric(
                "consistency",
                "principal eigenvalue estimate is not finite",
            ));
        }

        let consistency_index = ((lambda_max - n as f64) / (n as f64 - 1.0)).max(0.0);
        let ncr = consistency_index / Self::random_index(n);

        Ok(ConsistencyReport {
            order: n,
            lambda_max,
            consistency_index,
            ncr,
            is_consistent: ncr <= CONSISTENCY_THRESHOLD,
        })
    }

    /// Random index for a matrix order; orders past the table use its last entry.
    pub fn random_index(order: usize) -> f64 {
        match order {
            0 => 0.0,
            n if n <= RANDOM_INDEX.len() => RANDOM_INDEX[n - 1],
            _ => RANDOM_INDEX[RANDOM_INDEX.len() - 1],
        }
    }
}
