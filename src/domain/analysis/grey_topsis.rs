//! Grey TOPSIS Ranker - closeness to the ideal carrier, tempered by grey relational grades.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::{CriterionDirection, DecisionMatrix, WeightVector};
use crate::domain::foundation::DecisionError;

/// Grey relational distinguishing coefficient (ρ).
pub const DISTINGUISHING_COEFFICIENT: f64 = 0.5;

/// Share of the grey closeness in the final closeness coefficient (β).
///
/// `closeness = (1 - β)·topsis + β·grey`. Fixed for every request.
pub const GREY_BLEND: f64 = 0.5;

/// One ranked alternative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAlternative {
    pub id: String,
    pub name: String,
    /// 1-based position after sorting.
    pub rank: usize,
    /// Blended closeness coefficient in [0,1].
    pub closeness: f64,
    pub topsis_closeness: f64,
    pub grey_closeness: f64,
    pub distance_to_ideal: f64,
    pub distance_to_anti_ideal: f64,
    pub is_top_choice: bool,
    pub estimated: bool,
}

/// Alternatives sorted best first; exactly one is the top choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingResult {
    pub alternatives: Vec<RankedAlternative>,
    /// Criteria whose column actually separated the alternatives.
    pub discriminating_criteria: Vec<String>,
}

impl RankingResult {
    /// The single top choice.
    pub fn top_choice(&self) -> Option<&RankedAlternative> {
        self.alternatives.iter().find(|a| a.is_top_choice)
    }

    /// Closeness of the top choice, or 0 when nothing was ranked.
    pub fn top_closeness(&self) -> f64 {
        self.top_choice().map(|a| a.closeness).unwrap_or(0.0)
    }

    pub fn get(&self, alternative_id: &str) -> Option<&RankedAlternative> {
        self.alternatives.iter().find(|a| a.id == alternative_id)
    }

    /// Alternative ids in rank order.
    pub fn order(&self) -> Vec<&str> {
        self.alternatives.iter().map(|a| a.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }
}

/// Column statistics over the weighted matrix.
struct Column {
    weight: f64,
    ideal: f64,
    anti_ideal: f64,
}

impl Column {
    fn range(&self) -> f64 {
        self.ideal - self.anti_ideal
    }
}

/// TOPSIS ranking blended with grey relational analysis.
pub struct GreyTopsisRanker;

impl GreyTopsisRanker {
    /// Ranks alternatives by closeness to the ideal solution.
    ///
    /// # Algorithm
    /// 1. Weight each column by its criterion weight
    /// 2. Ideal = column maximum, anti-ideal = column minimum
    /// 3. Grey coefficients against both references, normalized by the column range
    /// 4. Euclidean distances to both references
    /// 5. `closeness = (1 - β)·D⁻/(D⁺ + D⁻) + β·grey`
    /// 6. Sort by closeness descending, ties by id ascending
    ///
    /// Columns where every alternative scores the same carry no
    /// discriminating power and are skipped entirely. An alternative sitting
    /// on the ideal has TOPSIS closeness 1; with no discriminating columns
    /// its grey closeness is 1 as well.
    ///
    /// `directions` must match the weights in length; columns are expected
    /// to be pre-normalized to benefit orientation already.
    ///
    /// # Errors
    /// - `EmptyAlternativeSet` for zero alternatives
    /// - `DimensionMismatch` if a score row or `directions` differs in length from the weights
    pub fn rank(
        matrix: &DecisionMatrix,
        weights: &WeightVector,
        directions: &[CriterionDirection],
    ) -> Result<RankingResult, DecisionError> {
        if matrix.is_empty() {
            return Err(DecisionError::EmptyAlternativeSet);
        }
        let n = weights.len();
        if directions.len() != n {
            return Err(DecisionError::DimensionMismatch {
                alternative_id: "criteria directions".to_string(),
                expected: n,
                actual: directions.len(),
            });
        }
        for row in &matrix.rows {
            if row.scores.len() != n {
                return Err(DecisionError::DimensionMismatch {
                    alternative_id: row.id.clone(),
                    expected: n,
                    actual: row.scores.len(),
                });
            }
        }

        let weighted: Vec<Vec<f64>> = matrix
            .rows
            .iter()
            .map(|row| row.scores.iter().zip(&weights.weights).map(|(x, w)| x * w).collect())
            .collect();

        let columns: Vec<Column> = (0..n)
            .map(|j| {
                let values = weighted.iter().map(|row| row[j]);
                Column {
                    weight: weights.weights[j],
                    ideal: values.clone().fold(f64::NEG_INFINITY, f64::max),
                    anti_ideal: values.fold(f64::INFINITY, f64::min),
                }
            })
            .collect();

        let discriminating: Vec<usize> = (0..n).filter(|j| columns[*j].range() > 0.0).collect();

        let mut ranked = Vec::with_capacity(matrix.rows.len());
        for (row, values) in matrix.rows.iter().zip(&weighted) {
            let (to_ideal, to_anti_ideal) = Self::distances(values, &columns, &discriminating);
            let topsis = if to_ideal == 0.0 {
                1.0
            } else {
                to_anti_ideal / (to_ideal + to_anti_ideal)
            };
            let grey = Self::grey_closeness(values, &columns, &discriminating);
            let closeness = ((1.0 - GREY_BLEND) * topsis + GREY_BLEND * grey).clamp(0.0, 1.0);

            if !closeness.is_finite() {
                return Err(DecisionError::numeric(
                    "grey topsis",
                    format!("closeness of '{}' is not finite", row.id),
                ));
            }

            ranked.push(RankedAlternative {
                id: row.id.clone(),
                name: row.name.clone(),
                rank: 0,
                closeness,
                topsis_closeness: topsis,
                grey_closeness: grey,
                distance_to_ideal: to_ideal,
                distance_to_anti_ideal: to_anti_ideal,
                is_top_choice: false,
                estimated: row.estimated,
            });
        }

        ranked.sort_by(|a, b| {
            b.closeness
                .partial_cmp(&a.closeness)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        for (position, alternative) in ranked.iter_mut().enumerate() {
            alternative.rank = position + 1;
            alternative.is_top_choice = position == 0;
        }

        Ok(RankingResult {
            alternatives: ranked,
            discriminating_criteria: discriminating
                .iter()
                .filter_map(|j| weights.criterion_ids.get(*j).cloned())
                .collect(),
        })
    }

    fn distances(values: &[f64], columns: &[Column], discriminating: &[usize]) -> (f64, f64) {
        let mut to_ideal = 0.0;
        let mut to_anti_ideal = 0.0;
        for &j in discriminating {
            let column = &columns[j];
            to_ideal += (column.ideal - values[j]).powi(2);
            to_anti_ideal += (values[j] - column.anti_ideal).powi(2);
        }
        (to_ideal.sqrt(), to_anti_ideal.sqrt())
    }

    /// `(1 + (1+ρ)(grade⁺ - grade⁻)) / 2`: 1 on the ideal, 0 on the anti-ideal.
    fn grey_closeness(values: &[f64], columns: &[Column], discriminating: &[usize]) -> f64 {
        let rho = DISTINGUISHING_COEFFICIENT;
        let mut weight_total = 0.0;
        let mut grade_ideal = 0.0;
        let mut grade_anti_ideal = 0.0;

        for &j in discriminating {
            let column = &columns[j];
            let spread = rho * column.range();
            let coefficient_ideal = spread / ((column.ideal - values[j]) + spread);
            let coefficient_anti_ideal = spread / ((values[j] - column.anti_ideal) + spread);
            grade_ideal += column.weight * coefficient_ideal;
            grade_anti_ideal += column.weight * coefficient_anti_ideal;
            weight_total += column.weight;
        }

        if weight_total == 0.0 {
            return 1.0;
        }
        let difference = (grade_ideal - grade_anti_ideal) / weight_total;
        ((1.0 + (1.0 + rho) * difference) / 2.0).clamp(0.0, 1.0)
    }
}
