//! Pairwise Matrix - neutrosophic comparison of every criterion against every other.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::criteria::{validate_criteria, Criterion};
use crate::domain::foundation::{DecisionError, UnitInterval};
use crate::domain::neutrosophic::NeutrosophicNumber;

/// Uncertainty factor used when the caller does not supply one.
pub const DEFAULT_UNCERTAINTY: f64 = 0.10;

/// An expert judgment "row criterion versus column criterion".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    pub row: String,
    pub column: String,
    pub value: NeutrosophicNumber,
}

impl Judgment {
    pub fn new(row: impl Into<String>, column: impl Into<String>, value: NeutrosophicNumber) -> Self {
        Self {
            row: row.into(),
            column: column.into(),
            value,
        }
    }
}

/// Square matrix of neutrosophic comparisons, one row/column per criterion.
///
/// The diagonal is always the identity comparison. Built once per request
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairwiseMatrix {
    criterion_ids: Vec<String>,
    cells: Vec<Vec<NeutrosophicNumber>>,
    uncertainty: f64,
    /// Exact weight ratios when built from weights. The triples saturate at
    /// truth 1 for large ratios, so decoding them would lose the ratio.
    #[serde(skip)]
    ratios: Option<Vec<Vec<f64>>>,
}

impl PairwiseMatrix {
    /// Assembles a matrix from expert judgments.
    ///
    /// Exactly one judgment is expected per unordered pair of criteria; the
    /// opposite cell is filled with its reciprocal and the diagonal with the
    /// identity. The matrix uncertainty is the mean judgment indeterminacy.
    ///
    /// # Errors
    /// `InvalidCriteria` for fewer than two criteria, unknown or repeated
    /// pairs, self-comparisons, or missing pairs.
    pub fn from_judgments(
        criterion_ids: Vec<String>,
        judgments: &[Judgment],
    ) -> Result<Self, DecisionError> {
        let n = criterion_ids.len();
        if n < 2 {
            return Err(DecisionError::invalid_criteria(format!(
                "at least 2 criteria are required, got {}",
                n
            )));
        }

        let index: HashMap<&str, usize> = criterion_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();
        if index.len() != n {
            return Err(DecisionError::invalid_criteria("duplicate criterion id"));
        }

        let mut slots: Vec<Vec<Option<NeutrosophicNumber>>> = vec![vec![None; n]; n];
        for judgment in judgments {
            let lookup = |id: &str| {
                index.get(id).copied().ok_or_else(|| {
                    DecisionError::invalid_criteria(format!("unknown criterion '{}' in judgment", id))
                })
            };
            let i = lookup(&judgment.row)?;
            let j = lookup(&judgment.column)?;
            if i == j {
                return Err(DecisionError::invalid_criteria(format!(
                    "'{}' cannot be judged against itself",
                    judgment.row
                )));
            }
            if slots[i][j].is_some() {
                return Err(DecisionError::invalid_criteria(format!(
                    "pair '{}'/'{}' judged more than once",
                    judgment.row, judgment.column
                )));
            }
            slots[i][j] = Some(judgment.value);
            slots[j][i] = Some(judgment.value.reciprocal());
        }

        let mut cells = Vec::with_capacity(n);
        for (i, row) in slots.into_iter().enumerate() {
            let mut filled = Vec::with_capacity(n);
            for (j, slot) in row.into_iter().enumerate() {
                if i == j {
                    filled.push(NeutrosophicNumber::IDENTITY);
                    continue;
                }
                let value = slot.ok_or_else(|| {
                    DecisionError::invalid_criteria(format!(
                        "missing judgment for '{}' versus '{}'",
                        criterion_ids[i], criterion_ids[j]
                    ))
                })?;
                filled.push(value);
            }
            cells.push(filled);
        }

        let uncertainty = if judgments.is_empty() {
            0.0
        } else {
            judgments.iter().map(|j| j.value.indeterminacy()).sum::<f64>() / judgments.len() as f64
        };

        Ok(Self {
            criterion_ids,
            cells,
            uncertainty,
            ratios: None,
        })
    }

    /// Number of criteria (rows and columns).
    pub fn order(&self) -> usize {
        self.criterion_ids.len()
    }

    pub fn criterion_ids(&self) -> &[String] {
        &self.criterion_ids
    }

    /// The comparison of criterion `row` against criterion `column`.
    pub fn cell(&self, row: usize, column: usize) -> Option<&NeutrosophicNumber> {
        self.cells.get(row).and_then(|r| r.get(column))
    }

    pub fn rows(&self) -> &[Vec<NeutrosophicNumber>] {
        &self.cells
    }

    /// Uncertainty factor the matrix was built with.
    pub fn uncertainty(&self) -> f64 {
        self.uncertainty
    }

    /// Equivalent crisp comparison matrix.
    ///
    /// Matrices built from weights return their exact ratios. For expert
    /// judgments each off-diagonal triple is scalarized with
    /// `truth - falsity` and the score mapped back onto a ratio with
    /// `(1 + s) / (1 - s)`; diagonal cells are exactly 1.
    ///
    /// # Errors
    /// `DegenerateMatrix` when a judgment score of ±1 would make a ratio
    /// zero or unbounded.
    pub fn crisp(&self) -> Result<Vec<Vec<f64>>, DecisionError> {
        if let Some(ratios) = &self.ratios {
            return Ok(ratios.clone());
        }

        let n = self.order();
        let mut crisp = vec![vec![1.0; n]; n];
        for (i, row) in self.cells.iter().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                if i == j {
                    continue;
                }
                let ratio = score_to_ratio(cell.score());
                if !ratio.is_finite() || ratio <= 0.0 {
                    return Err(DecisionError::degenerate(format!(
                        "comparison '{}' versus '{}' has no finite positive ratio (score {})",
                        self.criterion_ids[i],
                        self.criterion_ids[j],
                        cell.score()
                    )));
                }
                crisp[i][j] = ratio;
            }
        }
        Ok(crisp)
    }
}

/// Maps a ratio in (0, ∞) onto a score in (-1, 1).
pub fn ratio_to_score(ratio: f64) -> f64 {
    (ratio - 1.0) / (ratio + 1.0)
}

/// Inverse of [`ratio_to_score`].
pub fn score_to_ratio(score: f64) -> f64 {
    (1.0 + score) / (1.0 - score)
}

/// Builds a [`PairwiseMatrix`] from scalar criterion weights.
#[derive(Debug, Clone, Copy)]
pub struct PairwiseMatrixBuilder {
    uncertainty: f64,
}

impl Default for PairwiseMatrixBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PairwiseMatrixBuilder {
    /// Creates a builder with [`DEFAULT_UNCERTAINTY`].
    pub fn new() -> Self {
        Self {
            uncertainty: DEFAULT_UNCERTAINTY,
        }
    }

    /// Sets the indeterminacy attached to every off-diagonal comparison.
    pub fn with_uncertainty(mut self, uncertainty: f64) -> Self {
        self.uncertainty = UnitInterval::clamped(uncertainty).value();
        self
    }

    /// Cell (i, j) encodes the ratio `wᵢ / wⱼ`; the diagonal is the identity.
    ///
    /// Deterministic and side-effect free.
    ///
    /// # Errors
    /// `InvalidCriteria` if fewer than two criteria or any weight is not positive.
    pub fn build(&self, criteria: &[Criterion]) -> Result<PairwiseMatrix, DecisionError> {
        validate_criteria(criteria)?;

        let ratios: Vec<Vec<f64>> = criteria
            .iter()
            .enumerate()
            .map(|(i, row)| {
                criteria
                    .iter()
                    .enumerate()
                    .map(|(j, column)| if i == j { 1.0 } else { row.weight / column.weight })
                    .collect()
            })
            .collect();

        let cells = ratios
            .iter()
            .enumerate()
            .map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .map(|(j, ratio)| {
                        if i == j {
                            NeutrosophicNumber::IDENTITY
                        } else {
                            NeutrosophicNumber::from_score(ratio_to_score(*ratio), self.uncertainty)
                        }
                    })
                    .collect()
            })
            .collect();

        Ok(PairwiseMatrix {
            criterion_ids: criteria.iter().map(|c| c.id.clone()).collect(),
            cells,
            uncertainty: self.uncertainty,
            ratios: Some(ratios),
        })
    }
}
