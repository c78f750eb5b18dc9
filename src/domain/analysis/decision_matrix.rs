//! Decision Matrix - alternatives × criteria view for one ranking run.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{UnitInterval, ValidationError};

/// One alternative's row of normalized, higher-is-better scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeRow {
    pub id: String,
    pub name: String,
    pub scores: Vec<f64>,
    /// Scores came from a default profile rather than observed history.
    #[serde(default)]
    pub estimated: bool,
}

impl AlternativeRow {
    /// Creates a row, validating every score is in [0,1].
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        scores: Vec<f64>,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("alternative_id"));
        }
        for score in &scores {
            UnitInterval::try_named(&format!("{} score", id), *score)?;
        }
        Ok(Self {
            id,
            name: name.into(),
            scores,
            estimated: false,
        })
    }

    /// Marks the row as coming from a default profile.
    pub fn estimated(mut self) -> Self {
        self.estimated = true;
        self
    }
}

/// Read-only decision matrix: rows are alternatives, columns are criteria.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionMatrix {
    /// Ordered list of criterion IDs (column labels).
    pub criterion_ids: Vec<String>,
    /// Alternatives in catalog order.
    pub rows: Vec<AlternativeRow>,
}

impl DecisionMatrix {
    /// Creates an empty decision matrix.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a builder for constructing a decision matrix.
    pub fn builder() -> DecisionMatrixBuilder {
        DecisionMatrixBuilder::new()
    }

    /// Creates a matrix from prepared rows.
    pub fn new(criterion_ids: Vec<String>, rows: Vec<AlternativeRow>) -> Self {
        Self { criterion_ids, rows }
    }

    /// Gets a score by alternative ID and criterion ID.
    pub fn score(&self, alternative_id: &str, criterion_id: &str) -> Option<f64> {
        let column = self.criterion_ids.iter().position(|c| c == criterion_id)?;
        self.rows
            .iter()
            .find(|r| r.id == alternative_id)
            .and_then(|r| r.scores.get(column).copied())
    }

    /// Values of one column across all alternatives.
    pub fn column(&self, index: usize) -> Vec<f64> {
        self.rows
            .iter()
            .filter_map(|r| r.scores.get(index).copied())
            .collect()
    }

    /// Returns true if the matrix has no alternatives.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn alternative_count(&self) -> usize {
        self.rows.len()
    }

    pub fn criterion_count(&self) -> usize {
        self.criterion_ids.len()
    }

    /// A copy of the matrix without one criterion column.
    pub fn without_criterion(&self, criterion_id: &str) -> Self {
        let Some(column) = self.criterion_ids.iter().position(|c| c == criterion_id) else {
            return self.clone();
        };
        let mut criterion_ids = self.criterion_ids.clone();
        criterion_ids.remove(column);
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                if column < row.scores.len() {
                    row.scores.remove(column);
                }
                row
            })
            .collect();
        Self { criterion_ids, rows }
    }
}

/// Builder for constructing DecisionMatrix instances.
#[derive(Debug, Default)]
pub struct DecisionMatrixBuilder {
    criterion_ids: Vec<String>,
    rows: Vec<AlternativeRow>,
    error: Option<ValidationError>,
}

impl DecisionMatrixBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the criteria (column labels).
    pub fn criteria(mut self, ids: Vec<impl Into<String>>) -> Self {
        self.criterion_ids = ids.into_iter().map(|s| s.into()).collect();
        self
    }

    /// Adds an alternative whose name equals its id.
    pub fn alternative(self, id: impl Into<String>, scores: Vec<f64>) -> Self {
        let id = id.into();
        let name = id.clone();
        self.named_alternative(id, name, scores)
    }

    /// Adds an alternative with a display name.
    pub fn named_alternative(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        scores: Vec<f64>,
    ) -> Self {
        match AlternativeRow::new(id, name, scores) {
            Ok(row) => self.rows.push(row),
            Err(err) => {
                self.error.get_or_insert(err);
            }
        }
        self
    }

    /// Adds a prepared row.
    pub fn row(mut self, row: AlternativeRow) -> Self {
        self.rows.push(row);
        self
    }

    /// Builds the decision matrix, reporting the first invalid score.
    pub fn build(self) -> Result<DecisionMatrix, ValidationError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        Ok(DecisionMatrix {
            criterion_ids: self.criterion_ids,
            rows: self.rows,
        })
    }
}
