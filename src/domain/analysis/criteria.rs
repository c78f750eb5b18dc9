//! Criteria - the dimensions carriers are judged on.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::domain::foundation::DecisionError;

/// Tolerance for the "weights sum to one" invariant.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-3;

/// Whether larger raw values of a criterion are desirable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriterionDirection {
    Benefit,
    Cost,
}

impl fmt::Display for CriterionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CriterionDirection::Benefit => write!(f, "benefit"),
            CriterionDirection::Cost => write!(f, "cost"),
        }
    }
}

/// A weighted decision criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: String,
    pub weight: f64,
    pub direction: CriterionDirection,
}

impl Criterion {
    /// Creates a criterion.
    pub fn new(id: impl Into<String>, weight: f64, direction: CriterionDirection) -> Self {
        Self {
            id: id.into(),
            weight,
            direction,
        }
    }

    /// Creates a benefit-oriented criterion.
    pub fn benefit(id: impl Into<String>, weight: f64) -> Self {
        Self::new(id, weight, CriterionDirection::Benefit)
    }

    /// Creates a cost-oriented criterion.
    pub fn cost(id: impl Into<String>, weight: f64) -> Self {
        Self::new(id, weight, CriterionDirection::Cost)
    }
}

/// Checks the criteria invariants shared by every engine entry point.
///
/// # Errors
/// `InvalidCriteria` when there are fewer than two criteria, an id is empty
/// or repeated, a weight is not in (0, 1], or the weights do not sum to one
/// within [`WEIGHT_SUM_TOLERANCE`].
pub fn validate_criteria(criteria: &[Criterion]) -> Result<(), DecisionError> {
    if criteria.len() < 2 {
        return Err(DecisionError::invalid_criteria(format!(
            "at least 2 criteria are required, got {}",
            criteria.len()
        )));
    }

    let mut seen = HashSet::new();
    for criterion in criteria {
        if criterion.id.trim().is_empty() {
            return Err(DecisionError::invalid_criteria("criterion id cannot be empty"));
        }
        if !seen.insert(criterion.id.as_str()) {
            return Err(DecisionError::invalid_criteria(format!(
                "duplicate criterion '{}'",
                criterion.id
            )));
        }
        // Subnormal weights are refused: their ratios overflow f64.
        if !criterion.weight.is_normal() || criterion.weight < 0.0 || criterion.weight > 1.0 {
            return Err(DecisionError::invalid_criteria(format!(
                "weight of '{}' must be in (0, 1], got {}",
                criterion.id, criterion.weight
            )));
        }
    }

    let sum: f64 = criteria.iter().map(|c| c.weight).sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(DecisionError::invalid_criteria(format!(
            "weights must sum to 1, got {:.6}",
            sum
        )));
    }

    Ok(())
}

/// Rescales weights so they sum to exactly one.
///
/// Non-positive weights are left for [`validate_criteria`] to reject.
pub fn normalize_weights(criteria: &mut [Criterion]) {
    let sum: f64 = criteria.iter().map(|c| c.weight).sum();
    if sum > 0.0 && sum.is_finite() {
        for criterion in criteria.iter_mut() {
            criterion.weight /= sum;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_criteria() -> Vec<Criterion> {
        vec![
            Criterion::cost("cost", 0.30),
            Criterion::cost("time", 0.25),
            Criterion::benefit("reliability", 0.20),
            Criterion::benefit("flexibility", 0.10),
            Criterion::cost("risk", 0.15),
        ]
    }

    #[test]
    fn accepts_weights_summing_to_one() {
        assert!(validate_criteria(&five_criteria()).is_ok());
    }

    #[test]
    fn rejects_single_criterion() {
        let err = validate_criteria(&[Criterion::benefit("cost", 1.0)]).unwrap_err();
        assert!(matches!(err, DecisionError::InvalidCriteria { .. }));
    }

    #[test]
    fn rejects_zero_weight() {
        let criteria = vec![Criterion::benefit("cost", 1.0), Criterion::benefit("time", 0.0)];
        let err = validate_criteria(&criteria).unwrap_err();
        assert!(err.to_string().contains("'time'"));
    }

    #[test]
    fn accepts_tiny_but_normal_weight() {
        let criteria = vec![Criterion::benefit("cost", 1.0 - 1e-17), Criterion::benefit("time", 1e-17)];
        assert!(validate_criteria(&criteria).is_ok());
    }

    #[test]
    fn rejects_subnormal_weight() {
        let criteria = vec![
            Criterion::benefit("cost", 1.0),
            Criterion::benefit("time", f64::MIN_POSITIVE / 4.0),
        ];
        let err = validate_criteria(&criteria).unwrap_err();
        assert!(matches!(err, DecisionError::InvalidCriteria { .. }));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let criteria = vec![Criterion::benefit("cost", 0.5), Criterion::benefit("cost", 0.5)];
        assert!(validate_criteria(&criteria).is_err());
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        let criteria = vec![Criterion::benefit("cost", 0.5), Criterion::benefit("time", 0.6)];
        let err = validate_criteria(&criteria).unwrap_err();
        assert!(err.to_string().contains("sum to 1"));
    }

    #[test]
    fn normalize_weights_rescales() {
        let mut criteria = vec![Criterion::benefit("cost", 2.0), Criterion::benefit("time", 6.0)];
        normalize_weights(&mut criteria);
        assert_eq!(criteria[0].weight, 0.25);
        assert_eq!(criteria[1].weight, 0.75);
    }

    #[test]
    fn direction_serializes_lowercase() {
        let json = serde_json::to_string(&Criterion::cost("risk", 0.15)).unwrap();
        assert!(json.contains("\"direction\":\"cost\""));
    }
}
