//! Weight policy - criterion weights and uncertainty for a shipment context.

use serde::{Deserialize, Serialize};

use super::{ShipmentContext, CARRIER_CRITERIA};
use crate::domain::analysis::{normalize_weights, validate_criteria, Criterion, CriterionDirection};
use crate::domain::foundation::DecisionError;

/// Smallest weight an adjustment may leave behind before renormalizing.
const WEIGHT_FLOOR: f64 = 0.01;

/// Unnormalized weight per carrier criterion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriterionWeights {
    pub cost: f64,
    pub time: f64,
    pub reliability: f64,
    pub flexibility: f64,
    pub risk: f64,
}

impl Default for CriterionWeights {
    fn default() -> Self {
        Self {
            cost: 0.30,
            time: 0.25,
            reliability: 0.20,
            flexibility: 0.10,
            risk: 0.15,
        }
    }
}

/// Caller-side table that adapts weights to urgency and perishability.
///
/// | Condition           | time  | cost  | risk  | flexibility |
/// |---------------------|-------|-------|-------|-------------|
/// | High/critical       | +0.10 | -0.05 | +0.05 |             |
/// | Perishable          | +0.05 |       |       | -0.05       |
///
/// Adjusted weights are renormalized to sum to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightPolicy {
    pub base_weights: CriterionWeights,
    /// Lower bound of the derived uncertainty factor.
    pub minimum_uncertainty: f64,
}

impl Default for WeightPolicy {
    fn default() -> Self {
        Self {
            base_weights: CriterionWeights::default(),
            minimum_uncertainty: 0.05,
        }
    }
}

impl WeightPolicy {
    /// Policy-adjusted criteria for the shipment, summing to one.
    ///
    /// # Errors
    /// `InvalidCriteria` if the configured base weights are unusable.
    pub fn criteria_for(&self, context: &ShipmentContext) -> Result<Vec<Criterion>, DecisionError> {
        let mut w = self.base_weights;

        if context.urgency.is_elevated() {
            w.time += 0.10;
            w.cost -= 0.05;
            w.risk += 0.05;
        }
        if context.perishable {
            w.time += 0.05;
            w.flexibility -= 0.05;
        }

        let values = [w.cost, w.time, w.reliability, w.flexibility, w.risk];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(DecisionError::invalid_criteria("base weights must be finite"));
        }

        let mut criteria: Vec<Criterion> = CARRIER_CRITERIA
            .iter()
            .zip(values)
            .map(|(id, weight)| Criterion::new(*id, weight.max(WEIGHT_FLOOR), raw_direction(id)))
            .collect();
        normalize_weights(&mut criteria);
        validate_criteria(&criteria)?;
        Ok(criteria)
    }

    /// `max(minimum, 0.2 - 0.15·emergency_factor)`.
    pub fn uncertainty_for(&self, context: &ShipmentContext) -> f64 {
        (0.2 - 0.15 * context.urgency.emergency_factor()).max(self.minimum_uncertainty)
    }
}

/// Direction of the raw measurement; catalog scores are already benefit oriented.
fn raw_direction(criterion_id: &str) -> CriterionDirection {
    match criterion_id {
        "reliability" | "flexibility" => CriterionDirection::Benefit,
        _ => CriterionDirection::Cost,
    }
}
