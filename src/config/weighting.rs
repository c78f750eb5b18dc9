//! Criterion weighting configuration

use serde::Deserialize;

use super::ValidationError;
use crate::domain::shipment::{CriterionWeights, DefaultProfilePolicy, WeightPolicy};

/// Base weights, uncertainty floor, and the unknown-carrier policy
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeightingSettings {
    /// Weights before urgency and perishability adjustments
    pub base_weights: CriterionWeights,

    /// Lower bound of the derived uncertainty factor
    pub minimum_uncertainty: f64,

    /// Profile given to declared carriers missing from the catalog
    pub default_profile: DefaultProfilePolicy,
}

impl Default for WeightingSettings {
    fn default() -> Self {
        let policy = WeightPolicy::default();
        Self {
            base_weights: policy.base_weights,
            minimum_uncertainty: policy.minimum_uncertainty,
            default_profile: DefaultProfilePolicy::default(),
        }
    }
}

impl WeightingSettings {
    /// Validate weighting settings
    pub fn validate(&self) -> Result<(), ValidationError> {
        let w = &self.base_weights;
        let values = [w.cost, w.time, w.reliability, w.flexibility, w.risk];
        if values.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err(ValidationError::InvalidBaseWeights(
                "every base weight must be positive".to_string(),
            ));
        }
        if !self.minimum_uncertainty.is_finite() || !(0.0..=1.0).contains(&self.minimum_uncertainty)
        {
            return Err(ValidationError::OutOfUnitRange {
                field: "weighting.minimum_uncertainty",
                value: self.minimum_uncertainty,
            });
        }
        Ok(())
    }

    /// Weight policy built from these settings
    pub fn policy(&self) -> WeightPolicy {
        WeightPolicy {
            base_weights: self.base_weights,
            minimum_uncertainty: self.minimum_uncertainty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_policy_table() {
        let settings = WeightingSettings::default();
        assert_eq!(settings.base_weights.cost, 0.30);
        assert_eq!(settings.minimum_uncertainty, 0.05);
        assert!(settings.validate().is_ok());
        assert_eq!(settings.default_profile, DefaultProfilePolicy::neutral());
    }

    #[test]
    fn rejects_zero_base_weight() {
        let settings = WeightingSettings {
            base_weights: CriterionWeights {
                risk: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ValidationError::InvalidBaseWeights(_))
        ));
    }

    #[test]
    fn partial_weights_keep_other_defaults() {
        let settings: WeightingSettings =
            serde_json::from_str(r#"{"base_weights":{"cost":0.5},"default_profile":{"policy":"exclude"}}"#)
                .unwrap();
        assert_eq!(settings.base_weights.cost, 0.5);
        assert_eq!(settings.base_weights.time, 0.25);
        assert_eq!(settings.default_profile, DefaultProfilePolicy::Exclude);
    }
}
