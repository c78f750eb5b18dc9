//! Confidence Fusion - one scalar confidence from consistency, data quality and closeness.
//!
//! ```text
//! confidence = w_c·consistency + w_d·data_quality + w_t·top_closeness
//! ```
//!
//! Missing inputs degrade to their weakest reading: a missing consistency
//! report counts as inconsistent, missing data quality as sparse, and a
//! missing closeness as zero.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ConsistencyReport;
use crate::domain::foundation::{UnitInterval, ValidationError};

/// Tunable coefficients of the fusion formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    pub consistency_weight: f64,
    pub data_quality_weight: f64,
    pub closeness_weight: f64,
    pub consistent_factor: f64,
    pub inconsistent_factor: f64,
    pub rich_data_factor: f64,
    pub sparse_data_factor: f64,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            consistency_weight: 0.4,
            data_quality_weight: 0.3,
            closeness_weight: 0.3,
            consistent_factor: 0.9,
            inconsistent_factor: 0.7,
            rich_data_factor: 0.9,
            sparse_data_factor: 0.75,
        }
    }
}

impl ConfidenceConfig {
    /// Every factor must be in [0,1] and the three weights must sum to 1.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let named = [
            ("consistency_weight", self.consistency_weight),
            ("data_quality_weight", self.data_quality_weight),
            ("closeness_weight", self.closeness_weight),
            ("consistent_factor", self.consistent_factor),
            ("inconsistent_factor", self.inconsistent_factor),
            ("rich_data_factor", self.rich_data_factor),
            ("sparse_data_factor", self.sparse_data_factor),
        ];
        for (field, value) in named {
            UnitInterval::try_named(field, value)?;
        }
        let sum = self.consistency_weight + self.data_quality_weight + self.closeness_weight;
        if (sum - 1.0).abs() > 1e-6 {
            return Err(ValidationError::invalid_format(
                "confidence weights",
                format!("must sum to 1.0, got {:.4}", sum),
            ));
        }
        Ok(())
    }
}

/// Whether the shipment context carried enough detail to trust the inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataQuality {
    Rich,
    Sparse,
}

impl From<bool> for DataQuality {
    fn from(rich: bool) -> Self {
        if rich {
            DataQuality::Rich
        } else {
            DataQuality::Sparse
        }
    }
}

/// Qualitative confidence band for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    /// High above 0.85, medium above 0.70, otherwise low.
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > 0.85 {
            ConfidenceBand::High
        } else if confidence > 0.70 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }
}

impl fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfidenceBand::High => write!(f, "high"),
            ConfidenceBand::Medium => write!(f, "medium"),
            ConfidenceBand::Low => write!(f, "low"),
        }
    }
}

/// Fused confidence with the factors that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceReport {
    pub confidence: f64,
    pub consistency_passed: bool,
    pub consistency_factor: f64,
    pub data_quality_factor: f64,
    pub top_closeness: f64,
    pub band: ConfidenceBand,
}

/// Combines the ranking's quality signals into one confidence value.
#[derive(Debug, Clone, Default)]
pub struct ConfidenceFusionEstimator {
    config: ConfidenceConfig,
}

impl ConfidenceFusionEstimator {
    pub fn new(config: ConfidenceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConfidenceConfig {
        &self.config
    }

    /// Fuses the three signals into a confidence in [0,1].
    ///
    /// Non-decreasing in `top_closeness`; a passing consistency check or rich
    /// data never lowers the result.
    pub fn estimate(
        &self,
        consistency: Option<&ConsistencyReport>,
        data_quality: Option<DataQuality>,
        top_closeness: Option<f64>,
    ) -> ConfidenceReport {
        let cfg = &self.config;

        let consistency_passed = consistency.map(|r| r.is_consistent).unwrap_or(false);
        let consistency_factor = if consistency_passed {
            cfg.consistent_factor
        } else {
            cfg.inconsistent_factor
        };

        let data_quality_factor = match data_quality.unwrap_or(DataQuality::Sparse) {
            DataQuality::Rich => cfg.rich_data_factor,
            DataQuality::Sparse => cfg.sparse_data_factor,
        };

        let top_closeness = UnitInterval::clamped(top_closeness.unwrap_or(0.0)).value();

        let confidence = UnitInterval::clamped(
            cfg.consistency_weight * consistency_factor
                + cfg.data_quality_weight * data_quality_factor
                + cfg.closeness_weight * top_closeness,
        )
        .value();

        ConfidenceReport {
            confidence,
            consistency_passed,
            consistency_factor,
            data_quality_factor,
            top_closeness,
            band: ConfidenceBand::from_confidence(confidence),
        }
    }
}
