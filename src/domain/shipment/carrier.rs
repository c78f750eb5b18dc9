//! Carriers and the read-only catalog they are ranked from.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::analysis::{AlternativeRow, DecisionMatrix};
use crate::domain::foundation::{DecisionError, UnitInterval, ValidationError};

/// Criteria every catalog entry is scored on, in column order.
pub const CARRIER_CRITERIA: [&str; 5] = ["cost", "time", "reliability", "flexibility", "risk"];

/// Normalized, higher-is-better scores of one carrier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarrierScores {
    pub cost: UnitInterval,
    pub time: UnitInterval,
    pub reliability: UnitInterval,
    pub flexibility: UnitInterval,
    pub risk: UnitInterval,
}

impl CarrierScores {
    /// Creates scores, validating each is in [0,1].
    pub fn new(
        cost: f64,
        time: f64,
        reliability: f64,
        flexibility: f64,
        risk: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            cost: UnitInterval::try_named("cost", cost)?,
            time: UnitInterval::try_named("time", time)?,
            reliability: UnitInterval::try_named("reliability", reliability)?,
            flexibility: UnitInterval::try_named("flexibility", flexibility)?,
            risk: UnitInterval::try_named("risk", risk)?,
        })
    }

    /// The same score on every criterion.
    pub fn uniform(score: UnitInterval) -> Self {
        Self {
            cost: score,
            time: score,
            reliability: score,
            flexibility: score,
            risk: score,
        }
    }

    /// Score for a criterion id, if the catalog knows it.
    pub fn get(&self, criterion_id: &str) -> Option<f64> {
        let score = match criterion_id {
            "cost" => self.cost,
            "time" => self.time,
            "reliability" => self.reliability,
            "flexibility" => self.flexibility,
            "risk" => self.risk,
            _ => return None,
        };
        Some(score.value())
    }
}

/// A freight carrier (forwarder) candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Carrier {
    pub id: String,
    pub name: String,
    pub scores: CarrierScores,
    /// Scores are a default profile, not observed performance.
    #[serde(default)]
    pub estimated: bool,
}

impl Carrier {
    pub fn new(id: impl Into<String>, name: impl Into<String>, scores: CarrierScores) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            scores,
            estimated: false,
        }
    }

    /// Matches on id or name, ignoring case.
    pub fn matches(&self, id_or_name: &str) -> bool {
        let needle = id_or_name.trim();
        self.id.eq_ignore_ascii_case(needle) || self.name.eq_ignore_ascii_case(needle)
    }

    fn row(&self, criterion_ids: &[String]) -> Result<AlternativeRow, DecisionError> {
        let scores = criterion_ids
            .iter()
            .map(|criterion| {
                self.scores.get(criterion).ok_or_else(|| {
                    DecisionError::invalid_criteria(format!(
                        "catalog has no scores for criterion '{}'",
                        criterion
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AlternativeRow {
            id: self.id.clone(),
            name: self.name.clone(),
            scores,
            estimated: self.estimated,
        })
    }
}

#[derive(Deserialize)]
struct RawCatalog {
    carriers: Vec<Carrier>,
}

/// Immutable snapshot of the carriers available for ranking.
///
/// Shared read-only across requests; additions produce a new catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCatalog")]
pub struct CarrierCatalog {
    carriers: Vec<Carrier>,
}

impl TryFrom<RawCatalog> for CarrierCatalog {
    type Error = ValidationError;

    fn try_from(raw: RawCatalog) -> Result<Self, Self::Error> {
        CarrierCatalog::new(raw.carriers)
    }
}

impl CarrierCatalog {
    /// Creates a catalog, rejecting empty or duplicate carrier ids.
    pub fn new(carriers: Vec<Carrier>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::new();
        for carrier in &carriers {
            if carrier.id.trim().is_empty() {
                return Err(ValidationError::empty_field("carrier id"));
            }
            if !seen.insert(carrier.id.to_ascii_lowercase()) {
                return Err(ValidationError::invalid_format(
                    "carrier id",
                    format!("duplicate carrier '{}'", carrier.id),
                ));
            }
        }
        Ok(Self { carriers })
    }

    pub fn carriers(&self) -> &[Carrier] {
        &self.carriers
    }

    /// Finds a carrier by id or name, ignoring case.
    pub fn find(&self, id_or_name: &str) -> Option<&Carrier> {
        self.carriers.iter().find(|c| c.matches(id_or_name))
    }

    pub fn len(&self) -> usize {
        self.carriers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carriers.is_empty()
    }

    /// A new catalog with one more carrier; `self` is left untouched.
    pub fn with_carrier(&self, carrier: Carrier) -> Result<Self, ValidationError> {
        let mut carriers = self.carriers.clone();
        carriers.push(carrier);
        Self::new(carriers)
    }

    /// Decision matrix over the given criteria, rows in catalog order.
    ///
    /// # Errors
    /// `InvalidCriteria` if a criterion is not one the catalog scores.
    pub fn decision_matrix(&self, criterion_ids: &[String]) -> Result<DecisionMatrix, DecisionError> {
        let rows = self
            .carriers
            .iter()
            .map(|c| c.row(criterion_ids))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DecisionMatrix::new(criterion_ids.to_vec(), rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(cost: f64) -> CarrierScores {
        CarrierScores::new(cost, 0.6, 0.7, 0.5, 0.8).unwrap()
    }

    fn catalog() -> CarrierCatalog {
        CarrierCatalog::new(vec![
            Carrier::new("kn", "Kuehne & Nagel", scores(0.7)),
            Carrier::new("dhl", "DHL Express", scores(0.5)),
        ])
        .unwrap()
    }

    #[test]
    fn scores_reject_out_of_range() {
        assert!(CarrierScores::new(0.5, 1.2, 0.5, 0.5, 0.5).is_err());
    }

    #[test]
    fn find_matches_id_or_name_case_insensitively() {
        let catalog = catalog();
        assert_eq!(catalog.find("DHL").unwrap().id, "dhl");
        assert_eq!(catalog.find("kuehne & nagel").unwrap().id, "kn");
        assert!(catalog.find("AGL").is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = CarrierCatalog::new(vec![
            Carrier::new("dhl", "DHL", scores(0.5)),
            Carrier::new("DHL", "DHL again", scores(0.6)),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn with_carrier_leaves_original_untouched() {
        let original = catalog();
        let extended = original
            .with_carrier(Carrier::new("agl", "AGL", scores(0.4)))
            .unwrap();
        assert_eq!(original.len(), 2);
        assert_eq!(extended.len(), 3);
    }

    #[test]
    fn decision_matrix_projects_requested_criteria() {
        let matrix = catalog()
            .decision_matrix(&["cost".to_string(), "risk".to_string()])
            .unwrap();
        assert_eq!(matrix.rows[0].scores, vec![0.7, 0.8]);
        assert_eq!(matrix.rows[1].id, "dhl");
    }

    #[test]
    fn decision_matrix_rejects_unknown_criterion() {
        let err = catalog()
            .decision_matrix(&["responsiveness".to_string()])
            .unwrap_err();
        assert!(matches!(err, DecisionError::InvalidCriteria { .. }));
    }

    #[test]
    fn catalog_deserialization_validates_scores() {
        let json = r#"{"carriers":[{"id":"agl","name":"AGL","scores":
            {"cost":0.6,"time":0.5,"reliability":0.7,"flexibility":0.6,"risk":1.5}}]}"#;
        assert!(serde_json::from_str::<CarrierCatalog>(json).is_err());
    }

    #[test]
    fn catalog_deserializes_from_yaml() {
        let yaml = "carriers:\n  - id: agl\n    name: AGL\n    scores: {cost: 0.6, time: 0.5, reliability: 0.7, flexibility: 0.6, risk: 0.4}\n";
        let catalog: CarrierCatalog = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(!catalog.carriers()[0].estimated);
    }
}
