//! Decision outcome - what a pipeline run (or a placeholder) hands to the gate.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{EmergencyKind, OutputMode, SealKey};
use crate::domain::analysis::{ConfidenceReport, ConsistencyReport, RankingResult, WeightVector};
use crate::domain::foundation::{DecisionId, Timestamp};

/// Identifier of the computation path that seals real outcomes.
pub const ALGORITHM_ID: &str = "grey-ahp-topsis/v1";

/// Emergency tag with a human-readable detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emergency {
    pub kind: EmergencyKind,
    pub detail: String,
}

/// Fields the gate can require before surfacing a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequiredField {
    Ranking,
    Confidence,
    Consistency,
    Weights,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequiredField::Ranking => "ranking",
            RequiredField::Confidence => "confidence",
            RequiredField::Consistency => "consistency",
            RequiredField::Weights => "weights",
        };
        write!(f, "{}", name)
    }
}

/// How an outcome's claim to come from the real computation holds up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    /// Sealed by an allowed algorithm under the gate's key and the content matches.
    Verified,
    /// Declared simulated by its producer.
    Declared,
    /// No fingerprint at all.
    Unsealed,
    UnknownAlgorithm(String),
    Tampered,
}

impl Provenance {
    pub fn is_verified(&self) -> bool {
        matches!(self, Provenance::Verified)
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Verified => write!(f, "verified"),
            Provenance::Declared => write!(f, "declared simulated by producer"),
            Provenance::Unsealed => write!(f, "result carries no algorithm fingerprint"),
            Provenance::UnknownAlgorithm(id) => write!(f, "unknown algorithm '{}'", id),
            Provenance::Tampered => write!(f, "fingerprint does not match result content or seal key"),
        }
    }
}

/// Aggregated result of one request, immutable once handed to the gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionOutcome {
    pub decision_id: DecisionId,
    pub ranking: Option<RankingResult>,
    pub confidence: Option<ConfidenceReport>,
    pub consistency: Option<ConsistencyReport>,
    pub weights: Option<WeightVector>,
    pub mode: OutputMode,
    pub emergency: Option<Emergency>,
    /// `"<algorithm-id>:<hmac-sha256 hex>"` over the canonical content.
    pub fingerprint: Option<String>,
    pub produced_at: Timestamp,
}

#[derive(Serialize)]
struct CanonicalContent<'a> {
    decision_id: &'a DecisionId,
    ranking: &'a Option<RankingResult>,
    confidence: &'a Option<ConfidenceReport>,
    consistency: &'a Option<ConsistencyReport>,
    weights: &'a Option<WeightVector>,
    mode: OutputMode,
    emergency: &'a Option<Emergency>,
}

impl DecisionOutcome {
    /// Outcome of the real computation path, not yet sealed.
    pub fn computed(
        decision_id: DecisionId,
        ranking: RankingResult,
        confidence: ConfidenceReport,
        consistency: ConsistencyReport,
        weights: WeightVector,
    ) -> Self {
        Self {
            decision_id,
            ranking: Some(ranking),
            confidence: Some(confidence),
            consistency: Some(consistency),
            weights: Some(weights),
            mode: OutputMode::TruthBound,
            emergency: None,
            fingerprint: None,
            produced_at: Timestamp::now(),
        }
    }

    /// Caller-supplied stand-in result, declared simulated.
    pub fn placeholder(
        decision_id: DecisionId,
        ranking: Option<RankingResult>,
        confidence: Option<ConfidenceReport>,
    ) -> Self {
        Self {
            decision_id,
            ranking,
            confidence,
            consistency: None,
            weights: None,
            mode: OutputMode::Simulated,
            emergency: None,
            fingerprint: None,
            produced_at: Timestamp::now(),
        }
    }

    /// Empty outcome standing for an internal failure.
    pub fn failed(decision_id: DecisionId, detail: impl Into<String>) -> Self {
        Self {
            decision_id,
            ranking: None,
            confidence: None,
            consistency: None,
            weights: None,
            mode: OutputMode::TruthBound,
            emergency: Some(Emergency {
                kind: EmergencyKind::ComputationFailure,
                detail: detail.into(),
            }),
            fingerprint: None,
            produced_at: Timestamp::now(),
        }
    }

    /// Attaches an emergency classification.
    pub fn with_emergency(mut self, kind: EmergencyKind, detail: impl Into<String>) -> Self {
        self.emergency = Some(Emergency {
            kind,
            detail: detail.into(),
        });
        self
    }

    /// Stamps the outcome with a keyed fingerprint of its current content.
    pub(crate) fn seal(mut self, algorithm_id: &str, key: &SealKey) -> Self {
        self.fingerprint = self
            .canonical_bytes()
            .and_then(|bytes| key.sign(&bytes))
            .map(|mac| format!("{}:{}", algorithm_id, hex::encode(mac)));
        self
    }

    /// Canonical JSON form of every field the fingerprint covers.
    fn canonical_bytes(&self) -> Option<Vec<u8>> {
        let canonical = CanonicalContent {
            decision_id: &self.decision_id,
            ranking: &self.ranking,
            confidence: &self.confidence,
            consistency: &self.consistency,
            weights: &self.weights,
            mode: self.mode,
            emergency: &self.emergency,
        };
        serde_json::to_vec(&canonical).ok()
    }

    /// Checks whether the outcome can prove it came from an allowed algorithm
    /// sealed under `key`.
    pub fn provenance(&self, allowed_algorithms: &[String], key: &SealKey) -> Provenance {
        if self.mode == OutputMode::Simulated {
            return Provenance::Declared;
        }
        let Some(fingerprint) = &self.fingerprint else {
            return Provenance::Unsealed;
        };
        let Some((algorithm, mac)) = fingerprint.rsplit_once(':') else {
            return Provenance::Tampered;
        };
        if !allowed_algorithms.iter().any(|a| a == algorithm) {
            return Provenance::UnknownAlgorithm(algorithm.to_string());
        }
        match (self.canonical_bytes(), hex::decode(mac)) {
            (Some(bytes), Ok(mac)) if key.verify(&bytes, &mac) => Provenance::Verified,
            _ => Provenance::Tampered,
        }
    }

    /// Required fields this outcome does not carry, in the order given.
    pub fn missing_fields(&self, required: &[RequiredField]) -> Vec<RequiredField> {
        required
            .iter()
            .copied()
            .filter(|field| match field {
                RequiredField::Ranking => self.ranking.is_none(),
                RequiredField::Confidence => self.confidence.is_none(),
                RequiredField::Consistency => self.consistency.is_none(),
                RequiredField::Weights => self.weights.is_none(),
            })
            .collect()
    }

    pub fn confidence_value(&self) -> Option<f64> {
        self.confidence.as_ref().map(|c| c.confidence)
    }

    pub fn is_computation_failure(&self) -> bool {
        matches!(
            &self.emergency,
            Some(Emergency {
                kind: EmergencyKind::ComputationFailure,
                ..
            })
        )
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::domain::analysis::{ConfidenceBand, RankedAlternative};

    pub fn ranking() -> RankingResult {
        RankingResult {
            alternatives: vec![RankedAlternative {
                id: "dhl".to_string(),
                name: "DHL".to_string(),
                rank: 1,
                closeness: 0.8,
                topsis_closeness: 0.8,
                grey_closeness: 0.8,
                distance_to_ideal: 0.1,
                distance_to_anti_ideal: 0.4,
                is_top_choice: true,
                estimated: false,
            }],
            discriminating_criteria: vec!["cost".to_string()],
        }
    }

    pub fn confidence(value: f64) -> ConfidenceReport {
        ConfidenceReport {
            confidence: value,
            consistency_passed: true,
            consistency_factor: 0.9,
            data_quality_factor: 0.9,
            top_closeness: 0.8,
            band: ConfidenceBand::from_confidence(value),
        }
    }

    pub fn consistency() -> ConsistencyReport {
        ConsistencyReport {
            order: 5,
            lambda_max: 5.0,
            consistency_index: 0.0,
            ncr: 0.0,
            is_consistent: true,
        }
    }

    pub fn weights() -> WeightVector {
        WeightVector::from_weights(vec!["cost".into(), "time".into()], vec![0.6, 0.4])
            .expect("valid weights")
    }

    pub fn computed(confidence_value: f64) -> DecisionOutcome {
        DecisionOutcome::computed(
            DecisionId::new(),
            ranking(),
            confidence(confidence_value),
            consistency(),
            weights(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    fn allowed() -> Vec<String> {
        vec![ALGORITHM_ID.to_string()]
    }

    #[test]
    fn sealed_outcome_is_verified() {
        let key = SealKey::generate();
        let outcome = computed(0.9).seal(ALGORITHM_ID, &key);
        let fingerprint = outcome.fingerprint.clone().unwrap();
        assert!(fingerprint.starts_with("grey-ahp-topsis/v1:"));
        assert_eq!(fingerprint.len(), ALGORITHM_ID.len() + 1 + 64);
        assert_eq!(outcome.provenance(&allowed(), &key), Provenance::Verified);
    }

    #[test]
    fn unsealed_outcome_is_not_verified() {
        let key = SealKey::generate();
        assert_eq!(computed(0.9).provenance(&allowed(), &key), Provenance::Unsealed);
    }

    #[test]
    fn outcome_sealed_under_another_key_is_rejected() {
        let outcome = computed(0.99).seal(ALGORITHM_ID, &SealKey::generate());
        assert_eq!(
            outcome.provenance(&allowed(), &SealKey::generate()),
            Provenance::Tampered
        );
    }

    #[test]
    fn copied_fingerprint_does_not_verify_other_content() {
        let key = SealKey::generate();
        let genuine = computed(0.7).seal(ALGORITHM_ID, &key);

        let mut forged = computed(0.99);
        forged.decision_id = genuine.decision_id;
        forged.fingerprint = genuine.fingerprint.clone();
        assert_eq!(forged.provenance(&allowed(), &key), Provenance::Tampered);
    }

    #[test]
    fn edited_content_breaks_the_seal() {
        let key = SealKey::generate();
        let mut outcome = computed(0.9).seal(ALGORITHM_ID, &key);
        if let Some(confidence) = outcome.confidence.as_mut() {
            confidence.confidence = 0.99;
        }
        assert_eq!(outcome.provenance(&allowed(), &key), Provenance::Tampered);
    }

    #[test]
    fn removing_emergency_tag_breaks_the_seal() {
        let key = SealKey::generate();
        let mut outcome = computed(0.55)
            .with_emergency(EmergencyKind::LowConfidence, "confidence 0.550")
            .seal(ALGORITHM_ID, &key);
        outcome.emergency = None;
        assert_eq!(outcome.provenance(&allowed(), &key), Provenance::Tampered);
    }

    #[test]
    fn adding_or_editing_emergency_tag_breaks_the_seal() {
        let key = SealKey::generate();
        let sealed = computed(0.9).seal(ALGORITHM_ID, &key);

        let tagged = sealed
            .clone()
            .with_emergency(EmergencyKind::LowConfidence, "confidence 0.900");
        assert_eq!(tagged.provenance(&allowed(), &key), Provenance::Tampered);

        let mut edited = computed(0.55)
            .with_emergency(EmergencyKind::LowConfidence, "confidence 0.550")
            .seal(ALGORITHM_ID, &key);
        if let Some(emergency) = edited.emergency.as_mut() {
            emergency.detail = "confidence 0.950".to_string();
        }
        assert_eq!(edited.provenance(&allowed(), &key), Provenance::Tampered);
    }

    #[test]
    fn unknown_algorithm_is_reported() {
        let key = SealKey::generate();
        let outcome = computed(0.9).seal("hand-rolled/v0", &key);
        assert_eq!(
            outcome.provenance(&allowed(), &key),
            Provenance::UnknownAlgorithm("hand-rolled/v0".to_string())
        );
    }

    #[test]
    fn placeholder_is_declared_simulated() {
        let outcome = DecisionOutcome::placeholder(DecisionId::new(), Some(ranking()), None);
        assert_eq!(
            outcome.provenance(&allowed(), &SealKey::generate()),
            Provenance::Declared
        );
    }

    #[test]
    fn missing_fields_are_listed_in_order() {
        let outcome = DecisionOutcome::placeholder(DecisionId::new(), Some(ranking()), None);
        let missing = outcome.missing_fields(&[
            RequiredField::Ranking,
            RequiredField::Confidence,
            RequiredField::Consistency,
        ]);
        assert_eq!(missing, vec![RequiredField::Confidence, RequiredField::Consistency]);
    }

    #[test]
    fn failed_outcome_is_a_computation_failure() {
        let outcome = DecisionOutcome::failed(DecisionId::new(), "overflow");
        assert!(outcome.is_computation_failure());
        assert!(outcome.ranking.is_none());
    }

    #[test]
    fn canonical_form_is_stable() {
        let outcome = computed(0.7);
        assert_eq!(outcome.canonical_bytes(), outcome.clone().canonical_bytes());
    }
}
