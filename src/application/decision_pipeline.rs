//! DecisionPipeline - Orchestrates one carrier decision from criteria to gated outcome.
//!
//! Runs synchronously and owns every intermediate value of a request:
//!
//! 1. Pairwise matrix from the criteria (or expert judgments)
//! 2. Consistency check (advisory)
//! 3. AHP weights
//! 4. Grey TOPSIS ranking over the carrier catalog
//! 5. Confidence fusion
//! 6. Truth gate
//!
//! Input errors are returned to the caller. Any other failure becomes a
//! BLOCKED outcome so the caller always gets a well-formed result.

use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, DEFAULT_EMERGENCY_CONFIDENCE};
use crate::domain::analysis::{
    validate_criteria, AhpWeightSolver, ConfidenceFusionEstimator, ConfidenceReport,
    ConsistencyChecker, Criterion, CriterionDirection, DataQuality, GreyTopsisRanker, Judgment,
    PairwiseMatrix, PairwiseMatrixBuilder, RankingResult, DEFAULT_UNCERTAINTY,
};
use crate::domain::foundation::{DecisionError, DecisionId};
use crate::domain::gate::{
    DecisionOutcome, EmergencyKind, GateConfig, GateError, GatedOutcome, OutputMode, TruthGate,
};
use crate::domain::shipment::CarrierCatalog;

/// Everything the engine needs for one decision besides the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRequest {
    /// Policy-adjusted criteria summing to one.
    pub criteria: Vec<Criterion>,
    /// Expert judgments replacing the weight-derived comparisons.
    #[serde(default)]
    pub judgments: Option<Vec<Judgment>>,
    #[serde(default = "default_uncertainty")]
    pub uncertainty: f64,
    #[serde(default)]
    pub data_quality: Option<DataQuality>,
    /// The caller marks the result as a stand-in; it can never be truth-bound.
    #[serde(default)]
    pub placeholder: bool,
}

fn default_uncertainty() -> f64 {
    DEFAULT_UNCERTAINTY
}

impl DecisionRequest {
    pub fn new(criteria: Vec<Criterion>) -> Self {
        Self {
            criteria,
            judgments: None,
            uncertainty: DEFAULT_UNCERTAINTY,
            data_quality: None,
            placeholder: false,
        }
    }

    pub fn with_judgments(mut self, judgments: Vec<Judgment>) -> Self {
        self.judgments = Some(judgments);
        self
    }

    pub fn with_uncertainty(mut self, uncertainty: f64) -> Self {
        self.uncertainty = uncertainty;
        self
    }

    pub fn with_data_quality(mut self, data_quality: DataQuality) -> Self {
        self.data_quality = Some(data_quality);
        self
    }

    pub fn as_placeholder(mut self) -> Self {
        self.placeholder = true;
        self
    }

    fn criterion_ids(&self) -> Vec<String> {
        self.criteria.iter().map(|c| c.id.clone()).collect()
    }

    fn directions(&self) -> Vec<CriterionDirection> {
        self.criteria.iter().map(|c| c.direction).collect()
    }
}

/// The only entry point external collaborators call.
#[derive(Debug, Clone)]
pub struct DecisionPipeline {
    gate: TruthGate,
    fusion: ConfidenceFusionEstimator,
    emergency_confidence: f64,
}

/// Default thresholds with a disabled override authority: the default
/// pipeline cannot release blocked outcomes. Use [`DecisionPipeline::from_config`]
/// or [`DecisionPipeline::with_gate_config`] to configure overrides.
impl Default for DecisionPipeline {
    fn default() -> Self {
        Self::new(TruthGate::default(), ConfidenceFusionEstimator::default())
    }
}

impl DecisionPipeline {
    pub fn new(gate: TruthGate, fusion: ConfidenceFusionEstimator) -> Self {
        Self {
            gate,
            fusion,
            emergency_confidence: DEFAULT_EMERGENCY_CONFIDENCE,
        }
    }

    /// Pipeline wired from validated engine configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            TruthGate::new(config.gate.gate_config()),
            ConfidenceFusionEstimator::new(config.confidence.clone()),
        )
        .with_emergency_confidence(config.gate.emergency_confidence)
    }

    pub fn with_gate_config(mut self, config: GateConfig) -> Self {
        self.gate = TruthGate::new(config);
        self
    }

    pub fn with_emergency_confidence(mut self, threshold: f64) -> Self {
        self.emergency_confidence = threshold;
        self
    }

    pub fn gate(&self) -> &TruthGate {
        &self.gate
    }

    /// Ranks the catalog for one request and classifies the result.
    ///
    /// # Errors
    /// - `InvalidCriteria` for fewer than two criteria, bad weights, or criteria the catalog does not score
    /// - `DegenerateMatrix` for judgments that yield no positive weights
    /// - `EmptyAlternativeSet` for an empty catalog
    /// - `DimensionMismatch` for inconsistent score rows
    pub fn decide(
        &self,
        request: &DecisionRequest,
        catalog: &CarrierCatalog,
    ) -> Result<GatedOutcome, DecisionError> {
        let decision_id = DecisionId::new();
        tracing::debug!(
            decision_id = %decision_id,
            criteria = request.criteria.len(),
            carriers = catalog.len(),
            placeholder = request.placeholder,
            "decision requested"
        );

        let computed = self.compute(decision_id, request, catalog);
        self.conclude(decision_id, computed)
    }

    /// Passes a caller-supplied placeholder result through the gate.
    ///
    /// The result is declared simulated, so it is SIMULATED at best and
    /// BLOCKED when required fields are missing.
    pub fn placeholder(
        &self,
        ranking: Option<RankingResult>,
        confidence: Option<ConfidenceReport>,
    ) -> GatedOutcome {
        let outcome = DecisionOutcome::placeholder(DecisionId::new(), ranking, confidence);
        self.gate.evaluate(outcome)
    }

    /// Releases a blocked outcome with an override token.
    pub fn override_block(&self, gated: GatedOutcome, token: &str) -> Result<GatedOutcome, GateError> {
        self.gate.override_block(gated, token)
    }

    fn conclude(
        &self,
        decision_id: DecisionId,
        computed: Result<DecisionOutcome, DecisionError>,
    ) -> Result<GatedOutcome, DecisionError> {
        let outcome = match computed {
            Ok(outcome) => outcome,
            Err(err) if err.is_input_error() => {
                tracing::debug!(decision_id = %decision_id, error = %err, "decision rejected");
                return Err(err);
            }
            Err(err) => {
                tracing::error!(decision_id = %decision_id, error = %err, "decision computation failed");
                DecisionOutcome::failed(decision_id, err.to_string())
            }
        };
        Ok(self.gate.evaluate(outcome))
    }

    fn compute(
        &self,
        decision_id: DecisionId,
        request: &DecisionRequest,
        catalog: &CarrierCatalog,
    ) -> Result<DecisionOutcome, DecisionError> {
        validate_criteria(&request.criteria)?;
        if catalog.is_empty() {
            return Err(DecisionError::EmptyAlternativeSet);
        }

        let pairwise = match &request.judgments {
            Some(judgments) => PairwiseMatrix::from_judgments(request.criterion_ids(), judgments)?,
            None => PairwiseMatrixBuilder::new()
                .with_uncertainty(request.uncertainty)
                .build(&request.criteria)?,
        };

        let consistency = ConsistencyChecker::check(&pairwise)?;
        tracing::debug!(
            decision_id = %decision_id,
            ncr = consistency.ncr,
            is_consistent = consistency.is_consistent,
            "consistency checked"
        );

        let weights = AhpWeightSolver::solve(&pairwise)?;
        tracing::debug!(decision_id = %decision_id, weights = ?weights.weights, "weights solved");

        let matrix = catalog.decision_matrix(&request.criterion_ids())?;
        let ranking = GreyTopsisRanker::rank(&matrix, &weights, &request.directions())?;
        tracing::debug!(
            decision_id = %decision_id,
            top = ranking.top_choice().map(|a| a.id.as_str()).unwrap_or_default(),
            top_closeness = ranking.top_closeness(),
            "carriers ranked"
        );

        let confidence = self.fusion.estimate(
            Some(&consistency),
            request.data_quality,
            Some(ranking.top_closeness()),
        );
        let confidence_value = confidence.confidence;
        if !confidence_value.is_finite() {
            return Err(DecisionError::numeric("confidence fusion", "confidence is not finite"));
        }

        let mut outcome =
            DecisionOutcome::computed(decision_id, ranking, confidence, consistency, weights);

        if confidence_value < self.emergency_confidence {
            tracing::warn!(
                decision_id = %decision_id,
                confidence = confidence_value,
                threshold = self.emergency_confidence,
                "low confidence decision"
            );
            outcome = outcome.with_emergency(
                EmergencyKind::LowConfidence,
                format!(
                    "confidence {:.3} below emergency threshold {:.3}",
                    confidence_value, self.emergency_confidence
                ),
            );
        }

        if request.placeholder {
            outcome.mode = OutputMode::Simulated;
            Ok(outcome)
        } else {
            Ok(self.gate.seal(outcome))
        }
    }
}
