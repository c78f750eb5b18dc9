//! Truth Gate - classifies every outcome before anything is surfaced.
//!
//! Rules are evaluated in order; the first match wins:
//!
//! | Condition                                   | Mode        |
//! |---------------------------------------------|-------------|
//! | Upstream computation failure                | BLOCKED     |
//! | A required field is missing                 | BLOCKED     |
//! | Declared simulated or provenance unverified | SIMULATED   |
//! | Confidence below the minimum                | SIMULATED   |
//! | Otherwise                                   | TRUTH_BOUND |

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    DecisionOutcome, EmergencyKind, OverrideAuthority, Provenance, RequiredField, SealKey,
    TrustMode, ALGORITHM_ID,
};
use crate::domain::analysis::RankingResult;
use crate::domain::foundation::{DomainError, ErrorCode, StateMachine};

/// Default minimum confidence for TRUTH_BOUND (inclusive).
pub const DEFAULT_MINIMUM_CONFIDENCE: f64 = 0.65;

/// Immutable gate configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct GateConfig {
    pub minimum_confidence: f64,
    pub required_fields: Vec<RequiredField>,
    pub allowed_algorithms: Vec<String>,
    pub authority: OverrideAuthority,
    seal_key: SealKey,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            minimum_confidence: DEFAULT_MINIMUM_CONFIDENCE,
            required_fields: vec![
                RequiredField::Ranking,
                RequiredField::Confidence,
                RequiredField::Consistency,
            ],
            allowed_algorithms: vec![ALGORITHM_ID.to_string()],
            authority: OverrideAuthority::disabled(),
            seal_key: SealKey::generate(),
        }
    }
}

impl GateConfig {
    pub fn with_minimum_confidence(mut self, minimum: f64) -> Self {
        self.minimum_confidence = minimum;
        self
    }

    pub fn with_required_fields(mut self, fields: Vec<RequiredField>) -> Self {
        self.required_fields = fields;
        self
    }

    pub fn with_authority(mut self, authority: OverrideAuthority) -> Self {
        self.authority = authority;
        self
    }

    /// Replaces the per-process random seal key with a shared one.
    pub fn with_seal_key(mut self, key: SealKey) -> Self {
        self.seal_key = key;
        self
    }
}

/// Errors from releasing a blocked outcome.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GateError {
    #[error("Invalid state transition: {0}")]
    InvalidTransition(String),

    #[error("Override token rejected")]
    Unauthorized,
}

impl From<GateError> for DomainError {
    fn from(err: GateError) -> Self {
        let code = match err {
            GateError::InvalidTransition(_) => ErrorCode::InvalidStateTransition,
            GateError::Unauthorized => ErrorCode::Unauthorized,
        };
        DomainError::new(code, err.to_string())
    }
}

/// An outcome together with its trust classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatedOutcome {
    pub outcome: DecisionOutcome,
    pub mode: TrustMode,
    /// Why the outcome is not TRUTH_BOUND.
    pub reason: Option<String>,
    /// Present only while BLOCKED.
    pub challenge: Option<String>,
    pub overridden: bool,
}

impl GatedOutcome {
    pub fn is_surfaced(&self) -> bool {
        self.mode.is_surfaced()
    }

    /// The ranking, withheld while blocked.
    pub fn ranking(&self) -> Option<&RankingResult> {
        if self.is_surfaced() {
            self.outcome.ranking.as_ref()
        } else {
            None
        }
    }
}

/// Applies [`GateConfig`] rules to decision outcomes.
#[derive(Debug, Clone, Default)]
pub struct TruthGate {
    config: GateConfig,
}

impl TruthGate {
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Stamps a computed outcome so this gate will accept its provenance.
    pub(crate) fn seal(&self, outcome: DecisionOutcome) -> DecisionOutcome {
        outcome.seal(ALGORITHM_ID, &self.config.seal_key)
    }

    /// Classifies an outcome. Never fails and never edits the outcome.
    pub fn evaluate(&self, outcome: DecisionOutcome) -> GatedOutcome {
        let (mode, reason) = self.classify(&outcome);

        match mode {
            TrustMode::Blocked => tracing::warn!(
                decision_id = %outcome.decision_id,
                reason = reason.as_deref().unwrap_or_default(),
                "decision outcome blocked"
            ),
            _ => tracing::info!(
                decision_id = %outcome.decision_id,
                mode = %mode,
                confidence = outcome.confidence_value().unwrap_or_default(),
                "decision outcome classified"
            ),
        }

        let challenge = (mode == TrustMode::Blocked).then(|| outcome.decision_id.to_string());
        GatedOutcome {
            outcome,
            mode,
            reason,
            challenge,
            overridden: false,
        }
    }

    fn classify(&self, outcome: &DecisionOutcome) -> (TrustMode, Option<String>) {
        if let Some(emergency) = &outcome.emergency {
            if emergency.kind == EmergencyKind::ComputationFailure {
                return (
                    TrustMode::Blocked,
                    Some(format!("computation failure: {}", emergency.detail)),
                );
            }
        }

        let missing = outcome.missing_fields(&self.config.required_fields);
        if !missing.is_empty() {
            let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
            return (
                TrustMode::Blocked,
                Some(format!("missing required fields: {}", names.join(", "))),
            );
        }

        let provenance =
            outcome.provenance(&self.config.allowed_algorithms, &self.config.seal_key);
        if provenance != Provenance::Verified {
            let reason = match provenance {
                Provenance::Declared => "placeholder result".to_string(),
                other => format!("unverified provenance: {}", other),
            };
            return (TrustMode::Simulated, Some(reason));
        }

        // A missing confidence only gets here when it is not required.
        let confidence = outcome.confidence_value().unwrap_or(0.0);
        if confidence < self.config.minimum_confidence {
            return (
                TrustMode::Simulated,
                Some(format!(
                    "confidence {:.3} below minimum {:.3}",
                    confidence, self.config.minimum_confidence
                )),
            );
        }

        (TrustMode::TruthBound, None)
    }

    /// Releases a blocked outcome as SIMULATED with a valid override token.
    ///
    /// # Errors
    /// - `InvalidTransition` if the outcome is not BLOCKED
    /// - `Unauthorized` if the token does not match the challenge
    pub fn override_block(
        &self,
        gated: GatedOutcome,
        token: &str,
    ) -> Result<GatedOutcome, GateError> {
        let released = gated
            .mode
            .transition_to(TrustMode::Simulated)
            .map_err(|e| GateError::InvalidTransition(e.to_string()))?;

        let challenge = gated
            .challenge
            .clone()
            .unwrap_or_else(|| gated.outcome.decision_id.to_string());
        if !self.config.authority.verify(&challenge, token) {
            tracing::warn!(
                decision_id = %gated.outcome.decision_id,
                "override token rejected"
            );
            return Err(GateError::Unauthorized);
        }

        tracing::warn!(
            decision_id = %gated.outcome.decision_id,
            "blocked outcome released by override"
        );

        let reason = match gated.reason {
            Some(reason) => format!("released by override after: {}", reason),
            None => "released by override".to_string(),
        };
        Ok(GatedOutcome {
            outcome: gated.outcome,
            mode: released,
            reason: Some(reason),
            challenge: None,
            overridden: true,
        })
    }
}
