//! Trust classification state machine.
//!
//! Every gated outcome ends in exactly one of three modes. The only legal
//! move after classification is releasing a blocked outcome as simulated.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Final trust label of a decision outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrustMode {
    /// Verified output of the real computation path.
    TruthBound,

    /// Surfaced, but must be presented as unverified.
    Simulated,

    /// Must not be presented as a ranking at all.
    Blocked,
}

impl TrustMode {
    /// Returns true if the ranking fields may be shown to the user.
    pub fn is_surfaced(&self) -> bool {
        !matches!(self, TrustMode::Blocked)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrustMode::TruthBound => "truth-bound",
            TrustMode::Simulated => "simulated",
            TrustMode::Blocked => "blocked",
        }
    }
}

impl fmt::Display for TrustMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl StateMachine for TrustMode {
    fn can_transition_to(&self, target: &Self) -> bool {
        // An override never restores TRUTH_BOUND.
        matches!((self, target), (TrustMode::Blocked, TrustMode::Simulated))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            TrustMode::Blocked => vec![TrustMode::Simulated],
            TrustMode::TruthBound | TrustMode::Simulated => vec![],
        }
    }
}

/// Mode the producer declares for its own output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    TruthBound,
    Simulated,
}

/// Emergency classification attached by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmergencyKind {
    /// An internal failure upstream; the outcome is blocked.
    ComputationFailure,

    /// Informational: confidence fell under the emergency floor.
    LowConfidence,
}

impl fmt::Display for EmergencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmergencyKind::ComputationFailure => write!(f, "computation failure"),
            EmergencyKind::LowConfidence => write!(f, "low confidence"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocked_can_only_become_simulated() {
        assert!(TrustMode::Blocked.can_transition_to(&TrustMode::Simulated));
        assert!(!TrustMode::Blocked.can_transition_to(&TrustMode::TruthBound));
        assert_eq!(TrustMode::Blocked.valid_transitions(), vec![TrustMode::Simulated]);
    }

    #[test]
    fn surfaced_modes_are_terminal() {
        assert!(TrustMode::TruthBound.is_terminal());
        assert!(TrustMode::Simulated.is_terminal());
        assert!(!TrustMode::Blocked.is_terminal());
    }

    #[test]
    fn invalid_transition_is_an_error() {
        assert!(TrustMode::Simulated.transition_to(TrustMode::TruthBound).is_err());
        assert_eq!(
            TrustMode::Blocked.transition_to(TrustMode::Simulated).unwrap(),
            TrustMode::Simulated
        );
    }

    #[test]
    fn modes_serialize_as_kebab_case() {
        assert_eq!(serde_json::to_string(&TrustMode::TruthBound).unwrap(), "\"truth-bound\"");
        assert_eq!(
            serde_json::to_string(&EmergencyKind::ComputationFailure).unwrap(),
            "\"computation-failure\""
        );
        let declared: OutputMode = serde_json::from_str("\"simulated\"").unwrap();
        assert_eq!(declared, OutputMode::Simulated);
    }

    #[test]
    fn blocked_is_not_surfaced() {
        assert!(!TrustMode::Blocked.is_surfaced());
        assert!(TrustMode::Simulated.is_surfaced());
        assert_eq!(TrustMode::Blocked.to_string(), "blocked");
    }
}
