//! State machine trait for classification enums.
//!
//! Provides a single place to describe which lifecycle changes are legal,
//! so callers can ask before they move (`can_transition_to`) and get a
//! validated move (`transition_to`) without re-implementing the table.

use super::ValidationError;

/// Trait for enums that represent state machines.
///
/// Implementors define the transition table; validated transitions and
/// terminal detection come for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for TrustMode {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (Blocked, Simulated))
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Blocked => vec![Simulated],
///             TruthBound | Simulated => vec![],
///         }
///     }
/// }
///
/// let released = TrustMode::Blocked.transition_to(TrustMode::Simulated)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
