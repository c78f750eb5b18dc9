//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, the state machine trait, and error
//! types that form the vocabulary of the decision engine.

mod errors;
mod ids;
mod state_machine;
mod timestamp;
mod unit_interval;

pub use errors::{DecisionError, DomainError, ErrorCode, ValidationError};
pub use ids::DecisionId;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
pub use unit_interval::UnitInterval;
