//! Gate Module - trust classification of decision outcomes.
//!
//! Decides whether a result is surfaced as verified, surfaced as
//! unverified, or withheld, and how a withheld result is released.

mod outcome;
mod override_authority;
mod seal;
mod trust_mode;
mod truth_gate;

pub use outcome::{DecisionOutcome, Emergency, Provenance, RequiredField, ALGORITHM_ID};
pub use override_authority::OverrideAuthority;
pub use seal::SealKey;
pub use trust_mode::{EmergencyKind, OutputMode, TrustMode};
pub use truth_gate::{GateConfig, GateError, GatedOutcome, TruthGate, DEFAULT_MINIMUM_CONFIDENCE};

#[cfg(test)]
pub(crate) use outcome::fixtures;
