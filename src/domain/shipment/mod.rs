//! Shipment Module - caller-side inputs to the decision engine.
//!
//! The engine itself only needs a criteria list and a carrier catalog.
//! This module turns a shipment description into those: weight policy,
//! carrier catalog, and the profile used for carriers nobody has data on.

mod carrier;
mod context;
mod default_profile;
mod weight_policy;

pub use carrier::{Carrier, CarrierCatalog, CarrierScores, CARRIER_CRITERIA};
pub use context::{ShipmentContext, Urgency};
pub use default_profile::{DefaultProfilePolicy, NEUTRAL_SCORE};
pub use weight_policy::{CriterionWeights, WeightPolicy};
