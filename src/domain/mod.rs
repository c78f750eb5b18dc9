//! Domain layer containing the decision engine and its vocabulary.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, state machine, errors)
//! - `neutrosophic` - Neutrosophic numbers (truth, indeterminacy, falsity)
//! - `analysis` - Pure domain services: AHP weighting, consistency, grey TOPSIS ranking, confidence
//! - `gate` - Trust classification of outcomes and the override authority
//! - `shipment` - Shipment context, carrier catalog, and weighting policies

pub mod analysis;
pub mod foundation;
pub mod gate;
pub mod neutrosophic;
pub mod shipment;
