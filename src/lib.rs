//! Freight Decision - Carrier ranking with a truth gate
//!
//! This crate ranks freight carriers for a shipment with neutrosophic AHP
//! weighting and grey TOPSIS, fuses the result quality into one confidence
//! value, and classifies every outcome as truth-bound, simulated, or blocked
//! before it is surfaced.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
