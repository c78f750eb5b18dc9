//! Neutrosophic value types.
//!
//! A neutrosophic number carries a judgment as independent degrees of
//! truth, indeterminacy, and falsity instead of a single probability.

mod number;

pub use number::NeutrosophicNumber;
