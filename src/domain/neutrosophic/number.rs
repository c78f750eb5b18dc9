//! Single-valued neutrosophic numbers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{UnitInterval, ValidationError};

/// A (truth, indeterminacy, falsity) judgment.
///
/// Each component lies in [0,1]; the three are not required to sum to 1.
/// Values are immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTriple", into = "RawTriple")]
pub struct NeutrosophicNumber {
    truth: f64,
    indeterminacy: f64,
    falsity: f64,
}

#[derive(Serialize, Deserialize)]
struct RawTriple {
    truth: f64,
    indeterminacy: f64,
    falsity: f64,
}

impl TryFrom<RawTriple> for NeutrosophicNumber {
    type Error = ValidationError;

    fn try_from(raw: RawTriple) -> Result<Self, Self::Error> {
        NeutrosophicNumber::new(raw.truth, raw.indeterminacy, raw.falsity)
    }
}

impl From<NeutrosophicNumber> for RawTriple {
    fn from(n: NeutrosophicNumber) -> Self {
        RawTriple {
            truth: n.truth,
            indeterminacy: n.indeterminacy,
            falsity: n.falsity,
        }
    }
}

impl NeutrosophicNumber {
    /// The identity comparison: fully true, no doubt, no falsity.
    pub const IDENTITY: Self = Self {
        truth: 1.0,
        indeterminacy: 0.0,
        falsity: 0.0,
    };

    /// Creates a triple, validating each component.
    pub fn new(truth: f64, indeterminacy: f64, falsity: f64) -> Result<Self, ValidationError> {
        let truth = UnitInterval::try_named("truth", truth)?.value();
        let indeterminacy = UnitInterval::try_named("indeterminacy", indeterminacy)?.value();
        let falsity = UnitInterval::try_named("falsity", falsity)?.value();
        Ok(Self {
            truth,
            indeterminacy,
            falsity,
        })
    }

    /// Builds a triple whose score equals `score`.
    ///
    /// Truth and falsity split the score symmetrically around 0.5 so that
    /// `truth - falsity == score` and `truth + falsity == 1`; the uncertainty
    /// factor becomes the indeterminacy. Inputs are clamped to their ranges.
    pub fn from_score(score: f64, uncertainty: f64) -> Self {
        let s = if score.is_nan() { 0.0 } else { score.clamp(-1.0, 1.0) };
        Self {
            truth: (1.0 + s) / 2.0,
            indeterminacy: UnitInterval::clamped(uncertainty).value(),
            falsity: (1.0 - s) / 2.0,
        }
    }

    /// Builds the neutrosophic reading of a crisp weight.
    pub fn from_weight(weight: f64, uncertainty: f64) -> Self {
        let w = UnitInterval::clamped(weight).value();
        Self {
            truth: w,
            indeterminacy: UnitInterval::clamped(uncertainty).value(),
            falsity: 1.0 - w,
        }
    }

    pub fn truth(&self) -> f64 {
        self.truth
    }

    pub fn indeterminacy(&self) -> f64 {
        self.indeterminacy
    }

    pub fn falsity(&self) -> f64 {
        self.falsity
    }

    /// Scalarization used throughout the engine: `truth - falsity`.
    pub fn score(&self) -> f64 {
        self.truth - self.falsity
    }

    /// Accuracy function: `truth + falsity`.
    pub fn accuracy(&self) -> f64 {
        self.truth + self.falsity
    }

    /// Returns true for the identity comparison.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// The reverse judgment (j versus i): truth and falsity swap.
    pub fn reciprocal(&self) -> Self {
        Self {
            truth: self.falsity,
            indeterminacy: self.indeterminacy,
            falsity: self.truth,
        }
    }

    /// Neutrosophic complement `(f, 1 - i, t)`.
    pub fn complement(&self) -> Self {
        Self {
            truth: self.falsity,
            indeterminacy: 1.0 - self.indeterminacy,
            falsity: self.truth,
        }
    }

    /// Neutrosophic sum `(t1 + t2 - t1·t2, i1·i2, f1·f2)`.
    pub fn add(&self, other: &Self) -> Self {
        Self {
            truth: self.truth + other.truth - self.truth * other.truth,
            indeterminacy: self.indeterminacy * other.indeterminacy,
            falsity: self.falsity * other.falsity,
        }
    }

    /// Neutrosophic product `(t1·t2, i1 + i2 - i1·i2, f1 + f2 - f1·f2)`.
    pub fn multiply(&self, other: &Self) -> Self {
        Self {
            truth: self.truth * other.truth,
            indeterminacy: self.indeterminacy + other.indeterminacy
                - self.indeterminacy * other.indeterminacy,
            falsity: self.falsity + other.falsity - self.falsity * other.falsity,
        }
    }
}

impl fmt::Display for NeutrosophicNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{:.3}, {:.3}, {:.3}>",
            self.truth, self.indeterminacy, self.falsity
        )
    }
}
