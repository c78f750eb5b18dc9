//! Unit interval value object (0.0-1.0 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A finite value between 0.0 and 1.0 inclusive.
///
/// Used for normalized carrier scores, confidences, and closeness
/// coefficients. Deserialization goes through [`UnitInterval::try_new`] so a
/// malformed catalog can never smuggle an out-of-range score in.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct UnitInterval(f64);

impl UnitInterval {
    /// Zero.
    pub const ZERO: Self = Self(0.0);

    /// One.
    pub const ONE: Self = Self(1.0);

    /// Creates a new value, clamping to the valid range.
    ///
    /// NaN clamps to zero.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Creates a value, returning error if out of range or not finite.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        Self::try_named("value", value)
    }

    /// Like [`UnitInterval::try_new`], naming the field in the error.
    pub fn try_named(field: &str, value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::out_of_range(field, 0.0, 1.0, value));
        }
        Ok(Self(value))
    }

    /// Returns the raw value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns the value rounded to a whole percentage.
    pub fn as_percent(&self) -> u8 {
        (self.0 * 100.0).round() as u8
    }
}

impl Default for UnitInterval {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<f64> for UnitInterval {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<UnitInterval> for f64 {
    fn from(value: UnitInterval) -> Self {
        value.0
    }
}

impl fmt::Display for UnitInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_accepts_bounds() {
        assert_eq!(UnitInterval::try_new(0.0).unwrap().value(), 0.0);
        assert_eq!(UnitInterval::try_new(1.0).unwrap().value(), 1.0);
        assert_eq!(UnitInterval::try_new(0.42).unwrap().value(), 0.42);
    }

    #[test]
    fn try_new_rejects_out_of_range() {
        match UnitInterval::try_named("reliability", 1.2) {
            Err(ValidationError::OutOfRange { field, actual, .. }) => {
                assert_eq!(field, "reliability");
                assert_eq!(actual, 1.2);
            }
            other => panic!("Expected OutOfRange error, got {:?}", other),
        }
        assert!(UnitInterval::try_new(-0.01).is_err());
        assert!(UnitInterval::try_new(f64::NAN).is_err());
        assert!(UnitInterval::try_new(f64::INFINITY).is_err());
    }

    #[test]
    fn clamped_pins_to_range() {
        assert_eq!(UnitInterval::clamped(1.7).value(), 1.0);
        assert_eq!(UnitInterval::clamped(-3.0).value(), 0.0);
        assert_eq!(UnitInterval::clamped(f64::NAN).value(), 0.0);
    }

    #[test]
    fn as_percent_rounds() {
        assert_eq!(UnitInterval::clamped(0.655).as_percent(), 66);
        assert_eq!(UnitInterval::ONE.as_percent(), 100);
    }

    #[test]
    fn serde_is_transparent_and_validating() {
        let json = serde_json::to_string(&UnitInterval::clamped(0.25)).unwrap();
        assert_eq!(json, "0.25");

        let ok: UnitInterval = serde_json::from_str("0.75").unwrap();
        assert_eq!(ok.value(), 0.75);

        let bad: Result<UnitInterval, _> = serde_json::from_str("1.5");
        assert!(bad.is_err());
    }
}
