//! Shipment context - what the caller knows about the consignment.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Delivery urgency tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    Normal,
    High,
    Critical,
}

impl Urgency {
    /// How strongly the shipment leans towards emergency handling.
    pub fn emergency_factor(&self) -> f64 {
        match self {
            Urgency::Critical => 1.0,
            Urgency::High => 0.8,
            Urgency::Normal => 0.5,
        }
    }

    /// High and critical shipments shift weight towards time and risk.
    pub fn is_elevated(&self) -> bool {
        matches!(self, Urgency::High | Urgency::Critical)
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Urgency::Normal => write!(f, "normal"),
            Urgency::High => write!(f, "high"),
            Urgency::Critical => write!(f, "critical"),
        }
    }
}

/// One shipment request as described by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentContext {
    pub origin: String,
    pub destination: String,
    #[serde(default)]
    pub cargo_description: Option<String>,
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(default)]
    pub perishable: bool,
    /// Carrier the caller already has in mind, by id or name.
    #[serde(default)]
    pub declared_carrier: Option<String>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
}

impl ShipmentContext {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            cargo_description: None,
            urgency: Urgency::Normal,
            perishable: false,
            declared_carrier: None,
            weight_kg: None,
        }
    }

    pub fn with_cargo(mut self, description: impl Into<String>) -> Self {
        self.cargo_description = Some(description.into());
        self
    }

    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    pub fn perishable(mut self) -> Self {
        self.perishable = true;
        self
    }

    pub fn with_declared_carrier(mut self, carrier: impl Into<String>) -> Self {
        self.declared_carrier = Some(carrier.into());
        self
    }

    /// Origin and destination are required; weight, when given, must be positive.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.origin.trim().is_empty() {
            return Err(ValidationError::empty_field("origin"));
        }
        if self.destination.trim().is_empty() {
            return Err(ValidationError::empty_field("destination"));
        }
        if let Some(weight) = self.weight_kg {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(ValidationError::out_of_range("weight_kg", 0.0, f64::MAX, weight));
            }
        }
        Ok(())
    }

    /// A cargo description is what makes the context "rich".
    pub fn has_rich_context(&self) -> bool {
        self.cargo_description
            .as_deref()
            .map(|d| !d.trim().is_empty())
            .unwrap_or(false)
    }

    /// Declared carrier with surrounding whitespace removed, if any.
    pub fn declared_carrier(&self) -> Option<&str> {
        self.declared_carrier
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}
