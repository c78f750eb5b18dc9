//! Truth gate configuration

use secrecy::SecretString;
use serde::Deserialize;

use super::ValidationError;
use crate::domain::gate::{GateConfig, OverrideAuthority, SealKey, DEFAULT_MINIMUM_CONFIDENCE};

/// Confidence floor below which outcomes are tagged low-confidence.
pub const DEFAULT_EMERGENCY_CONFIDENCE: f64 = 0.60;

/// Gate thresholds and override credentials
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GateSettings {
    /// Minimum confidence for TRUTH_BOUND (inclusive)
    pub minimum_confidence: f64,

    /// Below this the pipeline tags a low-confidence emergency
    pub emergency_confidence: f64,

    /// HMAC secret for override tokens
    pub override_secret: Option<SecretString>,

    /// Static override codes accepted for any blocked outcome
    pub override_codes: Vec<SecretString>,

    /// Shared key for outcome seals; a random per-process key when unset
    pub seal_secret: Option<SecretString>,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            minimum_confidence: DEFAULT_MINIMUM_CONFIDENCE,
            emergency_confidence: DEFAULT_EMERGENCY_CONFIDENCE,
            override_secret: None,
            override_codes: Vec::new(),
            seal_secret: None,
        }
    }
}

impl GateSettings {
    /// Validate gate settings
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("gate.minimum_confidence", self.minimum_confidence),
            ("gate.emergency_confidence", self.emergency_confidence),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::OutOfUnitRange { field, value });
            }
        }
        if self.emergency_confidence > self.minimum_confidence {
            return Err(ValidationError::EmergencyAboveMinimum {
                emergency: self.emergency_confidence,
                minimum: self.minimum_confidence,
            });
        }
        Ok(())
    }

    /// Override authority built from the configured secrets
    pub fn authority(&self) -> OverrideAuthority {
        OverrideAuthority::from_secrets(self.override_secret.clone(), self.override_codes.clone())
    }

    /// Immutable gate configuration for the pipeline
    pub fn gate_config(&self) -> GateConfig {
        let config = GateConfig::default()
            .with_minimum_confidence(self.minimum_confidence)
            .with_authority(self.authority());
        match self.seal_secret.clone().and_then(SealKey::from_secret) {
            Some(key) => config.with_seal_key(key),
            None => config,
        }
    }
}
