//! Engine configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! and an optional file using the `config` and `dotenvy` crates. Environment
//! variables use the `FREIGHT_DECISION` prefix and `__` between nested keys.
//!
//! Configuration is loaded once at startup and handed to the pipeline by value;
//! nothing reads it again afterwards.
//!
//! # Example
//!
//! ```no_run
//! use freight_decision::config::EngineConfig;
//!
//! let config = EngineConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Minimum confidence {}", config.gate.minimum_confidence);
//! ```

mod error;
mod gate;
mod logging;
mod weighting;

pub use error::{ConfigError, ValidationError};
pub use gate::{GateSettings, DEFAULT_EMERGENCY_CONFIDENCE};
pub use logging::LoggingConfig;
pub use weighting::WeightingSettings;

use serde::Deserialize;
use std::path::Path;

use crate::domain::analysis::ConfidenceConfig;

/// Environment variable naming an optional configuration file
pub const CONFIG_FILE_ENV: &str = "FREIGHT_DECISION_CONFIG";

/// Root engine configuration
///
/// Every section has defaults, so an empty environment yields a working engine.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    /// Confidence fusion coefficients
    #[serde(default)]
    pub confidence: ConfidenceConfig,

    /// Truth gate thresholds and override credentials
    #[serde(default)]
    pub gate: GateSettings,

    /// Criterion weighting policy
    #[serde(default)]
    pub weighting: WeightingSettings,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Load configuration from the environment
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads the file named by `FREIGHT_DECISION_CONFIG`, if set
    /// 3. Overlays environment variables with `FREIGHT_DECISION` prefix
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `FREIGHT_DECISION__GATE__MINIMUM_CONFIDENCE=0.7` -> `gate.minimum_confidence = 0.7`
    /// - `FREIGHT_DECISION__GATE__OVERRIDE_CODES=a,b` -> `gate.override_codes = ["a", "b"]`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or values cannot be
    /// parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let file = std::env::var(CONFIG_FILE_ENV).ok();
        Self::load_from(file.as_deref().map(Path::new))
    }

    /// Load configuration from an explicit file plus the environment
    pub fn load_from(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix("FREIGHT_DECISION")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("gate.override_codes")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.confidence
            .validate()
            .map_err(|e| ValidationError::InvalidConfidence(e.to_string()))?;
        self.gate.validate()?;
        self.weighting.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("FREIGHT_DECISION__GATE__MINIMUM_CONFIDENCE");
        env::remove_var("FREIGHT_DECISION__GATE__OVERRIDE_SECRET");
        env::remove_var("FREIGHT_DECISION__GATE__OVERRIDE_CODES");
        env::remove_var("FREIGHT_DECISION__CONFIDENCE__RICH_DATA_FACTOR");
        env::remove_var("FREIGHT_DECISION__LOGGING__LEVEL");
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = EngineConfig::load_from(None);

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.gate.minimum_confidence, 0.65);
        assert_eq!(config.confidence.consistency_weight, 0.4);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_environment_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("FREIGHT_DECISION__GATE__MINIMUM_CONFIDENCE", "0.7");
        env::set_var("FREIGHT_DECISION__GATE__OVERRIDE_SECRET", "env-secret");
        env::set_var("FREIGHT_DECISION__GATE__OVERRIDE_CODES", "ops-1,ops-2");
        env::set_var("FREIGHT_DECISION__CONFIDENCE__RICH_DATA_FACTOR", "0.95");
        let result = EngineConfig::load_from(None);
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.gate.minimum_confidence, 0.7);
        assert_eq!(config.gate.override_codes.len(), 2);
        assert!(config.gate.authority().verify("any", "ops-2"));
        assert_eq!(config.confidence.rich_data_factor, 0.95);
    }

    #[test]
    fn test_file_then_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "gate:\n  minimum_confidence: 0.8\nlogging:\n  level: debug\nweighting:\n  default_profile:\n    policy: exclude"
        )
        .unwrap();

        env::set_var("FREIGHT_DECISION__LOGGING__LEVEL", "warn");
        let result = EngineConfig::load_from(Some(file.path()));
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.gate.minimum_confidence, 0.8);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(
            config.weighting.default_profile,
            crate::domain::shipment::DefaultProfilePolicy::Exclude
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let result = EngineConfig::load_from(Some(Path::new("/nonexistent/freight.yaml")));
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_validate_rejects_unbalanced_confidence_weights() {
        let mut config = EngineConfig::default();
        config.confidence.closeness_weight = 0.9;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidConfidence(_))
        ));
    }
}
