//! Logging configuration

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use super::ValidationError;

/// Log filter and output format
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Validate the filter directive
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.filter().map(|_| ())
    }

    /// `RUST_LOG` if set, otherwise the configured level
    pub fn filter(&self) -> Result<EnvFilter, ValidationError> {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .map_err(|_| ValidationError::InvalidLogFilter(self.level.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_level_is_info() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json);
    }

    #[test]
    fn accepts_target_directives() {
        let config = LoggingConfig {
            level: "freight_decision=debug,warn".to_string(),
            json: true,
        };
        assert!(EnvFilter::try_new(&config.level).is_ok());
    }
}
