//! File-based Catalog Source Adapter
//!
//! Reads the carrier catalog from a JSON or YAML file on every load, so an
//! updated export is picked up without restarting. Files ending in `.json`
//! are parsed as JSON; anything else as YAML.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::shipment::CarrierCatalog;
use crate::ports::CarrierCatalogSource;

/// File-based catalog source
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    /// Create a source reading from `path`
    ///
    /// # Example
    /// ```ignore
    /// let source = FileCatalogSource::new("./data/carriers.yaml");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_json(&self) -> bool {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
    }

    fn unreadable(&self, reason: impl Into<String>) -> DomainError {
        DomainError::new(ErrorCode::CatalogUnreadable, reason)
            .with_detail("path", self.path.display().to_string())
    }
}

impl CarrierCatalogSource for FileCatalogSource {
    fn load(&self) -> Result<CarrierCatalog, DomainError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => DomainError::new(
                ErrorCode::CatalogNotFound,
                format!("Carrier catalog not found: {}", self.path.display()),
            )
            .with_detail("path", self.path.display().to_string()),
            _ => self.unreadable(e.to_string()),
        })?;

        let catalog: CarrierCatalog = if self.is_json() {
            serde_json::from_str(&contents).map_err(|e| self.unreadable(e.to_string()))?
        } else {
            serde_yaml::from_str(&contents).map_err(|e| self.unreadable(e.to_string()))?
        };

        tracing::debug!(
            path = %self.path.display(),
            carriers = catalog.len(),
            "carrier catalog loaded"
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const YAML_CATALOG: &str = r#"
carriers:
  - id: kn
    name: Kuehne & Nagel
    scores: { cost: 0.8, time: 0.7, reliability: 0.9, flexibility: 0.6, risk: 0.8 }
  - id: dhl
    name: DHL Express
    scores: { cost: 0.5, time: 0.9, reliability: 0.8, flexibility: 0.7, risk: 0.7 }
"#;

    const JSON_CATALOG: &str = r#"{
  "carriers": [
    { "id": "agl", "name": "AGL",
      "scores": { "cost": 0.6, "time": 0.5, "reliability": 0.6, "flexibility": 0.8, "risk": 0.5 } }
  ]
}"#;

    #[test]
    fn test_file_source_loads_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("carriers.yaml");
        fs::write(&path, YAML_CATALOG).unwrap();

        let catalog = FileCatalogSource::new(&path).load().unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.find("Kuehne & Nagel").is_some());
    }

    #[test]
    fn test_file_source_loads_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("carriers.json");
        fs::write(&path, JSON_CATALOG).unwrap();

        let catalog = FileCatalogSource::new(&path).load().unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(!catalog.carriers()[0].estimated);
    }

    #[test]
    fn test_file_source_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let source = FileCatalogSource::new(temp_dir.path().join("missing.yaml"));

        let err = source.load().unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogNotFound);
        assert!(err.details.contains_key("path"));
    }

    #[test]
    fn test_file_source_rejects_out_of_range_score() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("carriers.yaml");
        fs::write(&path, YAML_CATALOG.replace("cost: 0.8", "cost: 1.8")).unwrap();

        let err = FileCatalogSource::new(&path).load().unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogUnreadable);
    }

    #[test]
    fn test_file_source_rejects_duplicate_ids() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("carriers.yaml");
        fs::write(&path, YAML_CATALOG.replace("id: dhl", "id: KN")).unwrap();

        let err = FileCatalogSource::new(&path).load().unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogUnreadable);
    }

    #[test]
    fn test_file_source_picks_up_updates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("carriers.json");
        fs::write(&path, JSON_CATALOG).unwrap();
        let source = FileCatalogSource::new(&path);
        assert_eq!(source.load().unwrap().len(), 1);

        fs::write(&path, serde_json::to_string(&serde_yaml::from_str::<CarrierCatalog>(YAML_CATALOG).unwrap()).unwrap())
            .unwrap();
        assert_eq!(source.load().unwrap().len(), 2);
    }
}
