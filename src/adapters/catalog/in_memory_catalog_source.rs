//! In-Memory Catalog Source Adapter
//!
//! Serves a catalog snapshot held in memory. The snapshot can be swapped
//! atomically; callers that already loaded keep their own copy.

use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::foundation::DomainError;
use crate::domain::shipment::CarrierCatalog;
use crate::ports::CarrierCatalogSource;

/// In-memory catalog source
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogSource {
    catalog: Arc<RwLock<CarrierCatalog>>,
}

impl InMemoryCatalogSource {
    /// Create a source serving `catalog`
    pub fn new(catalog: CarrierCatalog) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
        }
    }

    /// Replace the served snapshot
    pub fn replace(&self, catalog: CarrierCatalog) {
        let mut guard = self.catalog.write().unwrap_or_else(PoisonError::into_inner);
        *guard = catalog;
    }
}

impl CarrierCatalogSource for InMemoryCatalogSource {
    fn load(&self) -> Result<CarrierCatalog, DomainError> {
        let guard = self.catalog.read().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.clone())
    }
}
