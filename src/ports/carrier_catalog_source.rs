//! Carrier catalog source port.
//!
//! The engine ranks whatever catalog it is handed; where the catalog comes
//! from (historical records, a file, a fixture) is an adapter concern.

use crate::domain::foundation::DomainError;
use crate::domain::shipment::CarrierCatalog;

/// Port for loading a read-only snapshot of the carrier catalog.
///
/// Implementations must return a fresh, validated snapshot on every call.
pub trait CarrierCatalogSource: Send + Sync {
    /// Load the current catalog.
    ///
    /// # Errors
    ///
    /// - `CatalogNotFound` if the backing store does not exist
    /// - `CatalogUnreadable` if it exists but cannot be parsed
    /// - `OutOfRange` / `InvalidFormat` for invalid carrier entries
    fn load(&self) -> Result<CarrierCatalog, DomainError>;
}
