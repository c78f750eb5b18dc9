//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Catalog Ports
//!
//! - `CarrierCatalogSource` - Read-only snapshot of the carriers to rank

mod carrier_catalog_source;

pub use carrier_catalog_source::CarrierCatalogSource;
