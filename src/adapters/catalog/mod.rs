//! Catalog Adapters
//!
//! Implementations of the CarrierCatalogSource port.
//!
//! ## Available Adapters
//!
//! - **FileCatalogSource** - Reads the catalog from a JSON or YAML file
//! - **InMemoryCatalogSource** - Serves a catalog held in memory (testing/embedding)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::catalog::{FileCatalogSource, InMemoryCatalogSource};
//!
//! // Production: catalog exported by the data-extraction job
//! let source = FileCatalogSource::new("./data/carriers.yaml");
//!
//! // Testing: fixed catalog
//! let source = InMemoryCatalogSource::new(catalog);
//! ```

mod file_catalog_source;
mod in_memory_catalog_source;

pub use file_catalog_source::FileCatalogSource;
pub use in_memory_catalog_source::InMemoryCatalogSource;
