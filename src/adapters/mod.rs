//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `catalog` - Carrier catalog sources (file, in-memory)

pub mod catalog;

pub use catalog::{FileCatalogSource, InMemoryCatalogSource};
