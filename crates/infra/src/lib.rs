//! Infrastructure layer: storage adapters behind the catalog boundary traits.

pub mod catalog;

pub use catalog::{CatalogOp, InMemoryCatalog};
