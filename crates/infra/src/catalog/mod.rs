//! Catalog storage adapters.

pub mod in_memory;
pub mod journal;

pub use in_memory::InMemoryCatalog;
pub use journal::CatalogOp;
