//! Catalog entity model (products, attributes, variations, orders) and the
//! persistence boundary fixtures write through.
//!
//! Entities here are plain in-memory values; identities are assigned by a
//! [`CatalogStore`] implementation, never by the entities themselves.

pub mod attribute;
pub mod order;
pub mod price;
pub mod product;
pub mod store;
pub mod variation;

pub use attribute::Attribute;
pub use order::Order;
pub use price::Price;
pub use product::{Product, ProductType, VariableProduct};
pub use store::{CatalogStore, StoreError, StoreResult, SyncControl};
pub use variation::Variation;
