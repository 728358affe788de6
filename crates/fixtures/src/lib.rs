//! Catalog fixtures for acceptance tests.
//!
//! Builders here write straight through a [`CatalogStore`] so a test starts
//! from a known catalog state: simple products, variable products with their
//! attribute/variation matrix, and empty orders.
//!
//! ```ignore
//! let catalog = InMemoryCatalog::new();
//! let fixtures = Fixtures::new(&catalog);
//!
//! let built = fixtures.variable_product(&VariableProductSpec::default())?;
//! let variation = built.variations.get("product_variation").unwrap();
//! ```
//!
//! [`CatalogStore`]: shopkit_catalog::CatalogStore

pub mod error;
pub mod ordered;
pub mod product;
pub mod spec;
pub mod variable;

pub use error::{FixtureError, FixtureResult};
pub use ordered::OrderedMap;
pub use product::Fixtures;
pub use spec::{ProductConfig, ProductSpec, VariableProductConfig, VariableProductSpec};
pub use variable::{LabeledVariations, VariableProductFixture};
