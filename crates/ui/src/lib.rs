//! Admin-UI helpers for acceptance tests.
//!
//! The admin edit screen renders one collapsed panel per product variation,
//! in an order the screen chooses. Panels look identical until expanded; the
//! only thing telling them apart is a hidden `variable_post_id[<n>]` input
//! whose value is the variation id and whose name carries the panel's render
//! position. [`VariationLocator`] turns a persisted [`Variation`] into that
//! position so later steps can address `variable_*[<n>]` fields.
//!
//! Browser mechanics stay behind the [`AdminPage`] trait.
//!
//! [`Variation`]: shopkit_catalog::Variation

pub mod config;
pub mod connect;
pub mod error;
pub mod memory;
pub mod page;
pub mod route;
pub mod variation;
pub mod wait;
pub mod xpath;

pub use config::UiConfig;
pub use connect::see_connect_button;
pub use error::{UiError, UiResult};
pub use memory::InMemoryAdminPage;
pub use page::{AdminPage, Selector};
pub use route::AdminRoute;
pub use variation::VariationLocator;
pub use xpath::{Literal, Locator, Predicate};
