//! `shopkit-core`: identity and error building blocks shared by the catalog,
//! fixture and UI crates.
//!
//! This crate contains **pure domain** primitives (no storage, no browser).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{OrderId, ProductId};
pub use value_object::ValueObject;
