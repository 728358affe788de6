//! Shared tracing setup for fixture and admin-UI test runs.

pub mod tracing;

pub use crate::tracing::{DEFAULT_FILTER, init, init_for_tests};
