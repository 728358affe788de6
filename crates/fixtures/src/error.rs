use thiserror::Error;

use shopkit_catalog::StoreError;
use shopkit_core::DomainError;

pub type FixtureResult<T> = Result<T, FixtureError>;

/// Fixture construction failure.
///
/// Every variant aborts the build; no partially built fixture is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FixtureError {
    /// The spec or an entity rejected a value before anything was written.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A catalog write failed.
    #[error("catalog write failed: {0}")]
    Store(#[from] StoreError),
}
