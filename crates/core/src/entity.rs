//! Entity trait: identity assigned by the catalog on first persist.

/// Entity marker + minimal interface.
///
/// Catalog entities are built in memory first and only receive an identity
/// once a store persists them, hence the `Option`.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier, or `None` if it was never persisted.
    fn id(&self) -> Option<Self::Id>;

    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}
