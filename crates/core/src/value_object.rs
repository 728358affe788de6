//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Attributes, prices and attribute selections carry no identity of their
/// own: two with the same values are the same thing.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
