//! Entity trait: identity + continuity across edits.

/// Entity marker + minimal interface.
///
/// Flowers, products and events are entities: two records with the same id are
/// the same catalog entry even after a rename.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
