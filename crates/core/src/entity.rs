//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Rules are entities: edits between passes keep the same id, and slots refer
/// to rules only through that id.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
