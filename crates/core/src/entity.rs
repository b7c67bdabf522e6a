//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier, if the entity has been persisted.
    ///
    /// Domain entities in this workspace receive their identity from the
    /// store on insert, so it is absent on freshly constructed instances.
    fn id(&self) -> Option<&Self::Id>;
}
