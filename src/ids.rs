//! Typed Ids
//!
//! Orders and parts are both keyed by UUIDs. Wrapping them in [`TypedUuid`]
//! keeps a part id from being handed to an operation that expects an order id.

use std::{
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use uuid::Uuid;

/// A UUID tagged with the record type it identifies.
pub struct TypedUuid<T>(Uuid, PhantomData<T>);

impl<T> TypedUuid<T> {
    /// Generate a fresh, time-ordered id.
    #[must_use]
    pub fn now() -> Self {
        Self::from_uuid(Uuid::now_v7())
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, PhantomData)
    }

    /// Unwrap into the raw UUID.
    #[must_use]
    pub const fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl<T> Clone for TypedUuid<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedUuid<T> {}

impl<T> Debug for TypedUuid<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&self.0, f)
    }
}

impl<T> Display for TypedUuid<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for TypedUuid<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for TypedUuid<T> {}

impl<T> Hash for TypedUuid<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> From<Uuid> for TypedUuid<T> {
    fn from(value: Uuid) -> Self {
        Self::from_uuid(value)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    struct Marker;

    #[test]
    fn generated_ids_are_distinct() {
        let a = TypedUuid::<Marker>::now();
        let b = TypedUuid::<Marker>::now();

        assert_ne!(a, b, "two fresh ids should never collide");
    }

    #[test]
    fn round_trips_through_raw_uuid() {
        let raw = Uuid::now_v7();
        let typed = TypedUuid::<Marker>::from(raw);

        assert_eq!(typed.into_uuid(), raw);
        assert_eq!(typed.to_string(), raw.to_string());
    }

    #[test]
    fn hashes_by_the_wrapped_uuid() {
        let raw = Uuid::now_v7();
        let other = TypedUuid::<Marker>::now();

        let ids: HashSet<TypedUuid<Marker>> = [
            TypedUuid::from_uuid(raw),
            TypedUuid::from_uuid(raw),
            other,
        ]
        .into_iter()
        .collect();

        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&TypedUuid::from_uuid(raw)));
        assert!(ids.contains(&other));
    }
}
