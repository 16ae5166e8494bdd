//! Typed, caller-defined context fields.
//!
//! [`Fields`] is a small heterogeneous map keyed by type: at most one value of
//! each type is stored, and lookups are checked at compile time rather than
//! through string keys and runtime casts. Applications define a newtype per
//! field they care about:
//!
//! ```rust
//! use switchyard_core::Fields;
//!
//! #[derive(Debug, PartialEq)]
//! struct UserId(i64);
//!
//! let mut fields = Fields::new();
//! fields.insert(UserId(42));
//! assert_eq!(fields.get::<UserId>(), Some(&UserId(42)));
//! ```
//!
//! A `Fields` value belongs to a single dispatch; handlers and middleware of
//! that dispatch read and write it through `&mut` access, so no locking is
//! involved.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;

use crate::error::{FieldError, FieldResult};

type AnyValue = Box<dyn Any + Send + Sync>;

/// A type-keyed bag of values attached to a [`Context`](crate::Context).
#[derive(Default)]
pub struct Fields {
    values: HashMap<TypeId, AnyValue>,
}

impl Fields {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` and returns the bag (builder style).
    pub fn with<T: Send + Sync + 'static>(mut self, value: T) -> Self {
        self.insert(value);
        self
    }

    /// Stores `value`, returning the previous value of the same type.
    pub fn insert<T: Send + Sync + 'static>(&mut self, value: T) -> Option<T> {
        self.values
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(|old| old.downcast::<T>().ok())
            .map(|old| *old)
    }

    /// Returns a reference to the stored value of type `T`.
    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.values
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref::<T>())
    }

    /// Returns a mutable reference to the stored value of type `T`.
    pub fn get_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.values
            .get_mut(&TypeId::of::<T>())
            .and_then(|v| v.downcast_mut::<T>())
    }

    /// Like [`get`](Self::get), but fails with [`FieldError::Missing`].
    pub fn require<T: 'static>(&self) -> FieldResult<&T> {
        self.get::<T>().ok_or(FieldError::Missing(type_name::<T>()))
    }

    /// Returns the stored value of type `T`, inserting `f()` first if absent.
    pub fn get_or_insert_with<T, F>(&mut self, f: F) -> &mut T
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        let slot = self
            .values
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(f()));
        match slot.downcast_mut::<T>() {
            Some(value) => value,
            None => unreachable!("field slot keyed by TypeId holds a different type"),
        }
    }

    /// Removes and returns the stored value of type `T`.
    pub fn remove<T: 'static>(&mut self) -> Option<T> {
        self.values
            .remove(&TypeId::of::<T>())
            .and_then(|v| v.downcast::<T>().ok())
            .map(|v| *v)
    }

    /// Returns `true` if a value of type `T` is stored.
    pub fn contains<T: 'static>(&self) -> bool {
        self.values.contains_key(&TypeId::of::<T>())
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Removes every stored value.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl std::fmt::Debug for Fields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fields")
            .field("len", &self.values.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Admin(bool);

    #[derive(Debug, PartialEq, Eq)]
    struct Visits(u32);

    #[test]
    fn test_insert_and_get() {
        let mut fields = Fields::new();
        assert!(fields.is_empty());

        assert_eq!(fields.insert(Admin(true)), None);
        assert_eq!(fields.get::<Admin>(), Some(&Admin(true)));
        assert!(fields.contains::<Admin>());
        assert!(!fields.contains::<Visits>());
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_insert_replaces_same_type() {
        let mut fields = Fields::new().with(Admin(false));
        assert_eq!(fields.insert(Admin(true)), Some(Admin(false)));
        assert_eq!(fields.get::<Admin>(), Some(&Admin(true)));
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_get_mut_and_get_or_insert_with() {
        let mut fields = Fields::new();
        fields.get_or_insert_with(|| Visits(0)).0 += 1;
        fields.get_or_insert_with(|| Visits(100)).0 += 1;
        assert_eq!(fields.get::<Visits>(), Some(&Visits(2)));

        if let Some(v) = fields.get_mut::<Visits>() {
            v.0 = 10;
        }
        assert_eq!(fields.remove::<Visits>(), Some(Visits(10)));
        assert!(fields.get::<Visits>().is_none());
    }

    #[test]
    fn test_require_missing_names_the_type() {
        let fields = Fields::new();
        let err = fields.require::<Admin>().unwrap_err();
        match err {
            FieldError::Missing(name) => assert!(name.ends_with("Admin")),
        }
    }

    #[test]
    fn test_clear() {
        let mut fields = Fields::new().with(Admin(true)).with(Visits(1));
        assert_eq!(fields.len(), 2);
        fields.clear();
        assert!(fields.is_empty());
    }
}
