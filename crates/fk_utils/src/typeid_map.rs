use core::any::TypeId;
use core::fmt;

use crate::hash::NoOpHashState;
use crate::hash::hashbrown::HashMap;
use crate::hash::hashbrown::hash_map::Entry;

/// A map from [`TypeId`] to `V`.
///
/// `TypeId`s are hashed already, so keys go through [`NoOpHashState`].
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use fk_utils::TypeIdMap;
///
/// let mut names = TypeIdMap::new();
/// names.insert(TypeId::of::<u32>(), "u32");
///
/// assert!(names.contains_type::<u32>());
/// assert_eq!(names.get_type::<u32>(), Some(&"u32"));
/// assert_eq!(names.get_type::<i32>(), None);
/// ```
pub struct TypeIdMap<V> {
    inner: HashMap<TypeId, V, NoOpHashState>,
}

impl<V> TypeIdMap<V> {
    /// Creates an empty map; usable in `static` initializers.
    #[inline]
    pub const fn new() -> Self {
        Self {
            inner: HashMap::with_hasher(NoOpHashState),
        }
    }

    /// Returns the value stored for `type_id`.
    #[inline]
    pub fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.inner.get(type_id)
    }

    /// Returns the value stored for `T`.
    #[inline]
    pub fn get_type<T: ?Sized + 'static>(&self) -> Option<&V> {
        self.get(&TypeId::of::<T>())
    }

    /// Returns the value stored for `type_id`, storing `make()` first if there
    /// is none. `make` runs only on a miss.
    pub fn get_or_insert(&mut self, type_id: TypeId, make: impl FnOnce() -> V) -> &mut V {
        match self.inner.entry(type_id) {
            Entry::Occupied(slot) => slot.into_mut(),
            Entry::Vacant(slot) => slot.insert(make()),
        }
    }

    /// Stores `value` for `type_id` and returns the value it replaced.
    #[inline]
    pub fn insert(&mut self, type_id: TypeId, value: V) -> Option<V> {
        self.inner.insert(type_id, value)
    }

    /// Returns `true` if a value is stored for `T`.
    #[inline]
    pub fn contains_type<T: ?Sized + 'static>(&self) -> bool {
        self.inner.contains_key(&TypeId::of::<T>())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterates over the entries in arbitrary order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&TypeId, &V)> {
        self.inner.iter()
    }
}

impl<V> Default for TypeIdMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for TypeIdMap<V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for TypeIdMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.inner.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::TypeIdMap;
    use core::any::TypeId;

    #[test]
    fn get_or_insert_runs_once() {
        let mut map = TypeIdMap::new();
        let mut runs = 0;
        for _ in 0..3 {
            map.get_or_insert(TypeId::of::<String>(), || {
                runs += 1;
                "string"
            });
        }
        assert_eq!(runs, 1);
        assert_eq!(map.len(), 1);
        assert!(map.contains_type::<String>());
    }

    #[test]
    fn insert_replaces() {
        let mut map = TypeIdMap::new();
        assert_eq!(map.insert(TypeId::of::<u8>(), 1), None);
        assert_eq!(map.insert(TypeId::of::<u8>(), 2), Some(1));
        assert_eq!(map.get_type::<u8>(), Some(&2));
        assert_eq!(map.iter().count(), 1);
        assert!(!map.is_empty());
    }
}
