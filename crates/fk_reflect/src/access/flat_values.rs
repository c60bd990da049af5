// -----------------------------------------------------------------------------
// WriteMode

/// Whether mutable extraction creates absent optional embedded records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WriteMode {
    /// Leave absent records absent; their fields get no values.
    #[default]
    Read,
    /// Replace absent records with their default before descending.
    Allocate,
}

impl WriteMode {
    #[inline]
    pub const fn allocates(self) -> bool {
        matches!(self, Self::Allocate)
    }
}

// -----------------------------------------------------------------------------
// FieldValueRef

/// One live field value and the schema index it belongs to.
#[derive(Debug)]
pub struct FieldValueRef<V> {
    pub value: V,
    pub schema_index: usize,
}

impl<V> FieldValueRef<V> {
    #[inline]
    pub const fn new(value: V, schema_index: usize) -> Self {
        Self {
            value,
            schema_index,
        }
    }
}

// -----------------------------------------------------------------------------
// FlatValues

/// The field values of one record instance, strictly increasing in schema
/// index.
///
/// Shorter than the schema when an optional embedded record is absent.
#[derive(Debug)]
pub struct FlatValues<V> {
    entries: Vec<FieldValueRef<V>>,
}

impl<V> FlatValues<V> {
    pub(crate) fn new(entries: Vec<FieldValueRef<V>>) -> Self {
        debug_assert!(
            entries
                .windows(2)
                .all(|w| w[0].schema_index < w[1].schema_index),
            "schema indices must be strictly increasing",
        );
        Self { entries }
    }

    /// Returns the number of values.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry carrying `schema_index`.
    pub fn find(&self, schema_index: usize) -> Option<&FieldValueRef<V>> {
        self.position(schema_index).map(|pos| &self.entries[pos])
    }

    /// Returns the entry carrying `schema_index`, mutably.
    pub fn find_mut(&mut self, schema_index: usize) -> Option<&mut FieldValueRef<V>> {
        self.position(schema_index).map(|pos| &mut self.entries[pos])
    }

    #[inline]
    fn position(&self, schema_index: usize) -> Option<usize> {
        self.entries
            .binary_search_by_key(&schema_index, |e| e.schema_index)
            .ok()
    }

    /// Iterates over the schema indices that have a value.
    pub fn schema_indices(&self) -> impl ExactSizeIterator<Item = usize> + '_ {
        self.entries.iter().map(|e| e.schema_index)
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, FieldValueRef<V>> {
        self.entries.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, FieldValueRef<V>> {
        self.entries.iter_mut()
    }

    /// Returns the underlying entries.
    #[inline]
    pub fn into_inner(self) -> Vec<FieldValueRef<V>> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldValueRef, FlatValues};

    #[test]
    fn find_by_schema_index() {
        let values = FlatValues::new(vec![
            FieldValueRef::new('a', 0),
            FieldValueRef::new('c', 2),
            FieldValueRef::new('f', 5),
        ]);

        assert_eq!(values.find(2).map(|e| e.value), Some('c'));
        assert_eq!(values.find(5).map(|e| e.value), Some('f'));
        assert!(values.find(1).is_none());
        assert!(values.find(6).is_none());
        assert_eq!(values.schema_indices().collect::<Vec<_>>(), [0, 2, 5]);
    }
}
