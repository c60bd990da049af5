use core::any::type_name;
use std::sync::Arc;

use crate::access::{AccessError, FieldValueRef, FlatValues};
use crate::policy::FieldPolicy;
use crate::{FlatSchema, Value};

// -----------------------------------------------------------------------------
// AsValue

/// Read access to the value held by a [`FieldValueRef`].
pub trait AsValue {
    fn as_value(&self) -> &dyn Value;
}

/// Write access to the value held by a [`FieldValueRef`].
pub trait AsValueMut: AsValue {
    fn as_value_mut(&mut self) -> &mut dyn Value;
}

impl<'a> AsValue for &'a dyn Value {
    #[inline]
    fn as_value(&self) -> &dyn Value {
        *self
    }
}

impl<'a> AsValue for &'a mut dyn Value {
    #[inline]
    fn as_value(&self) -> &dyn Value {
        &**self
    }
}

impl<'a> AsValueMut for &'a mut dyn Value {
    #[inline]
    fn as_value_mut(&mut self) -> &mut dyn Value {
        &mut **self
    }
}

// -----------------------------------------------------------------------------
// Resolve

/// Finds the value addressed by `name`.
///
/// `None` if the name matches no field, or if it matches a field that has no
/// value in this instance.
pub fn resolve_value<'v, V>(
    schema: &FlatSchema,
    values: &'v FlatValues<V>,
    name: &str,
) -> Option<&'v FieldValueRef<V>> {
    let index = schema.resolve_index(name)?;
    values.find(index)
}

// -----------------------------------------------------------------------------
// FieldSet

/// The flattened fields of one record instance.
///
/// Pairs the shared [`FlatSchema`] of the record type with the values of the
/// instance. `V` is `&dyn Value` for [`SchemaCache::extract`] and
/// `&mut dyn Value` for [`SchemaCache::extract_mut`].
///
/// [`SchemaCache::extract`]: crate::SchemaCache::extract
/// [`SchemaCache::extract_mut`]: crate::SchemaCache::extract_mut
///
/// # Examples
///
/// ```
/// use fk_reflect::{SchemaCache, WriteMode, derive::Record};
///
/// #[derive(Record)]
/// struct Quota {
///     #[record(json = "max_cpu")]
///     pub cpu: u32,
///     pub memory_mb: u32,
/// }
///
/// let cache = SchemaCache::new();
/// let mut quota = Quota { cpu: 2, memory_mb: 512 };
///
/// let mut fields = cache.extract_mut(&mut quota, WriteMode::Read);
/// *fields.get_mut_as::<u32>("max_cpu").unwrap() = 4;
///
/// for (_, value) in fields.iter_mut() {
///     *value.downcast_mut::<u32>().unwrap() *= 2;
/// }
///
/// assert_eq!((quota.cpu, quota.memory_mb), (8, 1024));
/// ```
#[derive(Debug)]
pub struct FieldSet<V> {
    schema: Arc<FlatSchema>,
    values: FlatValues<V>,
}

impl<V> FieldSet<V> {
    pub(crate) fn new(schema: Arc<FlatSchema>, values: FlatValues<V>) -> Self {
        Self { schema, values }
    }

    /// Returns the schema of the record type.
    #[inline]
    pub fn schema(&self) -> &Arc<FlatSchema> {
        &self.schema
    }

    /// Returns the values of this instance.
    #[inline]
    pub fn values(&self) -> &FlatValues<V> {
        &self.values
    }

    #[inline]
    pub fn into_parts(self) -> (Arc<FlatSchema>, FlatValues<V>) {
        (self.schema, self.values)
    }

    /// Returns the number of fields that have a value.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the schema index addressed by `name`, see [`FlatSchema::resolve_index`].
    #[inline]
    pub fn resolve_index(&self, name: &str) -> Option<usize> {
        self.schema.resolve_index(name)
    }

    /// Returns the entry addressed by `name`, see [`resolve_value`].
    #[inline]
    pub fn resolve(&self, name: &str) -> Option<&FieldValueRef<V>> {
        resolve_value(&self.schema, &self.values, name)
    }

    /// Returns the policy of the field addressed by `name`.
    pub fn policy(&self, name: &str) -> Option<&FieldPolicy> {
        self.resolve_index(name).and_then(|index| self.schema.get(index))
    }

    fn lookup(&self, name: &str) -> Result<usize, AccessError> {
        self.resolve_index(name)
            .ok_or_else(|| AccessError::NotFound { name: name.into() })
    }
}

impl<V: AsValue> FieldSet<V> {
    /// Returns the value addressed by `name`.
    pub fn get(&self, name: &str) -> Option<&dyn Value> {
        self.resolve(name).map(|entry| entry.value.as_value())
    }

    /// Returns the value addressed by `name` as a `T`.
    pub fn get_as<T: Value>(&self, name: &str) -> Result<&T, AccessError> {
        let index = self.lookup(name)?;
        let value = self
            .values
            .find(index)
            .ok_or_else(|| AccessError::Absent { name: name.into() })?
            .value
            .as_value();
        value
            .downcast_ref::<T>()
            .ok_or_else(|| AccessError::TypeMismatch {
                name: name.into(),
                expected: type_name::<T>(),
                found: value.value_type_name(),
            })
    }

    /// Iterates over the fields that have a value, in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldPolicy, &dyn Value)> {
        self.values
            .iter()
            .map(|entry| (&self.schema[entry.schema_index], entry.value.as_value()))
    }
}

impl<V: AsValueMut> FieldSet<V> {
    /// Returns the value addressed by `name`, mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut dyn Value> {
        let index = self.resolve_index(name)?;
        self.values
            .find_mut(index)
            .map(|entry| entry.value.as_value_mut())
    }

    /// Returns the value addressed by `name` as a `&mut T`.
    pub fn get_mut_as<T: Value>(&mut self, name: &str) -> Result<&mut T, AccessError> {
        let index = self.lookup(name)?;
        let value = self
            .values
            .find_mut(index)
            .ok_or_else(|| AccessError::Absent { name: name.into() })?
            .value
            .as_value_mut();
        let found = value.value_type_name();
        value
            .downcast_mut::<T>()
            .ok_or_else(|| AccessError::TypeMismatch {
                name: name.into(),
                expected: type_name::<T>(),
                found,
            })
    }

    /// Iterates mutably over the fields that have a value, in schema order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&FieldPolicy, &mut dyn Value)> {
        let schema = &*self.schema;
        self.values
            .iter_mut()
            .map(move |entry| (&schema[entry.schema_index], entry.value.as_value_mut()))
    }
}
