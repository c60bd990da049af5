use core::any::Any;

use crate::Record;

// -----------------------------------------------------------------------------
// Value

/// A type-erased field value.
///
/// Every value reachable through a [`FieldSet`](crate::FieldSet) is a
/// `&dyn Value`. The trait carries the three omission predicates used by
/// [`FieldPolicy::should_omit`](crate::policy::FieldPolicy::should_omit) and an
/// optional serialization view.
///
/// Leaf implementations exist for primitives, strings, `Option<T>`, `Vec<T>`,
/// maps and (with the `timestamp` feature) [`Timestamp`](crate::Timestamp).
/// Records get theirs from [`#[derive(Record)]`](crate::derive::Record).
/// Other serializable types can use [`impl_value_opaque!`](crate::impl_value_opaque).
///
/// # Examples
///
/// ```
/// use fk_reflect::Value;
///
/// let value: &dyn Value = &0_u32;
///
/// assert!(value.is_zero());
/// assert!(!value.is_empty());
/// assert_eq!(value.downcast_ref::<u32>(), Some(&0));
/// assert_eq!(value.value_type_name(), "u32");
/// ```
pub trait Value: Any + Send + Sync {
    /// Casts this value to `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Casts this value to `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Returns the type name of the concrete value, for diagnostics.
    fn value_type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    /// Empty strings, empty collections, absent options.
    fn is_empty(&self) -> bool {
        false
    }

    /// Numeric zero.
    fn is_zero(&self) -> bool {
        false
    }

    /// Boolean `false`.
    fn is_false(&self) -> bool {
        false
    }

    /// Returns a serialization view of this value, if it has one.
    fn as_serialize(&self) -> Option<&dyn erased_serde::Serialize> {
        None
    }

    /// Returns `Some` if this value is itself a record.
    fn as_record(&self) -> Option<&dyn Record> {
        None
    }

    /// Returns `Some` if this value is itself a record.
    fn as_record_mut(&mut self) -> Option<&mut dyn Record> {
        None
    }
}

impl<'a> dyn Value + 'a {
    /// Returns `true` if the concrete type is `T`.
    #[inline]
    pub fn is<T: Value>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Downcasts to `&T`.
    #[inline]
    pub fn downcast_ref<T: Value>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Downcasts to `&mut T`.
    #[inline]
    pub fn downcast_mut<T: Value>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

impl core::fmt::Debug for dyn Value + '_ {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Value<{}>", self.value_type_name())
    }
}
