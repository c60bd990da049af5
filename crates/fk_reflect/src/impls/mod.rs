//! [`Value`](crate::Value) implementations for foreign types, and the static
//! cells used by [`Typed`](crate::info::Typed) implementations.
//!
//! - Primitives, `String`, `&'static str`, `Duration`: single leaves.
//! - `Option<T>`: empty when `None`; an optional embedded record when `T` is a
//!   record.
//! - `Vec<T>`, `BTreeMap`, `HashMap`, hashbrown's `HashMap`: empty when they
//!   have no elements.
//! - [`Timestamp`] (feature `timestamp`): an opaque embeddable leaf, empty at
//!   the Unix epoch.

mod cell;
mod collections;
mod option;
mod primitives;

#[cfg(feature = "timestamp")]
mod timestamp;

pub use cell::{GenericRecordInfoCell, NonGenericRecordInfoCell};

#[cfg(feature = "timestamp")]
pub use timestamp::Timestamp;

/// Implements [`Value`](crate::Value) for serializable leaf types.
///
/// The types must be `Serialize + Send + Sync + 'static`. None of the omission
/// predicates hold for them.
///
/// # Examples
///
/// ```
/// use fk_reflect::{Value, impl_value_opaque};
///
/// #[derive(serde::Serialize)]
/// struct Rgb(u8, u8, u8);
///
/// impl_value_opaque!(Rgb);
///
/// let color: &dyn Value = &Rgb(1, 2, 3);
/// assert!(color.as_serialize().is_some());
/// assert!(!color.is_empty());
/// ```
#[macro_export]
macro_rules! impl_value_opaque {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Value for $ty {
                #[inline]
                fn as_any(&self) -> &dyn ::core::any::Any {
                    self
                }

                #[inline]
                fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
                    self
                }

                #[inline]
                fn as_serialize(&self) -> ::core::option::Option<&dyn $crate::__macro_exports::erased_serde::Serialize> {
                    ::core::option::Option::Some(self)
                }
            }
        )+
    };
}
