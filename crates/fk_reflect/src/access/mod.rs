//! Per-instance field access.
//!
//! - [`FlatValues`]: the live field values of one record instance, each tagged
//!   with its schema index.
//! - [`FieldSet`]: a [`FlatSchema`](crate::FlatSchema) joined with the
//!   [`FlatValues`] of one instance, addressable by name.
//! - [`extract`] / [`extract_mut`]: build a [`FieldSet`] through
//!   [`SchemaCache::shared`](crate::SchemaCache::shared).

mod error;
mod field_set;
mod flat_values;
mod walker;

pub use error::AccessError;
pub use field_set::{AsValue, AsValueMut, FieldSet, resolve_value};
pub use flat_values::{FieldValueRef, FlatValues, WriteMode};

use crate::{Record, SchemaCache, Value};

/// Reads the fields of `record` using the shared cache.
///
/// # Examples
///
/// ```
/// use fk_reflect::derive::Record;
///
/// #[derive(Record)]
/// struct User {
///     pub user_id: u64,
///     pub name: String,
/// }
///
/// let user = User { user_id: 7, name: "ada".into() };
/// let fields = fk_reflect::extract(&user);
///
/// assert_eq!(fields.get_as::<u64>("UserId"), Ok(&7));
/// assert_eq!(fields.get_as::<String>("name").map(String::as_str), Ok("ada"));
/// ```
#[inline]
pub fn extract<'a>(record: &'a dyn Record) -> FieldSet<&'a dyn Value> {
    SchemaCache::shared().extract(record)
}

/// Borrows the fields of `record` mutably using the shared cache.
#[inline]
pub fn extract_mut<'a>(record: &'a mut dyn Record, mode: WriteMode) -> FieldSet<&'a mut dyn Value> {
    SchemaCache::shared().extract_mut(record, mode)
}
