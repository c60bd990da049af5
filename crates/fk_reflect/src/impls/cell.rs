//! Containers for static storage of record descriptions.
//!
//! This is usually used to implement [`Typed`](crate::info::Typed).
//!
//! ## NonGenericRecordInfoCell
//!
//! For non-generic records. Internally an [`OnceLock`], almost no additional
//! cost.
//!
//! ## GenericRecordInfoCell
//!
//! For generic records, the `static CELL` inside `record_info` is shared by
//! every instantiation. The inner is therefore a [`TypeIdMap`] behind a
//! [`RwLock`], and each description is leaked once per concrete type.

use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use fk_utils::TypeIdMap;

use crate::info::RecordInfo;

/// Static storage of a non-generic record's [`RecordInfo`].
///
/// See [`Typed`](crate::info::Typed) for an example.
pub struct NonGenericRecordInfoCell(OnceLock<RecordInfo>);

impl NonGenericRecordInfoCell {
    /// Create an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored description, creating it with `f` on first access.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &RecordInfo
    where
        F: FnOnce() -> RecordInfo,
    {
        self.0.get_or_init(f)
    }
}

impl Default for NonGenericRecordInfoCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Static storage of a generic record's [`RecordInfo`], one per instantiation.
///
/// # Examples
///
/// ```
/// use fk_reflect::{derive::Record, info::Typed};
///
/// #[derive(Record)]
/// struct Wrapper<T> {
///     pub inner: T,
/// }
///
/// let a = <Wrapper<u8>>::record_info();
/// let b = <Wrapper<String>>::record_info();
///
/// assert!(a.field_at(0).unwrap().type_is::<u8>());
/// assert!(b.field_at(0).unwrap().type_is::<String>());
/// assert!(core::ptr::eq(a, <Wrapper<u8>>::record_info()));
/// ```
pub struct GenericRecordInfoCell(RwLock<TypeIdMap<&'static RecordInfo>>);

impl GenericRecordInfoCell {
    /// Create an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the description stored for `G`, creating it with `f` if absent.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> RecordInfo) -> &RecordInfo {
        // Separate to reduce code compilation times
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(
        &self,
        type_id: TypeId,
        f: impl FnOnce() -> RecordInfo,
    ) -> &RecordInfo {
        match self.get_by_type_id(type_id) {
            Some(info) => info,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&RecordInfo> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    // A racing thread may have inserted first; its value is kept.
    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: RecordInfo) -> &RecordInfo {
        self.0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(Box::new(value)))
    }
}

impl Default for GenericRecordInfoCell {
    fn default() -> Self {
        Self::new()
    }
}
