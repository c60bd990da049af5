use crate::Value;
use crate::info::{EmbedKind, RecordInfo};

// -----------------------------------------------------------------------------
// Record

/// A structured value whose declared fields can be visited by position.
///
/// Implemented by [`#[derive(Record)]`](crate::derive::Record). The visitors
/// report one [`FieldSlot`] per exported field, keyed by the field's position
/// in [`RecordInfo::fields`]. Non-exported fields are never reported.
///
/// # Examples
///
/// ```
/// use fk_reflect::{FieldSlot, Record, derive::Record};
///
/// #[derive(Record, Default)]
/// struct Point {
///     pub x: i32,
///     pub y: i32,
///     hidden: bool,
/// }
///
/// let point = Point { x: 1, y: 2, hidden: true };
/// let mut seen = Vec::new();
/// point.for_each_slot(&mut |idx, slot| {
///     if let FieldSlot::Value(v) = slot {
///         seen.push((idx, *v.downcast_ref::<i32>().unwrap()));
///     }
/// });
///
/// assert_eq!(seen, [(0, 1), (1, 2)]);
/// assert_eq!(point.reflect_record_info().field_len(), 3);
/// # let _ = point.hidden;
/// ```
pub trait Record: Value {
    /// Returns the type-level description of this record.
    fn reflect_record_info(&self) -> &'static RecordInfo;

    /// Visits every exported field in declaration order.
    fn for_each_slot<'a>(&'a self, visit: &mut dyn FnMut(usize, FieldSlot<'a>));

    /// Visits every exported field in declaration order, mutably.
    fn for_each_slot_mut<'a>(&'a mut self, visit: &mut dyn FnMut(usize, FieldSlotMut<'a>));
}

impl core::fmt::Debug for dyn Record + '_ {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Record<{}>", self.reflect_record_info().type_name())
    }
}

// -----------------------------------------------------------------------------
// Embed

/// A field type that can be flattened into its enclosing record.
///
/// Fields marked `#[record(embed)]` must implement this trait.
///
/// - Derived records are [`EmbedKind::Composed`]: always present.
/// - `Option<R>` for a derived record `R` is [`EmbedKind::Optional`]: absent
///   while `None`, allocated with `R::default()` on a write that asks for it.
/// - [`Timestamp`](crate::Timestamp) is [`EmbedKind::Opaque`]: it is treated as
///   a single leaf even though it is a composite type.
pub trait Embed: Value {
    /// Describes how this type behaves when embedded.
    fn embed_kind() -> EmbedKind
    where
        Self: Sized;

    /// Returns the embedded record, or `None` if it is absent.
    fn embedded(&self) -> Option<&dyn Record>;

    /// Returns the embedded record mutably.
    ///
    /// An absent record is created first when `allocate` is `true`.
    fn embedded_mut(&mut self, allocate: bool) -> Option<&mut dyn Record>;
}

// -----------------------------------------------------------------------------
// FieldSlot

/// Borrowed view of one exported field, produced by [`Record::for_each_slot`].
#[derive(Clone, Copy, Debug)]
pub enum FieldSlot<'a> {
    /// A leaf value.
    Value(&'a dyn Value),
    /// A field whose type flattens into the enclosing record.
    Embedded(&'a dyn Embed),
}

impl<'a> FieldSlot<'a> {
    /// Creates a leaf slot.
    #[inline]
    pub fn value<T: Value>(field: &'a T) -> Self {
        Self::Value(field)
    }

    /// Creates a slot for an embedded field.
    ///
    /// Opaque embeds become leaf slots.
    #[inline]
    pub fn embed<T: Embed>(field: &'a T) -> Self {
        match T::embed_kind() {
            EmbedKind::Opaque => Self::Value(field),
            EmbedKind::Composed(_) | EmbedKind::Optional(_) => Self::Embedded(field),
        }
    }
}

/// Mutable view of one exported field, produced by [`Record::for_each_slot_mut`].
#[derive(Debug)]
pub enum FieldSlotMut<'a> {
    /// A leaf value.
    Value(&'a mut dyn Value),
    /// A field whose type flattens into the enclosing record.
    Embedded(&'a mut dyn Embed),
}

impl<'a> FieldSlotMut<'a> {
    /// Creates a leaf slot.
    #[inline]
    pub fn value<T: Value>(field: &'a mut T) -> Self {
        Self::Value(field)
    }

    /// Creates a slot for an embedded field.
    ///
    /// Opaque embeds become leaf slots.
    #[inline]
    pub fn embed<T: Embed>(field: &'a mut T) -> Self {
        match T::embed_kind() {
            EmbedKind::Opaque => Self::Value(field),
            EmbedKind::Composed(_) | EmbedKind::Optional(_) => Self::Embedded(field),
        }
    }
}

impl core::fmt::Debug for dyn Embed + '_ {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Embed<{}>", self.value_type_name())
    }
}
