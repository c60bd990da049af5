use crate::Record;
use crate::info::RecordInfo;

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to a record's [`RecordInfo`].
///
/// Automatically implemented by [`#[derive(Record)]`](crate::derive::Record).
///
/// # Manually Impl
///
/// Not recommended, but the cells in [`impls`](crate::impls) make it short.
///
/// ```
/// use fk_reflect::{
///     FieldSlot, FieldSlotMut, Record, Value,
///     impls::NonGenericRecordInfoCell,
///     info::{FieldDecl, RecordInfo, Typed},
/// };
///
/// struct Pair {
///     left: u8,
///     right: u8,
/// }
///
/// impl Value for Pair {
///     fn as_any(&self) -> &dyn core::any::Any { self }
///     fn as_any_mut(&mut self) -> &mut dyn core::any::Any { self }
///     fn as_record(&self) -> Option<&dyn Record> { Some(self) }
///     fn as_record_mut(&mut self) -> Option<&mut dyn Record> { Some(self) }
/// }
///
/// impl Typed for Pair {
///     fn record_info() -> &'static RecordInfo {
///         static CELL: NonGenericRecordInfoCell = NonGenericRecordInfoCell::new();
///         CELL.get_or_init(|| RecordInfo::new::<Self>(vec![
///             FieldDecl::new::<u8>("left"),
///             FieldDecl::new::<u8>("right").with_tag("json", "r"),
///         ]))
///     }
/// }
///
/// impl Record for Pair {
///     fn reflect_record_info(&self) -> &'static RecordInfo { Self::record_info() }
///     fn for_each_slot<'a>(&'a self, visit: &mut dyn FnMut(usize, FieldSlot<'a>)) {
///         visit(0, FieldSlot::value(&self.left));
///         visit(1, FieldSlot::value(&self.right));
///     }
///     fn for_each_slot_mut<'a>(&'a mut self, visit: &mut dyn FnMut(usize, FieldSlotMut<'a>)) {
///         let Self { left, right } = self;
///         visit(0, FieldSlotMut::value(left));
///         visit(1, FieldSlotMut::value(right));
///     }
/// }
///
/// let pair = Pair { left: 1, right: 2 };
/// let fields = fk_reflect::extract(&pair);
/// assert_eq!(fields.get_as::<u8>("r"), Ok(&2));
/// assert_eq!(fields.get_as::<u8>("left"), Ok(&1));
/// ```
pub trait Typed: Record + Sized {
    /// Returns the compile-time description of this record.
    fn record_info() -> &'static RecordInfo;
}
