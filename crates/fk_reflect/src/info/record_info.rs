use core::any::{Any, TypeId};

use crate::info::FieldDecl;

// -----------------------------------------------------------------------------
// RecordInfo

/// The declared fields of one record type, in declaration order.
///
/// # Examples
///
/// ```
/// use fk_reflect::{derive::Record, info::Typed};
///
/// #[derive(Record)]
/// struct Account {
///     pub id: u64,
///     #[record(json = "display_name")]
///     pub name: String,
///     password: String,
/// }
///
/// let info = Account::record_info();
///
/// assert!(info.type_is::<Account>());
/// assert_eq!(info.field_len(), 3);
/// assert_eq!(info.index_of("name"), Some(1));
/// assert_eq!(info.field("name").unwrap().tags().get("json"), Some("display_name"));
/// assert!(!info.field_at(2).unwrap().is_exported());
/// # let _ = Account { id: 0, name: String::new(), password: String::new() }.password;
/// ```
#[derive(Debug)]
pub struct RecordInfo {
    ty_id: TypeId,
    type_name: &'static str,
    fields: Box<[FieldDecl]>,
}

impl RecordInfo {
    /// Creates the description of record `T` from its fields in declaration
    /// order.
    pub fn new<T: Any>(fields: impl IntoIterator<Item = FieldDecl>) -> Self {
        Self {
            ty_id: TypeId::of::<T>(),
            type_name: core::any::type_name::<T>(),
            fields: fields.into_iter().collect(),
        }
    }

    /// Returns the `TypeId` of the record.
    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }

    /// Returns the record type name.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns every declared field.
    #[inline]
    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    /// Returns the field declared at `index`.
    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&FieldDecl> {
        self.fields.get(index)
    }

    /// Returns the field with the source name `name`.
    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Returns the declaration index of the field with the source name `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name() == name)
    }

    /// Returns the number of declared fields, exported or not.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// Iterates over the declared fields in order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, FieldDecl> {
        self.fields.iter()
    }
}
