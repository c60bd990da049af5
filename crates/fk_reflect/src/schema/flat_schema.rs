use core::any::{Any, TypeId};
use core::ops::Index;

use fk_utils::{camel_split, capitalize};

use crate::policy::FieldPolicy;

// -----------------------------------------------------------------------------
// FieldPlan

/// What the value walker does with one declared field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldPlan {
    /// Not exported, or ignored by its tag.
    Skip,
    /// One flattened field.
    Leaf,
    /// An embedded record contributing `span` flattened fields.
    Composed { span: usize },
}

impl FieldPlan {
    /// Returns the number of schema indices the field occupies.
    #[inline]
    pub const fn span(&self) -> usize {
        match self {
            Self::Skip => 0,
            Self::Leaf => 1,
            Self::Composed { span } => *span,
        }
    }
}

// -----------------------------------------------------------------------------
// FlatSchema

/// The flattened field policies of a record type.
///
/// Index `i` names the same logical field for every instance of the type.
/// Fields of embedded records are spliced in where the embedding field is
/// declared.
///
/// # Examples
///
/// ```
/// use fk_reflect::{SchemaCache, derive::Record};
///
/// #[derive(Record, Default)]
/// struct Audit {
///     pub created_by: String,
/// }
///
/// #[derive(Record)]
/// struct Document {
///     pub title: String,
///     #[record(embed)]
///     pub audit: Option<Audit>,
///     #[record(json = "-")]
///     pub draft: bool,
///     pub revision: u32,
/// }
///
/// let schema = SchemaCache::new().schema_of::<Document>();
/// let names: Vec<_> = schema.iter().map(|p| p.marshal_name()).collect();
///
/// assert_eq!(names, ["title", "created_by", "revision"]);
/// assert_eq!(schema.resolve_index("CreatedBy"), Some(1));
/// assert_eq!(schema.resolve_index("draft"), None);
/// ```
#[derive(Debug)]
pub struct FlatSchema {
    ty_id: TypeId,
    type_name: &'static str,
    fields: Box<[FieldPolicy]>,
    plan: Box<[FieldPlan]>,
}

impl FlatSchema {
    pub(crate) fn new(
        ty_id: TypeId,
        type_name: &'static str,
        fields: Vec<FieldPolicy>,
        plan: Vec<FieldPlan>,
    ) -> Self {
        Self {
            ty_id,
            type_name,
            fields: fields.into_boxed_slice(),
            plan: plan.into_boxed_slice(),
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

    /// Returns the flattened field count.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no flattened fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the policy at schema index `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&FieldPolicy> {
        self.fields.get(index)
    }

    /// Returns every policy in schema order.
    #[inline]
    pub fn fields(&self) -> &[FieldPolicy] {
        &self.fields
    }

    /// Iterates over the policies in schema order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, FieldPolicy> {
        self.fields.iter()
    }

    /// Returns one plan entry per declared field of the record.
    #[inline]
    pub fn plan(&self) -> &[FieldPlan] {
        &self.plan
    }

    /// Finds the schema index addressed by `key`.
    ///
    /// Fields are tried in schema order and the first one passing any of
    /// these checks wins:
    ///
    /// 1. exact external name,
    /// 2. snake-case key against the snake-case source name,
    /// 3. exact source name,
    /// 4. capitalized key against the source name.
    pub fn resolve_index(&self, key: &str) -> Option<usize> {
        let snake = camel_split(key, "_");
        let capitalized = capitalize(key);
        self.fields.iter().position(|p| {
            p.marshal_name() == key
                || p.snake_field_name() == snake
                || p.field_name() == key
                || p.field_name() == capitalized
        })
    }
}

impl Index<usize> for FlatSchema {
    type Output = FieldPolicy;

    #[inline]
    fn index(&self, index: usize) -> &FieldPolicy {
        &self.fields[index]
    }
}

impl PartialEq for FlatSchema {
    fn eq(&self, other: &Self) -> bool {
        self.ty_id == other.ty_id && self.fields == other.fields && self.plan == other.plan
    }
}

impl Eq for FlatSchema {}

impl<'a> IntoIterator for &'a FlatSchema {
    type Item = &'a FieldPolicy;
    type IntoIter = core::slice::Iter<'a, FieldPolicy>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::SchemaCache;
    use crate::derive::Record;

    #[derive(Record)]
    #[allow(non_snake_case)]
    struct Renamed {
        #[record(json = "x")]
        pub Name: String,
        #[record(json = "name")]
        pub other: String,
    }

    #[test]
    fn earlier_field_wins_on_any_check() {
        let schema = SchemaCache::new().schema_of::<Renamed>();

        // `Name` splits to `name` before `other` is tried for its external name.
        assert_eq!(schema.resolve_index("name"), Some(0));
        assert_eq!(schema.resolve_index("x"), Some(0));
        assert_eq!(schema.resolve_index("other"), Some(1));
        assert_eq!(schema.resolve_index("Other"), Some(1));
        assert_eq!(schema.resolve_index("missing"), None);
    }
}
