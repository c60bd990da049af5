use core::any::{Any, TypeId};

use fk_utils::TagMap;

use crate::Embed;
use crate::info::RecordInfo;

// -----------------------------------------------------------------------------
// Kinds

/// How a record field takes part in flattening.
#[derive(Clone, Copy, Debug)]
pub enum FieldKind {
    /// An ordinary leaf field.
    Plain,
    /// A field marked `#[record(embed)]`.
    Embedded(EmbedKind),
}

/// The closed set of embeddable field kinds.
///
/// Record descriptions are reached through function pointers, so a record
/// embedding itself (through `Option`) does not recurse while being described.
#[derive(Clone, Copy, Debug)]
pub enum EmbedKind {
    /// A record stored inline.
    Composed(fn() -> &'static RecordInfo),
    /// A record that may be absent.
    Optional(fn() -> &'static RecordInfo),
    /// A composite type treated as one leaf.
    Opaque,
}

impl EmbedKind {
    /// Returns the embedded record's description, `None` for [`EmbedKind::Opaque`].
    #[inline]
    pub fn record_info(&self) -> Option<&'static RecordInfo> {
        match self {
            Self::Composed(info) | Self::Optional(info) => Some(info()),
            Self::Opaque => None,
        }
    }

    /// Returns `true` for [`EmbedKind::Optional`].
    #[inline]
    pub const fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }
}

// -----------------------------------------------------------------------------
// FieldDecl

/// One declared field of a record.
///
/// # Examples
///
/// ```
/// use fk_reflect::info::{FieldDecl, FieldKind};
///
/// let decl = FieldDecl::new::<u64>("UserID").with_raw_tag(r#"json:"uid,omitzero""#);
///
/// assert_eq!(decl.name(), "UserID");
/// assert!(decl.type_is::<u64>());
/// assert!(decl.is_exported());
/// assert_eq!(decl.tags().get("json"), Some("uid,omitzero"));
/// assert!(matches!(decl.kind(), FieldKind::Plain));
/// ```
#[derive(Clone, Debug)]
pub struct FieldDecl {
    name: &'static str,
    ty_id: TypeId,
    type_name: &'static str,
    exported: bool,
    tags: TagMap,
    kind: FieldKind,
}

impl FieldDecl {
    /// Creates an exported leaf field named `name` with type `T`.
    #[inline]
    pub fn new<T: Any>(name: &'static str) -> Self {
        Self {
            name,
            ty_id: TypeId::of::<T>(),
            type_name: core::any::type_name::<T>(),
            exported: true,
            tags: TagMap::new(),
            kind: FieldKind::Plain,
        }
    }

    /// Creates an exported embedded field named `name` with type `T`.
    #[inline]
    pub fn embedded<T: Embed>(name: &'static str) -> Self {
        Self {
            kind: FieldKind::Embedded(T::embed_kind()),
            ..Self::new::<T>(name)
        }
    }

    /// Sets whether the field is exported.
    ///
    /// Non-exported fields are described but never flattened.
    #[inline]
    pub fn with_exported(mut self, exported: bool) -> Self {
        self.exported = exported;
        self
    }

    /// Adds one tag pair. An existing key keeps its value.
    #[inline]
    pub fn with_tag(mut self, key: &str, value: &str) -> Self {
        self.tags.insert(key, value);
        self
    }

    /// Adds the pairs of a raw tag string like `json:"id,omitempty" name:"uid"`.
    ///
    /// Malformed input keeps the pairs read before the error.
    pub fn with_raw_tag(mut self, raw: &str) -> Self {
        if let Err(e) = self.tags.extend_from_raw(raw) {
            log::debug!("malformed tag on field `{}`: {e}", self.name);
        }
        self
    }

    /// Returns the source field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the `TypeId` of the field type.
    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    /// Check if the given type matches the field type.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }

    /// Returns the field type name.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns `true` if the field is exported.
    #[inline]
    pub const fn is_exported(&self) -> bool {
        self.exported
    }

    /// Returns the parsed tags.
    #[inline]
    pub const fn tags(&self) -> &TagMap {
        &self.tags
    }

    /// Returns the field kind.
    #[inline]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns the embed kind if the field is marked embedded.
    #[inline]
    pub const fn embed_kind(&self) -> Option<EmbedKind> {
        match self.kind {
            FieldKind::Embedded(kind) => Some(kind),
            FieldKind::Plain => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EmbedKind, FieldDecl, FieldKind};

    #[test]
    fn builder_keeps_first_tag() {
        let decl = FieldDecl::new::<String>("Name")
            .with_tag("json", "name")
            .with_raw_tag(r#"json:"other" name:"n""#);

        assert_eq!(decl.tags().get("json"), Some("name"));
        assert_eq!(decl.tags().get("name"), Some("n"));
    }

    #[test]
    fn malformed_raw_tag_is_lossy() {
        let decl = FieldDecl::new::<u8>("Age").with_raw_tag(r#"json:"age" bad"#);
        assert_eq!(decl.tags().len(), 1);
    }

    #[test]
    fn hidden_field() {
        let decl = FieldDecl::new::<bool>("secret").with_exported(false);
        assert!(!decl.is_exported());
        assert!(matches!(decl.kind(), FieldKind::Plain));
        assert!(decl.embed_kind().is_none());
    }

    #[test]
    fn optional_embed_kind() {
        use crate::derive::Record;

        #[derive(Record, Default)]
        struct Inner {
            pub a: u8,
        }

        let decl = FieldDecl::embedded::<Option<Inner>>("Inner");
        let kind = decl.embed_kind().unwrap();
        assert!(kind.is_optional());
        assert_eq!(kind.record_info().unwrap().type_name(), core::any::type_name::<Inner>());

        let decl = FieldDecl::embedded::<Inner>("Inner");
        assert!(matches!(decl.embed_kind(), Some(EmbedKind::Composed(_))));
    }
}
