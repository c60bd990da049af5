use core::any::TypeId;
use std::sync::{Arc, PoisonError, RwLock};

use fk_utils::TypeIdMap;
use log::{debug, trace};

use crate::info::{EmbedKind, FieldKind, RecordInfo, Typed};
use crate::policy::{FieldPolicy, TagOptions};
use crate::schema::{FieldPlan, FlatSchema};

// -----------------------------------------------------------------------------
// SchemaCache

/// Computes and memoizes one [`FlatSchema`] per record type.
///
/// Lookups take a read lock. A miss computes the schema outside any lock and
/// inserts it under the write lock; if another thread got there first, its
/// schema is kept and returned. Schemas are never evicted.
///
/// All schemas of one cache are parsed with the same [`TagOptions`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use fk_reflect::{SchemaCache, derive::Record};
///
/// #[derive(Record)]
/// struct Login {
///     #[record(json = "user")]
///     pub user_name: String,
///     pub attempts: u32,
/// }
///
/// let cache = SchemaCache::new();
/// let schema = cache.schema_of::<Login>();
///
/// assert_eq!(schema[0].marshal_name(), "user");
/// assert!(Arc::ptr_eq(&schema, &cache.schema_of::<Login>()));
/// assert!(cache.contains::<Login>());
/// ```
pub struct SchemaCache {
    options: TagOptions,
    schemas: RwLock<TypeIdMap<Arc<FlatSchema>>>,
}

impl SchemaCache {
    /// Creates an empty cache reading `json` and `name` tags.
    #[inline]
    pub const fn new() -> Self {
        Self {
            options: TagOptions::new(),
            schemas: RwLock::new(TypeIdMap::new()),
        }
    }

    /// Creates an empty cache with custom tag keys.
    #[inline]
    pub fn with_options(options: TagOptions) -> Self {
        Self {
            options,
            schemas: RwLock::new(TypeIdMap::new()),
        }
    }

    /// Returns the process-wide cache.
    #[inline]
    pub fn shared() -> &'static SchemaCache {
        static SHARED: SchemaCache = SchemaCache::new();
        &SHARED
    }

    /// Returns the tag options of this cache.
    #[inline]
    pub fn options(&self) -> &TagOptions {
        &self.options
    }

    /// Returns the schema of `T`, computing it on first use.
    #[inline]
    pub fn schema_of<T: Typed>(&self) -> Arc<FlatSchema> {
        self.schema_for(T::record_info())
    }

    /// Returns the schema of the record described by `info`, computing it on
    /// first use.
    pub fn schema_for(&self, info: &'static RecordInfo) -> Arc<FlatSchema> {
        if let Some(schema) = self.get(info.ty_id()) {
            trace!("flat schema cache hit for `{}`", info.type_name());
            return schema;
        }

        let computed = Arc::new(self.compute(info));
        debug!(
            "computed flat schema for `{}` with {} fields",
            info.type_name(),
            computed.len(),
        );

        self.schemas
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(info.ty_id(), || computed)
            .clone()
    }

    #[inline(never)]
    fn get(&self, type_id: TypeId) -> Option<Arc<FlatSchema>> {
        self.schemas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned()
    }

    // Sub-record schemas come from `schema_for`, so every embedded type is
    // cached as well. No lock is held here.
    fn compute(&self, info: &'static RecordInfo) -> FlatSchema {
        let mut fields = Vec::with_capacity(info.field_len());
        let mut plan = Vec::with_capacity(info.field_len());

        for decl in info.iter() {
            if !decl.is_exported() {
                plan.push(FieldPlan::Skip);
                continue;
            }

            match decl.kind() {
                FieldKind::Embedded(EmbedKind::Composed(sub) | EmbedKind::Optional(sub)) => {
                    let sub = self.schema_for(sub());
                    fields.extend(sub.iter().cloned());
                    plan.push(FieldPlan::Composed { span: sub.len() });
                }
                FieldKind::Plain | FieldKind::Embedded(EmbedKind::Opaque) => {
                    let policy = FieldPolicy::parse(decl, &self.options);
                    if policy.is_ignored() {
                        plan.push(FieldPlan::Skip);
                    } else {
                        fields.push(policy);
                        plan.push(FieldPlan::Leaf);
                    }
                }
            }
        }

        FlatSchema::new(info.ty_id(), info.type_name(), fields, plan)
    }

    /// Returns the number of cached schemas.
    pub fn len(&self) -> usize {
        self.schemas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if no schema has been computed yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the schema of `T` is cached.
    pub fn contains<T: Typed>(&self) -> bool {
        self.schemas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_type::<T>()
    }
}

impl Default for SchemaCache {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for SchemaCache {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SchemaCache")
            .field("options", &self.options)
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::SchemaCache;
    use crate::derive::Record;
    use crate::policy::TagOptions;
    use crate::schema::FieldPlan;

    #[derive(Record, Default)]
    struct Base {
        pub id: u64,
        #[record(tag = r#"json:"created_at,omitzero""#)]
        pub created: u64,
    }

    #[derive(Record, Default)]
    struct Meta {
        pub owner: String,
        #[record(json = "-")]
        pub internal: String,
    }

    #[derive(Record)]
    struct Server {
        #[record(embed)]
        pub base: Base,
        pub name: String,
        #[allow(dead_code)]
        hidden: u8,
        #[record(embed)]
        pub meta: Option<Meta>,
        #[record(name = "zone_id")]
        pub zone: String,
    }

    #[test]
    fn composed_fields_are_inlined_in_order() {
        let cache = SchemaCache::new();
        let schema = cache.schema_of::<Server>();
        let names: Vec<_> = schema.iter().map(|p| p.marshal_name()).collect();

        assert_eq!(names, ["id", "created_at", "name", "owner", "zone_id"]);
        assert!(schema[1].omit_zero());
        assert_eq!(
            schema.plan(),
            [
                FieldPlan::Composed { span: 2 },
                FieldPlan::Leaf,
                FieldPlan::Skip,
                FieldPlan::Composed { span: 1 },
                FieldPlan::Leaf,
            ]
        );
    }

    #[test]
    fn computation_is_idempotent_and_caches_sub_records() {
        let cache = SchemaCache::new();
        assert!(cache.is_empty());

        let a = cache.schema_of::<Server>();
        let b = cache.schema_of::<Server>();
        assert!(Arc::ptr_eq(&a, &b));

        assert!(cache.contains::<Base>());
        assert!(cache.contains::<Meta>());
        assert_eq!(cache.len(), 3);

        let other = SchemaCache::new().schema_of::<Server>();
        assert_eq!(*a, *other);
    }

    #[test]
    fn options_change_primary_key() {
        #[derive(Record)]
        struct Tagged {
            #[record(json = "j", yaml = "y")]
            pub field: u8,
        }

        let json = SchemaCache::new().schema_of::<Tagged>();
        let yaml = SchemaCache::with_options(TagOptions::new().with_primary_key("yaml"))
            .schema_of::<Tagged>();

        assert_eq!(json[0].marshal_name(), "j");
        assert_eq!(yaml[0].marshal_name(), "y");
    }

    #[test]
    fn concurrent_first_use_converges() {
        let cache = SchemaCache::new();

        let schemas: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| cache.schema_of::<Server>()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let stored = cache.schema_of::<Server>();
        for schema in &schemas {
            assert_eq!(**schema, *stored);
        }
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn shared_cache_is_static() {
        let a = SchemaCache::shared().schema_of::<Meta>();
        let b = crate::schema::schema_of::<Meta>();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn hidden_field_has_no_value() {
        let cache = SchemaCache::new();
        let server = Server {
            base: Base::default(),
            name: "db".into(),
            hidden: 1,
            meta: None,
            zone: String::new(),
        };
        let fields = cache.extract(&server);

        assert_eq!(fields.resolve_index("hidden"), None);
        assert!(fields.iter().all(|(_, value)| !value.is::<u8>()));
    }
}
