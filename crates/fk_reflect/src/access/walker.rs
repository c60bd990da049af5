use log::warn;

use crate::access::{FieldSet, FieldValueRef, FlatValues, WriteMode};
use crate::info::FieldDecl;
use crate::schema::FieldPlan;
use crate::{FieldSlot, FieldSlotMut, Record, SchemaCache, Value};

impl SchemaCache {
    /// Reads the flattened fields of `record`.
    ///
    /// Fields inside an absent optional embedded record get no value, but
    /// every other field keeps its schema index.
    ///
    /// # Examples
    ///
    /// ```
    /// use fk_reflect::{SchemaCache, derive::Record};
    ///
    /// #[derive(Record, Default)]
    /// struct Network {
    ///     pub vpc_id: String,
    /// }
    ///
    /// #[derive(Record)]
    /// struct Host {
    ///     pub name: String,
    ///     #[record(embed)]
    ///     pub network: Option<Network>,
    ///     pub cpu: u32,
    /// }
    ///
    /// let host = Host { name: "h1".into(), network: None, cpu: 4 };
    /// let fields = SchemaCache::new().extract(&host);
    ///
    /// assert_eq!(fields.schema().len(), 3);
    /// assert_eq!(fields.len(), 2);
    /// assert!(fields.get("vpc_id").is_none());
    /// assert_eq!(fields.get_as::<u32>("cpu"), Ok(&4));
    /// ```
    pub fn extract<'a>(&self, record: &'a dyn Record) -> FieldSet<&'a dyn Value> {
        let schema = self.schema_for(record.reflect_record_info());
        let mut entries = Vec::with_capacity(schema.len());
        let end = walk(self, record, 0, &mut entries);
        debug_assert_eq!(end, schema.len());
        FieldSet::new(schema, FlatValues::new(entries))
    }

    /// Borrows the flattened fields of `record` mutably.
    ///
    /// With [`WriteMode::Allocate`] absent optional embedded records are
    /// created first, so every schema index gets a value.
    pub fn extract_mut<'a>(
        &self,
        record: &'a mut dyn Record,
        mode: WriteMode,
    ) -> FieldSet<&'a mut dyn Value> {
        let schema = self.schema_for(record.reflect_record_info());
        let mut entries = Vec::with_capacity(schema.len());
        let end = walk_mut(self, record, mode, 0, &mut entries);
        debug_assert_eq!(end, schema.len());
        FieldSet::new(schema, FlatValues::new(entries))
    }
}

#[cold]
fn missing_slot(record: &'static str, decl: Option<&FieldDecl>) {
    warn!(
        "field `{}` of `{record}` has no accessible value; treated as absent",
        decl.map_or("?", FieldDecl::name),
    );
}

// Returns the schema index following the last field of `record`.
fn walk<'a>(
    cache: &SchemaCache,
    record: &'a dyn Record,
    mut index: usize,
    out: &mut Vec<FieldValueRef<&'a dyn Value>>,
) -> usize {
    let info = record.reflect_record_info();
    let schema = cache.schema_for(info);

    let mut slots: Vec<Option<FieldSlot<'a>>> = vec![None; info.field_len()];
    record.for_each_slot(&mut |idx: usize, slot: FieldSlot<'a>| {
        if let Some(entry) = slots.get_mut(idx) {
            *entry = Some(slot);
        }
    });

    for (idx, (plan, slot)) in schema.plan().iter().zip(slots).enumerate() {
        match (*plan, slot) {
            (FieldPlan::Skip, _) => {}
            (FieldPlan::Leaf, Some(FieldSlot::Value(value))) => {
                out.push(FieldValueRef::new(value, index));
                index += 1;
            }
            (FieldPlan::Leaf, _) => {
                missing_slot(info.type_name(), info.field_at(idx));
                index += 1;
            }
            (FieldPlan::Composed { span }, Some(FieldSlot::Embedded(embed))) => {
                match embed.embedded() {
                    Some(inner) => index = walk(cache, inner, index, out),
                    None => index += span,
                }
            }
            (FieldPlan::Composed { span }, _) => index += span,
        }
    }

    index
}

fn walk_mut<'a>(
    cache: &SchemaCache,
    record: &'a mut dyn Record,
    mode: WriteMode,
    mut index: usize,
    out: &mut Vec<FieldValueRef<&'a mut dyn Value>>,
) -> usize {
    let info = record.reflect_record_info();
    let schema = cache.schema_for(info);

    let mut slots: Vec<Option<FieldSlotMut<'a>>> =
        core::iter::repeat_with(|| None).take(info.field_len()).collect();
    record.for_each_slot_mut(&mut |idx: usize, slot: FieldSlotMut<'a>| {
        if let Some(entry) = slots.get_mut(idx) {
            *entry = Some(slot);
        }
    });

    for (idx, (plan, slot)) in schema.plan().iter().zip(slots).enumerate() {
        match (*plan, slot) {
            (FieldPlan::Skip, _) => {}
            (FieldPlan::Leaf, Some(FieldSlotMut::Value(value))) => {
                out.push(FieldValueRef::new(value, index));
                index += 1;
            }
            (FieldPlan::Leaf, _) => {
                missing_slot(info.type_name(), info.field_at(idx));
                index += 1;
            }
            (FieldPlan::Composed { span }, Some(FieldSlotMut::Embedded(embed))) => {
                match embed.embedded_mut(mode.allocates()) {
                    Some(inner) => index = walk_mut(cache, inner, mode, index, out),
                    None => index += span,
                }
            }
            (FieldPlan::Composed { span }, _) => index += span,
        }
    }

    index
}

#[cfg(test)]
mod tests {
    use crate::derive::Record;
    use crate::{AccessError, SchemaCache, WriteMode};

    #[derive(Record, Default, Debug, PartialEq)]
    struct Labels {
        pub region: String,
        #[record(json = "zone,allowempty")]
        pub zone: String,
    }

    #[derive(Record, Default, Debug, PartialEq)]
    #[allow(non_snake_case)]
    struct Identity {
        #[record(json = "user_id")]
        pub UserID: u64,
        pub display_name: String,
    }

    #[derive(Record, Debug, PartialEq)]
    struct Instance {
        pub name: String,
        #[record(embed)]
        pub identity: Identity,
        #[record(embed)]
        pub labels: Option<Labels>,
        pub cpu: u32,
        secret: String,
    }

    fn instance(labels: Option<Labels>) -> Instance {
        Instance {
            name: "vm-1".into(),
            identity: Identity {
                UserID: 42,
                display_name: "ada".into(),
            },
            labels,
            cpu: 2,
            secret: "s".into(),
        }
    }

    #[test]
    fn present_read_and_write_agree() {
        let cache = SchemaCache::new();
        let mut value = instance(Some(Labels::default()));

        let read: Vec<_> = {
            let fields = cache.extract(&value);
            assert_eq!(fields.len(), fields.schema().len());
            fields.values().schema_indices().collect()
        };
        assert_eq!(read, [0, 1, 2, 3, 4, 5]);

        let write: Vec<_> = {
            let fields = cache.extract_mut(&mut value, WriteMode::Allocate);
            assert_eq!(fields.len(), fields.schema().len());
            fields.values().schema_indices().collect()
        };
        assert_eq!(read, write);

        assert_eq!(value.labels, Some(Labels::default()));
        assert_eq!(value.secret, "s");
    }

    #[test]
    fn absent_optional_reserves_its_span() {
        let cache = SchemaCache::new();
        let value = instance(None);
        let fields = cache.extract(&value);

        assert_eq!(fields.schema().len(), 6);
        assert_eq!(fields.values().schema_indices().collect::<Vec<_>>(), [0, 1, 2, 5]);

        assert_eq!(fields.resolve_index("region"), Some(3));
        assert!(fields.get("region").is_none());
        assert_eq!(
            fields.get_as::<String>("zone"),
            Err(AccessError::Absent { name: "zone".into() })
        );
        assert_eq!(fields.get_as::<u32>("cpu"), Ok(&2));
    }

    #[test]
    fn allocate_materializes_absent_optionals() {
        let cache = SchemaCache::new();
        let mut value = instance(None);

        let mut fields = cache.extract_mut(&mut value, WriteMode::Allocate);
        assert_eq!(fields.len(), fields.schema().len());
        *fields.get_mut_as::<String>("region").unwrap() = "eu".into();

        assert_eq!(
            value.labels,
            Some(Labels {
                region: "eu".into(),
                zone: String::new()
            })
        );
    }

    #[test]
    fn read_mode_leaves_absent_optionals() {
        let cache = SchemaCache::new();
        let mut value = instance(None);

        let fields = cache.extract_mut(&mut value, WriteMode::Read);
        assert_eq!(fields.len(), 4);
        drop(fields);
        assert!(value.labels.is_none());
    }

    #[test]
    fn fallback_chain() {
        let cache = SchemaCache::new();
        let value = instance(None);
        let fields = cache.extract(&value);

        // external name, source name, snake case and capitalized forms
        for key in ["user_id", "UserID", "userID", "display_name", "DisplayName"] {
            assert!(fields.get(key).is_some(), "`{key}` should resolve");
        }
        assert_eq!(fields.get_as::<u64>("userID"), Ok(&42));

        #[derive(Record)]
        #[allow(non_snake_case)]
        struct Keyed {
            #[record(json = "ident")]
            pub ID: u32,
        }

        let keyed = cache.schema_of::<Keyed>();
        assert_eq!(keyed.resolve_index("ident"), Some(0));
        assert_eq!(keyed.resolve_index("id"), Some(0));
        // `iD` splits to `i_d`; only the capitalized form matches
        assert_eq!(keyed.resolve_index("iD"), Some(0));
        assert_eq!(keyed.resolve_index("Id"), Some(0));
        assert_eq!(
            fields.get_as::<String>("nope"),
            Err(AccessError::NotFound { name: "nope".into() })
        );
    }

    #[test]
    fn type_mismatch() {
        let cache = SchemaCache::new();
        let value = instance(None);
        let fields = cache.extract(&value);

        let err = fields.get_as::<String>("cpu").unwrap_err();
        assert_eq!(
            err,
            AccessError::TypeMismatch {
                name: "cpu".into(),
                expected: core::any::type_name::<String>(),
                found: "u32",
            }
        );
    }

    #[test]
    fn iteration_pairs_policies_with_values() {
        let cache = SchemaCache::new();
        let value = instance(Some(Labels::default()));
        let fields = cache.extract(&value);

        let kept: Vec<_> = fields
            .iter()
            .filter(|(policy, value)| !policy.should_omit(*value))
            .map(|(policy, _)| policy.marshal_name())
            .collect();
        assert_eq!(kept, ["name", "user_id", "display_name", "zone", "cpu"]);
    }
}
