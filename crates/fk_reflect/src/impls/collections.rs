use core::any::Any;
use core::hash::{BuildHasher, Hash};
use std::collections::{BTreeMap, HashMap};

use fk_utils::hash::hashbrown;
use serde_core::Serialize;

use crate::Value;

impl<T> Value for Vec<T>
where
    T: Serialize + Send + Sync + 'static,
{
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    #[inline]
    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }

    #[inline]
    fn as_serialize(&self) -> Option<&dyn erased_serde::Serialize> {
        Some(self)
    }
}

impl<K, V> Value for BTreeMap<K, V>
where
    K: Serialize + Send + Sync + 'static,
    V: Serialize + Send + Sync + 'static,
{
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    #[inline]
    fn is_empty(&self) -> bool {
        BTreeMap::is_empty(self)
    }

    #[inline]
    fn as_serialize(&self) -> Option<&dyn erased_serde::Serialize> {
        Some(self)
    }
}

impl<K, V, S> Value for HashMap<K, V, S>
where
    K: Serialize + Eq + Hash + Send + Sync + 'static,
    V: Serialize + Send + Sync + 'static,
    S: BuildHasher + Send + Sync + 'static,
{
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    #[inline]
    fn is_empty(&self) -> bool {
        HashMap::is_empty(self)
    }

    #[inline]
    fn as_serialize(&self) -> Option<&dyn erased_serde::Serialize> {
        Some(self)
    }
}

impl<K, V, S> Value for hashbrown::HashMap<K, V, S>
where
    K: Serialize + Eq + Hash + Send + Sync + 'static,
    V: Serialize + Send + Sync + 'static,
    S: BuildHasher + Send + Sync + 'static,
{
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    #[inline]
    fn is_empty(&self) -> bool {
        hashbrown::HashMap::is_empty(self)
    }

    #[inline]
    fn as_serialize(&self) -> Option<&dyn erased_serde::Serialize> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use fk_utils::hash::{NoOpHashState, hashbrown};

    use crate::Value;

    #[test]
    fn empty_collections() {
        assert!(Value::is_empty(&Vec::<u8>::new()));
        assert!(!Value::is_empty(&vec![0_u8]));
        assert!(Value::is_empty(&BTreeMap::<String, u8>::new()));

        let mut map = HashMap::<String, u8>::new();
        assert!(Value::is_empty(&map));
        map.insert("a".into(), 1);
        assert!(!Value::is_empty(&map));

        let mut ids = hashbrown::HashMap::with_hasher(NoOpHashState);
        assert!(Value::is_empty(&ids));
        ids.insert(7_u64, "seven".to_string());
        assert!(!Value::is_empty(&ids));
    }

    #[test]
    fn vec_serializes() {
        let value: &dyn Value = &vec![1_u8, 2];
        let json = serde_json::to_string(value.as_serialize().unwrap()).unwrap();
        assert_eq!(json, "[1,2]");
    }
}
