use core::any::Any;

use crate::info::{EmbedKind, Typed};
use crate::{Embed, Record, Value};

impl<T: Value> Value for Option<T> {
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
        self.is_none()
    }

    fn is_zero(&self) -> bool {
        self.as_ref().is_some_and(Value::is_zero)
    }

    fn is_false(&self) -> bool {
        self.as_ref().is_some_and(Value::is_false)
    }

    // `None` serializes as unit.
    fn as_serialize(&self) -> Option<&dyn erased_serde::Serialize> {
        match self {
            Some(value) => value.as_serialize(),
            None => Some(&()),
        }
    }

    fn as_record(&self) -> Option<&dyn Record> {
        self.as_ref().and_then(Value::as_record)
    }

    fn as_record_mut(&mut self) -> Option<&mut dyn Record> {
        self.as_mut().and_then(Value::as_record_mut)
    }
}

/// An optional embedded record.
///
/// A write in [`WriteMode::Allocate`](crate::WriteMode::Allocate) replaces
/// `None` with `T::default()`.
impl<T: Typed + Default> Embed for Option<T> {
    #[inline]
    fn embed_kind() -> EmbedKind {
        EmbedKind::Optional(T::record_info)
    }

    fn embedded(&self) -> Option<&dyn Record> {
        self.as_ref().map(|record| record as &dyn Record)
    }

    fn embedded_mut(&mut self, allocate: bool) -> Option<&mut dyn Record> {
        if allocate && self.is_none() {
            *self = Some(T::default());
        }
        self.as_mut().map(|record| record as &mut dyn Record)
    }
}

#[cfg(test)]
mod tests {
    use crate::derive::Record;
    use crate::{Embed, Value};

    #[derive(Record, Default, PartialEq, Debug)]
    struct Inner {
        pub n: u8,
    }

    #[test]
    fn option_predicates() {
        assert!(Value::is_empty(&None::<u8>));
        assert!(!Value::is_empty(&Some(0_u8)));
        assert!(Value::is_zero(&Some(0_u8)));
        assert!(Value::is_false(&Some(false)));
        assert!(!Value::is_zero(&None::<u8>));
    }

    #[test]
    fn none_serializes_as_null() {
        let value: &dyn Value = &None::<String>;
        let json = serde_json::to_string(value.as_serialize().unwrap()).unwrap();
        assert_eq!(json, "null");
    }

    #[test]
    fn embedded_allocates_on_request() {
        let mut slot: Option<Inner> = None;
        assert!(slot.embedded().is_none());
        assert!(slot.embedded_mut(false).is_none());
        assert!(slot.is_none());

        assert!(slot.embedded_mut(true).is_some());
        assert_eq!(slot, Some(Inner { n: 0 }));
    }
}
