use core::any::Any;

use chrono::{DateTime, Utc};

use crate::info::EmbedKind;
use crate::{Embed, Record, Value};

/// A UTC point in time.
///
/// Behaves as one leaf wherever it appears, including under
/// `#[record(embed)]`. It is empty (and zero) at the Unix epoch, which is also
/// its default value.
///
/// # Examples
///
/// ```
/// use fk_reflect::{Timestamp, Value};
///
/// let unset = Timestamp::default();
/// assert!(Value::is_empty(&unset));
///
/// let set = Timestamp::from_timestamp(1_700_000_000, 0).unwrap();
/// assert!(!Value::is_empty(&set));
/// ```
pub type Timestamp = DateTime<Utc>;

#[inline]
fn is_unset(ts: &Timestamp) -> bool {
    ts.timestamp() == 0 && ts.timestamp_subsec_nanos() == 0
}

impl Value for Timestamp {
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
        is_unset(self)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        is_unset(self)
    }

    #[inline]
    fn as_serialize(&self) -> Option<&dyn erased_serde::Serialize> {
        Some(self)
    }
}

impl Embed for Timestamp {
    #[inline]
    fn embed_kind() -> EmbedKind {
        EmbedKind::Opaque
    }

    #[inline]
    fn embedded(&self) -> Option<&dyn Record> {
        None
    }

    #[inline]
    fn embedded_mut(&mut self, _allocate: bool) -> Option<&mut dyn Record> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::Timestamp;
    use crate::Value;

    #[test]
    fn epoch_is_unset() {
        let epoch = Timestamp::from_timestamp(0, 0).unwrap();
        assert!(Value::is_empty(&epoch));
        assert!(Value::is_zero(&epoch));

        let later = Timestamp::from_timestamp(0, 1).unwrap();
        assert!(!Value::is_empty(&later));
    }

    #[test]
    fn serializes_as_rfc3339() {
        let ts = Timestamp::from_timestamp(1_700_000_000, 0).unwrap();
        let value: &dyn Value = &ts;
        let json = serde_json::to_string(value.as_serialize().unwrap()).unwrap();
        assert_eq!(json, "\"2023-11-14T22:13:20Z\"");
    }
}
