mod record;
mod value;

pub use record::{Embed, FieldSlot, FieldSlotMut, Record};
pub use value::Value;
