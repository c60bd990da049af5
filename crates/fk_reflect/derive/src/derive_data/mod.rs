//! Parsing of `#[derive(Record)]` input.

// -----------------------------------------------------------------------------
// Modules

mod field_attributes;
mod record_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use field_attributes::{FieldAttributes, TagAttr};
pub(crate) use record_struct::RecordStruct;
