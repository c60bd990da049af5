#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Generated code names this crate `fk_reflect`; inside the crate (and its doc
// tests) that path must resolve too.
extern crate self as fk_reflect;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod access;
pub mod impls;
pub mod info;
pub mod policy;
pub mod schema;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use access::{AccessError, FieldSet, WriteMode, extract, extract_mut};
pub use fk_reflect_derive as derive;
pub use reflection::{Embed, FieldSlot, FieldSlotMut, Record, Value};
pub use schema::{FlatSchema, SchemaCache};

#[cfg(feature = "timestamp")]
pub use impls::Timestamp;
