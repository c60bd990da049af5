#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Modules

mod typeid_map;

pub mod case;
pub mod hash;
pub mod tag;

// -----------------------------------------------------------------------------
// Top-level exports

pub use case::{camel_split, capitalize};
pub use tag::{TagError, TagMap};
pub use typeid_map::TypeIdMap;
