//! Items referenced by code generated from `fk_reflect` macros.
//!
//! Not part of the public API.

pub use erased_serde;
