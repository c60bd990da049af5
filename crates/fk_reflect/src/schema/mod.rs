//! Flattened, per-type field schemas.
//!
//! - [`FlatSchema`]: the ordered policies of every flattened field of a record
//!   type, plus the plan the value walker follows.
//! - [`SchemaCache`]: computes each schema once per type and shares it.

mod cache;
mod flat_schema;

pub use cache::SchemaCache;
pub use flat_schema::{FieldPlan, FlatSchema};

use std::sync::Arc;

use crate::info::Typed;

/// Returns the schema of `T` from [`SchemaCache::shared`].
#[inline]
pub fn schema_of<T: Typed>() -> Arc<FlatSchema> {
    SchemaCache::shared().schema_of::<T>()
}
