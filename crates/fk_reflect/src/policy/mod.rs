//! Per-field serialization policy.
//!
//! - [`TagOptions`]: which tag keys carry the policy.
//! - [`FieldPolicy`]: the parsed policy of one field, with its external name.

mod field_policy;
mod options;

pub use field_policy::FieldPolicy;
pub use options::TagOptions;
