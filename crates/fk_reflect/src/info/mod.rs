//! Compile-time record descriptions.
//!
//! - [`RecordInfo`]: the declared fields of one record type, in order.
//! - [`FieldDecl`]: one declared field, with its name, type, visibility, raw
//!   tags and [`FieldKind`].
//! - [`EmbedKind`]: how an embedded field flattens into its parent.
//! - [`Typed`]: static access to a type's [`RecordInfo`].
//!
//! All of this is produced by [`#[derive(Record)]`](crate::derive::Record) and
//! stored in the static cells of [`impls`](crate::impls).

mod field_decl;
mod record_info;
mod typed;

pub use field_decl::{EmbedKind, FieldDecl, FieldKind};
pub use record_info::RecordInfo;
pub use typed::Typed;
