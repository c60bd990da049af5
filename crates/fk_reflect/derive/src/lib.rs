//! Derive macros for `fk_reflect`.
//!
//! - [`Record`]
#![cfg_attr(docsrs, feature(doc_cfg))]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static RECORD_ATTRIBUTE_NAME: &str = "record";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Record Derivation
///
/// `#[derive(Record)]` implements the following traits for a struct with named
/// fields:
///
/// - `Typed`: a static `RecordInfo` listing every field in declaration order.
/// - `Value`: the record as a type-erased value.
/// - `Record`: positional access to the exported fields.
/// - `Embed`: lets the record be flattened into another record.
///
/// Only `pub` fields are exported. Other fields are described but never
/// reached through a `FieldSet`.
///
/// ## Field Attributes
///
/// ### Tags
///
/// Any `key = "value"` pair becomes a tag of the field. The value of the
/// primary key (default `json`) is `name,flag,flag...`.
///
/// ```rust, ignore
/// #[derive(Record)]
/// struct User {
///     #[record(json = "uid,omitzero")]
///     pub user_id: u64,
///     #[record(json = "-")]
///     pub cache_key: String,
/// }
/// ```
///
/// A whole tag string can be given with `tag`. When a key appears more than
/// once, the first value wins.
///
/// ```rust, ignore
/// #[derive(Record)]
/// struct User {
///     #[record(tag = r#"json:"display_name,allowempty" name:"nick""#)]
///     pub display_name: String,
/// }
/// ```
///
/// ### Embedding
///
/// `#[record(embed)]` splices the fields of another record into this one. The
/// field type must implement `Embed`: a derived record, an `Option` of a
/// derived record that also implements `Default`, or `Timestamp` (which stays a
/// single field).
///
/// ```rust, ignore
/// #[derive(Record, Default)]
/// struct Audit {
///     pub created_by: String,
/// }
///
/// #[derive(Record)]
/// struct Document {
///     pub title: String,
///     #[record(embed)]
///     pub audit: Option<Audit>,
/// }
/// ```
///
/// Tags on an embedded record field are not read.
///
/// ## Generics
///
/// Type parameters must be `Send + Sync + 'static`. Exported field types get a
/// `Value` (or `Embed`) bound on the generated impls.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::RecordStruct::from_derive_input(&ast) {
        Ok(record) => impls::impl_record(&record).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
