//! Paths of the `fk_reflect` items referenced by generated code.
//!
//! Kept in one place so a change to the `fk_reflect` layout only touches this
//! module.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `fk_reflect` crate.
///
/// 1. For crates that depend on `fk_reflect`, `::fk_reflect` is returned.
/// 2. For crates that depend on `fieldkit`, `::fieldkit::reflect` is returned.
/// 3. For other situations, `::fk_reflect` is returned, but this may be incorrect.
///
/// This reads the caller's Cargo.toml, so it is called once per derive and the
/// result is passed around.
pub(crate) fn fk_reflect() -> syn::Path {
    fk_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("fk_reflect"))
}

// -----------------------------------------------------------------------------
// Items

#[inline(always)]
pub(crate) fn value_(fk_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #fk_reflect_path::Value
    }
}

#[inline(always)]
pub(crate) fn record_(fk_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #fk_reflect_path::Record
    }
}

#[inline(always)]
pub(crate) fn embed_(fk_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #fk_reflect_path::Embed
    }
}

#[inline(always)]
pub(crate) fn field_slot_(fk_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #fk_reflect_path::FieldSlot
    }
}

#[inline(always)]
pub(crate) fn field_slot_mut_(fk_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #fk_reflect_path::FieldSlotMut
    }
}

#[inline(always)]
pub(crate) fn typed_(fk_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #fk_reflect_path::info::Typed
    }
}

#[inline(always)]
pub(crate) fn record_info_(fk_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #fk_reflect_path::info::RecordInfo
    }
}

#[inline(always)]
pub(crate) fn field_decl_(fk_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #fk_reflect_path::info::FieldDecl
    }
}

#[inline(always)]
pub(crate) fn embed_kind_(fk_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #fk_reflect_path::info::EmbedKind
    }
}

#[inline(always)]
pub(crate) fn non_generic_record_info_cell_(fk_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #fk_reflect_path::impls::NonGenericRecordInfoCell
    }
}

#[inline(always)]
pub(crate) fn generic_record_info_cell_(fk_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #fk_reflect_path::impls::GenericRecordInfoCell
    }
}
