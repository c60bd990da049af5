use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::RecordStruct;

/// Generate implementation code for `Typed`.
///
/// The description lives in a `static CELL`; generic structs use the cell
/// keyed by `TypeId` because the static is shared by every instantiation.
pub(crate) fn impl_trait_typed(record: &RecordStruct) -> TokenStream {
    let fk_reflect_path = record.fk_reflect_path();
    let typed_ = crate::path::typed_(fk_reflect_path);
    let record_info_ = crate::path::record_info_(fk_reflect_path);
    let info_tokens = record.to_info_tokens();

    let inner_cell_tokens = if record.impl_with_generic() {
        let info_cell = crate::path::generic_record_info_cell_(fk_reflect_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_insert::<Self>(|| {
                #info_tokens
            })
        }
    } else {
        let info_cell = crate::path::non_generic_record_info_cell_(fk_reflect_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_init(|| {
                #info_tokens
            })
        }
    };

    let ident = record.ident();
    let (impl_generics, ty_generics, where_clause) = record.split_generics();

    quote! {
        impl #impl_generics #typed_ for #ident #ty_generics #where_clause {
            fn record_info() -> &'static #record_info_ {
                #inner_cell_tokens
            }
        }
    }
}
