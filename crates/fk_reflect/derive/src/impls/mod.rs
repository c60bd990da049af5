// -----------------------------------------------------------------------------
// Modules

mod trait_embed;
mod trait_record;
mod trait_typed;
mod trait_value;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::RecordStruct;

use trait_embed::impl_trait_embed;
use trait_record::impl_trait_record;
use trait_typed::impl_trait_typed;
use trait_value::impl_trait_value;

/// Generates every impl of `#[derive(Record)]`.
pub(crate) fn impl_record(record: &RecordStruct) -> TokenStream {
    let typed_impl = impl_trait_typed(record);
    let value_impl = impl_trait_value(record);
    let record_impl = impl_trait_record(record);
    let embed_impl = impl_trait_embed(record);

    quote! {
        #typed_impl

        #value_impl

        #record_impl

        #embed_impl
    }
}
