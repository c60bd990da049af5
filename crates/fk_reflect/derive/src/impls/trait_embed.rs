use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::RecordStruct;

/// Generate implementation code for `Embed`.
///
/// A record embedded by value is always present.
pub(crate) fn impl_trait_embed(record: &RecordStruct) -> TokenStream {
    let fk_reflect_path = record.fk_reflect_path();
    let embed_ = crate::path::embed_(fk_reflect_path);
    let record_ = crate::path::record_(fk_reflect_path);
    let typed_ = crate::path::typed_(fk_reflect_path);
    let embed_kind_ = crate::path::embed_kind_(fk_reflect_path);

    let ident = record.ident();
    let (impl_generics, ty_generics, where_clause) = record.split_generics();

    quote! {
        impl #impl_generics #embed_ for #ident #ty_generics #where_clause {
            #[inline]
            fn embed_kind() -> #embed_kind_ {
                #embed_kind_::Composed(<Self as #typed_>::record_info)
            }

            #[inline]
            fn embedded(&self) -> ::core::option::Option<&dyn #record_> {
                ::core::option::Option::Some(self)
            }

            #[inline]
            fn embedded_mut(&mut self, _allocate: bool) -> ::core::option::Option<&mut dyn #record_> {
                ::core::option::Option::Some(self)
            }
        }
    }
}
