use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::RecordStruct;

/// Generate implementation code for `Value`.
///
/// Records are never empty, zero or false, and have no serialization view
/// of their own; their fields are serialized one by one.
pub(crate) fn impl_trait_value(record: &RecordStruct) -> TokenStream {
    let fk_reflect_path = record.fk_reflect_path();
    let value_ = crate::path::value_(fk_reflect_path);
    let record_ = crate::path::record_(fk_reflect_path);

    let ident = record.ident();
    let (impl_generics, ty_generics, where_clause) = record.split_generics();

    quote! {
        impl #impl_generics #value_ for #ident #ty_generics #where_clause {
            #[inline]
            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            #[inline]
            fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
                self
            }

            #[inline]
            fn as_record(&self) -> ::core::option::Option<&dyn #record_> {
                ::core::option::Option::Some(self)
            }

            #[inline]
            fn as_record_mut(&mut self) -> ::core::option::Option<&mut dyn #record_> {
                ::core::option::Option::Some(self)
            }
        }
    }
}
