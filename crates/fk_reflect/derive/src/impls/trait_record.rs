use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::RecordStruct;

/// Generate implementation code for `Record`.
///
/// Similar to following:
///
/// ```ignore
/// fn for_each_slot<'__a>(&'__a self, __visit: &mut dyn FnMut(usize, FieldSlot<'__a>)) {
///     __visit(0, FieldSlot::value(&self.name));
///     __visit(2, FieldSlot::embed(&self.audit));
/// }
///
/// fn for_each_slot_mut<'__a>(&'__a mut self, __visit: &mut dyn FnMut(usize, FieldSlotMut<'__a>)) {
///     let Self { name: __field_0, audit: __field_2, .. } = self;
///     __visit(0, FieldSlotMut::value(__field_0));
///     __visit(2, FieldSlotMut::embed(__field_2));
/// }
/// ```
///
/// Destructuring gives disjoint mutable borrows of every visited field.
pub(crate) fn impl_trait_record(record: &RecordStruct) -> TokenStream {
    let fk_reflect_path = record.fk_reflect_path();
    let record_ = crate::path::record_(fk_reflect_path);
    let typed_ = crate::path::typed_(fk_reflect_path);
    let record_info_ = crate::path::record_info_(fk_reflect_path);
    let field_slot_ = crate::path::field_slot_(fk_reflect_path);
    let field_slot_mut_ = crate::path::field_slot_mut_(fk_reflect_path);

    let mut visit = Vec::new();
    let mut visit_mut = Vec::new();
    let mut bindings = Vec::new();

    for field in record.visited_fields() {
        let index = field.index;
        let member = field.member;
        let binding = field.binding();
        let ctor = if field.attrs.embed {
            quote! { embed }
        } else {
            quote! { value }
        };

        visit.push(quote! {
            __visit(#index, #field_slot_::#ctor(&self.#member));
        });
        visit_mut.push(quote! {
            __visit(#index, #field_slot_mut_::#ctor(#binding));
        });
        bindings.push(quote! { #member: #binding });
    }

    let ident = record.ident();
    let (impl_generics, ty_generics, where_clause) = record.split_generics();

    quote! {
        impl #impl_generics #record_ for #ident #ty_generics #where_clause {
            #[inline]
            fn reflect_record_info(&self) -> &'static #record_info_ {
                <Self as #typed_>::record_info()
            }

            fn for_each_slot<'__a>(
                &'__a self,
                __visit: &mut dyn ::core::ops::FnMut(usize, #field_slot_<'__a>),
            ) {
                #(#visit)*
            }

            fn for_each_slot_mut<'__a>(
                &'__a mut self,
                __visit: &mut dyn ::core::ops::FnMut(usize, #field_slot_mut_<'__a>),
            ) {
                let Self { #(#bindings,)* .. } = self;
                #(#visit_mut)*
            }
        }
    }
}
