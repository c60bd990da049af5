use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{
    Data, DeriveInput, Fields, Generics, Ident, ImplGenerics, Path, Type, TypeGenerics,
    Visibility, WhereClause, parse_quote,
};

use super::{FieldAttributes, TagAttr};

// -----------------------------------------------------------------------------
// RecordField

/// One named field of the deriving struct.
pub(crate) struct RecordField<'a> {
    /// Declaration index.
    pub index: usize,
    pub member: &'a Ident,
    /// The source name, without `r#`.
    pub name: String,
    pub ty: &'a Type,
    pub exported: bool,
    pub attrs: FieldAttributes,
}

impl RecordField<'_> {
    /// The binding used when destructuring `self`.
    pub fn binding(&self) -> Ident {
        format_ident!("__field_{}", self.index)
    }

    /// Returns `true` if the field is visited by the slot visitors.
    #[inline]
    pub fn is_visited(&self) -> bool {
        self.exported
    }

    /// Generates the `FieldDecl` expression of this field.
    ///
    /// ```ignore
    /// _path_::FieldDecl::new::<T>("name")
    ///     (.with_exported(false))?
    ///     (.with_tag("key", "value") | .with_raw_tag("raw"))*
    /// ```
    pub fn to_decl_tokens(&self, fk_reflect_path: &Path) -> TokenStream {
        let field_decl_ = crate::path::field_decl_(fk_reflect_path);
        let ty = self.ty;
        let name = &self.name;

        let ctor = if self.exported && self.attrs.embed {
            quote! { #field_decl_::embedded::<#ty>(#name) }
        } else {
            quote! { #field_decl_::new::<#ty>(#name) }
        };

        let exported = if self.exported {
            None
        } else {
            Some(quote! { .with_exported(false) })
        };

        let tags = self.attrs.tags.iter().map(|tag| match tag {
            TagAttr::Pair(key, value) => quote! { .with_tag(#key, #value) },
            TagAttr::Raw(raw) => quote! { .with_raw_tag(#raw) },
        });

        quote! {
            #ctor #exported #(#tags)*
        }
    }
}

// -----------------------------------------------------------------------------
// RecordStruct

/// A struct with named fields deriving `Record`.
pub(crate) struct RecordStruct<'a> {
    fk_reflect_path: Path,
    ident: &'a Ident,
    generics: &'a Generics,
    fields: Vec<RecordField<'a>>,
}

impl<'a> RecordStruct<'a> {
    pub fn from_derive_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let named = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                _ => {
                    return Err(syn::Error::new_spanned(
                        &input.ident,
                        "`Record` can only be derived for structs with named fields",
                    ));
                }
            },
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "`Record` can only be derived for structs",
                ));
            }
        };

        let mut fields = Vec::with_capacity(named.named.len());
        for (index, field) in named.named.iter().enumerate() {
            // Named fields always have an ident.
            let Some(member) = field.ident.as_ref() else {
                continue;
            };
            fields.push(RecordField {
                index,
                member,
                name: member.unraw().to_string(),
                ty: &field.ty,
                exported: matches!(field.vis, Visibility::Public(_)),
                attrs: FieldAttributes::parse_attrs(&field.attrs)?,
            });
        }

        Ok(Self {
            fk_reflect_path: crate::path::fk_reflect(),
            ident: &input.ident,
            generics: &input.generics,
            fields,
        })
    }

    #[inline]
    pub fn fk_reflect_path(&self) -> &Path {
        &self.fk_reflect_path
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        self.ident
    }

    /// Fields reported by the slot visitors.
    pub fn visited_fields(&self) -> impl Iterator<Item = &RecordField<'a>> {
        self.fields.iter().filter(|f| f.is_visited())
    }

    /// Returns `true` if the struct has type parameters, in which case the
    /// description is stored per instantiation.
    pub fn impl_with_generic(&self) -> bool {
        self.generics.type_params().next().is_some()
    }

    /// Generics for the generated impls.
    ///
    /// For generic structs every type parameter gets `Send + Sync + 'static`,
    /// exported leaf field types get `Value` and embedded ones `Embed`.
    pub fn split_generics(&self) -> (ImplGenerics<'_>, TypeGenerics<'_>, Option<WhereClause>) {
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        if !self.impl_with_generic() {
            return (impl_generics, ty_generics, where_clause.cloned());
        }

        let mut where_clause = where_clause.cloned().unwrap_or_else(|| WhereClause {
            where_token: Default::default(),
            predicates: Default::default(),
        });

        for param in self.generics.type_params() {
            let ident = &param.ident;
            where_clause.predicates.push(parse_quote! {
                #ident: ::core::marker::Send + ::core::marker::Sync + 'static
            });
        }

        let value_ = crate::path::value_(&self.fk_reflect_path);
        let embed_ = crate::path::embed_(&self.fk_reflect_path);
        for field in self.visited_fields() {
            let ty = field.ty;
            where_clause.predicates.push(if field.attrs.embed {
                parse_quote! { #ty: #embed_ }
            } else {
                parse_quote! { #ty: #value_ }
            });
        }

        (impl_generics, ty_generics, Some(where_clause))
    }

    /// Generates the `RecordInfo` expression.
    pub fn to_info_tokens(&self) -> TokenStream {
        let record_info_ = crate::path::record_info_(&self.fk_reflect_path);
        let decls = self
            .fields
            .iter()
            .map(|f| f.to_decl_tokens(&self.fk_reflect_path));

        quote! {
            #record_info_::new::<Self>([
                #(#decls),*
            ])
        }
    }
}
