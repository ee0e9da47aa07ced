//! Record derive macro - generates the field table and slot accessors.

mod attr;
mod field;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

use field::FieldInfo;

/// Generate `Field` and `Record` implementations.
pub fn derive(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Record requires a struct with named fields",
                ))
            }
            Fields::Unnamed(fields) => {
                return Err(syn::Error::new_spanned(
                    fields,
                    "Record requires a struct with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Record can only be derived for structs",
            ))
        }
    };

    // Skipped fields stay out of the table entirely.
    let infos: Vec<FieldInfo> = fields
        .iter()
        .map(FieldInfo::from_field)
        .collect::<syn::Result<Vec<_>>>()?
        .into_iter()
        .filter(|info| !info.attrs.skip)
        .collect();

    let metas = infos.iter().map(|info| {
        let field_name = info.name();
        let default = option_tokens(info.attrs.default.as_deref());
        let env = option_tokens(info.attrs.env.as_deref());
        let length = match info.attrs.length {
            Some(len) => quote! { ::core::option::Option::Some(#len) },
            None => quote! { ::core::option::Option::None },
        };
        quote! {
            ::layerconf::shape::FieldMeta {
                name: #field_name,
                default: #default,
                length: #length,
                env: #env,
            }
        }
    });

    let arms = infos.iter().enumerate().map(|(index, info)| {
        let ident = &info.ident;
        quote! {
            #index => ::core::option::Option::Some(
                ::layerconf::shape::Field::slot(&mut self.#ident)
            ),
        }
    });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::layerconf::shape::Field for #name #ty_generics #where_clause {
            fn slot(&mut self) -> ::layerconf::shape::Slot<'_> {
                ::layerconf::shape::Slot::Record(self)
            }
        }

        impl #impl_generics ::layerconf::shape::Record for #name #ty_generics #where_clause {
            fn type_name(&self) -> &'static str {
                ::core::any::type_name::<Self>()
            }

            fn fields(&self) -> &'static [::layerconf::shape::FieldMeta] {
                const FIELDS: &[::layerconf::shape::FieldMeta] = &[#(#metas),*];
                FIELDS
            }

            #[allow(unused_variables)]
            fn field_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<::layerconf::shape::Slot<'_>> {
                match index {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

fn option_tokens(value: Option<&str>) -> TokenStream {
    match value {
        Some(value) => quote! { ::core::option::Option::Some(#value) },
        None => quote! { ::core::option::Option::None },
    }
}
