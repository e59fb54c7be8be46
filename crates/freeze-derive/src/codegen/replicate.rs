//! `Replicate::replicate` code generation.

use super::utils;
use crate::parse::{FieldInput, ReplicateInput};
use darling::ast::Data;
use proc_macro2::TokenStream;
use quote::quote;

/// Generate the body of `replicate()`.
pub fn generate(input: &ReplicateInput) -> syn::Result<TokenStream> {
    if input.value {
        return Ok(quote! { ::core::clone::Clone::clone(self) });
    }

    if utils::has_interface_field(input) {
        return Ok(quote! {
            ::freeze::__private::unreachable_shape(::core::any::type_name::<Self>())
        });
    }

    match &input.data {
        Data::Struct(fields) => {
            let inits = initializers(fields.iter(), |member, _| quote! { &self.#member })?;
            Ok(quote! { Self { #(#inits),* } })
        }
        Data::Enum(variants) if variants.is_empty() => Ok(quote! { match *self {} }),
        Data::Enum(variants) => {
            let arms = variants
                .iter()
                .map(|variant| -> syn::Result<TokenStream> {
                    let ident = &variant.ident;
                    let bindings = variant
                        .fields
                        .iter()
                        .enumerate()
                        .filter(|(_, field)| !field.skip)
                        .map(|(position, field)| {
                            let member = field.member(position);
                            let binding = utils::binding(position);
                            quote! { #member: #binding }
                        });
                    let inits = initializers(variant.fields.iter(), |_, position| {
                        let binding = utils::binding(position);
                        quote! { #binding }
                    })?;
                    Ok(quote! {
                        Self::#ident { #(#bindings,)* .. } => Self::#ident { #(#inits),* }
                    })
                })
                .collect::<syn::Result<Vec<_>>>()?;
            Ok(quote! { match self { #(#arms,)* } })
        }
    }
}

/// `member: value` pairs; `source` yields a reference to the original field.
fn initializers<'a>(
    fields: impl Iterator<Item = &'a FieldInput>,
    source: impl Fn(&TokenStream, usize) -> TokenStream,
) -> syn::Result<Vec<TokenStream>> {
    fields
        .enumerate()
        .map(|(position, field)| {
            let member = field.member(position);
            if field.skip {
                let default = utils::default_expr(field)?;
                Ok(quote! { #member: #default })
            } else {
                let source = source(&member, position);
                Ok(quote! { #member: ::freeze::Replicate::replicate(#source) })
            }
        })
        .collect()
}
