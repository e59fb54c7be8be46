//! Member table code generation: `member_names` and `visit_member`.

use super::utils;
use crate::parse::ReplicateInput;
use darling::ast::Data;
use proc_macro2::TokenStream;
use quote::quote;

/// Generate `member_names()` and `visit_member()`, or nothing for value shapes.
pub fn generate(input: &ReplicateInput) -> TokenStream {
    if input.value || utils::is_fieldless_enum(input) {
        return TokenStream::new();
    }

    let mut names: Vec<String> = Vec::new();
    for (position, field) in enumerate_fields(input) {
        if utils::is_member(field) {
            let name = field.member_name(position);
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    if names.is_empty() {
        return TokenStream::new();
    }

    let lookup = match &input.data {
        Data::Struct(fields) => {
            let arms = fields
                .iter()
                .enumerate()
                .filter(|(_, field)| utils::is_member(field))
                .map(|(position, field)| {
                    let name = field.member_name(position);
                    let member = field.member(position);
                    quote! { #name => { visit(&self.#member); true } }
                });
            quote! {
                match name {
                    #(#arms)*
                    _ => false,
                }
            }
        }
        Data::Enum(variants) => {
            let arms = variants.iter().map(|variant| {
                let ident = &variant.ident;
                let members: Vec<_> = variant
                    .fields
                    .iter()
                    .enumerate()
                    .filter(|(_, field)| utils::is_member(field))
                    .collect();
                let bindings = members.iter().map(|(position, field)| {
                    let member = field.member(*position);
                    let binding = utils::binding(*position);
                    quote! { #member: #binding }
                });
                let lookups = members.iter().map(|(position, field)| {
                    let name = field.member_name(*position);
                    let binding = utils::binding(*position);
                    quote! { #name => { visit(#binding); true } }
                });
                quote! {
                    Self::#ident { #(#bindings,)* .. } => match name {
                        #(#lookups)*
                        _ => false,
                    }
                }
            });
            quote! {
                match self {
                    #(#arms,)*
                }
            }
        }
    };

    quote! {
        fn member_names() -> ::std::vec::Vec<&'static str> {
            ::std::vec![#(#names),*]
        }

        fn visit_member(
            &self,
            name: &str,
            visit: &mut dyn ::core::ops::FnMut(&dyn ::freeze::Slot),
        ) -> bool {
            #lookup
        }
    }
}

fn enumerate_fields(input: &ReplicateInput) -> Vec<(usize, &crate::parse::FieldInput)> {
    match &input.data {
        Data::Struct(fields) => fields.iter().enumerate().collect(),
        Data::Enum(variants) => variants
            .iter()
            .flat_map(|variant| variant.fields.iter().enumerate())
            .collect(),
    }
}
