//! Code generation for the Replicate derive macro.

mod members;
mod replicate;
mod shape;
mod utils;

use crate::field_kind::FieldKind;
use crate::parse::ReplicateInput;
use darling::FromDeriveInput;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_quote, DeriveInput, GenericParam};

/// Main entry point for code generation.
pub fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = ReplicateInput::from_derive_input(input)
        .map_err(|e| syn::Error::new_spanned(input, e.to_string()))?;

    validate(&parsed)?;

    let name = &parsed.ident;
    let mut generics = parsed.generics.clone();
    for param in generics.params.iter_mut() {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(::freeze::Replicate));
        }
    }
    if parsed.value {
        generics
            .make_where_clause()
            .predicates
            .push(parse_quote!(Self: ::core::clone::Clone));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let shape_body = shape::generate(&parsed);
    let replicate_body = replicate::generate(&parsed)?;
    let member_fns = members::generate(&parsed);

    Ok(quote! {
        impl #impl_generics ::freeze::Replicate for #name #ty_generics #where_clause {
            fn shape() -> ::freeze::Shape {
                #shape_body
            }

            fn replicate(&self) -> Self {
                #replicate_body
            }

            #member_fns
        }
    })
}

/// Reject attribute combinations and inputs the generated code cannot support.
fn validate(input: &ReplicateInput) -> syn::Result<()> {
    if let Some(lifetime) = input.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lifetime,
            "Replicate cannot be derived for types with lifetime parameters",
        ));
    }

    for (position, field) in input.all_fields().into_iter().enumerate() {
        let span_target = utils::field_span(field);

        if input.value && (field.skip || field.rename.is_some() || field.default.is_some()) {
            return Err(syn::Error::new(
                span_target,
                "field attributes have no effect on `#[freeze(value)]` types",
            ));
        }

        if field.default.is_some() && !field.skip {
            return Err(syn::Error::new(
                span_target,
                "`#[freeze(default)]` only applies to fields marked `#[freeze(skip)]`",
            ));
        }

        if let Some(expr) = &field.default {
            syn::parse_str::<syn::Expr>(expr).map_err(|e| {
                syn::Error::new(
                    span_target,
                    format!("invalid default expression `{expr}`: {e}"),
                )
            })?;
        }

        if matches!(&field.rename, Some(rename) if rename.is_empty()) {
            return Err(syn::Error::new(
                span_target,
                format!("member name of field {position} cannot be empty"),
            ));
        }
    }

    check_unique_members(input)
}

fn check_unique_members(input: &ReplicateInput) -> syn::Result<()> {
    let groups: Vec<Vec<_>> = match &input.data {
        darling::ast::Data::Struct(fields) => vec![fields.iter().collect()],
        darling::ast::Data::Enum(variants) => variants
            .iter()
            .map(|variant| variant.fields.iter().collect())
            .collect(),
    };

    for fields in groups {
        let mut seen = Vec::new();
        for (position, field) in fields.into_iter().enumerate() {
            if field.skip || FieldKind::from_type(&field.ty).is_interface() {
                continue;
            }
            let member = field.member_name(position);
            if seen.contains(&member) {
                return Err(syn::Error::new(
                    utils::field_span(field),
                    format!("duplicate member name `{member}`"),
                ));
            }
            seen.push(member);
        }
    }
    Ok(())
}
